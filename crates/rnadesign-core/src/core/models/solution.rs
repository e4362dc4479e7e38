use super::category::DesignCategory;
use super::ids::SolutionId;
use super::pairs::PairCountStatistics;
use serde::{Deserialize, Serialize};

const TITLE_DISPLAY_LIMIT: usize = 30;
const TITLE_DISPLAY_KEEP: usize = 25;
const DESCRIPTION_DISPLAY_LIMIT: usize = 45;
const DESCRIPTION_DISPLAY_KEEP: usize = 40;

/// One submitted design as delivered by the upstream service.
///
/// The model never mutates a solution except to sync vote tallies returned by the service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Solution {
    pub id: SolutionId,
    pub title: String,
    pub designer: String,
    pub votes: u32,
    pub my_votes: u32,
    pub round: u32,
    pub description: String,
    pub sequence: String,
    pub melting_point: f64,
    pub free_energy: f64,
    pub synthesis_score: Option<f64>,
    pub synthesized: bool,
    pub gc_pairs: u32,
    pub au_pairs: u32,
    pub gu_pairs: u32,
}

/// A borrowed, typed view of one column value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    Int(i64),
    /// Solution ids, which use the full `u64` range.
    UInt(u64),
    Number(f64),
    Text(&'a str),
    Flag(bool),
    Missing,
}

impl PropertyValue<'_> {
    /// Numeric view used by range filters. Text, flags and missing values have none.
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            PropertyValue::Int(v) => Some(v as f64),
            PropertyValue::UInt(v) => Some(v as f64),
            PropertyValue::Number(v) => Some(v),
            _ => None,
        }
    }
}

impl Solution {
    pub fn property(&self, category: DesignCategory) -> PropertyValue<'_> {
        match category {
            DesignCategory::Id => PropertyValue::UInt(self.id.0),
            DesignCategory::Title => PropertyValue::Text(&self.title),
            DesignCategory::Designer => PropertyValue::Text(&self.designer),
            DesignCategory::Votes => PropertyValue::Int(self.votes.into()),
            DesignCategory::MyVotes => PropertyValue::Int(self.my_votes.into()),
            DesignCategory::Description => PropertyValue::Text(&self.description),
            DesignCategory::Round => PropertyValue::Int(self.round.into()),
            DesignCategory::GcPairs => PropertyValue::Int(self.gc_pairs.into()),
            DesignCategory::UaPairs => PropertyValue::Int(self.au_pairs.into()),
            DesignCategory::GuPairs => PropertyValue::Int(self.gu_pairs.into()),
            DesignCategory::MeltingPoint => PropertyValue::Number(self.melting_point),
            DesignCategory::FreeEnergy => PropertyValue::Number(self.free_energy),
            DesignCategory::Synthesized => PropertyValue::Flag(self.synthesized),
            DesignCategory::SynthesisScore => self
                .synthesis_score
                .map_or(PropertyValue::Missing, PropertyValue::Number),
            DesignCategory::Sequence => PropertyValue::Text(&self.sequence),
        }
    }

    pub fn pair_counts(&self) -> PairCountStatistics {
        PairCountStatistics::new(self.gc_pairs, self.au_pairs, self.gu_pairs)
    }

    pub fn has_my_vote(&self) -> bool {
        self.my_votes > 0
    }

    /// Cell text for a table rendering of this solution. Long titles and descriptions are
    /// shortened with an ellipsis.
    pub fn display_text(&self, category: DesignCategory) -> String {
        match category {
            DesignCategory::Title => {
                truncate(&self.title, TITLE_DISPLAY_LIMIT, TITLE_DISPLAY_KEEP)
            }
            DesignCategory::Description => truncate(
                &self.description,
                DESCRIPTION_DISPLAY_LIMIT,
                DESCRIPTION_DISPLAY_KEEP,
            ),
            other => match self.property(other) {
                PropertyValue::Int(v) => v.to_string(),
                PropertyValue::UInt(v) => v.to_string(),
                PropertyValue::Number(v) => format!("{:.2}", v),
                PropertyValue::Text(t) => t.to_string(),
                PropertyValue::Flag(true) => "Yes".to_string(),
                PropertyValue::Flag(false) => "No".to_string(),
                PropertyValue::Missing => "-".to_string(),
            },
        }
    }
}

fn truncate(text: &str, limit: usize, keep: usize) -> String {
    if text.chars().count() < limit {
        text.to_string()
    } else {
        let mut shortened: String = text.chars().take(keep).collect();
        shortened.push_str("...");
        shortened
    }
}
