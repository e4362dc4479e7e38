use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A column of the design browser. Each column reads one property of a [`Solution`].
///
/// [`Solution`]: super::solution::Solution
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum DesignCategory {
    #[serde(rename = "Id")]
    Id,
    #[serde(rename = "Title")]
    Title,
    #[serde(rename = "Designer")]
    Designer,
    #[serde(rename = "Votes")]
    Votes,
    #[serde(rename = "My Votes")]
    MyVotes,
    #[serde(rename = "Description")]
    Description,
    #[serde(rename = "Round")]
    Round,
    #[serde(rename = "GC Pairs")]
    GcPairs,
    #[serde(rename = "UA Pairs")]
    UaPairs,
    #[serde(rename = "GU Pairs")]
    GuPairs,
    #[serde(rename = "Melting Point")]
    MeltingPoint,
    #[serde(rename = "Free Energy")]
    FreeEnergy,
    #[serde(rename = "Synthesized")]
    Synthesized,
    #[serde(rename = "Synthesis score")]
    SynthesisScore,
    #[serde(rename = "Sequence")]
    Sequence,
}

/// How a column's values are compared and filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int,
    Number,
    String,
    Boolean,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown design category: '{0}'")]
pub struct UnknownCategory(pub String);

// Keys are lower-case with single spaces; `parse` folds case, '-' and '_' before lookup.
static CATEGORY_NAMES: Map<&'static str, DesignCategory> = phf_map! {
    "id" => DesignCategory::Id,
    "title" => DesignCategory::Title,
    "designer" => DesignCategory::Designer,
    "votes" => DesignCategory::Votes,
    "my votes" => DesignCategory::MyVotes,
    "description" => DesignCategory::Description,
    "round" => DesignCategory::Round,
    "gc pairs" => DesignCategory::GcPairs,
    "ua pairs" => DesignCategory::UaPairs,
    "au pairs" => DesignCategory::UaPairs,
    "gu pairs" => DesignCategory::GuPairs,
    "melting point" => DesignCategory::MeltingPoint,
    "free energy" => DesignCategory::FreeEnergy,
    "synthesized" => DesignCategory::Synthesized,
    "synthesis score" => DesignCategory::SynthesisScore,
    "sequence" => DesignCategory::Sequence,
};

impl DesignCategory {
    pub const ALL: [DesignCategory; 15] = [
        DesignCategory::Id,
        DesignCategory::Title,
        DesignCategory::Designer,
        DesignCategory::Votes,
        DesignCategory::MyVotes,
        DesignCategory::Description,
        DesignCategory::Round,
        DesignCategory::GcPairs,
        DesignCategory::UaPairs,
        DesignCategory::GuPairs,
        DesignCategory::MeltingPoint,
        DesignCategory::FreeEnergy,
        DesignCategory::Synthesized,
        DesignCategory::SynthesisScore,
        DesignCategory::Sequence,
    ];

    /// Columns shown when no column set has been persisted.
    pub const DEFAULT_COLUMNS: [DesignCategory; 15] = Self::ALL;

    pub fn display_name(self) -> &'static str {
        match self {
            DesignCategory::Id => "Id",
            DesignCategory::Title => "Title",
            DesignCategory::Designer => "Designer",
            DesignCategory::Votes => "Votes",
            DesignCategory::MyVotes => "My Votes",
            DesignCategory::Description => "Description",
            DesignCategory::Round => "Round",
            DesignCategory::GcPairs => "GC Pairs",
            DesignCategory::UaPairs => "UA Pairs",
            DesignCategory::GuPairs => "GU Pairs",
            DesignCategory::MeltingPoint => "Melting Point",
            DesignCategory::FreeEnergy => "Free Energy",
            DesignCategory::Synthesized => "Synthesized",
            DesignCategory::SynthesisScore => "Synthesis score",
            DesignCategory::Sequence => "Sequence",
        }
    }

    pub fn data_type(self) -> DataType {
        match self {
            DesignCategory::Title
            | DesignCategory::Designer
            | DesignCategory::Description
            | DesignCategory::Sequence => DataType::String,
            DesignCategory::MeltingPoint
            | DesignCategory::FreeEnergy
            | DesignCategory::SynthesisScore => DataType::Number,
            DesignCategory::Synthesized => DataType::Boolean,
            DesignCategory::Id
            | DesignCategory::Votes
            | DesignCategory::MyVotes
            | DesignCategory::Round
            | DesignCategory::GcPairs
            | DesignCategory::UaPairs
            | DesignCategory::GuPairs => DataType::Int,
        }
    }

    /// Vote columns disappear once a puzzle no longer accepts votes.
    pub fn is_vote_column(self) -> bool {
        matches!(self, DesignCategory::Votes | DesignCategory::MyVotes)
    }

    pub fn is_available(self, novote: bool) -> bool {
        !(novote && self.is_vote_column())
    }

    /// Whether the column offers a plain sort. `Sequence` is only sortable against a
    /// reference sequence.
    pub fn is_sortable(self, novote: bool) -> bool {
        self != DesignCategory::Sequence && self.is_available(novote)
    }
}

impl fmt::Display for DesignCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DesignCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s
            .trim()
            .to_ascii_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        CATEGORY_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
