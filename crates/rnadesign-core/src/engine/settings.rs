use crate::core::models::category::DesignCategory;
use crate::core::models::ids::SolutionId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Browser state kept between sessions: the chosen column order and the marked solutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserSettings {
    pub columns: Vec<DesignCategory>,
    pub marked: Vec<SolutionId>,
}

/// Settings exactly as stored, before any validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSettings {
    #[serde(default)]
    pub columns: Option<toml::Value>,
    #[serde(default)]
    pub marked: Option<toml::Value>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            columns: DesignCategory::DEFAULT_COLUMNS.to_vec(),
            marked: Vec::new(),
        }
    }
}

impl BrowserSettings {
    /// Validates stored settings. Anything malformed is replaced with its default and logged;
    /// this never fails.
    pub fn sanitize(raw: RawSettings) -> Self {
        let columns = match raw.columns {
            None => DesignCategory::DEFAULT_COLUMNS.to_vec(),
            Some(value) => parse_columns(&value).unwrap_or_else(|| {
                warn!("Stored column set is malformed; using the default columns.");
                DesignCategory::DEFAULT_COLUMNS.to_vec()
            }),
        };
        let marked = match raw.marked {
            None => Vec::new(),
            Some(value) => parse_marked(&value).unwrap_or_else(|| {
                warn!("Stored marked solution list is malformed; clearing marks.");
                Vec::new()
            }),
        };
        Self { columns, marked }
    }

    pub fn from_toml_str(text: &str) -> Self {
        match toml::from_str::<RawSettings>(text) {
            Ok(raw) => Self::sanitize(raw),
            Err(e) => {
                warn!("Stored browser settings could not be parsed ({}); using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// The stored columns that can be shown for a puzzle.
    pub fn visible_columns(&self, novote: bool) -> Vec<DesignCategory> {
        self.columns
            .iter()
            .copied()
            .filter(|c| c.is_available(novote))
            .collect()
    }
}

fn parse_columns(value: &toml::Value) -> Option<Vec<DesignCategory>> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for item in value.as_array()? {
        let category = item.as_str()?.parse::<DesignCategory>().ok()?;
        if seen.insert(category) {
            columns.push(category);
        }
    }
    if columns.is_empty() {
        return None;
    }
    Some(columns)
}

fn parse_marked(value: &toml::Value) -> Option<Vec<SolutionId>> {
    let mut seen = HashSet::new();
    let mut marked = Vec::new();
    for item in value.as_array()? {
        let id = match item {
            toml::Value::Integer(n) => u64::try_from(*n).ok()?,
            toml::Value::String(s) => s.trim().parse::<u64>().ok()?,
            _ => return None,
        };
        if seen.insert(id) {
            marked.push(SolutionId(id));
        }
    }
    Some(marked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_settings_load_unchanged() {
        let settings = BrowserSettings::from_toml_str(
            "columns = [\"Title\", \"my-votes\", \"GC Pairs\"]\nmarked = [4, 9]\n",
        );
        assert_eq!(
            settings.columns,
            vec![
                DesignCategory::Title,
                DesignCategory::MyVotes,
                DesignCategory::GcPairs
            ]
        );
        assert_eq!(settings.marked, vec![SolutionId(4), SolutionId(9)]);
    }

    #[test]
    fn unknown_column_names_fall_back_to_defaults() {
        let settings =
            BrowserSettings::from_toml_str("columns = [\"Title\", \"Shape\"]\nmarked = [1]");
        assert_eq!(settings.columns, DesignCategory::DEFAULT_COLUMNS.to_vec());
        assert_eq!(settings.marked, vec![SolutionId(1)]);
    }

    #[test]
    fn corrupt_id_lists_are_cleared() {
        for text in ["marked = [1, \"x\"]", "marked = [-3]", "marked = \"1,2\"", "marked = [1.5]"] {
            let settings = BrowserSettings::from_toml_str(text);
            assert!(settings.marked.is_empty(), "{text}");
            assert_eq!(settings.columns, DesignCategory::DEFAULT_COLUMNS.to_vec());
        }
    }

    #[test]
    fn numeric_strings_are_accepted_as_ids() {
        let settings = BrowserSettings::from_toml_str("marked = [\"12\", 12, 13]");
        assert_eq!(settings.marked, vec![SolutionId(12), SolutionId(13)]);
    }

    #[test]
    fn duplicate_columns_keep_the_first_occurrence() {
        let settings =
            BrowserSettings::from_toml_str("columns = [\"Votes\", \"Title\", \"votes\"]");
        assert_eq!(
            settings.columns,
            vec![DesignCategory::Votes, DesignCategory::Title]
        );
    }

    #[test]
    fn unparseable_text_yields_defaults() {
        assert_eq!(
            BrowserSettings::from_toml_str("columns = [unterminated"),
            BrowserSettings::default()
        );
        assert_eq!(BrowserSettings::from_toml_str(""), BrowserSettings::default());
    }

    #[test]
    fn written_settings_load_back() {
        let settings = BrowserSettings {
            columns: vec![DesignCategory::SynthesisScore, DesignCategory::Id],
            marked: vec![SolutionId(77)],
        };
        let text = settings.to_toml_string().unwrap();
        assert_eq!(BrowserSettings::from_toml_str(&text), settings);
    }

    #[test]
    fn visible_columns_drop_vote_columns_when_voting_is_closed() {
        let settings = BrowserSettings::default();
        let visible = settings.visible_columns(true);
        assert_eq!(visible.len(), 13);
        assert!(!visible.contains(&DesignCategory::Votes));
        assert_eq!(settings.visible_columns(false).len(), 15);
    }
}
