use crate::core::models::category::{DataType, DesignCategory};
use crate::core::models::solution::{PropertyValue, Solution};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FilterError {
    #[error("Invalid numeric bound '{value}' for column '{category}'")]
    InvalidNumber {
        category: DesignCategory,
        value: String,
    },

    #[error("Invalid flag '{value}' for column '{category}'. Expected yes or no.")]
    InvalidFlag {
        category: DesignCategory,
        value: String,
    },

    #[error("Column '{0}' is hidden while voting is closed")]
    HiddenColumn(DesignCategory),
}

/// One column's display predicate as the user typed it.
///
/// How the arguments are read depends on the column's [`DataType`]:
///
/// - `Int` / `Number`: inclusive range, `arg1` is the lower bound and `arg2` the upper
///   bound. Either may be absent or blank.
/// - `String`: case-insensitive substring match on `arg1`. `arg2` is ignored.
/// - `Boolean`: `arg1` is one of `yes`, `no`, `true`, `false`, `y`, `n`, `1`, `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FilterPredicate {
    pub category: DesignCategory,
    #[serde(default)]
    pub arg1: Option<String>,
    #[serde(default)]
    pub arg2: Option<String>,
}

impl FilterPredicate {
    pub fn new(category: DesignCategory, arg1: Option<&str>, arg2: Option<&str>) -> Self {
        Self {
            category,
            arg1: arg1.map(str::to_string),
            arg2: arg2.map(str::to_string),
        }
    }

    fn is_blank(&self) -> bool {
        blank(self.arg1.as_deref()).is_none() && blank(self.arg2.as_deref()).is_none()
    }

    fn compile(&self) -> Result<Condition, FilterError> {
        let category = self.category;
        let arg1 = blank(self.arg1.as_deref());
        let arg2 = blank(self.arg2.as_deref());
        match category.data_type() {
            DataType::Int | DataType::Number => Ok(Condition::Range {
                min: arg1.map(|v| parse_bound(category, v)).transpose()?,
                max: arg2.map(|v| parse_bound(category, v)).transpose()?,
            }),
            DataType::String => Ok(Condition::Contains(
                arg1.unwrap_or_default().to_lowercase(),
            )),
            DataType::Boolean => {
                // The flag lives in the first argument; report whichever one was typed.
                let value = arg1.or(arg2).unwrap_or_default();
                arg1.and_then(parse_flag)
                    .map(Condition::Flag)
                    .ok_or_else(|| FilterError::InvalidFlag {
                        category,
                        value: value.to_string(),
                    })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Range { min: Option<f64>, max: Option<f64> },
    Contains(String),
    Flag(bool),
}

impl Condition {
    fn accepts(&self, value: PropertyValue<'_>) -> bool {
        match self {
            Condition::Range { min, max } => {
                if min.is_none() && max.is_none() {
                    return true;
                }
                // Missing values and NaN fail any bounded range.
                let Some(v) = value.as_number().filter(|v| !v.is_nan()) else {
                    return false;
                };
                min.is_none_or(|lo| v >= lo) && max.is_none_or(|hi| v <= hi)
            }
            Condition::Contains(needle) => match value {
                PropertyValue::Text(text) => text.to_lowercase().contains(needle.as_str()),
                _ => needle.is_empty(),
            },
            Condition::Flag(expected) => matches!(value, PropertyValue::Flag(v) if v == *expected),
        }
    }
}

/// At most one predicate per column. A solution is displayed only if it passes all of them.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: BTreeMap<DesignCategory, (FilterPredicate, Condition)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs or replaces the predicate for `predicate.category`. A predicate whose
    /// arguments are all blank clears the column instead.
    pub fn set_filter(&mut self, predicate: FilterPredicate) -> Result<(), FilterError> {
        if predicate.is_blank() {
            self.clear_filter(predicate.category);
            return Ok(());
        }
        let condition = predicate.compile()?;
        self.filters
            .insert(predicate.category, (predicate, condition));
        Ok(())
    }

    pub fn clear_filter(&mut self, category: DesignCategory) -> Option<FilterPredicate> {
        self.filters.remove(&category).map(|(predicate, _)| predicate)
    }

    pub fn get(&self, category: DesignCategory) -> Option<&FilterPredicate> {
        self.filters.get(&category).map(|(predicate, _)| predicate)
    }

    pub fn predicates(&self) -> impl Iterator<Item = &FilterPredicate> {
        self.filters.values().map(|(predicate, _)| predicate)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn should_display(&self, solution: &Solution) -> bool {
        self.filters
            .iter()
            .all(|(&category, (_, condition))| condition.accepts(solution.property(category)))
    }
}

fn blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_bound(category: DesignCategory, value: &str) -> Result<f64, FilterError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| FilterError::InvalidNumber {
            category,
            value: value.to_string(),
        })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}
