//! Pass/fail rules over the base-pair statistics of a folded design.
//!
//! The minimum-pair family shares one evaluation contract and differs only in which count it
//! reads: a single [`PairKind`] or the sum over all of them. Per-variant display metadata and
//! serialization tags live in a static table in [`variants`].
//!
//! [`PairKind`]: crate::core::models::pairs::PairKind

pub mod pair;
pub mod set;
pub mod variants;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConstraintError {
    #[error("Unknown constraint tag: '{0}'")]
    UnknownTag(String),

    #[error("Invalid minimum count '{value}' for constraint '{tag}'")]
    InvalidCount { tag: String, value: String },

    #[error("Constraint tag '{0}' has no value")]
    MissingValue(String),
}
