use thiserror::Error;

use super::config::ConfigError;
use super::filter::FilterError;
use super::sort::SortError;
use crate::core::constraints::ConstraintError;
use crate::core::io::table::TableError;
use crate::core::models::ids::SolutionId;
use crate::core::models::structure::StructureError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Constraint error: {source}")]
    Constraint {
        #[from]
        source: ConstraintError,
    },

    #[error("Filter error: {source}")]
    Filter {
        #[from]
        source: FilterError,
    },

    #[error("Sort error: {source}")]
    Sort {
        #[from]
        source: SortError,
    },

    #[error("Solution table error: {source}")]
    Table {
        #[from]
        source: TableError,
    },

    #[error("Structure error for solution {solution_id}: {source}")]
    Structure {
        solution_id: SolutionId,
        #[source]
        source: StructureError,
    },

    #[error("Solution {0} is not in the current solution set")]
    SolutionNotFound(SolutionId),

    #[error("The browser session has been closed")]
    SessionClosed,
}

/// Failure reported by the upstream content service. Never fatal to the model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("a request for solution {0} is already in flight")]
    Busy(SolutionId),
}
