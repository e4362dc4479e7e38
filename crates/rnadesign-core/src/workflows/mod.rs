//! # Workflows Module
//!
//! High-level entry points that drive the engine end to end over one solution set.
//!
//! ## Architecture
//!
//! - **Browse Workflow** ([`browse`]) - Builds a list model from a configuration, applies a
//!   query (sort criteria, filters, scroll position, marks) and reports the visible page.
//! - **Check Workflow** ([`check`]) - Evaluates a constraint set against every solution,
//!   either from the recorded pair columns or by counting pairs in a target structure.

pub mod browse;
pub mod check;
