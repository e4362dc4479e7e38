//! # RNA Design Browser Core Library
//!
//! Evaluation of base-pair constraints on folded RNA designs, and the model behind the
//! design browser: a sortable, filterable, scrollable list of submitted solutions.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that each concern can be tested
//! on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Solution`, `DesignCategory`,
//!   `PairCountStatistics`), the minimum-pair constraint family, and the solution table I/O.
//!
//! - **[`engine`]: The Logic Core.** The stateful `SolutionListModel` with its composable
//!   sort specification, per-column filter set, scroll window and marks, plus the update
//!   queue and session liveness that serialize refreshes against user-triggered recomputes.
//!
//! - **[`workflows`]: The Public API.** End-to-end entry points that tie `engine` and `core`
//!   together, such as browsing a table of solutions or checking it against a constraint set.

pub mod core;
pub mod engine;
pub mod workflows;
