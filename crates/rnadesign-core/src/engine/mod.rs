//! # Engine Module
//!
//! The stateful side of the design browser.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Browser settings for one puzzle, built with a builder
//! - **Sorting** ([`sort`]) - Composable multi-key sort specification
//! - **Filtering** ([`filter`]) - Per-column display predicates
//! - **List Model** ([`model`]) - Ordered and filtered views, scroll window and marks
//! - **Update Queue** ([`queue`]) - Coalesces refreshes and recomputes at idle points
//! - **Session** ([`session`]) - Liveness guard for asynchronous completions
//! - **Votes** ([`votes`]) - Vote tallies returned by the service
//! - **Settings** ([`settings`]) - Persisted column set and marks, sanitized on load
//! - **Error Handling** ([`error`]) - Engine-wide error type
//!
//! All operations run synchronously to completion on one thread; nothing here is shared
//! across threads.

pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod queue;
pub mod session;
pub mod settings;
pub mod sort;
pub mod votes;
