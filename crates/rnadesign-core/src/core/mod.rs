//! # Core Module
//!
//! Stateless building blocks of the design browser.
//!
//! - **Solution Representation** ([`models`]) - Solutions, browser columns, pair statistics
//!   and dot-bracket pair counting
//! - **Constraint Evaluation** ([`constraints`]) - Minimum base-pair requirements, their
//!   display text and their `(tag, value)` wire form
//! - **Table I/O** ([`io`]) - Reading and writing solution tables

pub mod constraints;
pub mod io;
pub mod models;
