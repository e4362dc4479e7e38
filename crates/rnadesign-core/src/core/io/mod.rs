//! Reading and writing tables of submitted solutions.
//!
//! The upstream content service is out of scope; a solution table on disk stands in for the
//! full solution set of one puzzle.

pub mod table;
pub mod traits;
