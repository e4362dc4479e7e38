//! Data structures describing submitted designs and the columns the browser shows for them.

pub mod category;
pub mod ids;
pub mod pairs;
pub mod solution;
pub mod structure;
