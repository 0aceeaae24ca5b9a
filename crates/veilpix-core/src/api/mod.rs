//! Builder-style entry points for the two main operations.

pub mod conceal;
pub mod reveal;
