//! Command handlers grouped by concern.

pub(crate) mod labels;
pub(crate) mod print;
