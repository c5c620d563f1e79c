//! Platform glue and small helpers shared by the analyzer views.

pub mod file_hints;
pub mod format;
pub mod platform;
pub mod timing;
