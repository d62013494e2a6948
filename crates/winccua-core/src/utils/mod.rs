//! Utility functions for text formatting.

pub mod format;

pub use format::format_table;
