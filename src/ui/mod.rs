//! Terminal output for the `info` command

pub mod output;
pub mod table;

pub use output::{Icons, Theme, error, header, summary_row, theme};
pub use table::site_table;
