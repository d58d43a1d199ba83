//! Rounded tables for display rows

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Shown instead of a table with no rows
pub const NO_ROWS: &str = "No results found.";

/// Render `rows` under centred headers, or [`NO_ROWS`] when there are none
pub fn format_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return NO_ROWS.to_string();
    }

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}
