//! HTML fragments for the page's "selected table" and "availability" panels.
//!
//! The engine hands these strings to the host through [`crate::engine::Action`]s;
//! the host writes them into its panels as-is, so everything interpolated
//! from server data is escaped here.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use crate::table::{Section, Table, TableId};

/// What the page needs to know about the selected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    pub table_id: TableId,
    pub table_number: String,
    pub capacity: u32,
    pub section: Section,
}

impl SelectionSummary {
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        Self {
            table_id: table.id,
            table_number: table.table_number.clone(),
            capacity: table.capacity,
            section: table.section,
        }
    }

    /// Value for the form's hidden table-id field.
    #[must_use]
    pub fn field_value(&self) -> String {
        self.table_id.to_string()
    }

    /// Info panel markup for this selection.
    #[must_use]
    pub fn info_html(&self) -> String {
        format!(
            "<div class=\"selected-table\"><strong>Table {}</strong><span>{} &middot; seats {}</span></div>",
            escape_html(&self.table_number),
            self.section.label(),
            self.capacity,
        )
    }
}

/// Availability panel markup after a non-empty result.
#[must_use]
pub fn availability_html(table_count: usize, guests: u32) -> String {
    let tables = if table_count == 1 { "table" } else { "tables" };
    let people = if guests == 1 { "guest" } else { "guests" };
    format!("<div class=\"availability availability--ok\">{table_count} {tables} available for {guests} {people}</div>")
}

/// Availability panel markup when nothing qualifies.
#[must_use]
pub fn no_tables_html(message: &str) -> String {
    format!("<div class=\"availability availability--empty\">{}</div>", escape_html(message))
}

/// Escape text for interpolation into HTML element content or attributes.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
