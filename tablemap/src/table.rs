//! Table model: restaurant tables, the availability wire format, and the working set.
//!
//! Tables arrive from the availability endpoint as JSON and are never mutated
//! by the map. `TableSet` is the working set the engine renders and
//! hit-tests; it is replaced wholesale on every successful query so that
//! tables from an earlier query can never linger.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::error::LoadError;

/// Unique identifier for a restaurant table.
pub type TableId = i64;

/// Which part of the restaurant a table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Dining room; drawn as a square in the left zone.
    Indoor,
    /// Terrace; drawn as a circle in the right zone.
    Outdoor,
}

impl Section {
    /// Human-readable section name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Indoor => "Indoor",
            Self::Outdoor => "Outdoor",
        }
    }
}

/// A table as returned by the availability query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Unique identifier.
    pub id: TableId,
    /// Display label, e.g. `"B3"`.
    pub table_number: String,
    /// Seating capacity.
    pub capacity: u32,
    /// Indoor or outdoor.
    pub section: Section,
    /// Availability state as reported by the server. Informational only.
    #[serde(default)]
    pub status: String,
    /// Horizontal position in layout units.
    pub coordinates_x: i32,
    /// Vertical position in layout units.
    pub coordinates_y: i32,
}

impl Table {
    /// Position in layout space.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(f64::from(self.coordinates_x), f64::from(self.coordinates_y))
    }

    /// Canvas label: `"<number> (<capacity>)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.table_number, self.capacity)
    }
}

/// Inputs of one availability query, forwarded verbatim to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    /// Calendar date, e.g. `"2024-07-01"`.
    pub date: String,
    /// Time of day, e.g. `"19:00"`.
    pub time: String,
    /// Party size.
    pub guests: u32,
}

impl AvailabilityQuery {
    #[must_use]
    pub fn new(date: impl Into<String>, time: impl Into<String>, guests: u32) -> Self {
        Self { date: date.into(), time: time.into(), guests }
    }

    /// Query-string pairs in the order the endpoint documents them.
    #[must_use]
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("date", self.date.clone()),
            ("time", self.time.clone()),
            ("guests", self.guests.to_string()),
        ]
    }
}

/// Raw body of `GET /api/tables/availability`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub success: bool,
    #[serde(default)]
    pub available_tables: Vec<Table>,
    #[serde(default)]
    pub guests: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AvailabilityResponse {
    /// Decode a response body.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Transport`] when the body is not valid JSON of the
    /// expected shape.
    pub fn from_json(body: &str) -> Result<Self, LoadError> {
        serde_json::from_str(body).map_err(|e| LoadError::Transport(format!("malformed availability body: {e}")))
    }

    /// Split a decoded body into the successful payload or an application-level failure.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Rejected`] when the server reported `success: false`.
    pub fn into_availability(self) -> Result<Availability, LoadError> {
        if !self.success {
            return Err(LoadError::Rejected { message: self.message });
        }
        Ok(Availability { tables: self.available_tables, guests: self.guests })
    }
}

/// A successful availability result.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub tables: Vec<Table>,
    /// Party size echoed by the server, if present.
    pub guests: Option<u32>,
}

/// The working set of tables, in server order.
///
/// Iteration order matters: hit-testing returns the first match.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: Vec<Table>,
}

impl TableSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Replace every table with `tables`. Nothing from the previous set survives.
    pub fn replace(&mut self, tables: Vec<Table>) {
        self.tables = tables;
    }

    /// Drop all tables.
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// Look up a table by id.
    #[must_use]
    pub fn get(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Iterate tables in server order.
    pub fn iter(&self) -> std::slice::Iter<'_, Table> {
        self.tables.iter()
    }

    /// Number of tables in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if the set holds no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<'a> IntoIterator for &'a TableSet {
    type Item = &'a Table;
    type IntoIter = std::slice::Iter<'a, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
