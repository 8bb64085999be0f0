//! Reservation draft for the wizard's table-selection step.
//!
//! SYSTEM CONTEXT
//! ==============
//! The step page edits date, time, and party size here; the table map writes
//! the chosen table back through its selection callback. A draft only asks
//! for availability once all three query inputs are usable.

#[cfg(test)]
#[path = "reservation_test.rs"]
mod reservation_test;

use tablemap::table::{AvailabilityQuery, TableId};

/// In-progress reservation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReservationDraft {
    /// Reservation date as entered (`YYYY-MM-DD`).
    pub date: String,
    /// Reservation time as entered (`HH:MM`).
    pub time: String,
    /// Party size; zero means not yet entered.
    pub guests: u32,
    /// Table picked on the map.
    pub table_id: Option<TableId>,
}

impl ReservationDraft {
    /// The availability query for this draft, or `None` while it is incomplete.
    #[must_use]
    pub fn availability_query(&self) -> Option<AvailabilityQuery> {
        let date = self.date.trim();
        let time = self.time.trim();
        if date.is_empty() || time.is_empty() || self.guests == 0 {
            return None;
        }
        Some(AvailabilityQuery::new(date, time, self.guests))
    }

    /// Whether the step can be submitted.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.table_id.is_some() && self.availability_query().is_some()
    }

    /// Update the party size from raw input text; unparsable input clears it.
    pub fn set_guests_input(&mut self, raw: &str) {
        self.guests = parse_guests(raw);
    }
}

/// Parse a party size, treating anything that is not a positive integer as zero.
#[must_use]
pub fn parse_guests(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}
