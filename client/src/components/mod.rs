//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `table_map` bridges the imperative `tablemap` engine into the page and
//! writes results back through `form_port`.

pub mod form_port;
pub mod table_map;
