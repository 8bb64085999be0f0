//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the availability query the table map renders from.

pub mod api;
