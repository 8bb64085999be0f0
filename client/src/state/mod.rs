//! Reactive state models shared through Leptos context.

pub mod reservation;
