//! Page modules for wizard steps.
//!
//! ARCHITECTURE
//! ============
//! Each page owns step-scoped orchestration and delegates the map itself to
//! `components`.

pub mod reservation_step;
