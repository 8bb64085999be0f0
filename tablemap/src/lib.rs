//! Interactive table map for the reservation wizard.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! table-selection step's canvas: the working set of available tables, the
//! pan/zoom camera, hit-testing pointer clicks against table shapes, and
//! drawing the floor plan. The host layer wires DOM events and the
//! availability fetch to the engine and applies the resulting
//! [`engine::Action`]s to the reservation form.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`table`] | Table model, availability wire types, and the working set |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Pointer/wheel input types and the pan gesture state |
//! | [`hit`] | Table footprints and hit-testing |
//! | [`scene`] | Pure draw list built from the engine state |
//! | [`render`] | Paints a [`scene::Scene`] to a 2D context |
//! | [`mount`] | Builds the canvas and overlays inside a container element |
//! | [`panel`] | HTML fragments for the info and availability panels |
//! | [`config`] | Tunable limits, palette, and messages |
//! | [`error`] | Load and mount error types |
//! | [`consts`] | Shared numeric constants (zoom limits, radius tiers, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod mount;
pub mod panel;
pub mod render;
pub mod scene;
pub mod table;
