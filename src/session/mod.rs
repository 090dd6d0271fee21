//! Pagination session layer
//!
//! Owns the per-interaction state machine: the page sequence, the current
//! index, the control row, and the terminal dismiss/timeout transitions.
//!
//! ## Module structure
//! - `controls`: control row types, default glyph controls, counter label
//! - `registry`: injected registry of active session ids
//! - `paginator`: the `PageSession` state machine

pub mod controls;
pub mod paginator;
pub mod registry;


pub use controls::{Control, ControlKind, ControlSet, ControlStyle};
pub use paginator::PageSession;
pub use registry::SessionRegistry;
