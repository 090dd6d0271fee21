//! Event routing layer
//!
//! Delivers control activations from the host runtime to the owning session
//! and drives the one-shot idle timeout.

pub mod router;

pub use router::{ControlEvent, EventRouter};
