//! Paginator-Oxide: interaction-driven embed pagination for chat-platform bots
//!
//! This library attaches previous/next/dismiss controls and a page counter to a
//! fixed sequence of embed pages. A [`session::PageSession`] tracks the current
//! page, enforces an ownership gate, and handles a one-shot idle timeout; it
//! renders through a [`surface::DisplaySurface`] and receives control
//! activations through an [`event::EventRouter`].

pub mod error;
pub mod config;

pub mod event;
pub mod session;
pub mod surface;

// Re-exports
pub use error::{Error, Result};

/// Paginator-Oxide library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
