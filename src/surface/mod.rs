//! Display surface abstraction
//!
//! The surface is the external collaborator that owns the rendered message:
//! it sends the initial render, edits it in place, deletes it, and delivers
//! user-only notices. One surface instance is scoped to one interaction.

pub mod mock;
pub mod traits;

pub use mock::{MockSurface, SurfaceCall};
pub use traits::{
    DisplaySurface, Embed, InteractionId, RejectionNotice, UserId, Visibility,
};
