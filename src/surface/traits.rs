//! Display surface trait and message types
//!
//! Defines the abstract interface the session renders through, together with
//! the data carried across it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::session::controls::Control;

/// Platform user identifier (snowflake)
pub type UserId = u64;

/// Platform interaction identifier (snowflake)
pub type InteractionId = u64;

/// A pre-rendered embed page
///
/// Opaque to the session apart from the footer, which the timeout handler
/// annotates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Embed {
    /// Embed title
    pub title: Option<String>,
    /// Embed body text
    pub description: Option<String>,
    /// Accent color as 0xRRGGBB
    pub color: Option<u32>,
    /// Footer text
    pub footer: Option<String>,
}

impl Embed {
    /// Create an embed with only a description
    pub fn description<S: Into<String>>(text: S) -> Self {
        Self {
            description: Some(text.into()),
            ..Self::default()
        }
    }

    /// Set the footer text
    pub fn set_footer<S: Into<String>>(&mut self, text: S) {
        self.footer = Some(text.into());
    }
}

/// Who can see the rendered message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Visible to everyone in the channel
    Public,
    /// Visible only to the session owner
    Ephemeral,
}

/// Notice sent to a user rejected by the ownership gate
///
/// Either rich embed content or plain text, mirroring what the platform
/// accepts for a message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RejectionNotice {
    /// Plain text notice
    Plain(String),
    /// Rich embed notice
    Rich(Embed),
}

/// Display surface trait
///
/// Implemented over the platform client for one interaction. All operations
/// act on the single message the session owns; any client failure propagates
/// unmodified, the session never retries.
#[async_trait]
pub trait DisplaySurface: Send + Sync {
    /// Identifier of the interaction this surface is scoped to
    fn interaction_id(&self) -> InteractionId;

    /// Send the initial message with the given controls
    async fn send_page(
        &self,
        embed: &Embed,
        controls: &[Control],
        visibility: Visibility,
    ) -> Result<(), crate::Error>;

    /// Edit the already-sent message in place
    async fn edit_page(&self, embed: &Embed, controls: &[Control]) -> Result<(), crate::Error>;

    /// Delete the originally sent message
    async fn delete_page(&self) -> Result<(), crate::Error>;

    /// Acknowledge an activation without rendering
    async fn acknowledge(&self) -> Result<(), crate::Error>;

    /// Send a notice visible only to the given user
    async fn send_notice(&self, user: UserId, notice: &RejectionNotice) -> Result<(), crate::Error>;

    /// Register control ids with the host's view-recovery mechanism
    ///
    /// Called for persistent sessions so activations resume routing after a
    /// process restart.
    async fn register_persistent_view(&self, control_ids: &[String]) -> Result<(), crate::Error>;
}
