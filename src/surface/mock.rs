//! Mock display surface for testing
//!
//! Records every surface call so tests can assert on render history.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::{
    DisplaySurface, Embed, InteractionId, RejectionNotice, UserId, Visibility,
};
use crate::session::controls::Control;
use crate::Error;

/// A recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    /// Initial message send
    Send {
        embed: Embed,
        controls: Vec<Control>,
        visibility: Visibility,
    },
    /// In-place edit
    Edit {
        embed: Embed,
        controls: Vec<Control>,
    },
    /// Message deletion
    Delete,
    /// Event acknowledgement
    Acknowledge,
    /// User-only notice
    Notice {
        user: UserId,
        notice: RejectionNotice,
    },
    /// View-recovery registration
    RegisterPersistentView { control_ids: Vec<String> },
}

/// Mock display surface
#[derive(Debug, Clone)]
pub struct MockSurface {
    interaction_id: InteractionId,
    calls: Arc<RwLock<Vec<SurfaceCall>>>,
    failing: Arc<RwLock<bool>>,
}

impl MockSurface {
    /// Create a new mock surface scoped to the given interaction
    pub fn new(interaction_id: InteractionId) -> Self {
        Self {
            interaction_id,
            calls: Arc::new(RwLock::new(Vec::new())),
            failing: Arc::new(RwLock::new(false)),
        }
    }

    /// Make every subsequent call fail (for testing)
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    /// All recorded calls, in arrival order
    pub async fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.read().await.clone()
    }

    /// Number of recorded calls
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// The most recent edit, if any
    pub async fn last_edit(&self) -> Option<(Embed, Vec<Control>)> {
        self.calls
            .read()
            .await
            .iter()
            .rev()
            .find_map(|call| match call {
                SurfaceCall::Edit { embed, controls } => {
                    Some((embed.clone(), controls.clone()))
                }
                _ => None,
            })
    }

    async fn record(&self, call: SurfaceCall) -> Result<(), Error> {
        if *self.failing.read().await {
            return Err(Error::surface("mock surface failure"));
        }
        self.calls.write().await.push(call);
        Ok(())
    }
}

#[async_trait]
impl DisplaySurface for MockSurface {
    fn interaction_id(&self) -> InteractionId {
        self.interaction_id
    }

    async fn send_page(
        &self,
        embed: &Embed,
        controls: &[Control],
        visibility: Visibility,
    ) -> Result<(), Error> {
        self.record(SurfaceCall::Send {
            embed: embed.clone(),
            controls: controls.to_vec(),
            visibility,
        })
        .await
    }

    async fn edit_page(&self, embed: &Embed, controls: &[Control]) -> Result<(), Error> {
        self.record(SurfaceCall::Edit {
            embed: embed.clone(),
            controls: controls.to_vec(),
        })
        .await
    }

    async fn delete_page(&self) -> Result<(), Error> {
        self.record(SurfaceCall::Delete).await
    }

    async fn acknowledge(&self) -> Result<(), Error> {
        self.record(SurfaceCall::Acknowledge).await
    }

    async fn send_notice(&self, user: UserId, notice: &RejectionNotice) -> Result<(), Error> {
        self.record(SurfaceCall::Notice {
            user,
            notice: notice.clone(),
        })
        .await
    }

    async fn register_persistent_view(&self, control_ids: &[String]) -> Result<(), Error> {
        self.record(SurfaceCall::RegisterPersistentView {
            control_ids: control_ids.to_vec(),
        })
        .await
    }
}
