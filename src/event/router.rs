//! Event router
//!
//! Maps control custom ids to their owning sessions and dispatches
//! activations in arrival order. The router also owns the timeout deadline:
//! `start_session` spawns a one-shot task that fires the session's timeout
//! handler and drops its routes.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::session::PageSession;
use crate::surface::{Embed, UserId};
use crate::{Error, Result};

/// A control activation delivered by the host runtime
#[derive(Debug, Clone)]
pub struct ControlEvent {
    /// Custom id of the activated control
    pub control_id: String,
    /// Identity of the acting user
    pub user: UserId,
}

impl ControlEvent {
    /// Create an activation event
    pub fn new<S: Into<String>>(control_id: S, user: UserId) -> Self {
        Self {
            control_id: control_id.into(),
            user,
        }
    }
}

/// Routes control activations to sessions
#[derive(Clone, Default)]
pub struct EventRouter {
    routes: Arc<RwLock<HashMap<String, Arc<PageSession>>>>,
}

impl EventRouter {
    /// Create an empty router
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a started session's control ids
    #[instrument(skip(self, session))]
    pub async fn bind(&self, session: Arc<PageSession>) -> Result<()> {
        let ids = session.control_ids().await?;

        let mut routes = self.routes.write().await;
        for id in ids {
            routes.insert(id, session.clone());
        }

        debug!(
            interaction = session.interaction_id(),
            "session bound to router"
        );
        Ok(())
    }

    /// Drop a session's routes
    #[instrument(skip(self, session))]
    pub async fn unbind(&self, session: &PageSession) -> Result<()> {
        let ids = session.control_ids().await?;

        let mut routes = self.routes.write().await;
        for id in &ids {
            routes.remove(id);
        }

        debug!(
            interaction = session.interaction_id(),
            "session unbound from router"
        );
        Ok(())
    }

    /// Dispatch one activation to the owning session
    #[instrument(skip(self))]
    pub async fn dispatch(&self, event: ControlEvent) -> Result<()> {
        let session = self.routes.read().await.get(&event.control_id).cloned();

        match session {
            Some(session) => session.handle(&event).await,
            None => {
                warn!(control_id = %event.control_id, "no session bound for control");
                Err(Error::unknown_control(event.control_id))
            }
        }
    }

    /// Start a session, bind it, and arm its timeout
    ///
    /// The timeout is a fixed deadline from session start; when it fires the
    /// session's timeout handler runs and the routes are dropped. Persistent
    /// sessions have no timeout and stay routable.
    pub async fn start_session(
        &self,
        session: Arc<PageSession>,
        owner: UserId,
        pages: Vec<Embed>,
    ) -> Result<()> {
        session.start(owner, pages).await?;
        self.bind(session.clone()).await?;

        if let Some(timeout) = session.timeout() {
            let router = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                if let Err(e) = session.on_timeout().await {
                    warn!(
                        interaction = session.interaction_id(),
                        "timeout handling failed: {}", e
                    );
                }
                if let Err(e) = router.unbind(&session).await {
                    warn!(
                        interaction = session.interaction_id(),
                        "unbind after timeout failed: {}", e
                    );
                }
                info!(
                    interaction = session.interaction_id(),
                    "session routes expired"
                );
            });
        }

        Ok(())
    }

    /// Number of bound control routes
    pub async fn route_count(&self) -> usize {
        self.routes.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaginatorConfig;
    use crate::session::SessionRegistry;
    use crate::surface::MockSurface;

    fn pages(count: usize) -> Vec<Embed> {
        (1..=count)
            .map(|n| Embed::description(format!("page {}", n)))
            .collect()
    }

    async fn started_session(
        interaction: u64,
        owner: UserId,
    ) -> (Arc<PageSession>, MockSurface) {
        let surface = MockSurface::new(interaction);
        let session = Arc::new(
            PageSession::new(
                PaginatorConfig::default(),
                Arc::new(surface.clone()),
                SessionRegistry::new(),
            )
            .unwrap(),
        );
        session.start(owner, pages(3)).await.unwrap();
        (session, surface)
    }

    #[tokio::test]
    async fn test_bind_and_dispatch() {
        let router = EventRouter::new();
        let (session, _surface) = started_session(42, 7).await;

        router.bind(session.clone()).await.unwrap();
        assert_eq!(router.route_count().await, 3);

        router
            .dispatch(ControlEvent::new("NEXT_BTN:42:7", 7))
            .await
            .unwrap();
        assert_eq!(session.current_page().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_control() {
        let router = EventRouter::new();
        let result = router.dispatch(ControlEvent::new("NEXT_BTN:1:1", 1)).await;
        assert!(matches!(result, Err(Error::UnknownControl(_))));
    }

    #[tokio::test]
    async fn test_bind_before_start_fails() {
        let router = EventRouter::new();
        let surface = MockSurface::new(1);
        let session = Arc::new(
            PageSession::new(
                PaginatorConfig::default(),
                Arc::new(surface),
                SessionRegistry::new(),
            )
            .unwrap(),
        );

        let result = router.bind(session).await;
        assert!(matches!(result, Err(Error::NotStarted(_))));
    }

    #[tokio::test]
    async fn test_concurrent_sessions_do_not_collide() {
        let router = EventRouter::new();
        let (first, _) = started_session(42, 7).await;
        let (second, _) = started_session(43, 8).await;

        router.bind(first.clone()).await.unwrap();
        router.bind(second.clone()).await.unwrap();
        assert_eq!(router.route_count().await, 6);

        router
            .dispatch(ControlEvent::new("NEXT_BTN:43:8", 8))
            .await
            .unwrap();

        assert_eq!(first.current_page().await.unwrap(), 0);
        assert_eq!(second.current_page().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unbind() {
        let router = EventRouter::new();
        let (session, _) = started_session(42, 7).await;

        router.bind(session.clone()).await.unwrap();
        router.unbind(&session).await.unwrap();
        assert_eq!(router.route_count().await, 0);

        let result = router.dispatch(ControlEvent::new("NEXT_BTN:42:7", 7)).await;
        assert!(matches!(result, Err(Error::UnknownControl(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_session_arms_timeout() {
        let router = EventRouter::new();
        let registry = SessionRegistry::new();
        let surface = MockSurface::new(42);
        let config = PaginatorConfig {
            timeout_secs: Some(60),
            timeout_message: Some("expired".to_string()),
            ..PaginatorConfig::default()
        };
        let session = Arc::new(
            PageSession::new(config, Arc::new(surface.clone()), registry.clone()).unwrap(),
        );

        router
            .start_session(session.clone(), 7, pages(3))
            .await
            .unwrap();
        assert_eq!(router.route_count().await, 3);
        assert!(registry.contains(42).unwrap());

        // Paused clock: sleeping past the deadline fires the timeout task.
        tokio::time::sleep(std::time::Duration::from_secs(61)).await;

        assert!(session.is_timed_out().await);
        assert!(!registry.contains(42).unwrap());
        assert_eq!(router.route_count().await, 0);

        let (embed, controls) = surface.last_edit().await.unwrap();
        assert_eq!(embed.footer.as_deref(), Some("expired"));
        assert!(controls.iter().all(|c| c.disabled));
    }

    #[tokio::test]
    async fn test_persistent_session_stays_routable() {
        let router = EventRouter::new();
        let surface = MockSurface::new(42);
        let config = PaginatorConfig {
            timeout_secs: None,
            persistent: true,
            previous_button: Some(
                crate::session::Control::emoji("<").with_custom_id("pager:prev"),
            ),
            next_button: Some(crate::session::Control::emoji(">").with_custom_id("pager:next")),
            dismiss_button: Some(
                crate::session::Control::emoji("x").with_custom_id("pager:close"),
            ),
            ..PaginatorConfig::default()
        };
        let session = Arc::new(
            PageSession::new(config, Arc::new(surface.clone()), SessionRegistry::new()).unwrap(),
        );

        router
            .start_session(session.clone(), 7, pages(2))
            .await
            .unwrap();
        assert_eq!(router.route_count().await, 3);

        router
            .dispatch(ControlEvent::new("pager:next", 7))
            .await
            .unwrap();
        assert_eq!(session.current_page().await.unwrap(), 1);
    }
}
