//! Pagination session state machine
//!
//! A `PageSession` is scoped to one interaction and one owner. It renders
//! through the injected display surface and mutates state in response to
//! control activations delivered by the event router:
//!
//! ```text
//! [Constructed] --start--> [Active] --previous/next--> [Active]
//! [Active] --dismiss--> [Dismissed]   (terminal, render suppressed)
//! [Active] --timeout--> [TimedOut]    (terminal, controls disabled, final render)
//! ```
//!
//! No transition leaves a terminal state; events arriving afterwards are
//! ignored.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::PaginatorConfig;
use crate::event::ControlEvent;
use crate::session::controls::{counter_label, Control, ControlKind, ControlSet};
use crate::session::registry::SessionRegistry;
use crate::surface::{DisplaySurface, Embed, UserId, Visibility};
use crate::{Error, Result};

/// State bound at `start`
#[derive(Debug)]
struct SessionState {
    pages: Vec<Embed>,
    current_page: usize,
    owner: UserId,
    dismissed: bool,
    timed_out: bool,
    controls: ControlSet,
}

impl SessionState {
    fn refresh_counter(&mut self, separator: &str) {
        self.controls.counter.label = Some(counter_label(
            self.current_page,
            separator,
            self.pages.len(),
        ));
    }

    fn render(&self) -> (Embed, Vec<Control>) {
        (self.pages[self.current_page].clone(), self.controls.row())
    }
}

/// An interaction-scoped pagination session
pub struct PageSession {
    config: PaginatorConfig,
    surface: Arc<dyn DisplaySurface>,
    registry: SessionRegistry,
    state: RwLock<Option<SessionState>>,
}

impl PageSession {
    /// Create a session from configuration
    ///
    /// Fails with `Error::Configuration` when the configuration pairs
    /// persistence with a timeout.
    pub fn new(
        config: PaginatorConfig,
        surface: Arc<dyn DisplaySurface>,
        registry: SessionRegistry,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            surface,
            registry,
            state: RwLock::new(None),
        })
    }

    /// Bind pages and perform the initial render
    ///
    /// Registers the session in the active registry, builds the control row
    /// (defaults with derived per-session ids unless overridden), and sends
    /// `pages[initial_page]` with the configured visibility. Persistent
    /// sessions must configure all three controls with explicit custom ids
    /// and are additionally registered with the host's view-recovery
    /// mechanism.
    pub async fn start(&self, owner: UserId, pages: Vec<Embed>) -> Result<()> {
        if pages.is_empty() {
            return Err(Error::configuration("pages must not be empty"));
        }
        if self.config.initial_page >= pages.len() {
            return Err(Error::configuration(format!(
                "initial_page {} out of range for {} pages",
                self.config.initial_page,
                pages.len()
            )));
        }
        if self.config.persistent && !self.has_explicit_control_ids() {
            return Err(Error::configuration(
                "a persistent paginator requires explicit custom ids on all controls",
            ));
        }

        let interaction = self.surface.interaction_id();
        let controls = ControlSet::build(&self.config, interaction, owner, pages.len());
        let persistent_ids = controls.interactive_ids();

        self.registry.insert(interaction)?;

        let page_count = pages.len();
        let initial = self.config.initial_page;
        let embed = pages[initial].clone();
        let row = controls.row();

        *self.state.write().await = Some(SessionState {
            pages,
            current_page: initial,
            owner,
            dismissed: false,
            timed_out: false,
            controls,
        });

        if let Err(e) = self.send_initial(&embed, &row, &persistent_ids).await {
            // A failed initial render must not leave the session registered
            // as active or holding bound state.
            self.registry.remove(interaction)?;
            *self.state.write().await = None;
            return Err(e);
        }

        info!(
            interaction,
            owner,
            pages = page_count,
            initial_page = initial,
            "pagination started"
        );
        Ok(())
    }

    async fn send_initial(
        &self,
        embed: &Embed,
        row: &[Control],
        persistent_ids: &[String],
    ) -> Result<()> {
        self.surface
            .send_page(embed, row, self.visibility())
            .await?;

        if self.config.persistent {
            self.surface
                .register_persistent_view(persistent_ids)
                .await?;
        }

        Ok(())
    }

    /// Handle one control activation
    ///
    /// The ownership gate runs before any handler: with the check enabled a
    /// non-owner gets the configured rejection notice (visible only to them)
    /// and nothing else happens. With the check disabled every activation is
    /// rejected silently, the owner included; disabling the check does not
    /// mean "allow everyone".
    pub async fn handle(&self, event: &ControlEvent) -> Result<()> {
        let (owner, kind) = {
            let guard = self.state.read().await;
            let state = guard
                .as_ref()
                .ok_or_else(|| Error::not_started("activation before start"))?;
            (state.owner, state.controls.kind_of(&event.control_id))
        };

        let Some(kind) = kind else {
            return Err(Error::unknown_control(event.control_id.clone()));
        };

        if !self.config.ownership_check {
            debug!(user = event.user, "ownership check disabled, activation dropped");
            return Ok(());
        }
        if event.user != owner {
            warn!(user = event.user, owner, "activation from non-owner rejected");
            self.surface
                .send_notice(event.user, &self.config.ownership_rejection)
                .await?;
            return Ok(());
        }

        match kind {
            ControlKind::Previous => self.previous().await,
            ControlKind::Next => self.next().await,
            ControlKind::Dismiss => self.dismiss().await,
        }
    }

    async fn previous(&self) -> Result<()> {
        let render = {
            let mut guard = self.state.write().await;
            let state = guard
                .as_mut()
                .ok_or_else(|| Error::not_started("activation before start"))?;
            if state.dismissed || state.timed_out {
                return Ok(());
            }
            state.current_page = if state.current_page == 0 {
                state.pages.len() - 1
            } else {
                state.current_page - 1
            };
            state.refresh_counter(&self.config.counter_separator);
            debug!(page = state.current_page, "moved to previous page");
            state.render()
        };

        // Lock released before the edit; a rapid follow-up activation can
        // move the index while this render is still in flight.
        self.surface.edit_page(&render.0, &render.1).await
    }

    async fn next(&self) -> Result<()> {
        let render = {
            let mut guard = self.state.write().await;
            let state = guard
                .as_mut()
                .ok_or_else(|| Error::not_started("activation before start"))?;
            if state.dismissed || state.timed_out {
                return Ok(());
            }
            state.current_page = if state.current_page == state.pages.len() - 1 {
                0
            } else {
                state.current_page + 1
            };
            state.refresh_counter(&self.config.counter_separator);
            debug!(page = state.current_page, "moved to next page");
            state.render()
        };

        self.surface.edit_page(&render.0, &render.1).await
    }

    async fn dismiss(&self) -> Result<()> {
        {
            let mut guard = self.state.write().await;
            let state = guard
                .as_mut()
                .ok_or_else(|| Error::not_started("activation before start"))?;
            if state.dismissed || state.timed_out {
                return Ok(());
            }
            state.dismissed = true;
        }

        self.registry.remove(self.surface.interaction_id())?;
        info!(
            interaction = self.surface.interaction_id(),
            "pagination dismissed"
        );

        self.surface.acknowledge().await?;
        self.surface.delete_page().await
    }

    /// Handle the one-shot idle timeout
    ///
    /// No-op on a terminal session. Otherwise disables the control row,
    /// attaches the configured timeout message as the footer of the current
    /// page, edits in place, and removes the registry entry.
    pub async fn on_timeout(&self) -> Result<()> {
        let render = {
            let mut guard = self.state.write().await;
            let state = guard
                .as_mut()
                .ok_or_else(|| Error::not_started("timeout before start"))?;
            if state.dismissed || state.timed_out {
                return Ok(());
            }
            state.timed_out = true;
            state.controls.set_enabled(false);

            let mut embed = state.pages[state.current_page].clone();
            if let Some(message) = &self.config.timeout_message {
                embed.set_footer(message);
            }
            (embed, state.controls.row())
        };

        self.registry.remove(self.surface.interaction_id())?;
        info!(
            interaction = self.surface.interaction_id(),
            "pagination timed out"
        );

        self.surface.edit_page(&render.0, &render.1).await
    }

    /// Identifier of the owning interaction
    pub fn interaction_id(&self) -> u64 {
        self.surface.interaction_id()
    }

    /// Configured idle timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.config.timeout()
    }

    /// Custom ids of the interactive controls, once started
    pub async fn control_ids(&self) -> Result<Vec<String>> {
        let guard = self.state.read().await;
        let state = guard
            .as_ref()
            .ok_or_else(|| Error::not_started("control ids before start"))?;
        Ok(state.controls.interactive_ids())
    }

    /// Current page index, once started
    pub async fn current_page(&self) -> Result<usize> {
        let guard = self.state.read().await;
        let state = guard
            .as_ref()
            .ok_or_else(|| Error::not_started("page index before start"))?;
        Ok(state.current_page)
    }

    /// Current counter label, once started
    pub async fn counter_label(&self) -> Result<String> {
        let guard = self.state.read().await;
        let state = guard
            .as_ref()
            .ok_or_else(|| Error::not_started("counter label before start"))?;
        Ok(state.controls.counter.label.clone().unwrap_or_default())
    }

    /// Whether the session has been dismissed
    pub async fn is_dismissed(&self) -> bool {
        self.state
            .read()
            .await
            .as_ref()
            .map(|s| s.dismissed)
            .unwrap_or(false)
    }

    /// Whether the session has timed out
    pub async fn is_timed_out(&self) -> bool {
        self.state
            .read()
            .await
            .as_ref()
            .map(|s| s.timed_out)
            .unwrap_or(false)
    }

    /// Whether the session is started and not yet terminal
    pub async fn is_active(&self) -> bool {
        self.state
            .read()
            .await
            .as_ref()
            .map(|s| !s.dismissed && !s.timed_out)
            .unwrap_or(false)
    }

    fn visibility(&self) -> Visibility {
        if self.config.ephemeral {
            Visibility::Ephemeral
        } else {
            Visibility::Public
        }
    }

    fn has_explicit_control_ids(&self) -> bool {
        [
            &self.config.previous_button,
            &self.config.next_button,
            &self.config.dismiss_button,
        ]
        .iter()
        .all(|button| {
            button
                .as_ref()
                .map(|b| b.custom_id.is_some())
                .unwrap_or(false)
        })
    }
}
