//! Configuration management for Paginator-Oxide

use crate::session::controls::{Control, ControlStyle};
use crate::surface::{Embed, RejectionNotice};
use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Default rejection notice description
const DEFAULT_REJECTION_TEXT: &str =
    "You cannot control this pagination because you did not execute it.";

/// Red accent used by the default rejection notice
const REJECTION_COLOR: u32 = 0x00E7_4C3C;

/// Paginator configuration
///
/// Immutable after construction. Recognized options mirror the construction
/// interface: timeout, control overrides, counter separator and style, the
/// initial page, the timeout footer message, the ownership gate, visibility,
/// and persistence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginatorConfig {
    /// Idle timeout in seconds, `None` for no timeout
    ///
    /// Mutually exclusive with `persistent`: a persistent session must
    /// outlive process restarts and therefore carries no deadline.
    pub timeout_secs: Option<u64>,

    /// Override for the previous-page control
    pub previous_button: Option<Control>,

    /// Override for the next-page control
    pub next_button: Option<Control>,

    /// Override for the dismiss control
    pub dismiss_button: Option<Control>,

    /// Separator between the page numbers in the counter label
    pub counter_separator: String,

    /// Visual style of the counter label
    pub counter_style: ControlStyle,

    /// Page to start the pagination on
    pub initial_page: usize,

    /// Footer text attached to the last-shown page on timeout, if any
    pub timeout_message: Option<String>,

    /// Whether activations are restricted to the session owner
    pub ownership_check: bool,

    /// Notice sent to a user rejected by the ownership gate
    pub ownership_rejection: RejectionNotice,

    /// Whether the rendered message is visible only to the owner
    pub ephemeral: bool,

    /// Whether the session should survive process restarts
    pub persistent: bool,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(180),
            previous_button: None,
            next_button: None,
            dismiss_button: None,
            counter_separator: "/".to_string(),
            counter_style: ControlStyle::Secondary,
            initial_page: 0,
            timeout_message: None,
            ownership_check: true,
            ownership_rejection: RejectionNotice::Rich(Embed {
                title: None,
                description: Some(DEFAULT_REJECTION_TEXT.to_string()),
                color: Some(REJECTION_COLOR),
                footer: None,
            }),
            ephemeral: false,
            persistent: false,
        }
    }
}

impl PaginatorConfig {
    /// Validate option exclusivity
    pub fn validate(&self) -> Result<()> {
        if self.persistent && self.timeout_secs.is_some() {
            return Err(Error::configuration(
                "a persistent paginator must have no timeout",
            ));
        }
        Ok(())
    }

    /// Idle timeout as a duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = PaginatorConfig::default();

        if let Ok(timeout) = env::var("PAGINATOR_TIMEOUT_SECS") {
            if timeout.eq_ignore_ascii_case("none") {
                config.timeout_secs = None;
            } else {
                config.timeout_secs = Some(
                    timeout
                        .parse()
                        .map_err(|_| Error::configuration("Invalid PAGINATOR_TIMEOUT_SECS"))?,
                );
            }
        }

        if let Ok(separator) = env::var("PAGINATOR_SEPARATOR") {
            config.counter_separator = separator;
        }

        if let Ok(initial) = env::var("PAGINATOR_INITIAL_PAGE") {
            config.initial_page = initial
                .parse()
                .map_err(|_| Error::configuration("Invalid PAGINATOR_INITIAL_PAGE"))?;
        }

        if let Ok(message) = env::var("PAGINATOR_TIMEOUT_MESSAGE") {
            config.timeout_message = Some(message);
        }

        if let Ok(check) = env::var("PAGINATOR_OWNERSHIP_CHECK") {
            config.ownership_check = check
                .parse()
                .map_err(|_| Error::configuration("Invalid PAGINATOR_OWNERSHIP_CHECK"))?;
        }

        if let Ok(ephemeral) = env::var("PAGINATOR_EPHEMERAL") {
            config.ephemeral = ephemeral
                .parse()
                .map_err(|_| Error::configuration("Invalid PAGINATOR_EPHEMERAL"))?;
        }

        if let Ok(persistent) = env::var("PAGINATOR_PERSISTENT") {
            config.persistent = persistent
                .parse()
                .map_err(|_| Error::configuration("Invalid PAGINATOR_PERSISTENT"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let config: PaginatorConfig = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }
}
