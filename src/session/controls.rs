//! Pagination controls
//!
//! The control row holds three interactive controls (previous, next, dismiss)
//! and a non-interactive page counter label. Interactive controls enable and
//! disable together; the counter is always disabled.

use serde::{Deserialize, Serialize};

use crate::config::PaginatorConfig;
use crate::surface::{InteractionId, UserId};

/// Custom-id prefix of the previous-page control
pub const PREVIOUS_CONTROL: &str = "PREV_BTN";

/// Custom-id prefix of the next-page control
pub const NEXT_CONTROL: &str = "NEXT_BTN";

/// Custom-id prefix of the dismiss control
pub const DISMISS_CONTROL: &str = "TRASH_BTN";

/// Visual style of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlStyle {
    /// Accent-colored
    Primary,
    /// Neutral grey
    #[default]
    Secondary,
    /// Green
    Success,
    /// Red
    Danger,
}

/// A single control in the row
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Control {
    /// Stable identifier activations are tagged with
    pub custom_id: Option<String>,
    /// Text label
    pub label: Option<String>,
    /// Emoji glyph
    pub emoji: Option<String>,
    /// Visual style
    pub style: ControlStyle,
    /// Whether the control is inert
    pub disabled: bool,
}

impl Control {
    /// Create a control showing only an emoji glyph
    pub fn emoji<S: Into<String>>(glyph: S) -> Self {
        Self {
            emoji: Some(glyph.into()),
            ..Self::default()
        }
    }

    /// Set the visual style
    pub fn with_style(mut self, style: ControlStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the custom id
    pub fn with_custom_id<S: Into<String>>(mut self, id: S) -> Self {
        self.custom_id = Some(id.into());
        self
    }
}

/// Which interactive control an activation hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Previous-page control
    Previous,
    /// Next-page control
    Next,
    /// Dismiss control
    Dismiss,
}

/// Derive a per-session control id from the originating interaction and owner
///
/// Ties the id to one invocation so concurrent sessions never collide.
fn derive_id(prefix: &str, interaction: InteractionId, owner: UserId) -> String {
    format!("{}:{}:{}", prefix, interaction, owner)
}

/// Counter label text: `"{index+1} {separator} {count}"`
pub fn counter_label(index: usize, separator: &str, page_count: usize) -> String {
    format!("{} {} {}", index + 1, separator, page_count)
}

/// The full control row of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSet {
    /// Previous-page control
    pub previous: Control,
    /// Disabled page counter label
    pub counter: Control,
    /// Next-page control
    pub next: Control,
    /// Dismiss control
    pub dismiss: Control,
}

impl ControlSet {
    /// Build the control row for a session
    ///
    /// Configured overrides are taken as-is apart from missing custom ids,
    /// which are derived from the interaction and owner; default controls use
    /// directional glyphs and a red wastebasket.
    pub fn build(
        config: &PaginatorConfig,
        interaction: InteractionId,
        owner: UserId,
        page_count: usize,
    ) -> Self {
        let previous = config
            .previous_button
            .clone()
            .unwrap_or_else(|| Control::emoji("\u{25c0}"));
        let next = config
            .next_button
            .clone()
            .unwrap_or_else(|| Control::emoji("\u{25b6}"));
        let dismiss = config
            .dismiss_button
            .clone()
            .unwrap_or_else(|| Control::emoji("\u{1f5d1}").with_style(ControlStyle::Danger));

        let mut set = Self {
            previous: with_derived_id(previous, PREVIOUS_CONTROL, interaction, owner),
            counter: Control {
                label: Some(counter_label(
                    config.initial_page,
                    &config.counter_separator,
                    page_count,
                )),
                style: config.counter_style,
                disabled: true,
                ..Control::default()
            },
            next: with_derived_id(next, NEXT_CONTROL, interaction, owner),
            dismiss: with_derived_id(dismiss, DISMISS_CONTROL, interaction, owner),
        };
        set.set_enabled(true);
        set
    }

    /// Enable or disable the three interactive controls together
    pub fn set_enabled(&mut self, enabled: bool) {
        self.previous.disabled = !enabled;
        self.next.disabled = !enabled;
        self.dismiss.disabled = !enabled;
        // Counter stays inert
        self.counter.disabled = true;
    }

    /// The row in display order
    pub fn row(&self) -> Vec<Control> {
        vec![
            self.previous.clone(),
            self.counter.clone(),
            self.next.clone(),
            self.dismiss.clone(),
        ]
    }

    /// Custom ids of the interactive controls
    pub fn interactive_ids(&self) -> Vec<String> {
        [&self.previous, &self.next, &self.dismiss]
            .iter()
            .filter_map(|control| control.custom_id.clone())
            .collect()
    }

    /// Classify an activation by its control id
    pub fn kind_of(&self, custom_id: &str) -> Option<ControlKind> {
        if self.previous.custom_id.as_deref() == Some(custom_id) {
            Some(ControlKind::Previous)
        } else if self.next.custom_id.as_deref() == Some(custom_id) {
            Some(ControlKind::Next)
        } else if self.dismiss.custom_id.as_deref() == Some(custom_id) {
            Some(ControlKind::Dismiss)
        } else {
            None
        }
    }
}

fn with_derived_id(
    control: Control,
    prefix: &str,
    interaction: InteractionId,
    owner: UserId,
) -> Control {
    if control.custom_id.is_some() {
        control
    } else {
        control.with_custom_id(derive_id(prefix, interaction, owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_label() {
        assert_eq!(counter_label(0, "/", 3), "1 / 3");
        assert_eq!(counter_label(2, "/", 3), "3 / 3");
        assert_eq!(counter_label(4, "of", 10), "5 of 10");
    }

    #[test]
    fn test_default_controls() {
        let config = PaginatorConfig::default();
        let set = ControlSet::build(&config, 42, 7, 3);

        assert_eq!(set.previous.emoji.as_deref(), Some("\u{25c0}"));
        assert_eq!(set.next.emoji.as_deref(), Some("\u{25b6}"));
        assert_eq!(set.dismiss.emoji.as_deref(), Some("\u{1f5d1}"));
        assert_eq!(set.dismiss.style, ControlStyle::Danger);

        assert_eq!(set.previous.custom_id.as_deref(), Some("PREV_BTN:42:7"));
        assert_eq!(set.next.custom_id.as_deref(), Some("NEXT_BTN:42:7"));
        assert_eq!(set.dismiss.custom_id.as_deref(), Some("TRASH_BTN:42:7"));

        assert_eq!(set.counter.label.as_deref(), Some("1 / 3"));
        assert!(set.counter.disabled);
        assert!(!set.previous.disabled);
    }

    #[test]
    fn test_override_keeps_explicit_id() {
        let config = PaginatorConfig {
            next_button: Some(Control::emoji(">").with_custom_id("my-next")),
            ..PaginatorConfig::default()
        };
        let set = ControlSet::build(&config, 42, 7, 3);

        assert_eq!(set.next.custom_id.as_deref(), Some("my-next"));
        assert_eq!(set.kind_of("my-next"), Some(ControlKind::Next));
    }

    #[test]
    fn test_set_enabled_toggles_together() {
        let config = PaginatorConfig::default();
        let mut set = ControlSet::build(&config, 1, 1, 2);

        set.set_enabled(false);
        assert!(set.previous.disabled);
        assert!(set.next.disabled);
        assert!(set.dismiss.disabled);
        assert!(set.counter.disabled);

        set.set_enabled(true);
        assert!(!set.previous.disabled);
        assert!(set.counter.disabled);
    }

    #[test]
    fn test_kind_of() {
        let config = PaginatorConfig::default();
        let set = ControlSet::build(&config, 42, 7, 3);

        assert_eq!(set.kind_of("PREV_BTN:42:7"), Some(ControlKind::Previous));
        assert_eq!(set.kind_of("TRASH_BTN:42:7"), Some(ControlKind::Dismiss));
        assert_eq!(set.kind_of("PREV_BTN:1:1"), None);
        assert_eq!(set.kind_of(""), None);
    }

    #[test]
    fn test_row_order() {
        let config = PaginatorConfig::default();
        let set = ControlSet::build(&config, 1, 1, 2);
        let row = set.row();

        assert_eq!(row.len(), 4);
        assert_eq!(row[0], set.previous);
        assert_eq!(row[1], set.counter);
        assert_eq!(row[2], set.next);
        assert_eq!(row[3], set.dismiss);
    }
}
