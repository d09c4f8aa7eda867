//! Inline keyboard attached to a rendered screen.

use crate::domain::navigation::NavAction;

/// A single labeled button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    /// Triggers a navigation action inside the bot.
    Action {
        /// Button caption.
        label: String,
        /// Payload sent back on press.
        action: NavAction,
    },
    /// Opens an external link.
    Link {
        /// Button caption.
        label: String,
        /// Target address.
        url: String,
    },
}

impl Button {
    /// Button that sends `action` back to the bot.
    #[must_use]
    pub fn action(label: impl Into<String>, action: NavAction) -> Self {
        Self::Action {
            label: label.into(),
            action,
        }
    }

    /// Button that opens `url`.
    #[must_use]
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Button caption.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Action { label, .. } | Self::Link { label, .. } => label,
        }
    }

    /// Navigation action behind the button, if it is not a link.
    #[cfg(test)]
    #[must_use]
    pub const fn nav_action(&self) -> Option<&NavAction> {
        match self {
            Self::Action { action, .. } => Some(action),
            Self::Link { .. } => None,
        }
    }
}

/// Rows of buttons, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Keyboard with no rows.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Appends a row with a single button.
    #[must_use]
    pub fn button(self, button: Button) -> Self {
        self.row(vec![button])
    }

    /// Appends a row; empty rows are skipped.
    #[must_use]
    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        if !buttons.is_empty() {
            self.rows.push(buttons);
        }
        self
    }

    /// Rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    /// Returns whether there are no buttons at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every button, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// Total number of buttons.
    #[cfg(test)]
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons().count()
    }
}
