use std::collections::HashSet;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

pub type SaveAction = Box<dyn Fn() + Send + Sync>;

// ============================================================================
// ACTION BUTTONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub id: String,
    pub primary: bool,
    /// Opts a primary button out of the loading-state hook.
    pub no_loading: bool,
}

impl ActionButton {
    pub fn primary(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            primary: true,
            no_loading: false,
        }
    }

    pub fn secondary(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            primary: false,
            no_loading: false,
        }
    }

    pub fn without_loading(mut self) -> Self {
        self.no_loading = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The event was consumed; the host must not apply its default action.
    Handled,
    Ignored,
}

// ============================================================================
// PAGE BINDINGS
// ============================================================================

/// Click and keyboard bindings for one admin page.
///
/// Built once by the host with [`PageBindings::init`], which then routes its
/// click and key events through [`handle_click`](Self::handle_click) and
/// [`handle_key`](Self::handle_key).
pub struct PageBindings {
    loading_targets: HashSet<String>,
    save: Option<SaveAction>,
}

impl PageBindings {
    pub fn init(buttons: &[ActionButton], save: Option<SaveAction>) -> Self {
        let loading_targets: HashSet<String> = buttons
            .iter()
            .filter(|button| button.primary && !button.no_loading)
            .map(|button| button.id.clone())
            .collect();

        tracing::debug!(
            buttons = loading_targets.len(),
            save = save.is_some(),
            "page bindings initialised"
        );

        Self {
            loading_targets,
            save,
        }
    }

    pub fn has_loading_hook(&self, id: &str) -> bool {
        self.loading_targets.contains(id)
    }

    /// Returns whether the loading hook ran for `id`.
    pub fn handle_click(&self, id: &str) -> bool {
        if !self.has_loading_hook(id) {
            return false;
        }

        // Loading-state UI hooks in here; nothing to render yet.
        tracing::debug!(button = id, "primary action clicked");
        true
    }

    pub fn handle_key(&self, event: &KeyEvent) -> KeyOutcome {
        if !is_save_shortcut(event) {
            return KeyOutcome::Ignored;
        }

        // The host's own save behaviour is always suppressed, target or not.
        match &self.save {
            Some(save) => {
                tracing::debug!("save shortcut");
                save();
            }
            None => tracing::debug!("save shortcut with no save target"),
        }
        KeyOutcome::Handled
    }
}

impl fmt::Debug for PageBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageBindings")
            .field("loading_targets", &self.loading_targets)
            .field("save", &self.save.is_some())
            .finish()
    }
}

/// Ctrl+S or Cmd+S, on key press only.
pub fn is_save_shortcut(event: &KeyEvent) -> bool {
    event.kind == KeyEventKind::Press
        && matches!(event.code, KeyCode::Char('s' | 'S'))
        && event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META)
}
