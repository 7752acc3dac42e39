use serde_json::Value;

use crate::utils::format_bytes;

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

pub const SAVE_BUTTON: &str = "save";
pub const COPY_BUTTON: &str = "copy";
pub const CLOSE_BUTTON: &str = "close";

// ============================================================================
// CONSOLE STATE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    /// Edited since the last check.
    Pending,
    Valid,
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub is_error: bool,
}

impl StatusLine {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

#[derive(Debug)]
pub struct ConsoleState {
    pub endpoint: String,
    pub buffer: String,
    pub validity: Validity,
    pub status: Option<StatusLine>,
    pub last_saved: Option<String>,
    pub should_quit: bool,
}

impl ConsoleState {
    pub fn new(endpoint: impl Into<String>, document: &Value) -> Self {
        let buffer = serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string());
        Self {
            endpoint: endpoint.into(),
            buffer,
            validity: Validity::Valid,
            status: None,
            last_saved: None,
            should_quit: false,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.push(c);
        self.mark_edited();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.buffer.push_str(s);
        self.mark_edited();
    }

    pub fn backspace(&mut self) {
        if self.buffer.pop().is_some() {
            self.mark_edited();
        }
    }

    // A save or copy status describes the old buffer, so it goes with the edit.
    fn mark_edited(&mut self) {
        self.validity = Validity::Pending;
        self.status = None;
    }

    /// Store the result of checking `snapshot`, unless the buffer has moved on.
    pub fn apply_validation(&mut self, snapshot: &str, validity: Validity) -> bool {
        if self.buffer != snapshot {
            return false;
        }
        self.validity = validity;
        true
    }

    pub fn size_label(&self, decimals: i32) -> String {
        #[allow(clippy::cast_precision_loss)]
        let len = self.buffer.len() as f64;
        format_bytes(len, decimals).unwrap_or_else(|_| String::from("?"))
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

pub fn validate_document(text: &str) -> Validity {
    match serde_json::from_str::<Value>(text) {
        Ok(_) => Validity::Valid,
        Err(e) => Validity::Invalid(e.to_string()),
    }
}

/// Turn an admin server reply into a status line.
///
/// The server answers `{"status": "success" | "error", "message": ...}`.
pub fn status_from_response(response: &Value) -> StatusLine {
    let message = response
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Saved")
        .to_string();

    if response.get("status").and_then(Value::as_str) == Some("error") {
        StatusLine::error(message)
    } else {
        StatusLine::info(message)
    }
}
