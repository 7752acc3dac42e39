use std::env;
use std::process::Command;

use arboard::Clipboard;

use crate::error::ClipboardError;

// ============================================================================
// CLIPBOARD BACKEND
// ============================================================================

/// Something that can place text on a clipboard.
///
/// Writes are blocking; [`copy_to_clipboard`](crate::clipboard::copy_to_clipboard)
/// moves them off the async executor.
pub trait ClipboardWriter: Clone + Send + 'static {
    /// # Errors
    ///
    /// Returns the backend-specific failure when the text could not be stored.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    WlClipboard,
    Arboard,
    /// Arboard, but the write blocks until another program takes the
    /// selection. X11 and Wayland drop the contents when the owner exits.
    ArboardWait,
}

impl ClipboardBackend {
    /// The variant to use from a process that exits right after copying.
    ///
    /// `wl-copy` forks its own server, so only arboard needs to wait.
    pub fn persistent(self) -> Self {
        match self {
            ClipboardBackend::Arboard => ClipboardBackend::ArboardWait,
            other => other,
        }
    }
}

pub fn detect_clipboard_backend() -> ClipboardBackend {
    if (env::var("WAYLAND_DISPLAY").is_ok()
        || env::var("XDG_SESSION_TYPE").is_ok_and(|v| v == "wayland"))
        && Command::new("wl-copy").arg("--version").output().is_ok()
    {
        ClipboardBackend::WlClipboard
    } else {
        ClipboardBackend::Arboard
    }
}

impl ClipboardWriter for ClipboardBackend {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        match self {
            ClipboardBackend::WlClipboard => {
                let output = Command::new("wl-copy")
                    .arg("--")
                    .arg(text)
                    .output()
                    .map_err(|source| ClipboardError::Spawn {
                        program: "wl-copy",
                        source,
                    })?;

                if output.status.success() {
                    Ok(())
                } else {
                    Err(ClipboardError::Command {
                        program: "wl-copy",
                        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    })
                }
            }
            ClipboardBackend::Arboard => {
                Clipboard::new().and_then(|mut cb| cb.set_text(text))?;
                Ok(())
            }
            ClipboardBackend::ArboardWait => set_text_and_wait(text),
        }
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set_text_and_wait(text: &str) -> Result<(), ClipboardError> {
    use arboard::SetExtLinux;

    let mut clipboard = Clipboard::new()?;
    clipboard.set().wait().text(text)?;
    Ok(())
}

// Other platforms keep the contents after the process exits.
#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set_text_and_wait(text: &str) -> Result<(), ClipboardError> {
    Clipboard::new().and_then(|mut cb| cb.set_text(text))?;
    Ok(())
}
