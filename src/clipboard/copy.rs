use crate::clipboard::ClipboardWriter;

#[cfg(test)]
#[path = "copy_test.rs"]
mod copy_test;

/// Copy `text` to the clipboard behind `writer`.
///
/// Returns `true` once the write has landed and `false` on any failure. Failures
/// are logged, never returned.
pub async fn copy_to_clipboard<W: ClipboardWriter>(writer: &W, text: impl Into<String>) -> bool {
    let writer = writer.clone();
    let text = text.into();
    let chars = text.chars().count();

    match tokio::task::spawn_blocking(move || writer.write_text(&text)).await {
        Ok(Ok(())) => {
            tracing::debug!(chars, "copied text to clipboard");
            true
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "failed to copy to clipboard");
            false
        }
        Err(e) => {
            tracing::error!(error = %e, "clipboard worker did not complete");
            false
        }
    }
}
