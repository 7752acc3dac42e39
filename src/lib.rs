//! Helpers for the feed optimizer's admin console: byte and date formatting,
//! clipboard copy, trailing-edge debounce, a JSON API caller, and the page's
//! click/keyboard bindings.

pub mod api;
pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod error;
pub mod page;
pub mod ui;
pub mod utils;

pub use api::{AdminApi, ApiClient, HttpMethod};
pub use clipboard::{ClipboardBackend, ClipboardWriter, copy_to_clipboard};
pub use config::Settings;
pub use debounce::Debouncer;
pub use error::{ApiError, ClipboardError, ConfigError, UtilError};
pub use page::{ActionButton, KeyOutcome, PageBindings};
pub use utils::{format_bytes, format_bytes_default, format_date, format_date_in};
