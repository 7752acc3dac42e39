// ============================================================================
// CONSTANTS
// ============================================================================

pub const BYTE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
pub const BYTE_BASE: f64 = 1024.0;
pub const DEFAULT_BYTE_DECIMALS: i32 = 2;
/// Past this many places `f64` has no digits left to round.
pub const MAX_ROUNDED_DECIMALS: i32 = 15;

/// en-US `{month: short, day: numeric, year: numeric, hour: 2-digit, minute: 2-digit}`
pub const DATE_DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";
pub const OFFSET_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];
pub const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
pub const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const CONFIG_DIR_NAME: &str = "admin-ui-utils";
pub const CONFIG_FILE: &str = "config.json";
