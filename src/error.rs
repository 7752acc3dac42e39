// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised by the formatting helpers.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UtilError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors raised by the JSON API caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("unsupported http method: {0}")]
    UnsupportedMethod(String),
    #[error("payload serialization failed: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response body is not json: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Errors raised by a clipboard backend write.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        source: std::io::Error,
    },
    #[error("{program} failed: {stderr}")]
    Command {
        program: &'static str,
        stderr: String,
    },
    #[error("failed to set text: {0}")]
    Arboard(#[from] arboard::Error),
}

/// Errors raised while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}
