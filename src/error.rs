/// Errors raised while loading an [`OtpConfig`](crate::config::OtpConfig).
///
/// The engine itself has no failure modes; disallowed input is filtered and
/// an unavailable validator counts as valid.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The content object is not valid JSON or has a mistyped property.
    #[error("invalid OTP configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// `debounceDelay` does not start with an integer (e.g. `"fast"`).
    #[error("debounce delay {raw:?} must start with a number of milliseconds, e.g. \"500ms\"")]
    InvalidDebounceDelay { raw: String },
}
