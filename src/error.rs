//! Paramforge error types

/// Paramforge error types
///
/// Most recoverable conditions never surface here. Malformed schemas and
/// questionable config entries degrade locally and are reported as
/// [`ResolveWarning`](crate::types::ResolveWarning) entries on the resolved
/// parameter. Only conditions the caller must act on become errors.
#[derive(Debug, thiserror::Error)]
pub enum ParamforgeError {
    /// A parameter marked `required` has neither a user-supplied value nor a
    /// resolved default at payload build time. Sending an incomplete payload
    /// to a provider is worse than refusing to build one.
    #[error("missing required value for parameter '{param}'")]
    MissingRequiredValue { param: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration document: {0}")]
    InvalidDocument(String),
}

/// Result type alias for paramforge operations
pub type Result<T> = std::result::Result<T, ParamforgeError>;
