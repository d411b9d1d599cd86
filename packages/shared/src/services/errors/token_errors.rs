use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    /// No signing secret is configured. Fatal misconfiguration, not a per-request fault.
    #[error("JWT signing secret is not configured")]
    MissingSecret,
    #[error("JWT encoding failed: {0}")]
    Encoding(String),
}
