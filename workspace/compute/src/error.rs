use thiserror::Error;

/// Error types for the compute pipeline
#[derive(Error, Debug)]
pub enum EngineError {
    /// A bare number met a currency map in one accumulation; coercing to a
    /// default currency would silently conflate currencies, so this is a
    /// programmer error at the call site.
    #[error("Invalid operand kind: {0}")]
    InvalidOperandKind(String),

    /// Error from view-window construction
    #[error("Window error: {0}")]
    Window(String),

    /// Error from date operations
    #[error("Date error: {0}")]
    Date(String),

    /// Error from pivot aggregation
    #[error("Aggregation error: {0}")]
    Aggregation(String),
}

/// Type alias for Result with EngineError
pub type Result<T> = std::result::Result<T, EngineError>;
