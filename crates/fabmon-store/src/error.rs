/// Errors that can occur within the storage collaborators.
///
/// # Examples
///
/// ```rust
/// use fabmon_store::error::StoreError;
///
/// let err = StoreError::NotFound {
///     entity: "alert",
///     id: "42".to_string(),
/// };
/// assert!(err.to_string().contains("alert"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required record was not found.
    #[error("Store: {entity} not found (id={id})")]
    NotFound { entity: &'static str, id: String },

    /// Generic storage error for cases not covered by other variants.
    #[error("Store: {0}")]
    Other(String),
}

/// Convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
