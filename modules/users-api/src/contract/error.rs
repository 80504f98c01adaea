use thiserror::Error;

/// Errors returned by the persistence port.
///
/// Callers classify by variant, never by inspecting driver message text.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required lookup or insert key was empty.
    #[error("must provide a {field}")]
    MissingField { field: &'static str },

    /// No matching non-deleted row.
    #[error("record not found")]
    NotFound,

    /// Any other persistence failure.
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl StoreError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
