use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// All variants are caller-recoverable conditions; infrastructure failures
/// (sqlx errors) are kept separate and propagated unmodified by the layers
/// above.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("There are no fields to update")]
    NoFieldsToUpdate,
}

impl CoreError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            message: message.into(),
        }
    }
}
