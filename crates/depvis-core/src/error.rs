use thiserror::Error;

/// Raised when an entity is constructed with structurally invalid input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{entity} field `{field}` must not be empty")]
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Invalid correlation id {0:?}: expected ASCII letters, digits or '_'")]
    InvalidCorrelationId(String),
}
