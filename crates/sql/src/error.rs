use thiserror::Error;

/// Configuration-time schema errors. None of these are retryable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown field definition: {0}")]
    UnknownFieldDefinition(String),

    #[error("array field is missing its item type")]
    MissingItems,

    #[error("struct field is missing its member fields")]
    MissingFields,
}
