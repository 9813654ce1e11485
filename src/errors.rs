use thiserror::Error;

/// Error type that captures tracker failures surfaced to callers.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Rejected user input when admitting a purchase into the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("purchase name must not be empty")]
    EmptyName,
    #[error("price must be a positive number, got `{0}`")]
    InvalidPrice(String),
    #[error("installments must be a positive integer, got `{0}`")]
    InvalidInstallments(String),
    #[error("a category must be selected")]
    MissingCategory,
}

/// The category registry could not be read; callers fall back to default metadata.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("category registry `{path}` unreadable: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("category registry is malformed: {0}")]
    Malformed(String),
}

/// Stored purchase data could not be decoded; callers start from an empty store.
#[derive(Debug, Error)]
pub enum PersistenceReadError {
    #[error("stored purchases unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored purchases are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("stored purchases use schema version {found}, newest supported is {supported}")]
    UnsupportedSchema { found: u8, supported: u8 },
    #[error("stored purchase `{name}` is out of bounds: {source}")]
    OutOfBounds {
        name: String,
        #[source]
        source: ValidationError,
    },
}
