use thiserror::Error;

/// Errors raised by a document store implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Document '{collection}/{id}' not found")]
    NotFound { collection: String, id: String },

    #[error("Write to collection '{collection}' was rejected: {message}")]
    WriteRejected { collection: String, message: String },

    #[error("Document store is unavailable: {0}")]
    Unavailable(String),
}

/// Errors from positional operations on an ordered list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Errors from reading, writing or snapshotting a change-history log.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    #[error("Failed to encode history snapshot: {0}")]
    Encode(String),

    #[error("Failed to decode history snapshot: {0}")]
    Decode(String),

    #[error("History document '{0}' is malformed: {1}")]
    Malformed(String, String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No user is signed in")]
    SignedOut,
}
