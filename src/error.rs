use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
/// Import error
pub enum ImportError {
    #[error("unsupported file: {0} (a .csv extension is required)")]
    UnsupportedFile(String),

    #[error("failed to read file: {0}")]
    FileRead(String),

    #[error("product store: {0}")]
    Store(String),

    #[error("product store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("view: {0}")]
    View(String),
}
