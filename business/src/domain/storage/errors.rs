#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage.invalid_path")]
    InvalidPath(String),
    #[error("storage.not_found")]
    NotFound(String),
    #[error("storage.io")]
    Io(#[from] std::io::Error),
}
