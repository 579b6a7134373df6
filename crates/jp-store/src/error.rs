use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    Config(String),
    InvalidData(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Sqlite(e) => write!(f, "SQLite error: {e}"),
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Config(msg) => write!(f, "config error: {msg}"),
            StoreError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Sqlite(e)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(e: toml::de::Error) -> Self {
        StoreError::Config(e.to_string())
    }
}

impl From<jp_core::SnapshotError> for StoreError {
    fn from(e: jp_core::SnapshotError) -> Self {
        StoreError::InvalidData(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
