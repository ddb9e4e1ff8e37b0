//! Error types for plinth-serve

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Build error: {0}")]
    Build(#[from] plinth_core::BuildError),

    #[error("Watch error: {0}")]
    Watch(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
