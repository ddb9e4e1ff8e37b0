//! Error types for plinth-core

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Site root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Template not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("Include not found: {0}")]
    IncludeNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;
