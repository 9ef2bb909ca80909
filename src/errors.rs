use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can go wrong while converting a tree.
///
/// An unconfigured extension is not in here: those files are skipped on purpose.
#[derive(Error, Debug)]
pub enum Lit2mdError {
    #[error("path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Lit2mdError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Lit2mdError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Lit2mdError::ReadFailure {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub fn from_write(path: &Path, source: io::Error) -> Self {
        Lit2mdError::WriteFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The file or directory the error is attributed to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Lit2mdError::NotFound { path }
            | Lit2mdError::ReadFailure { path, .. }
            | Lit2mdError::WriteFailure { path, .. }
            | Lit2mdError::ConfigParse { path, .. } => Some(path),
            Lit2mdError::Config(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Lit2mdError>;
