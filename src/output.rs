use std::fs;
use std::path::{Path, PathBuf};

use crate::error::KeyExportError;

/// Resolves requested file names against a default directory and writes the
/// final PEM artifact.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    default_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(default_dir: impl Into<PathBuf>) -> Self {
        Self {
            default_dir: default_dir.into(),
        }
    }

    /// Writer defaulting to the user's documents directory, falling back to
    /// the home directory and then the current directory.
    pub fn documents() -> Self {
        let dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir)
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    /// Resolves `requested` against the default directory with standard
    /// path-join semantics: an absolute `requested` overrides the default
    /// directory entirely. The destination is intentionally not jailed to the
    /// default directory.
    ///
    /// Fails with `InvalidPath` when the parent directory of the resolved
    /// path does not exist; the caller may retry with a new name.
    pub fn resolve(&self, requested: &str) -> Result<PathBuf, KeyExportError> {
        let path = self.default_dir.join(requested);
        match path.parent() {
            Some(dir) if dir.is_dir() => Ok(path),
            _ => Err(KeyExportError::InvalidPath(path.display().to_string())),
        }
    }

    /// Writes `pem` to `path`, silently overwriting any existing file.
    /// Failures carry the underlying I/O message; there is no retry.
    pub fn write(&self, path: &Path, pem: &str) -> Result<(), KeyExportError> {
        fs::write(path, pem)
            .map_err(|e| KeyExportError::Write(format!("{}: {e}", path.display())))
    }
}
