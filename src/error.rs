//! use exportkit::error::KeyExportError;

use thiserror::Error;

/// Represents errors that can occur while exporting a private key.
///
/// Recoverability is a caller concern: `InvalidPath` is the only variant the
/// interactive flow retries (by prompting for a new file name); every other
/// variant ends the current run.
#[derive(Debug, Error, Clone)]
pub enum KeyExportError {
    /// The certificate store could not be opened at the requested scope.
    #[error("Failed to open certificate store: {0}")]
    StoreAccess(String),

    /// The selected certificate has no private key associated with it.
    #[error("No private key associated with the certificate")]
    NoPrivateKey,

    /// A private key is present but is neither an EC nor an RSA key the
    /// provider is willing to export.
    #[error("No compatible private key found: the key is not an exportable EC or RSA key")]
    UnsupportedKeyType,

    /// The provider refused to serialize the key material to PKCS#8.
    #[error("Failed to export key material: {0}")]
    Export(String),

    /// The parent directory of the resolved destination does not exist.
    #[error("Destination directory does not exist: {0}")]
    InvalidPath(String),

    /// Writing the PEM artifact failed.
    #[error("Failed to write key file: {0}")]
    Write(String),
}

impl From<pkcs8::Error> for KeyExportError {
    /// Converts a `pkcs8::Error` into a `KeyExportError`.
    fn from(err: pkcs8::Error) -> Self {
        KeyExportError::Export(err.to_string())
    }
}

impl From<der::Error> for KeyExportError {
    fn from(err: der::Error) -> Self {
        KeyExportError::Export(err.to_string())
    }
}
