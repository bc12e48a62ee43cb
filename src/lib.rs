//! # ExportKit - Certificate Store Private Key Exporter
//!
//! ExportKit locates an X.509 certificate in a host certificate store by
//! subject-name substring, extracts its private key when one is present and
//! exportable, and serializes the key to an unencrypted, PEM-wrapped PKCS#8
//! file. It is built entirely with rustcrypto libraries.
//!
//! ## Pipeline
//!
//! 1. **Store access** ([`store`]): open the personal store at a chosen scope
//!    (per-user or per-machine) in read-only mode, behind the
//!    [`store::StoreProvider`] boundary. The bundled
//!    [`store::FileStoreProvider`] reads stores as directories of PEM bundle
//!    files.
//! 2. **Subject search** ([`store::StoreHandle::find`]): case-insensitive
//!    substring match against each certificate's subject, returning matches
//!    in store enumeration order. Only the subject field is searched.
//! 3. **Key extraction** ([`key::PrivateKeyHandle::extract`]): normalizes the
//!    selected certificate's key material into one of the supported algorithm
//!    families. EC is probed before RSA, as a fixed precedence.
//! 4. **Encoding** ([`encode::encode_pkcs8_pem`]): PKCS#8 DER wrapped in PEM
//!    framing with 76-column base64 lines.
//! 5. **Placement** ([`output::OutputWriter`]): resolves the requested file
//!    name against a default directory (an absolute name overrides it) and
//!    performs a destructive overwrite once the caller has confirmed.
//!
//! ## Supported Key Types
//!
//! - **RSA** (PKCS#8 or PKCS#1 encoded)
//! - **ECDSA**: P-256 and P-384 (PKCS#8 or SEC1 encoded)
//!
//! Anything else is reported as unsupported, never fabricated. The exported
//! artifact is plaintext PKCS#8: no encryption, no passphrase.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exportkit::{
//!     encode::encode_pkcs8_pem,
//!     key::PrivateKeyHandle,
//!     output::OutputWriter,
//!     store::{FileStoreProvider, StoreProvider, StoreScope, PERSONAL_STORE},
//! };
//!
//! # fn main() -> Result<(), exportkit::error::KeyExportError> {
//! let provider = FileStoreProvider::host();
//! let store = provider.open(StoreScope::CurrentUser, PERSONAL_STORE)?;
//!
//! let matches = store.find("example.com");
//! let record = matches
//!     .first()
//!     .map(|r| (*r).clone())
//!     .expect("no certificate matched");
//!
//! let key = PrivateKeyHandle::extract(&record)?;
//! let pem = encode_pkcs8_pem(&key)?;
//!
//! let writer = OutputWriter::documents();
//! let path = writer.resolve("example-key.pem")?;
//! writer.write(&path, &pem)?;
//! println!("Private key saved to {}", path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`error::KeyExportError`]. Only
//! `InvalidPath` is meant to be retried (with a new file name); every other
//! failure ends the current run.
//!
//! ## Module Organization
//!
//! - [`store`]: store scopes, providers, handles, and subject matching
//! - [`key`]: private-key extraction and algorithm-family normalization
//! - [`encode`]: PKCS#8/PEM serialization
//! - [`output`]: destination resolution and file placement
//! - [`error`]: error types

pub mod encode;
pub mod error;
pub mod key;
pub mod output;
pub mod store;
