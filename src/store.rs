use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use der::Decode;
use time::OffsetDateTime;
use x509_cert::Certificate;

use crate::error::KeyExportError;

pub type Result<T> = std::result::Result<T, KeyExportError>;

/// Name of the personal certificate store, which holds end-entity
/// certificates and their private keys.
pub const PERSONAL_STORE: &str = "My";

/// Scope at which a certificate store is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScope {
    /// Per-user store, readable without elevation.
    CurrentUser,
    /// System-wide store, may require elevated privileges to read.
    LocalMachine,
}

impl fmt::Display for StoreScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreScope::CurrentUser => write!(f, "Current User"),
            StoreScope::LocalMachine => write!(f, "Local Machine"),
        }
    }
}

/// Private key material as held by the store provider: the PEM label it was
/// stored under plus the raw DER bytes. Opaque at this layer; the extractor
/// decides whether it is an EC or RSA key.
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    pub label: String,
    pub der: Vec<u8>,
}

impl KeyMaterial {
    pub fn new(label: impl Into<String>, der: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            der,
        }
    }
}

/// Summary of one certificate in a store, materialized for disambiguation
/// and key extraction. Records are plain data: they stay valid after the
/// store handle that produced them is released.
#[derive(Debug, Clone)]
pub struct CertificateRecord {
    /// Subject distinguished name, RFC 4514 form.
    pub subject: String,
    /// Issuer distinguished name, RFC 4514 form.
    pub issuer: String,
    /// Start of the certificate's validity period.
    pub not_before: OffsetDateTime,
    /// Associated private key material, if the store holds one.
    pub key: Option<KeyMaterial>,
}

impl CertificateRecord {
    pub fn has_private_key(&self) -> bool {
        self.key.is_some()
    }
}

/// An opened, read-only view of one certificate store.
///
/// The handle owns the materialized records; the underlying store resource is
/// released when the handle is dropped, on every exit path.
#[derive(Debug)]
pub struct StoreHandle {
    scope: StoreScope,
    name: String,
    records: Vec<CertificateRecord>,
}

impl StoreHandle {
    pub fn new(scope: StoreScope, name: impl Into<String>, records: Vec<CertificateRecord>) -> Self {
        Self {
            scope,
            name: name.into(),
            records,
        }
    }

    pub fn scope(&self) -> StoreScope {
        self.scope
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[CertificateRecord] {
        &self.records
    }

    /// Returns every certificate whose subject contains `fragment`, in store
    /// enumeration order. Matching is case-insensitive and only the subject
    /// field is searched. An empty result is not an error.
    pub fn find(&self, fragment: &str) -> Vec<&CertificateRecord> {
        let needle = fragment.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.subject.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Boundary to the host trust infrastructure: opens a named store at a scope
/// in read-only mode.
pub trait StoreProvider {
    fn open(&self, scope: StoreScope, name: &str) -> Result<StoreHandle>;
}

/// Store provider backed by directories of PEM bundle files.
///
/// A store is a directory named after the store (e.g. `My`) under a per-scope
/// root. Each bundle file (`.pem` or `.crt`) holds one `CERTIFICATE` block
/// and, when the store has the key, one private-key block (`PRIVATE KEY`,
/// `RSA PRIVATE KEY`, or `EC PRIVATE KEY`). Files are enumerated in
/// lexicographic name order, which defines store order. Files that do not
/// parse as a certificate bundle are skipped.
#[derive(Debug, Clone)]
pub struct FileStoreProvider {
    user_root: PathBuf,
    machine_root: PathBuf,
}

impl FileStoreProvider {
    pub fn new(user_root: impl Into<PathBuf>, machine_root: impl Into<PathBuf>) -> Self {
        Self {
            user_root: user_root.into(),
            machine_root: machine_root.into(),
        }
    }

    /// Provider rooted at the host's conventional store locations: the
    /// user's local data directory for `CurrentUser`, `/etc` for
    /// `LocalMachine`.
    pub fn host() -> Self {
        let user_root = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("exportkit")
            .join("stores");
        Self::new(user_root, PathBuf::from("/etc/exportkit/stores"))
    }

    fn root(&self, scope: StoreScope) -> &Path {
        match scope {
            StoreScope::CurrentUser => &self.user_root,
            StoreScope::LocalMachine => &self.machine_root,
        }
    }
}

impl StoreProvider for FileStoreProvider {
    fn open(&self, scope: StoreScope, name: &str) -> Result<StoreHandle> {
        let dir = self.root(scope).join(name);
        let entries = fs::read_dir(&dir).map_err(|e| {
            KeyExportError::StoreAccess(format!(
                "cannot read the {scope} '{name}' store at {}: {e}",
                dir.display()
            ))
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                matches!(
                    path.extension().and_then(|ext| ext.to_str()),
                    Some("pem") | Some("crt")
                )
            })
            .collect();
        paths.sort();

        let mut records = Vec::new();
        for path in &paths {
            if let Some(record) = read_bundle(path)? {
                records.push(record);
            }
        }
        Ok(StoreHandle::new(scope, name, records))
    }
}

/// Reads one bundle file into a record. Returns `Ok(None)` for files that are
/// not parseable certificate bundles; propagates I/O failures.
fn read_bundle(path: &Path) -> Result<Option<CertificateRecord>> {
    let text = fs::read_to_string(path).map_err(|e| {
        KeyExportError::StoreAccess(format!("cannot read {}: {e}", path.display()))
    })?;

    let blocks = match pem::parse_many(&text) {
        Ok(blocks) => blocks,
        Err(_) => return Ok(None),
    };

    let Some(cert_block) = blocks.iter().find(|b| b.tag() == "CERTIFICATE") else {
        return Ok(None);
    };
    let Ok(cert) = Certificate::from_der(cert_block.contents()) else {
        return Ok(None);
    };

    let key = blocks
        .iter()
        .find(|b| {
            matches!(
                b.tag(),
                "PRIVATE KEY" | "RSA PRIVATE KEY" | "EC PRIVATE KEY"
            )
        })
        .map(|b| KeyMaterial::new(b.tag(), b.contents().to_vec()));

    let not_before =
        OffsetDateTime::from(cert.tbs_certificate.validity.not_before.to_system_time());

    Ok(Some(CertificateRecord {
        subject: cert.tbs_certificate.subject.to_string(),
        issuer: cert.tbs_certificate.issuer.to_string(),
        not_before,
        key,
    }))
}
