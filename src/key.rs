use std::fmt;

use pkcs8::{DecodePrivateKey, EncodePrivateKey, SecretDocument};
use rsa::{RsaPrivateKey, pkcs1::DecodeRsaPrivateKey};

use crate::error::KeyExportError;
use crate::store::{CertificateRecord, KeyMaterial};

/// Algorithm family of an extracted private key. A certificate's key pair
/// has exactly one family; EC always wins the probing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Ec,
    Rsa,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Ec => write!(f, "ECDSA"),
            KeyAlgorithm::Rsa => write!(f, "RSA"),
        }
    }
}

/// A private key extracted from a certificate record, normalized to one of
/// the supported algorithm families.
///
/// Handles exist only transiently, between extraction and encoding; they are
/// never cached and the raw key material is never written as-is.
pub enum PrivateKeyHandle {
    Rsa(Box<RsaPrivateKey>),
    EcdsaP256(p256::SecretKey),
    EcdsaP384(p384::SecretKey),
}

impl PrivateKeyHandle {
    /// Extracts the private key associated with `record`.
    ///
    /// Fails with `NoPrivateKey` when the record carries no key material,
    /// without probing. Otherwise probes EC first, then RSA; the two are
    /// mutually exclusive in practice, but the precedence is fixed. Key
    /// material that is neither is `UnsupportedKeyType`.
    pub fn extract(record: &CertificateRecord) -> Result<Self, KeyExportError> {
        let Some(material) = record.key.as_ref() else {
            return Err(KeyExportError::NoPrivateKey);
        };
        if let Some(handle) = Self::probe_ec(material) {
            return Ok(handle);
        }
        if let Some(handle) = Self::probe_rsa(material) {
            return Ok(handle);
        }
        Err(KeyExportError::UnsupportedKeyType)
    }

    fn probe_ec(material: &KeyMaterial) -> Option<Self> {
        match material.label.as_str() {
            "PRIVATE KEY" => {
                if let Ok(key) = p256::SecretKey::from_pkcs8_der(&material.der) {
                    return Some(PrivateKeyHandle::EcdsaP256(key));
                }
                if let Ok(key) = p384::SecretKey::from_pkcs8_der(&material.der) {
                    return Some(PrivateKeyHandle::EcdsaP384(key));
                }
                None
            }
            "EC PRIVATE KEY" => {
                if let Ok(key) = p256::SecretKey::from_sec1_der(&material.der) {
                    return Some(PrivateKeyHandle::EcdsaP256(key));
                }
                if let Ok(key) = p384::SecretKey::from_sec1_der(&material.der) {
                    return Some(PrivateKeyHandle::EcdsaP384(key));
                }
                None
            }
            _ => None,
        }
    }

    fn probe_rsa(material: &KeyMaterial) -> Option<Self> {
        match material.label.as_str() {
            "PRIVATE KEY" => RsaPrivateKey::from_pkcs8_der(&material.der)
                .ok()
                .map(|key| PrivateKeyHandle::Rsa(Box::new(key))),
            "RSA PRIVATE KEY" => RsaPrivateKey::from_pkcs1_der(&material.der)
                .ok()
                .map(|key| PrivateKeyHandle::Rsa(Box::new(key))),
            _ => None,
        }
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PrivateKeyHandle::Rsa(_) => KeyAlgorithm::Rsa,
            PrivateKeyHandle::EcdsaP256(_) | PrivateKeyHandle::EcdsaP384(_) => KeyAlgorithm::Ec,
        }
    }

    /// Serializes the key to PKCS#8 DER. The document zeroizes its contents
    /// on drop.
    pub fn to_pkcs8_der(&self) -> Result<SecretDocument, KeyExportError> {
        let doc = match self {
            PrivateKeyHandle::Rsa(key) => key.to_pkcs8_der(),
            PrivateKeyHandle::EcdsaP256(key) => key.to_pkcs8_der(),
            PrivateKeyHandle::EcdsaP384(key) => key.to_pkcs8_der(),
        };
        doc.map_err(|e| KeyExportError::Export(e.to_string()))
    }
}
