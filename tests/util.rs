use core::str::FromStr;
use std::time::Duration;

use der::EncodePem;
use der::asn1::{BitString, UtcTime};
use pkcs8::{EncodePrivateKey, LineEnding};
use rand_core::OsRng;
use time::OffsetDateTime;
use x509_cert::Certificate;
use x509_cert::certificate::{TbsCertificate, Version};
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};
use x509_cert::time::{Time, Validity};

use exportkit::store::{CertificateRecord, KeyMaterial};

pub fn ec_key() -> p256::SecretKey {
    p256::SecretKey::random(&mut OsRng)
}

pub fn rsa_key() -> rsa::RsaPrivateKey {
    rsa::RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA key generation")
}

pub fn pkcs8_material<K: EncodePrivateKey>(key: &K) -> KeyMaterial {
    let doc = key.to_pkcs8_der().expect("PKCS#8 encoding");
    KeyMaterial::new("PRIVATE KEY", doc.as_bytes().to_vec())
}

pub fn record(subject: &str, key: Option<KeyMaterial>) -> CertificateRecord {
    CertificateRecord {
        subject: subject.to_string(),
        issuer: "CN=ExportKit Test CA".to_string(),
        not_before: OffsetDateTime::UNIX_EPOCH,
        key,
    }
}

/// Builds a well-formed certificate PEM for store fixtures. Store parsing
/// never verifies signatures, so a placeholder signature is sufficient.
pub fn certificate_pem(subject: &str) -> String {
    let algorithm = AlgorithmIdentifierOwned {
        oid: const_oid::db::rfc5912::ECDSA_WITH_SHA_256,
        parameters: None,
    };
    let spki = SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid: const_oid::db::rfc5912::ID_EC_PUBLIC_KEY,
            parameters: None,
        },
        subject_public_key: BitString::from_bytes(&[0u8; 8]).expect("bit string"),
    };
    let validity = Validity {
        not_before: utc_time(1_700_000_000),
        not_after: utc_time(1_800_000_000),
    };
    let tbs = TbsCertificate {
        version: Version::V3,
        serial_number: SerialNumber::new(&[1]).expect("serial number"),
        signature: algorithm.clone(),
        issuer: Name::from_str("CN=ExportKit Test CA").expect("issuer name"),
        validity,
        subject: Name::from_str(subject).expect("subject name"),
        subject_public_key_info: spki,
        issuer_unique_id: None,
        subject_unique_id: None,
        extensions: None,
    };
    let cert = Certificate {
        tbs_certificate: tbs,
        signature_algorithm: algorithm,
        signature: BitString::from_bytes(&[0u8; 8]).expect("bit string"),
    };
    cert.to_pem(LineEnding::LF).expect("certificate PEM")
}

fn utc_time(unix_secs: u64) -> Time {
    Time::UtcTime(UtcTime::from_unix_duration(Duration::from_secs(unix_secs)).expect("utc time"))
}
