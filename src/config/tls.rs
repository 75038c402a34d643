// src/config/tls.rs
// DOCUMENTATION: HTTPS certificate bootstrap
// PURPOSE: Load key.pem/cert.pem from the cert directory, or create a
// self-signed pair for localhost on first run

use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::error::ErrorStack;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::ssl::{SslAcceptor, SslAcceptorBuilder, SslMethod};
use openssl::x509::{X509NameBuilder, X509};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const KEY_FILE: &str = "key.pem";
const CERT_FILE: &str = "cert.pem";
const SELF_SIGNED_DAYS: u32 = 365;

#[derive(Error, Debug)]
pub enum TlsError {
    #[error("Certificate file error ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("OpenSSL error: {0}")]
    OpenSsl(#[from] ErrorStack),
}

/// PEM-encoded private key and certificate
#[derive(Debug, Clone)]
pub struct TlsMaterial {
    pub key_pem: Vec<u8>,
    pub cert_pem: Vec<u8>,
}

fn read(path: &Path) -> Result<Vec<u8>, TlsError> {
    fs::read(path).map_err(|source| TlsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &[u8]) -> Result<(), TlsError> {
    fs::write(path, contents).map_err(|source| TlsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Return the existing pair in `cert_dir`, or generate and persist a new one
pub fn load_or_generate(cert_dir: &Path) -> Result<TlsMaterial, TlsError> {
    let key_path = cert_dir.join(KEY_FILE);
    let cert_path = cert_dir.join(CERT_FILE);

    if key_path.exists() && cert_path.exists() {
        log::info!("Using existing certificates from {}", cert_dir.display());
        return Ok(TlsMaterial {
            key_pem: read(&key_path)?,
            cert_pem: read(&cert_path)?,
        });
    }

    log::info!("Generating self-signed certificate in {}", cert_dir.display());
    fs::create_dir_all(cert_dir).map_err(|source| TlsError::Io {
        path: cert_dir.to_path_buf(),
        source,
    })?;

    let material = generate_self_signed("localhost")?;
    write(&key_path, &material.key_pem)?;
    write(&cert_path, &material.cert_pem)?;
    log::info!("Self-signed certificate saved");

    Ok(material)
}

/// RSA-2048 key and a SHA-256 certificate whose subject and issuer are `common_name`
pub fn generate_self_signed(common_name: &str) -> Result<TlsMaterial, TlsError> {
    let key: PKey<Private> = PKey::from_rsa(Rsa::generate(2048)?)?;

    let mut name = X509NameBuilder::new()?;
    name.append_entry_by_nid(Nid::COMMONNAME, common_name)?;
    let name = name.build();

    let serial = {
        let mut bn = BigNum::new()?;
        bn.rand(128, MsbOption::MAYBE_ZERO, false)?;
        bn.to_asn1_integer()?
    };

    let mut builder = X509::builder()?;
    builder.set_version(2)?;
    builder.set_serial_number(&serial)?;
    builder.set_subject_name(&name)?;
    builder.set_issuer_name(&name)?;
    builder.set_pubkey(&key)?;
    let not_before = Asn1Time::days_from_now(0)?;
    let not_after = Asn1Time::days_from_now(SELF_SIGNED_DAYS)?;
    builder.set_not_before(&not_before)?;
    builder.set_not_after(&not_after)?;
    builder.sign(&key, MessageDigest::sha256())?;
    let cert = builder.build();

    Ok(TlsMaterial {
        key_pem: key.private_key_to_pem_pkcs8()?,
        cert_pem: cert.to_pem()?,
    })
}

/// Build the acceptor handed to `HttpServer::bind_openssl`
pub fn acceptor(material: &TlsMaterial) -> Result<SslAcceptorBuilder, TlsError> {
    let key = PKey::private_key_from_pem(&material.key_pem)?;
    let cert = X509::from_pem(&material.cert_pem)?;

    let mut builder = SslAcceptor::mozilla_intermediate(SslMethod::tls())?;
    builder.set_private_key(&key)?;
    builder.set_certificate(&cert)?;
    builder.check_private_key()?;
    Ok(builder)
}
