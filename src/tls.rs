//! Server-side TLS (rustls).
//!
//! The gateway presents `TLS_CERT`/`TLS_KEY`; with `TLS_CLIENT_CA` set it
//! also requires a client certificate chaining to that CA (mutual TLS).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use rustls_pki_types::pem::PemObject;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};
use thiserror::Error;

use crate::config::TlsSettings;

#[derive(Debug, Error)]
pub enum TlsError {
    #[error("cannot read PEM {path}: {source}")]
    Pem {
        path: PathBuf,
        source: rustls_pki_types::pem::Error,
    },
    #[error("no certificate found in {0}")]
    Empty(PathBuf),
    #[error("client CA: {0}")]
    ClientVerifier(#[from] rustls::server::VerifierBuilderError),
    #[error("tls: {0}")]
    Rustls(#[from] rustls::Error),
}

pub fn server_config(settings: &TlsSettings) -> Result<ServerConfig, TlsError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let certs = load_certs(&settings.cert_path)?;
    let key = PrivateKeyDer::from_pem_file(&settings.key_path).map_err(|source| TlsError::Pem {
        path: settings.key_path.clone(),
        source,
    })?;

    let builder = ServerConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()?;

    let builder = match &settings.client_ca_path {
        Some(ca_path) => {
            let mut roots = RootCertStore::empty();
            for cert in load_certs(ca_path)? {
                roots.add(cert)?;
            }
            let verifier =
                WebPkiClientVerifier::builder_with_provider(Arc::new(roots), provider).build()?;
            tracing::info!(ca = %ca_path.display(), "client certificates required");
            builder.with_client_cert_verifier(verifier)
        }
        None => builder.with_no_client_auth(),
    };

    let mut config = builder.with_single_cert(certs, key)?;
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];
    Ok(config)
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let pem_err = |source| TlsError::Pem {
        path: path.to_path_buf(),
        source,
    };

    let certs = CertificateDer::pem_file_iter(path)
        .map_err(pem_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(pem_err)?;

    if certs.is_empty() {
        return Err(TlsError::Empty(path.to_path_buf()));
    }
    Ok(certs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_certificate_file_is_an_error() {
        let settings = TlsSettings {
            cert_path: PathBuf::from("/nonexistent/cert.pem"),
            key_path: PathBuf::from("/nonexistent/key.pem"),
            client_ca_path: None,
        };

        let err = server_config(&settings).unwrap_err();
        assert!(matches!(err, TlsError::Pem { ref path, .. } if path == &settings.cert_path));
    }

    #[test]
    fn file_without_certificates_is_rejected() {
        let path = std::env::temp_dir().join(format!("a3s-gateway-empty-{}.pem", std::process::id()));
        std::fs::write(&path, "not a certificate\n").unwrap();

        let err = load_certs(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, TlsError::Empty(_)));
    }
}
