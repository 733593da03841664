//! TLS configuration for the HTTP client.
//!
//! Native root certificates are loaded once per process and cached, since
//! OS certificate store lookups can be slow. CA bundles, CA directories and
//! client credentials are read from PEM files each time a client is built.

use crate::config::TlsConfig;
use crate::error::HttpError;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::CryptoProvider;
use rustls::{DigitallySignedStruct, RootCertStore, SignatureScheme};
use rustls_pki_types::pem::{self, PemObject};
use rustls_pki_types::{CertificateDer, PrivateKeyDer, ServerName, UnixTime};
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Cached native root certificates. Empty means none were found.
static NATIVE_ROOTS_CACHE: OnceLock<Vec<CertificateDer<'static>>> = OnceLock::new();

#[cfg(test)]
static LOAD_COUNT: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

fn load_native_certs_inner() -> Vec<CertificateDer<'static>> {
    #[cfg(test)]
    LOAD_COUNT.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

    let result = rustls_native_certs::load_native_certs();
    for err in &result.errors {
        tracing::warn!(error = %err, "error loading native root certificate");
    }

    if result.certs.is_empty() {
        tracing::warn!("no native root CA certificates found");
    } else {
        tracing::debug!(count = result.certs.len(), "loaded native root certificates");
    }
    result.certs
}

/// Native root certificates, loaded lazily on first call.
pub fn native_root_certs() -> &'static [CertificateDer<'static>] {
    NATIVE_ROOTS_CACHE
        .get_or_init(load_native_certs_inner)
        .as_slice()
}

/// The globally installed crypto provider, or a fresh aws-lc-rs one.
///
/// Never installs a provider globally.
pub fn get_crypto_provider() -> Arc<CryptoProvider> {
    CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}

/// Builds the rustls client configuration described by `tls`.
///
/// # Errors
/// Returns [`HttpError::Io`] if a configured file cannot be read and
/// [`HttpError::Tls`] if the material is unusable or incomplete.
pub fn client_config(tls: &TlsConfig) -> Result<rustls::ClientConfig, HttpError> {
    let provider = get_crypto_provider();
    let builder = rustls::ClientConfig::builder_with_provider(Arc::clone(&provider))
        .with_safe_default_protocol_versions()
        .map_err(|e| HttpError::Tls(Box::new(e)))?;

    let builder = if tls.validation {
        builder.with_root_certificates(root_store(tls)?)
    } else {
        tracing::warn!("server certificate validation disabled; use only against trusted test daemons");
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoServerVerification { provider }))
    };

    match (&tls.client_cert, &tls.client_key) {
        (Some(cert), Some(key)) => {
            let chain = load_certs(cert)?;
            let key = load_private_key(key)?;
            tracing::debug!(cert = %cert.display(), chain_len = chain.len(), "using client certificate");
            builder
                .with_client_auth_cert(chain, key)
                .map_err(|e| HttpError::Tls(Box::new(e)))
        }
        (None, None) => Ok(builder.with_no_client_auth()),
        _ => Err(HttpError::tls(
            "client certificate and client key must be configured together",
        )),
    }
}

/// Trust anchors: the configured CA file and directory, or the native store
/// when neither is set.
///
/// An empty native store only warns, HTTPS handshakes will then fail per
/// endpoint. Explicitly configured CA material must yield at least one root.
fn root_store(tls: &TlsConfig) -> Result<RootCertStore, HttpError> {
    let mut store = RootCertStore::empty();

    if tls.server_ca_file.is_none() && tls.server_ca_path.is_none() {
        let (added, ignored) = store.add_parsable_certificates(native_root_certs().iter().cloned());
        if ignored > 0 {
            tracing::warn!(added, ignored, "some native root certificates could not be parsed");
        }
        return Ok(store);
    }

    let mut candidates = Vec::new();
    if let Some(file) = &tls.server_ca_file {
        candidates.extend(load_certs(file)?);
    }
    if let Some(dir) = &tls.server_ca_path {
        candidates.extend(load_cert_dir(dir)?);
    }

    let (added, ignored) = store.add_parsable_certificates(candidates);
    if ignored > 0 {
        tracing::warn!(added, ignored, "some CA certificates could not be parsed");
    }
    if store.is_empty() {
        return Err(HttpError::tls(format!(
            "no usable CA certificates ({ignored} failed to parse)"
        )));
    }
    Ok(store)
}

fn pem_error(path: &Path, err: pem::Error) -> HttpError {
    match err {
        pem::Error::Io(source) => HttpError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => HttpError::tls(format!("{}: {other}", path.display())),
    }
}

/// Every certificate in a PEM file. A file without any is an error.
pub fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, HttpError> {
    let certs = CertificateDer::pem_file_iter(path)
        .map_err(|e| pem_error(path, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| pem_error(path, e))?;
    if certs.is_empty() {
        return Err(HttpError::tls(format!(
            "no PEM certificates found in {}",
            path.display()
        )));
    }
    Ok(certs)
}

/// Certificates of every readable PEM file directly inside `dir`. Files that
/// are not PEM certificates are skipped.
fn load_cert_dir(dir: &Path) -> Result<Vec<CertificateDer<'static>>, HttpError> {
    let io_err = |source| HttpError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut certs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() {
            continue;
        }
        match load_certs(&path) {
            Ok(found) => certs.extend(found),
            Err(err) => tracing::debug!(path = %path.display(), error = %err, "skipping CA directory entry"),
        }
    }
    tracing::debug!(dir = %dir.display(), count = certs.len(), "loaded CA directory");
    Ok(certs)
}

fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, HttpError> {
    PrivateKeyDer::from_pem_file(path).map_err(|e| pem_error(path, e))
}

/// Accepts any server certificate while still checking handshake signatures.
#[derive(Debug)]
struct NoServerVerification {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for NoServerVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}
