//! TLS configuration for the REST backend.

use std::path::PathBuf;

/// TLS settings for connections to the back-office API.
///
/// By default the client uses system root certificates and validates the
/// server certificate. Staging deployments behind a private CA can supply
/// their own root.
///
/// ## Example: Custom CA
///
/// ```rust
/// use folio::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .ca_cert_file("/etc/folio/staging-ca.crt")
///     .build();
/// assert!(config.has_custom_ca());
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// Custom CA certificate file path.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// Custom CA certificate PEM data.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Whether to skip certificate verification.
    ///
    /// **WARNING**: only for local development against self-signed servers.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Creates a TLS config that skips verification.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if a custom CA is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }

    /// Loads the custom CA as PEM bytes, if one is configured.
    ///
    /// Inline PEM wins over a file path.
    pub fn load_ca_pem(&self) -> crate::Result<Option<Vec<u8>>> {
        if let Some(pem) = &self.ca_cert_pem {
            return Ok(Some(pem.as_bytes().to_vec()));
        }
        match &self.ca_cert_file {
            Some(path) => std::fs::read(path).map(Some).map_err(|e| {
                crate::Error::configuration(format!(
                    "cannot read CA certificate {}: {}",
                    path.display(),
                    e
                ))
                .with_source(e)
            }),
            None => Ok(None),
        }
    }
}
