//! Connection settings and their mapping onto driver options.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use mongodb::options::{ClientOptions, Credential, ServerAddress, Tls, TlsOptions};

/// Default MongoDB host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default MongoDB port.
pub const DEFAULT_PORT: u16 = 27017;

/// Default server-selection and connect timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Application name reported to the server.
const APP_NAME: &str = "check-mongodb-query-count";

/// Where and how to connect.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    /// `None` connects unauthenticated.
    pub credentials: Option<Credentials>,
    /// `None` connects in plain text.
    pub tls: Option<TlsConfig>,
    /// Upper bound for server selection and for establishing a connection.
    pub timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            credentials: None,
            tls: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Username/password pair, authenticated against the target database.
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// TLS settings. The driver wants certificate and key in one PEM file.
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    pub ca_file: Option<PathBuf>,
    pub cert_key_file: Option<PathBuf>,
    /// When `false`, invalid server certificates are accepted.
    pub verify: bool,
}

impl ConnectionConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build driver options. `auth_source` is the database credentials are
    /// checked against.
    ///
    /// Retryable reads are turned off: a check makes exactly one attempt.
    pub fn client_options(&self, auth_source: &str) -> ClientOptions {
        let mut options = ClientOptions::default();
        options.hosts = vec![ServerAddress::Tcp {
            host: self.host.clone(),
            port: Some(self.port),
        }];
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(self.timeout);
        options.connect_timeout = Some(self.timeout);
        options.retry_reads = Some(false);

        if let Some(creds) = &self.credentials {
            let mut credential = Credential::default();
            credential.username = Some(creds.user.clone());
            credential.password = creds.password.clone();
            credential.source = Some(auth_source.to_string());
            options.credential = Some(credential);
        }

        if let Some(tls) = &self.tls {
            let mut tls_options = TlsOptions::default();
            tls_options.ca_file_path = tls.ca_file.clone();
            tls_options.cert_key_file_path = tls.cert_key_file.clone();
            tls_options.allow_invalid_certificates = Some(!tls.verify);
            options.tls = Some(Tls::Enabled(tls_options));
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_point_at_local_server() {
        let config = ConnectionConfig::default();
        assert_eq!(config.address(), "localhost:27017");

        let options = config.client_options("test");
        assert_eq!(
            options.hosts,
            vec![ServerAddress::Tcp {
                host: "localhost".into(),
                port: Some(27017)
            }]
        );
        assert!(options.credential.is_none());
        assert!(options.tls.is_none());
        assert_eq!(options.retry_reads, Some(false));
        assert_eq!(options.server_selection_timeout, Some(DEFAULT_TIMEOUT));
    }

    #[test]
    fn credentials_authenticate_against_target_database() {
        let config = ConnectionConfig {
            credentials: Some(Credentials {
                user: "sensu".into(),
                password: Some("secret".into()),
            }),
            ..Default::default()
        };

        let credential = config.client_options("logs").credential.unwrap();
        assert_eq!(credential.username.as_deref(), Some("sensu"));
        assert_eq!(credential.password.as_deref(), Some("secret"));
        assert_eq!(credential.source.as_deref(), Some("logs"));
    }

    #[test]
    fn tls_without_verification_accepts_invalid_certificates() {
        let config = ConnectionConfig {
            tls: Some(TlsConfig {
                ca_file: Some("/etc/ssl/ca.pem".into()),
                cert_key_file: Some("/etc/ssl/client.pem".into()),
                verify: false,
            }),
            ..Default::default()
        };

        let options = config.client_options("test");
        assert_matches!(options.tls, Some(Tls::Enabled(ref tls)) => {
            assert_eq!(tls.allow_invalid_certificates, Some(true));
            assert_eq!(tls.ca_file_path, Some(PathBuf::from("/etc/ssl/ca.pem")));
            assert_eq!(tls.cert_key_file_path, Some(PathBuf::from("/etc/ssl/client.pem")));
        });
    }

    #[test]
    fn debug_output_redacts_password() {
        let creds = Credentials {
            user: "sensu".into(),
            password: Some("hunter2".into()),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("sensu"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }
}
