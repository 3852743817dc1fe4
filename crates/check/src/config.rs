//! Typed check configuration, built from parsed arguments.
//!
//! This is the only place that knows about both [`Cli`] and the core types;
//! `querycount-core` never sees argument-parsing machinery.

use std::path::PathBuf;
use std::time::Duration;

use querycount_core::filter::FilterDocument;
use querycount_core::threshold::ThresholdConfig;
use querycount_core::types::Timestamp;
use querycount_core::window::{apply_window, build_cutoff, TimeOffset};
use querycount_db::{ConnectionConfig, Credentials, TlsConfig};

use crate::cli::Cli;
use crate::error::CheckError;

/// Everything one check run needs.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub connection: ConnectionConfig,
    pub database: String,
    pub collection: String,
    /// The caller's filter, before the time window is applied.
    pub filter: FilterDocument,
    pub date_field: String,
    pub offsets: TimeOffset,
    pub thresholds: ThresholdConfig,
    pub debug: bool,
}

impl CheckConfig {
    /// Validate and convert parsed arguments.
    ///
    /// The query is parsed first so a malformed filter is always reported
    /// as a usage error, regardless of other flags.
    pub fn from_cli(cli: Cli) -> Result<Self, CheckError> {
        let filter = FilterDocument::parse(&cli.query)?;
        let tls = tls_config(&cli)?;

        let credentials = non_empty(cli.user).map(|user| Credentials {
            user,
            password: cli.password,
        });

        Ok(Self {
            connection: ConnectionConfig {
                host: cli.host,
                port: cli.port,
                credentials,
                tls,
                timeout: Duration::from_secs(cli.timeout),
            },
            database: cli.database,
            collection: cli.collection,
            filter,
            date_field: cli.date_field,
            offsets: TimeOffset {
                minutes: cli.minutes_previous,
                hours: cli.hours_previous,
                days: cli.days_previous,
                weeks: cli.weeks_previous,
                months: cli.months_previous,
            },
            thresholds: ThresholdConfig {
                warning: cli.warn,
                critical: cli.crit,
                invert: cli.invert,
                include_results: cli.include_results,
            },
            debug: cli.debug,
        })
    }

    /// The caller's filter restricted to documents newer than `now - offsets`.
    pub fn window_filter(&self, now: Timestamp) -> FilterDocument {
        let cutoff = build_cutoff(now, &self.offsets);
        apply_window(self.filter.clone(), &self.date_field, cutoff)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_path(path: Option<&PathBuf>) -> Option<PathBuf> {
    path.cloned().filter(|p| !p.as_os_str().is_empty())
}

/// TLS flags are ignored unless `--ssl` is set.
fn tls_config(cli: &Cli) -> Result<Option<TlsConfig>, CheckError> {
    if !cli.ssl {
        return Ok(None);
    }

    let cert = non_empty_path(cli.ssl_cert.as_ref());
    let key = non_empty_path(cli.ssl_key.as_ref());

    let cert_key_file = match (cert, key) {
        (None, None) => None,
        (Some(cert), None) => Some(cert),
        (Some(cert), Some(key)) if cert == key => Some(cert),
        (Some(cert), Some(key)) => {
            return Err(CheckError::Config(format!(
                "--ssl-key ({}) must be the same file as --ssl-cert ({}); \
                 concatenate certificate and key into one PEM file",
                key.display(),
                cert.display()
            )));
        }
        (None, Some(key)) => {
            return Err(CheckError::Config(format!(
                "--ssl-key ({}) requires --ssl-cert",
                key.display()
            )));
        }
    };

    Ok(Some(TlsConfig {
        ca_file: non_empty_path(cli.ssl_ca_cert.as_ref()),
        cert_key_file,
        verify: cli.ssl_verify,
    }))
}
