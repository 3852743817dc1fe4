//! Command-line surface.
//!
//! Flag names and defaults match the Sensu `check-mongodb-query-count`
//! plugin. Connection settings can also come from `MONGODB_*` environment
//! variables (or a `.env` file).

use std::path::PathBuf;

use clap::Parser;

use querycount_core::window::DEFAULT_DATE_FIELD;
use querycount_db::config::{DEFAULT_HOST, DEFAULT_PORT};

/// Check how many documents are returned by a MongoDB query.
#[derive(Debug, Clone, Parser)]
#[command(name = "check-mongodb-query-count", version)]
pub struct Cli {
    /// MongoDB host
    #[arg(long, env = "MONGODB_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// MongoDB port
    #[arg(long, env = "MONGODB_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// MongoDB user
    #[arg(long, env = "MONGODB_USER")]
    pub user: Option<String>,

    /// MongoDB password
    #[arg(long, env = "MONGODB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Connect using TLS
    #[arg(long)]
    pub ssl: bool,

    /// Client certificate (PEM, may also contain the private key)
    #[arg(long, value_name = "SSL_CERT")]
    pub ssl_cert: Option<PathBuf>,

    /// Client private key; must be the same file as --ssl-cert
    #[arg(long, value_name = "SSL_KEY")]
    pub ssl_key: Option<PathBuf>,

    /// Concatenated CA certificates used to validate the server
    #[arg(long, value_name = "SSL_CA_CERT")]
    pub ssl_ca_cert: Option<PathBuf>,

    /// Validate the server certificate
    #[arg(long)]
    pub ssl_verify: bool,

    /// Enable debug output on stderr
    #[arg(long)]
    pub debug: bool,

    /// Database to perform query on
    #[arg(short = 'd', long)]
    pub database: String,

    /// Collection to perform query on
    #[arg(short = 'C', long)]
    pub collection: String,

    /// Query to perform, as a JSON object
    #[arg(short = 'q', long)]
    pub query: String,

    /// Result count WARNING threshold
    #[arg(
        short = 'w',
        long = "warn",
        value_name = "N",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub warn: i64,

    /// Result count CRITICAL threshold
    #[arg(
        short = 'c',
        long = "crit",
        value_name = "N",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub crit: i64,

    /// Invert thresholds (alert when the count is below them)
    #[arg(long)]
    pub invert: bool,

    /// Field to use instead of "date" for the time window
    #[arg(long, value_name = "FIELD_NAME", default_value = DEFAULT_DATE_FIELD)]
    pub date_field: String,

    /// Minutes before now to check the date field against
    #[arg(long, default_value_t = 0)]
    pub minutes_previous: u64,

    /// Hours before now to check the date field against
    #[arg(long, default_value_t = 0)]
    pub hours_previous: u64,

    /// Days before now to check the date field against
    #[arg(long, default_value_t = 0)]
    pub days_previous: u64,

    /// Weeks before now to check the date field against
    #[arg(long, default_value_t = 0)]
    pub weeks_previous: u64,

    /// Months (31 days) before now to check the date field against
    #[arg(long, default_value_t = 0)]
    pub months_previous: u64,

    /// Print every matching document
    #[arg(long)]
    pub include_results: bool,

    /// Server selection and connect timeout
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub timeout: u64,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        let mut args = vec![
            "check-mongodb-query-count",
            "-d",
            "test",
            "-C",
            "logs",
            "-q",
            r#"{"level":"CRITICAL"}"#,
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args)
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.port, 27017);
        assert_eq!(cli.warn, 0);
        assert_eq!(cli.crit, 0);
        assert!(!cli.invert);
        assert!(!cli.ssl);
        assert!(!cli.include_results);
        assert_eq!(cli.date_field, "date");
        assert_eq!(cli.minutes_previous, 0);
        assert_eq!(cli.months_previous, 0);
        assert_eq!(cli.timeout, 30);
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["-w", "10", "-c", "20"]).unwrap();
        assert_eq!(cli.database, "test");
        assert_eq!(cli.collection, "logs");
        assert_eq!(cli.warn, 10);
        assert_eq!(cli.crit, 20);
    }

    #[test]
    fn negative_thresholds_are_accepted() {
        let cli = parse(&["--warn", "-1", "--crit", "-5"]).unwrap();
        assert_eq!(cli.warn, -1);
        assert_eq!(cli.crit, -5);
    }

    #[test]
    fn time_window_flags() {
        let cli = parse(&[
            "--minutes-previous",
            "5",
            "--hours-previous",
            "1",
            "--days-previous",
            "2",
            "--weeks-previous",
            "3",
            "--months-previous",
            "4",
            "--date-field",
            "created_at",
        ])
        .unwrap();
        assert_eq!(cli.minutes_previous, 5);
        assert_eq!(cli.hours_previous, 1);
        assert_eq!(cli.days_previous, 2);
        assert_eq!(cli.weeks_previous, 3);
        assert_eq!(cli.months_previous, 4);
        assert_eq!(cli.date_field, "created_at");
    }

    #[test]
    fn missing_required_flag_is_an_error() {
        let err = Cli::try_parse_from(["check-mongodb-query-count", "-d", "test", "-C", "logs"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn negative_offsets_are_rejected() {
        assert!(parse(&["--minutes-previous", "-5"]).is_err());
    }
}
