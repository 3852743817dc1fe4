//! `check-mongodb-query-count` -- Sensu/Nagios check for MongoDB query counts.
//!
//! Counts the documents matching a JSON filter within a trailing time
//! window and exits OK (0), WARNING (1), CRITICAL (2) or UNKNOWN (3).
//!
//! # Environment variables
//!
//! | Variable           | Flag         | Default     |
//! |--------------------|--------------|-------------|
//! | `MONGODB_HOST`     | `--host`     | `localhost` |
//! | `MONGODB_PORT`     | `--port`     | `27017`     |
//! | `MONGODB_USER`     | `--user`     | --          |
//! | `MONGODB_PASSWORD` | `--password` | --          |
//! | `RUST_LOG`         | --           | `warn`, or `debug` with `--debug` |

use std::io::Write;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use querycount_check::cli::Cli;
use querycount_check::{logging, output, runner};
use querycount_db::MongoSource;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let mut stdout = std::io::stdout().lock();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print().ok();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            e.print().ok();
            let (status, message) = output::report_usage(&e);
            output::write_status(&mut stdout, status, &message).ok();
            return ExitCode::from(status.exit_code());
        }
    };

    logging::init(cli.debug);

    let now = chrono::Utc::now();

    let result = runner::run(
        cli,
        now,
        |config| MongoSource::connect(&config.connection, &config.database, &config.collection),
        &mut stdout,
    )
    .await;

    let (status, message) = output::report(result);

    if let Err(e) = output::write_status(&mut stdout, status, &message).and_then(|_| stdout.flush())
    {
        tracing::error!(error = %e, "Failed to write status line");
    }

    ExitCode::from(status.exit_code())
}

