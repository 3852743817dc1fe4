//! One check run: configure, connect, count, evaluate.

use std::io::Write;

use querycount_core::threshold::{evaluate, Verdict};
use querycount_core::types::Timestamp;
use querycount_db::{DbError, DocumentSource};

use crate::cli::Cli;
use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::output;

/// Run a full check.
///
/// `connect` is only called once the configuration is valid, so usage
/// errors never reach the database. Matched documents (with
/// `--include-results`) are written to `out`; the status line is left to
/// the caller.
pub async fn run<S, C, W>(
    cli: Cli,
    now: Timestamp,
    connect: C,
    out: &mut W,
) -> Result<Verdict, CheckError>
where
    S: DocumentSource,
    C: FnOnce(&CheckConfig) -> Result<S, DbError>,
    W: Write,
{
    let config = CheckConfig::from_cli(cli)?;
    tracing::debug!(?config, "Arguments");

    let source = connect(&config)?;
    execute(&source, &config, now, out).await
}

/// Query `source` with the windowed filter and evaluate the count.
pub async fn execute<S, W>(
    source: &S,
    config: &CheckConfig,
    now: Timestamp,
    out: &mut W,
) -> Result<Verdict, CheckError>
where
    S: DocumentSource + ?Sized,
    W: Write,
{
    let filter = config.window_filter(now);
    tracing::debug!(query = %filter, offsets = ?config.offsets, "Query");

    let count = source.count(&filter).await?;

    if config.thresholds.include_results {
        let documents = source.fetch(&filter).await?;
        output::write_documents(out, &documents)?;
    }

    let verdict = evaluate(count, &config.thresholds);
    tracing::info!(status = %verdict.status, count, "Check evaluated");
    Ok(verdict)
}
