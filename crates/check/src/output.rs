//! Plugin output on stdout.

use std::io::{self, Write};

use querycount_core::status::CheckStatus;
use querycount_core::threshold::Verdict;
use serde_json::Value;

use crate::error::CheckError;

/// Name printed at the start of the status line.
pub const CHECK_NAME: &str = "MongoDBQueryCount";

/// `"MongoDBQueryCount WARNING: Query count (15) was above warning threshold."`
pub fn status_line(status: CheckStatus, message: &str) -> String {
    format!("{CHECK_NAME} {status}: {message}")
}

pub fn write_status<W: Write>(out: &mut W, status: CheckStatus, message: &str) -> io::Result<()> {
    writeln!(out, "{}", status_line(status, message))
}

/// Status and message for the status line of a finished run.
///
/// Any error becomes UNKNOWN; it is never folded into OK, WARNING or
/// CRITICAL.
pub fn report(result: Result<Verdict, CheckError>) -> (CheckStatus, String) {
    match result {
        Ok(verdict) => (verdict.status, verdict.message),
        Err(e) => {
            tracing::error!(error = %e, "Check failed");
            (CheckStatus::Unknown, e.to_string())
        }
    }
}

/// Status and message for arguments clap rejected.
pub fn report_usage(error: &clap::Error) -> (CheckStatus, String) {
    (CheckStatus::Unknown, format!("Invalid arguments: {}", error.kind()))
}

/// One document per line, as compact JSON.
pub fn write_documents<W: Write>(out: &mut W, documents: &[Value]) -> io::Result<()> {
    for document in documents {
        writeln!(out, "{document}")?;
    }
    Ok(())
}
