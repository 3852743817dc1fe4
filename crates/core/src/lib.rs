//! `querycount-core` -- pure check logic, no database access.
//!
//! Builds the trailing time window for a query filter and turns a document
//! count into a plugin verdict. The caller owns the clock and the database.

pub mod error;
pub mod filter;
pub mod status;
pub mod threshold;
pub mod types;
pub mod window;
