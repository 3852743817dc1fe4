//! `querycount-db` -- MongoDB access for the query-count check.
//!
//! Everything that touches the network lives here: driver options,
//! filter conversion to BSON, and the count/find calls.

pub mod config;
pub mod error;
pub mod source;

pub use config::{ConnectionConfig, Credentials, TlsConfig};
pub use error::DbError;
pub use source::{DocumentSource, MongoSource};
