//! Elasticsearch log backend.
//!
//! Buffers messages in memory and periodically bulk-writes them to an
//! Elasticsearch index over the REST API, with optional daily index
//! rotation. Authentication is not supported in this version.

mod bulk;
mod client;
mod index;

pub mod config;
pub mod connect;
pub mod logger;

pub use config::{ConnectionConfig, ElasticsearchLoggerConfig};
pub use connect::{ConnectionResolver, Discovery};
pub use logger::ElasticsearchLogger;
