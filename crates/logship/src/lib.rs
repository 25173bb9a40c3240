//! Configuration loading and the backend factory.
//!
//! Hosting applications describe the logger in TOML, pick a backend by
//! name, and get an unopened [`Logger`](logship_log::Logger) back:
//!
//! ```
//! # fn main() -> Result<(), logship_log::LogError> {
//! let config = logship::LoggingConfig::from_toml_str(
//!     r#"
//!     backend = "elasticsearch"
//!
//!     [elasticsearch]
//!     index = "log"
//!     daily = true
//!
//!     [elasticsearch.connection]
//!     protocol = "http"
//!     host = "localhost"
//!     port = 9200
//!     "#,
//! )?;
//! let logger = logship::create_logger(&config)?;
//! # let _ = logger;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod factory;

pub use config::LoggingConfig;
pub use factory::create_logger;
