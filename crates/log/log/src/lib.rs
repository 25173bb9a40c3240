//! Core log model and buffering for the logship backends.
//!
//! This crate defines the message model ([`LogMessage`], [`ErrorDescription`]),
//! the severity scale ([`LogLevel`]), the batched persistence seam
//! ([`LogWriter`]) and the buffering base ([`CachedLogger`]) that backends
//! compose instead of inheriting.

pub mod cache;
pub mod error;
pub mod level;
pub mod logger;
pub mod message;
pub mod writer;

pub use cache::{CachedLogger, MessageCache};
pub use error::LogError;
pub use level::LogLevel;
pub use logger::Logger;
pub use message::{ErrorDescription, LogMessage};
pub use writer::LogWriter;
