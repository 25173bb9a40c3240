//! In-memory log backend, suitable for development and testing.

mod logger;
mod writer;

pub use logger::MemoryLogger;
pub use writer::MemoryLogWriter;
