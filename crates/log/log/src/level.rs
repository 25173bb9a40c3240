use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log severity levels, from most to least severe.
///
/// A logger configured at some level captures every message at that level or
/// a more severe one: `Info` captures `Fatal`..=`Info` and drops
/// `Debug`/`Trace`. `None` captures nothing.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Capture nothing.
    None = 0,
    /// Unrecoverable failures.
    Fatal = 1,
    /// Recoverable failures.
    Error = 2,
    /// Suspicious but non-fatal conditions.
    Warn = 3,
    /// Normal operational messages.
    #[default]
    Info = 4,
    /// Diagnostic detail.
    Debug = 5,
    /// Very fine-grained tracing.
    Trace = 6,
}

impl LogLevel {
    /// Whether a message at `level` passes a threshold of `self`.
    pub fn captures(self, level: LogLevel) -> bool {
        level != LogLevel::None && level <= self
    }

    /// Numeric code used by the original wire protocol (0 = none .. 6 = trace).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Level for a numeric wire code, rejecting codes outside `0..=6`.
    pub fn from_code(code: u8) -> Result<Self, crate::LogError> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Fatal),
            2 => Ok(Self::Error),
            3 => Ok(Self::Warn),
            4 => Ok(Self::Info),
            5 => Ok(Self::Debug),
            6 => Ok(Self::Trace),
            other => Err(crate::LogError::Config(format!(
                "unknown log level code: {other}"
            ))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        };
        f.write_str(name)
    }
}

impl FromStr for LogLevel {
    type Err = crate::LogError;

    /// Parse a level name or numeric code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "nothing" | "0" => Ok(Self::None),
            "fatal" | "1" => Ok(Self::Fatal),
            "error" | "err" | "2" => Ok(Self::Error),
            "warn" | "warning" | "3" => Ok(Self::Warn),
            "info" | "4" => Ok(Self::Info),
            "debug" | "5" => Ok(Self::Debug),
            "trace" | "6" => Ok(Self::Trace),
            other => Err(crate::LogError::Config(format!(
                "unknown log level: {other}"
            ))),
        }
    }
}
