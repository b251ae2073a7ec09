//! Domain value objects: CheckKind, Offset.
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! They never touch the filesystem; the application layer interprets them
//! against the `Filesystem` port.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── CheckKind ────────────────────────────────────────────────────────────────

/// One of the filesystem predicates exposed by the file handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    Exists,
    IsFile,
    IsDirectory,
    IsReadable,
    IsWritable,
}

impl CheckKind {
    pub const ALL: [CheckKind; 5] = [
        Self::Exists,
        Self::IsFile,
        Self::IsDirectory,
        Self::IsReadable,
        Self::IsWritable,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::IsFile => "is-file",
            Self::IsDirectory => "is-directory",
            Self::IsReadable => "is-readable",
            Self::IsWritable => "is-writable",
        }
    }

    /// Sentence fragment describing the unmet condition, as it follows
    /// `File '<path>' ` in a precondition message.
    pub const fn unmet(&self) -> &'static str {
        match self {
            Self::Exists => "does not exist.",
            Self::IsFile => "exists but is not a regular file.",
            Self::IsDirectory => "exists but is not a directory.",
            Self::IsReadable => "is not readable.",
            Self::IsWritable => "is not writable.",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "exists" => Ok(Self::Exists),
            "is-file" | "isfile" | "file" => Ok(Self::IsFile),
            "is-directory" | "isdirectory" | "is-dir" | "dir" | "directory" => {
                Ok(Self::IsDirectory)
            }
            "is-readable" | "isreadable" | "readable" => Ok(Self::IsReadable),
            "is-writable" | "iswritable" | "writable" => Ok(Self::IsWritable),
            other => Err(DomainError::UnknownCheck(other.to_string())),
        }
    }
}

// ── Offset ───────────────────────────────────────────────────────────────────

/// Byte offset for partial reads.
///
/// Non-negative values count from the start of the file; negative values
/// count back from the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset(i64);

impl Offset {
    pub const START: Offset = Offset(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Absolute start position inside a file of `len` bytes.
    ///
    /// Returns `None` when a negative offset reaches before the first byte.
    /// A positive offset past the end resolves to `len` (an empty read).
    pub fn resolve(&self, len: u64) -> Option<u64> {
        if self.0 >= 0 {
            Some((self.0 as u64).min(len))
        } else {
            len.checked_sub(self.0.unsigned_abs())
        }
    }
}

impl From<i64> for Offset {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
