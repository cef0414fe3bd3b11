//! Error types for warrant-core.
//!
//! A denied decision is never an error. The variants here cover configuration
//! problems (surfaced at startup) and voter faults that escape when
//! degrade-to-abstain is switched off.

use std::path::{Path, PathBuf};

/// Errors that can occur while configuring or running the decision engine.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Generic configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// The label hierarchy contains a cycle
    #[error("Label hierarchy cycle: {}", .labels.join(" -> "))]
    HierarchyCycle {
        /// Labels participating in the cycle, sorted
        labels: Vec<String>,
    },

    /// A hierarchy entry is not well formed
    #[error("Malformed hierarchy entry '{label}': {message}")]
    MalformedHierarchy {
        /// Label the entry is keyed on
        label: String,
        /// What is wrong with it
        message: String,
    },

    /// A voter failed while computing its vote and faults are not degraded
    #[error("Voter '{voter}' failed: {source}")]
    VoterFault {
        /// Registered name of the voter
        voter: String,
        /// Underlying voter error
        #[source]
        source: VoterError,
    },

    /// I/O error while reading configuration
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error, with the file it came from when read from disk
    #[error("Parse error{}: {source}", parse_location(.path))]
    Parse {
        /// File being parsed, if any
        path: Option<PathBuf>,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// TOML serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),
}

/// Convenience `Result` type alias for warrant-core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error stems from configuration rather than
    /// from decision-time behaviour.
    pub fn is_configuration(&self) -> bool {
        match self {
            Error::Config { .. } => true,
            Error::HierarchyCycle { .. } => true,
            Error::MalformedHierarchy { .. } => true,
            Error::Io { .. } => true,
            Error::Parse { .. } => true,
            Error::Serialization(_) => true,
            Error::VoterFault { .. } => false,
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a hierarchy cycle error; labels are sorted for stable output.
    pub fn hierarchy_cycle<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.sort();
        Error::HierarchyCycle { labels }
    }

    /// Creates a malformed hierarchy entry error.
    pub fn malformed<L, M>(label: L, message: M) -> Self
    where
        L: Into<String>,
        M: Into<String>,
    {
        Error::MalformedHierarchy {
            label: label.into(),
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that produced it.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wraps a TOML parse error, noting the file when there is one.
    pub fn parse(source: toml::de::Error, path: Option<&Path>) -> Self {
        Error::Parse {
            path: path.map(Path::to_path_buf),
            source,
        }
    }
}

fn parse_location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// Failure raised by a voter while it computes a vote.
///
/// "I don't handle this" is not a failure; voters return
/// [`Vote::Abstain`](crate::Vote::Abstain) for that.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum VoterError {
    /// The voter reported a failure
    #[error("{0}")]
    Failed(String),

    /// The voter panicked; the payload message is captured when available
    #[error("panicked: {0}")]
    Panicked(String),

    /// The voter propagated an error from a collaborator
    #[error(transparent)]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl VoterError {
    /// Creates a failure with a message.
    pub fn failed<S: Into<String>>(message: S) -> Self {
        VoterError::Failed(message.into())
    }
}
