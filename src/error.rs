//! Unified error handling for slirc-cmd.
//!
//! Each concern gets its own error enum. Only [`DispatchError`] and
//! [`RegistrationError`] are fatal; [`HandlerError`] is caught at the
//! dispatch boundary and logged.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Registration Errors (entry construction)
// ============================================================================

/// Errors raised while building or registering an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A command entry was built without a handler.
    #[error("command \"{0}\" has no handler")]
    MissingHandler(String),
}

// ============================================================================
// Dispatch Errors (alias integrity)
// ============================================================================

/// Alias integrity errors, detected when an alias is exercised.
///
/// These abort the current dispatch. The registry accepts malformed
/// aliases silently until a message walks over them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("aliases can't point to nonexistent commands (cause: command \"{alias}\")")]
    AliasTargetMissing { alias: String, target: String },

    #[error("aliases can't point to aliases (cause: command \"{alias}\")")]
    AliasToAlias { alias: String, target: String },

    #[error("alias \"{alias}\" matched again while re-dispatching an alias")]
    AliasDepthExceeded { alias: String },
}

impl DispatchError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AliasTargetMissing { .. } => "alias_target_missing",
            Self::AliasToAlias { .. } => "alias_to_alias",
            Self::AliasDepthExceeded { .. } => "alias_depth_exceeded",
        }
    }
}

// ============================================================================
// Handler Errors (command bodies)
// ============================================================================

/// Errors a command handler may return.
///
/// The dispatcher logs these together with the offending invocation and
/// never propagates them.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("handler panicked: {0}")]
    Panicked(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Panicked(_) => "panicked",
            Self::Internal(_) => "internal_error",
            Self::Other(_) => "other",
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Loader Errors (command manifests)
// ============================================================================

/// Errors raised while loading a command manifest directory.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid command manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

// ============================================================================
// Parse Errors (raw IRC lines)
// ============================================================================

/// Errors raised while parsing a raw IRC line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed line at position {position}: {line:?}")]
    Malformed { line: String, position: usize },

    #[error("PRIVMSG without target or text: {0:?}")]
    MissingParams(String),
}
