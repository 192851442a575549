use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by repository operations.
///
/// Engine failures are carried unmodified in [`Error::Git`]; every other
/// variant is produced by this crate before or instead of an engine call.
#[derive(Debug, Error)]
pub enum Error {
    /// The string is not a canonical object id.
    #[error("invalid object id: \"{oid}\"")]
    InvalidOid { oid: String },

    /// A commit was requested without a tree.
    #[error("cannot create a commit: tree is missing")]
    MissingTree,

    /// No identity is configured for default signatures.
    #[error("could not find a configuration value for \"{key}\"")]
    MissingIdentity { key: String },

    #[error("branch not found: {name}")]
    BranchNotFound { name: String },

    #[error("branch already exists: {name}")]
    BranchExists { name: String },

    #[error("remote not found: {name}")]
    RemoteNotFound { name: String },

    #[error("ref not found: {name}")]
    RefNotFound { name: String },

    /// Checkout would overwrite local modifications.
    #[error("checkout conflict: {message}")]
    Conflict { message: String },

    #[error("cannot open git repository at \"{path}\": {source}")]
    NotARepo {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error(transparent)]
    Git(#[from] git2::Error),
}

/// Broad failure category, used by callers to decide whether to retry,
/// abort or ask the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input that no retry will fix.
    Validation,
    /// Environment misconfiguration, e.g. no `user.email`.
    Configuration,
    NotFound,
    /// The repository's state clashes with the request, e.g. an existing
    /// branch or local modifications.
    Conflict,
    /// I/O, network or object database failure reported by the engine.
    Engine,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidOid { .. } | Error::MissingTree => ErrorKind::Validation,
            Error::MissingIdentity { .. } => ErrorKind::Configuration,
            Error::BranchNotFound { .. }
            | Error::RemoteNotFound { .. }
            | Error::RefNotFound { .. } => ErrorKind::NotFound,
            Error::Conflict { .. } | Error::BranchExists { .. } => ErrorKind::Conflict,
            Error::NotARepo { .. } => ErrorKind::Engine,
            Error::Git(_) => ErrorKind::Engine,
        }
    }

    /// True for errors that indicate misuse or misconfiguration rather than
    /// transient state.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation | ErrorKind::Configuration
        )
    }
}
