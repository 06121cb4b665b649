use std::fmt;

use dosh_remote::RemoteError;
use dosh_types::DocumentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a draft entry may not be committed, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("headword is empty")]
    MissingHeadword,

    #[error("no sense has a translation")]
    MissingTranslation,

    #[error("no example has both texts filled in")]
    MissingExample,
}

/// Operation a remote failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SaveEntry,
    DeleteEntry,
    Publish,
    SaveAudio,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::SaveEntry => "save entry",
            Operation::DeleteEntry => "delete entry",
            Operation::Publish => "publish",
            Operation::SaveAudio => "save audio",
        })
    }
}

#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load {path}: {source}")]
    LoadFailed {
        path: String,
        #[source]
        source: LoadFailure,
    },

    /// Another writer changed the resource; reload and redo the edit
    #[error("{path} was modified elsewhere, reload and retry")]
    ConcurrentModification { path: String },

    #[error("{operation} failed: {source}")]
    Remote {
        operation: Operation,
        #[source]
        source: RemoteError,
    },

    #[error("invalid entry: {0}")]
    Validation(#[from] ValidationError),

    #[error("an edit session is already open")]
    SessionAlreadyOpen,

    #[error("no edit session is open")]
    NoOpenSession,

    #[error("invalid field path: {0}")]
    InvalidFieldPath(String),

    #[error("unknown entry: {0}")]
    UnknownEntry(String),

    #[error("no entry or example with id {0}")]
    UnknownAudioOwner(String),

    #[error("the published dictionary is read-only")]
    ReadOnly,

    #[error("no dictionary loaded")]
    NotLoaded,

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl Error {
    pub(crate) fn remote(operation: Operation) -> impl FnOnce(RemoteError) -> Error {
        move |source| Error::Remote { operation, source }
    }

    /// Like [`Error::remote`], but a stale revision becomes `ConcurrentModification`
    pub(crate) fn guarded(
        operation: Operation,
        path: &str,
    ) -> impl FnOnce(RemoteError) -> Error + use<> {
        let path = path.to_string();
        move |source| match source {
            RemoteError::RevisionConflict { .. } | RemoteError::AlreadyExists { .. } => {
                Error::ConcurrentModification { path }
            }
            source => Error::Remote { operation, source },
        }
    }

    /// Transient failure the caller may retry
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Remote { source, .. } => source.is_retryable(),
            Error::LoadFailed {
                source: LoadFailure::Remote(source),
                ..
            } => source.is_retryable(),
            _ => false,
        }
    }

    /// The credential was rejected; the session must re-authenticate
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Error::Remote {
                source: RemoteError::Unauthorized(_),
                ..
            } | Error::LoadFailed {
                source: LoadFailure::Remote(RemoteError::Unauthorized(_)),
                ..
            }
        )
    }
}
