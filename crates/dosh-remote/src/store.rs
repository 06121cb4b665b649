use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RemoteError, Result};

/// Opaque token naming the exact state of a remote resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resource as read from the store
#[derive(Debug, Clone)]
pub struct Resource {
    pub revision: Revision,
    pub content: Vec<u8>,
}

/// Path-addressed, revision-tracked content store.
///
/// Every write is guarded: with `Some(expected)` the write only lands if the
/// resource is still at that revision (`RevisionConflict` otherwise); with
/// `None` it only lands if the resource does not exist yet (`AlreadyExists`).
#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    /// Read a resource and its current revision
    async fn fetch_resource(&self, path: &str) -> Result<Resource>;

    /// Write UTF-8 text
    async fn put_resource(
        &self,
        path: &str,
        content: &str,
        expected: Option<&Revision>,
    ) -> Result<Revision>;

    /// Write opaque bytes
    async fn put_binary(
        &self,
        path: &str,
        bytes: &[u8],
        expected: Option<&Revision>,
    ) -> Result<Revision>;

    /// Current revision of a resource, `None` if it does not exist
    async fn current_revision(&self, path: &str) -> Result<Option<Revision>> {
        match self.fetch_resource(path).await {
            Ok(resource) => Ok(Some(resource.revision)),
            Err(RemoteError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
