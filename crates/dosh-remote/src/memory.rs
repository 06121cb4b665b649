//! In-process store with the same revision contract as the remote.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{RemoteError, Result};
use crate::store::{RemoteStore, Resource, Revision};

/// Every successful write yields a fresh revision, even when the bytes are
/// unchanged. Used by tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    files: HashMap<String, Resource>,
    next_revision: u64,
    writes: usize,
    fail_next: Option<RemoteError>,
}

impl Inner {
    fn bump(&mut self) -> Revision {
        self.next_revision += 1;
        Revision::new(format!("mem-{:08}", self.next_revision))
    }

    fn write(&mut self, path: &str, bytes: &[u8], expected: Option<&Revision>) -> Result<Revision> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }

        match (self.files.get(path), expected) {
            (Some(current), Some(expected)) if current.revision != *expected => {
                return Err(RemoteError::RevisionConflict {
                    path: path.to_string(),
                });
            }
            (None, Some(_)) => {
                return Err(RemoteError::NotFound {
                    path: path.to_string(),
                });
            }
            (Some(_), None) => {
                return Err(RemoteError::AlreadyExists {
                    path: path.to_string(),
                });
            }
            _ => {}
        }

        let revision = self.bump();
        self.files.insert(
            path.to_string(),
            Resource {
                revision: revision.clone(),
                content: bytes.to_vec(),
            },
        );
        self.writes += 1;
        Ok(revision)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Unguarded write, as if another client had changed the resource
    pub fn insert(&self, path: &str, content: impl Into<Vec<u8>>) -> Revision {
        let mut inner = self.lock();
        let revision = inner.bump();
        inner.files.insert(
            path.to_string(),
            Resource {
                revision: revision.clone(),
                content: content.into(),
            },
        );
        revision
    }

    pub fn content(&self, path: &str) -> Option<Vec<u8>> {
        self.lock().files.get(path).map(|r| r.content.clone())
    }

    pub fn revision_of(&self, path: &str) -> Option<Revision> {
        self.lock().files.get(path).map(|r| r.revision.clone())
    }

    /// Guarded writes accepted so far
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Make the next call fail with `error`
    pub fn fail_next(&self, error: RemoteError) {
        self.lock().fail_next = Some(error);
    }
}

#[async_trait::async_trait]
impl RemoteStore for MemoryStore {
    async fn fetch_resource(&self, path: &str) -> Result<Resource> {
        tokio::task::yield_now().await;

        let mut inner = self.lock();
        if let Some(err) = inner.fail_next.take() {
            return Err(err);
        }
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound {
                path: path.to_string(),
            })
    }

    async fn put_resource(
        &self,
        path: &str,
        content: &str,
        expected: Option<&Revision>,
    ) -> Result<Revision> {
        tokio::task::yield_now().await;
        self.lock().write(path, content.as_bytes(), expected)
    }

    async fn put_binary(
        &self,
        path: &str,
        bytes: &[u8],
        expected: Option<&Revision>,
    ) -> Result<Revision> {
        tokio::task::yield_now().await;
        self.lock().write(path, bytes, expected)
    }
}
