//! Revision-guarded read-modify-write against the remote store.
//!
//! Nothing here retries: a write whose response was lost may still have
//! landed, so retry policy is left to the caller.

use std::sync::Arc;

use dosh_remote::Revision;
use dosh_types::{DictionaryDocument, Entry};

use crate::cache::DocumentCache;
use crate::context::SessionContext;
use crate::error::{Error, Operation, Result};
use crate::publish::{PublishReport, build_public};

/// Which record a recording belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioOwner {
    Entry { entry_id: String },
    Example { entry_id: String, example_id: String },
}

#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub owner: AudioOwner,
    pub path: String,
    pub revision: Revision,
}

pub struct SyncEngine {
    ctx: Arc<SessionContext>,
    /// Public document revision as of our last publish, tracked apart from
    /// the admin document's
    public_revision: Option<Revision>,
}

impl SyncEngine {
    pub fn new(ctx: Arc<SessionContext>) -> Self {
        Self {
            ctx,
            public_revision: None,
        }
    }

    pub fn public_revision(&self) -> Option<&Revision> {
        self.public_revision.as_ref()
    }

    /// Forget the tracked public revision so the next publish starts from
    /// whatever is on the remote now
    pub fn reset_public_revision(&mut self) {
        self.public_revision = None;
    }

    /// Persist `entry` into the cached document's resource, then apply it locally.
    ///
    /// Fails with `ConcurrentModification` if the resource moved on since the
    /// cache last saw it; the caller must reload and redo the edit.
    pub async fn save_entry(&self, cache: &mut DocumentCache, entry: Entry) -> Result<()> {
        let id = entry.id.clone();
        let to_store = entry.clone();
        let revision = self
            .guarded_write(cache, Operation::SaveEntry, move |doc| {
                doc.upsert(to_store);
                Ok(())
            })
            .await?;

        let upsert = cache.apply_commit(entry)?;
        cache.set_revision(revision.clone())?;
        tracing::info!("Saved entry {} ({:?}), revision {}", id, upsert, revision);
        Ok(())
    }

    pub async fn delete_entry(&self, cache: &mut DocumentCache, id: &str) -> Result<Entry> {
        let revision = self
            .guarded_write(cache, Operation::DeleteEntry, |doc| {
                doc.remove(id)
                    .map(|_| ())
                    .ok_or_else(|| Error::UnknownEntry(id.to_string()))
            })
            .await?;

        let removed = cache.remove_entry(id)?;
        cache.set_revision(revision.clone())?;
        tracing::info!("Deleted entry {}, revision {}", id, revision);
        Ok(removed)
    }

    /// Copy every valid admin entry to the public document
    pub async fn publish(&mut self) -> Result<PublishReport> {
        let store = self.ctx.store();
        let admin_path = self.ctx.admin_path();
        let public_path = self.ctx.public_path();

        let resource = store
            .fetch_resource(admin_path)
            .await
            .map_err(Error::remote(Operation::Publish))?;
        let admin = DictionaryDocument::from_json(&resource.content)?;

        let (public, skipped) = build_public(&admin, self.ctx.schema_version())?;
        for s in &skipped {
            tracing::warn!("Not publishing entry {}: {}", s.id, s.reason);
        }

        let current = store
            .current_revision(public_path)
            .await
            .map_err(Error::remote(Operation::Publish))?;
        if let Some(tracked) = &self.public_revision {
            if current.as_ref() != Some(tracked) {
                return Err(Error::ConcurrentModification {
                    path: public_path.to_string(),
                });
            }
        }

        let json = public.to_json()?;
        let revision = store
            .put_resource(public_path, &json, current.as_ref())
            .await
            .map_err(Error::guarded(Operation::Publish, public_path))?;

        tracing::info!(
            "Published {} entries to {} ({} skipped), revision {}",
            public.len(),
            public_path,
            skipped.len(),
            revision
        );
        self.public_revision = Some(revision.clone());

        Ok(PublishReport {
            published: public.len(),
            skipped,
            revision,
        })
    }

    /// Upload a recording for an entry or example and flag its owner.
    ///
    /// `owner_id` is looked up among entry ids first, then example ids.
    /// An existing recording is overwritten.
    pub async fn save_audio(
        &self,
        cache: &mut DocumentCache,
        owner_id: &str,
        bytes: &[u8],
    ) -> Result<AudioUpload> {
        let document = cache.current_document()?;
        let audio = self.ctx.audio();

        let (owner, path, mut entry) = if let Some(entry) = document.get(owner_id) {
            let owner = AudioOwner::Entry {
                entry_id: entry.id.clone(),
            };
            (owner, audio.word_path(owner_id), entry.clone())
        } else if let Some((entry, _)) = document.find_example(owner_id) {
            let owner = AudioOwner::Example {
                entry_id: entry.id.clone(),
                example_id: owner_id.to_string(),
            };
            (owner, audio.example_path(owner_id), entry.clone())
        } else {
            return Err(Error::UnknownAudioOwner(owner_id.to_string()));
        };

        match &owner {
            AudioOwner::Entry { .. } => entry.has_audio = true,
            AudioOwner::Example { example_id, .. } => {
                if let Some(example) = entry.example_mut(example_id) {
                    example.has_audio = true;
                }
            }
        }

        let store = self.ctx.store();
        let existing = store
            .current_revision(&path)
            .await
            .map_err(Error::remote(Operation::SaveAudio))?;
        let revision = store
            .put_binary(&path, bytes, existing.as_ref())
            .await
            .map_err(Error::guarded(Operation::SaveAudio, &path))?;
        tracing::info!("Uploaded {} bytes of audio to {}", bytes.len(), path);

        self.save_entry(cache, entry).await?;

        Ok(AudioUpload {
            owner,
            path,
            revision,
        })
    }

    /// Re-read the resource's revision, refuse if the cache is stale, then
    /// write a mutated copy of the cached document under that revision.
    async fn guarded_write<F>(
        &self,
        cache: &DocumentCache,
        operation: Operation,
        mutate: F,
    ) -> Result<Revision>
    where
        F: FnOnce(&mut DictionaryDocument) -> Result<()>,
    {
        let path = cache.path()?;
        let base = cache.revision()?;
        let store = self.ctx.store();

        let current = store
            .current_revision(path)
            .await
            .map_err(Error::remote(operation))?;
        if current.as_ref() != Some(base) {
            tracing::warn!(
                "{} is at {:?}, cache holds {}; refusing to {}",
                path,
                current,
                base,
                operation
            );
            return Err(Error::ConcurrentModification {
                path: path.to_string(),
            });
        }

        let mut document = cache.current_document()?.clone();
        mutate(&mut document)?;
        let json = document.to_json()?;

        store
            .put_resource(path, &json, Some(base))
            .await
            .map_err(Error::guarded(operation, path))
    }
}
