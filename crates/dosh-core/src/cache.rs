use dosh_remote::{RemoteStore, Revision};
use dosh_types::{DictionaryDocument, Entry, Upsert};

use crate::error::{Error, LoadFailure, Result};

/// Most recently loaded document and the revision it was read at.
///
/// Only [`DocumentCache::load`] and the commit methods mutate it, and a
/// failed load leaves the previous state untouched.
#[derive(Debug, Default)]
pub struct DocumentCache {
    loaded: Option<Loaded>,
}

#[derive(Debug)]
struct Loaded {
    path: String,
    document: DictionaryDocument,
    revision: Revision,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `path` and replace the cached document wholesale
    pub async fn load(&mut self, store: &dyn RemoteStore, path: &str) -> Result<()> {
        let failed = |source: LoadFailure| Error::LoadFailed {
            path: path.to_string(),
            source,
        };

        let resource = store
            .fetch_resource(path)
            .await
            .map_err(|e| failed(e.into()))?;
        let document =
            DictionaryDocument::from_json(&resource.content).map_err(|e| failed(e.into()))?;

        tracing::info!(
            "Loaded {} ({} entries, revision {})",
            path,
            document.len(),
            resource.revision
        );

        self.loaded = Some(Loaded {
            path: path.to_string(),
            document,
            revision: resource.revision,
        });
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn current_document(&self) -> Result<&DictionaryDocument> {
        Ok(&self.loaded()?.document)
    }

    pub fn revision(&self) -> Result<&Revision> {
        Ok(&self.loaded()?.revision)
    }

    pub fn path(&self) -> Result<&str> {
        Ok(&self.loaded()?.path)
    }

    /// Upsert a committed entry. Purely local, no remote traffic.
    pub fn apply_commit(&mut self, entry: Entry) -> Result<Upsert> {
        Ok(self.loaded_mut()?.document.upsert(entry))
    }

    pub fn remove_entry(&mut self, id: &str) -> Result<Entry> {
        self.loaded_mut()?
            .document
            .remove(id)
            .ok_or_else(|| Error::UnknownEntry(id.to_string()))
    }

    /// Record the revision a successful write produced
    pub(crate) fn set_revision(&mut self, revision: Revision) -> Result<()> {
        self.loaded_mut()?.revision = revision;
        Ok(())
    }

    fn loaded(&self) -> Result<&Loaded> {
        self.loaded.as_ref().ok_or(Error::NotLoaded)
    }

    fn loaded_mut(&mut self) -> Result<&mut Loaded> {
        self.loaded.as_mut().ok_or(Error::NotLoaded)
    }
}
