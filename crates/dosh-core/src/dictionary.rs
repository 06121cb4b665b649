use std::sync::Arc;

use dosh_remote::Revision;
use dosh_types::{DictionaryDocument, Entry};

use crate::cache::DocumentCache;
use crate::context::SessionContext;
use crate::error::{Error, Result};
use crate::publish::PublishReport;
use crate::search::{Matches, filter};
use crate::session::{EditSession, Editor};
use crate::sync::{AudioUpload, SyncEngine};

/// Which document a session works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The editable draft; all operations available
    Admin,
    /// The published document; read-only
    Public,
}

/// One editing session over one document: cache, editor and sync engine
/// wired together.
pub struct Dictionary {
    ctx: Arc<SessionContext>,
    mode: Mode,
    cache: DocumentCache,
    editor: Editor,
    sync: SyncEngine,
}

impl Dictionary {
    pub fn new(ctx: Arc<SessionContext>, mode: Mode) -> Self {
        Self {
            sync: SyncEngine::new(ctx.clone()),
            ctx,
            mode,
            cache: DocumentCache::new(),
            editor: Editor::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn path(&self) -> &str {
        match self.mode {
            Mode::Admin => self.ctx.admin_path(),
            Mode::Public => self.ctx.public_path(),
        }
    }

    /// (Re)load the document for this mode.
    ///
    /// Also drops the tracked public revision, so a publish that lost to
    /// another session can be retried after a reload.
    pub async fn load(&mut self) -> Result<()> {
        let path = match self.mode {
            Mode::Admin => self.ctx.admin_path(),
            Mode::Public => self.ctx.public_path(),
        };
        self.cache.load(self.ctx.store(), path).await?;
        self.sync.reset_public_revision();
        Ok(())
    }

    pub fn document(&self) -> Result<&DictionaryDocument> {
        self.cache.current_document()
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Public document revision written by this session's last publish
    pub fn public_revision(&self) -> Option<&Revision> {
        self.sync.public_revision()
    }

    pub fn search(&self, query: &str) -> Result<Matches<'_>> {
        Ok(filter(self.document()?, query))
    }

    pub fn entry(&self, id: &str) -> Result<&Entry> {
        self.document()?
            .get(id)
            .ok_or_else(|| Error::UnknownEntry(id.to_string()))
    }

    /// Open an existing entry by id, or a fresh one with `None`
    pub fn open(&mut self, id: Option<&str>) -> Result<&mut EditSession> {
        self.writable()?;
        let entry = match id {
            Some(id) => Some(
                self.cache
                    .current_document()?
                    .get(id)
                    .ok_or_else(|| Error::UnknownEntry(id.to_string()))?,
            ),
            None => None,
        };
        self.editor.open(entry)
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.editor.session()
    }

    pub fn session_mut(&mut self) -> Result<&mut EditSession> {
        self.editor.session_mut()
    }

    pub fn set_field(&mut self, path: &str, value: &str) -> Result<()> {
        self.editor.set_field(path, value)
    }

    pub fn cancel(&mut self) -> bool {
        self.editor.cancel()
    }

    /// Validate and save the open draft.
    ///
    /// A validation failure keeps the session open. Once validation passes
    /// the session is closed whatever the outcome of the save.
    pub async fn commit(&mut self) -> Result<Entry> {
        self.writable()?;
        let entry = self.editor.commit()?;
        self.sync.save_entry(&mut self.cache, entry.clone()).await?;
        Ok(entry)
    }

    pub async fn delete(&mut self, id: &str) -> Result<Entry> {
        self.writable()?;
        self.sync.delete_entry(&mut self.cache, id).await
    }

    pub async fn publish(&mut self) -> Result<PublishReport> {
        self.writable()?;
        self.sync.publish().await
    }

    /// Upload a recording. If its owner is open in the editor, the draft
    /// is flagged too so a later commit keeps `hasAudio`.
    pub async fn save_audio(&mut self, owner_id: &str, bytes: &[u8]) -> Result<AudioUpload> {
        self.writable()?;
        let upload = self.sync.save_audio(&mut self.cache, owner_id, bytes).await?;
        if let Ok(session) = self.editor.session_mut() {
            session.record_audio(&upload.owner);
        }
        Ok(upload)
    }

    fn writable(&self) -> Result<()> {
        match self.mode {
            Mode::Admin => Ok(()),
            Mode::Public => Err(Error::ReadOnly),
        }
    }
}
