#![allow(dead_code)]

use std::sync::Arc;

use dosh_config::audio::AudioConfig;
use dosh_config::dictionary::DictionaryConfig;
use dosh_core::{Dictionary, Mode, SessionContext};
use dosh_remote::{MemoryStore, RemoteStore};
use dosh_types::{DictionaryDocument, Entry};

pub const ADMIN: &str = "admin/dictionary.admin.json";
pub const PUBLIC: &str = "public/dictionary.json";

pub fn context(store: &Arc<MemoryStore>) -> Arc<SessionContext> {
    let store: Arc<dyn RemoteStore> = store.clone();
    Arc::new(SessionContext::new(
        store,
        DictionaryConfig::default(),
        AudioConfig::default(),
    ))
}

pub fn valid_entry(id: &str, headword: &str) -> Entry {
    let mut entry = Entry::new_draft();
    entry.id = id.to_string();
    entry.headword = headword.to_string();
    entry.senses[0].translation = format!("{headword} (инг.)");
    entry.senses[0].examples[0].source_text = format!("пример: {headword}");
    entry.senses[0].examples[0].target_text = format!("масал: {headword}");
    entry
}

/// Store seeded with an admin document holding `entries`
pub fn seeded(entries: Vec<Entry>) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let doc = DictionaryDocument::from_entries("3.0", entries).unwrap();
    store.insert(ADMIN, doc.to_json().unwrap());
    store
}

pub fn remote_document(store: &MemoryStore, path: &str) -> DictionaryDocument {
    DictionaryDocument::from_json(&store.content(path).unwrap()).unwrap()
}

pub async fn loaded(store: &Arc<MemoryStore>) -> Dictionary {
    let mut dict = Dictionary::new(context(store), Mode::Admin);
    dict.load().await.unwrap();
    dict
}
