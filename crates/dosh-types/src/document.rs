use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{Entry, Example};

/// Versioned dictionary document. Entry ids are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryDocument {
    #[serde(alias = "version")]
    schema_version: String,
    #[serde(alias = "words", default)]
    entries: Vec<Entry>,
}

/// Outcome of [`DictionaryDocument::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Malformed dictionary document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate entry id: {0}")]
    DuplicateId(String),
}

impl DictionaryDocument {
    /// Build a document from entries, rejecting duplicate ids
    pub fn from_entries(
        schema_version: impl Into<String>,
        entries: Vec<Entry>,
    ) -> Result<Self, DocumentError> {
        check_unique(&entries)?;
        Ok(Self {
            schema_version: schema_version.into(),
            entries,
        })
    }

    /// Parse a document from UTF-8 JSON
    pub fn from_json(bytes: &[u8]) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_slice(bytes)?;
        check_unique(&document.entries)?;
        Ok(document)
    }

    /// Pretty-printed JSON as stored in the repository
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Replace the entry with the same id in place, or append it
    pub fn upsert(&mut self, entry: Entry) -> Upsert {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => {
                *slot = entry;
                Upsert::Replaced
            }
            None => {
                self.entries.push(entry);
                Upsert::Inserted
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Entry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    /// Locate an example by id together with the entry that owns it
    pub fn find_example(&self, example_id: &str) -> Option<(&Entry, &Example)> {
        if example_id.is_empty() {
            return None;
        }

        self.entries.iter().find_map(|entry| {
            entry
                .examples()
                .find(|ex| ex.id == example_id)
                .map(|ex| (entry, ex))
        })
    }
}

fn check_unique(entries: &[Entry]) -> Result<(), DocumentError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id.as_str()) {
            return Err(DocumentError::DuplicateId(entry.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, headword: &str) -> Entry {
        let mut e = Entry::new_draft();
        e.id = id.to_string();
        e.headword = headword.to_string();
        e
    }

    #[test]
    fn parses_legacy_top_level_names() {
        let json = r#"{ "version": "3.0", "words": [{ "id": "a", "ru": "вода" }] }"#;
        let doc = DictionaryDocument::from_json(json.as_bytes()).unwrap();
        assert_eq!(doc.schema_version(), "3.0");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("a").unwrap().headword, "вода");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = br#"{ "schemaVersion": "3.0", "entries": [{ "id": "a" }, { "id": "a" }] }"#;
        let err = DictionaryDocument::from_json(json).unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn upsert_replaces_in_place_and_appends_new() {
        let mut doc =
            DictionaryDocument::from_entries("3.0", vec![entry("a", "one"), entry("b", "two")])
                .unwrap();

        assert_eq!(doc.upsert(entry("a", "uno")), Upsert::Replaced);
        assert_eq!(doc.upsert(entry("c", "three")), Upsert::Inserted);

        let heads: Vec<_> = doc.entries().iter().map(|e| e.headword.as_str()).collect();
        assert_eq!(heads, ["uno", "two", "three"]);
    }

    #[test]
    fn remove_and_find_example() {
        let mut doc = DictionaryDocument::from_entries("3.0", vec![entry("a", "one")]).unwrap();
        let example_id = doc.get("a").unwrap().senses[0].examples[0].id.clone();

        let (owner, _) = doc.find_example(&example_id).unwrap();
        assert_eq!(owner.id, "a");
        assert!(doc.find_example("").is_none());

        assert!(doc.remove("a").is_some());
        assert!(doc.remove("a").is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn json_round_trip_preserves_document() {
        let doc = DictionaryDocument::from_entries("3.0", vec![entry("a", "one")]).unwrap();
        let json = doc.to_json().unwrap();
        assert_eq!(DictionaryDocument::from_json(json.as_bytes()).unwrap(), doc);
    }
}
