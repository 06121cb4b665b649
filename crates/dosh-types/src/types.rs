use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// One dictionary headword with its translations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    #[serde(alias = "ru", default)]
    pub headword: String,
    #[serde(alias = "pos", default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub senses: Vec<Sense>,
    #[serde(alias = "audio", default, deserialize_with = "audio_flag")]
    pub has_audio: bool,
    /// Admin-only provenance note, never published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    #[serde(alias = "ing", default)]
    pub translation: String,
    #[serde(default)]
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// Audio asset key. Empty for examples imported without one.
    #[serde(default, deserialize_with = "nullable_string")]
    pub id: String,
    #[serde(alias = "ru", default)]
    pub source_text: String,
    #[serde(alias = "ing", default)]
    pub target_text: String,
    #[serde(alias = "audio", default, deserialize_with = "audio_flag")]
    pub has_audio: bool,
}

impl Entry {
    /// Fresh entry seeded with one empty sense holding one empty example
    pub fn new_draft() -> Self {
        Self {
            id: new_id(),
            headword: String::new(),
            part_of_speech: None,
            senses: vec![Sense::seeded()],
            has_audio: false,
            source: None,
        }
    }

    /// All examples across every sense, in order
    pub fn examples(&self) -> impl Iterator<Item = &Example> {
        self.senses.iter().flat_map(|s| s.examples.iter())
    }

    pub fn example_mut(&mut self, example_id: &str) -> Option<&mut Example> {
        self.senses
            .iter_mut()
            .flat_map(|s| s.examples.iter_mut())
            .find(|e| e.id == example_id)
    }
}

impl Sense {
    pub fn seeded() -> Self {
        Self {
            translation: String::new(),
            examples: vec![Example::new()],
        }
    }
}

impl Example {
    pub fn new() -> Self {
        Self {
            id: new_id(),
            source_text: String::new(),
            target_text: String::new(),
            has_audio: false,
        }
    }

    /// Placeholder left behind by the editor with neither text filled in
    pub fn is_blank(&self) -> bool {
        self.source_text.trim().is_empty() && self.target_text.trim().is_empty()
    }
}

impl Default for Example {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate an opaque, stable identifier
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// Older admin files store `audio: { "word": true }`, public ones a bare bool.
#[derive(Deserialize)]
#[serde(untagged)]
enum AudioFlag {
    Flag(bool),
    Admin {
        #[serde(default)]
        word: bool,
    },
}

fn audio_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = Option::<AudioFlag>::deserialize(deserializer)?;
    Ok(match flag {
        Some(AudioFlag::Flag(b)) => b,
        Some(AudioFlag::Admin { word }) => word,
        None => false,
    })
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_has_minimum_shape() {
        let entry = Entry::new_draft();
        assert!(!entry.id.is_empty());
        assert_eq!(entry.senses.len(), 1);
        assert_eq!(entry.senses[0].examples.len(), 1);
        assert!(entry.senses[0].examples[0].is_blank());
        assert_ne!(entry.id, entry.senses[0].examples[0].id);
    }

    #[test]
    fn reads_legacy_admin_shape() {
        let json = r#"{
            "id": "w1",
            "ru": "дерево",
            "pos": "сущ.",
            "senses": [{ "ing": "дитт", "examples": [{ "id": null, "ru": "большое дерево", "ing": "доккха дитт", "audio": true }] }],
            "audio": { "word": true },
            "source": "field notes"
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.headword, "дерево");
        assert_eq!(entry.part_of_speech.as_deref(), Some("сущ."));
        assert!(entry.has_audio);
        assert_eq!(entry.senses[0].translation, "дитт");

        let example = &entry.senses[0].examples[0];
        assert_eq!(example.id, "");
        assert_eq!(example.source_text, "большое дерево");
        assert!(example.has_audio);
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let entry: Entry = serde_json::from_str(r#"{ "id": "w2", "headword": "x" }"#).unwrap();
        assert!(entry.senses.is_empty());
        assert!(!entry.has_audio);
        assert!(entry.source.is_none());
    }

    #[test]
    fn writes_current_field_names() {
        let mut entry = Entry::new_draft();
        entry.headword = "tree".into();

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["headword"], "tree");
        assert_eq!(value["hasAudio"], false);
        assert!(value.get("partOfSpeech").is_none());
        assert!(value.get("source").is_none());
        assert!(value["senses"][0]["examples"][0].get("sourceText").is_some());
    }
}
