//! Staged editing of a single entry.
//!
//! An [`Editor`] holds at most one [`EditSession`]. Field mutations are not
//! validated until commit; a failed commit leaves the session open so the
//! draft can be corrected, a successful one closes it.

use std::str::FromStr;

use dosh_types::{Entry, Example, Sense, new_id};

use crate::error::{Error, Result, ValidationError};
use crate::sync::AudioOwner;
use crate::validate::validate_entry;

/// Structural location of an editable text field in an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Headword,
    PartOfSpeech,
    Source,
    Translation { sense: usize },
    ExampleSource { sense: usize, example: usize },
    ExampleTarget { sense: usize, example: usize },
}

impl FromStr for FieldPath {
    type Err = Error;

    /// `headword`, `partOfSpeech`, `source`, `senses[i].translation`,
    /// `senses[i].examples[j].sourceText`, `senses[i].examples[j].targetText`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidFieldPath(s.to_string());
        let parts: Vec<&str> = s.trim().split('.').collect();

        let path = match parts.as_slice() {
            ["headword"] => FieldPath::Headword,
            ["partOfSpeech"] => FieldPath::PartOfSpeech,
            ["source"] => FieldPath::Source,
            [sense, "translation"] => FieldPath::Translation {
                sense: index(sense, "senses").ok_or_else(invalid)?,
            },
            [sense, example, field] => {
                let sense = index(sense, "senses").ok_or_else(invalid)?;
                let example = index(example, "examples").ok_or_else(invalid)?;
                match *field {
                    "sourceText" => FieldPath::ExampleSource { sense, example },
                    "targetText" => FieldPath::ExampleTarget { sense, example },
                    _ => return Err(invalid()),
                }
            }
            _ => return Err(invalid()),
        };
        Ok(path)
    }
}

/// `senses[3]` -> 3
fn index(segment: &str, name: &str) -> Option<usize> {
    segment
        .strip_prefix(name)?
        .strip_prefix('[')?
        .strip_suffix(']')?
        .parse()
        .ok()
}

/// Deep copy of one entry being edited, plus the original for cancel/diff
#[derive(Debug, Clone)]
pub struct EditSession {
    draft: Entry,
    baseline: Option<Entry>,
}

impl EditSession {
    fn new(entry: Option<&Entry>) -> Self {
        match entry {
            Some(entry) => Self {
                draft: entry.clone(),
                baseline: Some(entry.clone()),
            },
            None => Self {
                draft: Entry::new_draft(),
                baseline: None,
            },
        }
    }

    pub fn draft(&self) -> &Entry {
        &self.draft
    }

    /// The entry as it was when the session opened, `None` for a new entry
    pub fn baseline(&self) -> Option<&Entry> {
        self.baseline.as_ref()
    }

    pub fn is_new(&self) -> bool {
        self.baseline.is_none()
    }

    pub fn is_dirty(&self) -> bool {
        match &self.baseline {
            Some(baseline) => *baseline != self.draft,
            None => true,
        }
    }

    pub fn set_field(&mut self, path: FieldPath, value: &str) -> Result<()> {
        let out_of_range = || Error::InvalidFieldPath(format!("{path:?}"));
        let draft = &mut self.draft;

        match path {
            FieldPath::Headword => draft.headword = value.to_string(),
            FieldPath::PartOfSpeech => draft.part_of_speech = non_empty(value),
            FieldPath::Source => draft.source = non_empty(value),
            FieldPath::Translation { sense } => {
                draft
                    .senses
                    .get_mut(sense)
                    .ok_or_else(out_of_range)?
                    .translation = value.to_string();
            }
            FieldPath::ExampleSource { sense, example } => {
                example_mut(draft, sense, example)
                    .ok_or_else(out_of_range)?
                    .source_text = value.to_string();
            }
            FieldPath::ExampleTarget { sense, example } => {
                example_mut(draft, sense, example)
                    .ok_or_else(out_of_range)?
                    .target_text = value.to_string();
            }
        }
        Ok(())
    }

    /// Append an empty sense seeded with one example, returning its index
    pub fn add_sense(&mut self) -> usize {
        self.draft.senses.push(Sense::seeded());
        self.draft.senses.len() - 1
    }

    /// Append an empty example to a sense, returning its index
    pub fn add_example(&mut self, sense: usize) -> Result<usize> {
        let sense = self
            .draft
            .senses
            .get_mut(sense)
            .ok_or_else(|| Error::InvalidFieldPath(format!("senses[{sense}]")))?;
        sense.examples.push(Example::new());
        Ok(sense.examples.len() - 1)
    }

    /// Flag a recording that was saved while this entry was open.
    ///
    /// The baseline is flagged as well, since the remote already has it.
    pub(crate) fn record_audio(&mut self, owner: &AudioOwner) {
        let (entry_id, example_id) = match owner {
            AudioOwner::Entry { entry_id } => (entry_id, None),
            AudioOwner::Example {
                entry_id,
                example_id,
            } => (entry_id, Some(example_id)),
        };
        if self.draft.id != *entry_id {
            return;
        }

        for entry in std::iter::once(&mut self.draft).chain(self.baseline.as_mut()) {
            match example_id {
                None => entry.has_audio = true,
                Some(id) => {
                    if let Some(example) = entry.example_mut(id) {
                        example.has_audio = true;
                    }
                }
            }
        }
    }

    /// Validated copy of the draft, ready to persist
    fn validated(&self) -> std::result::Result<Entry, ValidationError> {
        validate_entry(&self.draft)?;

        let mut entry = self.draft.clone();
        // Imported examples may lack an id; audio needs one to key on.
        for example in entry.senses.iter_mut().flat_map(|s| s.examples.iter_mut()) {
            if example.id.is_empty() {
                example.id = new_id();
            }
        }
        Ok(entry)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn example_mut(entry: &mut Entry, sense: usize, example: usize) -> Option<&mut Example> {
    entry.senses.get_mut(sense)?.examples.get_mut(example)
}

/// Owner of the single open edit session
#[derive(Debug, Default)]
pub struct Editor {
    session: Option<EditSession>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `entry`, or a fresh entry when `None`.
    ///
    /// Fails with `SessionAlreadyOpen` rather than discarding an open draft.
    pub fn open(&mut self, entry: Option<&Entry>) -> Result<&mut EditSession> {
        if self.session.is_some() {
            return Err(Error::SessionAlreadyOpen);
        }

        let session = EditSession::new(entry);
        tracing::debug!(
            "Opened edit session for {} ({})",
            session.draft.id,
            if session.is_new() { "new" } else { "existing" }
        );
        Ok(self.session.insert(session))
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Result<&mut EditSession> {
        self.session.as_mut().ok_or(Error::NoOpenSession)
    }

    pub fn set_field(&mut self, path: &str, value: &str) -> Result<()> {
        let path = path.parse()?;
        self.session_mut()?.set_field(path, value)
    }

    /// Validate the draft. On success the session closes and the entry is
    /// handed back for saving; on failure the session stays open.
    pub fn commit(&mut self) -> Result<Entry> {
        let entry = self.session_mut()?.validated()?;
        self.session = None;
        tracing::debug!("Committed edit session for {}", entry.id);
        Ok(entry)
    }

    /// Drop the draft. Returns whether a session was open.
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_paths() {
        assert_eq!("headword".parse::<FieldPath>().unwrap(), FieldPath::Headword);
        assert_eq!(
            "senses[2].translation".parse::<FieldPath>().unwrap(),
            FieldPath::Translation { sense: 2 }
        );
        assert_eq!(
            "senses[0].examples[1].targetText".parse::<FieldPath>().unwrap(),
            FieldPath::ExampleTarget {
                sense: 0,
                example: 1
            }
        );

        for bad in ["", "headwords", "senses.translation", "senses[x].translation", "senses[0].examples[0].audio"] {
            assert!(
                matches!(bad.parse::<FieldPath>(), Err(Error::InvalidFieldPath(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn only_one_session_at_a_time() {
        let mut editor = Editor::new();
        editor.open(None).unwrap();
        editor.set_field("headword", "tree").unwrap();

        assert!(matches!(editor.open(None), Err(Error::SessionAlreadyOpen)));
        assert_eq!(editor.session().unwrap().draft().headword, "tree");
    }

    #[test]
    fn failed_commit_keeps_session_open() {
        let mut editor = Editor::new();
        editor.open(None).unwrap();

        let err = editor.commit().unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::MissingHeadword)));
        assert!(editor.is_open());
    }

    #[test]
    fn successful_commit_closes_session() {
        let mut editor = Editor::new();
        editor.open(None).unwrap();
        editor.set_field("headword", "tree").unwrap();
        editor.set_field("senses[0].translation", "дерево").unwrap();
        editor.set_field("senses[0].examples[0].sourceText", "tree").unwrap();
        editor.set_field("senses[0].examples[0].targetText", "дерево").unwrap();

        let entry = editor.commit().unwrap();
        assert_eq!(entry.headword, "tree");
        assert!(!editor.is_open());
        assert!(matches!(editor.commit(), Err(Error::NoOpenSession)));
    }

    #[test]
    fn edits_do_not_touch_baseline() {
        let mut original = Entry::new_draft();
        original.headword = "огонь".into();

        let mut editor = Editor::new();
        let session = editor.open(Some(&original)).unwrap();
        assert!(!session.is_dirty());

        session.set_field(FieldPath::Headword, "пламя").unwrap();
        assert!(session.is_dirty());
        assert_eq!(session.baseline().unwrap().headword, "огонь");
        assert_eq!(original.headword, "огонь");

        assert!(editor.cancel());
        assert!(!editor.is_open());
        assert!(!editor.cancel());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut editor = Editor::new();
        editor.open(None).unwrap();
        assert!(matches!(
            editor.set_field("senses[1].translation", "x"),
            Err(Error::InvalidFieldPath(_))
        ));

        let session = editor.session_mut().unwrap();
        let sense = session.add_sense();
        assert_eq!(sense, 1);
        assert_eq!(session.add_example(1).unwrap(), 1);
        assert!(session.add_example(5).is_err());
        editor.set_field("senses[1].examples[1].sourceText", "x").unwrap();
    }

    #[test]
    fn recorded_audio_flags_draft_and_baseline() {
        let mut original = Entry::new_draft();
        original.id = "w1".into();
        original.senses[0].examples[0].id = "ex-1".into();

        let mut editor = Editor::new();
        let session = editor.open(Some(&original)).unwrap();
        session.set_field(FieldPath::Headword, "вода").unwrap();

        session.record_audio(&AudioOwner::Example {
            entry_id: "w1".into(),
            example_id: "ex-1".into(),
        });
        session.record_audio(&AudioOwner::Entry {
            entry_id: "other".into(),
        });

        assert!(session.draft().senses[0].examples[0].has_audio);
        assert!(session.baseline().unwrap().senses[0].examples[0].has_audio);
        assert!(!session.draft().has_audio);

        session.set_field(FieldPath::Headword, "").unwrap();
        assert!(!session.is_dirty());
    }

    #[test]
    fn blank_part_of_speech_clears_it() {
        let mut editor = Editor::new();
        editor.open(None).unwrap();
        editor.set_field("partOfSpeech", "noun").unwrap();
        editor.set_field("partOfSpeech", "  ").unwrap();
        assert!(editor.session().unwrap().draft().part_of_speech.is_none());
    }

    #[test]
    fn commit_assigns_missing_example_ids() {
        let mut entry = Entry::new_draft();
        entry.headword = "a".into();
        entry.senses[0].translation = "b".into();
        entry.senses[0].examples[0].id.clear();
        entry.senses[0].examples[0].source_text = "c".into();
        entry.senses[0].examples[0].target_text = "d".into();

        let mut editor = Editor::new();
        editor.open(Some(&entry)).unwrap();
        let committed = editor.commit().unwrap();
        assert!(!committed.senses[0].examples[0].id.is_empty());
    }
}
