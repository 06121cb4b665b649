use dosh_remote::Revision;
use dosh_types::{DictionaryDocument, DocumentError, Entry};

use crate::error::ValidationError;
use crate::validate::validate_entry;

/// An admin entry left out of the published document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub id: String,
    pub reason: ValidationError,
}

#[derive(Debug, Clone)]
pub struct PublishReport {
    pub published: usize,
    pub skipped: Vec<Skipped>,
    pub revision: Revision,
}

/// Reader-facing form of an entry: no admin notes, no empty example stubs
pub fn public_entry(entry: &Entry) -> Entry {
    let mut entry = entry.clone();
    entry.source = None;
    for sense in &mut entry.senses {
        sense.examples.retain(|ex| !ex.is_blank());
    }
    entry
}

/// Build the public document from the admin one, keeping only entries that
/// pass commit validation
pub fn build_public(
    admin: &DictionaryDocument,
    schema_version: &str,
) -> Result<(DictionaryDocument, Vec<Skipped>), DocumentError> {
    let mut entries = Vec::with_capacity(admin.len());
    let mut skipped = Vec::new();

    for entry in admin.entries() {
        match validate_entry(entry) {
            Ok(()) => entries.push(public_entry(entry)),
            Err(reason) => skipped.push(Skipped {
                id: entry.id.clone(),
                reason,
            }),
        }
    }

    let document = DictionaryDocument::from_entries(schema_version, entries)?;
    Ok((document, skipped))
}

#[cfg(test)]
mod tests {
    use dosh_types::Example;

    use super::*;

    fn valid(id: &str) -> Entry {
        let mut entry = Entry::new_draft();
        entry.id = id.into();
        entry.headword = "дом".into();
        entry.senses[0].translation = "цӀа".into();
        entry.senses[0].examples[0].source_text = "мой дом".into();
        entry.senses[0].examples[0].target_text = "са цӀа".into();
        entry
    }

    #[test]
    fn strips_admin_fields_and_blank_examples() {
        let mut entry = valid("a");
        entry.source = Some("notebook 3".into());
        entry.senses[0].examples.push(Example::new());

        let public = public_entry(&entry);
        assert!(public.source.is_none());
        assert_eq!(public.senses[0].examples.len(), 1);
        assert_eq!(public.senses[0].examples[0].source_text, "мой дом");
    }

    #[test]
    fn skips_invalid_entries_in_order() {
        let mut no_head = valid("b");
        no_head.headword.clear();
        let mut no_example = valid("c");
        no_example.senses[0].examples[0].target_text = " ".into();

        let admin =
            DictionaryDocument::from_entries("3.0", vec![valid("a"), no_head, no_example, valid("d")])
                .unwrap();
        let (public, skipped) = build_public(&admin, "3.0").unwrap();

        let ids: Vec<_> = public.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "d"]);
        assert_eq!(
            skipped,
            vec![
                Skipped {
                    id: "b".into(),
                    reason: ValidationError::MissingHeadword
                },
                Skipped {
                    id: "c".into(),
                    reason: ValidationError::MissingExample
                },
            ]
        );
    }
}
