use dosh_types::Entry;

use crate::error::ValidationError;

/// Check the rules every committed or published entry must satisfy.
///
/// Stops at the first failure: headword, then translation, then example.
pub fn validate_entry(entry: &Entry) -> Result<(), ValidationError> {
    if entry.headword.trim().is_empty() {
        return Err(ValidationError::MissingHeadword);
    }

    if !entry
        .senses
        .iter()
        .any(|s| !s.translation.trim().is_empty())
    {
        return Err(ValidationError::MissingTranslation);
    }

    if !entry
        .examples()
        .any(|ex| !ex.source_text.trim().is_empty() && !ex.target_text.trim().is_empty())
    {
        return Err(ValidationError::MissingExample);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use dosh_types::{Example, Sense};

    use super::*;

    fn valid() -> Entry {
        let mut entry = Entry::new_draft();
        entry.headword = "дерево".into();
        entry.senses[0].translation = "дитт".into();
        entry.senses[0].examples[0].source_text = "старое дерево".into();
        entry.senses[0].examples[0].target_text = "шира дитт".into();
        entry
    }

    #[test]
    fn accepts_complete_entry() {
        assert_eq!(validate_entry(&valid()), Ok(()));
    }

    #[test]
    fn whitespace_headword_is_missing() {
        let mut entry = valid();
        entry.headword = "  \t".into();
        assert_eq!(validate_entry(&entry), Err(ValidationError::MissingHeadword));
    }

    #[test]
    fn headword_checked_before_translation() {
        let entry = Entry::new_draft();
        assert_eq!(validate_entry(&entry), Err(ValidationError::MissingHeadword));
    }

    #[test]
    fn needs_one_translated_sense() {
        let mut entry = valid();
        entry.senses[0].translation = " ".into();
        assert_eq!(validate_entry(&entry), Err(ValidationError::MissingTranslation));

        entry.senses.push(Sense {
            translation: "второй".into(),
            examples: vec![],
        });
        assert_eq!(validate_entry(&entry), Ok(()));
    }

    #[test]
    fn example_may_live_in_any_sense() {
        let mut entry = valid();
        entry.senses[0].examples[0].target_text.clear();
        assert_eq!(validate_entry(&entry), Err(ValidationError::MissingExample));

        let mut filled = Example::new();
        filled.source_text = "a".into();
        filled.target_text = "b".into();
        entry.senses.push(Sense {
            translation: String::new(),
            examples: vec![filled],
        });
        assert_eq!(validate_entry(&entry), Ok(()));
    }
}
