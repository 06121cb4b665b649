//! Filtered view of a document's entries for a query string.

use std::slice;

use dosh_types::{DictionaryDocument, Entry};

use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// Lazy iterator over entries matching a query, in document order.
///
/// Cloning yields an independent cursor over the same matches.
#[derive(Clone)]
pub struct Matches<'a> {
    entries: slice::Iter<'a, Entry>,
    needle: String,
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = &self.needle;
        self.entries.by_ref().find(|entry| matches(entry, needle))
    }
}

/// Case-insensitive substring search over headword, part of speech and
/// translations. An empty query matches everything.
pub fn filter<'a>(document: &'a DictionaryDocument, query: &str) -> Matches<'a> {
    Matches {
        entries: document.entries().iter(),
        needle: DefaultPreprocessor.process(query),
    }
}

fn matches(entry: &Entry, needle: &str) -> bool {
    needle.is_empty() || haystack(entry).contains(needle)
}

// Fields are joined with newlines so a query cannot match across two of them.
fn haystack(entry: &Entry) -> String {
    let mut text = entry.headword.clone();
    if let Some(pos) = &entry.part_of_speech {
        text.push('\n');
        text.push_str(pos);
    }
    for sense in &entry.senses {
        text.push('\n');
        text.push_str(&sense.translation);
    }
    DefaultPreprocessor.process(&text)
}
