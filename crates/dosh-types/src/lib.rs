pub mod document;
pub mod types;

pub use document::{DictionaryDocument, DocumentError, Upsert};
pub use types::{Entry, Example, Sense, new_id};
