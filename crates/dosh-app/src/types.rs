use std::path::PathBuf;

use dosh_types::Entry;

/// Requests into the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Reload,
    Search {
        query: String,
        limit: Option<usize>,
    },
    Show(String),
    /// Open an entry for editing, or a new one with `None`
    Open(Option<String>),
    SetField {
        path: String,
        value: String,
    },
    AddSense,
    AddExample(usize),
    ShowDraft,
    Commit,
    Cancel,
    Delete(String),
    Publish,
    SaveAudio {
        owner_id: String,
        file: PathBuf,
    },
    Help,
    Quit,
}

/// Output for the printer
#[derive(Debug, Clone)]
pub enum UiEvent {
    Entries { shown: Vec<Entry>, total: usize },
    Entry(Entry),
    Draft(Entry),
    Status(String),
    Error(String),
    Help,
    Done,
}
