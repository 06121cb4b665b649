use std::sync::Arc;

use dosh_config::audio::AudioConfig;
use dosh_config::dictionary::DictionaryConfig;
use dosh_core::{Dictionary, Mode, SessionContext};
use dosh_remote::{MemoryStore, RemoteStore};
use dosh_types::{DictionaryDocument, Entry};
use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;

use crate::events::{OnError, serve};
use crate::io::parse_line;
use crate::types::{AppEvent, UiEvent};

const ADMIN: &str = "admin/dictionary.admin.json";

fn store_with(headwords: &[(&str, &str)]) -> Arc<MemoryStore> {
    let entries = headwords
        .iter()
        .map(|(id, headword)| {
            let mut entry = Entry::new_draft();
            entry.id = id.to_string();
            entry.headword = headword.to_string();
            entry.senses[0].translation = format!("{headword}-инг");
            entry.senses[0].examples[0].source_text = "a".into();
            entry.senses[0].examples[0].target_text = "b".into();
            entry
        })
        .collect();
    let store = Arc::new(MemoryStore::new());
    let doc = DictionaryDocument::from_entries("3.0", entries).unwrap();
    store.insert(ADMIN, doc.to_json().unwrap());
    store
}

fn dictionary(store: &Arc<MemoryStore>, mode: Mode) -> Dictionary {
    let store: Arc<dyn RemoteStore> = store.clone();
    let ctx = SessionContext::new(store, DictionaryConfig::default(), AudioConfig::default());
    Dictionary::new(Arc::new(ctx), mode)
}

/// Feed shell lines through the loop and collect everything it printed
async fn run_lines(
    dictionary: &mut Dictionary,
    on_error: OnError,
    lines: &[&str],
) -> (anyhow::Result<()>, Vec<UiEvent>) {
    let (app_tx, app_rx) = kanal::unbounded_async();
    let (ui_tx, ui_rx) = kanal::unbounded_async();

    for line in lines {
        if let Some(event) = parse_line(line).unwrap() {
            app_tx.send(event).await.unwrap();
        }
    }
    app_tx.send(AppEvent::Quit).await.unwrap();

    let result = serve(
        dictionary,
        50,
        on_error,
        &app_rx,
        &ui_tx,
        &CancellationToken::new(),
    )
    .await;
    (result, drain(&ui_rx))
}

fn drain(ui_rx: &AsyncReceiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(Some(event)) = ui_rx.try_recv() {
        events.push(event);
    }
    events
}

fn statuses(events: &[UiEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            UiEvent::Status(s) => Some(s.as_str()),
            _ => None,
        })
        .collect()
}

fn errors(events: &[UiEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            UiEvent::Error(s) => Some(s.as_str()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn shell_session_creates_entry() {
    let store = store_with(&[("w1", "вода")]);
    let mut dict = dictionary(&store, Mode::Admin);

    let (result, events) = run_lines(
        &mut dict,
        OnError::Continue,
        &[
            "new",
            "set headword огонь",
            "set senses[0].translation цӀе",
            "set senses[0].examples[0].sourceText огонь горит",
            "set senses[0].examples[0].targetText цӀе йоагӀ",
            "commit",
            "search ого",
        ],
    )
    .await;

    result.unwrap();
    assert!(errors(&events).is_empty(), "{events:?}");
    assert!(statuses(&events).iter().any(|s| s.starts_with("Saved огонь")));
    assert!(events.iter().any(|e| matches!(
        e,
        UiEvent::Entries { shown, total: 1 } if shown[0].headword == "огонь"
    )));

    let remote = DictionaryDocument::from_json(&store.content(ADMIN).unwrap()).unwrap();
    assert_eq!(remote.len(), 2);
}

#[tokio::test]
async fn shell_keeps_going_after_failure() {
    let store = store_with(&[("w1", "вода")]);
    let mut dict = dictionary(&store, Mode::Admin);

    let (result, events) = run_lines(
        &mut dict,
        OnError::Continue,
        &["new", "commit", "cancel", "show w1"],
    )
    .await;

    result.unwrap();
    let errors = errors(&events);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("still open"));
    assert!(statuses(&events).contains(&"Draft discarded"));
    assert!(matches!(events.last(), Some(UiEvent::Entry(e)) if e.id == "w1"));
}

#[tokio::test]
async fn script_stops_at_first_failure() {
    let store = store_with(&[("w1", "вода")]);
    let mut dict = dictionary(&store, Mode::Admin);

    let (result, events) = run_lines(
        &mut dict,
        OnError::Abort,
        &["open nope", "delete w1"],
    )
    .await;

    assert!(result.is_err());
    assert!(!statuses(&events).iter().any(|s| s.starts_with("Deleted")));
    assert!(dict.entry("w1").is_ok());
}

#[tokio::test]
async fn public_mode_refuses_edits() {
    let store = store_with(&[]);
    store.insert(
        "public/dictionary.json",
        "{\"schemaVersion\":\"3.0\",\"entries\":[]}",
    );
    let mut dict = dictionary(&store, Mode::Public);

    let (result, events) = run_lines(&mut dict, OnError::Continue, &["new", "publish"]).await;

    result.unwrap();
    assert_eq!(statuses(&events)[0], "public/dictionary.json: 0 entries, read-only");
    assert_eq!(errors(&events).len(), 2);
}

#[tokio::test]
async fn load_failure_ends_the_loop() {
    let store = Arc::new(MemoryStore::new());
    let mut dict = dictionary(&store, Mode::Admin);

    let (result, events) = run_lines(&mut dict, OnError::Continue, &["search"]).await;

    assert!(result.is_err());
    assert!(events.is_empty());
}
