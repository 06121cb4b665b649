use std::sync::Arc;

use anyhow::Context;
use dosh_core::{Dictionary, Mode, SessionContext};
use dosh_remote::{GitHubStore, RemoteStore};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use crate::types::{AppEvent, UiEvent};

pub mod audio;
pub mod edit;
pub mod publish;
pub mod search;

use audio::handle_audio_upload;
use edit::{handle_commit, handle_delete, handle_edit};
use publish::handle_publish;
use search::{handle_search, handle_show};

/// How the loop reacts to a failed event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Report and keep going (interactive shell)
    Continue,
    /// Report and stop with the error (one-shot commands)
    Abort,
}

/// App's main loop. Owns the dictionary, so every mutation runs to
/// completion before the next event is looked at.
pub async fn event_loop(
    state: Arc<AppState>,
    mode: Mode,
    on_error: OnError,
    app_rx: AsyncReceiver<AppEvent>,
    ui_tx: AsyncSender<UiEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let result = run(state, mode, on_error, &app_rx, &ui_tx, &cancel).await;
    if let Err(e) = &result {
        let _ = ui_tx.send(UiEvent::Error(format!("{e:#}"))).await;
    }
    let _ = ui_tx.send(UiEvent::Done).await;
    result
}

async fn run(
    state: Arc<AppState>,
    mode: Mode,
    on_error: OnError,
    app_rx: &AsyncReceiver<AppEvent>,
    ui_tx: &AsyncSender<UiEvent>,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let (search_limit, ctx) = {
        let config = state.config.read().await;
        if !config.remote.is_complete() {
            anyhow::bail!("No repository configured, set DOSH_OWNER and DOSH_REPO or use --config");
        }
        let store: Arc<dyn RemoteStore> =
            Arc::new(GitHubStore::new(&config.remote).context("Failed to create GitHub client")?);
        (
            config.dictionary.search_limit,
            Arc::new(SessionContext::from_config(store, &config)),
        )
    };

    let mut dictionary = Dictionary::new(ctx, mode);
    serve(&mut dictionary, search_limit, on_error, app_rx, ui_tx, cancel).await
}

/// Load the document, then handle events until `Quit` or cancellation
pub async fn serve(
    dictionary: &mut Dictionary,
    search_limit: usize,
    on_error: OnError,
    app_rx: &AsyncReceiver<AppEvent>,
    ui_tx: &AsyncSender<UiEvent>,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    dictionary.load().await?;
    let access = match dictionary.mode() {
        Mode::Admin => "",
        Mode::Public => ", read-only",
    };
    ui_tx
        .send(UiEvent::Status(format!(
            "{}: {} entries{access}",
            dictionary.path(),
            dictionary.document()?.len()
        )))
        .await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = app_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] {:?}", event);
        if event == AppEvent::Quit {
            break;
        }

        if let Err(e) = handle_events(dictionary, search_limit, ui_tx, event).await {
            match on_error {
                OnError::Abort => return Err(e),
                OnError::Continue => {
                    tracing::debug!("Event failed: {e:#}");
                    ui_tx.send(UiEvent::Error(format!("{e:#}"))).await?;
                }
            }
        }
    }

    Ok(())
}

async fn handle_events(
    dictionary: &mut Dictionary,
    search_limit: usize,
    ui_tx: &AsyncSender<UiEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Reload => {
            dictionary.load().await?;
            let count = dictionary.document()?.len();
            ui_tx
                .send(UiEvent::Status(format!("Reloaded, {count} entries")))
                .await?;
        }
        AppEvent::Search { query, limit } => {
            handle_search(dictionary, &query, limit.unwrap_or(search_limit), ui_tx).await?;
        }
        AppEvent::Show(id) => handle_show(dictionary, &id, ui_tx).await?,
        AppEvent::Open(_)
        | AppEvent::SetField { .. }
        | AppEvent::AddSense
        | AppEvent::AddExample(_)
        | AppEvent::ShowDraft
        | AppEvent::Cancel => handle_edit(dictionary, event, ui_tx).await?,
        AppEvent::Commit => handle_commit(dictionary, ui_tx).await?,
        AppEvent::Delete(id) => handle_delete(dictionary, &id, ui_tx).await?,
        AppEvent::Publish => handle_publish(dictionary, ui_tx).await?,
        AppEvent::SaveAudio { owner_id, file } => {
            handle_audio_upload(dictionary, &owner_id, &file, ui_tx).await?;
        }
        AppEvent::Help => ui_tx.send(UiEvent::Help).await?,
        AppEvent::Quit => {}
    }

    Ok(())
}
