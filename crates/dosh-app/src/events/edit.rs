use dosh_core::{Dictionary, Error};
use kanal::AsyncSender;

use crate::types::{AppEvent, UiEvent};

/// Session events that only touch the local draft
pub async fn handle_edit(
    dictionary: &mut Dictionary,
    event: AppEvent,
    ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let status = match event {
        AppEvent::Open(id) => {
            let session = dictionary.open(id.as_deref())?;
            let draft = session.draft().clone();
            ui_tx.send(UiEvent::Draft(draft.clone())).await?;
            format!("Editing {}", draft.id)
        }
        AppEvent::SetField { path, value } => {
            dictionary.set_field(&path, &value)?;
            format!("{path} set")
        }
        AppEvent::AddSense => {
            let idx = dictionary.session_mut()?.add_sense();
            format!("Added senses[{idx}]")
        }
        AppEvent::AddExample(sense) => {
            let idx = dictionary.session_mut()?.add_example(sense)?;
            format!("Added senses[{sense}].examples[{idx}]")
        }
        AppEvent::ShowDraft => {
            let draft = dictionary
                .session()
                .ok_or(Error::NoOpenSession)?
                .draft()
                .clone();
            ui_tx.send(UiEvent::Draft(draft)).await?;
            return Ok(());
        }
        AppEvent::Cancel => {
            if dictionary.cancel() {
                "Draft discarded".to_string()
            } else {
                "Nothing to cancel".to_string()
            }
        }
        other => anyhow::bail!("not an edit event: {other:?}"),
    };

    ui_tx.send(UiEvent::Status(status)).await?;
    Ok(())
}

pub async fn handle_commit(
    dictionary: &mut Dictionary,
    ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    match dictionary.commit().await {
        Ok(entry) => {
            tracing::info!("Committed entry {}", entry.id);
            ui_tx
                .send(UiEvent::Status(format!("Saved {} ({})", entry.headword, entry.id)))
                .await?;
            Ok(())
        }
        Err(Error::Validation(reason)) => {
            anyhow::bail!("Cannot save yet, {reason}; the draft is still open")
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn handle_delete(
    dictionary: &mut Dictionary,
    id: &str,
    ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let removed = dictionary.delete(id).await?;
    ui_tx
        .send(UiEvent::Status(format!("Deleted {} ({})", removed.headword, removed.id)))
        .await?;
    Ok(())
}
