use dosh_core::Dictionary;
use kanal::AsyncSender;

use crate::types::UiEvent;

pub async fn handle_search(
    dictionary: &Dictionary,
    query: &str,
    limit: usize,
    ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let matches = dictionary.search(query)?;
    let total = matches.clone().count();
    let shown: Vec<_> = matches.take(limit).cloned().collect();
    tracing::debug!("Search {:?}: {} matches, showing {}", query, total, shown.len());

    ui_tx.send(UiEvent::Entries { shown, total }).await?;
    Ok(())
}

pub async fn handle_show(
    dictionary: &Dictionary,
    id: &str,
    ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let entry = dictionary.entry(id)?.clone();
    ui_tx.send(UiEvent::Entry(entry)).await?;
    Ok(())
}
