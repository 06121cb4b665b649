use std::path::Path;

use anyhow::Context;
use dosh_core::{AudioOwner, Dictionary};
use kanal::AsyncSender;

use crate::types::UiEvent;

pub async fn handle_audio_upload(
    dictionary: &mut Dictionary,
    owner_id: &str,
    file: &Path,
    ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    if bytes.is_empty() {
        anyhow::bail!("{} is empty", file.display());
    }

    let upload = dictionary.save_audio(owner_id, &bytes).await?;
    let owner = match &upload.owner {
        AudioOwner::Entry { entry_id } => format!("entry {entry_id}"),
        AudioOwner::Example {
            entry_id,
            example_id,
        } => format!("example {example_id} of {entry_id}"),
    };

    ui_tx
        .send(UiEvent::Status(format!(
            "Audio for {owner} saved to {}",
            upload.path
        )))
        .await?;
    Ok(())
}
