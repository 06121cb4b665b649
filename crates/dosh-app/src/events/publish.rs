use dosh_core::Dictionary;
use kanal::AsyncSender;

use crate::types::UiEvent;

pub async fn handle_publish(
    dictionary: &mut Dictionary,
    ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let report = dictionary.publish().await?;

    for skipped in &report.skipped {
        ui_tx
            .send(UiEvent::Status(format!(
                "Skipped {}: {}",
                skipped.id, skipped.reason
            )))
            .await?;
    }
    ui_tx
        .send(UiEvent::Status(format!(
            "Published {} entries ({} skipped)",
            report.published,
            report.skipped.len()
        )))
        .await?;
    Ok(())
}
