use std::path::PathBuf;

use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::types::{AppEvent, UiEvent};

/// Read shell commands from stdin and forward them to the event loop
pub async fn shell_io(
    app_tx: AsyncSender<AppEvent>,
    ui_tx: AsyncSender<UiEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::debug!("stdin closed");
            app_tx.send(AppEvent::Quit).await?;
            break;
        };

        match parse_line(&line) {
            Ok(Some(event)) => {
                let quit = event == AppEvent::Quit;
                app_tx.send(event).await?;
                if quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(msg) => ui_tx.send(UiEvent::Error(msg)).await?,
        }
    }

    Ok(())
}

/// Send a fixed list of events, then quit
pub async fn script_io(app_tx: AsyncSender<AppEvent>, script: Vec<AppEvent>) -> anyhow::Result<()> {
    for event in script {
        app_tx.send(event).await?;
    }
    app_tx.send(AppEvent::Quit).await?;
    Ok(())
}

pub fn parse_line(line: &str) -> Result<Option<AppEvent>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let required = |what: &str| {
        if rest.is_empty() {
            Err(format!("usage: {command} {what}"))
        } else {
            Ok(rest.to_string())
        }
    };

    let event = match command {
        "search" | "list" => AppEvent::Search {
            query: rest.to_string(),
            limit: None,
        },
        "show" => AppEvent::Show(required("ID")?),
        "new" => AppEvent::Open(None),
        "open" => AppEvent::Open(Some(required("ID")?)),
        "set" => {
            let (path, value) = rest
                .split_once(char::is_whitespace)
                .map(|(p, v)| (p, v.trim()))
                .unwrap_or((rest, ""));
            if path.is_empty() {
                return Err("usage: set PATH VALUE".to_string());
            }
            AppEvent::SetField {
                path: path.to_string(),
                value: value.to_string(),
            }
        }
        "add-sense" => AppEvent::AddSense,
        "add-example" => {
            let sense = if rest.is_empty() {
                0
            } else {
                rest.parse()
                    .map_err(|_| format!("not a sense index: {rest}"))?
            };
            AppEvent::AddExample(sense)
        }
        "draft" => AppEvent::ShowDraft,
        "commit" | "save" => AppEvent::Commit,
        "cancel" => AppEvent::Cancel,
        "delete" => AppEvent::Delete(required("ID")?),
        "publish" => AppEvent::Publish,
        "audio" => {
            let (owner, file) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: audio OWNER_ID FILE".to_string())?;
            AppEvent::SaveAudio {
                owner_id: owner.to_string(),
                file: PathBuf::from(file.trim()),
            }
        }
        "reload" => AppEvent::Reload,
        "help" | "?" => AppEvent::Help,
        "quit" | "exit" => AppEvent::Quit,
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };

    Ok(Some(event))
}
