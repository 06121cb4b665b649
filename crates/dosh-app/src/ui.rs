use dosh_types::Entry;
use kanal::AsyncReceiver;

use crate::types::UiEvent;

pub const HELP: &str = "\
search [QUERY]              list matching entries
show ID                     print one entry
new | open ID               start editing
set PATH VALUE              e.g. set senses[0].examples[0].targetText доккха дитт
add-sense | add-example N   grow the draft
draft                       print the draft
commit | cancel             save or discard the draft
delete ID                   remove an entry
publish                     copy valid entries to the public dictionary
audio OWNER_ID FILE         upload a recording for an entry or example
reload | help | quit";

/// Printer loop, runs until the event loop says it is done
pub async fn ui_loop(ui_rx: AsyncReceiver<UiEvent>) -> anyhow::Result<()> {
    while let Ok(event) = ui_rx.recv().await {
        match event {
            UiEvent::Entries { shown, total } => {
                for entry in &shown {
                    println!("{}", summary(entry));
                }
                if shown.len() < total {
                    println!("Found: {total} (showing {})", shown.len());
                } else {
                    println!("Found: {total}");
                }
            }
            UiEvent::Entry(entry) | UiEvent::Draft(entry) => println!("{}", render(&entry)),
            UiEvent::Status(msg) => println!("{msg}"),
            UiEvent::Error(msg) => eprintln!("error: {msg}"),
            UiEvent::Help => println!("{HELP}"),
            UiEvent::Done => break,
        }
    }

    Ok(())
}

/// One line per entry: headword, part of speech, translations
pub fn summary(entry: &Entry) -> String {
    let translations: Vec<&str> = entry
        .senses
        .iter()
        .map(|s| s.translation.as_str())
        .filter(|t| !t.trim().is_empty())
        .collect();

    let mut line = format!("[{}] {}", entry.id, entry.headword);
    if let Some(pos) = &entry.part_of_speech {
        line.push_str(&format!(" ({pos})"));
    }
    if !translations.is_empty() {
        line.push_str(" - ");
        line.push_str(&translations.join("; "));
    }
    if entry.has_audio {
        line.push_str(" [audio]");
    }
    line
}

/// Full entry with numbered senses and examples, matching set-field paths
pub fn render(entry: &Entry) -> String {
    let mut out = summary(entry);
    if let Some(source) = &entry.source {
        out.push_str(&format!("\n  source: {source}"));
    }
    for (i, sense) in entry.senses.iter().enumerate() {
        out.push_str(&format!("\n  senses[{i}] {}", sense.translation));
        for (j, ex) in sense.examples.iter().enumerate() {
            out.push_str(&format!(
                "\n    examples[{j}] {} / {}{}",
                ex.source_text,
                ex.target_text,
                if ex.has_audio { " [audio]" } else { "" }
            ));
        }
    }
    out
}
