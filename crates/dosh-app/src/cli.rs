use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dosh_core::Mode;

use crate::types::AppEvent;

#[derive(Parser, Debug)]
#[command(name = "dosh", version, about = "Edit and publish the Russian-Ingush dictionary")]
pub struct Cli {
    /// JSON profile (defaults to ./dosh.json, then environment)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List entries matching a query
    List {
        query: Option<String>,
        /// Read the published dictionary instead of the draft
        #[arg(long)]
        public: bool,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print one entry
    Show {
        id: String,
        #[arg(long)]
        public: bool,
    },
    /// Create an entry with one sense and one example
    Add {
        #[arg(long)]
        headword: String,
        #[arg(long)]
        pos: Option<String>,
        #[arg(long)]
        translation: String,
        #[arg(long)]
        example_source: String,
        #[arg(long)]
        example_target: String,
    },
    /// Change fields of an entry, e.g. --set senses[0].translation=хий
    Edit {
        id: String,
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        set: Vec<(String, String)>,
    },
    Delete {
        id: String,
    },
    /// Copy every valid draft entry to the published dictionary
    Publish,
    /// Upload a recording for an entry or example
    Audio {
        owner_id: String,
        file: PathBuf,
    },
    /// Interactive editing session
    Shell,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(path, value)| (path.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected PATH=VALUE, got `{s}`"))
}

impl Command {
    pub fn mode(&self) -> Mode {
        match self {
            Command::List { public: true, .. } | Command::Show { public: true, .. } => Mode::Public,
            _ => Mode::Admin,
        }
    }

    /// Events a one-shot command expands to, `None` for the shell
    pub fn into_script(self) -> Option<Vec<AppEvent>> {
        let script = match self {
            Command::List { query, limit, .. } => vec![AppEvent::Search {
                query: query.unwrap_or_default(),
                limit,
            }],
            Command::Show { id, .. } => vec![AppEvent::Show(id)],
            Command::Add {
                headword,
                pos,
                translation,
                example_source,
                example_target,
            } => {
                let mut events = vec![AppEvent::Open(None), set("headword", headword)];
                if let Some(pos) = pos {
                    events.push(set("partOfSpeech", pos));
                }
                events.extend([
                    set("senses[0].translation", translation),
                    set("senses[0].examples[0].sourceText", example_source),
                    set("senses[0].examples[0].targetText", example_target),
                    AppEvent::Commit,
                ]);
                events
            }
            Command::Edit { id, set: fields } => {
                let mut events = vec![AppEvent::Open(Some(id))];
                events.extend(
                    fields
                        .into_iter()
                        .map(|(path, value)| AppEvent::SetField { path, value }),
                );
                events.push(AppEvent::Commit);
                events
            }
            Command::Delete { id } => vec![AppEvent::Delete(id)],
            Command::Publish => vec![AppEvent::Publish],
            Command::Audio { owner_id, file } => vec![AppEvent::SaveAudio { owner_id, file }],
            Command::Shell => return None,
        };
        Some(script)
    }
}

fn set(path: &str, value: String) -> AppEvent {
    AppEvent::SetField {
        path: path.to_string(),
        value,
    }
}
