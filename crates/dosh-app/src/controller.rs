use std::sync::Arc;

use dosh_core::Mode;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{OnError, event_loop};
use crate::io::{script_io, shell_io};
use crate::state::AppState;
use crate::types::{AppEvent, UiEvent};
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui: (AsyncSender<UiEvent>, AsyncReceiver<UiEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app: kanal::bounded_async(64),
            ui: kanal::bounded_async(256),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Spawn the event loop and printer, fed either by a fixed script of
    /// events or by the interactive shell when `script` is `None`
    pub fn spawn_tasks(
        &self,
        mode: Mode,
        script: Option<Vec<AppEvent>>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        let on_error = if script.is_some() {
            OnError::Abort
        } else {
            OnError::Continue
        };

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            mode,
            on_error,
            self.channels.app.1.clone(),
            self.channels.ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Printer
        tasks.spawn(ui_loop(self.channels.ui.1.clone()));

        // Input
        match script {
            Some(events) => {
                tasks.spawn(script_io(self.channels.app.0.clone(), events));
            }
            None => {
                tasks.spawn(shell_io(
                    self.channels.app.0.clone(),
                    self.channels.ui.0.clone(),
                    self.cancel_token.child_token(),
                ));
            }
        }

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
