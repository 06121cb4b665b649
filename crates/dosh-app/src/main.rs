use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod cli;
mod controller;
mod events;
mod io;
mod profile;
mod state;
mod types;
mod ui;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    };

    // A pending stdin read cannot be cancelled and would hold up runtime
    // shutdown until the next newline.
    std::process::exit(code);
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,dosh_app=info,dosh_core=info,dosh_remote=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = profile::load_config(cli.config.as_deref())?;
    let state = Arc::new(AppState::new(config));

    let mode = cli.command.mode();
    let script = cli.command.into_script();

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(mode, script);

    let mut code = 0;
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                controller.shutdown();
                return Ok(130);
            }
            joined = tasks.join_next() => match joined {
                None => break,
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => {
                    // The event loop has already shown it to the user
                    tracing::debug!("Task failed: {e:#}");
                    controller.shutdown();
                    code = 1;
                }
                Some(Err(e)) => {
                    tracing::error!("Task panicked: {e}");
                    controller.shutdown();
                    code = 1;
                }
            }
        }
    }

    Ok(code)
}
