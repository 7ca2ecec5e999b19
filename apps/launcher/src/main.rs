use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::RecvTimeoutError;
use ladder_bridge::{runtime::build_backend_runtime, ChannelView, LadderBridge, LadderEvent};
use ladder_client::HttpLadderClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;
use render::render_ladder;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "launcher", about = "Fetch and display game ladders")]
struct Args {
    /// Config file; defaults to ./launcher.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    ladder_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,
    /// Modes to request in order. Only the last one is displayed.
    modes: Vec<String>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(ladder_url) = args.ladder_url {
        settings.ladder_url = ladder_url;
    }
    if let Some(timeout) = args.timeout {
        settings.request_timeout_secs = timeout;
    }

    let runtime = build_backend_runtime(None).context("backend worker startup failure")?;
    let client_config = settings
        .client_config()
        .context("invalid ladder client settings")?;
    let client = HttpLadderClient::new(client_config).context("failed to build ladder client")?;
    info!(ladder_url = %client.base_url(), "ladder client ready");

    let (view, events) = ChannelView::bounded(settings.event_queue_capacity);
    let bridge = LadderBridge::with_handle(
        Arc::new(client),
        Arc::new(view),
        runtime.handle().clone(),
    );

    let modes = if args.modes.is_empty() {
        vec![settings.default_mode.clone()]
    } else {
        args.modes
    };
    for mode in modes {
        bridge.request_ladder(mode);
    }

    // Behave like a UI thread: drain notifications without ever blocking on
    // the fetch itself.
    while bridge.is_loading() {
        match events.recv_timeout(EVENT_POLL_INTERVAL) {
            Ok(event) => log_event(&event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    for event in events.try_iter() {
        log_event(&event);
    }

    let snapshot = bridge.snapshot();
    if let Some(failure) = snapshot.error.clone() {
        let user_message = failure.user_message();
        return Err(anyhow::Error::new(failure).context(user_message));
    }

    print!("{}", render_ladder(&snapshot));
    Ok(())
}

fn log_event(event: &LadderEvent) {
    match event {
        LadderEvent::LoadingChanged(loading) => info!(loading, "ladder loading changed"),
        LadderEvent::ErrorChanged(Some(failure)) => {
            info!(error = %failure, "ladder error set");
        }
        LadderEvent::ErrorChanged(None) => info!("ladder error cleared"),
        LadderEvent::CharactersReplaced(model) => {
            info!(count = model.row_count(), "ladder characters replaced");
        }
    }
}
