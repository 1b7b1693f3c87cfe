use anyhow::{Context, Result};
use frame_remote::{
    config::AppConfig,
    console,
    frame_client::HttpFrameClient,
    logging,
    notifier::LogNotifier,
    runtime::Runtime,
};
use log::{error, info};
use tokio::{
    signal::unix::{SignalKind, signal},
    sync::mpsc,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        error!("application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    logging::init();
    info!("module version: {}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::get().context("failed to load configuration")?;
    info!(
        "controlling frame at {} (request timeout {:?}, default countdown {}s)",
        config.device.base_url, config.device.request_timeout, config.power.default_countdown_secs
    );

    let client = HttpFrameClient::new(&config.device.base_url, config.device.request_timeout)
        .context("failed to create frame client")?;

    let mut sigterm =
        signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;

    let runtime = Runtime::new(client, LogNotifier, config.power.default_countdown_secs);
    let mut view_rx = runtime.subscribe();

    let (command_tx, command_rx) = mpsc::channel(16);
    tokio::spawn(console::read_commands(command_tx));
    info!("{}", console::HELP);

    tokio::spawn(async move {
        let mut last_line = String::new();
        while view_rx.changed().await.is_ok() {
            let line = console::status_line(&view_rx.borrow_and_update());
            if !line.is_empty() && line != last_line {
                info!("{line}");
                last_line = line;
            }
        }
    });

    runtime
        .run(command_rx, async {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => info!("ctrl-c received"),
                _ = sigterm.recv() => info!("SIGTERM received"),
            }
        })
        .await;

    Ok(())
}
