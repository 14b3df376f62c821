use anyhow::Result;
use clap::Parser;
use sidecar::args::SidecarArgs;
use sidecar::{setup_routes, sync, AppState, EtcdClient, Settings};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let args = SidecarArgs::parse();

    if args.pretty {
        tracing_subscriber::registry()
            .with(fmt::layer().with_thread_ids(true).pretty())
            .with(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_thread_ids(true))
            .with(EnvFilter::from_default_env())
            .init();
    }

    let mut settings = Settings::load(args.config_file.as_deref())?;
    settings.apply_args(&args);
    tracing::info!(?settings, "settings");

    let client = Arc::new(EtcdClient::new(&settings)?);
    let state = AppState::new(&settings, client.clone())?;

    if args.sync_orphans {
        let period = Duration::from_secs(settings.loop_secs.max(1));
        tokio::spawn(sync::run(client, period));
    }

    tracing::info!(listen = %settings.listen, mount = %settings.mount_path(), "serving dashboard");
    tokio::select! {
        _ = warp::serve(setup_routes(state)).run(settings.listen) => {}
        _ = signal::ctrl_c() => {}
    }
    Ok(())
}
