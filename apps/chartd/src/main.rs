mod server;
mod transform;

use chartinfo::SwissEphemerisAdapter;
use chartinfo_config::ChartdSettings;
use log::{info, warn};
use std::sync::Arc;

use crate::server::AppState;
use crate::transform::XsltProc;

fn main() -> anyhow::Result<()> {
    let settings = chartinfo_config::load_settings()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.log_filter.as_str()))
        .init();

    // Sets the process-wide ephemeris path, so it runs before the runtime spawns workers
    let adapter = if settings.moshier {
        info!("Using the built-in Moshier ephemeris");
        SwissEphemerisAdapter::moshier()
    } else {
        SwissEphemerisAdapter::new(settings.ephemeris_path.clone())?
    };

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(serve(settings, adapter))
}

async fn serve(settings: ChartdSettings, adapter: SwissEphemerisAdapter) -> anyhow::Result<()> {
    let state = AppState::new(
        Box::new(adapter),
        Arc::new(XsltProc::new(settings.transform_program.clone())),
    );

    if let Some(dir) = &settings.static_dir {
        if !dir.is_dir() {
            warn!("Static directory {} does not exist", dir.display());
        }
    }
    let app = server::router(state, settings.static_dir.as_deref());

    let addr = settings.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("chartd listening at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("chartd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
