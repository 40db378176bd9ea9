//! Wiring & DI. Entry point: bootstrap adapters, inject into the session, run UI.
//! No business logic here.

use city_discussion::adapters::http::BackendClient;
use city_discussion::adapters::mock::DemoBackend;
use city_discussion::adapters::ui::notifier::TerminalNotifier;
use city_discussion::adapters::ui::tui::TuiInputPort;
use city_discussion::ports::{DiscussionPort, HealthPort, InputPort, NewsPort};
use city_discussion::shared::AppConfig;
use city_discussion::usecases::{DiscussionSession, check_backend};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    city_discussion::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration; using defaults");
        AppConfig::default()
    });

    // --- Backend: demo or HTTP ---
    let news: Arc<dyn NewsPort>;
    let discussions: Arc<dyn DiscussionPort>;
    let health: Arc<dyn HealthPort>;
    if cfg.is_demo() {
        warn!("CITY_DISCUSSION_DEMO set, using canned demo backend");
        let demo = Arc::new(DemoBackend::with_delay(cfg.demo_delay_ms_or_default()));
        news = demo.clone();
        discussions = demo.clone();
        health = demo;
    } else {
        let url = cfg.backend_url_or_default();
        info!(url = %url, timeout = ?cfg.request_timeout_or_default(), "using HTTP backend");
        let client = Arc::new(
            BackendClient::new(url, cfg.request_timeout_or_default())
                .map_err(|e| anyhow::anyhow!("{}", e))?,
        );
        news = client.clone();
        discussions = client.clone();
        health = client;
    }

    check_backend(health.as_ref()).await;

    // --- Session ---
    let notifier = Arc::new(TerminalNotifier::default());
    let debounce = cfg.debounce_or_default();
    let staleness = cfg.staleness_or_default();
    info!(debounce_ms = debounce.as_millis() as u64, staleness = ?staleness, "session settings");
    let session = DiscussionSession::new(news, discussions, notifier.clone(), debounce, staleness);

    // --- Run (menu -> city / headline / discussion) ---
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(session, notifier));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
