//! Runs the insight poller against a live backend and an in-memory copy of
//! the dashboard, logging what each cycle renders.

use eco_insights::poller::ALERT_CONTAINER_ID;
use eco_insights::ui::{dashboard_document, DASHBOARD_PANELS};
use eco_insights::{HttpInsightSource, InsightPoller, PollerConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = PollerConfig::from_env();
    let source = HttpInsightSource::new(&config.insights_url)?;
    info!(url = source.url(), "watching insights");

    let poller = InsightPoller::with_period(source, dashboard_document(), config.refresh_interval);
    let handle = poller.initialize().await;

    tokio::signal::ctrl_c().await?;
    handle.cancel();

    let page = poller.page().await;
    for (id, _, _) in DASHBOARD_PANELS {
        if let Some(tip) = page.element(id).and_then(|el| el.active_tooltip()) {
            info!(element = id, placement = tip.placement.as_str(), "{}", tip.message);
        }
    }
    for notice in page.notices(ALERT_CONTAINER_ID) {
        info!(kind = %notice.kind, detail = %notice.detail, "{}", notice.message);
    }
    info!(
        refreshes = poller.refreshes(),
        failures = poller.failures(),
        "insight poller stopped"
    );

    Ok(())
}
