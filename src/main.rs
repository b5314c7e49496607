use tracing::{debug, error, info};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;

use api::indicator::IndicatorClient;
use config::Config;
use services::chart_service::PlottersSurface;
use services::render_service::{ChartRenderer, RenderOutcome};
use utils::TracingDiagnostics;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["indicator_chart=debug", "reqwest=warn", "hyper=warn"] {
        if let Ok(d) = directive.parse::<Directive>() {
            filter = filter.add_directive(d);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📈 Starting indicator chart v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    debug!("Configuration: {:?}", config);

    let client = match config.http_timeout {
        Some(timeout) => match IndicatorClient::with_timeout(config.api_base_url.clone(), timeout) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to create indicator client: {}", e);
                return;
            }
        },
        None => IndicatorClient::new(config.api_base_url.clone()),
    };
    info!("Using indicator API at {}", client.base_url());

    let surface = PlottersSurface::new(config.chart_output.clone(), config.chart_width, config.chart_height);

    let mut renderer = ChartRenderer::new(
        client,
        surface,
        TracingDiagnostics,
        config.country_code.as_str(),
        config.indicator_key.as_str(),
    );

    match renderer.run().await {
        RenderOutcome::Rendered(chart) => info!(
            "✓ Chart with {} points written to {}",
            chart.labels.len(),
            renderer.surface().path().display()
        ),
        RenderOutcome::Failed(e) => debug!("No chart written ({:?} failure)", e.kind()),
    }
}
