use tracing::{debug, info};
use crate::api::indicator::IndicatorSource;
use crate::models::ChartConfig;
use crate::services::{chart_service, series_service};
use crate::services::chart_service::ChartSurface;
use crate::utils::{ChartError, Diagnostics};

/// What a single run ended with
#[derive(Debug)]
pub enum RenderOutcome {
    /// The chart was drawn; carries what was handed to the surface
    Rendered(ChartConfig),
    /// Nothing was drawn; the error has already been reported
    Failed(ChartError),
}

/// Fetches one indicator for one country and draws it as a line chart
pub struct ChartRenderer<S, C, D> {
    source: S,
    surface: C,
    diagnostics: D,
    country_code: String,
    indicator_key: String,
}

impl<S, C, D> ChartRenderer<S, C, D>
where
    S: IndicatorSource,
    C: ChartSurface,
    D: Diagnostics,
{
    pub fn new(
        source: S,
        surface: C,
        diagnostics: D,
        country_code: impl Into<String>,
        indicator_key: impl Into<String>,
    ) -> Self {
        Self {
            source,
            surface,
            diagnostics,
            country_code: country_code.into(),
            indicator_key: indicator_key.into(),
        }
    }

    pub fn surface(&self) -> &C {
        &self.surface
    }

    /// Run fetch, extract and render once. Called when the surface is ready to be drawn into.
    ///
    /// Any failure is reported to the diagnostics sink exactly once and leaves the surface untouched.
    pub async fn run(&mut self) -> RenderOutcome {
        match self.render().await {
            Ok(config) => {
                info!(
                    "Rendered {} ({}) with {} points",
                    self.indicator_key,
                    self.country_code,
                    config.labels.len()
                );
                RenderOutcome::Rendered(config)
            }
            Err(e) => {
                self.diagnostics.report(&e);
                RenderOutcome::Failed(e)
            }
        }
    }

    async fn render(&mut self) -> Result<ChartConfig, ChartError> {
        info!("Fetching indicator data for {}", self.country_code);
        let response = self.source.fetch_indicator_data(&self.country_code).await?;

        let series = series_service::extract_series(&response, &self.country_code, &self.indicator_key)?;
        debug!("Extracted {} years of {}", series.len(), self.indicator_key);
        let config = chart_service::build_chart_config(&series, &self.country_code, &self.indicator_key);

        self.surface.draw(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::indicator::client::tests::{refused_base_url, serve_once};
    use crate::api::indicator::{ApiError, IndicatorClient, IndicatorResponse};
    use crate::utils::errors::FailureKind;
    use crate::utils::TracingDiagnostics;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::layer::{Context as LayerContext, Layer, SubscriberExt};

    const COUNTRY: &str = "AF";
    const INDICATOR: &str = "AG.LND.AGRI.ZS";

    struct StaticSource(Result<IndicatorResponse, ApiError>);

    #[async_trait]
    impl IndicatorSource for StaticSource {
        async fn fetch_indicator_data(&self, _country_code: &str) -> Result<IndicatorResponse, ApiError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        drawn: Vec<ChartConfig>,
    }

    impl ChartSurface for RecordingSurface {
        fn draw(&mut self, config: &ChartConfig) -> Result<(), ChartError> {
            self.drawn.push(config.clone());
            Ok(())
        }
    }

    struct BrokenSurface;

    impl ChartSurface for BrokenSurface {
        fn draw(&mut self, _config: &ChartConfig) -> Result<(), ChartError> {
            Err(ChartError::Render("backend unavailable".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingDiagnostics {
        entries: Mutex<Vec<String>>,
    }

    impl RecordingDiagnostics {
        fn entries(&self) -> Vec<String> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl Diagnostics for &RecordingDiagnostics {
        fn report(&self, err: &ChartError) {
            self.entries.lock().unwrap().push(err.to_string());
        }
    }

    fn well_formed() -> IndicatorResponse {
        serde_json::from_value(json!({
            "indicator_data": {
                "AF": { "AG.LND.AGRI.ZS": { "2000": 10, "2001": 12, "note": "x" } }
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_renders_filtered_series() {
        let diagnostics = RecordingDiagnostics::default();
        let mut renderer = ChartRenderer::new(
            StaticSource(Ok(well_formed())),
            RecordingSurface::default(),
            &diagnostics,
            COUNTRY,
            INDICATOR,
        );

        let outcome = renderer.run().await;
        assert!(matches!(outcome, RenderOutcome::Rendered(_)));
        assert!(diagnostics.entries().is_empty());

        let drawn = &renderer.surface().drawn;
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].labels, vec!["2000", "2001"]);
        assert_eq!(drawn[0].datasets[0].data, vec![Some(10.0), Some(12.0)]);
    }

    #[tokio::test]
    async fn test_network_failure_logs_once_and_draws_nothing() {
        let diagnostics = RecordingDiagnostics::default();
        let mut renderer = ChartRenderer::new(
            StaticSource(Err(ApiError::RequestError("connection refused".to_string()))),
            RecordingSurface::default(),
            &diagnostics,
            COUNTRY,
            INDICATOR,
        );

        match renderer.run().await {
            RenderOutcome::Failed(e) => assert_eq!(e.kind(), FailureKind::NetworkOrParse),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(diagnostics.entries().len(), 1);
        assert!(renderer.surface().drawn.is_empty());
    }

    #[tokio::test]
    async fn test_missing_data_logs_once_and_draws_nothing() {
        let cases = vec![
            json!({ "indicator_data": null }),
            json!({ "indicator_data": { "US": {} } }),
            json!({ "indicator_data": { "AF": { "SP.POP.TOTL": { "2000": 1 } } } }),
            json!({ "indicator_data": { "AF": { "AG.LND.AGRI.ZS": {} } } }),
        ];

        for body in cases {
            let diagnostics = RecordingDiagnostics::default();
            let response: IndicatorResponse = serde_json::from_value(body).unwrap();
            let mut renderer = ChartRenderer::new(
                StaticSource(Ok(response)),
                RecordingSurface::default(),
                &diagnostics,
                COUNTRY,
                INDICATOR,
            );

            match renderer.run().await {
                RenderOutcome::Failed(e) => assert_eq!(e.kind(), FailureKind::MissingData),
                other => panic!("expected failure, got {:?}", other),
            }
            assert_eq!(diagnostics.entries().len(), 1);
            assert!(renderer.surface().drawn.is_empty());
        }
    }

    #[tokio::test]
    async fn test_render_failure_is_reported() {
        let diagnostics = RecordingDiagnostics::default();
        let mut renderer = ChartRenderer::new(
            StaticSource(Ok(well_formed())),
            BrokenSurface,
            &diagnostics,
            COUNTRY,
            INDICATOR,
        );

        assert!(matches!(renderer.run().await, RenderOutcome::Failed(_)));
        assert_eq!(diagnostics.entries(), vec!["Failed to render chart: backend unavailable"]);
    }

    #[tokio::test]
    async fn test_end_to_end_over_http() {
        let body = json!({
            "indicator_data": {
                "AF": { "AG.LND.AGRI.ZS": { "1990": 57.8, "1991": 57.9, "source": "WDI" } }
            }
        })
        .to_string();
        let (base_url, _server) = serve_once("200 OK", body).await;

        let diagnostics = RecordingDiagnostics::default();
        let mut renderer = ChartRenderer::new(
            IndicatorClient::new(base_url),
            RecordingSurface::default(),
            &diagnostics,
            COUNTRY,
            INDICATOR,
        );

        assert!(matches!(renderer.run().await, RenderOutcome::Rendered(_)));
        assert_eq!(renderer.surface().drawn[0].labels, vec!["1990", "1991"]);
        assert!(diagnostics.entries().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_over_http() {
        let (base_url, _server) = serve_once("200 OK", "<html>oops</html>".to_string()).await;

        let diagnostics = RecordingDiagnostics::default();
        let mut renderer = ChartRenderer::new(
            IndicatorClient::new(base_url),
            RecordingSurface::default(),
            &diagnostics,
            COUNTRY,
            INDICATOR,
        );

        match renderer.run().await {
            RenderOutcome::Failed(ChartError::Fetch(ApiError::DeserializationError(_))) => {}
            other => panic!("expected parse failure, got {:?}", other),
        }
        assert_eq!(diagnostics.entries().len(), 1);
        assert!(renderer.surface().drawn.is_empty());
    }

    #[tokio::test]
    async fn test_refused_connection_over_http() {
        let diagnostics = RecordingDiagnostics::default();
        let mut renderer = ChartRenderer::new(
            IndicatorClient::new(refused_base_url().await),
            RecordingSurface::default(),
            &diagnostics,
            COUNTRY,
            INDICATOR,
        );

        assert!(matches!(renderer.run().await, RenderOutcome::Failed(_)));
        assert_eq!(diagnostics.entries().len(), 1);
        assert!(renderer.surface().drawn.is_empty());
    }

    /// Collects WARN and ERROR events emitted by this crate
    #[derive(Clone, Default)]
    struct WarnCollector {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl<S: tracing::Subscriber> Layer<S> for WarnCollector {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: LayerContext<'_, S>) {
            let meta = event.metadata();
            if *meta.level() <= Level::WARN && meta.target().starts_with("indicator_chart") {
                self.events
                    .lock()
                    .unwrap()
                    .push(format!("{} {}", meta.level(), meta.target()));
            }
        }
    }

    #[tokio::test]
    async fn test_http_error_is_logged_once() {
        let collector = WarnCollector::default();
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(collector.clone()));

        let (base_url, _server) =
            serve_once("500 Internal Server Error", r#"{"detail":"Internal server error"}"#.to_string()).await;
        let mut renderer = ChartRenderer::new(
            IndicatorClient::new(base_url),
            RecordingSurface::default(),
            TracingDiagnostics,
            COUNTRY,
            INDICATOR,
        );

        match renderer.run().await {
            RenderOutcome::Failed(ChartError::Fetch(ApiError::HttpError(500, _))) => {}
            other => panic!("expected HTTP failure, got {:?}", other),
        }
        assert!(renderer.surface().drawn.is_empty());

        let events = collector.events.lock().unwrap().clone();
        assert_eq!(events, vec!["ERROR indicator_chart::utils::diagnostics"]);
    }
}
