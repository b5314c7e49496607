use super::errors::{ChartError, FailureKind};
use tracing::error;

/// Where render failures are reported
pub trait Diagnostics: Send + Sync {
    fn report(&self, err: &ChartError);
}

/// Reports each failure as one `tracing` error event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, err: &ChartError) {
        match err.kind() {
            FailureKind::NetworkOrParse => error!("Error fetching indicator data: {}", err),
            FailureKind::MissingData => error!("Indicator data unavailable: {}", err),
            FailureKind::Render => error!("{}", err),
        }
    }
}
