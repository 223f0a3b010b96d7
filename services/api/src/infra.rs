use metrics_exporter_prometheus::PrometheusHandle;
use safetrip::catalog::Catalog;
use safetrip::config::AppConfig;
use safetrip::error::AppError;
use safetrip::telemetry::{self, LogOutput};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Configuration, stderr logging and catalog for one-shot CLI commands, keeping stdout
/// free for command output.
pub(crate) fn command_catalog() -> Result<Catalog, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogOutput::Stderr)?;
    Ok(Catalog::load(&config.catalog)?)
}
