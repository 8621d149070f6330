//! Backend entry-point: serves the CRM dashboard, its JSON API and probes.

mod server;

use std::ffi::OsString;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crm_backend::config::ServerSettings;
use crm_backend::inbound::http::health::HealthState;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter([OsString::from("crm-backend")])
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr();
    #[cfg(not(feature = "metrics"))]
    let config = ServerConfig::new(bind_addr);
    #[cfg(feature = "metrics")]
    let config = ServerConfig::new(bind_addr, make_metrics()?);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server listening");
    server.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("crm")
        .endpoint("/metrics")
        .build()
        .map_err(|error| std::io::Error::other(format!("build Prometheus metrics: {error}")))
}
