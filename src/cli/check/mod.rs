//! Check command - configuration and verse index health report

use std::time::Instant;

use anyhow::{bail, Context};
use clap::Args;
use serde::Serialize;

use crate::config::AppConfig;
use crate::infrastructure::logging;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Pretty-print the report JSON
    #[arg(long)]
    pub pretty: bool,
}

/// Overall health report
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub checks: Vec<HealthCheck>,
    pub latency_ms: u64,
}

/// Health check status
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual component health check
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl HealthCheck {
    fn healthy(name: &str, latency_ms: Option<u64>) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Healthy,
            message: None,
            latency_ms,
        }
    }

    fn failed(name: &str, status: HealthStatus, message: String, latency_ms: Option<u64>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: Some(message),
            latency_ms,
        }
    }
}

/// Print the health report; exits non-zero when unhealthy
pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    let report = build_report(&config).await;
    println!("{}", crate::cli::to_json(&report, args.pretty)?);

    if report.status == HealthStatus::Unhealthy {
        bail!("Health check failed");
    }

    Ok(())
}

pub async fn build_report(config: &AppConfig) -> HealthReport {
    let start = Instant::now();
    let mut checks = Vec::new();

    checks.push(match config.check() {
        Ok(()) => HealthCheck::healthy("configuration", None),
        Err(e) => HealthCheck::failed("configuration", HealthStatus::Unhealthy, e.to_string(), None),
    });

    // Keys only matter for validation runs; the index can still be checked
    checks.push(match config.require_api_keys() {
        Ok(()) => HealthCheck::healthy("api_keys", None),
        Err(e) => HealthCheck::failed("api_keys", HealthStatus::Degraded, e.to_string(), None),
    });

    checks.push(check_verse_index(config).await);

    let status = checks
        .iter()
        .map(|c| c.status)
        .fold(HealthStatus::Healthy, worst);

    HealthReport {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
        latency_ms: start.elapsed().as_millis() as u64,
    }
}

async fn check_verse_index(config: &AppConfig) -> HealthCheck {
    let start = Instant::now();

    let index = match crate::build_verse_index(config) {
        Ok(index) => index,
        Err(e) => {
            return HealthCheck::failed(
                "verse_index",
                HealthStatus::Unhealthy,
                format!("{:#}", e),
                Some(start.elapsed().as_millis() as u64),
            );
        }
    };

    let name = format!("verse_index:{}", index.index_name());
    match index.health_check().await {
        Ok(()) => HealthCheck::healthy(&name, Some(start.elapsed().as_millis() as u64)),
        Err(e) => HealthCheck::failed(
            &name,
            HealthStatus::Unhealthy,
            e.to_string(),
            Some(start.elapsed().as_millis() as u64),
        ),
    }
}

fn worst(a: HealthStatus, b: HealthStatus) -> HealthStatus {
    use HealthStatus::*;
    match (a, b) {
        (Unhealthy, _) | (_, Unhealthy) => Unhealthy,
        (Degraded, _) | (_, Degraded) => Degraded,
        _ => Healthy,
    }
}
