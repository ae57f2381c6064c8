//! Best-effort public IP lookup for export footers.
//!
//! The lookup never fails from the caller's point of view: any error or
//! timeout yields the configured placeholder.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Settings for the diagnostic lookup.
#[derive(Debug, Clone)]
pub struct DiagnosticConfig {
    /// Perform the lookup at all.
    pub enabled: bool,
    /// Endpoint returning `{"ip": "..."}`.
    pub url: String,
    /// Hard deadline for the whole lookup.
    pub timeout: Duration,
    /// Value used when the lookup is disabled or fails.
    pub placeholder: String,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://api.ipify.org?format=json".to_string(),
            timeout: Duration::from_secs(5),
            placeholder: "N/A".to_string(),
        }
    }
}

impl From<&crate::config::ExportConfig> for DiagnosticConfig {
    fn from(config: &crate::config::ExportConfig) -> Self {
        Self {
            enabled: config.ip_lookup,
            url: config.ip_lookup_url.clone(),
            timeout: Duration::from_secs(config.ip_lookup_timeout_seconds),
            placeholder: config.placeholder.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

/// Look up the public IP address, or return the placeholder.
pub async fn lookup_public_ip(config: &DiagnosticConfig) -> String {
    if !config.enabled {
        debug!("IP lookup disabled, using placeholder");
        return config.placeholder.clone();
    }

    match tokio::time::timeout(config.timeout, fetch_ip(config)).await {
        Ok(Ok(ip)) => {
            debug!("Resolved public IP: {}", ip);
            ip
        }
        Ok(Err(e)) => {
            warn!("Could not fetch IP: {:#}", e);
            config.placeholder.clone()
        }
        Err(_) => {
            warn!(
                "IP lookup timed out after {}ms",
                config.timeout.as_millis()
            );
            config.placeholder.clone()
        }
    }
}

async fn fetch_ip(config: &DiagnosticConfig) -> Result<String> {
    // A proxy would report its own address, not ours.
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .no_proxy()
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(&config.url)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", config.url))?;

    if !response.status().is_success() {
        anyhow::bail!("IP service returned {}", response.status());
    }

    let body: IpResponse = response
        .json()
        .await
        .context("Failed to parse IP service response")?;

    let ip = body.ip.trim().to_string();
    if ip.is_empty() {
        anyhow::bail!("IP service returned an empty address");
    }

    Ok(ip)
}
