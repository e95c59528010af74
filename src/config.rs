// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command line and environment configuration.
//!
//! Every option can be given as a flag or through its environment variable:
//!
//! | Flag | Environment | Default |
//! |------|-------------|---------|
//! | `--netbox-url` | `NETBOX_BASE_URL` | required |
//! | `--netbox-token` | `NETBOX_API_TOKEN` | required |
//! | `--zones` | `ZONES` | required |
//! | `--zone-dir` | `ZONE_DIR` | `.` |
//! | `--listen` | `LISTEN_ADDR` | `0.0.0.0:5000` |
//! | `--inventory-timeout-secs` | `INVENTORY_TIMEOUT_SECS` | none |
//! | `--once` | | off |

use crate::constants::{DEFAULT_LISTEN_ADDR, DEFAULT_ZONE_DIR};
use crate::errors::ConfigError;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Generate DNS zone files from NetBox IPAM address records.
#[derive(Parser, Clone)]
#[command(name = "zonesync", version, about, long_about = None)]
pub struct Cli {
    /// NetBox base URL, e.g. `https://netbox.example.com`
    #[arg(long, env = "NETBOX_BASE_URL")]
    pub netbox_url: String,

    /// NetBox API token
    #[arg(long, env = "NETBOX_API_TOKEN", hide_env_values = true)]
    pub netbox_token: String,

    /// Comma-separated zone suffixes to generate, e.g. `example.com,example.org`
    #[arg(long, env = "ZONES")]
    pub zones: String,

    /// Directory zone files are written to
    #[arg(long, env = "ZONE_DIR", default_value = DEFAULT_ZONE_DIR)]
    pub zone_dir: PathBuf,

    /// Address the trigger endpoint listens on
    #[arg(long, env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: SocketAddr,

    /// Timeout for inventory requests in seconds (no timeout when unset)
    #[arg(long, env = "INVENTORY_TIMEOUT_SECS")]
    pub inventory_timeout_secs: Option<u64>,

    /// Run the pipeline once and exit instead of serving the trigger endpoint
    #[arg(long)]
    pub once: bool,
}

/// Validated runtime settings.
#[derive(Clone)]
pub struct Settings {
    /// Inventory base URL
    pub netbox_url: Url,
    /// Inventory credential
    pub netbox_token: String,
    /// Zones in configured order
    pub zones: Vec<String>,
    /// Output directory for zone files
    pub zone_dir: PathBuf,
    /// Trigger listen address
    pub listen: SocketAddr,
    /// Optional inventory request timeout
    pub inventory_timeout: Option<Duration>,
    /// Single-run mode
    pub once: bool,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("netbox_url", &self.netbox_url.as_str())
            .field("netbox_token", &"<redacted>")
            .field("zones", &self.zones)
            .field("zone_dir", &self.zone_dir)
            .field("listen", &self.listen)
            .field("inventory_timeout", &self.inventory_timeout)
            .field("once", &self.once)
            .finish()
    }
}

impl TryFrom<Cli> for Settings {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        Ok(Self {
            netbox_url: parse_base_url(&cli.netbox_url)?,
            netbox_token: cli.netbox_token,
            zones: parse_zones(&cli.zones)?,
            zone_dir: cli.zone_dir,
            listen: cli.listen,
            inventory_timeout: cli.inventory_timeout_secs.map(Duration::from_secs),
            once: cli.once,
        })
    }
}

/// Parse the inventory base URL.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] unless `value` is an absolute
/// `http` or `https` URL with a host.
pub fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: value.to_string(),
        reason,
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}

/// Split a comma-separated zone list.
///
/// Entries are trimmed and empty entries are dropped; order is preserved.
///
/// # Errors
///
/// Returns [`ConfigError::NoZones`] if nothing is left, or
/// [`ConfigError::InvalidZone`] for a zone that cannot be used as a file name.
///
/// # Example
///
/// ```rust
/// use zonesync::config::parse_zones;
///
/// let zones = parse_zones("example.com, example.org,").unwrap();
/// assert_eq!(zones, vec!["example.com", "example.org"]);
/// ```
pub fn parse_zones(value: &str) -> Result<Vec<String>, ConfigError> {
    let zones: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|zone| !zone.is_empty())
        .map(str::to_string)
        .collect();

    if zones.is_empty() {
        return Err(ConfigError::NoZones);
    }

    for zone in &zones {
        validate_zone(zone)?;
    }

    Ok(zones)
}

fn validate_zone(zone: &str) -> Result<(), ConfigError> {
    let reason = if zone.contains('/') || zone.contains('\\') {
        "contains a path separator"
    } else if zone == "." || zone == ".." {
        "is not a valid file name"
    } else if zone.chars().any(char::is_control) {
        "contains control characters"
    } else {
        return Ok(());
    };

    Err(ConfigError::InvalidZone {
        zone: zone.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
