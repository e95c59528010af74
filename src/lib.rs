// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # zonesync - DNS zone files from NetBox IPAM
//!
//! zonesync reads every IP address with an assigned DNS name from the NetBox
//! IPAM API and writes one flat zone file per configured zone suffix. It is
//! meant to be triggered over HTTP after IPAM changes; the DNS server itself
//! loads or includes the generated files.
//!
//! ## Modules
//!
//! - [`inventory`] - NetBox API client and credential scope
//! - [`records`] - Address records, extraction and A/AAAA classification
//! - [`zone`] - Zone matching, rendering and zone file writes
//! - [`sync`] - The pipeline tying the above together
//! - [`server`] - HTTP trigger endpoint
//! - [`config`] - Command line and environment configuration
//! - [`errors`] - Error types
//! - [`metrics`] - Prometheus metrics
//!
//! ## Example
//!
//! ```rust,no_run
//! use url::Url;
//! use zonesync::inventory::InventoryClient;
//! use zonesync::sync::ZoneSync;
//! use zonesync::zone::ZoneWriter;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = InventoryClient::new(
//!     Url::parse("https://netbox.example.com")?,
//!     std::env::var("NETBOX_API_TOKEN")?,
//!     None,
//! )?;
//!
//! let sync = ZoneSync::new(
//!     client,
//!     vec!["example.com".to_string(), "example.org".to_string()],
//!     ZoneWriter::new("/var/named/generated"),
//! );
//!
//! let report = sync.run().await?;
//! for zone in report.zones {
//!     println!("{}: {} records", zone.zone, zone.records);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Zone File Format
//!
//! Each file is named `<zone>.zone` and contains only lines of the form
//! `<fqdn>. IN <A|AAAA> <address>`, in inventory order.

pub mod config;
pub mod constants;
pub mod errors;
pub mod inventory;
pub mod metrics;
pub mod records;
pub mod server;
pub mod sync;
pub mod zone;
