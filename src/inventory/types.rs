// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wire types for the NetBox IP address listing.

use crate::records::InventoryRecord;
use serde::Deserialize;

/// One page of `GET /api/ipam/ip-addresses/`.
#[derive(Debug, Clone, Deserialize)]
pub struct IpAddressPage {
    /// Total number of objects across all pages
    #[serde(default)]
    pub count: Option<u64>,
    /// Absolute URL of the next page, if any
    #[serde(default)]
    pub next: Option<String>,
    /// Objects on this page
    pub results: Vec<IpAddressEntry>,
}

/// IP address object fields used by zonesync. Everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IpAddressEntry {
    /// CIDR address, e.g. `10.0.0.5/24`
    pub address: String,
    /// Assigned DNS name; older NetBox versions may send `null`
    #[serde(default)]
    pub dns_name: Option<String>,
}

impl From<IpAddressEntry> for InventoryRecord {
    fn from(entry: IpAddressEntry) -> Self {
        Self {
            dns_name: entry.dns_name.unwrap_or_default(),
            address: entry.address,
        }
    }
}
