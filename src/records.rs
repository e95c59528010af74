// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Address records and their DNS record type.
//!
//! Raw [`InventoryRecord`]s come from the inventory API. [`extract`] keeps the
//! ones that carry a DNS name and turns them into [`DnsBinding`]s, and
//! [`classify`] picks the record type for a binding's address.

use crate::errors::SyncError;
use serde::Deserialize;
use std::fmt;
use std::net::IpAddr;

/// One IP address object as returned by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryRecord {
    /// DNS name assigned to the address; empty when unassigned
    pub dns_name: String,
    /// Address in CIDR notation, e.g. `10.0.0.5/24`
    pub address: String,
}

impl InventoryRecord {
    /// Create a record from a DNS name and a CIDR address.
    pub fn new(dns_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            dns_name: dns_name.into(),
            address: address.into(),
        }
    }
}

/// A DNS name bound to a bare address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsBinding {
    /// Non-empty DNS name
    pub name: String,
    /// Address without its prefix length
    pub ip: String,
}

/// Address record types written to zone files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// IPv6 address record
    AAAA,
}

impl RecordType {
    /// Record type mnemonic as written in zone files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AAAA => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turn raw inventory records into DNS bindings.
///
/// Records with an empty DNS name are dropped. The prefix length (everything
/// from the first `/`) is stripped from the address; the remainder is not
/// validated here. Input order is preserved.
#[must_use]
pub fn extract(records: &[InventoryRecord]) -> Vec<DnsBinding> {
    records
        .iter()
        .filter(|record| !record.dns_name.is_empty())
        .map(|record| DnsBinding {
            name: record.dns_name.clone(),
            ip: strip_prefix_length(&record.address).to_string(),
        })
        .collect()
}

fn strip_prefix_length(address: &str) -> &str {
    address
        .split_once('/')
        .map_or(address, |(addr, _prefix)| addr)
}

/// Check that a binding's DNS name fits on a single zone file line.
///
/// # Errors
///
/// Returns [`SyncError::InvalidName`] if the name contains whitespace or
/// control characters.
pub fn check_name(binding: &DnsBinding) -> Result<(), SyncError> {
    if binding
        .name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(SyncError::InvalidName {
            name: binding.name.clone(),
        });
    }
    Ok(())
}

/// Determine the record type for an address literal.
///
/// # Errors
///
/// Returns [`SyncError::InvalidAddress`] if `binding.ip` is neither an IPv4
/// nor an IPv6 literal.
pub fn classify(binding: &DnsBinding) -> Result<RecordType, SyncError> {
    match binding.ip.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => Ok(RecordType::A),
        Ok(IpAddr::V6(_)) => Ok(RecordType::AAAA),
        Err(_) => Err(SyncError::InvalidAddress {
            name: binding.name.clone(),
            ip: binding.ip.clone(),
        }),
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod records_tests;
