// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for zonesync.
//!
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Inventory API Constants
// ============================================================================

/// Path of the NetBox IP address listing, relative to the base URL
pub const IP_ADDRESSES_PATH: &str = "api/ipam/ip-addresses/";

/// Query parameter controlling the NetBox page size
pub const PAGE_LIMIT_PARAM: &str = "limit";

/// Page size value asking NetBox for the whole result set in one page
pub const PAGE_LIMIT_UNLIMITED: &str = "0";

/// Scheme used in the `Authorization` header sent to NetBox
pub const AUTH_SCHEME: &str = "Token";

// ============================================================================
// Zone File Constants
// ============================================================================

/// Extension appended to the zone name to form the zone file name
pub const ZONE_FILE_EXTENSION: &str = "zone";

/// DNS class written on every record line
pub const DNS_CLASS_IN: &str = "IN";

/// Unix permissions of generated zone files
#[cfg(unix)]
pub const ZONE_FILE_MODE: u32 = 0o644;

// ============================================================================
// Runtime Constants
// ============================================================================

/// Default address for the trigger endpoint
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Default directory zone files are written to
pub const DEFAULT_ZONE_DIR: &str = ".";

/// Number of tokio worker threads
pub const TOKIO_WORKER_THREADS: usize = 2;

/// Body returned by the trigger endpoint after a successful run
pub const TRIGGER_OK_BODY: &str = "OK";
