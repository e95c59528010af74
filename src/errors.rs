// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the zone synchronization pipeline.
//!
//! This module provides specialized error types for:
//! - Inventory (NetBox) API failures
//! - Addresses that cannot be rendered as A or AAAA records
//! - DNS names that would break the one-record-per-line format
//! - Zone file write failures
//! - Startup configuration problems
//!
//! Every pipeline error is fatal to the run that raised it. The trigger
//! endpoint reports [`SyncError::kind`] to its caller.

use thiserror::Error;

/// Errors raised while fetching address records from the inventory API.
///
/// All variants are reported as the `InventoryUnavailable` kind.
#[derive(Error, Debug, Clone)]
pub enum InventoryError {
    /// The request never produced an HTTP response (DNS, TCP, TLS or timeout)
    #[error("Failed to reach inventory at {url}: {reason}")]
    RequestFailed {
        /// URL that was requested
        url: String,
        /// Transport error description
        reason: String,
    },

    /// The inventory answered with a non-success HTTP status
    #[error("Inventory at {url} returned HTTP {status}: {body}")]
    UnexpectedStatus {
        /// URL that was requested
        url: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The response body was not the expected JSON document
    #[error("Inventory at {url} returned a malformed body (HTTP {status}): {reason}: {body}")]
    MalformedBody {
        /// URL that was requested
        url: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
        /// Decoder error description
        reason: String,
    },
}

impl InventoryError {
    /// HTTP status of the upstream response, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { .. } => None,
            Self::UnexpectedStatus { status, .. } | Self::MalformedBody { status, .. } => {
                Some(*status)
            }
        }
    }

    /// Raw upstream response body, if one was received.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { .. } => None,
            Self::UnexpectedStatus { body, .. } | Self::MalformedBody { body, .. } => {
                Some(body.as_str())
            }
        }
    }
}

/// Composite error type returned by the pipeline.
#[derive(Error, Debug, Clone)]
pub enum SyncError {
    /// The inventory could not be fetched
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// An address is neither an IPv4 nor an IPv6 literal
    #[error("Invalid address '{ip}' for DNS name '{name}'")]
    InvalidAddress {
        /// DNS name the address is bound to
        name: String,
        /// The address as received from the inventory
        ip: String,
    },

    /// A DNS name cannot be written as a single zone file line
    #[error("Invalid DNS name '{}'", .name.escape_debug())]
    InvalidName {
        /// The name as received from the inventory
        name: String,
    },

    /// A zone file could not be created or written
    #[error("Failed to write zone file {path}: {reason}")]
    WriteFailure {
        /// Destination path
        path: String,
        /// I/O error description
        reason: String,
    },
}

impl SyncError {
    /// Stable name of the failure kind.
    ///
    /// Used as the trigger response body and as the `kind` metric label.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inventory(_) => "InventoryUnavailable",
            Self::InvalidAddress { .. } => "InvalidAddress",
            Self::InvalidName { .. } => "InvalidName",
            Self::WriteFailure { .. } => "WriteFailure",
        }
    }

    /// Returns true if the failure may go away on a later run.
    ///
    /// Inventory failures are transient; bad inventory data and local write
    /// failures need an operator.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Inventory(_) => true,
            Self::InvalidAddress { .. }
            | Self::InvalidName { .. }
            | Self::WriteFailure { .. } => false,
        }
    }
}

/// Errors raised while validating startup configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The inventory base URL is not an absolute http(s) URL
    #[error("Invalid inventory base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The configured value
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The zone list contained no usable entries
    #[error("No zones configured")]
    NoZones,

    /// A zone name cannot be used as a file name
    #[error("Invalid zone '{zone}': {reason}")]
    InvalidZone {
        /// The configured zone
        zone: String,
        /// Why it was rejected
        reason: String,
    },
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
