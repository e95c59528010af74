// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone synchronization pipeline.
//!
//! One run fetches the inventory once, extracts the DNS bindings once, then
//! renders and writes every configured zone in order. The first error aborts
//! the run; zones written before the failure keep their new content and the
//! failing zone and all later zones keep their previous content.

use crate::errors::SyncError;
use crate::inventory::InventorySource;
use crate::metrics;
use crate::records::extract;
use crate::zone::{render_zone, ZoneWriter};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info};

/// Outcome of one zone in a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneReport {
    /// Zone name
    pub zone: String,
    /// Zone file that was written
    pub path: PathBuf,
    /// Number of record lines written
    pub records: usize,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Address records returned by the inventory
    pub records_fetched: usize,
    /// Records that carried a DNS name
    pub bindings: usize,
    /// One entry per configured zone, in configured order
    pub zones: Vec<ZoneReport>,
}

/// Drives the pipeline for a fixed list of zones.
#[derive(Debug, Clone)]
pub struct ZoneSync<S> {
    source: S,
    zones: Vec<String>,
    writer: ZoneWriter,
}

impl<S: InventorySource> ZoneSync<S> {
    /// Create a pipeline reading from `source` and writing through `writer`.
    pub fn new(source: S, zones: Vec<String>, writer: ZoneWriter) -> Self {
        Self {
            source,
            zones,
            writer,
        }
    }

    /// Configured zones, in processing order.
    #[must_use]
    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    /// Execute one full run.
    ///
    /// # Errors
    ///
    /// Returns the first [`SyncError`] raised by the inventory fetch, by
    /// rendering a zone, or by writing a zone file.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let start = Instant::now();

        match self.run_inner().await {
            Ok(report) => {
                let duration = start.elapsed();
                metrics::record_run_success(duration);
                info!(
                    zones = report.zones.len(),
                    records_fetched = report.records_fetched,
                    bindings = report.bindings,
                    elapsed = ?duration,
                    "Zone synchronization completed"
                );
                Ok(report)
            }
            Err(e) => {
                let duration = start.elapsed();
                metrics::record_run_error(e.kind(), duration);
                error!(
                    kind = e.kind(),
                    error = %e,
                    elapsed = ?duration,
                    "Zone synchronization failed"
                );
                Err(e)
            }
        }
    }

    async fn run_inner(&self) -> Result<SyncReport, SyncError> {
        info!(zones = ?self.zones, "Starting zone synchronization");

        let records = self.source.fetch_all().await?;
        let bindings = extract(&records);
        metrics::record_inventory_size(records.len(), bindings.len());

        debug!(
            records_fetched = records.len(),
            bindings = bindings.len(),
            "Extracted DNS bindings from inventory"
        );

        let mut zones = Vec::with_capacity(self.zones.len());
        for zone in &self.zones {
            let text = render_zone(zone, &bindings)?;
            let record_count = text.lines().count();
            let path = self.writer.write(zone, &text)?;
            metrics::record_zone_written(zone, record_count);

            info!(
                zone = %zone,
                path = %path.display(),
                records = record_count,
                "Zone file updated"
            );

            zones.push(ZoneReport {
                zone: zone.clone(),
                path,
                records: record_count,
            });
        }

        Ok(SyncReport {
            records_fetched: records.len(),
            bindings: bindings.len(),
            zones,
        })
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod sync_tests;
