// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone file generation.
//!
//! A zone file holds one line per address record and nothing else:
//!
//! ```text
//! a.example.com. IN A 10.0.0.1
//! b.example.com. IN AAAA 2001:db8::1
//! ```
//!
//! No SOA, NS, TTL or comments are written.
//!
//! # Example
//!
//! ```rust
//! use zonesync::records::DnsBinding;
//! use zonesync::zone::render_zone;
//!
//! let bindings = vec![DnsBinding {
//!     name: "a.example.com".to_string(),
//!     ip: "10.0.0.1".to_string(),
//! }];
//!
//! let text = render_zone("example.com", &bindings).unwrap();
//! assert_eq!(text, "a.example.com. IN A 10.0.0.1\n");
//! ```

use crate::constants::{DNS_CLASS_IN, ZONE_FILE_EXTENSION};
use crate::errors::SyncError;
use crate::records::{check_name, classify, DnsBinding};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Returns true if `dns_name` belongs to `zone`.
///
/// This is a literal, case-sensitive suffix match with no label boundary
/// check: `notexample.com` belongs to `example.com`.
#[must_use]
pub fn zone_matches(zone: &str, dns_name: &str) -> bool {
    dns_name.ends_with(zone)
}

/// Render the zone file text for `zone`.
///
/// Bindings are filtered with [`zone_matches`] and emitted in input order as
/// `<name>. IN <A|AAAA> <ip>\n`. No matching bindings yields an empty string.
///
/// # Errors
///
/// Returns [`SyncError::InvalidName`] or [`SyncError::InvalidAddress`] for the
/// first matching binding whose name contains whitespace or control
/// characters, or whose address is not an IP literal. No partial text is
/// returned.
pub fn render_zone(zone: &str, bindings: &[DnsBinding]) -> Result<String, SyncError> {
    let mut text = String::new();

    for binding in bindings.iter().filter(|b| zone_matches(zone, &b.name)) {
        check_name(binding)?;
        let record_type = classify(binding)?;
        text.push_str(&format!(
            "{}. {DNS_CLASS_IN} {record_type} {}\n",
            binding.name, binding.ip
        ));
    }

    Ok(text)
}

/// Writes rendered zone text to `<output_dir>/<zone>.zone`.
#[derive(Debug, Clone)]
pub struct ZoneWriter {
    output_dir: PathBuf,
}

impl ZoneWriter {
    /// Create a writer for the given output directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory zone files are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the zone file for `zone`.
    #[must_use]
    pub fn path_for(&self, zone: &str) -> PathBuf {
        self.output_dir
            .join(format!("{zone}.{ZONE_FILE_EXTENSION}"))
    }

    /// Replace the zone file for `zone` with `text`.
    ///
    /// The text goes to a temporary file in the output directory which is then
    /// renamed over the destination, so readers see either the old or the new
    /// content. The output directory is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::WriteFailure`] if the directory, the temporary
    /// file or the rename fails.
    pub fn write(&self, zone: &str, text: &str) -> Result<PathBuf, SyncError> {
        let path = self.path_for(zone);
        let failure = |reason: String| SyncError::WriteFailure {
            path: path.display().to_string(),
            reason,
        };

        std::fs::create_dir_all(&self.output_dir).map_err(|e| failure(e.to_string()))?;

        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{zone}."))
            .suffix(".tmp")
            .tempfile_in(&self.output_dir)
            .map_err(|e| failure(e.to_string()))?;

        tmp.write_all(text.as_bytes())
            .and_then(|()| set_zone_file_mode(tmp.as_file()))
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| failure(e.to_string()))?;

        tmp.persist(&path).map_err(|e| failure(e.error.to_string()))?;

        debug!(
            zone = %zone,
            path = %path.display(),
            bytes = text.len(),
            "Zone file written"
        );

        Ok(path)
    }
}

#[cfg(unix)]
fn set_zone_file_mode(file: &std::fs::File) -> std::io::Result<()> {
    use crate::constants::ZONE_FILE_MODE;
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(std::fs::Permissions::from_mode(ZONE_FILE_MODE))
}

#[cfg(not(unix))]
fn set_zone_file_mode(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "zone_tests.rs"]
mod zone_tests;
