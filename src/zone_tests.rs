// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for zone matching, rendering and writing.

#[cfg(test)]
mod tests {
    use crate::errors::SyncError;
    use crate::records::DnsBinding;
    use crate::zone::{render_zone, zone_matches, ZoneWriter};
    use tempfile::TempDir;

    fn binding(name: &str, ip: &str) -> DnsBinding {
        DnsBinding {
            name: name.to_string(),
            ip: ip.to_string(),
        }
    }

    // =====================================================
    // Zone Matching Tests
    // =====================================================

    #[test]
    fn test_zone_matches_subdomain() {
        assert!(zone_matches("example.com", "host.example.com"));
    }

    #[test]
    fn test_zone_matches_other_domain() {
        assert!(!zone_matches("example.com", "host.other.com"));
    }

    #[test]
    fn test_zone_matches_is_literal_suffix() {
        // No label boundary check
        assert!(zone_matches("example.com", "notexample.com"));
    }

    #[test]
    fn test_zone_matches_apex() {
        assert!(zone_matches("example.com", "example.com"));
    }

    #[test]
    fn test_zone_matches_is_case_sensitive() {
        assert!(!zone_matches("example.com", "host.EXAMPLE.COM"));
    }

    // =====================================================
    // Rendering Tests
    // =====================================================

    #[test]
    fn test_render_single_a_record() {
        let bindings = vec![binding("a.example.com", "10.0.0.1")];
        assert_eq!(
            render_zone("example.com", &bindings).unwrap(),
            "a.example.com. IN A 10.0.0.1\n"
        );
    }

    #[test]
    fn test_render_aaaa_record() {
        let bindings = vec![binding("b.example.org", "fe80::1")];
        assert_eq!(
            render_zone("example.org", &bindings).unwrap(),
            "b.example.org. IN AAAA fe80::1\n"
        );
    }

    #[test]
    fn test_render_filters_and_keeps_order() {
        let bindings = vec![
            binding("z.example.com", "10.0.0.9"),
            binding("x.example.org", "10.0.1.1"),
            binding("a.example.com", "2001:db8::1"),
            binding("m.example.com", "10.0.0.5"),
        ];

        assert_eq!(
            render_zone("example.com", &bindings).unwrap(),
            "z.example.com. IN A 10.0.0.9\n\
             a.example.com. IN AAAA 2001:db8::1\n\
             m.example.com. IN A 10.0.0.5\n"
        );
    }

    #[test]
    fn test_render_duplicate_names_are_kept() {
        let bindings = vec![
            binding("dual.example.com", "10.0.0.1"),
            binding("dual.example.com", "2001:db8::1"),
        ];

        assert_eq!(
            render_zone("example.com", &bindings).unwrap(),
            "dual.example.com. IN A 10.0.0.1\ndual.example.com. IN AAAA 2001:db8::1\n"
        );
    }

    #[test]
    fn test_render_no_matches_is_empty() {
        let bindings = vec![binding("host.other.com", "10.0.0.1")];
        assert_eq!(render_zone("example.com", &bindings).unwrap(), "");
        assert_eq!(render_zone("example.com", &[]).unwrap(), "");
    }

    #[test]
    fn test_render_is_idempotent() {
        let bindings = vec![
            binding("a.example.com", "10.0.0.1"),
            binding("b.example.com", "fe80::1"),
        ];

        let first = render_zone("example.com", &bindings).unwrap();
        let second = render_zone("example.com", &bindings).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_render_invalid_address_fails() {
        let bindings = vec![
            binding("good.example.com", "10.0.0.1"),
            binding("bad.example.com", "not-an-ip"),
        ];

        let err = render_zone("example.com", &bindings).unwrap_err();
        assert!(matches!(err, SyncError::InvalidAddress { ref ip, .. } if ip == "not-an-ip"));
    }

    #[test]
    fn test_render_rejects_name_that_would_add_a_line() {
        let bindings = vec![
            binding("good.example.com", "10.0.0.1"),
            binding("evil.example.com. IN A 6.6.6.6\nx.example.com", "10.0.0.2"),
        ];

        let err = render_zone("example.com", &bindings).unwrap_err();
        assert!(matches!(err, SyncError::InvalidName { .. }));
        assert_eq!(err.kind(), "InvalidName");
    }

    #[test]
    fn test_render_ignores_invalid_address_outside_zone() {
        let bindings = vec![
            binding("good.example.com", "10.0.0.1"),
            binding("bad.example.org", "not-an-ip"),
        ];

        assert_eq!(
            render_zone("example.com", &bindings).unwrap(),
            "good.example.com. IN A 10.0.0.1\n"
        );
    }

    // =====================================================
    // Writer Tests
    // =====================================================

    #[test]
    fn test_path_for_zone() {
        let writer = ZoneWriter::new("/var/named");
        assert_eq!(
            writer.path_for("example.com"),
            std::path::PathBuf::from("/var/named/example.com.zone")
        );
    }

    #[test]
    fn test_write_creates_zone_file() {
        let dir = TempDir::new().unwrap();
        let writer = ZoneWriter::new(dir.path());

        let path = writer
            .write("example.com", "a.example.com. IN A 10.0.0.1\n")
            .unwrap();

        assert_eq!(path, dir.path().join("example.com.zone"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "a.example.com. IN A 10.0.0.1\n"
        );
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let dir = TempDir::new().unwrap();
        let writer = ZoneWriter::new(dir.path());
        let path = dir.path().join("example.com.zone");
        std::fs::write(&path, "old.example.com. IN A 10.9.9.9\nstale line\n").unwrap();

        writer
            .write("example.com", "new.example.com. IN A 10.0.0.1\n")
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "new.example.com. IN A 10.0.0.1\n"
        );
    }

    #[test]
    fn test_write_empty_text_produces_zero_byte_file() {
        let dir = TempDir::new().unwrap();
        let writer = ZoneWriter::new(dir.path());

        let path = writer.write("empty.example", "").unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_write_leaves_no_temporary_files() {
        let dir = TempDir::new().unwrap();
        let writer = ZoneWriter::new(dir.path());

        writer.write("example.com", "a.example.com. IN A 10.0.0.1\n").unwrap();
        writer.write("example.org", "").unwrap();

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["example.com.zone", "example.org.zone"]);
    }

    #[test]
    fn test_write_creates_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("zones").join("generated");
        let writer = ZoneWriter::new(&nested);

        let path = writer.write("example.com", "").unwrap();

        assert!(path.exists());
        assert_eq!(writer.output_dir(), nested.as_path());
    }

    #[test]
    fn test_write_fails_when_output_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let writer = ZoneWriter::new(&blocker);

        let err = writer.write("example.com", "").unwrap_err();

        match err {
            SyncError::WriteFailure { path, .. } => {
                assert!(path.ends_with("example.com.zone"));
            }
            other => panic!("expected WriteFailure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_write_sets_readable_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let writer = ZoneWriter::new(dir.path());

        let path = writer.write("example.com", "").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
