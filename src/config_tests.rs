// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `config.rs`

#[cfg(test)]
mod tests {
    use crate::config::{parse_base_url, parse_zones, Cli, Settings};
    use crate::errors::ConfigError;
    use clap::Parser;
    use std::path::PathBuf;
    use std::time::Duration;

    // =====================================================
    // Zone List Tests
    // =====================================================

    #[test]
    fn test_parse_zones_keeps_order() {
        assert_eq!(
            parse_zones("example.com,example.org,lab.internal").unwrap(),
            vec!["example.com", "example.org", "lab.internal"]
        );
    }

    #[test]
    fn test_parse_zones_single() {
        assert_eq!(parse_zones("example.com").unwrap(), vec!["example.com"]);
    }

    #[test]
    fn test_parse_zones_trims_and_drops_empty_entries() {
        assert_eq!(
            parse_zones(" example.com , ,example.org,").unwrap(),
            vec!["example.com", "example.org"]
        );
    }

    #[test]
    fn test_parse_zones_empty_is_error() {
        assert_eq!(parse_zones(""), Err(ConfigError::NoZones));
        assert_eq!(parse_zones(" , ,"), Err(ConfigError::NoZones));
    }

    #[test]
    fn test_parse_zones_rejects_path_components() {
        for zone in ["../etc/passwd", "zones/example.com", "..", ".", "a\\b"] {
            let result = parse_zones(&format!("example.com,{zone}"));
            assert!(
                matches!(result, Err(ConfigError::InvalidZone { zone: ref z, .. }) if z == zone),
                "expected {zone:?} to be rejected, got {result:?}"
            );
        }
    }

    // =====================================================
    // Base URL Tests
    // =====================================================

    #[test]
    fn test_parse_base_url_https() {
        let url = parse_base_url("https://netbox.example.com").unwrap();
        assert_eq!(url.as_str(), "https://netbox.example.com/");
    }

    #[test]
    fn test_parse_base_url_with_port_and_path() {
        let url = parse_base_url("http://10.0.0.10:8000/netbox").unwrap();
        assert_eq!(url.port(), Some(8000));
        assert_eq!(url.path(), "/netbox");
    }

    #[test]
    fn test_parse_base_url_rejects_relative() {
        assert!(matches!(
            parse_base_url("netbox.example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        let err = parse_base_url("ftp://netbox.example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    // =====================================================
    // CLI Tests
    // =====================================================

    fn parse(args: &[&str]) -> Settings {
        let mut argv = vec!["zonesync"];
        argv.extend_from_slice(args);
        Settings::try_from(Cli::try_parse_from(argv).unwrap()).unwrap()
    }

    #[test]
    fn test_cli_defaults() {
        let settings = parse(&[
            "--netbox-url",
            "https://netbox.example.com",
            "--netbox-token",
            "secret",
            "--zones",
            "example.com,example.org",
        ]);

        assert_eq!(settings.netbox_url.as_str(), "https://netbox.example.com/");
        assert_eq!(settings.netbox_token, "secret");
        assert_eq!(settings.zones, vec!["example.com", "example.org"]);
        assert_eq!(settings.zone_dir, PathBuf::from("."));
        assert_eq!(settings.listen.to_string(), "0.0.0.0:5000");
        assert_eq!(settings.inventory_timeout, None);
        assert!(!settings.once);
    }

    #[test]
    fn test_cli_overrides() {
        let settings = parse(&[
            "--netbox-url",
            "https://netbox.example.com",
            "--netbox-token",
            "secret",
            "--zones",
            "example.com",
            "--zone-dir",
            "/var/named/generated",
            "--listen",
            "127.0.0.1:8080",
            "--inventory-timeout-secs",
            "30",
            "--once",
        ]);

        assert_eq!(settings.zone_dir, PathBuf::from("/var/named/generated"));
        assert_eq!(settings.listen.to_string(), "127.0.0.1:8080");
        assert_eq!(settings.inventory_timeout, Some(Duration::from_secs(30)));
        assert!(settings.once);
    }

    #[test]
    fn test_settings_debug_redacts_token() {
        let settings = parse(&[
            "--netbox-url",
            "https://netbox.example.com",
            "--netbox-token",
            "super-secret-token",
            "--zones",
            "example.com",
        ]);

        let debug = format!("{settings:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_cli_invalid_zone_list_fails_validation() {
        let cli = Cli::try_parse_from([
            "zonesync",
            "--netbox-url",
            "https://netbox.example.com",
            "--netbox-token",
            "secret",
            "--zones",
            ",",
        ])
        .unwrap();

        assert_eq!(Settings::try_from(cli).unwrap_err(), ConfigError::NoZones);
    }
}
