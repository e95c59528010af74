// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zonesync::inventory::InventoryClient;

pub const TEST_TOKEN: &str = "integration-test-token";

/// Start a mock NetBox serving `results` as a single unpaginated listing
pub async fn start_netbox(results: Value) -> MockServer {
    let server = MockServer::start().await;
    let count = results.as_array().map_or(0, Vec::len);

    Mock::given(method("GET"))
        .and(path("/api/ipam/ip-addresses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": count,
            "next": null,
            "previous": null,
            "results": results
        })))
        .mount(&server)
        .await;

    server
}

/// Inventory client pointed at a mock NetBox
pub fn client_for(server: &MockServer) -> InventoryClient {
    InventoryClient::new(
        Url::parse(&server.uri()).expect("mock server URI should parse"),
        TEST_TOKEN.to_string(),
        None,
    )
    .expect("inventory client should build")
}

pub fn zones(names: &[&str]) -> Vec<String> {
    names.iter().map(|z| (*z).to_string()).collect()
}
