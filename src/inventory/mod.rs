// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! NetBox inventory access.
//!
//! The [`InventoryClient`] fetches every IP address object from the NetBox
//! IPAM API in as few requests as NetBox allows: the first request asks for
//! `limit=0` (no page size limit) and any `next` links are followed until the
//! listing is drained.
//!
//! # Example
//!
//! ```rust,no_run
//! use zonesync::inventory::{InventoryClient, InventorySource};
//! use url::Url;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = InventoryClient::new(
//!     Url::parse("https://netbox.example.com")?,
//!     "0123456789abcdef".to_string(),
//!     None,
//! )?;
//!
//! let records = client.fetch_all().await?;
//! println!("Fetched {} addresses", records.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod types;

pub use auth::CredentialScope;
pub use types::{IpAddressEntry, IpAddressPage};

use crate::constants::{AUTH_SCHEME, IP_ADDRESSES_PATH, PAGE_LIMIT_PARAM, PAGE_LIMIT_UNLIMITED};
use crate::errors::InventoryError;
use crate::records::InventoryRecord;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client as HttpClient;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// A source of raw address records.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Fetch every address record, in inventory order.
    ///
    /// # Errors
    ///
    /// Returns an [`InventoryError`] if the inventory cannot be reached or
    /// returns something other than the expected JSON listing.
    async fn fetch_all(&self) -> Result<Vec<InventoryRecord>, InventoryError>;
}

/// HTTP client for the NetBox IPAM API.
///
/// Holds the base URL and the credential; no other state is kept between
/// calls.
#[derive(Clone)]
pub struct InventoryClient {
    http: HttpClient,
    base_url: Url,
    token: String,
    scope: CredentialScope,
}

// Omits the token
impl std::fmt::Debug for InventoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryClient")
            .field("base_url", &self.base_url.as_str())
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl InventoryClient {
    /// Create a client for the inventory at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        base_url: Url,
        token: String,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            scope: CredentialScope::new(&base_url),
            base_url,
            token,
        })
    }

    /// Base URL of the inventory.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the first page of the IP address listing.
    ///
    /// Converts `https://netbox.example.com` or `https://netbox.example.com/`
    /// to `https://netbox.example.com/api/ipam/ip-addresses/?limit=0`.
    #[must_use]
    pub fn ip_addresses_url(&self) -> String {
        build_ip_addresses_url(&self.base_url)
    }

    /// GET `url` and decode it as one listing page.
    async fn get_page(&self, url: &str) -> Result<IpAddressPage, InventoryError> {
        let parsed = Url::parse(url).map_err(|e| InventoryError::RequestFailed {
            url: url.to_string(),
            reason: format!("invalid URL: {e}"),
        })?;

        let mut request = self.http.get(parsed.clone()).header(ACCEPT, "application/json");

        let authenticated = self.scope.permits(&parsed);
        if authenticated {
            request = request.header(AUTHORIZATION, format!("{AUTH_SCHEME} {}", self.token));
        } else {
            warn!(
                url = %url,
                "URL is outside the inventory base, sending request without credential"
            );
        }

        debug!(url = %url, authenticated, "HTTP request to inventory");

        let response = request
            .send()
            .await
            .map_err(|e| InventoryError::RequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InventoryError::RequestFailed {
                url: url.to_string(),
                reason: format!("failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            error!(
                url = %url,
                status = %status,
                body = %body,
                "Inventory request failed"
            );
            return Err(InventoryError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(
                url = %url,
                status = %status,
                error = %e,
                "Inventory returned a malformed body"
            );
            InventoryError::MalformedBody {
                url: url.to_string(),
                status: status.as_u16(),
                reason: e.to_string(),
                body,
            }
        })
    }
}

#[async_trait]
impl InventorySource for InventoryClient {
    async fn fetch_all(&self) -> Result<Vec<InventoryRecord>, InventoryError> {
        let mut next = Some(self.ip_addresses_url());
        let mut visited = HashSet::new();
        let mut records = Vec::new();
        let mut page_count = 0;

        while let Some(url) = next {
            if !visited.insert(url.clone()) {
                warn!(
                    url = %url,
                    pages = page_count,
                    "Inventory pagination links back to a page already fetched, stopping"
                );
                break;
            }

            page_count += 1;
            let page = self.get_page(&url).await?;

            let item_count = page.results.len();
            records.extend(page.results.into_iter().map(InventoryRecord::from));

            debug!(
                page = page_count,
                items_in_page = item_count,
                total_items = records.len(),
                expected_total = ?page.count,
                "Fetched page from inventory"
            );

            next = page.next;
        }

        info!(
            total_pages = page_count,
            total_items = records.len(),
            "Fetched all IP addresses from inventory"
        );

        Ok(records)
    }
}

/// Build the listing URL from an inventory base URL.
pub(crate) fn build_ip_addresses_url(base: &Url) -> String {
    format!(
        "{}/{IP_ADDRESSES_PATH}?{PAGE_LIMIT_PARAM}={PAGE_LIMIT_UNLIMITED}",
        base.as_str().trim_end_matches('/')
    )
}
