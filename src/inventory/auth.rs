// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Credential scope for inventory requests.
//!
//! The inventory token is only sent to the inventory itself. Every outgoing
//! URL, including the absolute `next` links NetBox returns, is checked
//! against the configured base before the header is added.

use url::Url;

/// Decides which URLs may carry the inventory credential.
///
/// A URL is in scope when its scheme, host and effective port equal the base
/// URL's and its path lies under the base path.
///
/// # Example
///
/// ```rust
/// use url::Url;
/// use zonesync::inventory::CredentialScope;
///
/// let scope = CredentialScope::new(&Url::parse("https://netbox.example.com/").unwrap());
///
/// assert!(scope.permits(&Url::parse("https://netbox.example.com/api/ipam/ip-addresses/").unwrap()));
/// assert!(!scope.permits(&Url::parse("https://evil.example.net/api/").unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct CredentialScope {
    scheme: String,
    host: Option<String>,
    port: Option<u16>,
    path_prefix: String,
}

impl CredentialScope {
    /// Build the scope from the inventory base URL.
    #[must_use]
    pub fn new(base: &Url) -> Self {
        let mut path_prefix = base.path().to_string();
        if !path_prefix.ends_with('/') {
            path_prefix.push('/');
        }

        Self {
            scheme: base.scheme().to_string(),
            host: base.host_str().map(str::to_ascii_lowercase),
            port: base.port_or_known_default(),
            path_prefix,
        }
    }

    /// Returns true if `url` may receive the credential.
    #[must_use]
    pub fn permits(&self, url: &Url) -> bool {
        if url.scheme() != self.scheme
            || url.host_str().map(str::to_ascii_lowercase) != self.host
            || url.port_or_known_default() != self.port
        {
            return false;
        }

        let path = url.path();
        path.starts_with(&self.path_prefix) || format!("{path}/") == self.path_prefix
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod auth_tests;
