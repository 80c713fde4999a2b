//! Identity → payment destination resolution.

use async_trait::async_trait;
use merit_core::{MeritError, Result};

/// Looks up the payment destination registered for a display name.
///
/// Consulted only once a transition is already known to be reward-worthy.
/// `Ok(None)` means the directory answered but has no usable address;
/// `Err(ResolverUnavailable)` means the directory could not be reached.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, display_name: &str) -> Result<Option<String>>;
}

/// Resolver backed by the community's member directory page.
///
/// The directory serves one big text body of `<br>`-separated rows shaped
/// like `Username: {name}, BSV Address: {address}, ...`, with the literal
/// `Not set` standing in for members who never registered an address.
pub struct HttpAddressResolver {
    http_client: reqwest::Client,
    directory_url: String,
}

impl HttpAddressResolver {
    /// Resolver fetching from the given directory URL.
    pub fn new(directory_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            directory_url: directory_url.into(),
        }
    }
}

/// Pull the address for `display_name` out of a directory body.
fn parse_directory(body: &str, display_name: &str) -> Option<String> {
    let prefix = format!("Username: {display_name}, BSV Address: ");
    for row in body.split("<br>") {
        if let Some(rest) = row.trim().strip_prefix(&prefix) {
            let address = rest.split(',').next().unwrap_or("").trim();
            if address.is_empty() || address == "Not set" {
                return None;
            }
            return Some(address.to_string());
        }
    }
    None
}

#[async_trait]
impl AddressResolver for HttpAddressResolver {
    async fn resolve(&self, display_name: &str) -> Result<Option<String>> {
        let response = self
            .http_client
            .get(&self.directory_url)
            .send()
            .await
            .map_err(|e| MeritError::ResolverUnavailable {
                message: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| MeritError::ResolverUnavailable {
                message: e.to_string(),
            })?;

        let body = response
            .text()
            .await
            .map_err(|e| MeritError::ResolverUnavailable {
                message: e.to_string(),
            })?;

        let address = parse_directory(&body, display_name);
        if address.is_none() {
            tracing::info!(display_name, "no payment address registered");
        }

        Ok(address)
    }
}
