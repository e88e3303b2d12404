//! Configuration for the REST access layer.
//!
//! The middleware address is fixed: [`ClientConfig::default`] carries the
//! addresses the viewer talks to and is not read from anywhere else.
//! [`ClientConfig::with_base_url`] exists so tests can aim the client at a
//! local server.

use reqwest::Url;

use crate::error::ClientError;

/// Base address of the middleware REST resources.
pub const DEFAULT_BASE_URL: &str = "http://l234:8080/SimpleVersion-war-1.0/resources/";

/// Path of the project resource below the base address.
pub const DEFAULT_RESOURCE_PATH: &str = "project/";

/// Buffered values per subscriber before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Complete client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address, always ending in `/`.
    pub base_url: String,
    /// Resource path below the base, always ending in `/`.
    pub resource_path: String,
    /// Capacity of the listing broadcast channel.
    pub channel_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            resource_path: DEFAULT_RESOURCE_PATH.to_owned(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ClientConfig {
    /// Replace the base address.
    ///
    /// The address must be an absolute `http` or `https` URL. A missing
    /// trailing `/` is added.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim();
        let url = Url::parse(trimmed)
            .map_err(|e| ClientError::Config(format!("invalid base url {trimmed}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "unsupported scheme in base url: {}",
                url.scheme()
            )));
        }
        self.base_url = with_trailing_slash(trimmed);
        Ok(self)
    }

    /// Full URL of an operation on the project resource.
    pub fn url_for(&self, operation: &str) -> String {
        format!("{}{}{operation}", self.base_url, self.resource_path)
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_owned()
    } else {
        format!("{url}/")
    }
}
