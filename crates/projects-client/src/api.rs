//! HTTP calls against the project resource of the middleware.
//!
//! - `GET {base}project/GetAll` backs two operations: the raw JSON body
//!   published on the injected [`BroadcastChannel`], or typed [`Project`]
//!   records handed to the caller.
//! - `POST {base}project/DeleteProject?id={id}`, whose answer is ignored.
//!
//! There is no timeout, retry or caching. A failed call is logged and its
//! result dropped; only the awaitable fetch also hands the error back.

use projects_types::{ListingPayload, Project, TypesError};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::channel::BroadcastChannel;
use crate::config::ClientConfig;
use crate::error::ClientError;

/// Operation listing every project.
pub const GET_ALL: &str = "GetAll";

/// Operation deleting one project.
pub const DELETE_PROJECT: &str = "DeleteProject";

/// Client for the project resource.
///
/// Cheap to share behind an [`Arc`](std::sync::Arc); every method takes
/// `&self`.
#[derive(Debug)]
pub struct ApiCaller {
    client: reqwest::Client,
    config: ClientConfig,
    channel: BroadcastChannel<Value>,
}

impl ApiCaller {
    /// Create a caller publishing listings on `channel`.
    pub fn new(config: ClientConfig, channel: BroadcastChannel<Value>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            channel,
        }
    }

    /// The channel broadcast-style fetches publish on.
    pub const fn channel(&self) -> &BroadcastChannel<Value> {
        &self.channel
    }

    /// The configuration this caller was built with.
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch all projects and publish the raw body on the channel.
    ///
    /// Returns the number of subscribers that received the body. On
    /// failure the error is logged, nothing is published and 0 is
    /// returned.
    pub async fn fetch_all_broadcast(&self) -> usize {
        let url = self.config.url_for(GET_ALL);
        let body = match self.get_text(&url).await.and_then(|text| parse_json(&text)) {
            Ok(body) => body,
            Err(e) => {
                error!(url = %url, error = %e, "broadcast fetch failed");
                return 0;
            }
        };

        let receivers = self.channel.publish(body);
        debug!(url = %url, receivers, "listing published");
        receivers
    }

    /// Fetch all projects and resolve to one record per listed entry.
    ///
    /// # Errors
    ///
    /// Returns the transport, status or payload error that stopped the
    /// fetch. The error is logged before it is returned.
    pub async fn fetch_all_awaitable(&self) -> Result<Vec<Project>, ClientError> {
        let url = self.config.url_for(GET_ALL);
        let result = self.get_text(&url).await.and_then(|text| {
            ListingPayload::from_body(&text)
                .into_projects()
                .map_err(ClientError::from)
        });

        match &result {
            Ok(projects) => debug!(url = %url, count = projects.len(), "listing resolved"),
            Err(e) => error!(url = %url, error = %e, "awaitable fetch failed"),
        }
        result
    }

    /// Ask the middleware to delete a project.
    ///
    /// Only the project's identifier is sent, as the `id` query parameter.
    /// The answer is not inspected; a request that cannot be sent is
    /// logged and otherwise ignored.
    pub async fn delete_project(&self, project: &Project) {
        let url = self.config.url_for(DELETE_PROJECT);
        let id = project.id.to_string();

        match self.client.post(&url).query(&[("id", id.as_str())]).send().await {
            Ok(response) => {
                info!(url = %url, id = %id, status = response.status().as_u16(), "delete sent");
            }
            Err(e) => warn!(url = %url, id = %id, error = %e, "delete request failed"),
        }
    }

    /// GET a URL and return the body of a successful response.
    async fn get_text(&self, url: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("GET {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("reading body of {url} failed: {e}")))
    }
}

/// Decode a body as JSON without interpreting it further.
fn parse_json(text: &str) -> Result<Value, ClientError> {
    serde_json::from_str(text).map_err(|e| {
        ClientError::Payload(TypesError::ParseFailure(format!("body is not JSON: {e}")))
    })
}
