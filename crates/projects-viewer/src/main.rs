//! Projects viewer entry point.
//!
//! Wires one broadcast channel, one [`ApiCaller`] and one
//! [`WrapperComponent`] together, lets the component run both fetch styles
//! against the middleware and tears it down once they have settled or the
//! process is interrupted.
//!
//! # Architecture
//!
//! ```text
//! WrapperComponent --> ApiCaller --> middleware (HTTP)
//!        ^                |
//!        +--- channel ----+ (broadcast)   awaitable --> WrapperComponent
//! ```
//!
//! Everything runs on a single-threaded runtime; the two fetches interleave
//! only at network boundaries.

mod component;
mod error;

use std::sync::Arc;

use projects_client::{ApiCaller, BroadcastChannel, ClientConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::component::WrapperComponent;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the Ctrl-C handler cannot be installed. Failed
/// fetches are logged, not returned.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("projects-viewer starting");

    let config = ClientConfig::default();
    info!(
        base_url = config.base_url,
        resource_path = config.resource_path,
        channel_capacity = config.channel_capacity,
        "configuration loaded"
    );

    let channel = BroadcastChannel::new(config.channel_capacity);
    let api = Arc::new(ApiCaller::new(config, channel.clone()));
    let mut component = WrapperComponent::new(api, channel);

    let pending = component.init();
    info!(state = ?component.state(), "component initialized");

    tokio::select! {
        outcome = pending.wait() => match outcome {
            Ok(projects) => info!(count = projects.len(), "fetches settled"),
            Err(e) => warn!(error = %e, "fetches settled with an error"),
        },
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("interrupted, tearing down");
        }
    }

    component.teardown().await;
    info!(
        state = ?component.state(),
        emissions = component.emissions(),
        "projects-viewer finished"
    );

    Ok(())
}
