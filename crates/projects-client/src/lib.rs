//! REST access layer for the projects middleware.
//!
//! [`ApiCaller`] issues the calls against the middleware and hands results
//! out in two styles:
//!
//! - **broadcast**: [`ApiCaller::fetch_all_broadcast`] publishes the raw
//!   listing body on a [`BroadcastChannel`]; any number of
//!   [`Subscription`]s see it, late subscribers see nothing.
//! - **awaitable**: [`ApiCaller::fetch_all_awaitable`] resolves to the
//!   typed [`Project`](projects_types::Project) records, or to the
//!   [`ClientError`] that stopped it.
//!
//! The channel is not global: it is created by the owner of the session
//! and injected into the caller and into every component that listens.

pub mod api;
pub mod channel;
pub mod config;
pub mod error;

pub use api::ApiCaller;
pub use channel::{BroadcastChannel, Subscription};
pub use config::ClientConfig;
pub use error::ClientError;
