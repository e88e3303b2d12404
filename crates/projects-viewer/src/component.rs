//! The display component.
//!
//! [`WrapperComponent`] drives both fetch styles when it is initialized and
//! renders whatever arrives by logging it. Its only lifecycle state is the
//! channel listener: [`ListenerState::Subscribed`] between
//! [`WrapperComponent::init`] and [`WrapperComponent::teardown`],
//! [`ListenerState::Unsubscribed`] otherwise.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use projects_client::{ApiCaller, BroadcastChannel, ClientError, Subscription};
use projects_types::Project;
use serde_json::Value;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ViewerError;

/// Whether the component currently listens on the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    /// A listener is attached.
    Subscribed,
    /// No listener is attached.
    Unsubscribed,
}

/// The running channel listener.
#[derive(Debug)]
struct Listener {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// Fetches started by [`WrapperComponent::init`].
#[derive(Debug)]
pub struct PendingFetches {
    broadcast: JoinHandle<usize>,
    awaitable: JoinHandle<Result<Vec<Project>, ClientError>>,
}

impl PendingFetches {
    /// Wait for both fetches to settle, in whatever order they finish.
    ///
    /// Resolves to the records of the awaitable fetch.
    pub async fn wait(self) -> Result<Vec<Project>, ViewerError> {
        let (broadcast, awaitable) = tokio::join!(self.broadcast, self.awaitable);

        let receivers = broadcast.map_err(|e| ViewerError::Task(e.to_string()))?;
        debug!(receivers, "broadcast fetch settled");

        let projects = awaitable.map_err(|e| ViewerError::Task(e.to_string()))??;
        Ok(projects)
    }
}

/// Component listing projects through both delivery styles.
#[derive(Debug)]
pub struct WrapperComponent {
    api: Arc<ApiCaller>,
    channel: BroadcastChannel<Value>,
    listener: Option<Listener>,
    emissions: Arc<AtomicUsize>,
}

impl WrapperComponent {
    /// Create an uninitialized component listening on `channel`.
    pub fn new(api: Arc<ApiCaller>, channel: BroadcastChannel<Value>) -> Self {
        Self {
            api,
            channel,
            listener: None,
            emissions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Subscribe to the channel and start both fetches.
    ///
    /// The subscription is in place before the broadcast fetch starts, so
    /// its result is never missed. The two fetches are not ordered with
    /// respect to each other. A second call keeps the existing listener
    /// and only starts new fetches.
    ///
    /// Must be called from within a tokio runtime.
    pub fn init(&mut self) -> PendingFetches {
        if self.listener.is_none() {
            let subscription = self.channel.subscribe();
            let (stop, stopped) = oneshot::channel();
            let task = tokio::spawn(listen(subscription, stopped, Arc::clone(&self.emissions)));
            self.listener = Some(Listener { stop, task });
            debug!("subscribed to listing channel");
        } else {
            debug!("already subscribed, keeping listener");
        }

        let api = Arc::clone(&self.api);
        let broadcast = tokio::spawn(async move { api.fetch_all_broadcast().await });

        let api = Arc::clone(&self.api);
        let awaitable = tokio::spawn(async move {
            let result = api.fetch_all_awaitable().await;
            if let Ok(projects) = &result {
                info!(count = projects.len(), projects = ?projects, "projects resolved");
            }
            result
        });

        PendingFetches {
            broadcast,
            awaitable,
        }
    }

    /// Release the channel listener.
    ///
    /// Values already delivered to the listener are logged first. Returns
    /// `true` if a listener was released; tearing down an unsubscribed
    /// component does nothing.
    pub async fn teardown(&mut self) -> bool {
        let Some(listener) = self.listener.take() else {
            return false;
        };

        if listener.stop.send(()).is_err() {
            debug!("listener already stopped");
        }
        if let Err(e) = listener.task.await {
            warn!(error = %e, "listener task ended abnormally");
        }

        info!(emissions = self.emissions(), "component torn down");
        true
    }

    /// Current listener state.
    pub const fn state(&self) -> ListenerState {
        if self.listener.is_some() {
            ListenerState::Subscribed
        } else {
            ListenerState::Unsubscribed
        }
    }

    /// Number of channel values this component has logged.
    pub fn emissions(&self) -> usize {
        self.emissions.load(Ordering::SeqCst)
    }
}

impl Drop for WrapperComponent {
    fn drop(&mut self) {
        // Aborting drops the task's subscription, which releases it.
        if let Some(listener) = self.listener.take() {
            listener.task.abort();
        }
    }
}

/// Log every value published on the channel until told to stop.
async fn listen(
    mut subscription: Subscription<Value>,
    mut stop: oneshot::Receiver<()>,
    emissions: Arc<AtomicUsize>,
) {
    loop {
        tokio::select! {
            // Drain what is already buffered before honouring stop.
            biased;
            next = subscription.recv() => match next {
                Some(body) => {
                    emissions.fetch_add(1, Ordering::SeqCst);
                    info!(body = %body, "listing received on channel");
                }
                None => {
                    debug!("listing channel closed");
                    break;
                }
            },
            _ = &mut stop => break,
        }
    }
    subscription.unsubscribe();
}
