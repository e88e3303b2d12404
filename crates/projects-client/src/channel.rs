//! Publish/subscribe channel for pushed results.
//!
//! [`BroadcastChannel`] wraps a [`tokio::sync::broadcast`] sender. Every
//! [`Subscription`] owns one receiver, so the channel's subscriber list is
//! exactly the set of live subscriptions. Publishing is fire-and-forget:
//! values are only delivered to subscriptions that exist at publish time,
//! nothing is replayed to later ones.
//!
//! If a subscriber falls behind by more than the channel capacity, the
//! missed values are skipped and it resumes from the oldest value still
//! buffered.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::debug;

/// A cloneable handle to one broadcast channel.
///
/// All clones publish into, and subscribe to, the same channel.
#[derive(Debug)]
pub struct BroadcastChannel<T> {
    tx: broadcast::Sender<T>,
}

impl<T> Clone for BroadcastChannel<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Clone> BroadcastChannel<T> {
    /// Create a channel buffering up to `capacity` values per subscriber.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish a value to every current subscriber.
    ///
    /// Returns the number of subscribers reached. Zero subscribers is not
    /// an error; the value is simply dropped.
    pub fn publish(&self, value: T) -> usize {
        // send fails only when nobody is subscribed.
        self.tx.send(value).unwrap_or(0)
    }

    /// Attach a new subscriber.
    ///
    /// The subscription sees values published after this call only.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            rx: Some(self.tx.subscribe()),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// One listener on a [`BroadcastChannel`].
///
/// Released by [`Subscription::unsubscribe`] or by dropping it.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: Option<broadcast::Receiver<T>>,
}

impl<T: Clone> Subscription<T> {
    /// Wait for the next published value.
    ///
    /// Returns `None` once the subscription is released or every channel
    /// handle is gone.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            let rx = self.rx.as_mut()?;
            let received = rx.recv().await;
            match received {
                Ok(value) => return Some(value),
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "subscriber lagged, skipping ahead");
                }
                Err(RecvError::Closed) => {
                    self.rx = None;
                    return None;
                }
            }
        }
    }

    /// Take an already published value without waiting.
    pub fn try_recv(&mut self) -> Option<T> {
        loop {
            let rx = self.rx.as_mut()?;
            let received = rx.try_recv();
            match received {
                Ok(value) => return Some(value),
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "subscriber lagged, skipping ahead");
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Closed) => {
                    self.rx = None;
                    return None;
                }
            }
        }
    }

    /// Release the listener.
    ///
    /// Returns `true` the first time. Later calls do nothing and return
    /// `false`.
    pub fn unsubscribe(&mut self) -> bool {
        self.rx.take().is_some()
    }

    /// Whether the listener is still attached.
    pub const fn is_active(&self) -> bool {
        self.rx.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_reaches_nobody() {
        let channel = BroadcastChannel::new(4);
        assert_eq!(channel.publish(1_u32), 0);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn every_subscriber_sees_each_value_once() {
        let channel = BroadcastChannel::new(4);
        let mut first = channel.subscribe();
        let mut second = channel.clone().subscribe();

        assert_eq!(channel.publish("a"), 2);

        assert_eq!(first.try_recv(), Some("a"));
        assert_eq!(first.try_recv(), None);
        assert_eq!(second.try_recv(), Some("a"));
        assert_eq!(second.try_recv(), None);
    }

    #[test]
    fn late_subscriber_gets_no_replay() {
        let channel = BroadcastChannel::new(4);
        let _early = channel.subscribe();
        channel.publish(7_u8);

        let mut late = channel.subscribe();
        assert_eq!(late.try_recv(), None);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let channel = BroadcastChannel::<u8>::new(4);
        let mut subscription = channel.subscribe();
        assert_eq!(channel.subscriber_count(), 1);

        assert!(subscription.unsubscribe());
        assert!(!subscription.is_active());
        assert_eq!(channel.subscriber_count(), 0);

        assert!(!subscription.unsubscribe());
        assert_eq!(channel.subscriber_count(), 0);
        assert_eq!(channel.publish(1), 0);
        assert_eq!(subscription.try_recv(), None);
    }

    #[test]
    fn dropping_a_subscription_releases_it() {
        let channel = BroadcastChannel::<u8>::new(4);
        let subscription = channel.subscribe();
        assert_eq!(channel.subscriber_count(), 1);
        drop(subscription);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn lagging_subscriber_skips_to_buffered_values() {
        let channel = BroadcastChannel::new(2);
        let mut subscription = channel.subscribe();
        for value in 0..5_u32 {
            channel.publish(value);
        }
        assert_eq!(subscription.try_recv(), Some(3));
        assert_eq!(subscription.try_recv(), Some(4));
        assert_eq!(subscription.try_recv(), None);
    }

    #[tokio::test]
    async fn recv_ends_when_channel_is_gone() {
        let channel = BroadcastChannel::new(2);
        let mut subscription = channel.subscribe();
        channel.publish(9_u16);
        drop(channel);

        assert_eq!(subscription.recv().await, Some(9));
        assert_eq!(subscription.recv().await, None);
        assert!(!subscription.is_active());
    }

    #[tokio::test]
    async fn recv_after_unsubscribe_returns_none() {
        let channel = BroadcastChannel::<u16>::new(2);
        let mut subscription = channel.subscribe();
        subscription.unsubscribe();
        channel.publish(1);
        assert_eq!(subscription.recv().await, None);
    }
}
