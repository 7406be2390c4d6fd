//! Event publishing/subscription abstraction (mechanics only).
//!
//! A ledger never holds a bus. Callers publish the events an operation
//! returned, and subscribers (notification relays, autosave hooks) each get
//! their own copy.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// Each subscription receives every message published after it was created,
/// in publication order. Intended for consumption by a single thread.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Drain every message already queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// Broadcast semantics: every subscriber gets a copy of every published message.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}

/// Publish a batch of events in order, stopping at the first failure.
pub fn publish_all<M, B>(bus: &B, events: impl IntoIterator<Item = M>) -> Result<usize, B::Error>
where
    B: EventBus<M> + ?Sized,
{
    let mut published = 0;
    for event in events {
        bus.publish(event)?;
        published += 1;
    }
    tracing::trace!(published, "published event batch");
    Ok(published)
}
