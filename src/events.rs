//! Explicit observer channels replacing engine event objects.
//!
//! An [`Emitter`] hands out [`Subscription`]s. Every emitted event is queued
//! on each live subscription in registration order; owners drain their
//! subscriptions when they are pumped. Dropping a subscription or calling
//! [`Emitter::unsubscribe`] stops delivery.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Identifier of a registered listener, unique per emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Queue<E> = Arc<Mutex<VecDeque<E>>>;

fn lock<E>(queue: &Queue<E>) -> MutexGuard<'_, VecDeque<E>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Source side of an event channel.
pub struct Emitter<E> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Queue<E>)>,
}

/// Receiving end returned by [`Emitter::subscribe`].
pub struct Subscription<E> {
    id: SubscriptionId,
    queue: Queue<E>,
}

impl<E: Clone> Emitter<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> Subscription<E> {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let queue = Arc::new(Mutex::new(VecDeque::new()));
        self.subscribers.push((id, queue.clone()));
        Subscription { id, queue }
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Queue `event` on every live subscription and return how many received it.
    pub fn emit(&mut self, event: E) -> usize {
        // the emitter's own handle is the only one left once a subscription is dropped
        self.subscribers
            .retain(|(_, queue)| Arc::strong_count(queue) > 1);
        for (_, queue) in &self.subscribers {
            lock(queue).push_back(event.clone());
        }
        self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E: Clone> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Subscription<E> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn try_next(&mut self) -> Option<E> {
        lock(&self.queue).pop_front()
    }

    pub fn drain(&mut self) -> Vec<E> {
        lock(&self.queue).drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.queue).is_empty()
    }
}
