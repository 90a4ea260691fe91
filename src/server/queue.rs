//! Hand-off queue between the acceptor and the dispatcher
//!
//! A FIFO behind a single lock. The lock only guards the `VecDeque` relinking;
//! waiting happens outside it on a [`Notify`], so an empty queue parks the
//! consumer instead of spinning.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::http::connection::Connection;
use crate::http::request::RawRequest;

/// A connection together with the bytes read from it.
#[derive(Debug)]
pub struct WorkItem {
    pub connection: Connection,
    pub payload: RawRequest,
}

impl WorkItem {
    pub fn new(connection: Connection, payload: RawRequest) -> Self {
        Self {
            connection,
            payload,
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.payload.is_shutdown()
    }
}

#[derive(Debug)]
pub struct WorkQueue<T> {
    items: Mutex<VecDeque<T>>,
    notify: Notify,
    closed: AtomicBool,
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
            closed: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        // The critical sections cannot panic halfway through a relink.
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends to the tail and wakes the consumer.
    pub fn push(&self, item: T) {
        self.lock().push_back(item);
        self.notify.notify_one();
    }

    /// Removes the head, or `None` when the queue is empty.
    pub fn try_pop(&self) -> Option<T> {
        self.lock().pop_front()
    }

    /// Waits for the head item.
    ///
    /// Returns `None` only once the queue is closed and nothing is left;
    /// items pushed before `close` are still delivered.
    pub async fn pop(&self) -> Option<T> {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking so a close between the check and the
            // await is not missed.
            notified.as_mut().enable();

            if let Some(item) = self.try_pop() {
                return Some(item);
            }
            if self.is_closed() {
                return None;
            }

            notified.await;
        }
    }

    /// Signals waiting consumers that no more items will arrive.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Takes every remaining item, head first.
    pub fn drain(&self) -> Vec<T> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
