//! Single-flight guard
//!
//! At most one execution of an operation runs at a time. Callers arriving
//! while it runs wait for the same result instead of starting their own;
//! waiters are answered in arrival order.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::oneshot;

/// The leading caller was dropped before producing a result
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("in-flight operation was abandoned")]
pub struct FlightAbandoned;

pub struct SingleFlight<T> {
    /// `Some` while an operation is in flight, holding the waiters
    waiters: Mutex<Option<Vec<oneshot::Sender<T>>>>,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            waiters: Mutex::new(None),
        }
    }
}

impl<T: Clone> SingleFlight<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Vec<oneshot::Sender<T>>>> {
        self.waiters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn in_flight(&self) -> bool {
        self.slot().is_some()
    }

    /// Number of callers currently waiting on the leader
    pub fn waiting(&self) -> usize {
        self.slot().as_ref().map_or(0, Vec::len)
    }

    /// Run `op`, or join the execution already in flight
    pub async fn run<F, Fut>(&self, op: F) -> Result<T, FlightAbandoned>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let follower = {
            let mut slot = self.slot();
            match slot.as_mut() {
                Some(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                None => {
                    *slot = Some(Vec::new());
                    None
                }
            }
        };

        if let Some(rx) = follower {
            return rx.await.map_err(|_| FlightAbandoned);
        }

        let mut leader = Leader {
            flight: self,
            finished: false,
        };
        let value = op().await;
        for tx in leader.finish() {
            // A waiter that went away does not affect the others
            let _ = tx.send(value.clone());
        }
        Ok(value)
    }
}

/// Clears the slot if the leading future is dropped mid-flight, which
/// drops the waiters' senders so they observe `FlightAbandoned`
struct Leader<'a, T> {
    flight: &'a SingleFlight<T>,
    finished: bool,
}

impl<T> Leader<'_, T> {
    fn finish(&mut self) -> Vec<oneshot::Sender<T>> {
        self.finished = true;
        self.flight
            .waiters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or_default()
    }
}

impl<T> Drop for Leader<'_, T> {
    fn drop(&mut self) {
        if !self.finished {
            self.flight
                .waiters
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
        }
    }
}
