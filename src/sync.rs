//! Fire-and-forget background sync.
//!
//! Saves run on their own thread so the user can keep swiping while a sync is
//! outstanding. Outcomes come home through a channel drained on the event
//! loop tick. Overlapping saves are not ordered: the last call to complete
//! wins, which the design accepts rather than arbitrates.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use crate::client::SyncClient;
use crate::error::SyncApiError;
use crate::models::UserDataParams;

pub type SyncOutcome = Result<(), SyncApiError>;

/// Owns the channel between sync worker threads and the event loop.
pub struct SyncHandle {
    tx: Sender<SyncOutcome>,
    rx: Receiver<SyncOutcome>,
    in_flight: usize,
}

impl SyncHandle {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Kick off a wholesale save of the user's record. Returns immediately;
    /// the outcome surfaces through [`SyncHandle::poll`].
    pub fn spawn_save(&mut self, client: SyncClient, user_id: String, params: UserDataParams) {
        let tx = self.tx.clone();
        self.in_flight += 1;
        thread::spawn(move || {
            let result = client
                .user_data()
                .save_user_data(&user_id, &params)
                .map(|_| ());
            match &result {
                Ok(()) => debug!(user_id = %user_id, "sync save complete"),
                Err(e) => warn!(user_id = %user_id, error = %e, "sync save failed"),
            }
            // The receiver may be gone if the app quit mid-save.
            let _ = tx.send(result);
        });
    }

    /// Drain one completed outcome, if any. Never blocks.
    pub fn poll(&mut self) -> Option<SyncOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(outcome)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Number of saves started but not yet drained.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl Default for SyncHandle {
    fn default() -> Self {
        Self::new()
    }
}
