//! Per-identity wishlist store with best-effort background persistence.
//!
//! Mutations are applied to the in-memory state synchronously and return the
//! new state right away. Each mutation then queues a full overwrite of the
//! identity's slot; a single worker task drains the queue in order, so the
//! last mutation always wins. Persistence outcomes are only visible through
//! [`WishlistStore::subscribe`] and the logs.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{Identity, StorageKey, WishlistCommand, WishlistItem, WishlistState};
use crate::domain::errors::PersistenceError;
use crate::domain::ports::WishlistStoragePort;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Outcome of a background persistence operation.
#[derive(Debug, Clone)]
pub enum PersistenceEvent {
    /// Slot overwritten with the given number of items.
    Saved { key: StorageKey, items: usize },
    /// Slot write failed; the in-memory state is unaffected.
    SaveFailed {
        key: StorageKey,
        error: PersistenceError,
    },
    /// Slot deleted.
    Removed { key: StorageKey },
    /// Slot deletion failed.
    RemoveFailed {
        key: StorageKey,
        error: PersistenceError,
    },
}

#[derive(Debug)]
enum PersistCommand {
    Write {
        key: StorageKey,
        payload: String,
        items: usize,
    },
    Remove {
        key: StorageKey,
    },
    Flush(oneshot::Sender<()>),
}

/// Wishlist of the current shopper.
pub struct WishlistStore {
    storage: Arc<dyn WishlistStoragePort>,
    identity: Identity,
    state: WishlistState,
    persist_tx: mpsc::UnboundedSender<PersistCommand>,
    events: broadcast::Sender<PersistenceEvent>,
    worker: JoinHandle<()>,
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("identity", &self.identity)
            .field("items", &self.state.len())
            .finish_non_exhaustive()
    }
}

impl WishlistStore {
    /// Opens the store for `identity`, rehydrating its slot.
    ///
    /// Never fails: a missing, unreadable or corrupt slot yields an empty
    /// wishlist. Must be called from within a Tokio runtime.
    pub async fn open(storage: Arc<dyn WishlistStoragePort>, identity: Identity) -> Self {
        let state = Self::rehydrate(storage.as_ref(), &identity).await;

        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let worker = tokio::spawn(Self::run_worker_loop(
            Arc::clone(&storage),
            persist_rx,
            events.clone(),
        ));

        info!(identity = %identity, items = state.len(), "Wishlist opened");

        Self {
            storage,
            identity,
            state,
            persist_tx,
            events,
            worker,
        }
    }

    async fn rehydrate(storage: &dyn WishlistStoragePort, identity: &Identity) -> WishlistState {
        let key = identity.storage_key();

        match storage.read(&key).await {
            Ok(None) => {
                debug!(key = %key, "No persisted wishlist, starting empty");
                WishlistState::new()
            }
            Ok(Some(payload)) => match WishlistState::from_json(&payload) {
                Ok(state) => {
                    debug!(key = %key, items = state.len(), "Rehydrated wishlist");
                    state
                }
                Err(e) => {
                    let error = PersistenceError::corrupt(key.as_str(), e.to_string());
                    warn!(error = %error, "Discarding unreadable wishlist");
                    WishlistState::new()
                }
            },
            Err(e) => {
                warn!(error = %e, "Failed to load wishlist, starting empty");
                WishlistState::new()
            }
        }
    }

    async fn run_worker_loop(
        storage: Arc<dyn WishlistStoragePort>,
        mut persist_rx: mpsc::UnboundedReceiver<PersistCommand>,
        events: broadcast::Sender<PersistenceEvent>,
    ) {
        while let Some(command) = persist_rx.recv().await {
            let event = match command {
                PersistCommand::Write {
                    key,
                    payload,
                    items,
                } => match storage.write(&key, &payload).await {
                    Ok(()) => {
                        debug!(key = %key, items, "Wishlist persisted");
                        PersistenceEvent::Saved { key, items }
                    }
                    Err(error) => {
                        error!(error = %error, "Failed to persist wishlist");
                        PersistenceEvent::SaveFailed { key, error }
                    }
                },
                PersistCommand::Remove { key } => match storage.remove(&key).await {
                    Ok(()) => {
                        debug!(key = %key, "Wishlist slot removed");
                        PersistenceEvent::Removed { key }
                    }
                    Err(error) => {
                        error!(error = %error, "Failed to remove wishlist slot");
                        PersistenceEvent::RemoveFailed { key, error }
                    }
                },
                PersistCommand::Flush(done) => {
                    let _ = done.send(());
                    continue;
                }
            };

            let _ = events.send(event);
        }

        debug!("Wishlist persistence worker stopped");
    }

    /// Applies a command, schedules persistence and returns the new state.
    pub fn dispatch(&mut self, command: WishlistCommand) -> &WishlistState {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(command);
        self.schedule_write();
        &self.state
    }

    /// Adds an item; a no-op when its id is already present.
    pub fn add(&mut self, item: WishlistItem) -> &WishlistState {
        self.dispatch(WishlistCommand::Add(item))
    }

    /// Removes every item with `id`; a no-op when absent.
    pub fn remove(&mut self, id: &str) -> &WishlistState {
        self.dispatch(WishlistCommand::Remove(id.to_string()))
    }

    /// Empties the wishlist.
    pub fn clear(&mut self) -> &WishlistState {
        self.dispatch(WishlistCommand::Clear)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.state.contains(id)
    }

    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        self.state.items()
    }

    #[must_use]
    pub const fn state(&self) -> &WishlistState {
        &self.state
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub fn storage_key(&self) -> StorageKey {
        self.identity.storage_key()
    }

    /// Subscribes to persistence outcomes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PersistenceEvent> {
        self.events.subscribe()
    }

    /// Clears the wishlist, deletes the current identity's slot and switches
    /// to the anonymous shopper.
    pub fn logout(&mut self) {
        let key = self.storage_key();
        info!(identity = %self.identity, "Clearing wishlist on logout");

        self.state = WishlistState::new();
        self.send(PersistCommand::Remove { key });
        self.identity = Identity::anonymous();
    }

    /// Switches to `identity` and rehydrates its wishlist.
    ///
    /// The previous identity's slot is left as it was.
    pub async fn login(&mut self, identity: Identity) -> &WishlistState {
        self.flush().await;

        self.state = Self::rehydrate(self.storage.as_ref(), &identity).await;
        info!(identity = %identity, items = self.state.len(), "Wishlist switched identity");
        self.identity = identity;

        &self.state
    }

    /// Waits until every persistence operation queued so far has completed.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.persist_tx.send(PersistCommand::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }

    /// Flushes pending writes and stops the persistence worker.
    pub async fn shutdown(self) {
        self.flush().await;

        let Self {
            persist_tx, worker, ..
        } = self;
        drop(persist_tx);

        if let Err(e) = worker.await {
            error!(error = %e, "Wishlist persistence worker panicked");
        }
    }

    fn schedule_write(&self) {
        let key = self.storage_key();

        match self.state.to_json() {
            Ok(payload) => self.send(PersistCommand::Write {
                key,
                payload,
                items: self.state.len(),
            }),
            Err(e) => {
                let error = PersistenceError::write_failed(key.as_str(), e.to_string());
                error!(error = %error, "Failed to serialize wishlist");
                let _ = self.events.send(PersistenceEvent::SaveFailed { key, error });
            }
        }
    }

    fn send(&self, command: PersistCommand) {
        if self.persist_tx.send(command).is_err() {
            warn!("Wishlist persistence worker is gone, change kept in memory only");
        }
    }
}
