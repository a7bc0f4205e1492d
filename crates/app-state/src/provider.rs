//! Generic entity provider
//!
//! An [`EntityProvider`] is the single in-memory source of truth for one
//! collection. It starts out holding seed data, loads the stored collection
//! once, and applies every mutation to memory synchronously before handing
//! the new snapshot to its [`WriteBehind`].
//!
//! Mutations made before the load finishes are shown at once and queued;
//! when stored records arrive the queue is replayed on top of them, and only
//! then is anything written.
//!
//! Subscribers receive a fresh `Arc<Vec<T>>` after every change through a
//! tokio `watch` channel; a mutation that changes nothing does not notify.

use app_core::Entity;
use parking_lot::Mutex;
use std::sync::Arc;
use storage::CollectionStorage;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::write_behind::{PersistError, PersistHandle, WriteBehind};

/// Load progress of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Holding seed data, nothing read yet
    Uninitialized,
    /// Initial read in flight
    Loading,
    /// Loaded (or fell back to seed); terminal for the session
    Ready,
}

/// One applied mutation
enum Change<T> {
    Insert(T),
    Replace(T),
    Remove(String),
}

impl<T: Entity> Change<T> {
    /// Apply to `items`; false if it matched nothing
    fn apply(&self, items: &mut Vec<T>) -> bool {
        match self {
            Change::Insert(item) => {
                items.push(item.clone());
                true
            }
            Change::Replace(item) => match items.iter_mut().find(|current| current.id() == item.id()) {
                Some(current) => {
                    *current = item.clone();
                    true
                }
                None => false,
            },
            Change::Remove(id) => {
                let before = items.len();
                items.retain(|item| item.id() != id);
                items.len() != before
            }
        }
    }
}

/// In-memory collection backed by a [`CollectionStorage`]
pub struct EntityProvider<T: Entity> {
    storage: CollectionStorage<T>,
    phase: watch::Sender<LoadPhase>,
    items: watch::Sender<Arc<Vec<T>>>,
    queued: Mutex<Vec<Change<T>>>,
    writer: Arc<WriteBehind<Vec<T>>>,
}

impl<T: Entity> EntityProvider<T> {
    /// Create a provider showing `seed` until [`load`](Self::load) completes.
    ///
    /// Background writes run on the tokio runtime current at this call.
    pub fn new(storage: CollectionStorage<T>, seed: Vec<T>) -> Self {
        let writer = WriteBehind::new(T::KIND, storage.clone());
        Self::with_writer(storage, seed, writer)
    }

    /// Like [`new`](Self::new), with writes spawned on `runtime`
    pub fn with_runtime(storage: CollectionStorage<T>, seed: Vec<T>, runtime: tokio::runtime::Handle) -> Self {
        let writer = WriteBehind::new(T::KIND, storage.clone()).with_runtime(runtime);
        Self::with_writer(storage, seed, writer)
    }

    fn with_writer(storage: CollectionStorage<T>, seed: Vec<T>, writer: WriteBehind<Vec<T>>) -> Self {
        let (phase, _) = watch::channel(LoadPhase::Uninitialized);
        let (items, _) = watch::channel(Arc::new(seed));
        Self { storage, phase, items, queued: Mutex::new(Vec::new()), writer: Arc::new(writer) }
    }

    /// Read the stored collection once.
    ///
    /// Stored records replace the seed, with any changes made in the
    /// meantime replayed on top. An empty store is a first run: the current
    /// collection is kept and written out before the provider turns ready.
    /// A read or decode failure is logged and the current collection kept.
    /// Calls after the first are ignored.
    pub async fn load(&self) {
        let started = self.phase.send_if_modified(|phase| {
            if *phase != LoadPhase::Uninitialized {
                return false;
            }
            *phase = LoadPhase::Loading;
            true
        });
        if !started {
            debug!(collection = T::KIND, phase = ?self.phase(), "Load already started");
            return;
        }

        let stored = match self.storage.get_all().await {
            Ok(stored) if !stored.is_empty() => {
                info!(collection = T::KIND, count = stored.len(), "Loaded from storage");
                Some(stored)
            }
            Ok(_) => {
                debug!(collection = T::KIND, "Nothing stored, persisting seed");
                let (generation, snapshot) = {
                    let current = self.items.borrow();
                    (self.writer.issue(), Arc::clone(&current))
                };
                // Failures are logged by the writer
                let _ = self.writer.write(generation, &snapshot).await;
                None
            }
            Err(e) => {
                error!(collection = T::KIND, error = %e, "Failed to load, keeping seed data");
                None
            }
        };

        self.finish_load(stored);
    }

    /// Swap in the stored records with queued changes replayed, and turn
    /// ready. Holding the phase lock keeps new changes out until done.
    fn finish_load(&self, stored: Option<Vec<T>>) {
        self.phase.send_modify(|phase| {
            let queued = std::mem::take(&mut *self.queued.lock());
            if let Some(mut stored) = stored {
                if !queued.is_empty() {
                    debug!(collection = T::KIND, count = queued.len(), "Replaying changes made before load");
                }
                for change in &queued {
                    change.apply(&mut stored);
                }
                self.items.send_replace(Arc::new(stored));
            }
            *phase = LoadPhase::Ready;
        });
    }

    /// Current load phase
    pub fn phase(&self) -> LoadPhase {
        *self.phase.borrow()
    }

    /// Check if the initial load has not finished yet
    pub fn is_loading(&self) -> bool {
        self.phase() != LoadPhase::Ready
    }

    /// Snapshot of the collection
    pub fn items(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.items.borrow())
    }

    /// Find a record by id
    pub fn get(&self, id: &str) -> Option<T> {
        self.items.borrow().iter().find(|item| item.id() == id).cloned()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Receive every new snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.items.subscribe()
    }

    /// Append a record
    pub fn add(&self, item: T) -> PersistHandle {
        debug!(collection = T::KIND, id = item.id(), "Adding");
        self.commit(Change::Insert(item))
    }

    /// Replace the record whose id is `id`; nothing happens if there is none
    pub fn update(&self, id: &str, item: T) -> PersistHandle {
        self.modify(id, |current| {
            *current = item;
            true
        })
    }

    /// Remove the record whose id is `id`; nothing happens if there is none
    pub fn delete(&self, id: &str) -> PersistHandle {
        self.commit(Change::Remove(id.to_string()))
    }

    /// Edit one record.
    ///
    /// `edit` works on a copy, outside any lock, and reports whether it
    /// changed anything; the copy is only swapped in when it returns true.
    /// Of two edits racing on the same record the later swap wins.
    pub fn modify<F>(&self, id: &str, edit: F) -> PersistHandle
    where
        F: FnOnce(&mut T) -> bool,
    {
        let Some(mut record) = self.get(id) else {
            debug!(collection = T::KIND, id, "Edit of unknown id ignored");
            return PersistHandle::skipped();
        };
        if !edit(&mut record) {
            return PersistHandle::skipped();
        }
        self.commit(Change::Replace(record))
    }

    /// Edit one record, rejecting the edit on error.
    ///
    /// Same locking as [`modify`](Self::modify). On `Err` the collection is
    /// left untouched and the error is returned. An unknown id is not an
    /// error; it yields a skipped handle.
    pub fn try_modify<F, E>(&self, id: &str, edit: F) -> Result<PersistHandle, E>
    where
        F: FnOnce(&mut T) -> Result<(), E>,
    {
        let Some(mut record) = self.get(id) else {
            debug!(collection = T::KIND, id, "Edit of unknown id ignored");
            return Ok(PersistHandle::skipped());
        };
        edit(&mut record)?;
        Ok(self.commit(Change::Replace(record)))
    }

    /// Apply `change` under the channel lock and persist the result.
    ///
    /// The generation is issued while the lock is held, so write order
    /// follows mutation order. Before the load finishes the change is queued
    /// instead and written once the provider is ready.
    fn commit(&self, mut change: Change<T>) -> PersistHandle {
        if let Change::Insert(item) | Change::Replace(item) = &mut change {
            item.normalize();
        }

        let phase = self.phase.borrow();
        let ready = *phase == LoadPhase::Ready;
        let mut issued = None;
        let changed = self.items.send_if_modified(|current| {
            let mut next = current.to_vec();
            if !change.apply(&mut next) {
                return false;
            }
            *current = Arc::new(next);
            if ready {
                issued = Some((self.writer.issue(), Arc::clone(current)));
            }
            true
        });

        if !changed {
            debug!(collection = T::KIND, "Change matched nothing");
            return PersistHandle::skipped();
        }
        if let Some((generation, snapshot)) = issued {
            drop(phase);
            return self.writer.spawn(generation, snapshot);
        }

        self.queued.lock().push(change);
        drop(phase);
        debug!(collection = T::KIND, "Change queued until load finishes");
        self.persist_when_ready()
    }

    /// Write the current collection once the provider turns ready
    fn persist_when_ready(&self) -> PersistHandle {
        let mut phase = self.phase.subscribe();
        let items = self.items.subscribe();
        let writer = Arc::clone(&self.writer);
        self.writer.spawn_task(async move {
            let loaded = phase.wait_for(|phase| *phase == LoadPhase::Ready).await.is_ok();
            if !loaded {
                return Err(PersistError::NeverLoaded(writer.label()));
            }
            let (generation, snapshot) = {
                let current = items.borrow();
                (writer.issue(), Arc::clone(&current))
            };
            writer.write(generation, &snapshot).await
        })
    }
}
