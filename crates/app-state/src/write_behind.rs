//! Write-behind persistence
//!
//! Mutations update memory first and hand a snapshot to a [`WriteBehind`],
//! which writes it on a background task. Every snapshot carries a
//! generation number taken while the mutation held the state lock; writes
//! run one at a time, and a snapshot older than the last attempted write is
//! dropped instead of overwriting newer data.
//!
//! Background writes run on the tokio runtime that was current when the
//! writer was built, so mutators can be called from threads outside it.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use storage::{CollectionStorage, DocumentStorage, StorageError};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Persistence errors
#[derive(Debug, Error)]
pub enum PersistError {
    /// The storage write failed
    #[error("Failed to persist {label}: {source}")]
    Storage {
        /// Collection label
        label: &'static str,
        /// Underlying storage error
        #[source]
        source: StorageError,
    },

    /// The background task panicked or was cancelled
    #[error("Persist task failed: {0}")]
    Task(String),

    /// No tokio runtime to run the write on
    #[error("No runtime available to persist {0}")]
    NoRuntime(&'static str),

    /// The provider was dropped before its initial load finished
    #[error("{0} was dropped before loading")]
    NeverLoaded(&'static str),
}

/// Destination of a snapshot
#[async_trait]
pub trait SnapshotSink<V: Sync + ?Sized>: Send + Sync + 'static {
    /// Write the full snapshot, replacing what is stored
    async fn write(&self, value: &V) -> Result<(), StorageError>;
}

#[async_trait]
impl<T> SnapshotSink<Vec<T>> for CollectionStorage<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn write(&self, value: &Vec<T>) -> Result<(), StorageError> {
        self.save_all(value).await
    }
}

#[async_trait]
impl<T> SnapshotSink<T> for DocumentStorage<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn write(&self, value: &T) -> Result<(), StorageError> {
        self.save(value).await
    }
}

/// How a write ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The snapshot reached storage
    Written,
    /// A newer snapshot had already been attempted; this one was dropped.
    /// Says nothing about whether the newer write succeeded.
    Superseded,
}

#[derive(Debug)]
enum HandleState {
    Skipped,
    Running(JoinHandle<Result<WriteOutcome, PersistError>>),
    Failed(PersistError),
}

/// Completion of one background write.
///
/// Dropping the handle detaches the write; awaiting [`PersistHandle::wait`]
/// reports whether it reached storage.
#[derive(Debug)]
pub struct PersistHandle {
    state: HandleState,
}

impl PersistHandle {
    /// Handle for a mutation that changed nothing and wrote nothing
    pub fn skipped() -> Self {
        Self { state: HandleState::Skipped }
    }

    /// Check if no write was issued
    pub fn is_skipped(&self) -> bool {
        matches!(self.state, HandleState::Skipped)
    }

    /// Check if the write has finished (always true when skipped or failed
    /// to start)
    pub fn is_finished(&self) -> bool {
        match &self.state {
            HandleState::Running(task) => task.is_finished(),
            HandleState::Skipped | HandleState::Failed(_) => true,
        }
    }

    /// Wait for the write to complete.
    ///
    /// `Ok` covers both a write that landed and one dropped because a newer
    /// snapshot was already attempted; the newer write reports its own
    /// result. Use [`PersistHandle::outcome`] to tell them apart.
    pub async fn wait(self) -> Result<(), PersistError> {
        self.outcome().await.map(|_| ())
    }

    /// Wait for the write and report how it ended; a skipped handle counts
    /// as written
    pub async fn outcome(self) -> Result<WriteOutcome, PersistError> {
        match self.state {
            HandleState::Skipped => Ok(WriteOutcome::Written),
            HandleState::Running(task) => task.await.map_err(|e| PersistError::Task(e.to_string()))?,
            HandleState::Failed(e) => Err(e),
        }
    }
}

/// Serialized, generation-guarded writer for one storage key
pub struct WriteBehind<V: Send + Sync + 'static> {
    label: &'static str,
    sink: Arc<dyn SnapshotSink<V>>,
    runtime: Option<Handle>,
    issued: AtomicU64,
    last_attempted: Mutex<u64>,
}

impl<V: Send + Sync + 'static> WriteBehind<V> {
    /// Create a writer for `sink`; `label` names it in log lines.
    ///
    /// Writes are spawned on the runtime current at this call, if any.
    pub fn new(label: &'static str, sink: impl SnapshotSink<V>) -> Self {
        Self {
            label,
            sink: Arc::new(sink),
            runtime: Handle::try_current().ok(),
            issued: AtomicU64::new(0),
            last_attempted: Mutex::new(0),
        }
    }

    /// Spawn writes on `runtime` instead of the one captured at creation
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Collection label
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Check if any generation has been reserved
    pub fn has_issued(&self) -> bool {
        self.issued.load(Ordering::SeqCst) > 0
    }

    /// Reserve the next generation.
    ///
    /// Call this while holding whatever lock orders the mutations, so
    /// generations follow mutation order.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Write `snapshot` unless a newer generation has already been attempted
    pub async fn write(&self, generation: u64, snapshot: &V) -> Result<WriteOutcome, PersistError> {
        let mut last_attempted = self.last_attempted.lock().await;
        if *last_attempted > generation {
            tracing::debug!(
                collection = self.label,
                generation,
                newer = *last_attempted,
                "Skipping superseded write"
            );
            return Ok(WriteOutcome::Superseded);
        }
        *last_attempted = generation;

        match self.sink.write(snapshot).await {
            Ok(()) => {
                tracing::debug!(collection = self.label, generation, "Persisted");
                Ok(WriteOutcome::Written)
            }
            Err(source) => {
                tracing::error!(collection = self.label, generation, error = %source, "Failed to persist");
                Err(PersistError::Storage { label: self.label, source })
            }
        }
    }

    /// Write `snapshot` on a background task
    pub fn spawn(self: &Arc<Self>, generation: u64, snapshot: Arc<V>) -> PersistHandle {
        let writer = Arc::clone(self);
        self.spawn_task(async move { writer.write(generation, &snapshot).await })
    }

    /// Run a persist future on the writer's runtime, falling back to the
    /// caller's. Without either the handle carries [`PersistError::NoRuntime`].
    pub fn spawn_task<F>(&self, task: F) -> PersistHandle
    where
        F: Future<Output = Result<WriteOutcome, PersistError>> + Send + 'static,
    {
        let runtime = match self.runtime.clone().or_else(|| Handle::try_current().ok()) {
            Some(runtime) => runtime,
            None => {
                tracing::error!(collection = self.label, "No runtime, change stays in memory only");
                return PersistHandle { state: HandleState::Failed(PersistError::NoRuntime(self.label)) };
            }
        };
        PersistHandle { state: HandleState::Running(runtime.spawn(task)) }
    }
}
