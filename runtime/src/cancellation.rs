//! Registry of cancellable effects.
//!
//! `Effect::Cancellable` tasks are registered here under their [`EffectId`]
//! when they are started; `Effect::Cancel` aborts everything registered under
//! that id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use todoflow_core::effect::EffectId;
use tokio::task::AbortHandle;

/// Shared map from effect id to the abort handles of its running tasks
#[derive(Clone, Debug, Default)]
pub(crate) struct CancellationRegistry {
    tasks: Arc<Mutex<HashMap<EffectId, Vec<AbortHandle>>>>,
}

impl CancellationRegistry {
    fn lock(&self) -> MutexGuard<'_, HashMap<EffectId, Vec<AbortHandle>>> {
        // A panic while holding the lock cannot leave the map inconsistent
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a running task under `id`
    pub(crate) fn register(&self, id: EffectId, handle: AbortHandle) {
        let mut tasks = self.lock();
        let handles = tasks.entry(id).or_default();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Abort every task registered under `id`, returning how many were still running
    pub(crate) fn cancel(&self, id: EffectId) -> usize {
        let handles = self.lock().remove(&id).unwrap_or_default();
        let mut aborted = 0;
        for handle in handles {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        aborted
    }

    /// Number of unfinished tasks registered under `id`
    pub(crate) fn in_flight(&self, id: EffectId) -> usize {
        self.lock()
            .get(&id)
            .map_or(0, |handles| handles.iter().filter(|h| !h.is_finished()).count())
    }
}
