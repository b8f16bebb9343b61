use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::topology::edge::EdgeLabel;
use crate::topology::{MeshSnapshot, MeshStore};

/// A point in the run where a stepwise caller may suspend execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    /// About to connect a group of 2 or 3 vertices.
    BaseCase { size: usize },
    /// Both halves are triangulated and about to be merged.
    BeforeMerge { left: usize, right: usize },
    /// The lowest common tangent of a merge has been added.
    BaseEdge(EdgeLabel),
    /// The zipper attached a new cross edge.
    ZipperAdvance(EdgeLabel),
}

/// Receives control at every [`Checkpoint`] of a stepwise run.
///
/// The store is read-only; `checkpoint` returns when the run may continue.
pub trait StepControl {
    fn checkpoint(&mut self, checkpoint: Checkpoint, store: &MeshStore);
}

impl<F> StepControl for F
where
    F: FnMut(Checkpoint, &MeshStore),
{
    fn checkpoint(&mut self, checkpoint: Checkpoint, store: &MeshStore) {
        self(checkpoint, store);
    }
}

/// Runs straight through every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct Continuous;

impl StepControl for Continuous {
    fn checkpoint(&mut self, _checkpoint: Checkpoint, _store: &MeshStore) {}
}

#[derive(Debug, Default)]
struct GateState {
    waiting: bool,
    proceed: bool,
    pending: Option<Checkpoint>,
    snapshot: Option<MeshSnapshot>,
}

#[derive(Debug, Default)]
struct GateShared {
    state: Mutex<GateState>,
    signal: Condvar,
}

/// Cross-thread gate for driving a stepwise run from another thread.
///
/// The run blocks at each checkpoint until [`StepGate::proceed`] is called.
/// At most one checkpoint is pending at a time, and the proceed flag is
/// cleared when the run resumes.
#[derive(Debug, Clone, Default)]
pub struct StepGate {
    shared: Arc<GateShared>,
}

impl StepGate {
    /// Creates a gate with no pending checkpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Releases the pending checkpoint.
    ///
    /// Returns `false` if no checkpoint is pending or it was already released.
    pub fn proceed(&self) -> bool {
        let mut state = self.lock();
        if !state.waiting || state.proceed {
            return false;
        }
        state.proceed = true;
        self.shared.signal.notify_all();
        true
    }

    /// Returns `true` while the run is suspended waiting for input.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        let state = self.lock();
        state.waiting && !state.proceed
    }

    /// The checkpoint the run is suspended at, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Checkpoint> {
        self.lock().pending
    }

    /// Mesh captured at the most recent checkpoint.
    #[must_use]
    pub fn snapshot(&self) -> Option<MeshSnapshot> {
        self.lock().snapshot.clone()
    }

    /// Blocks until the run reaches a checkpoint or `timeout` elapses.
    pub fn wait_for_checkpoint(&self, timeout: Duration) -> Option<Checkpoint> {
        let state = self.lock();
        let (state, _) = self
            .shared
            .signal
            .wait_timeout_while(state, timeout, |s| !s.waiting || s.proceed)
            .unwrap_or_else(PoisonError::into_inner);
        if state.waiting && !state.proceed {
            state.pending
        } else {
            None
        }
    }
}

impl StepControl for StepGate {
    fn checkpoint(&mut self, checkpoint: Checkpoint, store: &MeshStore) {
        let mut state = self.lock();
        state.waiting = true;
        state.proceed = false;
        state.pending = Some(checkpoint);
        state.snapshot = Some(store.snapshot());
        self.shared.signal.notify_all();

        let mut state = self
            .shared
            .signal
            .wait_while(state, |s| !s.proceed)
            .unwrap_or_else(PoisonError::into_inner);
        state.waiting = false;
        state.proceed = false;
        state.pending = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn proceed_without_pending_checkpoint_is_ignored() {
        let gate = StepGate::new();
        assert!(!gate.is_waiting());
        assert!(!gate.proceed());
        assert!(gate.wait_for_checkpoint(Duration::from_millis(1)).is_none());
    }

    #[test]
    fn gate_blocks_until_proceed() {
        let gate = StepGate::new();
        let mut runner = gate.clone();
        let store = MeshStore::new();

        thread::scope(|s| {
            let handle = s.spawn(move || {
                runner.checkpoint(Checkpoint::BaseCase { size: 2 }, &store);
            });
            let seen = gate.wait_for_checkpoint(Duration::from_secs(10));
            assert_eq!(seen, Some(Checkpoint::BaseCase { size: 2 }));
            assert!(gate.is_waiting());
            assert!(gate.snapshot().is_some());
            assert!(gate.proceed());
            // A second signal for the same checkpoint is not queued.
            assert!(!gate.proceed());
            handle.join().unwrap();
        });
        assert!(!gate.is_waiting());
        assert!(gate.pending().is_none());
    }
}
