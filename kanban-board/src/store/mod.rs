//! In-memory board store for clients.
//!
//! A [`BoardStore`] holds one [`BoardState`] and applies [`BoardAction`]s to it through
//! the pure [`reduce`] function. Observers subscribe to a `tokio::sync::watch` channel
//! and see every dispatched action as a single transition.
//!
//! Optimistic updates are dispatched locally before the server confirms them. Keep the
//! [`OptimisticUpdate`] returned by [`BoardStore::optimistic`] and hand it back to
//! [`BoardStore::rollback`] if the server rejects the change.

mod action;
mod reducer;
mod state;

pub use action::BoardAction;
pub use reducer::{reduce, StoreOutcome};
pub use state::BoardState;

use crate::types::{ColumnId, Task};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, trace};

/// The state before an optimistic action, kept for rollback
#[derive(Debug, Clone)]
pub struct OptimisticUpdate {
    action: BoardAction,
    previous: BoardState,
    outcome: StoreOutcome,
}

impl OptimisticUpdate {
    pub fn action(&self) -> &BoardAction {
        &self.action
    }

    pub fn outcome(&self) -> &StoreOutcome {
        &self.outcome
    }
}

/// Shared, observable board state. Clones share the same state.
#[derive(Debug, Clone)]
pub struct BoardStore {
    state: Arc<watch::Sender<BoardState>>,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    pub fn new() -> Self {
        Self::with_state(BoardState::default())
    }

    pub fn with_state(state: BoardState) -> Self {
        let (state, _) = watch::channel(state);
        Self {
            state: Arc::new(state),
        }
    }

    /// Apply `action`. Observers are only notified when the state changed.
    pub fn dispatch(&self, action: BoardAction) -> StoreOutcome {
        let name = action.name();
        let mut outcome = StoreOutcome::Unchanged;
        self.state.send_if_modified(|state| {
            let (next, result) = reduce(state, action);
            let changed = result.is_change();
            if changed {
                *state = next;
            }
            outcome = result;
            changed
        });
        match &outcome {
            StoreOutcome::Applied | StoreOutcome::Unchanged => trace!(action = name, ?outcome, "dispatched"),
            _ => debug!(action = name, ?outcome, "dispatched"),
        }
        outcome
    }

    /// A copy of the current state
    pub fn snapshot(&self) -> BoardState {
        self.state.borrow().clone()
    }

    /// Receive every future state transition
    pub fn subscribe(&self) -> watch::Receiver<BoardState> {
        self.state.subscribe()
    }

    /// Tasks of `column` in position order
    pub fn tasks_in_column(&self, column: &ColumnId) -> Vec<Task> {
        self.state
            .borrow()
            .tasks_in_column(column)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Dispatch `action` ahead of the server, remembering how to undo it
    pub fn optimistic(&self, action: BoardAction) -> OptimisticUpdate {
        let previous = self.snapshot();
        let outcome = self.dispatch(action.clone());
        OptimisticUpdate {
            action,
            previous,
            outcome,
        }
    }

    /// Restore the state from before `update`.
    ///
    /// Changes dispatched after `update` are discarded too; reconcile them again
    /// from the server when that matters.
    pub fn rollback(&self, update: OptimisticUpdate) {
        if !update.outcome.is_change() {
            return;
        }
        debug!(action = update.action.name(), "rolling back optimistic update");
        self.state.send_replace(update.previous);
    }
}
