//! Shared client-side state.
//!
//! Actions never write fields directly; they commit a [`Mutation`] and the
//! store applies it under a lock.

mod mutation;
mod state;

pub use mutation::Mutation;
pub use state::State;

use std::sync::{Arc, PoisonError, RwLock};

/// Cheaply cloneable handle to the shared [`State`].
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<RwLock<State>>,
    initial: Arc<State>,
}

impl Store {
    pub fn new(initial: State) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial.clone())),
            initial: Arc::new(initial),
        }
    }

    /// Apply one mutation.
    pub fn commit(&self, mutation: Mutation) {
        tracing::debug!(mutation = mutation.name(), "commit");
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        mutation.apply(&mut state);
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> State {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Read one value without cloning the whole state.
    pub fn read<R>(&self, f: impl FnOnce(&State) -> R) -> R {
        f(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Restore the state the store was created with.
    pub fn reset(&self) {
        tracing::debug!("reset");
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *state = (*self.initial).clone();
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(State::default())
    }
}
