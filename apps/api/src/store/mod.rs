//! Session state container.
//!
//! `PortalState` is plain data, `reduce` is the only way it changes, and
//! `Store` is the shared handle the HTTP layer dispatches intents through.
//! The lock is held for one transition at a time and never across an await
//! on the AI adapter.

pub mod reducer;
pub mod state;
pub mod views;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use reducer::{reduce, Intent, StoreError};
pub use state::{BusyKey, PortalState};

#[derive(Clone)]
pub struct Store {
    inner: Arc<Mutex<PortalState>>,
}

impl Store {
    pub fn new(state: PortalState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// A store holding the demo catalog with the seeker signed in.
    pub fn seeded() -> Self {
        Self::new(PortalState::seeded())
    }

    /// Runs `f` against the current state.
    pub async fn read<R>(&self, f: impl FnOnce(&PortalState) -> R) -> R {
        let guard = self.inner.lock().await;
        f(&guard)
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> PortalState {
        self.read(PortalState::clone).await
    }

    /// Applies one intent. On error the state is left untouched.
    pub async fn dispatch(&self, intent: Intent) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        let next = reduce(&guard, intent)?;
        *guard = next;
        Ok(())
    }
}
