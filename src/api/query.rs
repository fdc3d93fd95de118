//! Read-side projection served to display clients

use chrono::{DateTime, Utc};

use crate::{
    error::StoreError,
    state::{DisplayState, StateStore},
};

/// Read-only view over the store. Never takes the write lock.
#[derive(Debug, Clone, Copy)]
pub struct QueryService<'a> {
    store: &'a StateStore,
}

impl<'a> QueryService<'a> {
    pub fn new(store: &'a StateStore) -> Self {
        Self { store }
    }

    /// Live display state right now
    pub fn current(&self) -> Result<DisplayState, StoreError> {
        self.current_at(Utc::now())
    }

    /// Display state as of `now`; the snapshot is taken under one read lock
    pub fn current_at(&self, now: DateTime<Utc>) -> Result<DisplayState, StoreError> {
        Ok(self.store.snapshot()?.display_at(now))
    }
}
