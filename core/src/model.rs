//! The `Model` facade over attributes, events and remote sync.
//!
//! # Design
//! `Model` never builds its collaborators; it is handed one attributes store,
//! one event hub and one sync adapter and forwards to them. The only logic
//! of its own is the orchestration around `set`, `fetch` and `save`:
//!
//! - `set` merges, then emits `"change"`, so listeners see the new state.
//! - `fetch` checks the `id` attribute before anything else and reports a
//!   missing or non-numeric id synchronously. Remote failures are *not*
//!   intercepted: they come back through the returned future untouched and
//!   no event fires.
//! - `save` never fails from the caller's point of view: the outcome is
//!   reported as exactly one `"save"` or `"error"` event.
//!
//! Nothing is queued. Overlapping operations run independently and the last
//! fetch to complete decides the merged state.

use std::future::Future;
use std::marker::PhantomData;

use serde_json::Value;

use crate::attributes::ModelAttributes;
use crate::error::{ModelError, SyncError};
use crate::events::{self, Events};
use crate::record::{self, Record};
use crate::sync::RemoteSync;

pub struct Model<T, A, E, S> {
    attributes: A,
    events: E,
    sync: S,
    record: PhantomData<fn() -> T>,
}

impl<T, A, E, S> Model<T, A, E, S>
where
    T: Record,
    A: ModelAttributes<T>,
    E: Events,
    S: RemoteSync<T>,
{
    pub fn new(attributes: A, events: E, sync: S) -> Self {
        Self {
            attributes,
            events,
            sync,
            record: PhantomData,
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.attributes.get(key)
    }

    pub fn on<F>(&self, event_name: &str, callback: F)
    where
        F: Fn() + 'static,
    {
        self.events.on(event_name, callback);
    }

    pub fn trigger(&self, event_name: &str) {
        self.events.trigger(event_name);
    }

    /// Merge `update`, then trigger `"change"`.
    ///
    /// The attributes are no longer borrowed when listeners run, so a
    /// listener may read or write the model.
    ///
    /// # Panics
    ///
    /// Panics if called from inside `ModelAttributes::with_all` on this
    /// model's store.
    pub fn set(&self, update: T::Patch) {
        self.attributes.set(update);
        self.events.trigger(events::CHANGE);
    }

    /// Refresh the attributes from the remote copy identified by `id`.
    ///
    /// Returns `Err(ModelError::InvalidId)` without touching the sync adapter
    /// when `id` is absent or not a number, and `Err(ModelError::IdOutOfRange)`
    /// when it is a number that is not an `i64` integer. Otherwise the remote
    /// read is issued and the returned future merges its result via `set`.
    /// A failed read resolves the future to the `SyncError`; the model does
    /// not handle it.
    pub fn fetch(&self) -> Result<impl Future<Output = Result<(), SyncError>> + '_, ModelError> {
        let id = self
            .attributes
            .with_all(|record| record::parse_id(record.id().as_ref()))?;
        let pending = self.sync.fetch(id);
        Ok(async move {
            let update = pending.await?;
            self.set(update);
            Ok(())
        })
    }

    /// Persist a snapshot of the current attributes.
    ///
    /// The snapshot is taken now; later writes do not affect this save. The
    /// outcome is only observable through the `"save"` and `"error"` events.
    pub fn save(&self) -> impl Future<Output = ()> + '_ {
        let pending = self.sync.save(self.attributes.with_all(T::clone));
        async move {
            match pending.await {
                Ok(()) => self.trigger(events::SAVE),
                Err(e) => {
                    tracing::warn!(error = %e, "save failed");
                    self.trigger(events::ERROR);
                }
            }
        }
    }

    pub fn attributes(&self) -> &A {
        &self.attributes
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn sync(&self) -> &S {
        &self.sync
    }
}

impl<T, A, E, S> std::fmt::Debug for Model<T, A, E, S>
where
    A: std::fmt::Debug,
    E: std::fmt::Debug,
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("attributes", &self.attributes)
            .field("events", &self.events)
            .field("sync", &self.sync)
            .finish()
    }
}
