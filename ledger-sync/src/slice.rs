//! Operation set for one entity type, wired through the gateway into the reducer.
//!
//! # Responsibility
//! - Dispatch the six operations, applying pending and settled transitions.
//! - Dispatch the dependent fetch-list after writes as a spawned task.
//! - Publish state to views through a `watch` channel.
//!
//! # Invariants
//! - State is mutated only inside `watch::Sender::send_modify`, one transition
//!   per call, so every transition is applied atomically.
//! - Operations never return errors; failures land in `error_message`.
//! - Concurrent operations are not serialized: the last one to settle wins
//!   the shared fields.
//! - Operations that refetch must run inside a Tokio runtime.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::core::entity::{Entity, EntityId};
use crate::core::operation::{OperationKind, Transition};
use crate::core::ordering::SortDirective;
use crate::core::reducer;
use crate::core::refresh::requires_refetch;
use crate::core::sanitize::sanitize_record;
use crate::core::state::EntityState;
use crate::io::error::TransportError;
use crate::io::gateway::{Gateway, GatewayRequest};

/// How an operation settled, as seen by its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<P = ()> {
    Fulfilled(P),
    Rejected { message: String },
}

impl<P> Settled<P> {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settled::Fulfilled(_))
    }

    pub fn fulfilled(self) -> Option<P> {
        match self {
            Settled::Fulfilled(payload) => Some(payload),
            Settled::Rejected { .. } => None,
        }
    }

    pub fn rejection(&self) -> Option<&str> {
        match self {
            Settled::Fulfilled(_) => None,
            Settled::Rejected { message } => Some(message),
        }
    }
}

/// Cheap-clone handle to one entity type's state and operations.
pub struct EntitySlice<T: Entity, G: Gateway> {
    inner: Arc<SliceInner<T, G>>,
}

struct SliceInner<T: Entity, G: Gateway> {
    gateway: Arc<G>,
    state: watch::Sender<EntityState<T>>,
    dependents: Mutex<Vec<JoinHandle<()>>>,
}

impl<T: Entity, G: Gateway> Clone for EntitySlice<T, G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Entity, G: Gateway> fmt::Debug for EntitySlice<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySlice")
            .field("entity", &T::NAME)
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

impl<T: Entity, G: Gateway> EntitySlice<T, G> {
    /// Create a slice in the initial state.
    pub fn new(gateway: Arc<G>) -> Self {
        let (state, _) = watch::channel(EntityState::default());
        Self {
            inner: Arc::new(SliceInner {
                gateway,
                state,
                dependents: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> EntityState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified after every transition.
    pub fn subscribe(&self) -> watch::Receiver<EntityState<T>> {
        self.inner.state.subscribe()
    }

    /// Fetch the collection and replace `entities`, ordered per `sort`.
    pub async fn fetch_list(&self, sort: Option<SortDirective>) -> Settled {
        self.transition(Transition::Pending(OperationKind::FetchList));
        self.complete_fetch_list(sort).await
    }

    /// Fetch one record into `entity`.
    pub async fn fetch_one(&self, id: impl Into<EntityId>) -> Settled<T> {
        let kind = OperationKind::FetchOne;
        self.transition(Transition::Pending(kind));
        let id = id.into();
        match self.call::<T>(GatewayRequest::get::<T>(&id)).await {
            Ok(record) => {
                self.transition(Transition::FetchedOne(record.clone()));
                Settled::Fulfilled(record)
            }
            Err(err) => self.reject(kind, &err),
        }
    }

    /// Create `record`; refetches the collection only when fulfilled.
    pub async fn create(&self, record: T) -> Settled<T> {
        let kind = OperationKind::Create;
        self.transition(Transition::Pending(kind));
        let outcome = match sanitize_record(&record) {
            Ok(body) => self.call::<T>(GatewayRequest::create::<T>(body)).await,
            Err(err) => Err(TransportError::InvalidRequest(err.to_string())),
        };
        self.settle_write(kind, outcome)
    }

    /// Replace the record identified by `record.id()`.
    ///
    /// The dependent refetch is dispatched whether or not the update succeeds.
    pub async fn update(&self, record: T) -> Settled<T> {
        self.write_existing(OperationKind::Update, record).await
    }

    /// Patch the record identified by `record.id()`.
    ///
    /// The dependent refetch is dispatched whether or not the patch succeeds.
    pub async fn partial_update(&self, record: T) -> Settled<T> {
        self.write_existing(OperationKind::PartialUpdate, record).await
    }

    /// Delete a record; on success `entity` becomes the empty record and the
    /// collection is refetched. A failed delete issues no refetch.
    pub async fn delete(&self, id: impl Into<EntityId>) -> Settled {
        let kind = OperationKind::Delete;
        self.transition(Transition::Pending(kind));
        let id = id.into();
        match self.inner.gateway.send(GatewayRequest::delete::<T>(&id)).await {
            Ok(_) => {
                self.dispatch_refetch(kind, true);
                self.transition(Transition::Deleted);
                Settled::Fulfilled(())
            }
            Err(err) => {
                self.dispatch_refetch(kind, false);
                self.reject(kind, &err)
            }
        }
    }

    /// Restore the initial state. In-flight operations still settle into it.
    pub fn reset(&self) {
        self.transition(Transition::Reset);
    }

    /// Await every dependent refetch dispatched so far.
    ///
    /// Callers of write operations are not made to wait for the refetch; this
    /// is the hook for those that need to.
    pub async fn settle_dependents(&self) {
        loop {
            let handles = std::mem::take(&mut *self.lock_dependents());
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(err) = handle.await {
                    warn!(entity = T::NAME, err = %err, "dependent refetch task failed");
                }
            }
        }
    }

    /// Update or patch by id. The dependent refetch is dispatched when the
    /// write settles, not when it is issued, so it never reads ahead of it.
    async fn write_existing(&self, kind: OperationKind, record: T) -> Settled<T> {
        self.transition(Transition::Pending(kind));
        let outcome = match (record.id(), sanitize_record(&record)) {
            (Some(id), Ok(body)) => {
                let request = match kind {
                    OperationKind::PartialUpdate => GatewayRequest::partial_update::<T>(&id, body),
                    _ => GatewayRequest::update::<T>(&id, body),
                };
                self.call::<T>(request).await
            }
            (None, _) => {
                let verb = match kind {
                    OperationKind::PartialUpdate => "patch",
                    _ => "update",
                };
                Err(TransportError::InvalidRequest(format!(
                    "cannot {verb} {} without an id",
                    T::NAME
                )))
            }
            (_, Err(err)) => Err(TransportError::InvalidRequest(err.to_string())),
        };
        self.settle_write(kind, outcome)
    }

    /// Settle create/update/partial-update.
    ///
    /// The refetch's pending transition goes first so that the write's
    /// `update_success` survives it.
    fn settle_write(&self, kind: OperationKind, outcome: Result<T, TransportError>) -> Settled<T> {
        self.dispatch_refetch(kind, outcome.is_ok());
        match outcome {
            Ok(record) => {
                self.transition(Transition::Written {
                    kind,
                    record: record.clone(),
                });
                Settled::Fulfilled(record)
            }
            Err(err) => self.reject(kind, &err),
        }
    }

    async fn complete_fetch_list(&self, sort: Option<SortDirective>) -> Settled {
        let request = GatewayRequest::list::<T>(sort.as_ref(), cache_buster());
        match self.call::<Vec<T>>(request).await {
            Ok(records) => {
                debug!(entity = T::NAME, count = records.len(), "collection fetched");
                self.transition(Transition::FetchedList { records, sort });
                Settled::Fulfilled(())
            }
            Err(err) => self.reject(OperationKind::FetchList, &err),
        }
    }

    /// Start the dependent fetch-list for a settled write, if the rule asks for one.
    ///
    /// The pending transition is applied now; the gateway call runs on a
    /// spawned task that the write's caller does not await.
    fn dispatch_refetch(&self, trigger: OperationKind, fulfilled: bool) {
        if !requires_refetch(trigger, fulfilled) {
            return;
        }
        debug!(entity = T::NAME, trigger = %trigger, fulfilled, "dispatching dependent refetch");
        self.transition(Transition::Pending(OperationKind::FetchList));
        let slice = self.clone();
        let handle = tokio::spawn(async move {
            slice.complete_fetch_list(None).await;
        });
        let mut dependents = self.lock_dependents();
        dependents.retain(|handle| !handle.is_finished());
        dependents.push(handle);
    }

    async fn call<P: DeserializeOwned>(&self, request: GatewayRequest) -> Result<P, TransportError> {
        let body = self.inner.gateway.send(request).await?;
        serde_json::from_value(body).map_err(|err| TransportError::Decode(err.to_string()))
    }

    fn reject<P>(&self, kind: OperationKind, err: &TransportError) -> Settled<P> {
        let message = err.to_string();
        warn!(operation = %kind.identity::<T>(), err = %message, "operation rejected");
        self.transition(Transition::Rejected {
            kind,
            message: message.clone(),
        });
        Settled::Rejected { message }
    }

    fn transition(&self, transition: Transition<T>) {
        if let Some(kind) = transition.kind() {
            debug!(operation = %kind.identity::<T>(), "transition");
        }
        self.inner
            .state
            .send_modify(move |state| reducer::apply(state, transition));
    }

    fn lock_dependents(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.inner
            .dependents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn cache_buster() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
