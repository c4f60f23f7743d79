//! Mutation Controller Glue
//!
//! Binds the core optimistic mutation protocol to the reactive store, the
//! toast queue, and the refresh signal. Every state-changing call in the UI
//! goes through `run_mutation`; no view re-implements rollback on its own.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use smarttask_core::{
    Entity, MutationController, MutationRejected, Outcome, Project, RemoteChange, StateSlot, Task,
};

use crate::api::ApiError;
use crate::context::{AppContext, ToastKind};
use crate::store::AppStateStoreFields;
use crate::store::AppStore;

/// One controller per backend collection, shared via context for the whole
/// session
#[derive(Default)]
pub struct SyncEngine {
    pub projects: MutationController<u32>,
    pub tasks: MutationController<u32>,
}

pub fn use_sync_engine() -> Rc<SyncEngine> {
    expect_context::<StoredValue<Rc<SyncEngine>, LocalStorage>>().get_value()
}

/// `StateSlot` adapter over a pair of store accessors
pub struct StoreSlot<T> {
    snapshot: Box<dyn Fn() -> Vec<T>>,
    publish: Box<dyn Fn(Vec<T>)>,
}

impl<T> StoreSlot<T> {
    pub fn new(
        snapshot: impl Fn() -> Vec<T> + 'static,
        publish: impl Fn(Vec<T>) + 'static,
    ) -> Self {
        Self {
            snapshot: Box::new(snapshot),
            publish: Box::new(publish),
        }
    }
}

impl<T: Clone> StateSlot<T> for StoreSlot<T> {
    fn snapshot(&self) -> Vec<T> {
        (self.snapshot)()
    }

    fn publish(&self, items: Vec<T>) {
        (self.publish)(items);
    }
}

/// The projects collection as a mutation target
pub fn project_slot(store: AppStore) -> StoreSlot<Project> {
    StoreSlot::new(
        move || store.projects().get_untracked(),
        move |items| store.projects().set(items),
    )
}

/// The selected project's tasks as a mutation target
pub fn task_slot(store: AppStore) -> StoreSlot<Task> {
    StoreSlot::new(
        move || store.tasks().get_untracked(),
        move |items| store.tasks().set(items),
    )
}

/// Drive one optimistic mutation to its terminal state.
///
/// Exactly one notification per mutation: success toast on confirm, error
/// toast on rollback. A 401 takes the session-teardown path instead of a
/// plain failure toast.
pub async fn run_mutation<T, M, R, Fut>(
    controller: &MutationController<u32>,
    ctx: AppContext,
    slot: StoreSlot<T>,
    target: Option<u32>,
    success_message: String,
    mutate: M,
    remote: R,
) where
    T: Entity<Id = u32> + 'static,
    M: FnOnce(&[T]) -> Vec<T>,
    R: FnOnce() -> Fut,
    Fut: Future<Output = Result<RemoteChange<T>, ApiError>>,
{
    match controller.apply(&slot, target, mutate, remote).await {
        Err(MutationRejected::InFlight) => {
            ctx.notify(
                ToastKind::Warning,
                "The previous change is still being saved. Try again in a moment.",
            );
        }
        Ok(Outcome::Confirmed) => {
            ctx.notify(ToastKind::Success, success_message);
            ctx.reload();
        }
        Ok(Outcome::RolledBack(ApiError::Unauthorized)) => {
            ctx.expire_session();
        }
        Ok(Outcome::RolledBack(err)) => {
            web_sys::console::error_1(&format!("[SYNC] mutation rolled back: {}", err).into());
            ctx.notify(ToastKind::Error, format!("{}. Please try again.", err));
        }
    }
}
