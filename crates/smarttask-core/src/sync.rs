//! Optimistic Mutation Controller
//!
//! The one implementation of the apply-locally, confirm-or-rollback protocol
//! used by every view that mutates a backend collection. A mutation moves
//! through Idle -> Optimistic -> {Confirmed, RolledBack}; at every observable
//! instant the published collection is the previous state, the optimistic
//! state, or the merged final state.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::hash::Hash;

use crate::entity::Entity;

/// Where a collection of entities is published for the UI to observe.
///
/// `publish` replaces the whole collection; partial writes are impossible by
/// construction.
pub trait StateSlot<T: Clone> {
    fn snapshot(&self) -> Vec<T>;
    fn publish(&self, items: Vec<T>);
}

/// What a successful remote call reports back for the merge step
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteChange<T> {
    /// Server-canonical entity replacing the optimistic placeholder (id 0)
    Created(T),
    /// Server-canonical entity replacing the same-id entry
    Updated(T),
    /// Acknowledged removal; the optimistic state is already final
    Deleted,
}

/// Terminal state of one mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<E> {
    Confirmed,
    RolledBack(E),
}

/// Rejection before any local or remote effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationRejected {
    /// A mutation for the same entity is still awaiting its response
    InFlight,
}

impl fmt::Display for MutationRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationRejected::InFlight => {
                write!(f, "a change to this entity is still being saved")
            }
        }
    }
}

impl std::error::Error for MutationRejected {}

/// Tracks in-flight mutations for one collection.
///
/// Interior mutability is enough: the client runs on a single-threaded event
/// loop and suspension points only occur at the remote call boundary.
#[derive(Debug, Default)]
pub struct MutationController<I: Copy + Eq + Hash> {
    in_flight: RefCell<HashSet<I>>,
}

impl<I: Copy + Eq + Hash> MutationController<I> {
    pub fn new() -> Self {
        Self {
            in_flight: RefCell::new(HashSet::new()),
        }
    }

    /// Whether a mutation targeting `id` is awaiting its response
    pub fn is_in_flight(&self, id: I) -> bool {
        self.in_flight.borrow().contains(&id)
    }

    /// Apply one mutation optimistically and reconcile with the backend.
    ///
    /// `target` is the id of the entity being updated or deleted, or None
    /// for a create. For update/delete the id must be present in the
    /// collection; a missing target is a programmer error and panics.
    ///
    /// Two mutations racing on the same entity are not ordered by the
    /// backend, so the second is rejected while the first is in flight.
    pub async fn apply<T, S, M, R, Fut, E>(
        &self,
        slot: &S,
        target: Option<I>,
        mutate: M,
        remote: R,
    ) -> Result<Outcome<E>, MutationRejected>
    where
        T: Entity<Id = I>,
        S: StateSlot<T>,
        M: FnOnce(&[T]) -> Vec<T>,
        R: FnOnce() -> Fut,
        Fut: Future<Output = Result<RemoteChange<T>, E>>,
    {
        let previous = slot.snapshot();
        if let Some(id) = target {
            // The guard comes first: during an optimistic delete the entity
            // is already out of the published snapshot, and that case must
            // reject, not trip the presence assert.
            if self.is_in_flight(id) {
                return Err(MutationRejected::InFlight);
            }
            assert!(
                previous.iter().any(|e| e.id() == id),
                "mutation target is not present in the collection"
            );
            self.in_flight.borrow_mut().insert(id);
        }

        let optimistic = mutate(&previous);
        slot.publish(optimistic.clone());

        let result = remote().await;

        if let Some(id) = target {
            self.in_flight.borrow_mut().remove(&id);
        }

        match result {
            Ok(change) => {
                slot.publish(merge(optimistic, change));
                Ok(Outcome::Confirmed)
            }
            Err(err) => {
                // Full rollback, never a partial merge
                slot.publish(previous);
                Ok(Outcome::RolledBack(err))
            }
        }
    }
}

/// Fold server-canonical fields into the optimistic state
fn merge<T: Entity>(mut optimistic: Vec<T>, change: RemoteChange<T>) -> Vec<T> {
    match change {
        RemoteChange::Created(canonical) => {
            if let Some(placeholder) = optimistic.iter_mut().find(|e| !e.is_persisted()) {
                *placeholder = canonical;
            } else {
                optimistic.push(canonical);
            }
            optimistic
        }
        RemoteChange::Updated(canonical) => {
            if let Some(entry) = optimistic.iter_mut().find(|e| e.id() == canonical.id()) {
                *entry = canonical;
            }
            optimistic
        }
        RemoteChange::Deleted => optimistic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use std::rc::Rc;

    /// Plain in-memory slot recording every published state
    #[derive(Clone, Default)]
    pub(crate) struct MemorySlot {
        state: Rc<RefCell<Vec<Task>>>,
        history: Rc<RefCell<Vec<Vec<Task>>>>,
    }

    impl MemorySlot {
        pub(crate) fn seeded(items: Vec<Task>) -> Self {
            let slot = Self::default();
            *slot.state.borrow_mut() = items;
            slot
        }

        pub(crate) fn current(&self) -> Vec<Task> {
            self.state.borrow().clone()
        }

        pub(crate) fn publish_count(&self) -> usize {
            self.history.borrow().len()
        }
    }

    impl StateSlot<Task> for MemorySlot {
        fn snapshot(&self) -> Vec<Task> {
            self.state.borrow().clone()
        }

        fn publish(&self, items: Vec<Task>) {
            self.history.borrow_mut().push(items.clone());
            *self.state.borrow_mut() = items;
        }
    }

    fn saved_task(id: u32, title: &str, status: &str) -> Task {
        Task {
            id,
            ..Task::draft(title, "", status, 42)
        }
    }

    #[tokio::test]
    async fn test_confirmed_update_keeps_canonical_fields() {
        let slot = MemorySlot::seeded(vec![saved_task(1, "Implement login", "pending")]);
        let controller = MutationController::new();

        let mut canonical = saved_task(1, "Implement login", "completed");
        canonical.completion_date = Some("2026-08-25T10:00:00Z".to_string());
        let response = canonical.clone();

        let outcome = controller
            .apply(
                &slot,
                Some(1),
                |items| {
                    items
                        .iter()
                        .cloned()
                        .map(|mut t| {
                            if t.id == 1 {
                                t.status = "completed".to_string();
                            }
                            t
                        })
                        .collect()
                },
                move || async move { Ok::<_, String>(RemoteChange::Updated(response)) },
            )
            .await
            .expect("not rejected");

        assert_eq!(outcome, Outcome::Confirmed);
        assert_eq!(slot.current(), vec![canonical]);
    }

    #[tokio::test]
    async fn test_failed_update_rolls_back_verbatim() {
        let before = vec![saved_task(1, "Implement login", "pending")];
        let slot = MemorySlot::seeded(before.clone());
        let controller = MutationController::new();

        let outcome = controller
            .apply(
                &slot,
                Some(1),
                |items| {
                    items
                        .iter()
                        .cloned()
                        .map(|mut t| {
                            t.status = "completed".to_string();
                            t
                        })
                        .collect()
                },
                || async { Err::<RemoteChange<Task>, _>("network error".to_string()) },
            )
            .await
            .expect("not rejected");

        assert_eq!(outcome, Outcome::RolledBack("network error".to_string()));
        // Same entities, same order
        assert_eq!(slot.current(), before);
        // Optimistic publish then rollback publish
        assert_eq!(slot.publish_count(), 2);
    }

    #[tokio::test]
    async fn test_create_merge_replaces_placeholder_exactly_once() {
        let slot = MemorySlot::seeded(vec![saved_task(1, "Existing", "pending")]);
        let controller = MutationController::new();

        let canonical = saved_task(99, "Implement login", "pending");
        let response = canonical.clone();

        let outcome = controller
            .apply(
                &slot,
                None,
                |items| {
                    let mut next = items.to_vec();
                    next.push(Task::draft("Implement login", "", "pending", 42));
                    next
                },
                move || async move { Ok::<_, String>(RemoteChange::Created(response)) },
            )
            .await
            .expect("not rejected");

        assert_eq!(outcome, Outcome::Confirmed);
        let final_state = slot.current();
        assert_eq!(final_state.len(), 2);
        assert_eq!(final_state.iter().filter(|t| t.id == 99).count(), 1);
        assert!(final_state.iter().all(|t| t.id != 0), "no orphan placeholder");
        assert_eq!(final_state[1], canonical);
    }

    #[tokio::test]
    async fn test_delete_is_final_on_success() {
        let slot = MemorySlot::seeded(vec![
            saved_task(1, "Keep", "pending"),
            saved_task(2, "Remove", "pending"),
        ]);
        let controller = MutationController::new();

        let outcome = controller
            .apply(
                &slot,
                Some(2),
                |items| items.iter().filter(|t| t.id != 2).cloned().collect(),
                || async { Ok::<_, String>(RemoteChange::Deleted) },
            )
            .await
            .expect("not rejected");

        assert_eq!(outcome, Outcome::Confirmed);
        assert_eq!(slot.current(), vec![saved_task(1, "Keep", "pending")]);
    }

    #[tokio::test]
    async fn test_second_mutation_on_same_entity_is_rejected() {
        let slot = MemorySlot::seeded(vec![saved_task(1, "Contended", "pending")]);
        let controller = MutationController::new();

        // Simulate an in-flight first mutation by checking the guard from
        // inside the second one's remote call.
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let first = controller.apply(
            &slot,
            Some(1),
            |items| items.to_vec(),
            move || async move {
                rx.await.expect("release signal");
                Ok::<_, String>(RemoteChange::Deleted)
            },
        );
        tokio::pin!(first);

        // Poll the first mutation up to its suspension point
        futures_poll_once(first.as_mut()).await;
        assert!(controller.is_in_flight(1));

        let second = controller
            .apply(
                &slot,
                Some(1),
                |items| items.to_vec(),
                || async { Ok::<_, String>(RemoteChange::Deleted) },
            )
            .await;
        assert_eq!(second, Err(MutationRejected::InFlight));

        tx.send(()).expect("release first mutation");
        let outcome = first.await.expect("not rejected");
        assert_eq!(outcome, Outcome::Confirmed);
        assert!(!controller.is_in_flight(1));
    }

    #[tokio::test]
    async fn test_mutation_during_in_flight_delete_is_rejected() {
        let slot = MemorySlot::seeded(vec![saved_task(1, "Doomed", "pending")]);
        let controller = MutationController::new();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let delete = controller.apply(
            &slot,
            Some(1),
            |items| items.iter().filter(|t| t.id != 1).cloned().collect(),
            move || async move {
                rx.await.expect("release signal");
                Ok::<_, String>(RemoteChange::Deleted)
            },
        );
        tokio::pin!(delete);

        // Park the delete at its suspension point: the optimistic removal
        // is already published, so the entity is gone from the snapshot
        futures_poll_once(delete.as_mut()).await;
        assert!(controller.is_in_flight(1));
        assert!(slot.current().is_empty());

        // The follow-up must be rejected, not treated as a missing target
        let second = controller
            .apply(
                &slot,
                Some(1),
                |items| items.to_vec(),
                || async { Ok::<_, String>(RemoteChange::Deleted) },
            )
            .await;
        assert_eq!(second, Err(MutationRejected::InFlight));

        tx.send(()).expect("release delete");
        let outcome = delete.await.expect("not rejected");
        assert_eq!(outcome, Outcome::Confirmed);
        assert!(!controller.is_in_flight(1));
    }

    #[tokio::test]
    async fn test_disjoint_entities_are_independent() {
        let slot = MemorySlot::seeded(vec![
            saved_task(1, "First", "pending"),
            saved_task(2, "Second", "pending"),
        ]);
        let controller = MutationController::new();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let first = controller.apply(
            &slot,
            Some(1),
            |items| items.to_vec(),
            move || async move {
                rx.await.expect("release signal");
                Ok::<_, String>(RemoteChange::Deleted)
            },
        );
        tokio::pin!(first);
        futures_poll_once(first.as_mut()).await;

        let second = controller
            .apply(
                &slot,
                Some(2),
                |items| items.to_vec(),
                || async { Ok::<_, String>(RemoteChange::Deleted) },
            )
            .await;
        assert!(second.is_ok());

        tx.send(()).expect("release first mutation");
        assert!(first.await.is_ok());
    }

    #[tokio::test]
    #[should_panic(expected = "mutation target is not present")]
    async fn test_missing_target_is_a_contract_violation() {
        let slot = MemorySlot::seeded(vec![saved_task(1, "Only", "pending")]);
        let controller = MutationController::new();
        let _ = controller
            .apply(
                &slot,
                Some(7),
                |items| items.to_vec(),
                || async { Ok::<_, String>(RemoteChange::Deleted) },
            )
            .await;
    }

    /// Poll a future exactly once, dropping the result if it completes
    async fn futures_poll_once<F: Future + Unpin>(mut fut: F) {
        use std::pin::Pin;
        use std::task::{Context, Poll};

        struct Once<'a, F>(&'a mut F);
        impl<F: Future + Unpin> Future for Once<'_, F> {
            type Output = ();
            fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
                let _ = Pin::new(&mut *self.0).poll(cx);
                Poll::Ready(())
            }
        }
        Once(&mut fut).await;
    }
}
