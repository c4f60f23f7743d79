//! End-to-End Protocol Scenarios
//!
//! Exercises validation and the mutation controller together, the way the
//! kanban board drives them.

use std::cell::RefCell;
use std::rc::Rc;

use crate::column::{default_columns, template_columns, Column};
use crate::intent::{IntentAction, VoiceIntentResponse};
use crate::project::{Priority, Project};
use crate::status::{plan_transition, Transition};
use crate::sync::{MutationController, Outcome, RemoteChange, StateSlot};
use crate::task::Task;

#[derive(Clone, Default)]
struct CellSlot {
    state: Rc<RefCell<Vec<Task>>>,
}

impl CellSlot {
    fn seeded(items: Vec<Task>) -> Self {
        let slot = Self::default();
        *slot.state.borrow_mut() = items;
        slot
    }

    fn current(&self) -> Vec<Task> {
        self.state.borrow().clone()
    }
}

impl StateSlot<Task> for CellSlot {
    fn snapshot(&self) -> Vec<Task> {
        self.state.borrow().clone()
    }

    fn publish(&self, items: Vec<Task>) {
        *self.state.borrow_mut() = items;
    }
}

fn saved_task(id: u32, title: &str, status: &str) -> Task {
    Task {
        id,
        ..Task::draft(title, "", status, 42)
    }
}

/// Minimal stand-in for the backend: assigns ids and stores canonical state
#[derive(Default)]
struct FakeBackend {
    tasks: RefCell<Vec<Task>>,
    next_id: RefCell<u32>,
}

impl FakeBackend {
    fn with_tasks(tasks: Vec<Task>, next_id: u32) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            next_id: RefCell::new(next_id),
        }
    }

    fn create(&self, draft: &Task) -> Task {
        let mut id = self.next_id.borrow_mut();
        let task = Task {
            id: *id,
            creation_date: Some("2026-08-25T00:00:00Z".to_string()),
            ..draft.clone()
        };
        *id += 1;
        self.tasks.borrow_mut().push(task.clone());
        task
    }

    fn update(&self, updated: &Task) -> Task {
        let mut tasks = self.tasks.borrow_mut();
        if let Some(entry) = tasks.iter_mut().find(|t| t.id == updated.id) {
            *entry = updated.clone();
        }
        updated.clone()
    }

    fn delete(&self, id: u32) {
        self.tasks.borrow_mut().retain(|t| t.id != id);
    }
}

#[tokio::test]
async fn test_successful_mutation_sequence_converges_with_backend() {
    let initial = vec![saved_task(1, "Implement login", "pending")];
    let backend = FakeBackend::with_tasks(initial.clone(), 99);
    let slot = CellSlot::seeded(initial);
    let controller = MutationController::new();
    let columns = default_columns();

    // Create a task
    let draft = Task::draft("Write report", "", "pending", 42);
    let create_draft = draft.clone();
    controller
        .apply(
            &slot,
            None,
            |items| {
                let mut next = items.to_vec();
                next.push(draft.clone());
                next
            },
            || async { Ok::<_, String>(RemoteChange::Created(backend.create(&create_draft))) },
        )
        .await
        .expect("create not rejected");

    // Drag the created task to completed
    let task = slot
        .current()
        .into_iter()
        .find(|t| t.id == 99)
        .expect("server id present");
    let status = match plan_transition(&task, "completed", &columns) {
        Transition::Move(status) => status,
        other => panic!("expected a valid move, got {:?}", other),
    };
    let moved = Task {
        status: status.clone(),
        ..task.clone()
    };
    controller
        .apply(
            &slot,
            Some(99),
            |items| {
                items
                    .iter()
                    .cloned()
                    .map(|mut t| {
                        if t.id == 99 {
                            t.status = status.clone();
                        }
                        t
                    })
                    .collect()
            },
            || async { Ok::<_, String>(RemoteChange::Updated(backend.update(&moved))) },
        )
        .await
        .expect("update not rejected");

    // Delete the original task
    controller
        .apply(
            &slot,
            Some(1),
            |items| items.iter().filter(|t| t.id != 1).cloned().collect(),
            || async {
                backend.delete(1);
                Ok::<_, String>(RemoteChange::Deleted)
            },
        )
        .await
        .expect("delete not rejected");

    // Local state equals what the backend will report
    assert_eq!(slot.current(), backend.tasks.borrow().clone());
}

#[tokio::test]
async fn test_failed_drag_reverts_and_reports_once() {
    let before = vec![saved_task(1, "Implement login", "pending")];
    let slot = CellSlot::seeded(before.clone());
    let controller = MutationController::new();

    let task = &before[0];
    let status = match plan_transition(task, "completed", &default_columns()) {
        Transition::Move(status) => status,
        other => panic!("expected a valid move, got {:?}", other),
    };

    let mut failure_notices = 0;
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
                            t.status = status.clone();
                        }
                        t
                    })
                    .collect()
            },
            || async { Err::<RemoteChange<Task>, _>("network error".to_string()) },
        )
        .await
        .expect("not rejected");

    if let Outcome::RolledBack(_) = outcome {
        failure_notices += 1;
    }
    assert_eq!(failure_notices, 1);
    assert_eq!(slot.current(), before);
}

#[test]
fn test_invalid_drop_never_reaches_the_controller() {
    let tasks = vec![saved_task(1, "Implement login", "pending")];
    let slot = CellSlot::seeded(tasks.clone());

    // The board treats Invalid and NoOp as silent no-ops
    let plan = plan_transition(&tasks[0], "archived", &default_columns());
    assert_eq!(plan, Transition::Invalid);
    let plan = plan_transition(&tasks[0], "pending", &default_columns());
    assert_eq!(plan, Transition::NoOp);

    assert_eq!(slot.current(), tasks);
}

#[tokio::test]
async fn test_voice_create_takes_the_same_path_as_a_form_create() {
    let response: VoiceIntentResponse = serde_json::from_str(
        r#"{"action":"createTask","taskDetails":{"title":"Write report"}}"#,
    )
    .expect("valid response");
    let details = match response.classify() {
        IntentAction::CreateTask(details) => details,
        other => panic!("expected a create action, got {:?}", other),
    };

    let backend = FakeBackend::with_tasks(Vec::new(), 99);
    let slot = CellSlot::default();
    let controller = MutationController::new();

    // Exactly the draft-insert mutation the task form runs
    let title = details.title.expect("title extracted");
    let draft = Task::draft(&title, "", "pending", 42);
    let create_draft = draft.clone();
    controller
        .apply(
            &slot,
            None,
            |items| {
                let mut next = items.to_vec();
                next.push(draft.clone());
                next
            },
            || async { Ok::<_, String>(RemoteChange::Created(backend.create(&create_draft))) },
        )
        .await
        .expect("create not rejected");

    let final_state = slot.current();
    assert_eq!(final_state.len(), 1);
    assert_eq!(final_state[0].id, 99);
    assert_eq!(final_state[0].title, "Write report");
    assert_eq!(final_state[0].status, "pending");
    assert_eq!(final_state, backend.tasks.borrow().clone());
}

#[test]
fn test_project_column_resolution_precedence() {
    let mut project = Project::draft("Rewrite", "", Priority::High);

    // No columns, no template: default statuses
    assert_eq!(project.columns(), default_columns());

    // Known template wins over the default
    project.kanban_template = Some("architecture".to_string());
    assert_eq!(
        project.columns(),
        template_columns("architecture").expect("known template")
    );

    // Unknown template falls back to the default
    project.kanban_template = Some("no_such_template".to_string());
    assert_eq!(project.columns(), default_columns());

    // Explicit columns win over everything
    let custom = vec![Column::new("triage", "Triage", "#000", "")];
    project.kanban_columns = Some(custom.clone());
    assert_eq!(project.columns(), custom);

    // An empty explicit list does not shadow the template fallback
    project.kanban_template = Some("architecture".to_string());
    project.kanban_columns = Some(Vec::new());
    assert_eq!(
        project.columns(),
        template_columns("architecture").expect("known template")
    );
}
