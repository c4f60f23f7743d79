//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Collections are
//! in-memory mirrors of the backend; they are discarded on logout.

use leptos::prelude::*;
use reactive_stores::Store;
use smarttask_core::{Project, Task};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All projects for the logged-in user
    pub projects: Vec<Project>,
    /// Tasks of the currently selected project
    pub tasks: Vec<Task>,
    /// Currently selected project ID (0 = none)
    pub current_project_id: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// The currently selected project, if any
pub fn store_current_project(store: &AppStore) -> Option<Project> {
    let id = store.current_project_id().get();
    store.projects().get().into_iter().find(|p| p.id == id)
}

/// Select a project and drop the previous project's tasks
pub fn store_select_project(store: &AppStore, project_id: u32) {
    store.current_project_id().set(project_id);
    store.tasks().set(Vec::new());
}

/// Discard all collections at session teardown
pub fn store_clear(store: &AppStore) {
    store.projects().set(Vec::new());
    store.tasks().set(Vec::new());
    store.current_project_id().set(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarttask_core::Priority;

    fn project(id: u32, title: &str) -> Project {
        Project {
            id,
            ..Project::draft(title, "", Priority::Medium)
        }
    }

    #[test]
    fn test_current_project_follows_selection() {
        let store: AppStore = Store::new(AppState::default());
        store
            .projects()
            .set(vec![project(1, "One"), project(2, "Two")]);

        assert_eq!(store_current_project(&store), None);

        store.current_project_id().set(2);
        assert_eq!(
            store_current_project(&store).map(|p| p.title),
            Some("Two".to_string())
        );
    }

    #[test]
    fn test_select_project_drops_previous_tasks() {
        let store: AppStore = Store::new(AppState::default());
        store.projects().set(vec![project(1, "One")]);
        store
            .tasks()
            .set(vec![Task::draft("Leftover", "", "pending", 7)]);

        store_select_project(&store, 1);

        assert_eq!(store.current_project_id().get(), 1);
        assert!(store.tasks().get().is_empty());
    }
}
