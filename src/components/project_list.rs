//! Projects Page
//!
//! Project cards with create/edit/delete. Deletion is optimistic: the card
//! disappears immediately and comes back if the backend refuses.

use leptos::prelude::*;
use leptos::task::spawn_local;

use smarttask_core::{Priority, Project, RemoteChange};

use crate::api;
use crate::components::ProjectForm;
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;
use crate::store::{store_select_project, use_app_store};
use crate::sync::{project_slot, run_mutation, use_sync_engine};

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    // Copy handle so row handlers stay plain-copyable closures
    let engine = StoredValue::new_local(use_sync_engine());

    let (form_open, set_form_open) = signal(false);
    let (editing, set_editing) = signal(Option::<Project>::None);
    // Two-step delete: first click arms, second click commits
    let (confirming_delete, set_confirming_delete) = signal(Option::<u32>::None);

    let delete_project = move |id: u32| {
        let engine = engine.get_value();
        spawn_local(async move {
            run_mutation(
                &engine.projects,
                ctx,
                project_slot(store),
                Some(id),
                "Project deleted".to_string(),
                |items| items.iter().filter(|p| p.id != id).cloned().collect(),
                || async move { api::delete_project(id).await.map(|_| RemoteChange::Deleted) },
            )
            .await;
        });
    };

    view! {
        <div class="projects-page">
            <div class="page-header">
                <h2>"\u{1F4C1} Projects"</h2>
                <button
                    class="primary"
                    on:click=move |_| {
                        set_editing.set(None);
                        set_form_open.set(true);
                    }
                >
                    "+ New Project"
                </button>
            </div>

            <Show
                when=move || !store.projects().get().is_empty()
                fallback=|| {
                    view! {
                        <div class="empty-state">
                            <h3>"No projects yet"</h3>
                            <p>"Create a project to start organizing your tasks."</p>
                        </div>
                    }
                }
            >
                <div class="project-grid">
                    <For
                        each=move || store.projects().get()
                        key=|project| project.id
                        children=move |project| {
                            let id = project.id;
                            let priority_class = match project.priority {
                                Priority::High => "priority high",
                                Priority::Medium => "priority medium",
                                Priority::Low => "priority low",
                            };
                            let edit_target = project.clone();
                            view! {
                                <div
                                    class="project-card"
                                    on:click=move |_| store_select_project(&store, id)
                                >
                                    <div class="project-card-header">
                                        <h3>{project.title.clone()}</h3>
                                        <span class=priority_class>
                                            {project.priority.as_str().to_uppercase()}
                                        </span>
                                    </div>
                                    <p class="project-description">{project.description.clone()}</p>
                                    {project
                                        .completion_date
                                        .clone()
                                        .map(|date| {
                                            view! {
                                                <p class="project-date">"Target: " {date}</p>
                                            }
                                        })}
                                    <div class="project-card-actions">
                                        <button on:click=move |ev| {
                                            ev.stop_propagation();
                                            set_editing.set(Some(edit_target.clone()));
                                            set_form_open.set(true);
                                        }>"Edit"</button>
                                        <button
                                            class="danger"
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                if confirming_delete.get_untracked() == Some(id) {
                                                    set_confirming_delete.set(None);
                                                    delete_project(id);
                                                } else {
                                                    set_confirming_delete.set(Some(id));
                                                }
                                            }
                                        >
                                            {move || {
                                                if confirming_delete.get() == Some(id) {
                                                    "Really delete?"
                                                } else {
                                                    "Delete"
                                                }
                                            }}
                                        </button>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>

            {move || {
                form_open
                    .get()
                    .then(|| {
                        view! {
                            <ProjectForm
                                editing=editing.get()
                                on_close=Callback::new(move |_| set_form_open.set(false))
                            />
                        }
                    })
            }}
        </div>
    }
}
