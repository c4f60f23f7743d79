//! Kanban Page
//!
//! Project selector plus the drag-and-drop board. Drops are validated
//! against the project's column set before the mutation controller is
//! involved; a drop on an unknown lane or on the card's current lane is a
//! silent no-op.

use std::rc::Rc;

use board_dnd::{bind_global_mouseup, DndSignals};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use smarttask_core::{default_columns, plan_transition, RemoteChange, Task, Transition};

use crate::api::{self, UpdateTaskArgs};
use crate::components::{KanbanColumn, TaskForm};
use crate::context::AppContext;
use crate::store::AppStateStoreFields;
use crate::store::{store_current_project, store_select_project, use_app_store, AppStore};
use crate::sync::{run_mutation, task_slot, SyncEngine};

/// Install the document-level drop handler. Bound once at app start; while
/// the board is not mounted no lane is ever hovered, so drops are no-ops.
pub fn bind_board_drops(dnd: DndSignals, ctx: AppContext, store: AppStore, engine: Rc<SyncEngine>) {
    bind_global_mouseup(dnd, move |task_id, column_id| {
        let tasks = store.tasks().get_untracked();
        let task = match tasks.iter().find(|t| t.id == task_id) {
            Some(task) => task.clone(),
            None => return,
        };
        let current_id = store.current_project_id().get_untracked();
        let columns = store
            .projects()
            .get_untracked()
            .into_iter()
            .find(|p| p.id == current_id)
            .map(|p| p.columns())
            .unwrap_or_else(default_columns);

        match plan_transition(&task, &column_id, &columns) {
            Transition::NoOp => {}
            Transition::Invalid => {
                web_sys::console::warn_1(
                    &format!("[BOARD] ignored drop on unknown column {}", column_id).into(),
                );
            }
            Transition::Move(status) => {
                let target_title = columns
                    .iter()
                    .find(|c| c.id == status)
                    .map(|c| c.title.clone())
                    .unwrap_or_else(|| status.clone());
                let optimistic_status = status.clone();
                let engine = Rc::clone(&engine);

                spawn_local(async move {
                    run_mutation(
                        &engine.tasks,
                        ctx,
                        task_slot(store),
                        Some(task_id),
                        format!("Task moved to {}", target_title),
                        move |items| {
                            items
                                .iter()
                                .cloned()
                                .map(|mut t| {
                                    if t.id == task_id {
                                        t.status = optimistic_status.clone();
                                    }
                                    t
                                })
                                .collect()
                        },
                        move || async move {
                            api::update_task(task_id, &UpdateTaskArgs::status_change(&task, &status))
                                .await
                                .map(RemoteChange::Updated)
                        },
                    )
                    .await;
                });
            }
        }
    });
}

#[component]
pub fn KanbanPage() -> impl IntoView {
    let store = use_app_store();

    let (form_open, set_form_open) = signal(false);
    let (editing_task, set_editing_task) = signal(Option::<Task>::None);
    let (initial_status, set_initial_status) = signal(String::new());

    let current_project = Memo::new(move |_| store_current_project(&store));
    let columns = Memo::new(move |_| {
        current_project
            .get()
            .map(|p| p.columns())
            .unwrap_or_else(default_columns)
    });

    let on_project_change = move |ev: web_sys::Event| {
        let value = ev
            .target()
            .and_then(|t| t.dyn_ref::<web_sys::HtmlSelectElement>().map(|s| s.value()))
            .unwrap_or_default();
        if let Ok(id) = value.parse::<u32>() {
            store_select_project(&store, id);
        }
    };

    let on_edit = Callback::new(move |task: Task| {
        set_editing_task.set(Some(task));
        set_initial_status.set(String::new());
        set_form_open.set(true);
    });
    let on_add = Callback::new(move |status: String| {
        set_editing_task.set(None);
        set_initial_status.set(status);
        set_form_open.set(true);
    });

    view! {
        <div class="kanban-page">
            <Show
                when=move || !store.projects().get().is_empty()
                fallback=|| {
                    view! {
                        <div class="empty-state">
                            <h3>"No Projects Available"</h3>
                            <p>
                                "Create a project first to start organizing your tasks in the Kanban board."
                            </p>
                        </div>
                    }
                }
            >
                <div class="page-header">
                    <div>
                        <h2>"\u{1F4CA} Kanban Board"</h2>
                        <p class="page-subtitle">"Drag and drop tasks to update their status"</p>
                    </div>
                    <div class="project-select">
                        <label for="project-select">"Select Project:"</label>
                        <select id="project-select" on:change=on_project_change>
                            <For
                                each=move || store.projects().get()
                                key=|project| project.id
                                children=move |project| {
                                    let id = project.id;
                                    view! {
                                        <option
                                            value=id.to_string()
                                            selected=move || store.current_project_id().get() == id
                                        >
                                            {project.title.clone()}
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </div>
                </div>

                {move || {
                    current_project
                        .get()
                        .map(|project| {
                            view! {
                                <div class="project-info">
                                    <h3>{project.title.clone()}</h3>
                                    {(!project.description.is_empty())
                                        .then(|| view! { <p>{project.description.clone()}</p> })}
                                    {project
                                        .kanban_template
                                        .clone()
                                        .map(|template| {
                                            view! {
                                                <span class="template-badge">
                                                    "\u{1F4CB} Template: " {template}
                                                </span>
                                            }
                                        })}
                                    <span class="project-stat">
                                        "Tasks: " {move || store.tasks().get().len()}
                                    </span>
                                </div>
                            }
                        })
                }}

                <div class="kanban-columns">
                    <For
                        each=move || columns.get()
                        key=|column| column.id.clone()
                        children=move |column| {
                            let column_id = column.id.clone();
                            let column_tasks = Memo::new(move |_| {
                                store
                                    .tasks()
                                    .get()
                                    .into_iter()
                                    .filter(|t| t.status == column_id)
                                    .collect::<Vec<_>>()
                            });
                            view! {
                                <KanbanColumn
                                    column=column
                                    tasks=column_tasks
                                    on_edit=on_edit
                                    on_add=on_add
                                />
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
                            <TaskForm
                                editing=editing_task.get()
                                initial_status=initial_status.get()
                                on_close=Callback::new(move |_| set_form_open.set(false))
                            />
                        }
                    })
            }}
        </div>
    }
}
