//! Task Form Component
//!
//! Create or edit a task in the selected project. The status picker only
//! offers the project's columns, and the chosen status is re-validated
//! before the mutation starts.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use smarttask_core::{default_columns, RemoteChange, Task};

use crate::api::{self, CreateTaskArgs, UpdateTaskArgs};
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;
use crate::store::{store_current_project, use_app_store};
use crate::sync::{run_mutation, task_slot, use_sync_engine};

fn input_value(ev: &web_sys::Event) -> String {
    let target = match ev.target() {
        Some(target) => target,
        None => return String::new(),
    };
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        return area.value();
    }
    if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
        return select.value();
    }
    String::new()
}

#[component]
pub fn TaskForm(
    /// Task being edited; None creates a new one
    editing: Option<Task>,
    /// Preselected status for a new task (empty = first column)
    initial_status: String,
    on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let submit_engine = use_sync_engine();
    let delete_engine = Rc::clone(&submit_engine);

    let columns = Memo::new(move |_| {
        store_current_project(&store)
            .map(|p| p.columns())
            .unwrap_or_else(default_columns)
    });

    let editing_id = editing.as_ref().map(|t| t.id);
    let (title, set_title) = signal(editing.as_ref().map(|t| t.title.clone()).unwrap_or_default());
    let (description, set_description) =
        signal(editing.as_ref().map(|t| t.description.clone()).unwrap_or_default());
    let (status, set_status) = signal({
        let preset = editing
            .as_ref()
            .map(|t| t.status.clone())
            .unwrap_or(initial_status);
        if preset.is_empty() {
            columns
                .get_untracked()
                .first()
                .map(|c| c.id.clone())
                .unwrap_or_default()
        } else {
            preset
        }
    });
    let (completion_date, set_completion_date) = signal(
        editing
            .as_ref()
            .and_then(|t| t.completion_date.clone())
            .unwrap_or_default(),
    );
    let (error, set_error) = signal(Option::<String>::None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = title.get();
        if title.trim().is_empty() {
            set_error.set(Some("Title is required.".to_string()));
            return;
        }
        let status = status.get();
        if !columns.get_untracked().iter().any(|c| c.id == status) {
            // Rejected before any local or remote mutation
            set_error.set(Some("Pick a valid status.".to_string()));
            return;
        }
        let project_id = store.current_project_id().get_untracked();
        if project_id == 0 {
            set_error.set(Some("Select a project first.".to_string()));
            return;
        }
        set_error.set(None);

        let description = description.get();
        let completion_date = completion_date.get();
        let completion_date = (!completion_date.is_empty()).then_some(completion_date);
        let engine = Rc::clone(&submit_engine);

        spawn_local(async move {
            match editing_id {
                None => {
                    let mut draft = Task::draft(&title, &description, &status, project_id);
                    draft.completion_date = completion_date.clone();

                    run_mutation(
                        &engine.tasks,
                        ctx,
                        task_slot(store),
                        None,
                        format!("Task \"{}\" created", title),
                        |items| {
                            let mut next = items.to_vec();
                            next.push(draft.clone());
                            next
                        },
                        || async {
                            api::create_task(&CreateTaskArgs {
                                title: &title,
                                description: &description,
                                status: &status,
                                completion_date: completion_date.as_deref(),
                                project_id,
                            })
                            .await
                            .map(RemoteChange::Created)
                        },
                    )
                    .await;
                }
                Some(id) => {
                    let new_title = title.clone();
                    let new_description = description.clone();
                    let new_status = status.clone();
                    let new_completion = completion_date.clone();
                    let creation_date = store
                        .tasks()
                        .get_untracked()
                        .iter()
                        .find(|t| t.id == id)
                        .and_then(|t| t.creation_date.clone());

                    run_mutation(
                        &engine.tasks,
                        ctx,
                        task_slot(store),
                        Some(id),
                        "Task updated".to_string(),
                        |items| {
                            items
                                .iter()
                                .cloned()
                                .map(|mut t| {
                                    if t.id == id {
                                        t.title = new_title.clone();
                                        t.description = new_description.clone();
                                        t.status = new_status.clone();
                                        t.completion_date = new_completion.clone();
                                    }
                                    t
                                })
                                .collect()
                        },
                        || async {
                            api::update_task(
                                id,
                                &UpdateTaskArgs {
                                    title: &title,
                                    description: &description,
                                    status: &status,
                                    completion_date: completion_date.as_deref(),
                                    creation_date: creation_date.as_deref(),
                                    project_id,
                                },
                            )
                            .await
                            .map(RemoteChange::Updated)
                        },
                    )
                    .await;
                }
            }
        });
        on_close.run(());
    };

    let delete = move |_| {
        let Some(id) = editing_id else { return };
        let engine = Rc::clone(&delete_engine);
        spawn_local(async move {
            run_mutation(
                &engine.tasks,
                ctx,
                task_slot(store),
                Some(id),
                "Task deleted".to_string(),
                |items| items.iter().filter(|t| t.id != id).cloned().collect(),
                || async move { api::delete_task(id).await.map(|_| RemoteChange::Deleted) },
            )
            .await;
        });
        on_close.run(());
    };

    view! {
        <div class="modal-backdrop">
            <form class="task-form" on:submit=submit>
                <h3>{if editing_id.is_some() { "Edit Task" } else { "New Task" }}</h3>

                <input
                    type="text"
                    placeholder="Task title"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(input_value(&ev))
                />
                <textarea
                    placeholder="Description"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(input_value(&ev))
                ></textarea>

                <label>"Status"</label>
                <select
                    prop:value=move || status.get()
                    on:change=move |ev| set_status.set(input_value(&ev))
                >
                    <For
                        each=move || columns.get()
                        key=|column| column.id.clone()
                        children=move |column| {
                            let id = column.id.clone();
                            view! {
                                <option value=id.clone() selected=move || status.get() == id>
                                    {column.title.clone()}
                                </option>
                            }
                        }
                    />
                </select>

                <label>"Target date"</label>
                <input
                    type="date"
                    prop:value=move || completion_date.get()
                    on:input=move |ev| set_completion_date.set(input_value(&ev))
                />

                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

                <div class="form-actions">
                    <button type="submit">"Save"</button>
                    {editing_id
                        .map(|_| {
                            view! {
                                <button type="button" class="danger" on:click=delete>
                                    "Delete"
                                </button>
                            }
                        })}
                    <button type="button" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                </div>
            </form>
        </div>
    }
}
