//! Project Form Component
//!
//! Create or edit a project. New projects pick a workflow template; the
//! template is fixed after creation.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use smarttask_core::{Priority, Project, RemoteChange, TEMPLATE_NAMES};

use crate::api::{self, CreateProjectArgs, UpdateProjectArgs};
use crate::context::use_app_context;
use crate::store::use_app_store;
use crate::sync::{project_slot, run_mutation, use_sync_engine};

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
pub fn ProjectForm(
    /// Project being edited; None creates a new one
    editing: Option<Project>,
    on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let engine = use_sync_engine();

    let editing_id = editing.as_ref().map(|p| p.id);
    let (title, set_title) = signal(editing.as_ref().map(|p| p.title.clone()).unwrap_or_default());
    let (description, set_description) =
        signal(editing.as_ref().map(|p| p.description.clone()).unwrap_or_default());
    let (priority, set_priority) = signal(
        editing
            .as_ref()
            .map(|p| p.priority)
            .unwrap_or_default()
            .as_str()
            .to_string(),
    );
    let (completion_date, set_completion_date) = signal(
        editing
            .as_ref()
            .and_then(|p| p.completion_date.clone())
            .unwrap_or_default(),
    );
    let (template, set_template) = signal(
        editing
            .as_ref()
            .and_then(|p| p.kanban_template.clone())
            .unwrap_or_else(|| "default".to_string()),
    );
    let (error, set_error) = signal(Option::<String>::None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = title.get();
        if title.trim().is_empty() {
            // Validation failure: no network call, no mutation
            set_error.set(Some("Title is required.".to_string()));
            return;
        }
        set_error.set(None);

        let description = description.get();
        let priority = Priority::from_str(&priority.get());
        let completion_date = completion_date.get();
        let completion_date = (!completion_date.is_empty()).then_some(completion_date);
        let template = template.get();
        let engine = Rc::clone(&engine);

        spawn_local(async move {
            match editing_id {
                None => {
                    let mut draft = Project::draft(&title, &description, priority);
                    draft.completion_date = completion_date.clone();
                    draft.kanban_template = Some(template.clone());

                    run_mutation(
                        &engine.projects,
                        ctx,
                        project_slot(store),
                        None,
                        format!("Project \"{}\" created", title),
                        |items| {
                            let mut next = items.to_vec();
                            next.push(draft.clone());
                            next
                        },
                        || async {
                            api::create_project(&CreateProjectArgs {
                                title: &title,
                                description: &description,
                                priority: priority.as_str(),
                                completion_date: completion_date.as_deref(),
                                kanban_template: Some(&template),
                                kanban_columns: None,
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
                    let new_completion = completion_date.clone();

                    run_mutation(
                        &engine.projects,
                        ctx,
                        project_slot(store),
                        Some(id),
                        "Project updated".to_string(),
                        |items| {
                            items
                                .iter()
                                .cloned()
                                .map(|mut p| {
                                    if p.id == id {
                                        p.title = new_title.clone();
                                        p.description = new_description.clone();
                                        p.priority = priority;
                                        p.completion_date = new_completion.clone();
                                    }
                                    p
                                })
                                .collect()
                        },
                        || async {
                            api::update_project(
                                id,
                                &UpdateProjectArgs {
                                    title: Some(&title),
                                    description: Some(&description),
                                    priority: Some(priority.as_str()),
                                    completion_date: completion_date.as_deref(),
                                    kanban_template: None,
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

    view! {
        <div class="modal-backdrop">
            <form class="project-form" on:submit=submit>
                <h3>{if editing_id.is_some() { "Edit Project" } else { "New Project" }}</h3>

                <input
                    type="text"
                    placeholder="Project title"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(input_value(&ev))
                />
                <textarea
                    placeholder="Description"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(input_value(&ev))
                ></textarea>

                <label>"Priority"</label>
                <select
                    prop:value=move || priority.get()
                    on:change=move |ev| set_priority.set(input_value(&ev))
                >
                    <option value="low">"Low"</option>
                    <option value="medium">"Medium"</option>
                    <option value="high">"High"</option>
                </select>

                <label>"Target date"</label>
                <input
                    type="date"
                    prop:value=move || completion_date.get()
                    on:input=move |ev| set_completion_date.set(input_value(&ev))
                />

                {(editing_id.is_none())
                    .then(|| {
                        view! {
                            <label>"Workflow template"</label>
                            <div class="template-selector">
                                {TEMPLATE_NAMES
                                    .iter()
                                    .map(|(value, label)| {
                                        let value = value.to_string();
                                        let selected_value = value.clone();
                                        let is_selected = move || template.get() == value;
                                        view! {
                                            <button
                                                type="button"
                                                class=move || {
                                                    if is_selected() {
                                                        "template-btn active"
                                                    } else {
                                                        "template-btn"
                                                    }
                                                }
                                                on:click=move |_| set_template.set(selected_value.clone())
                                            >
                                                {*label}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })}

                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

                <div class="form-actions">
                    <button type="submit">"Save"</button>
                    <button type="button" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                </div>
            </form>
        </div>
    }
}
