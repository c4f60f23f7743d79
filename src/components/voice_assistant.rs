//! Voice Assistant Component
//!
//! Chat panel over the remote intent classifier. The backend only labels
//! the transcript; every resulting change goes through the same mutation
//! path as the forms, so assistant-created records roll back like any
//! other on failure.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use smarttask_core::{
    IntentAction, Priority, Project, ProjectDetails, RemoteChange, SearchParams, Task, TaskDetails,
};

use crate::api::{self, ApiError, CreateProjectArgs, CreateTaskArgs, VoiceTextArgs};
use crate::context::{use_app_context, AppContext};
use crate::store::AppStateStoreFields;
use crate::store::{use_app_store, AppStore};
use crate::sync::{project_slot, run_mutation, task_slot, use_sync_engine, SyncEngine};

#[derive(Clone, Copy, PartialEq, Eq)]
enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, PartialEq)]
struct ChatMessage {
    id: u32,
    role: ChatRole,
    content: String,
    /// Tasks to render under the message, for search answers
    results: Vec<Task>,
}

/// Append-only handle on the transcript, cheap to move into async blocks
#[derive(Clone, Copy)]
struct Transcript {
    messages: WriteSignal<Vec<ChatMessage>>,
    seq: StoredValue<u32>,
}

impl Transcript {
    fn push(&self, role: ChatRole, content: impl Into<String>) {
        self.push_with_results(role, content, Vec::new());
    }

    fn push_with_results(&self, role: ChatRole, content: impl Into<String>, results: Vec<Task>) {
        let id = self.seq.get_value() + 1;
        self.seq.set_value(id);
        self.messages.update(|messages| {
            messages.push(ChatMessage {
                id,
                role,
                content: content.into(),
                results,
            });
        });
    }
}

/// Pick the project a voice-created task lands in: explicit id, then name,
/// then the selected project, then the first one.
fn resolve_target_project(details: &TaskDetails, store: &AppStore) -> Option<Project> {
    let projects = store.projects().get_untracked();
    details
        .project_id
        .and_then(|id| projects.iter().find(|p| p.id == id).cloned())
        .or_else(|| {
            details.project_name.as_ref().and_then(|name| {
                let name = name.to_lowercase();
                projects
                    .iter()
                    .find(|p| p.title.to_lowercase() == name)
                    .cloned()
            })
        })
        .or_else(|| {
            let current = store.current_project_id().get_untracked();
            projects.iter().find(|p| p.id == current).cloned()
        })
        .or_else(|| projects.first().cloned())
}

async fn create_task_from_voice(
    details: TaskDetails,
    ctx: AppContext,
    store: AppStore,
    engine: Rc<SyncEngine>,
    transcript: Transcript,
) {
    let title = details.title.clone().unwrap_or_default();
    if title.trim().is_empty() {
        transcript.push(
            ChatRole::Assistant,
            "I couldn't work out a title for that task. Try \"create a task called ...\".",
        );
        return;
    }
    let Some(project) = resolve_target_project(&details, &store) else {
        transcript.push(
            ChatRole::Assistant,
            "There's no project to put that task in yet. Create a project first.",
        );
        return;
    };

    // A status the board can't show is replaced with the first column
    let columns = project.columns();
    let status = details
        .status
        .filter(|s| columns.iter().any(|c| &c.id == s))
        .or_else(|| columns.first().map(|c| c.id.clone()))
        .unwrap_or_default();
    let description = details.description.unwrap_or_default();
    let completion_date = details.completion_date;
    let project_id = project.id;

    transcript.push(
        ChatRole::Assistant,
        format!("Creating task \"{}\" in \"{}\".", title, project.title),
    );

    if project_id == store.current_project_id().get_untracked() {
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
    } else {
        // The task belongs to a project whose list isn't loaded, so there
        // is nothing to publish optimistically; a plain create suffices.
        match api::create_task(&CreateTaskArgs {
            title: &title,
            description: &description,
            status: &status,
            completion_date: completion_date.as_deref(),
            project_id,
        })
        .await
        {
            Ok(_) => ctx.reload(),
            Err(ApiError::Unauthorized) => ctx.expire_session(),
            Err(err) => {
                web_sys::console::error_1(&format!("[VOICE] create task failed: {}", err).into());
                transcript.push(
                    ChatRole::Assistant,
                    format!("I couldn't create the task: {}.", err),
                );
            }
        }
    }
}

async fn create_project_from_voice(
    details: ProjectDetails,
    ctx: AppContext,
    store: AppStore,
    engine: Rc<SyncEngine>,
    transcript: Transcript,
) {
    let title = details.title.unwrap_or_default();
    if title.trim().is_empty() {
        transcript.push(
            ChatRole::Assistant,
            "I couldn't work out a name for that project. Try \"create a project called ...\".",
        );
        return;
    }
    let description = details.description.unwrap_or_default();
    let priority = details
        .priority
        .as_deref()
        .map(Priority::from_str)
        .unwrap_or_default();

    transcript.push(
        ChatRole::Assistant,
        format!("Creating project \"{}\".", title),
    );

    let draft = Project::draft(&title, &description, priority);

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
                completion_date: None,
                kanban_template: None,
                kanban_columns: None,
            })
            .await
            .map(RemoteChange::Created)
        },
    )
    .await;
}

async fn search_tasks_from_voice(
    provided: Vec<Task>,
    params: Option<SearchParams>,
    ctx: AppContext,
    store: AppStore,
    transcript: Transcript,
) {
    let mut results = provided;

    // Backends that only return filters make the client do the search
    if results.is_empty() {
        if let Some(params) = &params {
            let project_ids: Vec<u32> = match params.project_id {
                Some(id) => vec![id],
                None => store
                    .projects()
                    .get_untracked()
                    .iter()
                    .map(|p| p.id)
                    .collect(),
            };
            for project_id in project_ids {
                match api::list_tasks_by_project(project_id).await {
                    Ok(tasks) => {
                        results.extend(tasks.into_iter().filter(|t| params.matches(t)));
                    }
                    Err(ApiError::Unauthorized) => {
                        ctx.expire_session();
                        return;
                    }
                    Err(err) => {
                        web_sys::console::error_1(
                            &format!("[VOICE] search fetch failed: {}", err).into(),
                        );
                    }
                }
            }
        }
    }

    let content = if results.is_empty() {
        "I didn't find any tasks matching that search.".to_string()
    } else if results.len() == 1 {
        "I found 1 matching task:".to_string()
    } else {
        format!("I found {} matching tasks:", results.len())
    };
    transcript.push_with_results(ChatRole::Assistant, content, results);
}

async fn dispatch_intent(
    action: IntentAction,
    ctx: AppContext,
    store: AppStore,
    engine: Rc<SyncEngine>,
    transcript: Transcript,
) {
    match action {
        IntentAction::CreateTask(details) => {
            create_task_from_voice(details, ctx, store, engine, transcript).await;
        }
        IntentAction::CreateProject(details) => {
            create_project_from_voice(details, ctx, store, engine, transcript).await;
        }
        IntentAction::SearchTasks { results, params } => {
            search_tasks_from_voice(results, params, ctx, store, transcript).await;
        }
        IntentAction::Error(message) => {
            transcript.push(ChatRole::Assistant, message);
        }
        IntentAction::Unknown(message) => {
            transcript.push(
                ChatRole::Assistant,
                message.unwrap_or_else(|| {
                    "I'm not sure what to do with that. You can create tasks, create projects, or search tasks.".to_string()
                }),
            );
        }
    }
}

#[component]
pub fn VoiceAssistant() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    // Copy handle so the submit handler stays a plain-copyable closure
    let engine = StoredValue::new_local(use_sync_engine());

    let (open, set_open) = signal(false);
    let (input, set_input) = signal(String::new());
    let (waiting, set_waiting) = signal(false);
    let (messages, set_messages) = signal(Vec::<ChatMessage>::new());
    let seq = StoredValue::new(0u32);
    let transcript = Transcript {
        messages: set_messages,
        seq,
    };

    let toggle = move |_| {
        let now_open = !open.get_untracked();
        set_open.set(now_open);
        if now_open && messages.get_untracked().is_empty() {
            transcript.push(
                ChatRole::Assistant,
                "Hi! Tell me what to do: create a task, create a project, or search your tasks.",
            );
        }
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = input.get_untracked().trim().to_string();
        if text.is_empty() || waiting.get_untracked() {
            return;
        }
        set_input.set(String::new());
        transcript.push(ChatRole::User, text.clone());
        set_waiting.set(true);

        let engine = engine.get_value();
        spawn_local(async move {
            let args = VoiceTextArgs {
                text: &text,
                language: None,
                context: Some("assistance"),
            };
            match api::process_voice_text(&args).await {
                Ok(response) => {
                    dispatch_intent(response.classify(), ctx, store, engine, transcript).await;
                }
                Err(ApiError::Unauthorized) => ctx.expire_session(),
                Err(err) => {
                    web_sys::console::error_1(&format!("[VOICE] {}", err).into());
                    transcript.push(
                        ChatRole::Assistant,
                        format!("Sorry, something went wrong: {}. Please try again.", err),
                    );
                }
            }
            set_waiting.set(false);
        });
    };

    view! {
        <div class="voice-assistant">
            <Show when=move || open.get()>
                <div class="assistant-panel">
                    <div class="assistant-header">
                        <h4>"\u{1F3A4} Assistant"</h4>
                        <button type="button" class="close" on:click=move |_| set_open.set(false)>
                            "\u{2715}"
                        </button>
                    </div>

                    <div class="assistant-messages">
                        <For
                            each=move || messages.get()
                            key=|message| message.id
                            children=move |message| {
                                let role_class = match message.role {
                                    ChatRole::User => "message user",
                                    ChatRole::Assistant => "message assistant",
                                };
                                view! {
                                    <div class=role_class>
                                        <p>{message.content.clone()}</p>
                                        {(!message.results.is_empty())
                                            .then(|| {
                                                view! {
                                                    <ul class="search-results">
                                                        {message
                                                            .results
                                                            .iter()
                                                            .map(|task| {
                                                                view! {
                                                                    <li>
                                                                        <span class="result-title">{task.title.clone()}</span>
                                                                        <span class="result-status">{task.status.clone()}</span>
                                                                    </li>
                                                                }
                                                            })
                                                            .collect::<Vec<_>>()}
                                                    </ul>
                                                }
                                            })}
                                    </div>
                                }
                            }
                        />
                        {move || {
                            waiting
                                .get()
                                .then(|| view! { <div class="message assistant typing">"..."</div> })
                        }}
                    </div>

                    <form class="assistant-input" on:submit=submit>
                        <input
                            type="text"
                            placeholder="Type a command..."
                            prop:value=move || input.get()
                            on:input=move |ev| {
                                let value = ev
                                    .target()
                                    .and_then(|t| {
                                        t.dyn_ref::<web_sys::HtmlInputElement>().map(|i| i.value())
                                    })
                                    .unwrap_or_default();
                                set_input.set(value);
                            }
                        />
                        <button type="submit" disabled=move || waiting.get()>
                            "Send"
                        </button>
                    </form>
                </div>
            </Show>

            <button type="button" class="assistant-toggle" on:click=toggle>
                {move || if open.get() { "\u{2715}" } else { "\u{1F3A4}" }}
            </button>
        </div>
    }
}
