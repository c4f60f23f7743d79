//! SmartTask Frontend App
//!
//! Root component: session gate, shared state wiring, page switching.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::{self, ApiError};
use crate::components::{
    DashboardPage, KanbanPage, Layout, LoginRegister, Page, ProjectsPage, ToastHost,
    VoiceAssistant,
};
use crate::context::{AppContext, Toast, ToastKind};
use crate::session;
use crate::store::AppStateStoreFields;
use crate::store::{store_clear, AppState, AppStore};
use crate::sync::SyncEngine;

#[component]
pub fn App() -> impl IntoView {
    let logged_in = RwSignal::new(session::token().is_some());
    let reload_trigger = signal(0u32);
    let toasts = signal(Vec::<Toast>::new());

    let ctx = AppContext::new(reload_trigger, toasts, logged_in);
    let store: AppStore = Store::new(AppState::default());
    let engine = Rc::new(SyncEngine::default());
    let dnd = board_dnd::create_dnd_signals();

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);
    provide_context(StoredValue::new_local(Rc::clone(&engine)));
    provide_context(dnd);

    // Document-level drop handler for the kanban board, installed once
    crate::components::bind_board_drops(dnd, ctx, store, engine);

    // Load projects on login and on every refresh signal
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        if !logged_in.get() {
            return;
        }
        spawn_local(async move {
            match api::list_projects().await {
                Ok(projects) => {
                    web_sys::console::log_1(
                        &format!("[APP] Loaded {} projects", projects.len()).into(),
                    );
                    let current = store.current_project_id().get_untracked();
                    if !projects.iter().any(|p| p.id == current) {
                        store
                            .current_project_id()
                            .set(projects.first().map(|p| p.id).unwrap_or(0));
                    }
                    store.projects().set(projects);
                }
                Err(ApiError::Unauthorized) => ctx.expire_session(),
                Err(err) => {
                    web_sys::console::error_1(&format!("[APP] {}", err).into());
                    ctx.notify(ToastKind::Error, "There was a problem loading your projects.");
                }
            }
        });
    });

    // Load the selected project's tasks; dashboard and kanban share them
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let project_id = store.current_project_id().get();
        if !logged_in.get() || project_id == 0 {
            return;
        }
        spawn_local(async move {
            match api::list_tasks_by_project(project_id).await {
                Ok(tasks) => {
                    web_sys::console::log_1(
                        &format!("[APP] Loaded {} tasks for project {}", tasks.len(), project_id)
                            .into(),
                    );
                    store.tasks().set(tasks);
                }
                Err(ApiError::Unauthorized) => ctx.expire_session(),
                Err(err) => {
                    web_sys::console::error_1(&format!("[APP] {}", err).into());
                    ctx.notify(ToastKind::Error, "Could not load tasks. Please try again.");
                }
            }
        });
    });

    // Collections do not survive the session
    Effect::new(move |_| {
        if !logged_in.get() {
            store_clear(&store);
        }
    });

    view! {
        <ToastHost />
        <Show
            when=move || ctx.is_logged_in()
            fallback=|| view! { <LoginRegister /> }
        >
            <Shell />
        </Show>
    }
}

/// Logged-in layout: navigation, active page, voice assistant
#[component]
fn Shell() -> impl IntoView {
    let (active_page, set_active_page) = signal(Page::Dashboard);

    view! {
        <Layout active_page=active_page set_active_page=set_active_page>
            {move || match active_page.get() {
                Page::Dashboard => view! { <DashboardPage /> }.into_any(),
                Page::Projects => view! { <ProjectsPage /> }.into_any(),
                Page::Kanban => view! { <KanbanPage /> }.into_any(),
            }}
        </Layout>
        <VoiceAssistant />
    }
}
