//! Layout Component
//!
//! Sidebar navigation between the main pages plus the logout control.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;

/// Main pages of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Projects,
    Kanban,
}

const NAV_ITEMS: &[(Page, &str, &str)] = &[
    (Page::Dashboard, "\u{1F4C8}", "Dashboard"),
    (Page::Projects, "\u{1F4C1}", "Projects"),
    (Page::Kanban, "\u{1F4CA}", "Kanban"),
];

#[component]
pub fn Layout(
    active_page: ReadSignal<Page>,
    set_active_page: WriteSignal<Page>,
    children: Children,
) -> impl IntoView {
    let ctx = use_app_context();

    let logout = move |_| {
        spawn_local(async move {
            // Server-side logout is best effort; the local session ends
            // either way
            let _ = api::logout().await;
            ctx.end_session();
        });
    };

    view! {
        <div class="app-layout">
            <aside class="sidebar">
                <div class="sidebar-logo">"SmartTask"</div>
                {NAV_ITEMS
                    .iter()
                    .map(|(page, icon, label)| {
                        let page = *page;
                        view! {
                            <button
                                class=move || {
                                    if active_page.get() == page {
                                        "nav-link active"
                                    } else {
                                        "nav-link"
                                    }
                                }
                                on:click=move |_| set_active_page.set(page)
                            >
                                <span class="nav-icon">{*icon}</span>
                                <span class="nav-label">{*label}</span>
                            </button>
                        }
                    })
                    .collect_view()}
                <button class="nav-link logout" on:click=logout>
                    <span class="nav-icon">"\u{1F6AA}"</span>
                    <span class="nav-label">"Logout"</span>
                </button>
            </aside>

            <main class="main-content">{children()}</main>
        </div>
    }
}
