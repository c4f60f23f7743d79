//! Toast Host Component
//!
//! Renders the notification queue in a corner overlay.

use leptos::prelude::*;

use crate::context::{use_app_context, ToastKind};

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toast-host">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let kind_class = match toast.kind {
                        ToastKind::Success => "toast success",
                        ToastKind::Error => "toast error",
                        ToastKind::Warning => "toast warning",
                    };
                    view! {
                        <div class=kind_class>
                            <span class="toast-message">{toast.message.clone()}</span>
                            <button class="toast-dismiss" on:click=move |_| ctx.dismiss(id)>
                                "\u{00D7}"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
