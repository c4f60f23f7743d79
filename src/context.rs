//! Application Context
//!
//! Session-wide signals provided via Leptos Context API. Created once at
//! session start and handed to whichever view needs it; there is no
//! module-level mutable state.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::session;

const TOAST_DISMISS_MS: u32 = 4000;

/// Non-blocking user notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload collections from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload collections from the backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Active notifications - read
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    toast_seq: StoredValue<u32>,
    /// Whether a session token is active
    logged_in: RwSignal<bool>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        toasts: (ReadSignal<Vec<Toast>>, WriteSignal<Vec<Toast>>),
        logged_in: RwSignal<bool>,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            toasts: toasts.0,
            set_toasts: toasts.1,
            toast_seq: StoredValue::new(0),
            logged_in,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in.get()
    }

    /// Broadcast a refresh signal to sibling views after a successful
    /// mutation, instead of each view re-fetching independently
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Show a notification that dismisses itself
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.toast_seq.with_value(|v| *v) + 1;
        self.toast_seq.set_value(id);

        self.set_toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                kind,
                message: message.into(),
            });
        });

        let set_toasts = self.set_toasts;
        Timeout::new(TOAST_DISMISS_MS, move || {
            set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
        })
        .forget();
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    /// Start a session with the token the backend issued
    pub fn start_session(&self, token: &str) {
        session::store(token);
        self.logged_in.set(true);
    }

    /// Ordinary logout
    pub fn end_session(&self) {
        session::clear();
        self.logged_in.set(false);
    }

    /// 401 path: distinct from a per-mutation failure, it tears the whole
    /// session down and returns to the login view
    pub fn expire_session(&self) {
        session::clear();
        self.logged_in.set(false);
        self.notify(ToastKind::Warning, "Your session has expired. Please login again.");
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
