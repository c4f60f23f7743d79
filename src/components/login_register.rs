//! Login / Register Component
//!
//! Unauthenticated view. Exchanges credentials for a session token and
//! starts the session through the app context.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::{self, LoginArgs, RegisterArgs};
use crate::context::use_app_context;

fn input_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_ref::<web_sys::HtmlInputElement>().map(|i| i.value()))
        .unwrap_or_default()
}

#[component]
pub fn LoginRegister() -> impl IntoView {
    let ctx = use_app_context();

    let (is_register, set_is_register) = signal(false);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = name.get();
        let email = email.get();
        let password = password.get();
        if email.is_empty() || password.is_empty() {
            set_error.set(Some("Email and password are required.".to_string()));
            return;
        }
        if is_register.get() && name.is_empty() {
            set_error.set(Some("Name is required.".to_string()));
            return;
        }

        set_error.set(None);
        set_submitting.set(true);
        let register = is_register.get();

        spawn_local(async move {
            let result = if register {
                api::register(&RegisterArgs {
                    name: &name,
                    email: &email,
                    password: &password,
                })
                .await
            } else {
                api::login(&LoginArgs {
                    email: &email,
                    password: &password,
                })
                .await
            };

            set_submitting.set(false);
            match result {
                Ok(auth) => ctx.start_session(&auth.token),
                Err(err) => set_error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=submit>
                <h1>"SmartTask"</h1>
                <h2>{move || if is_register.get() { "Create account" } else { "Sign in" }}</h2>

                {move || {
                    is_register
                        .get()
                        .then(|| {
                            view! {
                                <input
                                    type="text"
                                    placeholder="Name"
                                    prop:value=move || name.get()
                                    on:input=move |ev| set_name.set(input_value(&ev))
                                />
                            }
                        })
                }}

                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(input_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(input_value(&ev))
                />

                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

                <button type="submit" disabled=move || submitting.get()>
                    {move || {
                        if submitting.get() {
                            "Please wait..."
                        } else if is_register.get() {
                            "Register"
                        } else {
                            "Login"
                        }
                    }}
                </button>

                <button
                    type="button"
                    class="link-button"
                    on:click=move |_| set_is_register.update(|v| *v = !*v)
                >
                    {move || {
                        if is_register.get() {
                            "Already have an account? Sign in"
                        } else {
                            "No account yet? Register"
                        }
                    }}
                </button>
            </form>
        </div>
    }
}
