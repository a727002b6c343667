use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::SignUpOutcome;
use tracing::warn;

use crate::context::{AppContext, use_auth_state};
use crate::routes::Route;
use crate::views::login::StatusLine;
use crate::vm::{FormStatus, RegisterForm, sign_up_status};

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut auth_state = use_auth_state();

    let mut form = use_signal(RegisterForm::default);
    let mut status = use_signal(FormStatus::default);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if status.read().is_busy() {
            return;
        }
        let auth = ctx.auth();
        let request = form.read().to_request();
        status.set(FormStatus::Submitting);
        spawn(async move {
            match auth.sign_up(&request).await {
                Ok(SignUpOutcome::SignedIn(identity)) => {
                    status.set(FormStatus::Idle);
                    auth_state.set(Some(identity));
                    navigator.push(Route::Home {});
                }
                Ok(outcome) => status.set(sign_up_status(&outcome)),
                Err(err) => {
                    warn!(error = %err, "sign-up failed");
                    status.set(FormStatus::Error(err.to_string()));
                }
            }
        });
    };

    let busy = status.read().is_busy();

    rsx! {
        div { class: "page auth-page",
            div { class: "auth-card",
                h2 { class: "auth-title", "Create Account" }
                form { class: "auth-form", onsubmit: on_submit,
                    label { r#for: "register-name", "Full Name" }
                    input {
                        id: "register-name",
                        r#type: "text",
                        value: "{form.read().full_name}",
                        oninput: move |evt| form.write().full_name = evt.value(),
                    }
                    label { r#for: "register-email", "Email" }
                    input {
                        id: "register-email",
                        r#type: "email",
                        value: "{form.read().email}",
                        oninput: move |evt| form.write().email = evt.value(),
                    }
                    label { r#for: "register-password", "Password" }
                    input {
                        id: "register-password",
                        r#type: "password",
                        value: "{form.read().password}",
                        oninput: move |evt| form.write().password = evt.value(),
                    }
                    label { r#for: "register-confirm", "Confirm Password" }
                    input {
                        id: "register-confirm",
                        r#type: "password",
                        value: "{form.read().confirm_password}",
                        oninput: move |evt| form.write().confirm_password = evt.value(),
                    }
                    StatusLine { status: status() }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: busy,
                        if busy { "Creating account..." } else { "Sign Up" }
                    }
                }
                div { class: "auth-links",
                    p {
                        "Already have an account? "
                        Link { to: Route::Login {}, "Sign in" }
                    }
                }
            }
        }
    }
}
