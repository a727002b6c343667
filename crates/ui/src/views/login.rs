use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use tracing::warn;

use crate::context::{AppContext, use_auth_state};
use crate::routes::Route;
use crate::vm::{FormStatus, LoginForm, LoginMode, reset_notice};

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut auth_state = use_auth_state();

    let mut mode = use_signal(LoginMode::default);
    let mut form = use_signal(LoginForm::default);
    let mut status = use_signal(FormStatus::default);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if status.read().is_busy() {
            return;
        }
        let auth = ctx.auth();
        let current_mode = mode();
        let request = form.read().to_request();
        status.set(FormStatus::Submitting);
        spawn(async move {
            match current_mode {
                LoginMode::SignIn => match auth.sign_in(&request).await {
                    Ok(identity) => {
                        status.set(FormStatus::Idle);
                        auth_state.set(Some(identity));
                        navigator.push(Route::Home {});
                    }
                    Err(err) => {
                        warn!(error = %err, "sign-in failed");
                        status.set(FormStatus::Error(err.to_string()));
                    }
                },
                LoginMode::ForgotPassword => match auth.reset_password(&request.email).await {
                    Ok(()) => status.set(reset_notice()),
                    Err(err) => status.set(FormStatus::Error(err.to_string())),
                },
            }
        });
    };

    let current_mode = mode();
    let busy = status.read().is_busy();

    rsx! {
        div { class: "page auth-page",
            div { class: "auth-card",
                h2 { class: "auth-title", "{current_mode.title()}" }
                form { class: "auth-form", onsubmit: on_submit,
                    label { r#for: "login-email", "Email" }
                    input {
                        id: "login-email",
                        r#type: "email",
                        value: "{form.read().email}",
                        oninput: move |evt| form.write().email = evt.value(),
                    }
                    if current_mode == LoginMode::SignIn {
                        label { r#for: "login-password", "Password" }
                        input {
                            id: "login-password",
                            r#type: "password",
                            value: "{form.read().password}",
                            oninput: move |evt| form.write().password = evt.value(),
                        }
                    }
                    StatusLine { status: status() }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: busy,
                        "{current_mode.submit_label(busy)}"
                    }
                }
                div { class: "auth-links",
                    match current_mode {
                        LoginMode::SignIn => rsx! {
                            button {
                                class: "link-button",
                                r#type: "button",
                                onclick: move |_| {
                                    mode.set(LoginMode::ForgotPassword);
                                    status.set(FormStatus::Idle);
                                },
                                "Forgot password?"
                            }
                            p {
                                "Don't have an account? "
                                Link { to: Route::Register {}, "Sign up" }
                            }
                        },
                        LoginMode::ForgotPassword => rsx! {
                            button {
                                class: "link-button",
                                r#type: "button",
                                onclick: move |_| {
                                    mode.set(LoginMode::SignIn);
                                    status.set(FormStatus::Idle);
                                },
                                "Back to sign in"
                            }
                        },
                    }
                }
            }
        }
    }
}

/// Error or notice under an auth form.
#[component]
pub(crate) fn StatusLine(status: FormStatus) -> Element {
    match status {
        FormStatus::Error(message) => rsx! {
            p { class: "form-error", role: "alert", "{message}" }
        },
        FormStatus::Notice(message) => rsx! {
            p { class: "form-notice", "{message}" }
        },
        FormStatus::Idle | FormStatus::Submitting => rsx! {},
    }
}
