use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use learn_core::model::Module;
use tracing::warn;

use crate::context::{AppContext, use_auth_state};
use crate::views::{
    DaysView, HomeView, LessonView, LoginView, ModuleView, ProgressView, RegisterView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/days", DaysView)] Days {},
        #[route("/lesson/:id", LessonView)] Lesson { id: String },
        #[route("/basics", BasicsView)] Basics {},
        #[route("/tenses", TensesView)] Tenses {},
        #[route("/conversations", ConversationsView)] Conversations {},
        #[route("/progress", ProgressView)] Progress {},
        #[route("/login", LoginView)] Login {},
        #[route("/register", RegisterView)] Register {},
}

impl Route {
    /// Listing page of a module.
    #[must_use]
    pub fn for_module(module: Module) -> Self {
        match module {
            Module::Days => Route::Days {},
            Module::Basics => Route::Basics {},
            Module::Tenses => Route::Tenses {},
            Module::Conversations => Route::Conversations {},
        }
    }
}

#[component]
fn BasicsView() -> Element {
    rsx! { ModuleView { module: Module::Basics } }
}

#[component]
fn TensesView() -> Element {
    rsx! { ModuleView { module: Module::Tenses } }
}

#[component]
fn ConversationsView() -> Element {
    rsx! { ModuleView { module: Module::Conversations } }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            NavBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn NavBar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut auth_state = use_auth_state();
    let identity = auth_state.identity();

    let on_sign_out = move |_| {
        let auth = ctx.auth();
        let Some(identity) = auth_state.identity() else {
            return;
        };
        spawn(async move {
            if let Err(err) = auth.sign_out(&identity).await {
                warn!(error = %err, "sign-out failed");
            }
            auth_state.set(None);
            navigator.push(Route::Login {});
        });
    };

    rsx! {
        nav { class: "navbar",
            Link { class: "nav-logo", to: Route::Home {},
                span { class: "malayalam-text", "മലയാളം" }
                " Learn Malayalam"
            }
            ul { class: "nav-menu",
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Days {}, "Days" } }
                li { Link { to: Route::Basics {}, "Basics" } }
                li { Link { to: Route::Tenses {}, "Tenses" } }
                li { Link { to: Route::Conversations {}, "Conversations" } }
                li { Link { to: Route::Progress {}, "Progress" } }
                if let Some(identity) = identity {
                    li { class: "user-info",
                        span { class: "user-email", "{identity.email}" }
                    }
                    li {
                        button {
                            class: "nav-button logout-button",
                            r#type: "button",
                            onclick: on_sign_out,
                            "Sign Out"
                        }
                    }
                } else {
                    li { Link { class: "nav-button login-button", to: Route::Login {}, "Sign In" } }
                    li { Link { class: "nav-button register-button", to: Route::Register {}, "Sign Up" } }
                }
            }
        }
    }
}
