use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::{AppState, Role},
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::{AdminPage, CompanyPage, DriverPage, PostLoadPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/post-load")]
    PostLoad {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        println!("Failed to persist user state: {err}");
    }
}

#[component]
pub fn Home() -> Element {
    let state = use_context::<Signal<AppState>>();
    let role = state.with(|s| s.session.as_ref().map(|actor| actor.role));

    rsx! {
        Shell {
            match role {
                Some(Role::Driver) => rsx! { DriverPage {} },
                Some(Role::Company) => rsx! { CompanyPage {} },
                Some(Role::Admin) => rsx! { AdminPage {} },
                // Shell renders the login page when signed out.
                None => rsx! { Fragment {} },
            }
        }
    }
}

#[component]
pub fn PostLoad() -> Element {
    rsx! { Shell { PostLoadPage {} } }
}
