use dioxus::prelude::*;

use crate::app::{persist_user_state, Route};
use crate::domain::{AppState, Role};
use crate::ui::pages::LoginPage;
use crate::ui::theme;
use crate::util::version;

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let session = state.with(|s| s.session.clone());

    // Everything is gated behind the login screen.
    let Some(actor) = session else {
        return rsx! {
            div { class: "min-h-screen bg-slate-950 text-slate-100 font-sans",
                LoginPage {}
            }
        };
    };

    let role = actor.role;
    let display_name = state.with(|s| s.display_name.clone());
    let current_route = use_route::<Route>();
    let nav = use_navigator();
    let mut state_mut = state;
    let version_label = version::version_label();

    rsx! {
        div { class: "min-h-screen bg-slate-950 text-slate-100 font-sans",
            header {
                class: "{theme::header_class(role)}",
                div { class: "mx-auto grid max-w-6xl grid-cols-[1fr_auto_1fr] items-center gap-4",
                    div { class: "flex items-center gap-3",
                        span { class: "text-2xl", "🚛" }
                        div {
                            h1 { class: "{theme::title_class(role)}", "{version::APP_NAME}" }
                            p { class: "text-xs text-slate-500 italic", "{version::APP_TAGLINE}" }
                        }
                    }

                    div { class: "flex gap-2 justify-center text-sm",
                        NavButton {
                            active: matches!(current_route, Route::Home {}),
                            onclick: move |_| { nav.push(Route::Home {}); },
                            label: "Dashboard",
                            role,
                        }
                        if role == Role::Company {
                            NavButton {
                                active: matches!(current_route, Route::PostLoad {}),
                                onclick: move |_| { nav.push(Route::PostLoad {}); },
                                label: "➕ Post Load",
                                role,
                            }
                        }
                    }

                    div { class: "flex items-center gap-3 justify-end text-sm",
                        div { class: "text-right",
                            p { class: "font-medium {theme::text_primary(role)}", "{display_name}" }
                            p { class: "text-xs text-slate-500", "{role.title()}" }
                        }
                        button {
                            class: "rounded-lg border border-slate-700 px-3 py-1.5 text-xs text-slate-400 transition hover:border-rose-700 hover:text-rose-300",
                            onclick: move |_| {
                                state_mut.with_mut(|s| s.sign_out());
                                persist_user_state(&state_mut);
                            },
                            "Sign out"
                        }
                        span { class: "text-[10px] text-slate-600", "{version_label}" }
                    }
                }
            }
            main { class: "mx-auto max-w-6xl px-6 py-10",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str, role: Role) -> Element {
    let class = match (role, active) {
        (Role::Company, true) => {
            "min-w-[5.5rem] rounded-lg border border-amber-500/60 bg-amber-500/15 px-4 py-2 font-semibold text-amber-300"
        }
        (Role::Company, false) => {
            "min-w-[5.5rem] rounded-lg border border-slate-700 px-4 py-2 text-slate-400 transition hover:border-amber-700 hover:bg-amber-900/20 hover:text-amber-300"
        }
        (Role::Driver, true) => {
            "min-w-[5.5rem] rounded-lg border border-sky-500/60 bg-sky-500/15 px-4 py-2 font-semibold text-sky-300"
        }
        (Role::Driver, false) => {
            "min-w-[5.5rem] rounded-lg border border-slate-700 px-4 py-2 text-slate-400 transition hover:border-sky-700 hover:bg-sky-900/20 hover:text-sky-300"
        }
        (Role::Admin, true) => {
            "min-w-[5.5rem] rounded-lg border border-violet-500/60 bg-violet-500/15 px-4 py-2 font-semibold text-violet-300"
        }
        (Role::Admin, false) => {
            "min-w-[5.5rem] rounded-lg border border-slate-700 px-4 py-2 text-slate-400 transition hover:border-violet-700 hover:bg-violet-900/20 hover:text-violet-300"
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
