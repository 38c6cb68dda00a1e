//! Sign-in screen. There is no identity provider in the desktop build;
//! the user picks a role and supplies the account id their records live
//! under, and every later call carries that actor explicitly.

use dioxus::prelude::*;

use crate::app::persist_user_state;
use crate::domain::{Actor, AppState, Role};
use crate::ui::theme;
use crate::util::version;

#[component]
pub fn LoginPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let mut selected_role = use_signal(|| None::<Role>);
    let mut account_id = use_signal(String::new);
    let mut display_name = use_signal(String::new);

    let on_sign_in = {
        let mut state = state.clone();
        move |_| {
            let Some(role) = selected_role() else { return };
            let id = account_id().trim().to_string();
            if id.is_empty() {
                return;
            }
            let name = {
                let entered = display_name().trim().to_string();
                if entered.is_empty() {
                    id.clone()
                } else {
                    entered
                }
            };
            state.with_mut(|s| s.sign_in(Actor::new(id, role), name));
            persist_user_state(&state);
        }
    };

    rsx! {
        div {
            class: "min-h-screen flex items-center justify-center p-8",
            div {
                class: "max-w-4xl w-full",
                div { class: "text-center mb-12",
                    h1 {
                        class: "text-4xl font-bold text-slate-100 mb-3",
                        "🚛 {version::APP_NAME}"
                    }
                    p {
                        class: "text-xl text-slate-400",
                        "{version::APP_TAGLINE}"
                    }
                }

                div { class: "grid grid-cols-1 md:grid-cols-3 gap-6 mb-10",
                    RoleCard {
                        role: Role::Company,
                        title: "Company",
                        emoji: "🏢",
                        description: "Post loads and track every truck until delivery.",
                        features: vec![
                            "Post loads across India",
                            "Live status of active trips",
                            "Spend overview",
                        ],
                        selected: selected_role() == Some(Role::Company),
                        on_select: move |_| selected_role.set(Some(Role::Company)),
                    }
                    RoleCard {
                        role: Role::Driver,
                        title: "Driver",
                        emoji: "🚚",
                        description: "Find loads on your route and earn per trip.",
                        features: vec![
                            "Open load market",
                            "One-tap trip progress",
                            "Earnings tracker",
                        ],
                        selected: selected_role() == Some(Role::Driver),
                        on_select: move |_| selected_role.set(Some(Role::Driver)),
                    }
                    RoleCard {
                        role: Role::Admin,
                        title: "Admin",
                        emoji: "🛡️",
                        description: "Verify drivers and keep the marketplace honest.",
                        features: vec![
                            "Driver verification queue",
                            "License and truck records",
                            "Marketplace oversight",
                        ],
                        selected: selected_role() == Some(Role::Admin),
                        on_select: move |_| selected_role.set(Some(Role::Admin)),
                    }
                }

                if let Some(role) = selected_role() {
                    div { class: "mx-auto max-w-md {theme::panel_border(role)} p-6 space-y-4",
                        div {
                            label { class: "{theme::label_class(role)} mb-1", "Account ID" }
                            input {
                                class: "{theme::input_class(role)} w-full",
                                placeholder: "e.g. co-sharma-logistics",
                                value: "{account_id}",
                                oninput: move |ev| account_id.set(ev.value()),
                            }
                        }
                        div {
                            label { class: "{theme::label_class(role)} mb-1", "Display name" }
                            input {
                                class: "{theme::input_class(role)} w-full",
                                placeholder: "Shown in the header",
                                value: "{display_name}",
                                oninput: move |ev| display_name.set(ev.value()),
                            }
                        }
                        button {
                            class: "{theme::btn_primary(role)} w-full",
                            onclick: on_sign_in,
                            "Continue as {role.title()}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RoleCard(
    role: Role,
    title: &'static str,
    emoji: &'static str,
    description: &'static str,
    features: Vec<&'static str>,
    selected: bool,
    on_select: EventHandler<()>,
) -> Element {
    let border_color = match (role, selected) {
        (Role::Company, true) => "border-amber-500/70 bg-amber-500/5",
        (Role::Company, false) => "border-amber-500/30 hover:border-amber-500/60 hover:bg-amber-500/5",
        (Role::Driver, true) => "border-sky-500/70 bg-sky-500/5",
        (Role::Driver, false) => "border-sky-500/30 hover:border-sky-500/60 hover:bg-sky-500/5",
        (Role::Admin, true) => "border-violet-500/70 bg-violet-500/5",
        (Role::Admin, false) => "border-violet-500/30 hover:border-violet-500/60 hover:bg-violet-500/5",
    };

    rsx! {
        div {
            class: "group relative rounded-2xl border-2 p-6 cursor-pointer transition-all duration-200 {border_color} bg-slate-900/60",
            onclick: move |_| on_select.call(()),
            div {
                class: "text-5xl mb-4 transition-transform group-hover:scale-110",
                "{emoji}"
            }
            h2 {
                class: "text-2xl font-bold {theme::accent_text(role)} mb-2",
                "{title}"
            }
            p {
                class: "text-sm text-slate-400 mb-4",
                "{description}"
            }
            ul { class: "space-y-1",
                for feature in features {
                    li {
                        class: "text-xs text-slate-500 flex items-center gap-2",
                        span { class: "text-slate-600", "›" }
                        "{feature}"
                    }
                }
            }
        }
    }
}
