//! Company dashboard: the company's own postings, live where the backend
//! can push. On the document store this page holds a subscription whose
//! poller dies with the page; on the row store it falls back to manual
//! refresh.

use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::{company_board, AppState, Load, LoadAction};
use crate::infra::{Backend, LoadGateway};
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::components::{KpiCard, LoadCard, StatusTimeline};
use crate::ui::pages::driver::run_transition;
use crate::ui::theme;

#[component]
pub fn CompanyPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let Some(actor) = state.with(|s| s.session.clone()) else {
        return rsx! { Fragment {} };
    };

    let loads = use_signal(Vec::<Load>::new);
    let live = use_signal(|| false);
    let refresh = use_signal(|| 0u32);

    // On the doc store this future owns the subscription for the lifetime
    // of the page; restarting it (refresh bump) or leaving the page drops
    // the watch and stops the poller.
    let _feed = use_resource({
        let actor = actor.clone();
        let toasts = toasts.clone();
        let refresh = refresh.clone();
        move || {
            let actor = actor.clone();
            let toasts = toasts.clone();
            let mut loads = loads.clone();
            let mut live = live.clone();
            let _tick = refresh();
            async move {
                let Ok(backend) = Backend::from_env() else {
                    push_toast(toasts, ToastKind::Error, "Backend configuration is invalid.");
                    return;
                };
                match backend.watch_company_loads(&actor.id) {
                    Some(mut watch) => {
                        live.set(true);
                        while let Some(snapshot) = watch.changed().await {
                            loads.set(snapshot);
                        }
                    }
                    None => {
                        live.set(false);
                        match backend.fetch_company_loads(&actor.id).await {
                            Ok(fetched) => loads.set(fetched),
                            Err(err) => push_toast(
                                toasts,
                                ToastKind::Error,
                                format!("Failed to load your postings: {err}"),
                            ),
                        }
                    }
                }
            }
        }
    });

    let board = company_board(&loads());
    let available = board.open.len() - board.active.len();
    let role = actor.role;
    let nav = use_navigator();

    let on_action = use_callback({
        let actor = actor.clone();
        move |(load, action): (Load, LoadAction)| {
            let actor = actor.clone();
            let mut refresh = refresh.clone();
            spawn(async move {
                run_transition(load, action, actor, toasts).await;
                refresh.with_mut(|tick| *tick += 1);
            });
        }
    });

    rsx! {
        div { class: "space-y-8",
            div { class: "flex items-center justify-between",
                h2 { class: "text-lg font-semibold {theme::text_primary(role)}", "Your Loads" }
                div { class: "flex items-center gap-3",
                    if live() {
                        span { class: "text-xs text-emerald-400", "● live" }
                    } else {
                        button {
                            class: "{theme::btn_small(role)}",
                            onclick: {
                                let mut refresh = refresh.clone();
                                move |_| refresh.with_mut(|tick| *tick += 1)
                            },
                            "Refresh"
                        }
                    }
                }
            }

            div { class: "grid grid-cols-2 gap-4 lg:grid-cols-4",
                KpiCard {
                    title: "Awaiting Driver",
                    value: "{available}",
                    description: Some("Posted, not yet accepted".to_string()),
                    role,
                }
                KpiCard {
                    title: "Active",
                    value: "{board.active.len()}",
                    description: Some("Truck assigned".to_string()),
                    role,
                }
                KpiCard {
                    title: "Completed",
                    value: "{board.completed.len()}",
                    description: None,
                    role,
                }
                KpiCard {
                    title: "Spent",
                    value: format!("₹{}", crate::domain::format_inr(board.spend())),
                    description: Some("Across completed loads".to_string()),
                    role,
                }
            }

            if board.open.is_empty() && board.completed.is_empty() {
                div { class: "{theme::panel_border(role)} p-10 text-center",
                    p { class: "mb-4 text-slate-400", "You haven't posted any loads yet." }
                    button {
                        class: "{theme::btn_primary(role)}",
                        onclick: move |_| { nav.push(Route::PostLoad {}); },
                        "Post your first load"
                    }
                }
            }

            if !board.active.is_empty() {
                section {
                    h3 { class: "mb-3 text-sm font-semibold uppercase text-slate-500", "In Progress" }
                    div { class: "space-y-4",
                        for load in board.active.iter().cloned() {
                            div { class: "{theme::panel_border(role)} p-4 space-y-3",
                                LoadCard {
                                    load: load.clone(),
                                    actor: actor.clone(),
                                    on_action,
                                }
                                StatusTimeline { status: load.status }
                            }
                        }
                    }
                }
            }

            if !board.open.is_empty() {
                section {
                    h3 { class: "mb-3 text-sm font-semibold uppercase text-slate-500", "All Open" }
                    div { class: "grid grid-cols-1 gap-4 md:grid-cols-2",
                        for load in board.open.iter().cloned() {
                            LoadCard {
                                load,
                                actor: actor.clone(),
                                on_action,
                            }
                        }
                    }
                }
            }

            if !board.completed.is_empty() {
                section {
                    h3 { class: "mb-3 text-sm font-semibold uppercase text-slate-500", "Completed" }
                    div { class: "grid grid-cols-1 gap-4 md:grid-cols-2",
                        for load in board.completed.iter().cloned() {
                            LoadCard {
                                load,
                                actor: actor.clone(),
                                on_action,
                            }
                        }
                    }
                }
            }
        }
    }
}
