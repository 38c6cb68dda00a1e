//! Driver dashboard: open market plus the driver's own trips.
//!
//! Paints the last on-disk snapshot immediately, then replaces it with
//! the live fetch. All lifecycle buttons funnel through one handler that
//! validates locally, sends the guarded update, and re-fetches.

use dioxus::prelude::*;

use crate::domain::{
    driver_board, plan_transition, Actor, AppState, Load, LoadAction,
};
use crate::infra::{
    cache::{load_driver_snapshot, save_driver_snapshot, DriverSnapshot},
    Backend, GatewayError, LoadGateway,
};
use crate::ui::components::toast::{push_toast, push_toast_with, ToastKind, ToastMessage};
use crate::ui::components::{KpiCard, LoadCard};
use crate::ui::theme;

#[component]
pub fn DriverPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let Some(actor) = state.with(|s| s.session.clone()) else {
        return rsx! { Fragment {} };
    };

    let loads = use_signal(Vec::<Load>::new);
    let cached_age = use_signal(|| None::<String>);
    // Bumped after every confirmed transition to force a re-fetch.
    let refresh = use_signal(|| 0u32);

    // Seed from the last snapshot so the board is not blank on launch.
    use_hook({
        let mut loads = loads.clone();
        let mut cached_age = cached_age.clone();
        move || {
            if let Some(snapshot) = load_driver_snapshot() {
                cached_age.set(Some(snapshot.age_string()));
                loads.set(snapshot.loads);
            }
        }
    });

    let _fetch = use_resource({
        let actor = actor.clone();
        let toasts = toasts.clone();
        let refresh = refresh.clone();
        move || {
            let actor = actor.clone();
            let toasts = toasts.clone();
            let mut loads = loads.clone();
            let mut cached_age = cached_age.clone();
            let _tick = refresh();
            async move {
                let Ok(backend) = Backend::from_env() else {
                    push_toast(toasts, ToastKind::Error, "Backend configuration is invalid.");
                    return;
                };
                match backend.fetch_posted_and_own(&actor.id).await {
                    Ok(fetched) => {
                        if let Err(err) = save_driver_snapshot(&DriverSnapshot::new(fetched.clone()))
                        {
                            println!("[driver] snapshot save failed: {err}");
                        }
                        cached_age.set(None);
                        loads.set(fetched);
                    }
                    Err(err) => {
                        push_toast(toasts, ToastKind::Error, format!("Failed to load board: {err}"));
                    }
                }
            }
        }
    });

    let board = driver_board(&loads(), &actor.id);
    let active = board.mine.len();
    let done = board.delivered.len();
    let earned = board.earnings();
    let role = actor.role;

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
            if let Some(age) = cached_age() {
                div { class: "rounded-lg border border-slate-800 bg-slate-900/60 px-4 py-2 text-xs text-slate-400",
                    "Showing loads cached {age} ago; refreshing…"
                }
            }

            div { class: "grid grid-cols-1 gap-4 sm:grid-cols-3",
                KpiCard {
                    title: "Active Trips",
                    value: "{active}",
                    description: Some("Accepted or on the road".to_string()),
                    role,
                }
                KpiCard {
                    title: "Trips Done",
                    value: "{done}",
                    description: Some("Delivered and completed".to_string()),
                    role,
                }
                KpiCard {
                    title: "Earned",
                    value: format!("₹{}", crate::domain::format_inr(earned)),
                    description: Some("Across delivered trips".to_string()),
                    role,
                }
            }

            section {
                h2 { class: "mb-3 text-lg font-semibold {theme::text_primary(role)}", "My Loads" }
                if board.mine.is_empty() && board.delivered.is_empty() {
                    p { class: "text-sm text-slate-500", "No trips yet. Accept a load below to get rolling." }
                } else {
                    div { class: "grid grid-cols-1 gap-4 md:grid-cols-2",
                        for load in board.mine.iter().chain(board.delivered.iter()).cloned() {
                            LoadCard {
                                load,
                                actor: actor.clone(),
                                on_action,
                            }
                        }
                    }
                }
            }

            section {
                h2 { class: "mb-3 text-lg font-semibold {theme::text_primary(role)}", "Available Loads" }
                if board.available.is_empty() {
                    p { class: "text-sm text-slate-500", "Nothing posted right now. Check back soon." }
                } else {
                    div { class: "grid grid-cols-1 gap-4 md:grid-cols-2",
                        for load in board.available.iter().cloned() {
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

/// Validate, send, toast. The in-memory load set is never patched here;
/// the caller re-fetches and the confirmed state comes back from the
/// store.
pub async fn run_transition(
    load: Load,
    action: LoadAction,
    actor: Actor,
    toasts: Signal<Vec<ToastMessage>>,
) {
    let update = match plan_transition(&load, action, &actor) {
        Ok(update) => update,
        Err(err) => {
            push_toast(toasts, ToastKind::Warning, err.to_string());
            return;
        }
    };

    let Ok(backend) = Backend::from_env() else {
        push_toast(toasts, ToastKind::Error, "Backend configuration is invalid.");
        return;
    };

    match backend.apply_transition(&load.id, &update).await {
        Ok(()) => {
            push_toast_with(
                toasts,
                ToastKind::Success,
                action.success_title(),
                Some(action.success_description().to_string()),
            );
        }
        Err(GatewayError::Conflict) => {
            push_toast(
                toasts,
                ToastKind::Warning,
                "This load was just taken or updated by someone else.",
            );
        }
        Err(err) => {
            push_toast(toasts, ToastKind::Error, format!("Update failed: {err}"));
        }
    }
}
