//! Admin dashboard: the driver verification queue.

use dioxus::prelude::*;

use crate::domain::{AppState, Profile, Role};
use crate::infra::{Backend, LoadGateway};
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::components::KpiCard;
use crate::ui::theme;

#[component]
pub fn AdminPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let Some(actor) = state.with(|s| s.session.clone()) else {
        return rsx! { Fragment {} };
    };
    let role = actor.role;

    let profiles = use_signal(Vec::<Profile>::new);
    let refresh = use_signal(|| 0u32);

    let _fetch = use_resource({
        let toasts = toasts.clone();
        let refresh = refresh.clone();
        move || {
            let toasts = toasts.clone();
            let mut profiles = profiles.clone();
            let _tick = refresh();
            async move {
                let Ok(backend) = Backend::from_env() else {
                    push_toast(toasts, ToastKind::Error, "Backend configuration is invalid.");
                    return;
                };
                match backend.fetch_driver_profiles().await {
                    Ok(fetched) => profiles.set(fetched),
                    Err(err) => push_toast(
                        toasts,
                        ToastKind::Error,
                        format!("Failed to load driver profiles: {err}"),
                    ),
                }
            }
        }
    });

    let all = profiles();
    let pending = all.iter().filter(|profile| !profile.verified).count();
    let verified = all.len() - pending;

    let on_toggle = use_callback(move |(profile_id, verified): (String, bool)| {
        let mut refresh = refresh.clone();
        spawn(async move {
            let Ok(backend) = Backend::from_env() else {
                push_toast(toasts, ToastKind::Error, "Backend configuration is invalid.");
                return;
            };
            match backend.set_driver_verified(&profile_id, verified).await {
                Ok(()) => {
                    let title = if verified {
                        "Driver verified ✅"
                    } else {
                        "Verification revoked"
                    };
                    push_toast(toasts, ToastKind::Success, title);
                }
                Err(err) => {
                    push_toast(toasts, ToastKind::Error, format!("Update failed: {err}"));
                }
            }
            refresh.with_mut(|tick| *tick += 1);
        });
    });

    rsx! {
        div { class: "space-y-8",
            div { class: "grid grid-cols-1 gap-4 sm:grid-cols-3",
                KpiCard {
                    title: "Drivers",
                    value: "{all.len()}",
                    description: None,
                    role,
                }
                KpiCard {
                    title: "Pending Review",
                    value: "{pending}",
                    description: Some("Awaiting verification".to_string()),
                    role,
                }
                KpiCard {
                    title: "Verified",
                    value: "{verified}",
                    description: None,
                    role,
                }
            }

            section {
                h2 { class: "mb-3 text-lg font-semibold {theme::text_primary(role)}", "Driver Verification" }
                if all.is_empty() {
                    p { class: "text-sm text-slate-500", "No driver profiles found." }
                } else {
                    div { class: "space-y-3",
                        for profile in all {
                            DriverRow { profile, role, on_toggle }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DriverRow(profile: Profile, role: Role, on_toggle: EventHandler<(String, bool)>) -> Element {
    let location = match (&profile.city, &profile.state) {
        (Some(city), Some(state)) => format!("{city}, {state}"),
        (Some(city), None) => city.clone(),
        (None, Some(state)) => state.clone(),
        (None, None) => "—".to_string(),
    };
    let truck = profile
        .truck_type
        .as_ref()
        .map(|kind| kind.name().to_string())
        .unwrap_or_else(|| "—".to_string());

    rsx! {
        div {
            class: "{theme::panel_border(role)} flex flex-wrap items-center justify-between gap-3 p-4",
            div {
                div { class: "flex items-center gap-2",
                    p { class: "text-sm font-semibold text-slate-100", "{profile.name}" }
                    if profile.verified {
                        span { class: "rounded-full bg-emerald-500/15 px-2 py-0.5 text-[10px] font-semibold text-emerald-300", "VERIFIED" }
                    } else {
                        span { class: "rounded-full bg-amber-500/15 px-2 py-0.5 text-[10px] font-semibold text-amber-300", "PENDING" }
                    }
                }
                p { class: "text-xs text-slate-500",
                    "📍 {location} · 🚛 {truck}"
                }
                if let Some(license) = profile.license_number.clone() {
                    p { class: "text-xs text-slate-600", "License {license}" }
                }
                if let Some(truck_number) = profile.truck_number.clone() {
                    p { class: "text-xs text-slate-600", "Truck {truck_number}" }
                }
            }
            button {
                class: "{theme::btn_small(role)}",
                onclick: {
                    let id = profile.id.clone();
                    let verified = profile.verified;
                    move |_| on_toggle.call((id.clone(), !verified))
                },
                if profile.verified { "Revoke" } else { "Verify" }
            }
        }
    }
}
