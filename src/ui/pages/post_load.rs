//! Load posting form. State picks drive the city dropdowns; everything
//! else is free-form. The store assigns the id and stamps the new load
//! `posted`.

use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::{major_cities, AppState, Role, TruckType, INDIAN_STATES};
use crate::infra::{Backend, LoadDraft, LoadGateway};
use crate::ui::components::toast::{push_toast, push_toast_with, ToastKind, ToastMessage};
use crate::ui::theme;

#[component]
pub fn PostLoadPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let Some(actor) = state.with(|s| s.session.clone()) else {
        return rsx! { Fragment {} };
    };
    // Only companies can post; anyone else landing here is bounced.
    if actor.role != Role::Company {
        return rsx! {
            p { class: "text-sm text-slate-500", "Only company accounts can post loads." }
        };
    }
    let role = actor.role;

    let mut pickup_state = use_signal(|| "Maharashtra".to_string());
    let mut pickup_city = use_signal(String::new);
    let mut drop_state = use_signal(|| "Maharashtra".to_string());
    let mut drop_city = use_signal(String::new);
    let mut material = use_signal(String::new);
    let mut weight = use_signal(String::new);
    let mut truck_type = use_signal(|| TruckType::OpenBody);
    let mut price = use_signal(String::new);
    let mut pickup_date = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let on_submit = {
        let actor = actor.clone();
        let toasts = toasts.clone();
        move |_| {
            if submitting() {
                return;
            }
            let Some(draft) = build_draft(
                &pickup_city(),
                &pickup_state(),
                &drop_city(),
                &drop_state(),
                &material(),
                &weight(),
                truck_type(),
                &price(),
                &pickup_date(),
            ) else {
                push_toast(
                    toasts,
                    ToastKind::Warning,
                    "Please fill route, material, weight and price.",
                );
                return;
            };

            submitting.set(true);
            let company_id = actor.id.clone();
            let toasts = toasts.clone();
            let nav = nav.clone();
            spawn(async move {
                let Ok(backend) = Backend::from_env() else {
                    push_toast(toasts, ToastKind::Error, "Backend configuration is invalid.");
                    submitting.set(false);
                    return;
                };
                match backend.insert_load(&company_id, &draft).await {
                    Ok(id) => {
                        println!("[post-load] created load {id}");
                        push_toast_with(
                            toasts,
                            ToastKind::Success,
                            "Load Posted! 📦",
                            Some("लोड पोस्ट हो गया".to_string()),
                        );
                        nav.push(Route::Home {});
                    }
                    Err(err) => {
                        push_toast(toasts, ToastKind::Error, format!("Failed to post load: {err}"));
                        submitting.set(false);
                    }
                }
            });
        }
    };

    rsx! {
        div { class: "mx-auto max-w-2xl space-y-6",
            h2 { class: "text-lg font-semibold {theme::text_primary(role)}", "Post a Load" }

            div { class: "{theme::panel_border(role)} p-6 space-y-5",
                div { class: "grid grid-cols-1 gap-4 sm:grid-cols-2",
                    RoutePicker {
                        legend: "Pickup",
                        state_value: pickup_state(),
                        city_value: pickup_city(),
                        role,
                        on_state: move |value| {
                            pickup_state.set(value);
                            pickup_city.set(String::new());
                        },
                        on_city: move |value| pickup_city.set(value),
                    }
                    RoutePicker {
                        legend: "Drop",
                        state_value: drop_state(),
                        city_value: drop_city(),
                        role,
                        on_state: move |value| {
                            drop_state.set(value);
                            drop_city.set(String::new());
                        },
                        on_city: move |value| drop_city.set(value),
                    }
                }

                div {
                    label { class: "{theme::label_class(role)} mb-1", "Material" }
                    input {
                        class: "{theme::input_class(role)} w-full",
                        placeholder: "e.g. Cement bags, steel coils",
                        value: "{material}",
                        oninput: move |ev| material.set(ev.value()),
                    }
                }

                div { class: "grid grid-cols-1 gap-4 sm:grid-cols-3",
                    div {
                        label { class: "{theme::label_class(role)} mb-1", "Weight (tons)" }
                        input {
                            class: "{theme::input_class(role)} w-full",
                            r#type: "number",
                            min: "0",
                            step: "0.5",
                            value: "{weight}",
                            oninput: move |ev| weight.set(ev.value()),
                        }
                    }
                    div {
                        label { class: "{theme::label_class(role)} mb-1", "Truck type" }
                        select {
                            class: "{theme::input_class(role)} w-full",
                            value: "{truck_type().name()}",
                            onchange: move |ev| truck_type.set(TruckType::from(ev.value())),
                            for kind in TruckType::ALL {
                                option { value: "{kind.name()}", "{kind.name()}" }
                            }
                        }
                    }
                    div {
                        label { class: "{theme::label_class(role)} mb-1", "Price (₹)" }
                        input {
                            class: "{theme::input_class(role)} w-full",
                            r#type: "number",
                            min: "0",
                            value: "{price}",
                            oninput: move |ev| price.set(ev.value()),
                        }
                    }
                }

                div {
                    label { class: "{theme::label_class(role)} mb-1", "Pickup date (optional)" }
                    input {
                        class: "{theme::input_class(role)} w-full",
                        r#type: "date",
                        value: "{pickup_date}",
                        oninput: move |ev| pickup_date.set(ev.value()),
                    }
                }

                button {
                    class: "{theme::btn_primary(role)} w-full",
                    disabled: submitting(),
                    onclick: on_submit,
                    if submitting() { "Posting…" } else { "Post Load" }
                }
            }
        }
    }
}

#[component]
fn RoutePicker(
    legend: &'static str,
    state_value: String,
    city_value: String,
    role: Role,
    on_state: EventHandler<String>,
    on_city: EventHandler<String>,
) -> Element {
    let cities = major_cities(&state_value);

    rsx! {
        fieldset { class: "space-y-2",
            legend { class: "{theme::label_class(role)} mb-1", "{legend}" }
            select {
                class: "{theme::input_class(role)} w-full",
                value: "{state_value}",
                onchange: move |ev| on_state.call(ev.value()),
                for state in INDIAN_STATES {
                    option { value: "{state}", "{state}" }
                }
            }
            select {
                class: "{theme::input_class(role)} w-full",
                value: "{city_value}",
                onchange: move |ev| on_city.call(ev.value()),
                option { value: "", "Select city" }
                for city in cities {
                    option { value: "{city}", "{city}" }
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build_draft(
    pickup_city: &str,
    pickup_state: &str,
    drop_city: &str,
    drop_state: &str,
    material: &str,
    weight: &str,
    truck_type: TruckType,
    price: &str,
    pickup_date: &str,
) -> Option<LoadDraft> {
    let weight: f64 = weight.trim().parse().ok().filter(|value| *value > 0.0)?;
    let price: i64 = price.trim().parse().ok().filter(|value| *value > 0)?;
    if pickup_city.is_empty() || drop_city.is_empty() || material.trim().is_empty() {
        return None;
    }

    Some(LoadDraft {
        pickup_city: pickup_city.to_string(),
        pickup_state: pickup_state.to_string(),
        drop_city: drop_city.to_string(),
        drop_state: drop_state.to_string(),
        material: material.trim().to_string(),
        weight,
        truck_type,
        price,
        pickup_date: crate::infra::wire::parse_date(pickup_date.trim()),
    })
}
