use dioxus::prelude::*;

use crate::domain::{available_action, Actor, Load, LoadAction};
use crate::ui::theme;

/// One load as a card: route, cargo facts, price, status badge, and the
/// single action the current actor may take (if any).
#[component]
pub fn LoadCard(load: Load, actor: Actor, on_action: EventHandler<(Load, LoadAction)>) -> Element {
    let action = available_action(&load, &actor);
    let role = actor.role;
    let weight = format!("{} T", load.weight);

    rsx! {
        div {
            class: "{theme::panel_border(role)} p-4 flex flex-col gap-3",
            div { class: "flex items-start justify-between gap-3",
                div {
                    p { class: "text-sm font-semibold text-slate-100", "{load.route_label()}" }
                    if let Some(company) = load.company_name.clone() {
                        p { class: "text-xs text-slate-500", "{company}" }
                    }
                }
                span { class: "{theme::status_badge(load.status)}", "{load.status.label()}" }
            }
            div { class: "flex flex-wrap gap-x-4 gap-y-1 text-xs text-slate-400",
                span { "📦 {load.material}" }
                span { "⚖️ {weight}" }
                span { "🚛 {load.truck_type}" }
                if let Some(km) = load.distance_km {
                    span { "🛣️ {km} km" }
                }
            }
            div { class: "flex items-center justify-between",
                p { class: "text-lg font-semibold {theme::accent_text(role)}", "{load.price_display()}" }
                if let Some(action) = action {
                    button {
                        class: "{theme::btn_small(role)}",
                        onclick: {
                            let load = load.clone();
                            move |_| on_action.call((load.clone(), action))
                        },
                        "{action.label()}"
                    }
                }
            }
        }
    }
}
