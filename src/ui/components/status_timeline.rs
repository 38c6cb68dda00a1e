use dioxus::prelude::*;

use crate::domain::LoadStatus;

/// Six-step progress strip. Every state up to and including the current
/// one lights up; `picked` appears here even though no action drives it.
#[component]
pub fn StatusTimeline(status: LoadStatus) -> Element {
    let current_rank = status.rank();

    rsx! {
        div { class: "flex items-center gap-1",
            for step in LoadStatus::TIMELINE {
                {
                    let reached = step.rank() <= current_rank;
                    let dot = if reached {
                        "h-2.5 w-2.5 rounded-full bg-emerald-400"
                    } else {
                        "h-2.5 w-2.5 rounded-full bg-slate-700"
                    };
                    let label = if reached {
                        "text-[10px] text-emerald-300"
                    } else {
                        "text-[10px] text-slate-600"
                    };
                    rsx! {
                        div { class: "flex flex-col items-center gap-1 min-w-[3.5rem]",
                            span { class: "{dot}" }
                            span { class: "{label}", "{step.label()}" }
                        }
                        if step != LoadStatus::Completed {
                            span {
                                class: if reached { "h-px w-4 bg-emerald-500/50" } else { "h-px w-4 bg-slate-800" },
                            }
                        }
                    }
                }
            }
        }
    }
}
