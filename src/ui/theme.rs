//! Role-specific theme helpers for consistent styling across pages.
//! Company screens run amber/gold, driver screens sky blue, admin violet.

use crate::domain::Role;

// ============================================
// BUTTON STYLES
// ============================================

pub fn btn_primary(role: Role) -> &'static str {
    match role {
        Role::Company => "rounded-lg bg-amber-500 px-4 py-2 text-sm font-semibold text-slate-950 hover:bg-amber-400",
        Role::Driver => "rounded-lg bg-sky-500 px-4 py-2 text-sm font-semibold text-white hover:bg-sky-400",
        Role::Admin => "rounded-lg bg-violet-500 px-4 py-2 text-sm font-semibold text-white hover:bg-violet-400",
    }
}

pub fn btn_small(role: Role) -> &'static str {
    match role {
        Role::Company => "rounded px-3 py-1.5 text-xs font-semibold bg-amber-500/20 text-amber-300 border border-amber-500/40 hover:bg-amber-500/30",
        Role::Driver => "rounded px-3 py-1.5 text-xs font-semibold bg-sky-500/20 text-sky-300 border border-sky-500/40 hover:bg-sky-500/30",
        Role::Admin => "rounded px-3 py-1.5 text-xs font-semibold bg-violet-500/20 text-violet-300 border border-violet-500/40 hover:bg-violet-500/30",
    }
}

// ============================================
// INPUT STYLES
// ============================================

pub fn input_class(role: Role) -> &'static str {
    match role {
        Role::Company => "rounded-lg border border-slate-700 bg-slate-950 px-4 py-2.5 text-sm text-slate-100 focus:border-amber-500 focus:outline-none",
        Role::Driver => "rounded-lg border border-slate-700 bg-slate-950 px-4 py-2.5 text-sm text-slate-100 focus:border-sky-500 focus:outline-none",
        Role::Admin => "rounded-lg border border-slate-700 bg-slate-950 px-4 py-2.5 text-sm text-slate-100 focus:border-violet-500 focus:outline-none",
    }
}

// ============================================
// PANEL / CONTAINER STYLES
// ============================================

pub fn panel_border(role: Role) -> &'static str {
    match role {
        Role::Company => "rounded-xl border border-amber-800/50 bg-slate-900/40",
        Role::Driver => "rounded-xl border border-sky-800/50 bg-slate-900/40",
        Role::Admin => "rounded-xl border border-violet-800/50 bg-slate-900/40",
    }
}

pub fn header_class(role: Role) -> &'static str {
    match role {
        Role::Company => "border-b border-amber-900/40 bg-slate-950/90 backdrop-blur px-6 py-4",
        Role::Driver => "border-b border-sky-900/40 bg-slate-950/90 backdrop-blur px-6 py-4",
        Role::Admin => "border-b border-violet-900/40 bg-slate-950/90 backdrop-blur px-6 py-4",
    }
}

pub fn title_class(role: Role) -> &'static str {
    match role {
        Role::Company => "text-xl font-semibold tracking-tight text-amber-200",
        Role::Driver => "text-xl font-semibold tracking-tight text-sky-200",
        Role::Admin => "text-xl font-semibold tracking-tight text-violet-200",
    }
}

// ============================================
// TEXT STYLES
// ============================================

pub fn text_primary(role: Role) -> &'static str {
    match role {
        Role::Company => "text-amber-300",
        Role::Driver => "text-sky-300",
        Role::Admin => "text-violet-300",
    }
}

pub fn accent_text(role: Role) -> &'static str {
    match role {
        Role::Company => "text-amber-400",
        Role::Driver => "text-emerald-400",
        Role::Admin => "text-violet-400",
    }
}

pub fn label_class(_role: Role) -> &'static str {
    "block text-xs font-semibold uppercase text-slate-500"
}

pub fn text_muted(_role: Role) -> &'static str {
    "text-slate-500"
}

// ============================================
// STATUS BADGES
// ============================================

pub fn status_badge(status: crate::domain::LoadStatus) -> &'static str {
    use crate::domain::LoadStatus;
    match status {
        LoadStatus::Posted => {
            "rounded-full px-2.5 py-0.5 text-[11px] font-semibold bg-slate-500/15 text-slate-300 border border-slate-500/40"
        }
        LoadStatus::Accepted => {
            "rounded-full px-2.5 py-0.5 text-[11px] font-semibold bg-sky-500/15 text-sky-300 border border-sky-500/40"
        }
        LoadStatus::Picked => {
            "rounded-full px-2.5 py-0.5 text-[11px] font-semibold bg-indigo-500/15 text-indigo-300 border border-indigo-500/40"
        }
        LoadStatus::InTransit => {
            "rounded-full px-2.5 py-0.5 text-[11px] font-semibold bg-amber-500/15 text-amber-300 border border-amber-500/40"
        }
        LoadStatus::Delivered => {
            "rounded-full px-2.5 py-0.5 text-[11px] font-semibold bg-emerald-500/15 text-emerald-300 border border-emerald-500/40"
        }
        LoadStatus::Completed => {
            "rounded-full px-2.5 py-0.5 text-[11px] font-semibold bg-emerald-500/25 text-emerald-200 border border-emerald-500/60"
        }
    }
}
