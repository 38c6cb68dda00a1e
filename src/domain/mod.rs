//! Marketplace domain logic: entities, the lifecycle state machine, and
//! the role-specific board views.

pub mod app_state;
pub mod board;
pub mod entities;
pub mod lifecycle;

pub use app_state::{AppState, PersistedState};
pub use board::{
    company_board, driver_board, merge_posted_and_own, CompanyBoard, DriverBoard,
};
pub use entities::{
    format_inr, major_cities, Load, LoadStatus, Profile, Role, TruckType, INDIAN_STATES,
};
pub use lifecycle::{
    available_action, plan_transition, Actor, LoadAction, TransitionError, TransitionUpdate,
};
