//! Capability contract over the remote store.
//!
//! Two backends conform: the pull-only row store and the document store,
//! which additionally offers a live company subscription. Their semantics
//! are deliberately not merged.

use async_trait::async_trait;
use thiserror::Error;
use time::Date;

use crate::domain::{Load, Profile, TransitionUpdate, TruckType};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("not signed in")]
    Unauthenticated,
    /// The conditional update found the load already changed remotely,
    /// e.g. another driver accepted it first.
    #[error("load was already taken or updated by someone else")]
    Conflict,
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    /// Backend rejection, surfaced verbatim to the notification sink.
    #[error("{0}")]
    Remote(String),
}

/// Fields a company submits when posting a load. The store assigns the id
/// and stamps `status = posted`, `driver_id = null`, `created_at`.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadDraft {
    pub pickup_city: String,
    pub pickup_state: String,
    pub drop_city: String,
    pub drop_state: String,
    pub material: String,
    pub weight: f64,
    pub truck_type: TruckType,
    pub price: i64,
    pub pickup_date: Option<Date>,
}

/// Async operations against the remote store. Every call is a suspension
/// point and may stall indefinitely; callers own any timeout policy, and
/// retries stay manual (interactive scope).
#[async_trait]
pub trait LoadGateway {
    /// Union of `status == posted` and `driver_id == driver_id`,
    /// de-duplicated by id with the own-loads entry winning.
    async fn fetch_posted_and_own(&self, driver_id: &str) -> Result<Vec<Load>, GatewayError>;

    /// All loads for one company, newest first.
    async fn fetch_company_loads(&self, company_id: &str) -> Result<Vec<Load>, GatewayError>;

    /// Partial update of only the transition fields, guarded by the
    /// expected prior status. A lost race surfaces as `Conflict`.
    async fn apply_transition(
        &self,
        load_id: &str,
        update: &TransitionUpdate,
    ) -> Result<(), GatewayError>;

    /// Insert a new load in `posted` status; returns the assigned id.
    async fn insert_load(
        &self,
        company_id: &str,
        draft: &LoadDraft,
    ) -> Result<String, GatewayError>;

    /// All driver profiles, for the admin verification screen.
    async fn fetch_driver_profiles(&self) -> Result<Vec<Profile>, GatewayError>;

    async fn set_driver_verified(
        &self,
        profile_id: &str,
        verified: bool,
    ) -> Result<(), GatewayError>;
}
