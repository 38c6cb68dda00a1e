//! Remote store plumbing: the gateway contract, the two backends, the
//! wire shapes they share, and the local driver snapshot.

pub mod cache;
pub mod docstore;
pub mod gateway;
pub mod rowstore;
pub mod wire;

use async_trait::async_trait;

pub use cache::{load_driver_snapshot, save_driver_snapshot, DriverSnapshot};
pub use docstore::{CompanyLoadsWatch, DocStoreClient};
pub use gateway::{GatewayError, LoadDraft, LoadGateway};
pub use rowstore::RowStoreClient;

use crate::domain::{Load, Profile, TransitionUpdate};

/// The backend the app talks to, picked once at startup. The doc store is
/// the default; `LOADLINK_BACKEND=rowstore` switches.
#[derive(Clone)]
pub enum Backend {
    Row(RowStoreClient),
    Doc(DocStoreClient),
}

impl Backend {
    /// Fails only on a malformed `LOADLINK_API_URL`; call sites treat
    /// that like any other gateway error.
    pub fn from_env() -> Result<Self, GatewayError> {
        let choice = std::env::var("LOADLINK_BACKEND").unwrap_or_default();
        match choice.as_str() {
            "rowstore" | "row" => Ok(Backend::Row(RowStoreClient::new()?)),
            _ => Ok(Backend::Doc(DocStoreClient::new()?)),
        }
    }

    /// Live company subscription, where the backend supports one. The row
    /// store is pull-only, so its dashboards refresh manually instead.
    pub fn watch_company_loads(&self, company_id: &str) -> Option<CompanyLoadsWatch> {
        match self {
            Backend::Row(_) => None,
            Backend::Doc(client) => Some(client.watch_company_loads(company_id)),
        }
    }
}

#[async_trait]
impl LoadGateway for Backend {
    async fn fetch_posted_and_own(&self, driver_id: &str) -> Result<Vec<Load>, GatewayError> {
        match self {
            Backend::Row(client) => client.fetch_posted_and_own(driver_id).await,
            Backend::Doc(client) => client.fetch_posted_and_own(driver_id).await,
        }
    }

    async fn fetch_company_loads(&self, company_id: &str) -> Result<Vec<Load>, GatewayError> {
        match self {
            Backend::Row(client) => client.fetch_company_loads(company_id).await,
            Backend::Doc(client) => client.fetch_company_loads(company_id).await,
        }
    }

    async fn apply_transition(
        &self,
        load_id: &str,
        update: &TransitionUpdate,
    ) -> Result<(), GatewayError> {
        match self {
            Backend::Row(client) => client.apply_transition(load_id, update).await,
            Backend::Doc(client) => client.apply_transition(load_id, update).await,
        }
    }

    async fn insert_load(
        &self,
        company_id: &str,
        draft: &LoadDraft,
    ) -> Result<String, GatewayError> {
        match self {
            Backend::Row(client) => client.insert_load(company_id, draft).await,
            Backend::Doc(client) => client.insert_load(company_id, draft).await,
        }
    }

    async fn fetch_driver_profiles(&self) -> Result<Vec<Profile>, GatewayError> {
        match self {
            Backend::Row(client) => client.fetch_driver_profiles().await,
            Backend::Doc(client) => client.fetch_driver_profiles().await,
        }
    }

    async fn set_driver_verified(
        &self,
        profile_id: &str,
        verified: bool,
    ) -> Result<(), GatewayError> {
        match self {
            Backend::Row(client) => client.set_driver_verified(profile_id, verified).await,
            Backend::Doc(client) => client.set_driver_verified(profile_id, verified).await,
        }
    }
}
