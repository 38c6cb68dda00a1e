//! Document-store backend.
//!
//! Speaks a small envelope protocol (`{status, data, message}`) over
//! resource paths, and offers what the row store cannot: a live company
//! subscription that keeps pushing fresh snapshots until dropped.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::{merge_posted_and_own, Load, Profile, TransitionUpdate};
use crate::infra::gateway::{GatewayError, LoadDraft, LoadGateway};
use crate::infra::wire::{format_date, LoadDto, ProfileDto, TransitionBody};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1/";
const USER_AGENT: &str = "loadlink/0.1.0";
const WATCH_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct DocStoreClient {
    http: Client,
    base_url: Url,
}

impl DocStoreClient {
    pub fn new() -> Result<Self, GatewayError> {
        let base = std::env::var("LOADLINK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::with_base_url(&base)
    }

    pub fn with_base_url(base: &str) -> Result<Self, GatewayError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        Ok(self.base_url.join(path)?)
    }

    async fn fetch_data<T>(&self, builder: reqwest::RequestBuilder) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(GatewayError::Unauthenticated),
            StatusCode::CONFLICT => return Err(GatewayError::Conflict),
            _ => {}
        }
        let envelope: ApiEnvelope<T> = response.json().await?;
        let ApiEnvelope {
            status,
            data,
            message,
        } = envelope;

        if status.eq_ignore_ascii_case("ok") {
            data.ok_or_else(|| GatewayError::Remote("response missing data".into()))
        } else {
            Err(GatewayError::Remote(message.unwrap_or(status)))
        }
    }

    async fn get_loads(&self, url: Url) -> Result<Vec<Load>, GatewayError> {
        let rows: Vec<LoadDto> = self.fetch_data(self.http.get(url)).await?;
        Ok(rows.into_iter().map(Load::from).collect())
    }

    /// Live view of one company's loads. The store exposes no change feed
    /// over plain HTTP, so the subscription is a polling task that only
    /// publishes when the snapshot actually changed. Dropping the returned
    /// handle tears the task down.
    pub fn watch_company_loads(&self, company_id: &str) -> CompanyLoadsWatch {
        let client = self.clone();
        let company_id = company_id.to_string();
        let (tx, rx) = watch::channel::<Option<Vec<Load>>>(None);

        let handle = tokio::spawn(async move {
            let mut last: Option<Vec<Load>> = None;
            loop {
                match client.fetch_company_loads(&company_id).await {
                    Ok(loads) => {
                        if last.as_ref() != Some(&loads) {
                            last = Some(loads.clone());
                            if tx.send(Some(loads)).is_err() {
                                // Receiver gone, subscription over.
                                break;
                            }
                        }
                    }
                    Err(error) => {
                        println!("[watch] company {company_id} poll failed: {error}");
                    }
                }
                if tx.is_closed() {
                    break;
                }
                tokio::time::sleep(WATCH_POLL_INTERVAL).await;
            }
        });

        CompanyLoadsWatch {
            receiver: rx,
            handle,
        }
    }
}

/// Handle to a live company subscription. Holds the poll task; dropping
/// the handle aborts it so a dismounted dashboard never leaks a poller.
pub struct CompanyLoadsWatch {
    receiver: watch::Receiver<Option<Vec<Load>>>,
    handle: JoinHandle<()>,
}

impl CompanyLoadsWatch {
    /// Wait for the next snapshot. `None` means the publisher is gone.
    pub async fn changed(&mut self) -> Option<Vec<Load>> {
        loop {
            self.receiver.changed().await.ok()?;
            let snapshot = self.receiver.borrow_and_update().clone();
            if snapshot.is_some() {
                return snapshot;
            }
        }
    }

    /// Most recent snapshot without waiting, if one has arrived.
    pub fn latest(&self) -> Option<Vec<Load>> {
        self.receiver.borrow().clone()
    }
}

impl Drop for CompanyLoadsWatch {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[async_trait]
impl LoadGateway for DocStoreClient {
    async fn fetch_posted_and_own(&self, driver_id: &str) -> Result<Vec<Load>, GatewayError> {
        let mut posted_url = self.url("loads")?;
        posted_url
            .query_pairs_mut()
            .append_pair("status", "posted");

        let mut own_url = self.url("loads")?;
        own_url.query_pairs_mut().append_pair("driver_id", driver_id);

        let posted = self.get_loads(posted_url).await?;
        let own = self.get_loads(own_url).await?;
        Ok(merge_posted_and_own(posted, own))
    }

    async fn fetch_company_loads(&self, company_id: &str) -> Result<Vec<Load>, GatewayError> {
        let mut url = self.url("loads")?;
        url.query_pairs_mut()
            .append_pair("company_id", company_id)
            .append_pair("order", "created_at:desc");
        self.get_loads(url).await
    }

    async fn apply_transition(
        &self,
        load_id: &str,
        update: &TransitionUpdate,
    ) -> Result<(), GatewayError> {
        let url = self.url(&format!("loads/{load_id}"))?;
        let body = json!({
            "expected_status": update.expected_status.as_str(),
            "update": TransitionBody {
                status: update.status.as_str(),
                driver_id: update.driver_id.as_deref(),
            },
        });
        let _updated: LoadDto = self.fetch_data(self.http.patch(url).json(&body)).await?;
        Ok(())
    }

    async fn insert_load(
        &self,
        company_id: &str,
        draft: &LoadDraft,
    ) -> Result<String, GatewayError> {
        let url = self.url("loads")?;
        let body = json!({
            "company_id": company_id,
            "pickup_city": draft.pickup_city,
            "pickup_state": draft.pickup_state,
            "drop_city": draft.drop_city,
            "drop_state": draft.drop_state,
            "material": draft.material,
            "weight": draft.weight,
            "truck_type": draft.truck_type.name(),
            "price": draft.price,
            "pickup_date": draft.pickup_date.map(format_date),
        });
        let created: LoadDto = self.fetch_data(self.http.post(url).json(&body)).await?;
        Ok(created.id)
    }

    async fn fetch_driver_profiles(&self) -> Result<Vec<Profile>, GatewayError> {
        let mut url = self.url("profiles")?;
        url.query_pairs_mut().append_pair("role", "driver");
        let rows: Vec<ProfileDto> = self.fetch_data(self.http.get(url)).await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn set_driver_verified(
        &self,
        profile_id: &str,
        verified: bool,
    ) -> Result<(), GatewayError> {
        let url = self.url(&format!("profiles/{profile_id}"))?;
        let _updated: ProfileDto = self
            .fetch_data(self.http.patch(url).json(&json!({ "verified": verified })))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Actor, LoadAction, LoadStatus, Role};

    fn envelope(data: serde_json::Value) -> String {
        serde_json::json!({ "status": "ok", "data": data }).to_string()
    }

    fn load_doc(id: &str, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "company_id": "co-1",
            "driver_id": null,
            "pickup_city": "Pune",
            "pickup_state": "Maharashtra",
            "drop_city": "Nagpur",
            "drop_state": "Maharashtra",
            "material": "Auto parts",
            "weight": 12.0,
            "truck_type": "Container",
            "price": 62000,
            "status": status,
            "created_at": "2026-08-21T06:30:00Z"
        })
    }

    #[tokio::test]
    async fn envelope_error_status_maps_to_remote_with_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Regex("^/loads".into()))
            .with_body(r#"{"status":"error","message":"tenant suspended"}"#)
            .create_async()
            .await;

        let client = DocStoreClient::with_base_url(&format!("{}/", server.url())).unwrap();
        let err = client.fetch_company_loads("co-1").await.unwrap_err();
        match err {
            GatewayError::Remote(message) => assert_eq!(message, "tenant suspended"),
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_409_maps_to_conflict() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("PATCH", "/loads/l1")
            .with_status(409)
            .with_body(r#"{"status":"error","message":"stale status"}"#)
            .create_async()
            .await;

        let client = DocStoreClient::with_base_url(&format!("{}/", server.url())).unwrap();
        let load = Load::from(
            serde_json::from_value::<LoadDto>(load_doc("l1", "posted")).unwrap(),
        );
        let update = crate::domain::plan_transition(
            &load,
            LoadAction::Accept,
            &Actor::new("drv-1", Role::Driver),
        )
        .unwrap();

        let err = client.apply_transition("l1", &update).await.unwrap_err();
        assert!(matches!(err, GatewayError::Conflict));
    }

    #[tokio::test]
    async fn transition_patch_carries_expected_status() {
        let mut server = mockito::Server::new_async().await;
        let patch = server
            .mock("PATCH", "/loads/l1")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "expected_status": "posted",
                "update": { "status": "accepted", "driver_id": "drv-1" },
            })))
            .with_body(envelope(load_doc("l1", "accepted")))
            .create_async()
            .await;

        let client = DocStoreClient::with_base_url(&format!("{}/", server.url())).unwrap();
        let load = Load::from(
            serde_json::from_value::<LoadDto>(load_doc("l1", "posted")).unwrap(),
        );
        let update = crate::domain::plan_transition(
            &load,
            LoadAction::Accept,
            &Actor::new("drv-1", Role::Driver),
        )
        .unwrap();

        client.apply_transition("l1", &update).await.unwrap();
        patch.assert_async().await;
    }

    #[tokio::test]
    async fn watch_delivers_the_first_snapshot_and_stops_on_drop() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Regex("^/loads".into()))
            .with_body(envelope(serde_json::json!([load_doc("l1", "in_transit")])))
            .expect_at_least(1)
            .create_async()
            .await;

        let client = DocStoreClient::with_base_url(&format!("{}/", server.url())).unwrap();
        let mut watch = client.watch_company_loads("co-1");

        let snapshot = watch.changed().await.expect("first snapshot");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].status, LoadStatus::InTransit);

        let handle = watch.handle.abort_handle();
        drop(watch);
        // The abort lands on the next scheduler pass.
        for _ in 0..100 {
            if handle.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn insert_returns_the_new_document_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/loads")
            .with_body(envelope(load_doc("l77", "posted")))
            .create_async()
            .await;

        let client = DocStoreClient::with_base_url(&format!("{}/", server.url())).unwrap();
        let draft = LoadDraft {
            pickup_city: "Pune".to_string(),
            pickup_state: "Maharashtra".to_string(),
            drop_city: "Nagpur".to_string(),
            drop_state: "Maharashtra".to_string(),
            material: "Auto parts".to_string(),
            weight: 12.0,
            truck_type: crate::domain::TruckType::Container,
            price: 62000,
            pickup_date: None,
        };
        let id = client.insert_load("co-1", &draft).await.unwrap();
        assert_eq!(id, "l77");
    }
}
