//! Row-store backend: a thin client for a PostgREST-style API.
//!
//! Pull-only. Equality filters and ordering ride in the query string;
//! transition writes are PATCHes filtered on both the id and the expected
//! prior status, so a concurrent writer makes the PATCH match zero rows
//! and the caller sees `Conflict` instead of silently stomping the load.

use reqwest::{Client, Url};
use serde_json::json;

use async_trait::async_trait;

use crate::domain::{merge_posted_and_own, Load, Profile, TransitionUpdate};
use crate::infra::gateway::{GatewayError, LoadDraft, LoadGateway};
use crate::infra::wire::{format_date, LoadDto, ProfileDto, TransitionBody};

const DEFAULT_BASE_URL: &str = "http://localhost:54321/rest/v1/";
const USER_AGENT: &str = "loadlink/0.1.0";

#[derive(Clone)]
pub struct RowStoreClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl RowStoreClient {
    pub fn new() -> Result<Self, GatewayError> {
        let base = std::env::var("LOADLINK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::with_base_url(&base)
    }

    pub fn with_base_url(base: &str) -> Result<Self, GatewayError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            api_key: std::env::var("LOADLINK_API_KEY").ok(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder
                .header("apikey", key)
                .bearer_auth(key),
            None => builder,
        }
    }

    async fn get_loads(&self, url: Url) -> Result<Vec<Load>, GatewayError> {
        let response = self.request(self.http.get(url)).send().await?;
        let rows: Vec<LoadDto> = decode(response).await?;
        Ok(rows.into_iter().map(Load::from).collect())
    }
}

#[async_trait]
impl LoadGateway for RowStoreClient {
    async fn fetch_posted_and_own(&self, driver_id: &str) -> Result<Vec<Load>, GatewayError> {
        let mut posted_url = self.url("loads")?;
        posted_url
            .query_pairs_mut()
            .append_pair("status", "eq.posted")
            .append_pair("select", "*");

        let mut own_url = self.url("loads")?;
        own_url
            .query_pairs_mut()
            .append_pair("driver_id", &format!("eq.{driver_id}"))
            .append_pair("select", "*");

        let posted = self.get_loads(posted_url).await?;
        let own = self.get_loads(own_url).await?;
        Ok(merge_posted_and_own(posted, own))
    }

    async fn fetch_company_loads(&self, company_id: &str) -> Result<Vec<Load>, GatewayError> {
        let mut url = self.url("loads")?;
        url.query_pairs_mut()
            .append_pair("company_id", &format!("eq.{company_id}"))
            .append_pair("order", "created_at.desc")
            .append_pair("select", "*");
        self.get_loads(url).await
    }

    async fn apply_transition(
        &self,
        load_id: &str,
        update: &TransitionUpdate,
    ) -> Result<(), GatewayError> {
        let mut url = self.url("loads")?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{load_id}"))
            // Conditional update: only a row still in the expected status
            // matches, which settles concurrent accepts.
            .append_pair("status", &format!("eq.{}", update.expected_status.as_str()));

        let body = TransitionBody {
            status: update.status.as_str(),
            driver_id: update.driver_id.as_deref(),
        };
        let response = self
            .request(self.http.patch(url))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;
        let updated: Vec<LoadDto> = decode(response).await?;
        if updated.is_empty() {
            return Err(GatewayError::Conflict);
        }
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
            "driver_id": null,
            "pickup_city": draft.pickup_city,
            "pickup_state": draft.pickup_state,
            "drop_city": draft.drop_city,
            "drop_state": draft.drop_state,
            "material": draft.material,
            "weight": draft.weight,
            "truck_type": draft.truck_type.name(),
            "price": draft.price,
            "pickup_date": draft.pickup_date.map(format_date),
            "status": "posted",
        });
        let response = self
            .request(self.http.post(url))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;
        let mut rows: Vec<LoadDto> = decode(response).await?;
        match rows.pop() {
            Some(row) => Ok(row.id),
            None => Err(GatewayError::Remote(
                "insert returned no representation".to_string(),
            )),
        }
    }

    async fn fetch_driver_profiles(&self) -> Result<Vec<Profile>, GatewayError> {
        let mut url = self.url("profiles")?;
        url.query_pairs_mut()
            .append_pair("role", "eq.driver")
            .append_pair("order", "created_at.desc")
            .append_pair("select", "*");
        let response = self.request(self.http.get(url)).send().await?;
        let rows: Vec<ProfileDto> = decode(response).await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn set_driver_verified(
        &self,
        profile_id: &str,
        verified: bool,
    ) -> Result<(), GatewayError> {
        let mut url = self.url("profiles")?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{profile_id}"));
        let response = self
            .request(self.http.patch(url))
            .json(&json!({ "verified": verified }))
            .send()
            .await?;
        check_status(&response)?;
        Ok(())
    }
}

/// Map the HTTP layer into the gateway taxonomy, keeping the backend's
/// own message verbatim where there is one.
async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GatewayError> {
    check_status(&response)?;
    if response.status().is_success() {
        return Ok(response.json::<T>().await?);
    }
    Err(remote_error(response).await)
}

fn check_status(response: &reqwest::Response) -> Result<(), GatewayError> {
    if response.status() == reqwest::StatusCode::UNAUTHORIZED {
        return Err(GatewayError::Unauthenticated);
    }
    Ok(())
}

async fn remote_error(response: reqwest::Response) -> GatewayError {
    let status = response.status();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(|msg| msg.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("request failed with status {status}"));
    GatewayError::Remote(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Actor, LoadAction, LoadStatus, Role};

    fn posted_row(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "company_id": "co-1",
            "driver_id": null,
            "pickup_city": "Jaipur",
            "pickup_state": "Rajasthan",
            "drop_city": "Delhi",
            "drop_state": "Delhi",
            "material": "Marble slabs",
            "weight": 20.0,
            "truck_type": "Trailer",
            "price": 85000,
            "status": "posted",
            "created_at": "2026-08-20T08:00:00Z"
        })
    }

    #[tokio::test]
    async fn driver_fetch_unions_and_dedups_with_own_loads_winning() {
        let mut server = mockito::Server::new_async().await;

        let posted = server
            .mock("GET", "/loads")
            .match_query(mockito::Matcher::UrlEncoded(
                "status".into(),
                "eq.posted".into(),
            ))
            .with_body(serde_json::json!([posted_row("l1"), posted_row("l2")]).to_string())
            .create_async()
            .await;

        let mut own_row = posted_row("l1");
        own_row["status"] = "accepted".into();
        own_row["driver_id"] = "drv-a".into();
        let own = server
            .mock("GET", "/loads")
            .match_query(mockito::Matcher::UrlEncoded(
                "driver_id".into(),
                "eq.drv-a".into(),
            ))
            .with_body(serde_json::json!([own_row]).to_string())
            .create_async()
            .await;

        let client = RowStoreClient::with_base_url(&format!("{}/", server.url())).unwrap();
        let loads = client.fetch_posted_and_own("drv-a").await.unwrap();

        posted.assert_async().await;
        own.assert_async().await;

        assert_eq!(loads.len(), 2);
        let winner = loads.iter().find(|l| l.id == "l1").unwrap();
        assert_eq!(winner.status, LoadStatus::Accepted);
        assert_eq!(winner.driver_id.as_deref(), Some("drv-a"));
    }

    #[tokio::test]
    async fn lost_accept_race_surfaces_as_conflict() {
        let mut server = mockito::Server::new_async().await;

        // The CAS filter matches no rows: someone else accepted first.
        let patch = server
            .mock("PATCH", "/loads")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("id".into(), "eq.l1".into()),
                mockito::Matcher::UrlEncoded("status".into(), "eq.posted".into()),
            ]))
            .with_body("[]")
            .create_async()
            .await;

        let client = RowStoreClient::with_base_url(&format!("{}/", server.url())).unwrap();
        let load = Load::from(
            serde_json::from_value::<LoadDto>(posted_row("l1")).unwrap(),
        );
        let update = crate::domain::plan_transition(
            &load,
            LoadAction::Accept,
            &Actor::new("drv-b", Role::Driver),
        )
        .unwrap();

        let err = client.apply_transition("l1", &update).await.unwrap_err();
        patch.assert_async().await;
        assert!(matches!(err, GatewayError::Conflict));
    }

    #[tokio::test]
    async fn backend_rejection_is_surfaced_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Regex("^/loads".into()))
            .with_status(400)
            .with_body(r#"{"message":"column loads.steering does not exist"}"#)
            .create_async()
            .await;

        let client = RowStoreClient::with_base_url(&format!("{}/", server.url())).unwrap();
        let err = client.fetch_company_loads("co-1").await.unwrap_err();
        match err {
            GatewayError::Remote(message) => {
                assert_eq!(message, "column loads.steering does not exist")
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_maps_to_unauthenticated() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Regex("^/loads".into()))
            .with_status(401)
            .create_async()
            .await;

        let client = RowStoreClient::with_base_url(&format!("{}/", server.url())).unwrap();
        let err = client.fetch_company_loads("co-1").await.unwrap_err();
        assert!(matches!(err, GatewayError::Unauthenticated));
    }

    #[tokio::test]
    async fn insert_returns_the_store_assigned_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/loads")
            .with_body(serde_json::json!([posted_row("l9")]).to_string())
            .create_async()
            .await;

        let client = RowStoreClient::with_base_url(&format!("{}/", server.url())).unwrap();
        let draft = LoadDraft {
            pickup_city: "Jaipur".to_string(),
            pickup_state: "Rajasthan".to_string(),
            drop_city: "Delhi".to_string(),
            drop_state: "Delhi".to_string(),
            material: "Marble slabs".to_string(),
            weight: 20.0,
            truck_type: crate::domain::TruckType::Trailer,
            price: 85000,
            pickup_date: None,
        };
        let id = client.insert_load("co-1", &draft).await.unwrap();
        assert_eq!(id, "l9");
    }
}
