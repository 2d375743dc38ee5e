//! HTTP client for the remote DealFlow backend.
//!
//! The backend is a black box reached over HTTP+JSON; this module only
//! mirrors the endpoints the dashboard consumes. Every authenticated call
//! carries the bearer token from the `SessionContext` handed in at
//! construction time.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::fmt;

use crate::models::{
    Activity, AuthResponse, Credentials, Deal, DealInsights, DealListResponse, DealPatch, NewDeal,
    NewActivity, Registration, Stage,
};
use crate::session::SessionContext;

#[derive(Debug)]
pub enum ApiError {
    Transport(reqwest::Error),
    Status { status: StatusCode, body: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "backend unreachable: {err}"),
            ApiError::Status { status, body } => {
                write!(f, "backend returned {status}: {body}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}

/// Unauthenticated account creation; the backend responds with the same
/// shape as a login, so a fresh registration yields a usable session.
pub async fn register(
    http: &Client,
    base_url: &str,
    registration: &Registration,
) -> Result<AuthResponse, ApiError> {
    let response = http
        .post(format!("{base_url}/api/auth/register"))
        .json(registration)
        .send()
        .await?;
    into_json(response).await
}

/// Unauthenticated login round-trip, used at startup before any
/// `ApiClient` exists.
pub async fn login(
    http: &Client,
    base_url: &str,
    credentials: &Credentials,
) -> Result<AuthResponse, ApiError> {
    let response = http
        .post(format!("{base_url}/api/auth/login"))
        .json(credentials)
        .send()
        .await?;
    into_json(response).await
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(http: Client, base_url: impl Into<String>, session: SessionContext) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn list_deals(&self, stage: Option<Stage>) -> Result<DealListResponse, ApiError> {
        let mut request = self.get("/api/deals");
        if let Some(stage) = stage {
            request = request.query(&[("stage", stage.as_str())]);
        }
        into_json(request.send().await?).await
    }

    pub async fn get_deal(&self, id: i64) -> Result<Deal, ApiError> {
        into_json(self.get(&format!("/api/deals/{id}")).send().await?).await
    }

    pub async fn create_deal(&self, deal: &NewDeal) -> Result<Deal, ApiError> {
        let response = self
            .authorized(self.http.post(self.url("/api/deals")))
            .json(deal)
            .send()
            .await?;
        into_json(response).await
    }

    pub async fn update_deal(&self, id: i64, patch: &DealPatch) -> Result<Deal, ApiError> {
        let response = self
            .authorized(self.http.patch(self.url(&format!("/api/deals/{id}"))))
            .json(patch)
            .send()
            .await?;
        into_json(response).await
    }

    pub async fn delete_deal(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .authorized(self.http.delete(self.url(&format!("/api/deals/{id}"))))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn list_activities(&self, deal_id: i64) -> Result<Vec<Activity>, ApiError> {
        into_json(
            self.get(&format!("/api/activities/deal/{deal_id}"))
                .send()
                .await?,
        )
        .await
    }

    pub async fn create_activity(&self, activity: &NewActivity) -> Result<Activity, ApiError> {
        let response = self
            .authorized(self.http.post(self.url("/api/activities")))
            .json(activity)
            .send()
            .await?;
        into_json(response).await
    }

    pub async fn fetch_insights(&self) -> Result<DealInsights, ApiError> {
        into_json(self.get("/api/deals/insights").send().await?).await
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.get(self.url(path)))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(reqwest::header::AUTHORIZATION, self.session.bearer())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

async fn into_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    Ok(check(response).await?.json().await?)
}
