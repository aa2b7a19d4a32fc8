//! REST client for the hosted backend.
//!
//! Wraps the table API (`/rest/v1`), the storage API (`/storage/v1`) and the
//! auth API (`/auth/v1`) using [`reqwest`]. One request per call; nothing is
//! retried.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use sustaineco_core::media::IMAGE_CACHE_SECS;

use super::{Backend, BackendConfig, BackendError, BackendUser, Query, Session, Upload};

/// HTTP implementation of [`Backend`].
pub struct HttpBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Reuse an existing [`reqwest::Client`] (and its connection pool).
    pub fn with_client(client: reqwest::Client, config: BackendConfig) -> Self {
        Self { client, config }
    }

    // ---- URL helpers ----

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.url)
    }

    fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{path}", self.config.url)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.url)
    }

    /// Attach the API key and the caller's token (or the API key again when
    /// the caller is anonymous).
    fn authorize(&self, builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer.unwrap_or(&self.config.anon_key))
    }

    /// Render a [`Query`] as table API query-string pairs.
    fn query_pairs(query: &Query, with_select: bool) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if with_select {
            pairs.push(("select".to_string(), "*".to_string()));
        }
        for (column, value) in &query.filters {
            pairs.push((column.clone(), format!("eq.{value}")));
        }
        if let Some(order) = &query.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{}.{direction}", order.column)));
        }
        if let Some(limit) = query.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. A 401 becomes
    /// [`BackendError::Unauthorized`]; any other failure carries the status
    /// and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized);
        }
        if !status.is_success() {
            let url = response.url().path().to_string();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), %url, "Backend request failed");
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), BackendError> {
        Self::ensure_success(response).await.map(|_| ())
    }

    /// Token grants answer bad credentials with 400; everything else goes
    /// through the usual status check.
    async fn token_grant(&self, grant_type: &str, body: Value) -> Result<Session, BackendError> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::BAD_REQUEST {
            return Err(BackendError::InvalidCredentials);
        }
        Self::parse_response(response).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn health(&self) -> Result<(), BackendError> {
        let response = self
            .client
            .get(self.auth_url("health"))
            .header("apikey", &self.config.anon_key)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn select(
        &self,
        table: &str,
        query: &Query,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError> {
        let request = self
            .client
            .get(self.rest_url(table))
            .query(&Self::query_pairs(query, true));
        let response = self.authorize(request, bearer).send().await?;
        Self::parse_response(response).await
    }

    async fn insert(
        &self,
        table: &str,
        row: Value,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError> {
        let request = self
            .client
            .post(self.rest_url(table))
            .header("Prefer", "return=representation")
            .json(&[row]);
        let response = self.authorize(request, bearer).send().await?;
        Self::parse_response(response).await
    }

    async fn update(
        &self,
        table: &str,
        query: &Query,
        patch: Value,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError> {
        let request = self
            .client
            .patch(self.rest_url(table))
            .query(&Self::query_pairs(query, false))
            .header("Prefer", "return=representation")
            .json(&patch);
        let response = self.authorize(request, bearer).send().await?;
        Self::parse_response(response).await
    }

    async fn delete(
        &self,
        table: &str,
        query: &Query,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError> {
        let request = self
            .client
            .delete(self.rest_url(table))
            .query(&Self::query_pairs(query, false))
            .header("Prefer", "return=representation");
        let response = self.authorize(request, bearer).send().await?;
        Self::parse_response(response).await
    }

    async fn upload(&self, upload: Upload, bearer: Option<&str>) -> Result<(), BackendError> {
        let request = self
            .client
            .post(self.storage_url(&format!("object/{}/{}", upload.bucket, upload.name)))
            .header(CONTENT_TYPE, upload.content_type)
            .header(CACHE_CONTROL, format!("max-age={IMAGE_CACHE_SECS}"))
            .header("x-upsert", upload.upsert.to_string())
            .body(upload.bytes);
        let response = self.authorize(request, bearer).send().await?;
        Self::check_status(response).await
    }

    async fn remove(
        &self,
        bucket: &str,
        names: &[String],
        bearer: Option<&str>,
    ) -> Result<(), BackendError> {
        let request = self
            .client
            .delete(self.storage_url(&format!("object/{bucket}")))
            .json(&json!({ "prefixes": names }));
        let response = self.authorize(request, bearer).send().await?;
        Self::check_status(response).await
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        self.storage_url(&format!("object/public/{bucket}/{name}"))
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        self.token_grant("password", json!({ "email": email, "password": password }))
            .await
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        self.token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn get_user(&self, bearer: &str) -> Result<BackendUser, BackendError> {
        let request = self.client.get(self.auth_url("user"));
        let response = self.authorize(request, Some(bearer)).send().await?;
        Self::parse_response(response).await
    }

    async fn update_password(
        &self,
        bearer: &str,
        new_password: &str,
    ) -> Result<BackendUser, BackendError> {
        let request = self
            .client
            .put(self.auth_url("user"))
            .json(&json!({ "password": new_password }));
        let response = self.authorize(request, Some(bearer)).send().await?;
        Self::parse_response(response).await
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.auth_url("recover"))
            .query(&[("redirect_to", redirect_to)])
            .header("apikey", &self.config.anon_key)
            .json(&json!({ "email": email }))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn sign_out(&self, bearer: &str) -> Result<(), BackendError> {
        let request = self.client.post(self.auth_url("logout"));
        let response = self.authorize(request, Some(bearer)).send().await?;
        Self::check_status(response).await
    }
}
