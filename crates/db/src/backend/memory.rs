//! In-process backend.
//!
//! Tables are vectors of JSON objects, the bucket is a map of byte blobs and
//! accounts are plain email/password pairs. Access tokens are real HS256
//! JWTs signed with the configured secret, so the API's token checks behave
//! exactly as they do against the hosted backend.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::SecondsFormat;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use sustaineco_core::types::Timestamp;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    AccessClaims, Backend, BackendError, BackendUser, Query, Session, Upload,
    AUTHENTICATED_AUDIENCE,
};

/// Access token lifetime handed out by [`MemoryBackend`].
const ACCESS_TOKEN_SECS: i64 = 3600;

const BASE_URL: &str = "http://memory.backend.local";

/// An object placed in a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A password-reset request the backend would have emailed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetEmail {
    pub email: String,
    pub redirect_to: String,
}

#[derive(Debug, Clone)]
struct MemoryUser {
    id: String,
    email: String,
    password: String,
}

#[derive(Default)]
struct MemoryState {
    tables: HashMap<String, Vec<Map<String, Value>>>,
    next_id: i64,
    last_created: Option<Timestamp>,
    objects: HashMap<(String, String), StoredObject>,
    users: Vec<MemoryUser>,
    /// Refresh token -> user id.
    refresh_tokens: HashMap<String, String>,
    reset_emails: Vec<ResetEmail>,
    failing_tables: HashSet<String>,
}

impl MemoryState {
    /// Strictly increasing `created_at`, so ordering by it is deterministic
    /// even for rows inserted within the same clock tick.
    fn next_created_at(&mut self) -> String {
        let mut now = chrono::Utc::now();
        if let Some(last) = self.last_created {
            if now <= last {
                now = last + chrono::Duration::microseconds(1);
            }
        }
        self.last_created = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn check_table(&self, table: &str) -> Result<(), BackendError> {
        if self.failing_tables.contains(table) {
            return Err(BackendError::Api {
                status: 503,
                body: format!("table {table} is unavailable"),
            });
        }
        Ok(())
    }
}

/// In-memory implementation of [`Backend`].
pub struct MemoryBackend {
    jwt_secret: String,
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Register an account that can sign in with `email` / `password`.
    pub fn with_user(mut self, email: &str, password: &str) -> Self {
        self.state.get_mut().users.push(MemoryUser {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
        self
    }

    /// Make every table call against `table` fail with a 503.
    pub async fn fail_table(&self, table: &str) {
        self.state.lock().await.failing_tables.insert(table.to_string());
    }

    /// Current rows of `table`, in insertion order.
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        let state = self.state.lock().await;
        state
            .tables
            .get(table)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    pub async fn object(&self, bucket: &str, name: &str) -> Option<StoredObject> {
        let state = self.state.lock().await;
        state
            .objects
            .get(&(bucket.to_string(), name.to_string()))
            .cloned()
    }

    pub async fn object_count(&self, bucket: &str) -> usize {
        let state = self.state.lock().await;
        state.objects.keys().filter(|(b, _)| b == bucket).count()
    }

    pub async fn reset_emails(&self) -> Vec<ResetEmail> {
        self.state.lock().await.reset_emails.clone()
    }

    /// Access token of the session a reset link would open for `email`.
    pub async fn recovery_token(&self, email: &str) -> Option<String> {
        let mut state = self.state.lock().await;
        let user = find_user_by_email(&state, email)?.clone();
        self.issue_session(&mut state, &user)
            .ok()
            .map(|session| session.access_token)
    }

    // ---- private helpers ----

    fn issue_session(
        &self,
        state: &mut MemoryState,
        user: &MemoryUser,
    ) -> Result<Session, BackendError> {
        let now = chrono::Utc::now().timestamp();
        let claims = AccessClaims {
            sub: user.id.clone(),
            email: Some(user.email.clone()),
            role: AUTHENTICATED_AUDIENCE.to_string(),
            aud: AUTHENTICATED_AUDIENCE.to_string(),
            exp: now + ACCESS_TOKEN_SECS,
            iat: now,
            session_id: Some(Uuid::new_v4().to_string()),
        };
        let access_token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| BackendError::Api {
            status: 500,
            body: e.to_string(),
        })?;

        let refresh_token = Uuid::new_v4().to_string();
        state
            .refresh_tokens
            .insert(refresh_token.clone(), user.id.clone());

        Ok(Session {
            access_token,
            refresh_token,
            expires_in: ACCESS_TOKEN_SECS,
            user: BackendUser {
                id: user.id.clone(),
                email: Some(user.email.clone()),
            },
        })
    }

    fn decode_token(&self, token: &str) -> Result<AccessClaims, BackendError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
        decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| BackendError::Unauthorized)
    }

    /// A supplied token must be valid; an absent one means public access.
    fn check_bearer(&self, bearer: Option<&str>) -> Result<(), BackendError> {
        match bearer {
            Some(token) => self.decode_token(token).map(|_| ()),
            None => Ok(()),
        }
    }
}

fn find_user_by_email<'a>(state: &'a MemoryState, email: &str) -> Option<&'a MemoryUser> {
    state
        .users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(email))
}

/// Render a cell the way an equality filter spells it.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches(row: &Map<String, Value>, query: &Query) -> bool {
    query
        .filters
        .iter()
        .all(|(column, value)| row.get(column).map(render).as_deref() == Some(value.as_str()))
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(x), Some(y)) => render(x).cmp(&render(y)),
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn health(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn select(
        &self,
        table: &str,
        query: &Query,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError> {
        self.check_bearer(bearer)?;
        let state = self.state.lock().await;
        state.check_table(table)?;

        let mut rows: Vec<&Map<String, Value>> = state
            .tables
            .get(table)
            .map(|rows| rows.iter().filter(|row| matches(row, query)).collect())
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare_cells(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(rows
            .into_iter()
            .take(limit)
            .cloned()
            .map(Value::Object)
            .collect())
    }

    async fn insert(
        &self,
        table: &str,
        row: Value,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError> {
        self.check_bearer(bearer)?;
        let mut state = self.state.lock().await;
        state.check_table(table)?;

        let Value::Object(mut row) = row else {
            return Err(BackendError::Api {
                status: 400,
                body: "row must be a JSON object".into(),
            });
        };

        if !row.contains_key("id") {
            state.next_id += 1;
            row.insert("id".into(), Value::from(state.next_id));
        }
        if !row.contains_key("created_at") {
            let created_at = state.next_created_at();
            row.insert("created_at".into(), Value::String(created_at));
        }

        state
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(vec![Value::Object(row)])
    }

    async fn update(
        &self,
        table: &str,
        query: &Query,
        patch: Value,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError> {
        self.check_bearer(bearer)?;
        let mut state = self.state.lock().await;
        state.check_table(table)?;

        let Value::Object(patch) = patch else {
            return Err(BackendError::Api {
                status: 400,
                body: "patch must be a JSON object".into(),
            });
        };

        let mut updated = Vec::new();
        if let Some(rows) = state.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches(row, query)) {
                for (column, value) in &patch {
                    row.insert(column.clone(), value.clone());
                }
                updated.push(Value::Object(row.clone()));
            }
        }
        Ok(updated)
    }

    async fn delete(
        &self,
        table: &str,
        query: &Query,
        bearer: Option<&str>,
    ) -> Result<Vec<Value>, BackendError> {
        self.check_bearer(bearer)?;
        let mut state = self.state.lock().await;
        state.check_table(table)?;

        let mut removed = Vec::new();
        if let Some(rows) = state.tables.get_mut(table) {
            rows.retain(|row| {
                if matches(row, query) {
                    removed.push(Value::Object(row.clone()));
                    false
                } else {
                    true
                }
            });
        }
        Ok(removed)
    }

    async fn upload(&self, upload: Upload, bearer: Option<&str>) -> Result<(), BackendError> {
        self.check_bearer(bearer)?;
        let mut state = self.state.lock().await;
        let key = (upload.bucket, upload.name);
        if !upload.upsert && state.objects.contains_key(&key) {
            return Err(BackendError::Api {
                status: 409,
                body: "The resource already exists".into(),
            });
        }
        state.objects.insert(
            key,
            StoredObject {
                content_type: upload.content_type,
                bytes: upload.bytes,
            },
        );
        Ok(())
    }

    async fn remove(
        &self,
        bucket: &str,
        names: &[String],
        bearer: Option<&str>,
    ) -> Result<(), BackendError> {
        self.check_bearer(bearer)?;
        let mut state = self.state.lock().await;
        for name in names {
            state.objects.remove(&(bucket.to_string(), name.clone()));
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        format!("{BASE_URL}/storage/v1/object/public/{bucket}/{name}")
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let mut state = self.state.lock().await;
        let user = find_user_by_email(&state, email)
            .filter(|u| u.password == password)
            .cloned()
            .ok_or(BackendError::InvalidCredentials)?;
        self.issue_session(&mut state, &user)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        let mut state = self.state.lock().await;
        let user_id = state
            .refresh_tokens
            .remove(refresh_token)
            .ok_or(BackendError::InvalidCredentials)?;
        let user = state
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or(BackendError::InvalidCredentials)?;
        self.issue_session(&mut state, &user)
    }

    async fn get_user(&self, bearer: &str) -> Result<BackendUser, BackendError> {
        let claims = self.decode_token(bearer)?;
        let state = self.state.lock().await;
        state
            .users
            .iter()
            .find(|u| u.id == claims.sub)
            .map(|u| BackendUser {
                id: u.id.clone(),
                email: Some(u.email.clone()),
            })
            .ok_or(BackendError::Unauthorized)
    }

    async fn update_password(
        &self,
        bearer: &str,
        new_password: &str,
    ) -> Result<BackendUser, BackendError> {
        let claims = self.decode_token(bearer)?;
        let mut state = self.state.lock().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == claims.sub)
            .ok_or(BackendError::Unauthorized)?;
        user.password = new_password.to_string();
        Ok(BackendUser {
            id: user.id.clone(),
            email: Some(user.email.clone()),
        })
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), BackendError> {
        // Unknown addresses are accepted silently, as the hosted backend does.
        self.state.lock().await.reset_emails.push(ResetEmail {
            email: email.to_string(),
            redirect_to: redirect_to.to_string(),
        });
        Ok(())
    }

    async fn sign_out(&self, bearer: &str) -> Result<(), BackendError> {
        let claims = self.decode_token(bearer)?;
        let mut state = self.state.lock().await;
        state
            .refresh_tokens
            .retain(|_, user_id| *user_id != claims.sub);
        Ok(())
    }
}
