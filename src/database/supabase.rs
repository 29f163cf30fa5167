//! REST client for the hosted backend.
//!
//! Speaks PostgREST for table access, GoTrue for email/password auth and
//! the storage API for image uploads. Authentication, authorization and
//! storage themselves live in the hosted service; this client only
//! orchestrates the calls.

use chrono::{DateTime, Duration, Utc};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::entity::SortKey;
use super::error::{AuthError, GatewayError};

/// An authenticated admin session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user_email: String,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

pub struct SupabaseClient {
    http: reqwest::Client,
    base: Url,
    anon_key: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    expires_in: i64,
    #[serde(default)]
    user: TokenUser,
}

#[derive(Default, Deserialize)]
struct TokenUser {
    #[serde(default)]
    email: String,
}

#[derive(Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

impl SupabaseClient {
    pub fn new(base: Url, anon_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
            anon_key,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        Ok(self.base.join(path)?)
    }

    /// Standard headers: the public API key plus a bearer token (the
    /// session token when one exists, the API key otherwise).
    fn headers(&self, token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.anon_key) {
            headers.insert("apikey", value);
        }
        let bearer = format!("Bearer {}", token.unwrap_or(&self.anon_key));
        if let Ok(value) = HeaderValue::from_str(&bearer) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    pub async fn select(
        &self,
        token: Option<&str>,
        table: &str,
        order: Option<SortKey>,
        filters: &[(&str, String)],
    ) -> Result<Vec<Value>, GatewayError> {
        let mut url = self.endpoint(&format!("rest/v1/{table}"))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", "*");
            if let Some(key) = order {
                query.append_pair("order", &format!("{}.{}", key.column, key.direction.as_query()));
            }
            for (column, expr) in filters {
                query.append_pair(column, expr);
            }
        }

        let resp = self.http.get(url).headers(self.headers(token)).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Insert-or-replace by primary key.
    pub async fn upsert(
        &self,
        token: Option<&str>,
        table: &str,
        rows: &Value,
    ) -> Result<(), GatewayError> {
        let url = self.endpoint(&format!("rest/v1/{table}"))?;
        let resp = self
            .http
            .post(url)
            .headers(self.headers(token))
            .header("Prefer", "resolution=merge-duplicates")
            .json(rows)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn delete_eq(
        &self,
        token: Option<&str>,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<(), GatewayError> {
        let mut url = self.endpoint(&format!("rest/v1/{table}"))?;
        url.query_pairs_mut().append_pair(column, &format!("eq.{value}"));
        let resp = self
            .http
            .delete(url)
            .headers(self.headers(token))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = self
            .base
            .join("auth/v1/token?grant_type=password")
            .map_err(|err| AuthError::Other(err.to_string()))?;
        let resp = self
            .http
            .post(url)
            .headers(self.headers(None))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|err| AuthError::Other(err.to_string()))?;

        if !resp.status().is_success() {
            let body: AuthErrorBody = resp.json().await.unwrap_or_default();
            let text = body
                .error_description
                .or(body.msg)
                .unwrap_or_else(|| "sign-in rejected".to_string());
            if text.contains("Invalid login credentials") {
                return Err(AuthError::InvalidCredentials);
            }
            return Err(AuthError::Other(text));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|err| AuthError::Other(err.to_string()))?;
        Ok(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
            user_email: token.user.email,
        })
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), GatewayError> {
        let url = self.endpoint("auth/v1/logout")?;
        let resp = self
            .http
            .post(url)
            .headers(self.headers(Some(token)))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Upload an object into the media bucket and return its public URL.
    pub async fn upload(
        &self,
        token: Option<&str>,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, GatewayError> {
        let url = self.endpoint(&format!("storage/v1/object/{bucket}/{path}"))?;
        let mut headers = self.headers(token);
        if let Ok(value) = HeaderValue::from_str(content_type) {
            headers.insert(CONTENT_TYPE, value);
        }
        headers.insert("x-upsert", HeaderValue::from_static("true"));

        let resp = self.http.post(url).headers(headers).body(bytes).send().await?;
        check(resp).await?;

        let public = self.endpoint(&format!("storage/v1/object/public/{bucket}/{path}"))?;
        Ok(public.to_string())
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(GatewayError::Backend {
        status: status.as_u16(),
        body,
    })
}
