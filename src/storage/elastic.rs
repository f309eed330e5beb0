// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Elasticsearch-backed credential store.
//!
//! ## Requests
//!
//! | Operation | Request |
//! |-----------|---------|
//! | lookup | `POST /{index}/_search` with a `term` query on `username` |
//! | insert | `PUT /{index}/_create/{username}?refresh=wait_for` |
//! | index bootstrap | `PUT /{index}` with an explicit keyword mapping |
//! | health | `GET /_cluster/health` |
//!
//! `_create` fails with HTTP 409 when the document id is taken, which makes
//! the username uniqueness check atomic at the cluster. `refresh=wait_for`
//! blocks the insert until the document is searchable, so a login issued
//! right after signup sees the new account.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use super::{CredentialStore, StoreError, StoreResult};
use crate::models::User;

/// Default index (and former document type) holding credential records.
pub const DEFAULT_INDEX: &str = "user";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the cluster.
#[derive(Debug, Clone)]
pub struct ElasticConfig {
    /// Cluster base URL, e.g. `http://localhost:9200`
    pub url: Url,
    /// Index holding credential records
    pub index: String,
    /// Optional basic-auth user
    pub username: Option<String>,
    /// Optional basic-auth password
    pub password: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ElasticConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            index: DEFAULT_INDEX.to_string(),
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    total: TotalHits,
    #[serde(default)]
    hits: Vec<SearchHit>,
}

/// `hits.total` is a bare number before Elasticsearch 7 and an object after.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TotalHits {
    Count(u64),
    Object { value: u64 },
}

impl TotalHits {
    fn value(&self) -> u64 {
        match self {
            TotalHits::Count(n) => *n,
            TotalHits::Object { value } => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(rename = "_source")]
    source: Value,
}

#[derive(Debug, Deserialize)]
struct ClusterHealth {
    status: String,
}

/// Credential store over the Elasticsearch REST API.
#[derive(Debug, Clone)]
pub struct ElasticStore {
    config: ElasticConfig,
    http: Client,
}

impl ElasticStore {
    pub fn new(config: ElasticConfig) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    /// Create the credential index with an exact-match mapping.
    ///
    /// Returns `true` when the index was created and `false` when it already
    /// existed.
    pub async fn ensure_index(&self) -> StoreResult<bool> {
        let url = self.endpoint(&[&self.config.index])?;
        let body = json!({
            "mappings": {
                "properties": {
                    "username": { "type": "keyword" },
                    "password": { "type": "keyword", "index": false },
                    "age": { "type": "long" },
                    "gender": { "type": "keyword" }
                }
            }
        });

        let response = self.send(self.request(Method::PUT, url).json(&body)).await?;
        let status = response.status();

        if status.is_success() {
            tracing::info!(index = %self.config.index, "Created credential index");
            return Ok(true);
        }

        let body = read_json(response).await.unwrap_or(Value::Null);
        if status == StatusCode::BAD_REQUEST
            && error_type(&body) == Some("resource_already_exists_exception")
        {
            tracing::debug!(index = %self.config.index, "Credential index already exists");
            return Ok(false);
        }

        Err(StoreError::Unavailable(format!(
            "HTTP {status} creating index {}: {body}",
            self.config.index
        )))
    }

    /// Run the exact-match username query.
    ///
    /// A missing index means nobody has registered yet and yields no hits.
    async fn search(&self, username: &str, size: Option<u32>) -> StoreResult<SearchHits> {
        let url = self.endpoint(&[&self.config.index, "_search"])?;
        let mut body = json!({
            "query": { "term": { "username": username } }
        });
        if let Some(size) = size {
            body["size"] = json!(size);
        }

        let response = self.send(self.request(Method::POST, url).json(&body)).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text).unwrap_or(Value::Null);
            if error_type(&body) != Some("index_not_found_exception") {
                return Err(StoreError::Unavailable(format!(
                    "HTTP {status} from search: {text}"
                )));
            }

            tracing::debug!(
                index = %self.config.index,
                "Credential index missing, treating as empty"
            );
            return Ok(SearchHits {
                total: TotalHits::Count(0),
                hits: Vec::new(),
            });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Unavailable(format!(
                "HTTP {status} from search: {text}"
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        Ok(parsed.hits)
    }

    fn endpoint(&self, segments: &[&str]) -> StoreResult<Url> {
        let mut url = self.config.url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                StoreError::Unavailable(format!("{} cannot be used as a base URL", self.config.url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.config.username {
            Some(user) => builder.basic_auth(user, self.config.password.as_deref()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> StoreResult<Response> {
        builder
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl CredentialStore for ElasticStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Vec<User>> {
        let hits = self.search(username, None).await?;

        let mut users = Vec::with_capacity(hits.hits.len());
        for hit in hits.hits {
            match serde_json::from_value::<User>(hit.source) {
                Ok(user) => users.push(user),
                Err(e) => {
                    tracing::warn!(
                        document_id = %hit.id,
                        error = %e,
                        "Skipping unreadable credential document"
                    );
                }
            }
        }

        Ok(users)
    }

    async fn exists_by_username(&self, username: &str) -> StoreResult<bool> {
        let hits = self.search(username, Some(0)).await?;
        Ok(hits.total.value() > 0)
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut url = self.endpoint(&[&self.config.index, "_create", &user.username])?;
        url.query_pairs_mut().append_pair("refresh", "wait_for");

        let response = self.send(self.request(Method::PUT, url).json(user)).await?;
        let status = response.status();

        if status == StatusCode::CONFLICT {
            return Err(StoreError::AlreadyExists(format!("User {}", user.username)));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Unavailable(format!(
                "HTTP {status} from create: {text}"
            )));
        }

        tracing::debug!(
            username = %user.username,
            index = %self.config.index,
            "Indexed credential record"
        );
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        let url = self.endpoint(&["_cluster", "health"])?;
        let response = self.send(self.request(Method::GET, url)).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(StoreError::Unavailable(format!(
                "HTTP {status} from cluster health"
            )));
        }

        let health: ClusterHealth = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        if health.status == "red" {
            return Err(StoreError::Unavailable("cluster status is red".to_string()));
        }

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "elasticsearch"
    }
}

async fn read_json(response: Response) -> StoreResult<Value> {
    response
        .json()
        .await
        .map_err(|e| StoreError::InvalidResponse(e.to_string()))
}

fn error_type(body: &Value) -> Option<&str> {
    body.pointer("/error/type").and_then(Value::as_str)
}
