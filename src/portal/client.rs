//! Portal transport and batch dispatch.
//!
//! The portal performs no authentication and publishes no rate limits; the
//! client batches independent requests concurrently and treats any single
//! failure as fatal for the batch. A [`Fetch`] trait seam keeps the pipeline
//! testable against fixture documents.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::requests::{CaseQuery, RoomQuery};
use crate::config::PortalSettings;
use crate::error::PipelineError;

pub const USER_AGENT: &str = "tablero/0.4 (weekly docket acquisition)";

/// Transport seam for the two portal endpoints.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// POST a room-assignment query, returning the raw HTML body.
    async fn room_table(&self, query: &RoomQuery) -> Result<String, PipelineError>;

    /// POST a case query, returning the raw HTML body.
    async fn case_table(&self, query: &CaseQuery) -> Result<String, PipelineError>;
}

/// HTTP client for the judicial portal.
#[derive(Clone)]
pub struct PortalClient {
    client: Client,
    room_url: Url,
    case_url: Url,
    request_delay: Duration,
}

impl PortalClient {
    /// Create a client from portal settings.
    pub fn new(settings: &PortalSettings) -> Result<Self, PipelineError> {
        let base = Url::parse(&settings.base_url).map_err(|e| {
            PipelineError::Validation(format!(
                "invalid portal base url '{}': {}",
                settings.base_url, e
            ))
        })?;
        let join = |path: &str| {
            base.join(path).map_err(|e| {
                PipelineError::Validation(format!("invalid portal path '{}': {}", path, e))
            })
        };
        let room_url = join(&settings.room_assignment_path)?;
        let case_url = join(&settings.case_path)?;

        let client = Client::builder()
            .user_agent(settings.user_agent.as_deref().unwrap_or(USER_AGENT))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .gzip(true)
            .brotli(true)
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            room_url,
            case_url,
            request_delay: Duration::from_millis(settings.request_delay_ms),
        })
    }

    async fn post_form<T: Serialize + ?Sized>(
        &self,
        url: &Url,
        form: &T,
    ) -> Result<String, PipelineError> {
        let fetch_err = |source| PipelineError::Fetch {
            endpoint: url.to_string(),
            source,
        };

        debug!(endpoint = %url, "posting form request");
        let response = self
            .client
            .post(url.clone())
            .form(form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;
        let body = response.text().await.map_err(fetch_err)?;

        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
        Ok(body)
    }
}

#[async_trait]
impl Fetch for PortalClient {
    async fn room_table(&self, query: &RoomQuery) -> Result<String, PipelineError> {
        self.post_form(&self.room_url, query).await
    }

    async fn case_table(&self, query: &CaseQuery) -> Result<String, PipelineError> {
        self.post_form(&self.case_url, query).await
    }
}

/// Fetch a flat batch of room queries concurrently, bodies in query order.
pub async fn dispatch_room_batch(
    fetch: &dyn Fetch,
    queries: &[RoomQuery],
) -> Result<Vec<String>, PipelineError> {
    try_join_all(queries.iter().map(|query| fetch.room_table(query))).await
}

/// Fetch grouped case queries: each inner group is one concurrent batch,
/// groups run sequentially. The response shape mirrors the request shape.
pub async fn dispatch_case_batches(
    fetch: &dyn Fetch,
    groups: &[Vec<CaseQuery>],
) -> Result<Vec<Vec<String>>, PipelineError> {
    let mut bodies = Vec::with_capacity(groups.len());
    for group in groups {
        bodies.push(try_join_all(group.iter().map(|query| fetch.case_table(query))).await?);
    }
    Ok(bodies)
}
