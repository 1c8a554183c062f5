use anyhow::{Context, Result, bail};
use reqwest::blocking::{Client, Response};
use serde_json::Value;

use super::graph::EntityGraph;
use super::parse::parse_related_response;

pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: Client::new(),
        }
    }

    /// The two-step lookup: resolve the named entity, then feed the payload
    /// back to the backend to collect related entities. Either failure aborts
    /// the chain.
    pub fn fetch_entity_graph(&self, name: &str) -> Result<EntityGraph> {
        let entity = self.fetch_entity(name)?;
        let related = self.fetch_related(&entity)?;
        parse_related_response(related)
    }

    /// Entity payloads are opaque to this client; the response is forwarded
    /// verbatim as the body of the related-entities request.
    pub fn fetch_entity(&self, name: &str) -> Result<Value> {
        let url = format!("{}/api/entity/{name}", self.base_url);
        log::info!("fetching entity from {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("failed to reach entity endpoint at {url}"))?;
        Self::json_body(response, &url)
    }

    pub fn fetch_related(&self, entity: &Value) -> Result<Value> {
        let url = format!("{}/api/fetch-related-entities", self.base_url);
        log::info!("fetching related entities from {url}");
        let response = self
            .http
            .post(&url)
            .json(entity)
            .send()
            .with_context(|| format!("failed to reach related-entities endpoint at {url}"))?;
        Self::json_body(response, &url)
    }

    fn json_body(response: Response, url: &str) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            log::warn!("{url} answered {status}");
            bail!("{url} answered HTTP {status}");
        }

        response
            .json()
            .with_context(|| format!("invalid JSON from {url}"))
    }
}
