//! Cached, sanitized recommendations.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sha2::{Digest, Sha256};

use crate::config::Config;

use super::client::{CompletionService, DisabledCompletion, GeminiClient};
use super::models::RecommendationRequest;
use super::{prompt, sanitize, RecommendationError};

/// Compute SHA256 hash of input string.
pub fn sha256_hex(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let digest = hasher.finalize();
    format!("sha256:{}", hex::encode(digest))
}

#[derive(Clone)]
pub struct RecommendationService {
    client: Arc<dyn CompletionService>,
    cache: Cache<String, String>,
    region: String,
}

impl RecommendationService {
    pub fn new(client: Arc<dyn CompletionService>, region: String, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(ttl)
            .build();
        Self {
            client,
            cache,
            region,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, RecommendationError> {
        let client: Arc<dyn CompletionService> = match &config.ai.api_key {
            Some(key) => Arc::new(GeminiClient::new(&config.ai, key.clone())?),
            None => {
                tracing::warn!("GEMINI_API_KEY not set, AI recommendations are disabled");
                Arc::new(DisabledCompletion)
            }
        };
        Ok(Self::new(client, config.region_name.clone(), config.ai.cache_ttl))
    }

    pub fn backend(&self) -> &'static str {
        self.client.name()
    }

    /// Cache key for a request in this service's region.
    pub fn input_hash(&self, request: &RecommendationRequest) -> String {
        let payload = serde_json::json!({ "region": self.region, "request": request });
        sha256_hex(&payload.to_string())
    }

    /// Sanitized recommendation markup for `request`.
    pub async fn recommend(&self, request: &RecommendationRequest) -> Result<String, RecommendationError> {
        let key = self.input_hash(request);
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(%key, "Recommendation cache hit");
            return Ok(cached);
        }

        let prompt = prompt::build(&self.region, request);
        let raw = self.client.complete(&prompt).await.map_err(|e| {
            tracing::error!(backend = self.client.name(), "Error fetching AI recommendation: {}", e);
            e
        })?;

        let html = sanitize::sanitize_html(&raw);
        if html.is_empty() {
            tracing::error!(backend = self.client.name(), "Completion sanitized to nothing");
            return Err(RecommendationError::EmptyResponse);
        }

        self.cache.insert(key, html.clone()).await;
        Ok(html)
    }
}
