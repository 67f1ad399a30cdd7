//! Catalog Service
//!
//! Stateless operations: starting a round, dashboard stats, search.

use std::sync::Arc;

use crate::domain::{DomainError, MediaType, Prompt, SearchEntityType, SearchResults, Stats};
use crate::ports::{CreatePromptRequest, MojifyApi, SearchQuery};

pub struct CatalogService<A: MojifyApi> {
    api: Arc<A>,
}

impl<A: MojifyApi> CatalogService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Start a new round. Title and context are trimmed and required.
    pub async fn create_prompt(
        &self,
        title: &str,
        context_text: &str,
        media_type: Option<MediaType>,
        media_url: Option<&str>,
    ) -> Result<Prompt, DomainError> {
        let title = title.trim();
        let context_text = context_text.trim();
        if title.is_empty() {
            return Err(DomainError::validation("Title is required."));
        }
        if context_text.is_empty() {
            return Err(DomainError::validation("Context text is required."));
        }

        let request = CreatePromptRequest {
            title: title.to_string(),
            context_text: context_text.to_string(),
            media_type: media_type.unwrap_or_default(),
            media_url: media_url
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
        };

        let prompt = self.api.create_prompt(&request).await?;
        tracing::info!(prompt_id = %prompt.id, title = %prompt.title, "prompt created");
        Ok(prompt)
    }

    pub async fn stats(&self) -> Result<Stats, DomainError> {
        self.api.stats().await
    }

    pub async fn search(
        &self,
        q: &str,
        limit: Option<u32>,
        entity_type: Option<SearchEntityType>,
    ) -> Result<SearchResults, DomainError> {
        let q = q.trim();
        if q.is_empty() {
            return Err(DomainError::validation("Search query is required."));
        }

        self.api
            .search(&SearchQuery {
                q: q.to_string(),
                limit: limit.filter(|l| *l > 0),
                entity_type,
            })
            .await
    }
}
