//! # Collection Service
//!
//! The fetch port the overview view model pages through, and its adapter
//! for the Rijksmuseum collection search endpoint.

use super::request::Request;
use super::resolver::{ResolveError, Resolver};
use crate::config::ApiSettings;
use crate::overview::models::{ArtObject, CollectionResponse};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Loads one page of raw collection records
#[async_trait]
pub trait FetchCollectionService: Send + Sync {
    /// Fetch `page` (1-based) of the results for `query`
    ///
    /// Implementations should stop work and return
    /// [`ResolveError::Cancelled`] once `cancel` fires.
    async fn load(
        &self,
        query: Option<&str>,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<ArtObject>, ResolveError>;
}

/// [`FetchCollectionService`] talking to the Rijksmuseum API
#[derive(Debug, Clone)]
pub struct RijksCollectionService {
    resolver: Resolver,
    settings: ApiSettings,
}

impl RijksCollectionService {
    pub fn new(resolver: Resolver, settings: ApiSettings) -> Self {
        Self { resolver, settings }
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Build the search request for one page
    pub fn collection_request(
        &self,
        query: Option<&str>,
        page: u32,
    ) -> Request<CollectionResponse> {
        let address = format!(
            "{}/{}/collection",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.culture
        );

        let mut params = Vec::with_capacity(5);
        if let Some(key) = &self.settings.api_key {
            params.push(("key".to_string(), key.clone()));
        }
        params.push(("p".to_string(), page.to_string()));
        params.push(("ps".to_string(), self.settings.page_size.to_string()));
        params.push(("imgonly".to_string(), "True".to_string()));
        if let Some(query) = query {
            params.push(("q".to_string(), query.to_string()));
        }

        Request::get(address, params)
    }
}

#[async_trait]
impl FetchCollectionService for RijksCollectionService {
    async fn load(
        &self,
        query: Option<&str>,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<ArtObject>, ResolveError> {
        let request = self.collection_request(query, page);
        tracing::debug!("Loading collection page {} for query {:?}", page, query);

        let response = self.resolver.resolve_json(&request, cancel).await?;
        tracing::debug!(
            "Collection page {} returned {} of {} records",
            page,
            response.art_objects.len(),
            response.count
        );

        Ok(response.art_objects)
    }
}
