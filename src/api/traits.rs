use crate::error::Result;
use crate::models::{RawSpace, SearchResponse, SpaceOption};
use crate::query::SearchCriteria;
use async_trait::async_trait;

/// Read access to the OurGuide backend
/// Search views depend on this rather than on a concrete HTTP client
#[async_trait]
pub trait SpaceApi: Send + Sync {
    /// Spaces matching the given criteria
    async fn search_spaces(&self, criteria: &SearchCriteria) -> Result<SearchResponse>;

    /// A single space by id
    async fn get_space(&self, id: &str) -> Result<RawSpace>;

    /// Up to five name suggestions. Failures yield an empty list so callers
    /// can fall back to free text.
    async fn spaces_by_name(&self, name: &str) -> Vec<SpaceOption>;
}
