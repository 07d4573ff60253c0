//! OurGuide search client
//!
//! Search criteria kept in sync with the URL query, the pagination window
//! and result range shown under the results, the filter panel, and a thin
//! client for the spaces REST API.

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod pagination;
pub mod query;
pub mod range;
pub mod search;

pub use api::{HttpSpaceApi, SpaceApi};
pub use config::AppConfig;
pub use error::{ApiError, Result};
pub use filters::{FilterPayload, FilterState};
pub use pagination::{PageWindow, Paginator};
pub use query::{CriteriaKey, QueryParams, QueryStateStore, SearchCriteria};
pub use range::ResultRange;
pub use search::{MemoryHistory, Navigator, SearchSession};
