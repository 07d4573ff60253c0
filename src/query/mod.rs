//! Search criteria and their URL query representation.

pub mod criteria;
pub mod params;
pub mod store;

pub use criteria::{CriteriaKey, SearchCriteria, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
pub use params::QueryParams;
pub use store::QueryStateStore;
