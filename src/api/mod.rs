pub mod http;
pub mod traits;

pub use http::HttpSpaceApi;
pub use traits::SpaceApi;
