use crate::api::traits::SpaceApi;
use crate::config::AppConfig;
use crate::error::{ApiError, Result};
use crate::models::{RawSpace, SearchResponse, SpaceOption};
use crate::query::SearchCriteria;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

const SPACES_PATH: [&str; 3] = ["api", "v1", "spaces"];
const SUGGESTION_LIMIT: u32 = 5;

/// `SpaceApi` over the backend's REST endpoints
pub struct HttpSpaceApi {
    client: Client,
    base: Url,
}

impl HttpSpaceApi {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let base = Url::parse(&config.api_host)?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidHost(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("ourguide/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    /// `/api/v1/spaces` with the criteria translated to backend parameters
    pub fn search_url(&self, criteria: &SearchCriteria) -> Url {
        let mut url = self.endpoint(&[]);
        {
            let mut query = url.query_pairs_mut();
            if !criteria.search_term.is_empty() {
                query.append_pair("search", &criteria.search_term);
            }
            query.append_pair("page", &criteria.page_number.to_string());
            query.append_pair("per_page", &criteria.page_size.to_string());
            if criteria.distance != 0 {
                query.append_pair("distance", &criteria.distance.to_string());
            }
            if criteria.rating != 0.0 {
                query.append_pair("rating", &criteria.rating.to_string());
            }
            if criteria.price != 0 {
                query.append_pair("price", &criteria.price.to_string());
            }
            for indicator in &criteria.indicators {
                query.append_pair("indicators[]", indicator);
            }
        }
        url
    }

    pub fn space_url(&self, id: &str) -> Url {
        self.endpoint(&[id])
    }

    pub fn suggestions_url(&self, name: &str) -> Url {
        let mut url = self.endpoint(&[]);
        url.query_pairs_mut()
            .append_pair("search", name)
            .append_pair("page", "1")
            .append_pair("per_page", &SUGGESTION_LIMIT.to_string())
            .append_pair("fields", "id,name");
        url
    }

    fn endpoint(&self, extra: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .clear()
                .extend(SPACES_PATH.iter())
                .extend(extra.iter());
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status: {}", url.path(), status);
            return Err(ApiError::Status {
                endpoint: url.path().to_string(),
                status,
            });
        }

        let body = response.text().await?;
        debug!("Downloaded {} bytes", body.len());

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SpaceApi for HttpSpaceApi {
    async fn search_spaces(&self, criteria: &SearchCriteria) -> Result<SearchResponse> {
        let response: SearchResponse = self.get_json(self.search_url(criteria)).await?;
        info!(
            "Search for {:?} returned {} spaces",
            criteria.search_term,
            response.data.len()
        );
        Ok(response)
    }

    async fn get_space(&self, id: &str) -> Result<RawSpace> {
        match self.get_json(self.space_url(id)).await {
            Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                Err(ApiError::NotFound(id.to_string()))
            }
            other => other,
        }
    }

    async fn spaces_by_name(&self, name: &str) -> Vec<SpaceOption> {
        match self
            .get_json::<SearchResponse>(self.suggestions_url(name))
            .await
        {
            Ok(response) => response
                .data
                .into_iter()
                .map(|space| SpaceOption {
                    name: space.name.unwrap_or_default(),
                    value: space.id.to_string(),
                })
                .collect(),
            Err(e) => {
                warn!("Name suggestions unavailable: {}", e);
                Vec::new()
            }
        }
    }
}
