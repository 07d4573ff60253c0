use tracing::debug;

use super::criteria::{apply_update, replace_indicators, CriteriaKey, SearchCriteria};
use super::params::QueryParams;
use crate::filters::FilterPayload;

/// Owns the live query of a listing view and the criteria parsed from it.
///
/// Parameters the view does not own are carried through untouched.
#[derive(Debug, Clone, Default)]
pub struct QueryStateStore {
    params: QueryParams,
    criteria: SearchCriteria,
}

impl QueryStateStore {
    pub fn from_query(query: &str) -> Self {
        let params = QueryParams::parse(query);
        let criteria = SearchCriteria::from_params(&params);
        Self { params, criteria }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Apply one change to the live query and re-derive the criteria from it.
    pub fn update(&mut self, key: CriteriaKey, value: Option<&str>) -> &SearchCriteria {
        apply_update(&mut self.params, key, value);
        self.reparse();
        debug!(param = key.param(), ?value, query = %self.params, "search criteria updated");
        &self.criteria
    }

    /// Merge the filter panel's selections into the query.
    ///
    /// The indicator set is replaced wholesale and paging restarts at the
    /// first page.
    pub fn apply_filters(&mut self, payload: &FilterPayload) -> &SearchCriteria {
        apply_update(
            &mut self.params,
            CriteriaKey::SearchTerm,
            Some(payload.name.name.as_str()),
        );
        let price = payload.price.to_string();
        apply_update(&mut self.params, CriteriaKey::Price, Some(price.as_str()));

        let values: Vec<&str> = payload
            .indicators
            .iter()
            .map(|i| i.value.as_str())
            .collect();
        replace_indicators(&mut self.params, &values);
        self.params.delete(CriteriaKey::Page.param());

        self.reparse();
        debug!(query = %self.params, "filters applied");
        &self.criteria
    }

    /// Encoded query, including parameters owned by other views.
    pub fn serialize(&self) -> String {
        self.params.to_string()
    }

    /// `path?query` for the current state.
    pub fn location(&self, path: &str) -> String {
        join_location(path, &self.params)
    }

    fn reparse(&mut self) {
        self.criteria = SearchCriteria::from_params(&self.params);
    }
}

pub(crate) fn join_location(path: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, params)
    }
}
