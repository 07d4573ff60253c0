use serde::{Deserialize, Serialize};

use super::params::QueryParams;

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Query parameters owned by the search view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriteriaKey {
    SearchTerm,
    Distance,
    Rating,
    Price,
    Indicators,
    Page,
    PerPage,
}

impl CriteriaKey {
    /// Name of the parameter in the URL.
    pub fn param(self) -> &'static str {
        match self {
            CriteriaKey::SearchTerm => "searchTerm",
            CriteriaKey::Distance => "distance",
            CriteriaKey::Rating => "rating",
            CriteriaKey::Price => "price",
            CriteriaKey::Indicators => "indicators",
            CriteriaKey::Page => "page",
            CriteriaKey::PerPage => "perPage",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, CriteriaKey::SearchTerm | CriteriaKey::Indicators)
    }
}

/// Search, filter and paging state of one listing view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub search_term: String,
    pub distance: u32,
    pub rating: f64,
    pub price: u32,
    /// Selected indicator values. Never holds the same value twice.
    pub indicators: Vec<String>,
    pub page_number: u32,
    pub page_size: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            distance: 0,
            rating: 0.0,
            price: 0,
            indicators: Vec::new(),
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchCriteria {
    /// Read criteria from a raw query string. Never fails: malformed values
    /// fall back to their defaults.
    pub fn parse(query: &str) -> Self {
        Self::from_params(&QueryParams::parse(query))
    }

    pub fn from_params(params: &QueryParams) -> Self {
        let number = |key: CriteriaKey| coerce_uint(params.get(key.param()));
        let page_setting = |key: CriteriaKey, default: u32| {
            number(key).filter(|n| *n > 0).unwrap_or(default)
        };

        Self {
            search_term: params
                .get(CriteriaKey::SearchTerm.param())
                .unwrap_or_default()
                .to_string(),
            distance: number(CriteriaKey::Distance).unwrap_or(0),
            rating: coerce_float(params.get(CriteriaKey::Rating.param())).unwrap_or(0.0),
            price: number(CriteriaKey::Price).unwrap_or(0),
            indicators: indicator_values(params),
            page_number: page_setting(CriteriaKey::Page, DEFAULT_PAGE_NUMBER),
            page_size: page_setting(CriteriaKey::PerPage, DEFAULT_PAGE_SIZE),
        }
    }

    /// Query representation of these criteria. Empty and zero filters are
    /// left out; paging is always present.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if !self.search_term.is_empty() {
            params.append(CriteriaKey::SearchTerm.param(), self.search_term.as_str());
        }
        if self.distance != 0 {
            params.append(CriteriaKey::Distance.param(), self.distance.to_string());
        }
        if self.rating != 0.0 {
            params.append(CriteriaKey::Rating.param(), self.rating.to_string());
        }
        if self.price != 0 {
            params.append(CriteriaKey::Price.param(), self.price.to_string());
        }
        for indicator in &self.indicators {
            params.append(CriteriaKey::Indicators.param(), indicator.as_str());
        }
        params.append(CriteriaKey::Page.param(), self.page_number.to_string());
        params.append(CriteriaKey::PerPage.param(), self.page_size.to_string());
        params
    }

    pub fn serialize(&self) -> String {
        self.to_params().to_string()
    }

    /// Apply one field change and return the reparsed criteria.
    pub fn update(&self, key: CriteriaKey, value: Option<&str>) -> Self {
        let mut params = self.to_params();
        apply_update(&mut params, key, value);
        Self::from_params(&params)
    }

    pub fn has_indicator(&self, value: &str) -> bool {
        self.indicators.iter().any(|i| i == value)
    }
}

/// Mutate `params` for a single criteria change.
///
/// Indicators toggle membership. Any other key is removed when `value` is
/// falsy and replaced otherwise.
pub(crate) fn apply_update(params: &mut QueryParams, key: CriteriaKey, value: Option<&str>) {
    let name = key.param();
    if key == CriteriaKey::Indicators {
        let Some(value) = value else {
            return;
        };
        let mut selected = indicator_values(params);
        match selected.iter().position(|i| i == value) {
            Some(idx) => {
                selected.remove(idx);
            }
            None => selected.push(value.to_string()),
        }
        replace_indicators(params, &selected);
    } else if is_falsy(key, value) {
        params.delete(name);
    } else if let Some(value) = value {
        params.set(name, value);
    }
}

pub(crate) fn replace_indicators<S: AsRef<str>>(params: &mut QueryParams, values: &[S]) {
    let name = CriteriaKey::Indicators.param();
    params.delete(name);
    for value in values {
        params.append(name, value.as_ref());
    }
}

fn indicator_values(params: &QueryParams) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for value in params.get_all(CriteriaKey::Indicators.param()) {
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
    values
}

fn is_falsy(key: CriteriaKey, value: Option<&str>) -> bool {
    match value {
        None | Some("") => true,
        Some(v) if key.is_numeric() => matches!(coerce_float(Some(v)), Some(n) if n == 0.0),
        Some(_) => false,
    }
}

/// Leading unsigned integer of `raw`, ignoring leading whitespace and
/// anything after the digits (`"12abc"` reads as 12).
pub(crate) fn coerce_uint(raw: Option<&str>) -> Option<u32> {
    let raw = raw?.trim_start();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Leading non-negative decimal of `raw`. Non-finite results are rejected.
pub(crate) fn coerce_float(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim_start();
    let unsigned = raw.strip_prefix('+').unwrap_or(raw);

    let mut end = 0;
    let mut seen_dot = false;
    for (idx, c) in unsigned.char_indices() {
        match c {
            '0'..='9' => end = idx + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }

    unsigned[..end]
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults_on_empty_query() {
        let criteria = SearchCriteria::parse("");
        assert_eq!(criteria, SearchCriteria::default());
        assert_eq!(criteria.page_number, 1);
        assert_eq!(criteria.page_size, 20);
    }

    #[test]
    fn parse_reads_every_field() {
        let criteria = SearchCriteria::parse(
            "?searchTerm=coffee&distance=5&rating=4.5&price=2&indicators=3&indicators=1&page=2&perPage=10",
        );
        assert_eq!(criteria.search_term, "coffee");
        assert_eq!(criteria.distance, 5);
        assert_eq!(criteria.rating, 4.5);
        assert_eq!(criteria.price, 2);
        assert_eq!(criteria.indicators, vec!["3", "1"]);
        assert_eq!(criteria.page_number, 2);
        assert_eq!(criteria.page_size, 10);
    }

    #[test]
    fn price_is_not_read_from_distance() {
        let criteria = SearchCriteria::parse("distance=7");
        assert_eq!(criteria.distance, 7);
        assert_eq!(criteria.price, 0);
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let criteria = SearchCriteria::parse("?indicators=1&indicators=2&page=abc");
        assert_eq!(criteria.indicators, vec!["1", "2"]);
        assert_eq!(criteria.page_number, 1);

        let criteria = SearchCriteria::parse("distance=-4&rating=NaN&price=x&perPage=0&page=0");
        assert_eq!(criteria.distance, 0);
        assert_eq!(criteria.rating, 0.0);
        assert_eq!(criteria.price, 0);
        assert_eq!(criteria.page_size, 20);
        assert_eq!(criteria.page_number, 1);
    }

    #[test]
    fn numbers_use_leading_prefix() {
        let criteria = SearchCriteria::parse("distance=12abc&rating=3.5stars&page=%204");
        assert_eq!(criteria.distance, 12);
        assert_eq!(criteria.rating, 3.5);
        assert_eq!(criteria.page_number, 4);
    }

    #[test]
    fn oversized_numbers_fall_back() {
        let criteria = SearchCriteria::parse("page=99999999999999999999");
        assert_eq!(criteria.page_number, 1);
    }

    #[test]
    fn duplicate_indicators_collapse() {
        let criteria = SearchCriteria::parse("indicators=2&indicators=1&indicators=2");
        assert_eq!(criteria.indicators, vec!["2", "1"]);
    }

    #[test]
    fn serialize_then_parse_returns_same_criteria() {
        let cases = [
            SearchCriteria::default(),
            SearchCriteria {
                search_term: "queer owned bookstore".to_string(),
                distance: 10,
                rating: 3.75,
                price: 4,
                indicators: vec!["8".to_string(), "a&b".to_string(), "".to_string()],
                page_number: 7,
                page_size: 50,
            },
            SearchCriteria {
                search_term: " ".to_string(),
                rating: 0.1,
                ..SearchCriteria::default()
            },
        ];
        for criteria in cases {
            assert_eq!(SearchCriteria::parse(&criteria.serialize()), criteria);
        }
    }

    #[test]
    fn serialize_omits_empty_filters() {
        let criteria = SearchCriteria {
            search_term: "tacos".to_string(),
            ..SearchCriteria::default()
        };
        assert_eq!(criteria.serialize(), "searchTerm=tacos&page=1&perPage=20");
    }

    #[test]
    fn toggling_indicator_twice_restores_sequence() {
        let criteria = SearchCriteria::parse("indicators=1&indicators=2");
        let added = criteria.update(CriteriaKey::Indicators, Some("5"));
        assert_eq!(added.indicators, vec!["1", "2", "5"]);
        let restored = added.update(CriteriaKey::Indicators, Some("5"));
        assert_eq!(restored.indicators, criteria.indicators);
    }

    #[test]
    fn toggle_removes_only_the_matching_value() {
        let criteria = SearchCriteria::parse("indicators=1&indicators=2&indicators=3");
        let updated = criteria.update(CriteriaKey::Indicators, Some("2"));
        assert_eq!(updated.indicators, vec!["1", "3"]);
    }

    #[test]
    fn removing_selected_indicator_from_same_criteria_is_stable() {
        let criteria = SearchCriteria::parse("indicators=3");
        for _ in 0..2 {
            let updated = criteria.update(CriteriaKey::Indicators, Some("3"));
            assert!(updated.indicators.is_empty());
        }
    }

    #[test]
    fn falsy_values_remove_the_key() {
        let criteria = SearchCriteria::parse("searchTerm=pizza&distance=3&page=4");
        let cleared = criteria.update(CriteriaKey::SearchTerm, Some(""));
        assert_eq!(cleared.search_term, "");
        assert!(!cleared.serialize().contains("searchTerm"));

        let cleared = criteria.update(CriteriaKey::Distance, Some("0"));
        assert_eq!(cleared.distance, 0);

        let cleared = criteria.update(CriteriaKey::Page, None);
        assert_eq!(cleared.page_number, 1);
    }

    #[test]
    fn update_sets_value() {
        let criteria = SearchCriteria::default().update(CriteriaKey::Rating, Some("4"));
        assert_eq!(criteria.rating, 4.0);
        let criteria = criteria.update(CriteriaKey::Rating, Some("2.5"));
        assert_eq!(criteria.rating, 2.5);
    }

}
