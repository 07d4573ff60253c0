//! Filter panel state: name, price tier and indicator selections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query::SearchCriteria;

pub const MAX_PRICE_TIER: u8 = 4;

/// An indicator tag as offered by the filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub name: String,
    pub value: String,
}

impl Indicator {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Indicators offered when the backend does not supply its own list.
pub fn default_indicators() -> Vec<Indicator> {
    [
        ("Black Friendly", "1"),
        ("Inclusive", "2"),
        ("Black Owned", "3"),
        ("Gender Neutral Restrooms", "4"),
        ("Accessible", "5"),
        ("Queer hangout space", "6"),
        ("Trans friendly", "7"),
        ("Queer owned", "8"),
    ]
    .into_iter()
    .map(|(name, value)| Indicator::new(name, value))
    .collect()
}

/// Indicator chip with its selection derived from the current criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chip {
    pub name: String,
    pub value: String,
    pub is_selected: bool,
}

pub fn chips(criteria: &SearchCriteria, catalog: &[Indicator]) -> Vec<Chip> {
    catalog
        .iter()
        .map(|i| Chip {
            name: i.name.clone(),
            value: i.value.clone(),
            is_selected: criteria.has_indicator(&i.value),
        })
        .collect()
}

/// Local selections of the filter panel before they are applied to the
/// search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    name_filter: String,
    price_filter: u8,
    /// Indicator name to value; presence means selected.
    indicator_selections: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the panel from the active search.
    pub fn from_criteria(criteria: &SearchCriteria, catalog: &[Indicator]) -> Self {
        let indicator_selections = catalog
            .iter()
            .filter(|i| criteria.has_indicator(&i.value))
            .map(|i| (i.name.clone(), i.value.clone()))
            .collect();
        Self {
            name_filter: criteria.search_term.clone(),
            price_filter: clamp_price(criteria.price),
            indicator_selections,
        }
    }

    pub fn name_filter(&self) -> &str {
        &self.name_filter
    }

    pub fn price_filter(&self) -> u8 {
        self.price_filter
    }

    pub fn selections(&self) -> &BTreeMap<String, String> {
        &self.indicator_selections
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.indicator_selections.contains_key(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_filter = name.into();
        self
    }

    /// Tiers above the highest one are clamped.
    pub fn with_price(mut self, tier: u8) -> Self {
        self.price_filter = tier.min(MAX_PRICE_TIER);
        self
    }

    /// Deselect `name` if selected, otherwise select it with `value`.
    pub fn toggle_indicator(mut self, name: &str, value: &str) -> Self {
        if self.indicator_selections.remove(name).is_none() {
            self.indicator_selections
                .insert(name.to_string(), value.to_string());
        }
        self
    }

    pub fn active_count(&self) -> usize {
        usize::from(!self.name_filter.is_empty())
            + usize::from(self.price_filter != 0)
            + self.indicator_selections.len()
    }

    /// Panel heading, with the active filter count when there is one.
    pub fn heading(&self) -> String {
        match self.active_count() {
            0 => "Filter".to_string(),
            n => format!("Filter ({})", n),
        }
    }

    pub fn clear(&self) -> Self {
        Self::default()
    }

    pub fn build_payload(&self, category: Option<&str>) -> FilterPayload {
        FilterPayload {
            name: NameFilter {
                name: self.name_filter.clone(),
            },
            category: CategoryFilter {
                alias: category.map(str::to_string),
            },
            indicators: self
                .indicator_selections
                .iter()
                .map(|(name, value)| IndicatorSelection {
                    name: name.clone(),
                    value: value.clone(),
                    is_selected: true,
                })
                .collect(),
            price: self.price_filter,
        }
    }
}

fn clamp_price(price: u32) -> u8 {
    u8::try_from(price.min(u32::from(MAX_PRICE_TIER))).unwrap_or(MAX_PRICE_TIER)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFilter {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSelection {
    pub name: String,
    pub value: String,
    pub is_selected: bool,
}

/// Filter selections in the shape the backend query expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPayload {
    pub name: NameFilter,
    pub category: CategoryFilter,
    pub indicators: Vec<IndicatorSelection>,
    pub price: u8,
}

/// Result count shown in the mobile filter dialog.
pub fn result_count_label(count: usize) -> String {
    if count == 1 {
        "1 Search Result".to_string()
    } else {
        format!("{} Search Results", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn active_count_sums_each_filter() {
        let state = FilterState::new();
        assert_eq!(state.active_count(), 0);

        let state = state.with_name("cafe");
        assert_eq!(state.active_count(), 1);

        let state = state.with_price(3);
        assert_eq!(state.active_count(), 2);

        let state = state
            .toggle_indicator("Accessible", "5")
            .toggle_indicator("Inclusive", "2");
        assert_eq!(state.active_count(), 4);
        assert_eq!(state.heading(), "Filter (4)");
    }

    #[test]
    fn adding_absent_indicator_adds_one() {
        let mut state = FilterState::new().with_name("x");
        for indicator in default_indicators() {
            let before = state.active_count();
            state = state.toggle_indicator(&indicator.name, &indicator.value);
            assert_eq!(state.active_count(), before + 1);
        }
    }

    #[test]
    fn toggle_twice_deselects() {
        let state = FilterState::new().toggle_indicator("Black Owned", "3");
        assert!(state.is_selected("Black Owned"));
        let state = state.toggle_indicator("Black Owned", "3");
        assert!(!state.is_selected("Black Owned"));
        assert_eq!(state, FilterState::new());
    }

    #[test]
    fn clear_resets_everything() {
        let state = FilterState::new()
            .with_name("pub")
            .with_price(4)
            .toggle_indicator("Queer owned", "8");
        let cleared = state.clear();
        assert_eq!(cleared.active_count(), 0);
        assert_eq!(cleared.name_filter(), "");
        assert_eq!(cleared.price_filter(), 0);
        assert!(cleared.selections().is_empty());
        assert_eq!(cleared.heading(), "Filter");
    }

    #[test]
    fn price_is_clamped() {
        assert_eq!(FilterState::new().with_price(9).price_filter(), 4);
    }

    #[test]
    fn from_criteria_selects_catalog_matches() {
        let criteria = SearchCriteria::parse("searchTerm=diner&price=2&indicators=5&indicators=99");
        let state = FilterState::from_criteria(&criteria, &default_indicators());
        assert_eq!(state.name_filter(), "diner");
        assert_eq!(state.price_filter(), 2);
        assert_eq!(state.selections().len(), 1);
        assert!(state.is_selected("Accessible"));
    }

    #[test]
    fn payload_lists_only_selected_indicators() {
        let payload = FilterState::new()
            .with_name("books")
            .with_price(1)
            .toggle_indicator("Trans friendly", "7")
            .build_payload(Some("bookstores"));

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": { "name": "books" },
                "category": { "alias": "bookstores" },
                "indicators": [
                    { "name": "Trans friendly", "value": "7", "isSelected": true }
                ],
                "price": 1
            })
        );
    }

    #[test]
    fn chips_reflect_criteria() {
        let criteria = SearchCriteria::parse("indicators=1&indicators=8");
        let chips = chips(&criteria, &default_indicators());
        assert_eq!(chips.len(), 8);
        let selected: Vec<&str> = chips
            .iter()
            .filter(|c| c.is_selected)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(selected, vec!["Black Friendly", "Queer owned"]);
    }

    #[test]
    fn result_count_pluralizes() {
        assert_eq!(result_count_label(0), "0 Search Results");
        assert_eq!(result_count_label(1), "1 Search Result");
        assert_eq!(result_count_label(12), "12 Search Results");
    }
}
