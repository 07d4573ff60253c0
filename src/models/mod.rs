use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// Postal address of a space as stored by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAddress {
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAlias {
    pub alias: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIndicator {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub url: Option<String>,
}

/// Space record returned by `/api/v1/spaces`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSpace {
    pub id: u64,
    pub name: Option<String>,
    #[serde(default)]
    pub address: RawAddress,
    #[serde(default)]
    pub category_aliases: Vec<CategoryAlias>,
    pub avg_rating: Option<f64>,
    pub phone: Option<String>,
    #[serde(default)]
    pub indicators: Vec<RawIndicator>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    pub url: Option<String>,
    pub yelp_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<RawSpace>,
}

/// Name/value pair offered by the space-name autocomplete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChip {
    pub name: String,
}

/// A space shaped for a search result card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub category: String,
    pub address: String,
    pub average_rating: Option<f64>,
    pub phone_number: String,
    pub filters: Vec<FilterChip>,
    pub image_url: Option<String>,
    pub url: Option<String>,
}

impl SearchResult {
    pub fn from_raw(space: &RawSpace) -> Self {
        let part = |value: &Option<String>| value.clone().unwrap_or_default();
        let address = &space.address;
        let stitched = format!(
            "{} {} {} {} {}",
            part(&address.address_1),
            part(&address.address_2),
            part(&address.city),
            part(&address.state),
            part(&address.postal_code),
        );

        Self {
            id: space.id.to_string(),
            name: part(&space.name),
            category: space
                .category_aliases
                .first()
                .and_then(|c| c.title.clone())
                .unwrap_or_default(),
            address: stitched,
            average_rating: space.avg_rating.filter(|r| *r != 0.0),
            phone_number: part(&space.phone),
            filters: space
                .indicators
                .iter()
                .map(|i| FilterChip {
                    name: i.name.clone(),
                })
                .collect(),
            image_url: space.photos.first().and_then(|p| p.url.clone()),
            url: space.url.clone().or_else(|| space.yelp_url.clone()),
        }
    }

    /// Directions link for the card's address
    pub fn maps_link(&self) -> String {
        maps_link(&self.address)
    }

    pub fn formatted_phone(&self) -> Option<String> {
        format_phone_number(&self.phone_number)
    }

    pub fn details_path(&self) -> String {
        format!("/spaces/{}", self.id)
    }

    pub fn new_review_path(&self) -> String {
        format!("/spaces/{}/reviews/new", self.id)
    }
}

/// Google Maps directions URL with the address percent-encoded
pub fn maps_link(address: &str) -> String {
    format!("{}{}", MAPS_DIRECTIONS_URL, encode_component(address))
}

/// Percent-encode like a URI component: `!'()*` stay literal.
fn encode_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Format a North American number as `(AAA) BBB-CCCC`, with a `+1 ` prefix
/// when the country code is present
pub fn format_phone_number(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let (intl, local) = match digits.len() {
        10 => ("", digits.as_str()),
        11 if digits.starts_with('1') => ("+1 ", &digits[1..]),
        _ => return None,
    };
    Some(format!(
        "{}({}) {}-{}",
        intl,
        &local[..3],
        &local[3..6],
        &local[6..]
    ))
}
