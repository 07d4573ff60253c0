use std::fmt;

use url::form_urlencoded;

/// Ordered, multi-valued view of a URL query string.
///
/// Keys may repeat, and every pair keeps its original position, so
/// parameters owned by other parts of the page survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query. A leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value stored under `key`, in query order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Replace all occurrences of `key` with a single value.
    ///
    /// The surviving pair keeps the position of the first occurrence; a new
    /// key goes to the end.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let mut found = false;
        self.pairs.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if found {
                return false;
            }
            *v = value.clone();
            found = true;
            true
        });
        if !found {
            self.pairs.push((key.to_string(), value));
        }
    }

    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    /// Remove every occurrence of `key`.
    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        f.write_str(&encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_repeated_keys_in_order() {
        let params = QueryParams::parse("?indicators=1&searchTerm=tacos&indicators=2");
        assert_eq!(params.get_all("indicators"), vec!["1", "2"]);
        assert_eq!(params.get("searchTerm"), Some("tacos"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn parse_decodes_plus_and_percent() {
        let params = QueryParams::parse("searchTerm=coffee+%26+tea");
        assert_eq!(params.get("searchTerm"), Some("coffee & tea"));
    }

    #[test]
    fn set_replaces_in_place_and_drops_duplicates() {
        let mut params = QueryParams::parse("page=1&searchTerm=a&page=2");
        params.set("page", "3");
        assert_eq!(params.to_string(), "page=3&searchTerm=a");

        params.set("perPage", "20");
        assert_eq!(params.to_string(), "page=3&searchTerm=a&perPage=20");
    }

    #[test]
    fn delete_removes_every_occurrence() {
        let mut params = QueryParams::parse("indicators=1&x=y&indicators=2");
        params.delete("indicators");
        assert!(!params.contains("indicators"));
        assert_eq!(params.to_string(), "x=y");
    }

    #[test]
    fn display_encodes_spaces_as_plus() {
        let mut params = QueryParams::new();
        params.append("searchTerm", "black owned cafe");
        assert_eq!(params.to_string(), "searchTerm=black+owned+cafe");
    }

    #[test]
    fn empty_query() {
        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("?").is_empty());
    }
}
