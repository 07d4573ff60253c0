/// Browser-history side of the search view.
pub trait Navigator {
    /// Add a new entry.
    fn push(&mut self, path: &str, query: &str);

    /// Overwrite the current entry. Filter and paging changes use this so
    /// they do not pile up in back-navigation.
    fn replace(&mut self, path: &str, query: &str);
}

/// In-process history stack, used by the CLI and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop the current entry, returning to the previous one.
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.len() > 1 {
            self.entries.pop();
        }
        self.current()
    }
}

fn location(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

impl Navigator for MemoryHistory {
    fn push(&mut self, path: &str, query: &str) {
        self.entries.push(location(path, query));
    }

    fn replace(&mut self, path: &str, query: &str) {
        self.entries.pop();
        self.entries.push(location(path, query));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_overwrites_current_entry() {
        let mut history = MemoryHistory::new("/");
        history.push("/search", "searchTerm=tea");
        history.replace("/search", "searchTerm=tea&page=2");
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some("/search?searchTerm=tea&page=2"));
        assert_eq!(history.back(), Some("/"));
        assert_eq!(history.back(), Some("/"));
    }

    #[test]
    fn replace_on_empty_history_adds_entry() {
        let mut history = MemoryHistory::default();
        assert!(history.is_empty());
        history.replace("/search", "");
        assert_eq!(history.entries(), ["/search".to_string()]);
    }
}
