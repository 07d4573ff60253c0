use std::fmt;

/// The "Showing A - B of N Results" line above the results list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl ResultRange {
    /// `None` when there is nothing to show.
    pub fn new(page: u32, page_size: u32, total_count: u64) -> Option<Self> {
        if total_count == 0 {
            return None;
        }
        let page = u64::from(page);
        let page_size = u64::from(page_size);
        Some(Self {
            start: page.saturating_sub(1) * page_size + 1,
            end: (page * page_size).min(total_count),
            total: total_count,
        })
    }

    /// Singular only when the range ends at the first result.
    pub fn noun(&self) -> &'static str {
        if self.end <= 1 {
            "Result"
        } else {
            "Results"
        }
    }
}

impl fmt::Display for ResultRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} - {} of {} {}",
            self.start,
            self.end,
            self.total,
            self.noun()
        )
    }
}

pub fn range_label(page: u32, page_size: u32, total_count: u64) -> Option<String> {
    ResultRange::new(page, page_size, total_count).map(|range| range.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page() {
        assert_eq!(
            range_label(1, 20, 95).as_deref(),
            Some("Showing 1 - 20 of 95 Results")
        );
    }

    #[test]
    fn last_partial_page() {
        assert_eq!(
            range_label(5, 20, 95).as_deref(),
            Some("Showing 81 - 95 of 95 Results")
        );
    }

    #[test]
    fn nothing_for_zero_results() {
        assert_eq!(range_label(1, 20, 0), None);
    }

    #[test]
    fn singular_keys_off_the_ending_index() {
        assert_eq!(
            range_label(1, 20, 1).as_deref(),
            Some("Showing 1 - 1 of 1 Result")
        );
        // A single result on a later page still reads as plural.
        assert_eq!(
            range_label(2, 1, 2).as_deref(),
            Some("Showing 2 - 2 of 2 Results")
        );
    }
}
