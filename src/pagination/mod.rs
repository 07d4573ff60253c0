//! Page-number window for the results pagination control.
//!
//! Around the current page the control shows the previous page, the next
//! two pages, a single ellipsis when there is a gap, and the last page.

use serde::Serialize;

use crate::query::criteria::coerce_uint;
use crate::query::store::join_location;
use crate::query::{CriteriaKey, QueryParams};

pub const DEFAULT_ELLIPSIS_LABEL: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum PageLabel {
    Page(u32),
    /// Opens the go-to-page control; never links to a page.
    Ellipsis(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    pub label: PageLabel,
    pub is_current: bool,
    pub link: Option<String>,
}

impl PageEntry {
    pub fn page_number(&self) -> Option<u32> {
        match self.label {
            PageLabel::Page(n) => Some(n),
            PageLabel::Ellipsis(_) => None,
        }
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self.label, PageLabel::Ellipsis(_))
    }
}

/// Everything the pagination control renders.
///
/// `back` and `next` are `None` when the control is disabled; callers must
/// not navigate in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub total_pages: u32,
    pub current_page: u32,
    pub page_size: u32,
    pub entries: Vec<PageEntry>,
    pub back: Option<String>,
    pub next: Option<String>,
}

impl PageWindow {
    /// Whether any navigation is shown at all.
    pub fn has_navigation(&self) -> bool {
        self.back.is_some() || self.next.is_some()
    }

    pub fn page_numbers(&self) -> Vec<u32> {
        self.entries.iter().filter_map(PageEntry::page_number).collect()
    }
}

pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Builds page windows whose links keep the rest of the current query.
#[derive(Debug, Clone)]
pub struct Paginator<'a> {
    base_path: &'a str,
    query: &'a QueryParams,
    ellipsis_label: &'a str,
}

impl<'a> Paginator<'a> {
    pub fn new(base_path: &'a str, query: &'a QueryParams) -> Self {
        Self {
            base_path,
            query,
            ellipsis_label: DEFAULT_ELLIPSIS_LABEL,
        }
    }

    pub fn with_ellipsis_label(mut self, label: &'a str) -> Self {
        self.ellipsis_label = label;
        self
    }

    pub fn window(&self, total_count: u64, page_size: u32, current_page: u32) -> PageWindow {
        let total = total_pages(total_count, page_size);
        if total <= 1 {
            return PageWindow {
                total_pages: total,
                current_page: current_page.max(1),
                page_size,
                entries: Vec::new(),
                back: None,
                next: None,
            };
        }

        let page = current_page.clamp(1, total);
        let (p, t) = (u64::from(page), u64::from(total));

        let mut entries = Vec::with_capacity(6);
        if page > 1 {
            entries.push(self.page_entry(page - 1, page, page_size));
        }
        entries.push(self.page_entry(page, page, page_size));
        if p + 1 < t {
            entries.push(self.page_entry(page + 1, page, page_size));
        }
        if p + 2 < t {
            entries.push(self.page_entry(page + 2, page, page_size));
        }
        if p + 3 <= t {
            entries.push(PageEntry {
                label: PageLabel::Ellipsis(self.ellipsis_label.to_string()),
                is_current: false,
                link: None,
            });
        }
        if total != page {
            entries.push(self.page_entry(total, page, page_size));
        }

        PageWindow {
            total_pages: total,
            current_page: page,
            page_size,
            entries,
            back: (page > 1).then(|| self.link(page - 1, page_size)),
            next: (page < total).then(|| self.link(page + 1, page_size)),
        }
    }

    /// Link for a page typed into the go-to-page control, clamped into the
    /// window's range. Text without a leading number yields nothing.
    pub fn go_to(&self, window: &PageWindow, input: &str) -> Option<String> {
        if !window.has_navigation() || window.total_pages == 0 {
            return None;
        }
        let requested = coerce_uint(Some(input))?;
        let page = requested.clamp(1, window.total_pages);
        Some(self.link(page, window.page_size))
    }

    pub fn link(&self, page: u32, page_size: u32) -> String {
        let mut query = self.query.clone();
        query.set(CriteriaKey::Page.param(), page.to_string());
        query.set(CriteriaKey::PerPage.param(), page_size.to_string());
        join_location(self.base_path, &query)
    }

    fn page_entry(&self, page: u32, current: u32, page_size: u32) -> PageEntry {
        PageEntry {
            label: PageLabel::Page(page),
            is_current: page == current,
            link: Some(self.link(page, page_size)),
        }
    }
}
