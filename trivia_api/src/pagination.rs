//! Fixed-size, 1-indexed pages over ordered result sets

use serde::Deserialize;

use crate::deserializers::lenient_i64;

/// Number of questions on every page
pub const QUESTIONS_PER_PAGE: i64 = 10;

/// Query parameters carrying an optional page number.
///
/// The raw value is kept as a string so that garbage falls back to page 1
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> Page {
        Page::new(lenient_i64(self.page.as_deref()).unwrap_or(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: i64,
}

impl Page {
    /// Page numbers below 1 are kept as-is and always yield an empty window.
    pub fn new(number: i64) -> Self {
        Self { number }
    }

    pub fn first() -> Self {
        Self::new(1)
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    /// Whether the page can contain anything at all
    pub fn is_valid(&self) -> bool {
        self.number >= 1
    }

    /// SQL OFFSET for this page
    pub fn offset(&self) -> i64 {
        (self.number.max(1) - 1).saturating_mul(QUESTIONS_PER_PAGE)
    }

    /// SQL LIMIT for this page
    pub fn limit(&self) -> i64 {
        if self.is_valid() { QUESTIONS_PER_PAGE } else { 0 }
    }

    /// Slice an in-memory result set down to this page's window
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let Ok(offset) = usize::try_from(self.offset()) else {
            return Vec::new();
        };
        items
            .into_iter()
            .skip(offset)
            .take(self.limit() as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_bounds() {
        let p = Page::new(1);
        assert_eq!((p.offset(), p.limit()), (0, 10));

        let p = Page::new(3);
        assert_eq!((p.offset(), p.limit()), (20, 10));
    }

    #[test]
    fn apply_takes_min_of_page_size_and_remaining() {
        let items: Vec<i32> = (0..25).collect();
        assert_eq!(Page::new(1).apply(items.clone()), (0..10).collect::<Vec<_>>());
        assert_eq!(Page::new(3).apply(items.clone()), (20..25).collect::<Vec<_>>());
        assert!(Page::new(4).apply(items).is_empty());
    }

    #[test]
    fn non_positive_pages_are_empty() {
        let items: Vec<i32> = (0..25).collect();
        assert!(Page::new(0).apply(items.clone()).is_empty());
        assert!(Page::new(-2).apply(items).is_empty());
        assert_eq!(Page::new(0).limit(), 0);
    }

    #[test]
    fn query_defaults_and_garbage_fall_back_to_first_page() {
        assert_eq!(PageQuery::default().page(), Page::first());
        let q = PageQuery { page: Some("two".into()) };
        assert_eq!(q.page(), Page::first());
        let q = PageQuery { page: Some("2".into()) };
        assert_eq!(q.page().number(), 2);
    }
}
