use serde::Serialize;

/// One page of search output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub last_page: usize,
}

impl<T> SearchResult<T> {
    pub fn new(items: Vec<T>, total: usize, current_page: usize, per_page: usize) -> Self {
        Self {
            items,
            total,
            current_page,
            per_page,
            last_page: last_page(total, per_page),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchResult<U> {
        SearchResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `ceil(total / per_page)`; zero for an empty collection
pub fn last_page(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}
