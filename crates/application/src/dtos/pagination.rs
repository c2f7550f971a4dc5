use domain::search::SearchResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of mapped entities plus paging counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOutput<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub last_page: usize,
}

impl<T> PaginationOutput<T> {
    /// Map each entity of a search page through `to_output`
    pub fn from_search<E>(result: SearchResult<E>, to_output: impl FnMut(E) -> T) -> Self {
        let result = result.map(to_output);
        Self {
            items: result.items,
            total: result.total,
            current_page: result.current_page,
            per_page: result.per_page,
            last_page: result.last_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub last_page: usize,
}

/// `{ data, meta }` envelope for list responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPresenter<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> From<PaginationOutput<T>> for CollectionPresenter<T> {
    fn from(output: PaginationOutput<T>) -> Self {
        Self {
            data: output.items,
            meta: PaginationMeta {
                total: output.total,
                current_page: output.current_page,
                per_page: output.per_page,
                last_page: output.last_page,
            },
        }
    }
}

impl<T: Serialize> CollectionPresenter<T> {
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
