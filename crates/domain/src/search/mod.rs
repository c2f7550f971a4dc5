//! Search / pagination engine
//!
//! Filtering, stable sorting and page slicing over entity collections. The
//! SQL repositories compile the same [`SearchParams`] into queries and must
//! honor the ordering contract implemented by [`search`].

mod engine;
mod params;
mod result;

pub use engine::search;
pub use params::{
    RawSearchParams, SearchParams, SortDirection, DEFAULT_PAGE, DEFAULT_PER_PAGE, PER_PAGE_CEILING,
};
pub use result::{last_page, SearchResult};

use std::cmp::Ordering;
use std::fmt;

use crate::entities::Entity;

/// Field an entity can be ordered by
pub trait SortField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const ALLOWED: &'static [Self];

    /// camelCase name, as exposed to callers
    fn name(&self) -> &'static str;

    /// Accepts the camelCase or snake_case name
    fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim();
        Self::ALLOWED.iter().copied().find(|field| {
            field.name() == wanted || camel_to_snake(field.name()) == wanted
        })
    }
}

/// Entity that can go through [`search`]
pub trait Searchable: Entity {
    type Filter: Clone + Default + fmt::Debug + Send + Sync;
    type Sort: SortField;

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Ascending comparison on `field`
    fn compare_by(&self, other: &Self, field: Self::Sort) -> Ordering;
}

fn camel_to_snake(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            snake.push('_');
            snake.push(ch.to_ascii_lowercase());
        } else {
            snake.push(ch);
        }
    }
    snake
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("createdAt"), "created_at");
        assert_eq!(camel_to_snake("duration"), "duration");
    }
}
