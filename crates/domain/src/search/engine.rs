use super::{SearchParams, SearchResult, Searchable};

/// Filter, order and paginate `items`.
///
/// Sorting is stable: items with equal keys keep their input order. Without
/// an explicit sort field the newest `createdAt` comes first.
pub fn search<E: Searchable>(items: &[E], params: &SearchParams<E::Filter, E::Sort>) -> SearchResult<E> {
    let mut matched: Vec<&E> = items.iter().filter(|item| item.matches(params.filter())).collect();

    match params.sort() {
        Some(field) => {
            let direction = params.sort_dir();
            matched.sort_by(|a, b| direction.apply(a.compare_by(b, field)));
        }
        None => matched.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
    }

    let total = matched.len();
    let page: Vec<E> = matched
        .into_iter()
        .skip(params.offset())
        .take(params.per_page())
        .cloned()
        .collect();

    tracing::trace!(total, returned = page.len(), page = params.page(), "search evaluated");
    SearchResult::new(page, total, params.page(), params.per_page())
}
