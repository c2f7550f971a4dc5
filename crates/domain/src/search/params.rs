use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::SortField;
use crate::config::SearchConfig;
use crate::errors::{DomainError, DomainResult};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PER_PAGE: usize = 15;
/// Hard upper bound for typed construction; string input is bounded by config
pub const PER_PAGE_CEILING: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Orient an ascending comparison
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(DomainError::InvalidSearchParams(format!(
                "sort direction must be 'asc' or 'desc', got '{s}'"
            ))),
        }
    }
}

/// Untyped search input as received from a caller (query string, DTO)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub sort: Option<String>,
    pub sort_dir: Option<String>,
}

/// Validated search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams<F, S> {
    page: usize,
    per_page: usize,
    sort: Option<S>,
    sort_dir: SortDirection,
    filter: F,
}

impl<F: Default, S: SortField> Default for SearchParams<F, S> {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            sort_dir: SortDirection::Asc,
            filter: F::default(),
        }
    }
}

impl<F, S: SortField> SearchParams<F, S> {
    pub fn new() -> Self
    where
        F: Default,
    {
        Self::default()
    }

    /// Pages below 1 are clamped to 1
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
        self
    }

    pub fn with_per_page(mut self, per_page: i64) -> DomainResult<Self> {
        self.per_page = checked_per_page(per_page, PER_PAGE_CEILING)?;
        Ok(self)
    }

    pub fn with_sort(mut self, field: S, direction: SortDirection) -> Self {
        self.sort = Some(field);
        self.sort_dir = direction;
        self
    }

    pub fn with_filter(mut self, filter: F) -> Self {
        self.filter = filter;
        self
    }

    /// Parse caller input against the configured paging limits
    pub fn from_input(raw: &RawSearchParams, filter: F, config: &SearchConfig) -> DomainResult<Self> {
        let page = match non_blank(&raw.page) {
            Some(page) => parse_integer("page", page)?.max(1),
            None => DEFAULT_PAGE as i64,
        };

        let per_page = match non_blank(&raw.per_page) {
            Some(per_page) => checked_per_page(parse_integer("perPage", per_page)?, config.max_per_page)?,
            None => config.default_per_page,
        };

        let sort_dir = non_blank(&raw.sort_dir)
            .map(str::parse::<SortDirection>)
            .transpose()?
            .unwrap_or_default();

        let sort = non_blank(&raw.sort).and_then(|name| {
            let field = S::parse(name);
            if field.is_none() {
                tracing::debug!(sort = name, "ignoring unknown sort field");
            }
            field
        });

        Ok(Self {
            page: usize::try_from(page).unwrap_or(usize::MAX),
            per_page,
            sort,
            sort_dir,
            filter,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn sort(&self) -> Option<S> {
        self.sort
    }

    pub fn sort_dir(&self) -> SortDirection {
        self.sort_dir
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Index of the first item of the requested page
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_integer(name: &str, value: &str) -> DomainResult<i64> {
    value
        .parse::<i64>()
        .map_err(|_| DomainError::InvalidSearchParams(format!("{name} must be an integer, got '{value}'")))
}

fn checked_per_page(per_page: i64, max: usize) -> DomainResult<usize> {
    match usize::try_from(per_page) {
        Ok(n) if n >= 1 && n <= max => Ok(n),
        _ => Err(DomainError::InvalidSearchParams(format!(
            "perPage must be between 1 and {max}, got {per_page}"
        ))),
    }
}
