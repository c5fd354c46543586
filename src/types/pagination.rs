//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_NUMBER, MAX_PAGE_SIZE};
use crate::domain::{CenterPreview, ReviewFindResponse, UserPreview};

/// Pagination query parameters, 1-indexed
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    #[param(example = 1)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    #[param(example = 20)]
    pub per_page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Page number clamped to `1..=MAX_PAGE_NUMBER`
    pub fn page(&self) -> u64 {
        self.page.clamp(1, MAX_PAGE_NUMBER)
    }

    /// Get limit capped at maximum (and at least 1)
    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }

    /// Zero-based page index, as SeaORM paginators expect
    pub fn page_index(&self) -> u64 {
        self.page() - 1
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus navigation hints
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    PaginatedUsers = Paginated<UserPreview>,
    PaginatedCenters = Paginated<CenterPreview>,
    PaginatedReviews = Paginated<ReviewFindResponse>
)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    pub current_page: u64,
    pub per_page: u64,
    pub total_count: u64,
    pub total_pages: u64,
    pub previous_page: Option<u64>,
    pub next_page: Option<u64>,
}

impl<T> Paginated<T> {
    /// Build a page from already-fetched rows and the overall row count
    pub fn new(results: Vec<T>, params: &PaginationParams, total_count: u64) -> Self {
        let page = params.page();
        let per_page = params.limit();
        let total_pages = total_count.div_ceil(per_page);

        Self {
            results,
            current_page: page,
            per_page,
            total_count,
            total_pages,
            previous_page: (page > 1).then(|| page - 1),
            next_page: (page < total_pages).then(|| page + 1),
        }
    }

    /// Convert every item, keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            results: self.results.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            total_count: self.total_count,
            total_pages: self.total_pages,
            previous_page: self.previous_page,
            next_page: self.next_page,
        }
    }
}
