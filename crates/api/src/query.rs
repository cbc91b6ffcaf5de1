//! Shared query parameter types for API handlers.

use catalog_db::store::Page;
use serde::Deserialize;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Pagination parameters (`?limit=&offset=`, or `?limit=&page=`).
///
/// `page` is 1-based and only consulted when `offset` is absent.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub page: Option<i64>,
}

impl PaginationParams {
    pub fn to_page(&self) -> Page {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let skip = match (self.offset, self.page) {
            (Some(offset), _) => offset.max(0),
            (None, Some(page)) => limit.saturating_mul(page.max(1) - 1),
            (None, None) => 0,
        };
        Page::new(limit, skip)
    }
}
