//! Offset pagination calculator.
//!
//! Turns a requested page/limit and a total row count into page metadata and
//! the `OFFSET`/`LIMIT` pair used by queries.

/// Page size used when none (or a non-positive one) is requested.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound for a requested page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw page selection as supplied by a caller. Values are not yet clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// `OFFSET`/`LIMIT` pair for query execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

/// Pagination metadata for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pages {
    /// Total number of items, or a negative value when unknown.
    pub total: i64,
    pub limit: i64,
    pub current_page: i64,
    /// `-1` when `total` is unknown.
    pub last_page: i64,
}

impl Pages {
    /// Build page metadata.
    ///
    /// The limit falls back to [`DEFAULT_PAGE_SIZE`] when `<= 0` and is capped at
    /// [`MAX_PAGE_SIZE`]. With a known total the current page is clamped down to
    /// the last page; it is always clamped up to 1.
    #[must_use]
    #[allow(clippy::integer_division)]
    pub fn new(current_page: i64, limit: i64, total: i64) -> Self {
        let limit = if limit <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            limit.min(MAX_PAGE_SIZE)
        };

        let mut current_page = current_page;
        let mut last_page = -1;
        if total >= 0 {
            last_page = (total + limit - 1) / limit;
            current_page = current_page.min(last_page);
        }

        Self {
            total,
            limit,
            current_page: current_page.max(1),
            last_page,
        }
    }

    #[must_use]
    pub fn from_request(request: PageRequest, total: i64) -> Self {
        Self::new(request.page, request.limit, total)
    }

    /// `OFFSET` value for the current page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.current_page - 1).saturating_mul(self.limit)
    }

    /// `LIMIT` value for the current page.
    #[must_use]
    pub fn size(&self) -> i64 {
        self.limit
    }

    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: u64::try_from(self.offset()).unwrap_or(0),
            limit: u64::try_from(self.size()).unwrap_or(0),
        }
    }
}
