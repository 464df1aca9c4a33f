use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number, starting at 1
    #[param(minimum = 1)]
    pub page: Option<i64>,
    /// Items per page (default 50, max 100)
    #[param(minimum = 1, maximum = 100)]
    pub size: Option<i64>,
}

/// A validated page window. Built through `TryFrom<PageParams>`, which
/// guarantees the offset fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = AppError;

    fn try_from(params: PageParams) -> AppResult<Self> {
        let page = params.page.unwrap_or(1);
        let size = params.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page < 1 {
            return Err(AppError::validation("page must be at least 1"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(AppError::validation(format!(
                "size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if (page - 1).checked_mul(size).is_none() {
            return Err(AppError::validation("page is out of range"));
        }
        Ok(Self { page, size })
    }
}

/// One page of results plus the totals needed to walk the rest.
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            size: request.size,
            pages: (total + request.size - 1) / request.size,
        }
    }
}
