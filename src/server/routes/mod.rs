//! HTTP route modules
//!
//! Every response body, success or failure, uses the [`ApiResponse`]
//! envelope.

pub mod casbin_rules;
pub mod health;
pub mod menus;
pub mod roles;

use crate::utils::error::{AdminError, Result};
use crate::utils::validation::FieldErrors;
use serde::Serialize;

/// Standard API response structure
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Human readable outcome
    pub message: String,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error detail (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Field-level validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    pub fn success<M: Into<String>>(message: M, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    /// A successful response without data
    pub fn message<M: Into<String>>(message: M) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
            errors: None,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Create an error response
    pub fn failure<M: Into<String>>(message: M, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error,
            errors: None,
        }
    }

    /// Attach field-level validation messages
    pub fn with_field_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// Largest accepted `per_page`
pub const MAX_PER_PAGE: u64 = 100;
/// `per_page` when none is given
pub const DEFAULT_PER_PAGE: u64 = 15;

/// Validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Pagination {
    /// Apply defaults and bounds to raw query values
    pub fn from_query(page: Option<u64>, per_page: Option<u64>) -> Result<Self> {
        let page = page.unwrap_or(1);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);

        let mut errors = FieldErrors::new();
        if page == 0 {
            errors.add("page", "The page must be at least 1");
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            errors.add(
                "per_page",
                format!("The per page must be between 1 and {}", MAX_PER_PAGE),
            );
        } else if page > 0 && Self::offset_of(page, per_page).is_none() {
            errors.add("page", "The page is out of range");
        }
        errors.into_result()?;

        Ok(Self { page, per_page })
    }

    /// Row offset of `page`, `None` when it does not fit a SQL `OFFSET`
    fn offset_of(page: u64, per_page: u64) -> Option<u64> {
        (page - 1)
            .checked_mul(per_page)
            .filter(|offset| *offset <= i64::MAX as u64)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number
    pub page: u64,
    /// Number of items per page
    pub per_page: u64,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub pages: u64,
    /// Whether there is a next page
    pub has_next: bool,
    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata
    pub fn new(pagination: Pagination, total: u64) -> Self {
        let pages = total.div_ceil(pagination.per_page.max(1));

        Self {
            page: pagination.page,
            per_page: pagination.per_page,
            total,
            pages,
            has_next: pagination.page < pages,
            has_prev: pagination.page > 1,
        }
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    /// Response items
    pub items: Vec<T>,
    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a paginated response
    pub fn new(items: Vec<T>, pagination: Pagination, total: u64) -> Self {
        Self {
            items,
            pagination: PaginationMeta::new(pagination, total),
        }
    }
}

/// Validation failure for a malformed path, query or body
pub(crate) fn malformed_request(field: &str, detail: impl std::fmt::Display) -> AdminError {
    AdminError::validation(field, detail.to_string())
}
