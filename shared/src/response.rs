//! API Response types
//!
//! Envelopes returned by the health backend and the pagination metadata
//! derived from them.
//!
//! Mutation endpoints answer with:
//! ```json
//! { "success": true, "message": "Staff created", "data": { ... } }
//! ```
//! List endpoints answer with:
//! ```json
//! { "success": true, "data": [ ... ], "totalCount": 25, "totalPages": 3 }
//! ```

use serde::{Deserialize, Serialize};

/// Envelope for single-record and mutation responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Absent is treated as failure
    #[serde(default)]
    pub success: bool,
    /// Human-readable message, shown verbatim on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Create a failed response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Envelope for paginated list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<Vec<T>>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ListResponse<T> {
    /// Successful page; `total_pages` is derived from `page_size`.
    pub fn ok(items: Vec<T>, total_count: u64, page_size: u32) -> Self {
        Self {
            success: true,
            data: Some(items),
            total_count,
            total_pages: total_pages(total_count, page_size),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            total_count: 0,
            total_pages: 0,
            message: Some(message.into()),
        }
    }
}

/// Number of pages needed for `total_count` items
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total_count.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

/// One entry of a pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageButton {
    Page { number: u32, active: bool },
    /// Collapsed run of pages
    Gap,
}

const EDGE_PAGES: u32 = 1;
const AROUND_CURRENT: u32 = 2;

/// Page buttons for a pagination bar.
///
/// Keeps the first and last page plus two pages either side of the
/// current one, collapsing everything else into [`PageButton::Gap`].
pub fn page_buttons(total_pages: u32, current: u32) -> Vec<PageButton> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);
    let last = total_pages;

    let mut numbers: Vec<Option<u32>> = Vec::new();

    let left_end = (1 + EDGE_PAGES).min(last + 1);
    numbers.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current.saturating_sub(AROUND_CURRENT));
    let mid_end = (current + AROUND_CURRENT + 1).min(last + 1);
    // A gap never hides a single page
    if mid_start == left_end + 1 {
        numbers.push(Some(left_end));
    } else if mid_start > left_end {
        numbers.push(None);
    }
    numbers.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last.saturating_sub(EDGE_PAGES) + 1);
    if right_start == mid_end + 1 {
        numbers.push(Some(mid_end));
    } else if right_start > mid_end {
        numbers.push(None);
    }
    numbers.extend((right_start..=last).map(Some));

    numbers
        .into_iter()
        .map(|n| match n {
            Some(number) => PageButton::Page {
                number,
                active: number == current,
            },
            None => PageButton::Gap,
        })
        .collect()
}
