use crate::core::contract::ContractReport;
use crate::domain::envelope::PaginatedResponse;
use crate::utils::error::{Result, SchemaError};
use url::Url;

pub const DEFAULT_PAGE_SIZE: usize = 20;

const PAGE_PARAM: &str = "page";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based.
    pub number: u64,
}

impl PageInfo {
    /// Works out which page a response is from its cursors. The paginator drops
    /// the `page` parameter from the link to page 1, so a `previous` cursor
    /// without one means this is page 2.
    pub fn from_response<T>(response: &PaginatedResponse<T>) -> Result<Self> {
        if let Some(previous) = &response.previous {
            let prev = page_of(previous)?.unwrap_or(1);
            return prev
                .checked_add(1)
                .map(|number| Self { number })
                .ok_or_else(|| invalid_cursor(previous, "page number out of range".to_string()));
        }
        if let Some(next) = &response.next {
            return match page_of(next)? {
                Some(n) if n >= 2 => Ok(Self { number: n - 1 }),
                _ => Err(SchemaError::InvalidCursor {
                    cursor: next.clone(),
                    reason: "next cursor must point at page 2 or later".to_string(),
                }),
            };
        }
        Ok(Self { number: 1 })
    }
}

/// Page number carried by a cursor, `None` when the cursor has no `page`
/// parameter. Relative cursors are accepted.
pub fn page_of(cursor: &str) -> Result<Option<u64>> {
    let url = match Url::parse(cursor) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost/")
            .and_then(|base| base.join(cursor))
            .map_err(|e| invalid_cursor(cursor, e.to_string()))?,
        Err(e) => return Err(invalid_cursor(cursor, e.to_string())),
    };

    let Some((_, raw)) = url.query_pairs().find(|(key, _)| key == PAGE_PARAM) else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(n) if n >= 1 => Ok(Some(n)),
        _ => Err(invalid_cursor(cursor, format!("page '{}' is not a positive integer", raw))),
    }
}

fn invalid_cursor(cursor: &str, reason: String) -> SchemaError {
    SchemaError::InvalidCursor {
        cursor: cursor.to_string(),
        reason,
    }
}

/// Number of results page `page` must hold when `count` items are split into
/// pages of `page_size`.
pub fn expected_len(count: u64, page: u64, page_size: u64) -> u64 {
    let offset = page.saturating_sub(1).saturating_mul(page_size);
    page_size.min(count.saturating_sub(offset))
}

pub fn check_page_consistency<T>(
    response: &PaginatedResponse<T>,
    page_size: usize,
    report: &mut ContractReport,
) {
    const ENTITY: &str = "page";

    let info = match PageInfo::from_response(response) {
        Ok(info) => info,
        Err(e) => {
            report.record(ENTITY, None, "next/previous", e.to_string());
            return;
        }
    };
    let page = info.number;
    let page_size = page_size as u64;
    let actual = response.results.len() as u64;

    let expected = expected_len(response.count, page, page_size);
    if actual != expected {
        report.record(
            ENTITY,
            None,
            "results",
            format!(
                "page {} of {} item(s) at {} per page should hold {} result(s), found {}",
                page, response.count, page_size, expected, actual
            ),
        );
    }

    let expect_next = page.saturating_mul(page_size) < response.count;
    if response.has_next() != expect_next {
        report.record(
            ENTITY,
            None,
            "next",
            if expect_next {
                format!("page {} is not the last page but has no next cursor", page)
            } else {
                format!("page {} is the last page but has a next cursor", page)
            },
        );
    }

    if let Some(next) = &response.next {
        if let Ok(Some(n)) = page_of(next) {
            if Some(n) != page.checked_add(1) {
                report.record(
                    ENTITY,
                    None,
                    "next",
                    format!("next cursor points at page {} from page {}", n, page),
                );
            }
        }
    }

    if response.has_previous() != (page > 1) {
        report.record(
            ENTITY,
            None,
            "previous",
            if page > 1 {
                format!("page {} has no previous cursor", page)
            } else {
                "previous cursor present on page 1".to_string()
            },
        );
    }
}
