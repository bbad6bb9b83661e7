use crate::domain::PaginationState;
use crate::error::DomainError;
use crate::query::PAGE_SIZE;

/// Parse the raw `page` parameter. Missing or empty means page 1.
pub fn parse_page(raw: Option<&str>) -> Result<u64, DomainError> {
    let raw = match raw {
        None => return Ok(1),
        Some(raw) if raw.trim().is_empty() => return Ok(1),
        Some(raw) => raw,
    };

    let page: u64 = raw
        .parse()
        .map_err(|_| DomainError::validation(format!("invalid page number: {raw:?}")))?;
    if page < 1 {
        return Err(DomainError::validation("page number must be at least 1"));
    }
    page_offset(page)?;
    Ok(page)
}

/// Row offset of `page`, rejecting pages whose offset does not fit a `BIGINT`.
pub fn page_offset(page: u64) -> Result<i64, DomainError> {
    page.checked_sub(1)
        .and_then(|p| p.checked_mul(PAGE_SIZE))
        .and_then(|offset| i64::try_from(offset).ok())
        .ok_or_else(|| DomainError::validation("page number out of range"))
}

/// Link to `page`: every existing `page=` parameter is rewritten, or one is
/// appended; all other parameters keep their order.
pub fn page_url(page: u64, base_path: &str, query: &str) -> String {
    let mut params: Vec<String> = if query.is_empty() {
        Vec::new()
    } else {
        query.split('&').map(str::to_string).collect()
    };

    let mut found = false;
    for param in params.iter_mut().filter(|p| p.starts_with("page=")) {
        *param = format!("page={page}");
        found = true;
    }
    if !found {
        params.push(format!("page={page}"));
    }

    format!("{base_path}?{}", params.join("&"))
}

/// Last page number used for navigation.
///
/// A total that is not a multiple of the page size is bumped by a full page
/// before dividing, so such feeds link one page past the final full page.
/// Navigation depends on this exact value.
pub fn last_page(total: u64) -> u64 {
    rounded_total(total) / PAGE_SIZE
}

/// True iff `page` is not the last page and the feed is not empty.
pub fn has_more(page: u64, total: u64) -> bool {
    let rounded = rounded_total(total);
    page != rounded / PAGE_SIZE && rounded != 0
}

fn rounded_total(total: u64) -> u64 {
    if total % PAGE_SIZE != 0 {
        total.saturating_add(PAGE_SIZE)
    } else {
        total
    }
}

/// Navigation state for `page` of a feed holding `total` posts.
pub fn pagination_state(page: u64, total: u64, base_path: &str, query: &str) -> PaginationState {
    let previous = (page > 1).then(|| page_url(page - 1, base_path, query));

    PaginationState {
        current: page,
        previous,
        next: page_url(page.saturating_add(1), base_path, query),
        last: page_url(last_page(total), base_path, query),
        has_more: has_more(page, total),
    }
}
