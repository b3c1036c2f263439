use serde::{Deserialize, Serialize};

use crate::shared::pagination::{PaginatedResult, PaginationParams};

/// Standard list envelope: total count plus relative next/previous
/// page links.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Builds the envelope for a request; `query` is the raw query
    /// string of that request, so filter parameters survive into the
    /// next/previous links.
    pub fn from_result(path: &str, query: Option<&str>, result: PaginatedResult<T>) -> Self {
        let next =
            (result.page < result.total_pages).then(|| page_link(path, query, result.page + 1));
        let previous = (result.page > 1).then(|| page_link(path, query, result.page - 1));

        Self {
            count: result.total_count,
            next,
            previous,
            results: result.items,
        }
    }
}

fn page_link(path: &str, query: Option<&str>, page: u32) -> String {
    let mut params: Vec<String> = query
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("page="))
        .map(str::to_string)
        .collect();
    params.push(format!("page={}", page));
    format!("{}?{}", path, params.join("&"))
}

/// Page selection as it arrives in the query string.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<PageQuery> for PaginationParams {
    fn from(query: PageQuery) -> Self {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: query.page.unwrap_or(defaults.page),
            page_size: query.page_size.unwrap_or(defaults.page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_page_links_both_ways() {
        let params = PaginationParams::new(2, 10);
        let result = PaginatedResult::new(vec![1, 2], 30, &params);
        let page = Page::from_result("/restaurants/", Some("page=2&page_size=10"), result);

        assert_eq!(page.count, 30);
        assert_eq!(
            page.next.as_deref(),
            Some("/restaurants/?page_size=10&page=3")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("/restaurants/?page_size=10&page=1")
        );
    }

    #[test]
    fn single_page_has_no_links() {
        let params = PaginationParams::default();
        let result = PaginatedResult::new(vec![1], 1, &params);
        let page = Page::from_result("/restaurants/", None, result);

        assert!(page.next.is_none());
        assert!(page.previous.is_none());
    }

    #[test]
    fn filter_parameters_survive_into_links() {
        let params = PaginationParams::new(2, 10);
        let result = PaginatedResult::new(vec![1], 30, &params);
        let page = Page::from_result(
            "/restaurants/",
            Some("vegan=true&min_rating=4&page=2&page_size=10"),
            result,
        );

        assert_eq!(
            page.next.as_deref(),
            Some("/restaurants/?vegan=true&min_rating=4&page_size=10&page=3")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("/restaurants/?vegan=true&min_rating=4&page_size=10&page=1")
        );
    }

    #[test]
    fn bare_request_links_carry_only_the_page() {
        let params = PaginationParams::new(1, 20);
        let result = PaginatedResult::new(vec![1], 50, &params);
        let page = Page::from_result("/restaurants/", None, result);

        assert_eq!(page.next.as_deref(), Some("/restaurants/?page=2"));
        assert!(page.previous.is_none());
    }

    #[test]
    fn page_query_falls_back_to_defaults() {
        let params: PaginationParams = PageQuery::default().into();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 20);
    }
}
