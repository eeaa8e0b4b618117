//! Page requests for GitHub list endpoints.
//!
//! GitHub list endpoints are 1-based and accept at most 100 items per page.
//! [`PageRequest`] carries a validated page position and advances through the
//! result set one page at a time.

use super::error::FetchError;

/// Largest page size GitHub accepts for list endpoints.
pub const MAX_PER_PAGE: u8 = 100;

/// A single page position in a paginated listing.
///
/// # Example
///
/// ```
/// use threadlink::github::pagination::PageRequest;
///
/// let first = PageRequest::first();
/// assert_eq!(first.page(), 1);
/// assert_eq!(first.per_page(), 100);
/// assert_eq!(first.next().page(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Current page number (1-based).
    page: u32,
    /// Items per page.
    per_page: u8,
}

impl PageRequest {
    /// Creates a page request after validating both parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidPagination`] when `page` or `per_page` is
    /// zero, or when `per_page` exceeds [`MAX_PER_PAGE`].
    pub fn new(page: u32, per_page: u8) -> Result<Self, FetchError> {
        if page == 0 {
            return Err(FetchError::InvalidPagination {
                message: "page must be at least 1".to_owned(),
            });
        }

        if per_page == 0 {
            return Err(FetchError::InvalidPagination {
                message: "per_page must be at least 1".to_owned(),
            });
        }

        if per_page > MAX_PER_PAGE {
            return Err(FetchError::InvalidPagination {
                message: format!("per_page must not exceed {MAX_PER_PAGE}"),
            });
        }

        Ok(Self { page, per_page })
    }

    /// The first page at the maximum page size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            per_page: MAX_PER_PAGE,
        }
    }

    /// The page following this one, at the same page size.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            per_page: self.per_page,
        }
    }

    /// Returns the current page number (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Query string understood by GitHub list endpoints.
    pub(crate) fn query(&self) -> String {
        format!("page={}&per_page={}", self.page, self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{MAX_PER_PAGE, PageRequest};
    use crate::github::error::FetchError;

    #[rstest]
    #[case::zero_page(0, 30)]
    #[case::zero_per_page(1, 0)]
    #[case::per_page_over_maximum(1, 101)]
    fn rejects_invalid_parameters(#[case] page: u32, #[case] per_page: u8) {
        let result = PageRequest::new(page, per_page);
        assert!(
            matches!(result, Err(FetchError::InvalidPagination { .. })),
            "expected InvalidPagination, got {result:?}"
        );
    }

    #[rstest]
    fn accepts_maximum_page_size() {
        let request = PageRequest::new(3, MAX_PER_PAGE).expect("100 per page is allowed");
        assert_eq!(request.query(), "page=3&per_page=100");
    }

    #[rstest]
    fn next_keeps_page_size() {
        let request = PageRequest::new(1, 25).expect("valid request");
        let next = request.next();
        assert_eq!(next.page(), 2);
        assert_eq!(next.per_page(), 25);
    }
}
