//! Pagination constants for the post listing endpoint.

/// Default page number when not specified in the request.
pub const DEFAULT_PAGE: i64 = 0;

/// Default number of posts per page when not specified in the request.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Extra posts skipped for every page after the first.
pub const FIRST_PAGE_SPAN: i64 = 10;
