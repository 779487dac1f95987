//! The single-page dashboard served at `/`.

/// HTML with inline script; talks to the `/v1` endpoints.
pub const DASHBOARD_PAGE: &str = include_str!("../../assets/dashboard.html");
