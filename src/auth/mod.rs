//! Cookie-store support for citation-index queries.
//!
//! The index throttles anonymous traffic aggressively; supplying a cookie
//! file from a logged-in browser session keeps queries flowing. Only the
//! Netscape cookie file format is supported.

mod cookies;

pub use cookies::{CookieError, CookieLine, ParsedCookies, load_cookie_jar, parse_netscape_cookies};
