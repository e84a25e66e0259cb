//! Netscape cookie file parser and reqwest jar loader.
//!
//! Parses the Netscape HTTP cookie file format (7 TAB-separated fields per
//! line) and loads cookies into a `reqwest::cookie::Jar` for use with the
//! HTTP client.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use reqwest::cookie::Jar;
use tracing::{debug, warn};

/// A single parsed cookie from a Netscape-format cookie file.
///
/// The value field is intentionally redacted in Debug output to prevent
/// accidental logging of sensitive cookie data.
#[derive(Clone)]
pub struct CookieLine {
    /// The domain the cookie belongs to (e.g., `.example.com`).
    pub domain: String,
    /// Whether subdomains should match.
    pub tailmatch: bool,
    /// The URL path scope for the cookie.
    pub path: String,
    /// Whether the cookie should only be sent over HTTPS.
    pub secure: bool,
    /// Unix timestamp for expiry (0 = session cookie).
    pub expires: u64,
    /// Cookie name.
    pub name: String,
    /// Cookie value (sensitive — never log).
    value: String,
}

impl CookieLine {
    /// Returns the cookie value.
    ///
    /// Cookie values are sensitive — avoid logging the return value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

// Custom Debug impl that redacts the cookie value.
impl fmt::Debug for CookieLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieLine")
            .field("domain", &self.domain)
            .field("tailmatch", &self.tailmatch)
            .field("path", &self.path)
            .field("secure", &self.secure)
            .field("expires", &self.expires)
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Errors that can occur while loading a cookie file.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// A line in the cookie file has an invalid format.
    #[error("line {line_number}: {reason} (got: {content})")]
    InvalidLine {
        /// 1-based line number in the cookie file.
        line_number: usize,
        /// The offending line content (value redacted).
        content: String,
        /// Description of what was wrong.
        reason: String,
    },

    /// I/O error reading the cookie file.
    #[error("failed to read cookie file: {0}")]
    Io(#[from] std::io::Error),

    /// No valid cookies found in a non-empty file.
    #[error("no valid cookies found in file ({malformed_count} lines failed to parse)")]
    NoCookiesFound {
        /// Number of malformed lines encountered.
        malformed_count: usize,
    },
}

/// Result of parsing a cookie file, including successfully parsed cookies
/// and any warnings about malformed lines.
#[derive(Debug)]
pub struct ParsedCookies {
    /// Successfully parsed cookies.
    pub cookies: Vec<CookieLine>,
    /// Warnings for malformed lines (line number and reason).
    pub warnings: Vec<(usize, String)>,
}

/// Loads a Netscape-format cookie file into a `reqwest` cookie jar.
///
/// Malformed lines are skipped with a warning; the whole load fails only when
/// the file cannot be read or a non-empty file yields zero valid cookies.
///
/// # Errors
///
/// Returns [`CookieError::Io`] on read failure, or
/// [`CookieError::NoCookiesFound`] when nothing usable was parsed.
pub fn load_cookie_jar(path: &Path) -> Result<Arc<Jar>, CookieError> {
    let reader = BufReader::new(File::open(path)?);
    let parsed = parse_netscape_cookies(reader)?;

    for (line_number, reason) in &parsed.warnings {
        warn!(line = line_number, %reason, "skipping malformed cookie line");
    }

    let jar = Arc::new(Jar::default());
    for cookie in &parsed.cookies {
        let set_cookie = build_set_cookie_string(cookie);
        let origin = format!("https://{}/", cookie.domain.trim_start_matches('.'));
        if let Ok(url) = origin.parse::<reqwest::Url>() {
            jar.add_cookie_str(&set_cookie, &url);
            debug!(domain = %cookie.domain, name = %cookie.name, "loaded cookie into jar");
        } else {
            warn!(
                domain = %cookie.domain,
                name = %cookie.name,
                "skipping cookie with unparseable domain"
            );
        }
    }

    Ok(jar)
}

/// Parses a Netscape-format cookie file from a buffered reader.
///
/// Each non-comment, non-blank line must contain exactly 7 TAB-separated
/// fields: `domain`, `tailmatch`, `path`, `secure`, `expires`, `name`,
/// `value`. Lines starting with `#` and blank lines are skipped.
///
/// # Errors
///
/// Returns [`CookieError::Io`] on read failure, or
/// [`CookieError::NoCookiesFound`] when a non-empty file yields zero valid
/// cookies. Individual malformed lines are collected as warnings.
pub fn parse_netscape_cookies(reader: impl BufRead) -> Result<ParsedCookies, CookieError> {
    let mut cookies = Vec::new();
    let mut warnings = Vec::new();
    let mut non_blank_lines = 0;

    for (idx, line_result) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line_result?;
        // Handle CRLF: strip trailing \r
        let line = line.trim_end();

        if line.is_empty() {
            continue;
        }

        // Skip comment lines (including the optional Netscape header)
        if line.starts_with('#') {
            continue;
        }

        non_blank_lines += 1;

        match parse_cookie_line(line, line_number) {
            Ok(cookie) => cookies.push(cookie),
            Err(e) => warnings.push((line_number, e.to_string())),
        }
    }

    // Non-blank data lines but no cookies parsed is an error
    if cookies.is_empty() && non_blank_lines > 0 {
        return Err(CookieError::NoCookiesFound {
            malformed_count: warnings.len(),
        });
    }

    Ok(ParsedCookies { cookies, warnings })
}

/// Parses a single cookie line into a `CookieLine`.
fn parse_cookie_line(line: &str, line_number: usize) -> Result<CookieLine, CookieError> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() != 7 {
        return Err(CookieError::InvalidLine {
            line_number,
            content: redact_line_for_error(line),
            reason: format!("expected 7 TAB-separated fields, found {}", fields.len()),
        });
    }

    let domain = fields[0].to_string();
    let tailmatch = parse_bool_field(fields[1], "tailmatch", line_number, line)?;
    let path = fields[2].to_string();
    let secure = parse_bool_field(fields[3], "secure", line_number, line)?;

    let expires = fields[4]
        .parse::<u64>()
        .map_err(|_| CookieError::InvalidLine {
            line_number,
            content: redact_line_for_error(line),
            reason: format!(
                "expires field must be a non-negative integer, got '{}'",
                fields[4]
            ),
        })?;

    let name = fields[5].to_string();
    let value = fields[6].to_string();

    if domain.is_empty() {
        return Err(CookieError::InvalidLine {
            line_number,
            content: redact_line_for_error(line),
            reason: "domain field is empty".to_string(),
        });
    }

    if name.is_empty() {
        return Err(CookieError::InvalidLine {
            line_number,
            content: redact_line_for_error(line),
            reason: "cookie name field is empty".to_string(),
        });
    }

    Ok(CookieLine {
        domain,
        tailmatch,
        path,
        secure,
        expires,
        name,
        value,
    })
}

/// Parses a `TRUE`/`FALSE` string field.
fn parse_bool_field(
    value: &str,
    field_name: &str,
    line_number: usize,
    line: &str,
) -> Result<bool, CookieError> {
    match value {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(CookieError::InvalidLine {
            line_number,
            content: redact_line_for_error(line),
            reason: format!("{field_name} field must be TRUE or FALSE, got '{value}'"),
        }),
    }
}

/// Redacts the cookie value (7th field) from a line for safe error messages.
fn redact_line_for_error(line: &str) -> String {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() >= 7 {
        let mut redacted = fields[..6].join("\t");
        redacted.push_str("\t[REDACTED]");
        redacted
    } else {
        // Not enough fields to identify value — show as-is (no value present)
        line.to_string()
    }
}

/// Builds a `Set-Cookie` header string from a `CookieLine`.
///
/// Expiry is deliberately omitted: the jar lives for one pipeline run only,
/// so session semantics are sufficient.
fn build_set_cookie_string(cookie: &CookieLine) -> String {
    let mut parts = vec![format!("{}={}", cookie.name, cookie.value())];
    parts.push(format!("Domain={}", cookie.domain));
    parts.push(format!("Path={}", cookie.path));
    if cookie.secure {
        parts.push("Secure".to_string());
    }
    parts.join("; ")
}
