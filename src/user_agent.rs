//! Shared User-Agent string for citation-index HTTP traffic.
//!
//! Single source for project URL and UA format so query traffic stays
//! consistent and easy to update (good citizenship; RFC 9308).

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/hinnefe2/bibcheck";

/// Default User-Agent for citation-index queries (identifies the tool).
#[must_use]
pub(crate) fn default_query_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("bibcheck/{version} (academic-research-tool; +{PROJECT_UA_URL})")
}
