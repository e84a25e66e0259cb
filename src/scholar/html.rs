//! Result-page extraction for the citation index.
//!
//! The index answers queries with HTML. Each result lives in a `div` carrying
//! a `data-cid` attribute; the title sits in a `gs_rt` heading, the numeric
//! cluster identifier appears in `cluster=`/`cites=` links, and the citation
//! count in the "Cited by N" link. A bot-challenge page contains none of
//! these blocks and therefore parses as an empty hit list — the pipeline's
//! systemic-failure guard catches that case.

use std::sync::LazyLock;

use regex::Regex;

use super::SearchHit;

#[allow(clippy::expect_used)]
static RESULT_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<div[^>]*\bdata-cid="([^"]*)""#).expect("result start regex is valid")
});
#[allow(clippy::expect_used)]
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<h3[^>]*class="[^"]*gs_rt[^"]*"[^>]*>(.*?)</h3>"#)
        .expect("title regex is valid")
});
#[allow(clippy::expect_used)]
static CLUSTER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:cluster|cites)=(\d+)").expect("cluster id regex is valid"));
#[allow(clippy::expect_used)]
static CITED_BY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Cited by\s+(\d+)").expect("cited-by regex is valid"));
#[allow(clippy::expect_used)]
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex is valid"));
#[allow(clippy::expect_used)]
static FORMAT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[[^\]]+\]\s*").expect("format marker regex is valid")
});

/// Parses a result page into hits, in page order.
///
/// Result blocks without a recognizable title are dropped.
#[must_use]
pub fn parse_results(html: &str) -> Vec<SearchHit> {
    let starts: Vec<usize> = RESULT_START_RE
        .find_iter(html)
        .map(|m| m.start())
        .collect();

    let mut hits = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(html.len());
        let block = &html[start..end];

        let Some(title) = extract_title(block) else {
            continue;
        };
        // Prefer the numeric id from cluster=/cites= links; it is the one the
        // cited-by query shape accepts. Fall back to the data-cid attribute.
        let cluster_id = CLUSTER_ID_RE
            .captures(block)
            .map(|caps| caps[1].to_string())
            .or_else(|| {
                RESULT_START_RE
                    .captures(block)
                    .map(|caps| caps[1].to_string())
                    .filter(|cid| !cid.is_empty())
            });
        let num_citations = CITED_BY_RE
            .captures(block)
            .and_then(|caps| caps[1].parse::<usize>().ok())
            .unwrap_or(0);

        hits.push(SearchHit {
            cluster_id,
            title,
            num_citations,
        });
    }

    hits
}

/// Pulls the result title out of a block: heading contents with tags
/// stripped, the leading `[PDF]`-style format marker removed, entities
/// decoded, and whitespace collapsed.
fn extract_title(block: &str) -> Option<String> {
    let raw = TITLE_RE.captures(block)?.get(1)?.as_str();
    let stripped = TAG_RE.replace_all(raw, "");
    let unmarked = FORMAT_MARKER_RE.replace(&stripped, "");
    let decoded = decode_entities(&unmarked);
    let title = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() { None } else { Some(title) }
}

/// Decodes the handful of HTML entities the result pages actually emit.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn result_block(cid: &str, title_html: &str, footer: &str) -> String {
        format!(
            r#"<div class="gs_r gs_or gs_scl" data-cid="{cid}">
  <div class="gs_ri">
    <h3 class="gs_rt"><a href="/example">{title_html}</a></h3>
    <div class="gs_a">A Author - Journal, 2020</div>
    <div class="gs_fl">{footer}</div>
  </div>
</div>"#
        )
    }

    #[test]
    fn test_parse_results_extracts_id_title_and_count() {
        let html = result_block(
            "AbCd123",
            "A Great Paper",
            r#"<a href="/scholar?cites=111222333&hl=en">Cited by 42</a>"#,
        );
        let hits = parse_results(&html);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].cluster_id.as_deref(), Some("111222333"));
        assert_eq!(hits[0].title, "A Great Paper");
        assert_eq!(hits[0].num_citations, 42);
    }

    #[test]
    fn test_parse_results_multiple_blocks_in_page_order() {
        let html = format!(
            "{}{}",
            result_block(
                "c1",
                "First",
                r#"<a href="/scholar?cites=1&hl=en">Cited by 5</a>"#
            ),
            result_block(
                "c2",
                "Second",
                r#"<a href="/scholar?cites=2&hl=en">Cited by 9</a>"#
            ),
        );
        let hits = parse_results(&html);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "First");
        assert_eq!(hits[1].title, "Second");
        assert_eq!(hits[1].cluster_id.as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_results_no_cited_by_link_means_zero_citations() {
        let html = result_block("c1", "Uncited Paper", "");
        let hits = parse_results(&html);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].num_citations, 0);
        // data-cid fallback when no cluster=/cites= link exists
        assert_eq!(hits[0].cluster_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_parse_results_cluster_link_preferred_over_data_cid() {
        let html = result_block(
            "attr-cid",
            "Paper",
            r#"<a href="/scholar?cluster=987654&hl=en">All 3 versions</a>"#,
        );
        let hits = parse_results(&html);
        assert_eq!(hits[0].cluster_id.as_deref(), Some("987654"));
    }

    #[test]
    fn test_parse_results_title_markup_and_entities_cleaned() {
        let html = result_block(
            "c1",
            r#"<span class="gs_ctg2">[PDF]</span> Models &amp; methods for <b>search</b>"#,
            "",
        );
        let hits = parse_results(&html);
        assert_eq!(hits[0].title, "Models & methods for search");
    }

    #[test]
    fn test_parse_results_block_without_title_dropped() {
        let html = r#"<div data-cid="c1"><div class="gs_ri">no heading here</div></div>"#;
        assert!(parse_results(html).is_empty());
    }

    #[test]
    fn test_parse_results_captcha_page_yields_no_hits() {
        let html = r#"<html><body><form id="gs_captcha_f">
          Please show you're not a robot</form></body></html>"#;
        assert!(parse_results(html).is_empty());
    }

    #[test]
    fn test_parse_results_empty_input() {
        assert!(parse_results("").is_empty());
    }
}
