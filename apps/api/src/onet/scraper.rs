//! Public-page scraper for O*NET OnLine.
//!
//! Best effort: extraction is a handful of regular expressions over markup we
//! do not control. A detail page with no recognizable section fails with
//! `MarkupChanged` rather than producing an empty record.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, warn};

use crate::models::occupation::{Occupation, OccupationDetail, Section, MAX_ITEMS};
use crate::onet::{DirectoryError, OccupationDirectory};

pub const USER_AGENT: &str = "WorkplaceSkillsCoach/1.0 (educational tool)";

/// Bytes of markup examined after a section heading.
const SECTION_WINDOW: usize = 5000;
const TITLE_SUFFIX: &str = " - O*NET OnLine";

static RE_RESULT_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"/link/summary/([\d-]+\.\d+)"[^>]*>([^<]+)"#).unwrap());
static RE_H1_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<h1[^>]*class="title"[^>]*>([^<]+)<"#).unwrap());
static RE_DOC_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<title>([^<]+)<").unwrap());
static RE_LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<li[^>]*>(.*?)</li>").unwrap());
static RE_REPORT_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)class="[^"]*report2[^"]*"[^>]*>([^<]+)"#).unwrap());
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_HEADINGS: Lazy<Vec<(Section, Regex)>> = Lazy::new(|| {
    Section::ALL
        .iter()
        .map(|s| {
            let pattern = format!(r"(?i)>\s*{}\s*</", regex::escape(s.heading()));
            (*s, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Scrapes `www.onetonline.org` search results and occupation summary pages.
pub struct OnetSiteScraper {
    client: Client,
    base_url: String,
}

impl OnetSiteScraper {
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_page(&self, url: &str, query: &[(&str, &str)]) -> Result<String, DirectoryError> {
        let mut request = self.client.get(url).header("User-Agent", USER_AGENT);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl OccupationDirectory for OnetSiteScraper {
    async fn search(&self, keyword: &str) -> Result<Vec<Occupation>, DirectoryError> {
        let url = format!("{}/find/result", self.base_url);
        let html = self.fetch_page(&url, &[("s", keyword), ("a", "1")]).await?;
        let occupations = parse_search_results(&html);
        if occupations.is_empty() {
            debug!("No occupation links found on results page for {keyword:?}");
        }
        Ok(occupations)
    }

    async fn details(&self, code: &str) -> Result<OccupationDetail, DirectoryError> {
        let url = format!("{}/link/summary/{}", self.base_url, code);
        let html = self.fetch_page(&url, &[]).await?;
        let detail = parse_occupation_page(&html, code);

        if detail.is_blank() {
            warn!("Summary page for {code} had no recognizable sections");
            return Err(DirectoryError::MarkupChanged(format!(
                "no sections found on summary page for {code}"
            )));
        }

        Ok(detail)
    }
}

/// Extracts `(code, title)` pairs from summary links on a results page,
/// deduplicated by code and capped at `MAX_ITEMS`.
pub fn parse_search_results(html: &str) -> Vec<Occupation> {
    let mut occupations: Vec<Occupation> = Vec::new();

    for caps in RE_RESULT_LINK.captures_iter(html) {
        if occupations.len() >= MAX_ITEMS {
            break;
        }
        let code = &caps[1];
        let title = caps[2].trim();
        if title.is_empty() || occupations.iter().any(|o| o.code == code) {
            continue;
        }
        occupations.push(Occupation {
            code: code.to_string(),
            title: title.to_string(),
        });
    }

    occupations
}

/// Builds an `OccupationDetail` from an occupation summary page.
pub fn parse_occupation_page(html: &str, code: &str) -> OccupationDetail {
    let title = RE_H1_TITLE
        .captures(html)
        .or_else(|| RE_DOC_TITLE.captures(html))
        .map(|caps| caps[1].replace(TITLE_SUFFIX, "").trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| code.to_string());

    let mut detail = OccupationDetail::new(code, title);
    for (section, heading) in RE_HEADINGS.iter() {
        detail.set_section(*section, extract_section(html, heading));
    }
    detail
}

/// Collects up to `MAX_ITEMS` entries from the markup following a heading:
/// `<li>` texts first, report cells if there are none.
fn extract_section(html: &str, heading: &Regex) -> Vec<String> {
    let Some(found) = heading.find(html) else {
        return Vec::new();
    };
    let chunk = window(html, found.start(), SECTION_WINDOW);

    let items: Vec<String> = RE_LIST_ITEM
        .captures_iter(chunk)
        .map(|caps| RE_TAG.replace_all(&caps[1], "").trim().to_string())
        .filter(|text| is_plausible_item(text))
        .take(MAX_ITEMS)
        .collect();

    if !items.is_empty() {
        return items;
    }

    RE_REPORT_CELL
        .captures_iter(chunk)
        .map(|caps| caps[1].trim().to_string())
        .filter(|text| is_plausible_item(text))
        .take(MAX_ITEMS)
        .collect()
}

fn is_plausible_item(text: &str) -> bool {
    let len = text.chars().count();
    len > 5 && len < 300
}

/// Up to `len` bytes of `text` from `start`, shortened to a char boundary.
fn window(text: &str, start: usize, len: usize) -> &str {
    let mut end = (start + len).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{extract::Query, http::StatusCode, routing::get, Router};
    use std::collections::HashMap;

    use crate::test_support::serve;

    const RESULTS_PAGE: &str = r#"
        <table>
          <tr><td><a href="/link/summary/41-2011.00" class="link">Cashiers</a></td></tr>
          <tr><td><a href="/link/summary/41-2011.00">Cashiers</a></td></tr>
          <tr><td><a href="https://www.onetonline.org/link/summary/43-3041.00" target="_top">Gambling Cage Workers</a></td></tr>
          <tr><td><a href="/link/summary/41-2021.00">  Counter and Rental Clerks </a></td></tr>
          <tr><td><a href="/find/quick?s=cashier">Not an occupation</a></td></tr>
        </table>"#;

    /// Summary page with sections spaced further apart than the scan window.
    fn summary_page() -> String {
        let pad = " ".repeat(SECTION_WINDOW);
        format!(
            r#"<html><head><title>41-2011.00 - Cashiers - O*NET OnLine</title></head>
        <body>
          <h1 class="title">Cashiers</h1>
          <h2 class="report">Tasks</h2>
          <ul>
            <li>Receive payment by cash, check, credit cards, vouchers, or automatic debits.</li>
            <li>Issue receipts, refunds, credits, or change due to customers.</li>
            <li>OK</li>
            <li class="more">Greet customers entering establishments <b>promptly</b>.</li>
          </ul>{pad}
          <h2>Technology Skills</h2>
          <ul><li><b>Point of sale POS software</b> — Cash register software</li></ul>{pad}
          <h2>Work Styles</h2>
          <table>
            <tr><td class="report2">Dependability</td></tr>
            <tr><td class="report2 wide">Attention to Detail</td></tr>
          </table>
        </body></html>"#
        )
    }

    #[test]
    fn test_search_results_are_deduplicated_and_trimmed() {
        let results = parse_search_results(RESULTS_PAGE);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].code, "41-2011.00");
        assert_eq!(results[0].title, "Cashiers");
        assert_eq!(results[1].code, "43-3041.00");
        assert_eq!(results[2].title, "Counter and Rental Clerks");
    }

    #[test]
    fn test_search_results_capped_at_max_items() {
        let page: String = (0..30)
            .map(|i| format!(r#"<a href="/link/summary/11-{i:04}.00">Occupation {i}</a>"#))
            .collect();
        assert_eq!(parse_search_results(&page).len(), MAX_ITEMS);
    }

    #[test]
    fn test_summary_page_title_and_list_items() {
        let detail = parse_occupation_page(&summary_page(), "41-2011.00");

        assert_eq!(detail.title, "Cashiers");
        assert_eq!(detail.code, "41-2011.00");
        assert_eq!(detail.tasks.len(), 3, "short items are filtered: {:?}", detail.tasks);
        assert_eq!(
            detail.tasks[2],
            "Greet customers entering establishments promptly."
        );
        assert_eq!(
            detail.technology_skills,
            vec!["Point of sale POS software — Cash register software"]
        );
    }

    #[test]
    fn test_report_cells_used_when_no_list_items() {
        let detail = parse_occupation_page(&summary_page(), "41-2011.00");
        assert_eq!(
            detail.work_styles,
            vec!["Dependability", "Attention to Detail"]
        );
    }

    #[test]
    fn test_missing_sections_are_empty_and_title_falls_back() {
        let html = "<html><head><title>Cashiers - O*NET OnLine</title></head></html>";
        let detail = parse_occupation_page(html, "41-2011.00");
        assert_eq!(detail.title, "Cashiers");
        assert!(detail.is_blank());

        let detail = parse_occupation_page("<html></html>", "41-2011.00");
        assert_eq!(detail.title, "41-2011.00");
    }

    #[test]
    fn test_section_window_limits_how_far_items_are_read() {
        let filler = "x".repeat(SECTION_WINDOW);
        let html = format!("<h2>Knowledge</h2>{filler}<ul><li>Customer and Personal Service</li></ul>");
        let detail = parse_occupation_page(&html, "41-2011.00");
        assert!(detail.knowledge.is_empty());
    }

    #[test]
    fn test_window_respects_char_boundaries() {
        let text = "ab€cd";
        assert_eq!(window(text, 0, 3), "ab");
        assert_eq!(window(text, 2, 100), "€cd");
    }

    #[tokio::test]
    async fn test_scraper_search_sends_user_agent_and_query() {
        let app = Router::new().route(
            "/find/result",
            get(
                |headers: axum::http::HeaderMap,
                 Query(params): Query<HashMap<String, String>>| async move {
                    assert_eq!(headers["user-agent"], USER_AGENT);
                    assert_eq!(params["s"], "cashier");
                    assert_eq!(params["a"], "1");
                    RESULTS_PAGE
                },
            ),
        );
        let scraper = OnetSiteScraper::new(Client::new(), serve(app).await);

        let results = scraper.search("cashier").await.unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_scraper_details_fails_loudly_on_unrecognized_markup() {
        let app = Router::new().route(
            "/link/summary/:code",
            get(|| async { "<html><body>Site redesigned</body></html>" }),
        );
        let scraper = OnetSiteScraper::new(Client::new(), serve(app).await);

        let result = scraper.details("41-2011.00").await;
        assert!(matches!(result, Err(DirectoryError::MarkupChanged(_))));
    }

    #[tokio::test]
    async fn test_scraper_details_non_success_status() {
        let app = Router::new().route(
            "/link/summary/:code",
            get(|| async { (StatusCode::NOT_FOUND, "missing") }),
        );
        let scraper = OnetSiteScraper::new(Client::new(), serve(app).await);

        let result = scraper.details("99-9999.00").await;
        assert!(matches!(result, Err(DirectoryError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_scraper_details_parses_page() {
        let app = Router::new().route("/link/summary/:code", get(|| async { summary_page() }));
        let scraper = OnetSiteScraper::new(Client::new(), serve(app).await);

        let detail = scraper.details("41-2011.00").await.unwrap();
        assert_eq!(detail.title, "Cashiers");
        assert!(!detail.tasks.is_empty());
    }
}
