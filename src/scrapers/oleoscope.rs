//! Oleoscope news listing scraper.
//!
//! Scrapes the news archive at [oleoscope.com/news](https://oleoscope.com/news)
//! and keeps the items published on one date.
//!
//! # Page layout
//!
//! Each news entry is a `div.archive-list__item` holding:
//!
//! | Field | Marker |
//! |-------|--------|
//! | date | `div.card-small__date`, `dd.mm.yyyy` |
//! | title | `a.card-small__title` |
//! | link | first `a` in the item |
//! | tags | `li` inside `a.card-small__tags` |
//!
//! # Known quirks
//!
//! Two behaviours are deliberately literal:
//!
//! - In [`ContentMode::LinkMarkup`] the content is searched for inside the
//!   item's href string, which never contains markup. Every on-date item is
//!   then dropped with a missing-node failure. [`ContentMode::ArticlePage`]
//!   downloads the article instead.
//! - Tags overwrite each other, so only the last `li` survives.
//!
//! Items are processed independently: a broken item becomes an
//! [`ItemFailure`] and the scan moves on.

use crate::config::{ContentMode, SourceConfig};
use crate::document::{Document, NodeQuery, attr, stripped_text};
use crate::error::{ItemError, NewsError, Result};
use crate::fetcher::{FetchOutcome, Fetcher, RequestParams};
use crate::models::{
    AUTHOR_FALLBACK, ExtractionReport, ItemFailure, NewsRecord, ScrapeOutcome,
};
use crate::notify::LogNotifier;
use crate::user_agent::RandomUserAgent;
use crate::utils::truncate_for_log;
use chrono::NaiveDate;
use itertools::{Either, Itertools};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const ITEM_CSS: &str = "div.archive-list__item";
pub const DATE_CSS: &str = "div.card-small__date";
pub const TITLE_CSS: &str = "a.card-small__title";
pub const LINK_CSS: &str = "a";
pub const TAGS_CSS: &str = "a.card-small__tags";
pub const TAG_CSS: &str = "li";
pub const CONTENT_CSS: &str = "div.details__content.content";

/// Listing dates look like `05.03.2024`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

static ITEM: Lazy<Selector> = Lazy::new(|| selector(ITEM_CSS));
static DATE: Lazy<Selector> = Lazy::new(|| selector(DATE_CSS));
static TITLE: Lazy<Selector> = Lazy::new(|| selector(TITLE_CSS));
static LINK: Lazy<Selector> = Lazy::new(|| selector(LINK_CSS));
static TAGS: Lazy<Selector> = Lazy::new(|| selector(TAGS_CSS));
static TAG: Lazy<Selector> = Lazy::new(|| selector(TAG_CSS));
static CONTENT: Lazy<Selector> = Lazy::new(|| selector(CONTENT_CSS));

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Everything a list item yields on its own, before content is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub index: usize,
    pub public_date: NaiveDate,
    pub title: String,
    pub source_url: String,
    pub external_id: String,
    pub tags: Vec<String>,
    pub author: String,
}

impl ListingEntry {
    fn into_record(self, source_name: &str, content: String) -> NewsRecord {
        NewsRecord {
            source_name: source_name.to_string(),
            source_url: self.source_url,
            title: self.title,
            public_date: self.public_date,
            content,
            tags: self.tags,
            author: self.author,
            external_id: self.external_id,
        }
    }
}

/// Entries of one listing page that matched the target date.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListingScan {
    pub entries: Vec<ListingEntry>,
    pub failures: Vec<ItemFailure>,
    pub items_seen: usize,
    pub off_date: usize,
}

/// Walk every list item of `markup` and keep those dated `target_date`.
///
/// Blank markup is the only error; anything wrong inside an item is recorded
/// in [`ListingScan::failures`].
pub fn scan_listing(markup: &str, target_date: NaiveDate) -> Result<ListingScan> {
    if markup.trim().is_empty() {
        return Err(NewsError::EmptyDocument);
    }

    let document = Document::parse(markup);
    let items = (&document).find_all(&ITEM);
    let mut scan = ListingScan {
        items_seen: items.len(),
        ..Default::default()
    };

    for (index, item) in items.iter().enumerate() {
        match extract_entry(index, item, target_date) {
            Ok(Some(entry)) => scan.entries.push(entry),
            Ok(None) => scan.off_date += 1,
            Err(error) => {
                warn!(
                    index,
                    error = %error,
                    item = %truncate_for_log(&item.html(), 300),
                    "Failed to extract news item; skipping"
                );
                scan.failures.push(ItemFailure { index, error });
            }
        }
    }

    debug!(
        items = scan.items_seen,
        matched = scan.entries.len(),
        off_date = scan.off_date,
        failed = scan.failures.len(),
        "Scanned listing"
    );
    Ok(scan)
}

/// `Ok(None)` means the item parsed but belongs to another day.
fn extract_entry(
    index: usize,
    item: &ElementRef<'_>,
    target_date: NaiveDate,
) -> std::result::Result<Option<ListingEntry>, ItemError> {
    let date_node = item
        .find_first(&DATE)
        .ok_or(ItemError::MissingNode(DATE_CSS))?;
    let public_date = parse_listing_date(&stripped_text(&date_node))?;
    if public_date != target_date {
        return Ok(None);
    }

    let title = item
        .find_first(&TITLE)
        .map(|node| stripped_text(&node))
        .ok_or(ItemError::MissingNode(TITLE_CSS))?;

    let link = item
        .find_first(&LINK)
        .ok_or(ItemError::MissingNode(LINK_CSS))?;
    let source_url = attr(&link, "href")
        .ok_or(ItemError::MissingAttribute {
            node: LINK_CSS,
            attr: "href",
        })?
        .to_string();

    Ok(Some(ListingEntry {
        index,
        public_date,
        title,
        external_id: external_id(&source_url),
        tags: parse_tags(item),
        author: parse_author(item),
        source_url,
    }))
}

/// Parse a listing date such as `05.03.2024` ([`DATE_FORMAT`]).
///
/// Surrounding whitespace is ignored; anything else that does not match is an
/// [`ItemError::BadDate`].
pub fn parse_listing_date(raw: &str) -> std::result::Result<NaiveDate, ItemError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| ItemError::BadDate {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Last `/`-delimited segment, e.g. `12345` for `https://oleoscope.com/news/12345`.
pub fn external_id(source_url: &str) -> String {
    source_url.rsplit('/').next().unwrap_or("").to_string()
}

/// Tags of one item. Each `li` replaces the previous value, so at most one
/// tag (the last) is returned.
pub fn parse_tags(item: &ElementRef<'_>) -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(block) = item.find_first(&TAGS) {
        for tag in block.find_all(&TAG) {
            tags = vec![stripped_text(&tag)];
        }
    }
    tags
}

/// Text of the first link under `node`, or [`AUTHOR_FALLBACK`].
pub fn parse_author(node: &ElementRef<'_>) -> String {
    node.find_first(&LINK)
        .map(|link| stripped_text(&link))
        .unwrap_or_else(|| AUTHOR_FALLBACK.to_string())
}

/// Content found in a markup fragment. In link-markup mode the fragment is
/// the href string itself.
pub fn content_from_markup(markup: &str) -> std::result::Result<String, ItemError> {
    find_content(&Document::parse_fragment(markup))
}

/// Content of a downloaded article page.
pub fn content_from_page(markup: &str) -> std::result::Result<String, ItemError> {
    find_content(&Document::parse(markup))
}

fn find_content(document: &Document) -> std::result::Result<String, ItemError> {
    document
        .find_first(&CONTENT)
        .map(|node| stripped_text(&node))
        .ok_or(ItemError::MissingNode(CONTENT_CSS))
}

fn unit_name() -> &'static str {
    std::any::type_name::<OleoscopeNews>()
        .rsplit("::")
        .next()
        .unwrap_or("OleoscopeNews")
}

/// Fetches the Oleoscope listing and turns it into [`NewsRecord`]s.
#[derive(Debug)]
pub struct OleoscopeNews {
    config: SourceConfig,
    listing_url: Url,
    fetcher: Fetcher,
}

impl OleoscopeNews {
    /// Build with a random user agent and a log-only notifier.
    pub fn new(config: SourceConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = Fetcher::new(
            config.timeout(),
            unit_name(),
            config.environment.clone(),
            Arc::new(RandomUserAgent::new(config.user_agents.clone())),
            Arc::new(LogNotifier),
        )?;
        Self::with_fetcher(config, fetcher)
    }

    /// Build around an existing [`Fetcher`], e.g. one with a fixed user agent.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::InvalidUrl`] if the configured listing URL does
    /// not parse.
    pub fn with_fetcher(config: SourceConfig, fetcher: Fetcher) -> Result<Self> {
        let listing_url = config.listing_url()?;
        Ok(Self {
            config,
            listing_url,
            fetcher,
        })
    }

    /// The configuration this scraper was built with.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Extract records from already fetched listing markup.
    ///
    /// Content is always taken from the href string here (link-markup mode),
    /// since no further requests are made.
    pub fn parse_news_page(&self, html: &str, target_date: NaiveDate) -> Result<ExtractionReport> {
        let scan = scan_listing(html, target_date)?;
        Ok(self.assemble_from_link_markup(scan))
    }

    /// Records for `target_date`, or an empty list if the listing could not be
    /// fetched or nothing matched.
    pub async fn parse(&self, target_date: NaiveDate) -> Result<Vec<NewsRecord>> {
        Ok(self.collect(target_date).await?.into_records())
    }

    /// Fetch the listing and extract the items dated `target_date`.
    #[instrument(level = "info", skip(self), fields(url = %self.listing_url))]
    pub async fn collect(&self, target_date: NaiveDate) -> Result<ScrapeOutcome> {
        let html = match self
            .fetcher
            .get_data(self.listing_url.as_str(), &RequestParams::default())
            .await?
        {
            FetchOutcome::Body(body) => body,
            FetchOutcome::Rejected(failure) => {
                warn!(status = failure.status, "Listing request rejected");
                return Ok(ScrapeOutcome::FetchFailed(failure));
            }
        };

        if html.trim().is_empty() {
            info!("Listing page is empty");
            return Ok(ScrapeOutcome::EmptyPage);
        }

        let scan = scan_listing(&html, target_date)?;
        let report = match self.config.content_mode {
            ContentMode::LinkMarkup => self.assemble_from_link_markup(scan),
            ContentMode::ArticlePage => self.assemble_from_article_pages(scan).await,
        };

        info!(
            count = report.records.len(),
            failed = report.failures.len(),
            items = report.items_seen,
            off_date = report.off_date,
            "Extracted Oleoscope news"
        );
        Ok(ScrapeOutcome::Parsed(report))
    }

    fn assemble_from_link_markup(&self, scan: ListingScan) -> ExtractionReport {
        let ListingScan {
            entries,
            failures,
            items_seen,
            off_date,
        } = scan;

        let (records, content_failures): (Vec<_>, Vec<_>) =
            entries.into_iter().partition_map(|entry| {
                match content_from_markup(&entry.source_url) {
                    Ok(content) => {
                        Either::Left(entry.into_record(&self.config.source_name, content))
                    }
                    Err(error) => {
                        warn!(
                            index = entry.index,
                            url = %entry.source_url,
                            error = %error,
                            "No content for news item; skipping"
                        );
                        Either::Right(ItemFailure {
                            index: entry.index,
                            error,
                        })
                    }
                }
            });

        build_report(records, failures, content_failures, items_seen, off_date)
    }

    async fn assemble_from_article_pages(&self, scan: ListingScan) -> ExtractionReport {
        let ListingScan {
            entries,
            failures,
            items_seen,
            off_date,
        } = scan;

        let mut records = Vec::new();
        let mut content_failures = Vec::new();
        for entry in entries {
            match self.fetch_article_content(&entry.source_url).await {
                Ok(content) => {
                    records.push(entry.into_record(&self.config.source_name, content))
                }
                Err(error) => {
                    warn!(
                        index = entry.index,
                        url = %entry.source_url,
                        error = %error,
                        "No content for news item; skipping"
                    );
                    content_failures.push(ItemFailure {
                        index: entry.index,
                        error,
                    });
                }
            }
        }

        build_report(records, failures, content_failures, items_seen, off_date)
    }

    async fn fetch_article_content(&self, href: &str) -> std::result::Result<String, ItemError> {
        let unavailable = |reason: String| ItemError::ArticleUnavailable {
            url: href.to_string(),
            reason,
        };

        let url = self
            .listing_url
            .join(href)
            .map_err(|e| unavailable(e.to_string()))?;

        // A missing article is an item failure, not a listing outage.
        let params = RequestParams {
            silent: true,
            ..Default::default()
        };
        match self.fetcher.get_data(url.as_str(), &params).await {
            Ok(FetchOutcome::Body(body)) => content_from_page(&body),
            Ok(FetchOutcome::Rejected(failure)) => {
                Err(unavailable(format!("status {}", failure.status)))
            }
            Err(e) => Err(unavailable(e.to_string())),
        }
    }
}

fn build_report(
    records: Vec<NewsRecord>,
    mut failures: Vec<ItemFailure>,
    content_failures: Vec<ItemFailure>,
    items_seen: usize,
    off_date: usize,
) -> ExtractionReport {
    failures.extend(content_failures);
    failures.sort_by_key(|failure| failure.index);
    ExtractionReport {
        records,
        failures,
        items_seen,
        off_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::user_agent::FixedUserAgent;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LISTING: &str = include_str!("fixtures/listing.html");
    const ARTICLE_12345: &str = include_str!("fixtures/article_12345.html");
    const ARTICLE_12351: &str = include_str!("fixtures/article_12351.html");

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn item(date: &str, id: u32) -> String {
        format!(
            r#"<div class="archive-list__item">
                 <a href="https://oleoscope.com/news/{id}" class="card-small__title">Item {id}</a>
                 <div class="card-small__date">{date}</div>
               </div>"#
        )
    }

    fn page(items: &[String]) -> String {
        format!("<html><body><div class=\"archive-list\">{}</div></body></html>", items.concat())
    }

    fn source(
        listing_url: String,
        mode: ContentMode,
        notifier: Arc<RecordingNotifier>,
    ) -> OleoscopeNews {
        let config = SourceConfig {
            listing_url,
            content_mode: mode,
            environment: Some("test".to_string()),
            ..Default::default()
        };
        let fetcher = Fetcher::new(
            Duration::from_secs(5),
            unit_name(),
            config.environment.clone(),
            Arc::new(FixedUserAgent("test-agent/1.0".to_string())),
            notifier,
        )
        .unwrap();
        OleoscopeNews::with_fetcher(config, fetcher).unwrap()
    }

    #[test]
    fn test_parse_listing_date() {
        assert_eq!(parse_listing_date("05.03.2024").unwrap(), march(5));
        assert_eq!(parse_listing_date(" 05.03.2024 ").unwrap(), march(5));
    }

    #[test]
    fn test_parse_listing_date_rejects_iso() {
        let err = parse_listing_date("2024-03-05").unwrap_err();
        assert!(matches!(err, ItemError::BadDate { .. }));
    }

    #[test]
    fn test_external_id() {
        assert_eq!(external_id("https://oleoscope.com/news/12345"), "12345");
        assert_eq!(external_id("/news/777"), "777");
        assert_eq!(external_id("12345"), "12345");
        assert_eq!(external_id("https://oleoscope.com/news/"), "");
    }

    #[test]
    fn test_author_falls_back_without_link() {
        let doc = Document::parse(r#"<div class="author"><span>Редакция</span></div>"#);
        let node = (&doc).find_first(&selector("div.author")).unwrap();
        assert_eq!(parse_author(&node), "None");
    }

    #[test]
    fn test_author_is_first_link_text() {
        let doc = Document::parse(
            r#"<div class="author"><a href="/a/1"> Иван Петров </a><a>Другой</a></div>"#,
        );
        let node = (&doc).find_first(&selector("div.author")).unwrap();
        assert_eq!(parse_author(&node), "Иван Петров");
    }

    #[test]
    fn test_tags_last_one_wins() {
        // Overwrite behaviour is intentional until the listing owners confirm
        // tags should accumulate.
        let markup = r#"<div class="archive-list__item">
            <a class="card-small__tags"><ul><li>A</li><li>B</li><li>C</li></ul></a>
        </div>"#;
        let doc = Document::parse(markup);
        let node = (&doc).find_first(&ITEM).unwrap();
        assert_eq!(parse_tags(&node), vec!["C".to_string()]);
    }

    #[test]
    fn test_tags_absent_container() {
        let doc = Document::parse(&page(&[item("05.03.2024", 1)]));
        let node = (&doc).find_first(&ITEM).unwrap();
        assert!(parse_tags(&node).is_empty());
    }

    #[test]
    fn test_tags_empty_container() {
        let markup = r#"<div class="archive-list__item"><a class="card-small__tags"></a></div>"#;
        let doc = Document::parse(markup);
        let node = (&doc).find_first(&ITEM).unwrap();
        assert!(parse_tags(&node).is_empty());
    }

    #[test]
    fn test_scan_fixture_keeps_matching_items_in_order() {
        let scan = scan_listing(LISTING, march(5)).unwrap();

        assert_eq!(scan.items_seen, 3);
        assert_eq!(scan.off_date, 1);
        assert!(scan.failures.is_empty());
        assert_eq!(scan.entries.len(), 2);

        let first = &scan.entries[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.title, "Экспорт подсолнечного масла из России вырос на 12%");
        assert_eq!(first.source_url, "https://oleoscope.com/news/12345");
        assert_eq!(first.external_id, "12345");
        assert_eq!(first.tags, vec!["Подсолнечник".to_string()]);
        assert_eq!(first.author, first.title);
        assert_eq!(first.public_date, march(5));

        let second = &scan.entries[1];
        assert_eq!(second.index, 2);
        assert_eq!(second.source_url, "/news/12351");
        assert_eq!(second.external_id, "12351");
        assert!(second.tags.is_empty());
    }

    #[test]
    fn test_scan_counts_only_target_date() {
        let cases = [(0usize, 0usize), (1, 1), (5, 2), (4, 4)];
        for (n, k) in cases {
            let items: Vec<String> = (0..n)
                .map(|i| {
                    let date = if i < k { "05.03.2024" } else { "06.03.2024" };
                    item(date, i as u32)
                })
                .collect();
            let scan = scan_listing(&page(&items), march(5)).unwrap();
            assert_eq!(scan.items_seen, n);
            assert_eq!(scan.entries.len(), k, "n = {n}, k = {k}");
            assert_eq!(scan.off_date, n - k);
        }
    }

    #[test]
    fn test_scan_isolates_broken_items() {
        let broken_title = r#"<div class="archive-list__item">
            <a href="/news/2">no title class</a>
            <div class="card-small__date">05.03.2024</div>
        </div>"#
            .to_string();
        let broken_date = r#"<div class="archive-list__item">
            <a href="/news/3" class="card-small__title">Bad date</a>
            <div class="card-small__date">5 марта 2024</div>
        </div>"#
            .to_string();
        let no_href = r#"<div class="archive-list__item">
            <a class="card-small__title">No link</a>
            <div class="card-small__date">05.03.2024</div>
        </div>"#
            .to_string();
        let markup = page(&[
            item("05.03.2024", 1),
            broken_title,
            broken_date,
            no_href,
            item("05.03.2024", 5),
        ]);

        let scan = scan_listing(&markup, march(5)).unwrap();
        let ids: Vec<&str> = scan.entries.iter().map(|e| e.external_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);

        let failures: Vec<(usize, &ItemError)> =
            scan.failures.iter().map(|f| (f.index, &f.error)).collect();
        assert_eq!(failures.len(), 3);
        assert_eq!(failures[0], (1, &ItemError::MissingNode(TITLE_CSS)));
        assert!(matches!(failures[1], (2, ItemError::BadDate { .. })));
        assert_eq!(
            failures[2],
            (3, &ItemError::MissingAttribute { node: LINK_CSS, attr: "href" })
        );
    }

    #[test]
    fn test_scan_missing_date_node_is_failure() {
        let markup = page(&[
            r#"<div class="archive-list__item"><a href="/news/9">x</a></div>"#.to_string(),
        ]);
        let scan = scan_listing(&markup, march(5)).unwrap();
        assert_eq!(scan.failures[0].error, ItemError::MissingNode(DATE_CSS));
        assert_eq!(scan.off_date, 0);
    }

    #[test]
    fn test_scan_blank_markup_is_error() {
        assert!(matches!(scan_listing("  \n", march(5)), Err(NewsError::EmptyDocument)));
    }

    #[test]
    fn test_content_from_markup_reads_literal_fragment() {
        let markup = r#"<div class="details__content content"> Текст новости </div>"#;
        assert_eq!(content_from_markup(markup).unwrap(), "Текст новости");
    }

    #[test]
    fn test_content_from_markup_on_href_fails() {
        let err = content_from_markup("https://oleoscope.com/news/12345").unwrap_err();
        assert_eq!(err, ItemError::MissingNode(CONTENT_CSS));
    }

    #[test]
    fn test_content_from_page() {
        let content = content_from_page(ARTICLE_12345).unwrap();
        assert_eq!(
            content,
            "По итогам февраля отгрузки подсолнечного масла за рубеж выросли на 12%."
        );
    }

    #[test]
    fn test_parse_news_page_drops_items_without_content() {
        let notifier = Arc::new(RecordingNotifier::default());
        let news = source(
            crate::config::DEFAULT_LISTING_URL.to_string(),
            ContentMode::LinkMarkup,
            notifier,
        );
        assert_eq!(news.config().content_mode, ContentMode::LinkMarkup);
        let report = news.parse_news_page(LISTING, march(5)).unwrap();

        assert!(report.records.is_empty());
        assert_eq!(report.items_seen, 3);
        assert_eq!(report.off_date, 1);
        let indices: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert!(
            report
                .failures
                .iter()
                .all(|f| f.error == ItemError::MissingNode(CONTENT_CSS))
        );
    }

    #[test]
    fn test_unit_name() {
        assert_eq!(unit_name(), "OleoscopeNews");
    }

    async fn mount_listing(server: &MockServer) {
        let listing = LISTING.replace("https://oleoscope.com", &server.uri());
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_collect_article_pages_end_to_end() {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        Mock::given(method("GET"))
            .and(path("/news/12345"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_12345))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/news/12351"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_12351))
            .mount(&server)
            .await;

        let notifier = Arc::new(RecordingNotifier::default());
        let news = source(
            format!("{}/news", server.uri()),
            ContentMode::ArticlePage,
            notifier.clone(),
        );
        let records = news.parse(march(5)).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].external_id, "12345");
        assert_eq!(records[1].external_id, "12351");
        assert_eq!(records[1].source_url, "/news/12351");
        assert_eq!(records[1].content, "Прогноз урожая сои повышен до 6,8 млн т.");
        for record in &records {
            assert!(!record.title.is_empty());
            assert!(!record.source_url.is_empty());
            assert_eq!(record.public_date, march(5));
            assert_eq!(record.source_name, "Oleoscope");
        }
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_collect_article_page_missing_drops_only_that_item() {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        Mock::given(method("GET"))
            .and(path("/news/12345"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/news/12351"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_12351))
            .mount(&server)
            .await;

        let notifier = Arc::new(RecordingNotifier::default());
        let news = source(
            format!("{}/news", server.uri()),
            ContentMode::ArticlePage,
            notifier.clone(),
        );
        let outcome = news.collect(march(5)).await.unwrap();

        let ScrapeOutcome::Parsed(report) = outcome else {
            panic!("expected a parsed listing");
        };
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].external_id, "12351");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 0);
        assert!(matches!(
            report.failures[0].error,
            ItemError::ArticleUnavailable { .. }
        ));
        // Only listing rejections reach the alerting channel.
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_collect_link_markup_mode_yields_no_records() {
        let server = MockServer::start().await;
        mount_listing(&server).await;

        let notifier = Arc::new(RecordingNotifier::default());
        let news = source(format!("{}/news", server.uri()), ContentMode::LinkMarkup, notifier);
        let outcome = news.collect(march(5)).await.unwrap();

        let ScrapeOutcome::Parsed(report) = outcome else {
            panic!("expected a parsed listing");
        };
        assert!(report.records.is_empty());
        assert_eq!(report.failures.len(), 2);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_collect_rejected_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let notifier = Arc::new(RecordingNotifier::default());
        let news = source(
            format!("{}/news", server.uri()),
            ContentMode::LinkMarkup,
            notifier.clone(),
        );

        match news.collect(march(5)).await.unwrap() {
            ScrapeOutcome::FetchFailed(failure) => {
                assert_eq!(failure.status, 503);
                assert!(failure.diagnostic.contains("503"));
                assert!(failure.diagnostic.contains("OleoscopeNews"));
            }
            other => panic!("expected fetch failure, got {other:?}"),
        }
        assert!(news.parse(march(5)).await.unwrap().is_empty());
        assert_eq!(notifier.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_collect_empty_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let news = source(
            format!("{}/news", server.uri()),
            ContentMode::LinkMarkup,
            Arc::new(RecordingNotifier::default()),
        );
        assert_eq!(news.collect(march(5)).await.unwrap(), ScrapeOutcome::EmptyPage);
    }
}
