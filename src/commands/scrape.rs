//! Scrape command: drives the full page-to-CSV pipeline.

use crate::browser::pagination::{Paginator, StopReason};
use crate::browser::session::{BrowserSession, PageDriver};
use crate::config::Config;
use crate::error::ScrapeError;
use crate::sink::CsvSink;
use crate::store::extract::extract_products;
use crate::store::selectors::LOAD_MORE_CLASS;
use crate::store::targets::destination_for;
use anyhow::Result;
use tracing::{debug, info, warn};

/// Scrapes every configured target into its CSV destination.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Launches a browser, runs the scrape, and closes the browser on every
    /// exit path, including failures part-way through the target list.
    pub async fn execute(&self) -> Result<String> {
        let session = BrowserSession::launch(self.config.headless).await?;

        let result = match session.new_page().await {
            Ok(page) => self.execute_with_page(&page).await,
            Err(e) => Err(e),
        };

        if let Err(e) = session.close().await {
            warn!("Browser shutdown failed: {}", e);
        }

        Ok(result?)
    }

    /// Runs the scrape against a provided page handle (mockable for tests).
    ///
    /// Targets are processed strictly in order; a navigation, extraction, or
    /// sink failure on one target aborts the remainder.
    pub async fn execute_with_page(&self, page: &impl PageDriver) -> Result<String, ScrapeError> {
        let sink = CsvSink::new(&self.config.output_dir);
        let paginator =
            Paginator::new(LOAD_MORE_CLASS, self.config.max_clicks, self.config.settle_ms);

        let mut total_products = 0;

        for target in &self.config.targets {
            let destination = destination_for(&target.url)?;
            info!("Scraping {} -> {}.csv", target.url, destination);

            page.navigate(&target.url).await?;

            if target.paginate {
                let outcome = paginator.run(page).await;
                match outcome.stop {
                    StopReason::Exhausted => {
                        debug!("Revealed all items after {} clicks", outcome.clicks)
                    }
                    StopReason::ActivationFailed => warn!(
                        "Pagination on {} stopped early after {} clicks; results may be incomplete",
                        target.url, outcome.clicks
                    ),
                    StopReason::ClickCap => warn!(
                        "Pagination on {} hit the {}-click cap; results may be incomplete",
                        target.url, self.config.max_clicks
                    ),
                }
            }

            let html = page.content().await?;
            let products = extract_products(&html)?;

            let path = sink.append(&destination, &products)?;
            info!("Wrote {} products to {}", products.len(), path.display());
            total_products += products.len();
        }

        Ok(format!(
            "Scraped {} products across {} pages",
            total_products,
            self.config.targets.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::targets::PageTarget;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serves canned markup per URL and scripts the load-more control.
    struct MockPage {
        pages: HashMap<String, String>,
        current: Mutex<Option<String>>,
        clicks_before_exhausted: Mutex<usize>,
        clicks: AtomicUsize,
    }

    impl MockPage {
        fn new(pages: HashMap<String, String>) -> Self {
            Self {
                pages,
                current: Mutex::new(None),
                clicks_before_exhausted: Mutex::new(0),
                clicks: AtomicUsize::new(0),
            }
        }

        fn with_load_more(self, clicks: usize) -> Self {
            *self.clicks_before_exhausted.lock().unwrap() = clicks;
            self
        }

        fn clicks(&self) -> usize {
            self.clicks.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageDriver for MockPage {
        async fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
            if !self.pages.contains_key(url) {
                return Err(ScrapeError::Navigation {
                    url: url.to_string(),
                    reason: "no such page".to_string(),
                });
            }
            *self.current.lock().unwrap() = Some(url.to_string());
            Ok(())
        }

        async fn content(&self) -> Result<String, ScrapeError> {
            let current = self.current.lock().unwrap();
            let url = current
                .as_ref()
                .ok_or_else(|| ScrapeError::PageContent("no page loaded".to_string()))?;
            Ok(self.pages[url].clone())
        }

        async fn click_by_class(&self, _class: &str) -> Result<bool, ScrapeError> {
            let mut remaining = self.clicks_before_exhausted.lock().unwrap();
            if *remaining == 0 {
                return Ok(false);
            }
            *remaining -= 1;
            self.clicks.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    fn make_card(title: &str, description: &str, price: &str, stars: usize, reviews: &str) -> String {
        let star_spans = r#"<span class="ws-icon ws-icon-star"></span>"#.repeat(stars);
        format!(
            r#"<div class="thumbnail">
                <a class="title" title="{title}">{title}</a>
                <p class="description">{description}</p>
                <h4 class="price">{price}</h4>
                <div class="ratings">
                    <p class="review-count">{reviews}</p>
                    <p>{star_spans}</p>
                </div>
            </div>"#
        )
    }

    fn make_config(dir: &TempDir, targets: Vec<PageTarget>) -> Config {
        Config {
            output_dir: dir.path().to_path_buf(),
            headless: true,
            max_clicks: 200,
            settle_ms: 0,
            targets,
        }
    }

    #[tokio::test]
    async fn test_single_page_end_to_end() {
        let url = "https://webscraper.io/test-sites/e-commerce/more/computers/";
        let html = format!(
            "<html><body>{}</body></html>",
            make_card("Acer A1", "15.6\u{a0}inch display", "$299.99", 3, "5 reviews")
        );

        let page = MockPage::new(HashMap::from([(url.to_string(), html)]));
        let dir = TempDir::new().unwrap();
        let cmd = ScrapeCommand::new(make_config(&dir, vec![PageTarget::new(url, false)]));

        let summary = cmd.execute_with_page(&page).await.unwrap();
        assert!(summary.contains("1 products"));

        let contents = std::fs::read_to_string(dir.path().join("computers.csv")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "title,description,price,rating,num_of_reviews");
        assert_eq!(lines[1], "Acer A1,15.6 inch display,299.99,3,5");
        assert_eq!(lines.len(), 2);
    }

    #[tokio::test]
    async fn test_paginated_target_clicks_until_exhausted() {
        let url = "https://webscraper.io/test-sites/e-commerce/more/computers/laptops";
        let html = format!(
            "<html><body>{}</body></html>",
            make_card("Lenovo V110", "HD, 4GB", "$321.94", 2, "9 reviews")
        );

        let page =
            MockPage::new(HashMap::from([(url.to_string(), html)])).with_load_more(4);
        let dir = TempDir::new().unwrap();
        let cmd = ScrapeCommand::new(make_config(&dir, vec![PageTarget::new(url, true)]));

        cmd.execute_with_page(&page).await.unwrap();
        assert_eq!(page.clicks(), 4);
        assert!(dir.path().join("laptops.csv").exists());
    }

    #[tokio::test]
    async fn test_unpaginated_target_never_clicks() {
        let url = "https://webscraper.io/test-sites/e-commerce/more/phones/";
        let html = "<html><body></body></html>".to_string();

        let page = MockPage::new(HashMap::from([(url.to_string(), html)])).with_load_more(4);
        let dir = TempDir::new().unwrap();
        let cmd = ScrapeCommand::new(make_config(&dir, vec![PageTarget::new(url, false)]));

        cmd.execute_with_page(&page).await.unwrap();
        assert_eq!(page.clicks(), 0);
    }

    #[tokio::test]
    async fn test_extraction_error_aborts_remaining_targets() {
        let bad_url = "https://webscraper.io/test-sites/e-commerce/more/computers/tablets";
        let good_url = "https://webscraper.io/test-sites/e-commerce/more/phones/touch";

        // Card missing its price element
        let bad_html = r#"<html><body><div class="thumbnail">
            <a class="title" title="Broken">Broken</a>
            <p class="description">d</p>
            <div class="ratings"><p class="review-count">1 reviews</p></div>
        </div></body></html>"#
            .to_string();
        let good_html = format!(
            "<html><body>{}</body></html>",
            make_card("Fine", "d", "$1.00", 1, "1 reviews")
        );

        let page = MockPage::new(HashMap::from([
            (bad_url.to_string(), bad_html),
            (good_url.to_string(), good_html),
        ]));
        let dir = TempDir::new().unwrap();
        let cmd = ScrapeCommand::new(make_config(
            &dir,
            vec![PageTarget::new(bad_url, false), PageTarget::new(good_url, false)],
        ));

        let err = cmd.execute_with_page(&page).await.unwrap_err();
        assert!(matches!(err, ScrapeError::MissingElement { .. }));
        // The second target was never reached
        assert!(!dir.path().join("touch.csv").exists());
    }

    #[tokio::test]
    async fn test_navigation_error_propagates() {
        let page = MockPage::new(HashMap::new());
        let dir = TempDir::new().unwrap();
        let cmd = ScrapeCommand::new(make_config(
            &dir,
            vec![PageTarget::new("https://webscraper.io/test-sites/e-commerce/more/", false)],
        ));

        let err = cmd.execute_with_page(&page).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Navigation { .. }));
    }

    #[tokio::test]
    async fn test_root_listing_writes_home_csv() {
        let url = "https://webscraper.io/test-sites/e-commerce/more/";
        let html = format!(
            "<html><body>{}</body></html>",
            make_card("Home Item", "d", "$10.00", 5, "2 reviews")
        );

        let page = MockPage::new(HashMap::from([(url.to_string(), html)]));
        let dir = TempDir::new().unwrap();
        let cmd = ScrapeCommand::new(make_config(&dir, vec![PageTarget::new(url, false)]));

        cmd.execute_with_page(&page).await.unwrap();
        assert!(dir.path().join("home.csv").exists());
    }
}
