//! Browser session management and the page control surface.

use crate::error::ScrapeError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Navigable-page abstraction over the browser automation layer.
///
/// The scrape pipeline only needs these three operations, so mocking a page
/// in tests takes a dozen lines.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigates to the URL and waits for the page to load.
    async fn navigate(&self, url: &str) -> Result<(), ScrapeError>;

    /// Returns the current rendered markup.
    async fn content(&self) -> Result<String, ScrapeError>;

    /// Locates an element by class name and clicks it.
    ///
    /// `Ok(true)` means the element was found and clicked, `Ok(false)` means
    /// no such element exists. An element that exists but cannot be
    /// activated yields `ScrapeError::PaginationActivation`.
    async fn click_by_class(&self, class: &str) -> Result<bool, ScrapeError>;
}

/// A launched Chrome instance. Acquired once per run and closed on every
/// exit path by the orchestrator.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launches the browser and spawns its CDP event handler.
    pub async fn launch(headless: bool) -> Result<Self, ScrapeError> {
        info!("Launching browser (headless: {})", headless);

        let mut builder = BrowserConfig::builder().window_size(1280, 800);
        if !headless {
            builder = builder.with_head();
        }

        let config = builder
            .build()
            .map_err(|e| ScrapeError::BrowserInit(format!("browser config error: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::BrowserInit(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        Ok(Self { browser, handler_task })
    }

    /// Opens a blank page to drive the scrape with.
    pub async fn new_page(&self) -> Result<ChromePage, ScrapeError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::BrowserInit(e.to_string()))?;

        Ok(ChromePage { page: Arc::new(page) })
    }

    /// Shuts the browser down and stops the event handler.
    pub async fn close(mut self) -> Result<(), ScrapeError> {
        info!("Closing browser");

        self.browser
            .close()
            .await
            .map_err(|e| ScrapeError::BrowserInit(format!("browser shutdown failed: {e}")))?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();

        Ok(())
    }
}

/// `PageDriver` backed by a live Chrome tab.
pub struct ChromePage {
    page: Arc<Page>,
}

#[async_trait]
impl PageDriver for ChromePage {
    async fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        self.page.goto(url).await.map_err(|e| ScrapeError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        self.page.wait_for_navigation().await.map_err(|e| ScrapeError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        debug!("Navigated to {}", url);
        Ok(())
    }

    async fn content(&self) -> Result<String, ScrapeError> {
        self.page.content().await.map_err(|e| ScrapeError::PageContent(e.to_string()))
    }

    async fn click_by_class(&self, class: &str) -> Result<bool, ScrapeError> {
        let selector = format!(".{class}");

        let elements = self
            .page
            .find_elements(selector.as_str())
            .await
            .map_err(|e| ScrapeError::PaginationActivation(e.to_string()))?;

        let Some(element) = elements.first() else {
            return Ok(false);
        };

        element
            .click()
            .await
            .map_err(|e| ScrapeError::PaginationActivation(e.to_string()))?;

        Ok(true)
    }
}
