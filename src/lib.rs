//! ecom-crawler - Browser-driven product scraper for the webscraper.io
//! demo e-commerce sites.
//!
//! Navigates each configured listing page, exhausts its "load more" control,
//! extracts product cards from the rendered DOM, and appends the records to
//! per-page CSV files.

pub mod browser;
pub mod commands;
pub mod config;
pub mod error;
pub mod sink;
pub mod store;

pub use browser::{BrowserSession, PageDriver, Paginator};
pub use config::Config;
pub use error::ScrapeError;
pub use sink::CsvSink;
pub use store::{PageTarget, Product};
