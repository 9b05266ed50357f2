//! Error taxonomy for the scrape pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Browser initialization failed: {0}")]
    BrowserInit(String),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Failed to read rendered page content: {0}")]
    PageContent(String),

    /// The pagination control was found but could not be activated.
    /// Surfaced as a warning by the pagination driver, never fatal.
    #[error("Pagination control could not be activated: {0}")]
    PaginationActivation(String),

    #[error("Product card is missing a required element: {selector}")]
    MissingElement { selector: &'static str },

    #[error("Could not parse {field} from {text:?}")]
    InvalidField { field: &'static str, text: String },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}
