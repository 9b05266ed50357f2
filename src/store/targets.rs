//! Target listing pages on the demo site and destination naming.

use crate::error::ScrapeError;
use serde::{Deserialize, Serialize};
use url::Url;

pub const BASE_URL: &str = "https://webscraper.io/test-sites/e-commerce/more/";

/// One listing page to scrape, with its pagination requirement declared
/// up front rather than probed at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTarget {
    pub url: String,
    /// Whether the page hides items behind a "load more" control.
    #[serde(default)]
    pub paginate: bool,
}

impl PageTarget {
    pub fn new(url: impl Into<String>, paginate: bool) -> Self {
        Self { url: url.into(), paginate }
    }
}

/// The six demo listing pages: three plain, three paginated.
pub fn default_targets() -> Vec<PageTarget> {
    vec![
        PageTarget::new(BASE_URL, false),
        PageTarget::new(format!("{BASE_URL}computers/"), false),
        PageTarget::new(format!("{BASE_URL}phones/"), false),
        PageTarget::new(format!("{BASE_URL}computers/laptops"), true),
        PageTarget::new(format!("{BASE_URL}computers/tablets"), true),
        PageTarget::new(format!("{BASE_URL}phones/touch"), true),
    ]
}

/// Derives the logical CSV destination from a target URL: its last non-empty
/// path segment, with the root listing's `more` segment mapped to `home`.
pub fn destination_for(url: &str) -> Result<String, ScrapeError> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::Navigation {
        url: url.to_string(),
        reason: format!("invalid target URL: {e}"),
    })?;

    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .ok_or_else(|| ScrapeError::Navigation {
            url: url.to_string(),
            reason: "target URL has no path segment to name the output after".to_string(),
        })?;

    Ok(match segment {
        "more" => "home".to_string(),
        other => other.to_string(),
    })
}
