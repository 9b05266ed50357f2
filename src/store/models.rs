//! Data model for scraped products.

use serde::{Deserialize, Serialize};

/// One product card from a listing page.
///
/// Field declaration order is the CSV column order; `CsvSink` relies on it
/// for both the header row and serialized data rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Full product title (the card's `title` attribute, not the
    /// possibly-ellipsized link text)
    pub title: String,
    /// Description text, whitespace-normalized
    pub description: String,
    /// Price in the site's currency, without the `$` prefix
    pub price: f64,
    /// Number of filled star icons, 0 through 5
    pub rating: u8,
    /// Review count shown under the rating
    pub num_of_reviews: u32,
}

impl Product {
    /// CSV header, matching field declaration order.
    pub const FIELDS: [&'static str; 5] =
        ["title", "description", "price", "rating", "num_of_reviews"];
}
