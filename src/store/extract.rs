//! HTML extraction of product records from rendered listing pages.

use crate::error::ScrapeError;
use crate::store::models::Product;
use crate::store::selectors;
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Extracts every product card from a rendered listing page, in document
/// order.
///
/// A card missing any required sub-element, or with a field that cannot be
/// parsed, fails the whole page rather than producing a partial record.
pub fn extract_products(html: &str) -> Result<Vec<Product>, ScrapeError> {
    let document = Html::parse_document(html);

    let mut products = Vec::new();
    for card in document.select(&selectors::CARD) {
        let product = extract_card(card)?;
        trace!("Extracted product: {}", product.title);
        products.push(product);
    }

    debug!("Extracted {} products from page", products.len());
    Ok(products)
}

/// Extracts one product record from a card subtree.
fn extract_card(card: ElementRef) -> Result<Product, ScrapeError> {
    Ok(Product {
        title: parse_title(card)?,
        description: parse_description(card)?,
        price: parse_price(card)?,
        rating: parse_rating(card)?,
        num_of_reviews: parse_review_count(card)?,
    })
}

/// Full title from the title link's `title` attribute. The link text is
/// ellipsized on the site, the attribute is not.
fn parse_title(card: ElementRef) -> Result<String, ScrapeError> {
    let element = card
        .select(&selectors::TITLE)
        .next()
        .ok_or(ScrapeError::MissingElement { selector: ".title" })?;

    match element.value().attr(selectors::TITLE_ATTR) {
        Some(title) if !title.is_empty() => Ok(title.to_string()),
        _ => Err(ScrapeError::InvalidField {
            field: "title",
            text: element.text().collect::<String>(),
        }),
    }
}

/// Description text with non-breaking spaces normalized to regular spaces.
fn parse_description(card: ElementRef) -> Result<String, ScrapeError> {
    let element = card
        .select(&selectors::DESCRIPTION)
        .next()
        .ok_or(ScrapeError::MissingElement { selector: ".description" })?;

    Ok(element.text().collect::<String>().replace('\u{a0}', " "))
}

/// Price parsed from currency-prefixed text like `$295.99`.
fn parse_price(card: ElementRef) -> Result<f64, ScrapeError> {
    let element = card
        .select(&selectors::PRICE)
        .next()
        .ok_or(ScrapeError::MissingElement { selector: ".price" })?;

    let text = element.text().collect::<String>();
    let cleaned = text.trim().trim_start_matches('$');

    cleaned
        .parse()
        .map_err(|_| ScrapeError::InvalidField { field: "price", text: text.trim().to_string() })
}

/// Rating is the count of filled star icons, bounded by the five-star scale.
fn parse_rating(card: ElementRef) -> Result<u8, ScrapeError> {
    let stars = card.select(&selectors::STAR).count();
    if stars > 5 {
        return Err(ScrapeError::InvalidField { field: "rating", text: stars.to_string() });
    }
    Ok(stars as u8)
}

/// Leading integer token of text like `14 reviews`.
fn parse_review_count(card: ElementRef) -> Result<u32, ScrapeError> {
    let element = card
        .select(&selectors::REVIEW_COUNT)
        .next()
        .ok_or(ScrapeError::MissingElement { selector: ".review-count" })?;

    let text = element.text().collect::<String>();
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| ScrapeError::InvalidField {
            field: "num_of_reviews",
            text: text.trim().to_string(),
        })
}
