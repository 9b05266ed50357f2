//! CSS selectors for the webscraper.io demo e-commerce pages.
//!
//! All selectors used against rendered listing pages live here. Update this
//! file if the demo site changes its markup.

use scraper::Selector;
use std::sync::LazyLock;

/// Class name of the "load more" control on paginated listings.
/// The misspelling is the site's own.
pub const LOAD_MORE_CLASS: &str = "ecomerce-items-scroll-more";

/// One product card.
pub static CARD: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".thumbnail").unwrap());

/// Title link inside a card; the full title is in its `title` attribute.
pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".title").unwrap());

/// Attribute on the title link holding the untruncated product name.
pub static TITLE_ATTR: &str = "title";

/// Description paragraph.
pub static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".description").unwrap());

/// Price tag, text like `$295.99`.
pub static PRICE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".price").unwrap());

/// One filled star icon; the rating is the number of matches.
pub static STAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ratings span.ws-icon.ws-icon-star").unwrap());

/// Review count, text like `14 reviews`.
pub static REVIEW_COUNT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".review-count").unwrap());
