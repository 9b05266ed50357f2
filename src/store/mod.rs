//! Demo-store specific modules: data model, selectors, extraction, targets.

pub mod extract;
pub mod models;
pub mod selectors;
pub mod targets;

pub use extract::extract_products;
pub use models::Product;
pub use targets::{default_targets, destination_for, PageTarget};
