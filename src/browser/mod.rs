//! Browser control: session lifecycle, the page abstraction, pagination.

pub mod pagination;
pub mod session;

pub use pagination::{PaginationOutcome, Paginator, StopReason};
pub use session::{BrowserSession, ChromePage, PageDriver};
