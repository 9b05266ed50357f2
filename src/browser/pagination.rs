//! Pagination-exhaustion loop for "load more" style listings.

use crate::browser::session::PageDriver;
use crate::error::ScrapeError;
use std::time::Duration;
use tracing::{debug, warn};

/// Why the pagination loop reached `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The control is no longer present; all items are rendered.
    Exhausted,
    /// The control was present but could not be activated. The loop stops as
    /// if exhausted, but the failure is surfaced instead of swallowed.
    ActivationFailed,
    /// The configured click cap was reached before the control disappeared.
    ClickCap,
}

/// Result of driving pagination to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOutcome {
    pub clicks: usize,
    pub stop: StopReason,
}

/// Drives the two-state pagination machine:
/// `Scanning -> (control found) -> activate -> Scanning`,
/// `Scanning -> (control absent | activation error | cap) -> Done`.
pub struct Paginator {
    control_class: String,
    max_clicks: usize,
    settle: Duration,
}

impl Paginator {
    pub fn new(control_class: impl Into<String>, max_clicks: usize, settle_ms: u64) -> Self {
        Self {
            control_class: control_class.into(),
            max_clicks,
            settle: Duration::from_millis(settle_ms),
        }
    }

    /// Clicks the control until it disappears, fails, or the cap is hit.
    /// On `Exhausted` the page is left with the full item set rendered.
    ///
    /// Activation failures end the loop and are reported through
    /// [`StopReason::ActivationFailed`] rather than an error.
    pub async fn run(&self, page: &impl PageDriver) -> PaginationOutcome {
        let mut clicks = 0;

        loop {
            if clicks >= self.max_clicks {
                warn!(
                    "Stopping pagination after {} clicks; the '{}' control never disappeared",
                    clicks, self.control_class
                );
                return PaginationOutcome { clicks, stop: StopReason::ClickCap };
            }

            match page.click_by_class(&self.control_class).await {
                Ok(true) => {
                    clicks += 1;
                    debug!("Clicked '{}' ({} so far)", self.control_class, clicks);
                    if !self.settle.is_zero() {
                        tokio::time::sleep(self.settle).await;
                    }
                }
                Ok(false) => {
                    debug!("Pagination exhausted after {} clicks", clicks);
                    return PaginationOutcome { clicks, stop: StopReason::Exhausted };
                }
                Err(e) => {
                    warn!(
                        "Pagination control activation failed after {} clicks: {}",
                        clicks, e
                    );
                    return PaginationOutcome { clicks, stop: StopReason::ActivationFailed };
                }
            }
        }
    }
}
