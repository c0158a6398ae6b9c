//! Simulated payment flow: one validation, one delayed confirmation
use super::error::CheckoutError;
use super::pricing::CartSummary;
use std::time::Duration;

/// Reference confirmation delay.
pub const CHECKOUT_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    Pending,
    Confirmed,
    Rejected,
}

/// Confirmation numbers frozen at trigger time. Cart mutations during the
/// pending window do not affect the amount that gets reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Receipt {
    pub total: f64,
    pub item_count: u64,
}

pub struct CheckoutSimulator {
    state: CheckoutState,
    delay: Duration,
}

impl Default for CheckoutSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutSimulator {
    pub fn new() -> Self {
        Self::with_delay(CHECKOUT_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            state: CheckoutState::Idle,
            delay,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Runs one confirmation attempt against a summary captured by the caller.
    ///
    /// An empty cart fails before any transition. Once pending, a total that
    /// is not a finite positive number moves straight to `Rejected`; the
    /// caller leaves the cart untouched so the user can retry. A valid total
    /// confirms after the delay. There is no cancellation path: dropping the
    /// future abandons the attempt, as a page reload would.
    pub async fn submit(&mut self, summary: CartSummary) -> Result<Receipt, CheckoutError> {
        if summary.item_count == 0 {
            return Err(CheckoutError::EmptyCart);
        }

        self.state = CheckoutState::Pending;
        if !summary.total.is_finite() || summary.total <= 0.0 {
            self.state = CheckoutState::Rejected;
            return Err(CheckoutError::Rejected(summary.total));
        }

        tokio::time::sleep(self.delay).await;

        self.state = CheckoutState::Confirmed;
        Ok(Receipt {
            total: summary.total,
            item_count: summary.item_count,
        })
    }
}
