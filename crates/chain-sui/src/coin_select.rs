//! Greedy coin selection.
//!
//! Coins are offered in discovery order; zero balances are skipped and
//! accumulation stops at the first coin that pushes the running total to
//! the target. The resulting set is the shortest prefix of the non-zero
//! coins that covers the target.

use crate::error::SuiError;

#[derive(Debug)]
pub struct GreedySelection {
    target: u64,
    selected: Vec<String>,
    accumulated: u64,
}

impl GreedySelection {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            selected: Vec::new(),
            accumulated: 0,
        }
    }

    /// Offer one coin. Zero balances are ignored, and nothing is taken
    /// once the target is covered. Returns whether the selection is
    /// complete after this offer.
    pub fn offer(&mut self, object_id: &str, balance: u64) -> bool {
        if balance > 0 && !self.is_complete() {
            self.selected.push(object_id.to_string());
            self.accumulated = self.accumulated.saturating_add(balance);
        }
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.accumulated >= self.target
    }

    pub fn accumulated(&self) -> u64 {
        self.accumulated
    }

    /// The selected ids, or `InsufficientBalance` when the offered coins
    /// never covered the target.
    pub fn finish(self) -> Result<Vec<String>, SuiError> {
        if self.is_complete() {
            Ok(self.selected)
        } else {
            Err(SuiError::InsufficientBalance {
                needed: self.target,
                available: self.accumulated,
            })
        }
    }
}
