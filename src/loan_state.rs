use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clock::DATE_TIME_FORMAT;

/// Lifecycle state of a single loan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LoanState {
    /// The item is still out
    #[default]
    Open,
    /// The item came back at the given time; terminal
    Returned(NaiveDateTime),
}

impl LoanState {
    /// Whether the loan has been closed
    #[must_use]
    pub fn is_returned(&self) -> bool {
        matches!(self, Self::Returned(_))
    }

    /// When the item came back, if it has
    #[must_use]
    pub fn returned_at(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Open => None,
            Self::Returned(at) => Some(*at),
        }
    }

    /// Get a human-readable description of the current state
    #[must_use]
    pub fn get_description(&self) -> String {
        match self {
            Self::Open => "Loan is outstanding".to_string(),
            Self::Returned(at) => format!("Item was returned on {}", at.format(DATE_TIME_FORMAT)),
        }
    }
}
