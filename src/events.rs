use serde::{Deserialize, Serialize};

/// Events that move a loan through its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LoanEvent {
    /// A new loan was recorded
    Open,
    /// The borrowed item was brought back
    Return,
    /// The due date was moved by a number of days
    Extend(i64),
}
