use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    catalogue::{SharedItem, Summary},
    clock::{DATE_FORMAT, DATE_TIME_FORMAT, add_days},
    error::{LibraryError, LibraryResult},
    loan_state::LoanState,
    person::Person,
};

/// Position of a loan in a library's ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct LoanId(pub(crate) usize);

impl LoanId {
    /// Zero-based index into the ledger
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One item borrowed by one person for a bounded period
#[derive(Debug, Clone)]
pub struct Loan {
    /// The borrowed item, shared with the catalogue
    item: SharedItem,
    /// Borrower
    user: Person,
    /// When the loan was opened
    loan_date: NaiveDateTime,
    /// When the item is due back
    due_date: NaiveDateTime,
    /// Open or returned
    state: LoanState,
}

impl Loan {
    /// Open a loan at `now`, due `loan_length` days later
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::DateOutOfRange` if the due date is not representable
    pub fn open(
        item: SharedItem,
        user: Person,
        now: NaiveDateTime,
        loan_length: u32,
    ) -> LibraryResult<Self> {
        let due_date = add_days(now, i64::from(loan_length))?;
        Ok(Self { item, user, loan_date: now, due_date, state: LoanState::Open })
    }

    /// The borrowed item
    #[must_use]
    pub fn item(&self) -> &SharedItem {
        &self.item
    }

    /// Title of the borrowed item
    #[must_use]
    pub fn title(&self) -> String {
        self.item.borrow().title().to_string()
    }

    /// Borrower
    #[must_use]
    pub fn user(&self) -> &Person {
        &self.user
    }

    /// When the loan was opened
    #[must_use]
    pub fn loan_date(&self) -> NaiveDateTime {
        self.loan_date
    }

    /// When the item is due back
    #[must_use]
    pub fn due_date(&self) -> NaiveDateTime {
        self.due_date
    }

    /// When the item came back, if it has
    #[must_use]
    pub fn returned_date(&self) -> Option<NaiveDateTime> {
        self.state.returned_at()
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> LoanState {
        self.state
    }

    /// Close the loan at `now` and put a copy back on the item
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ItemAlreadyReturned` if the loan is already closed
    pub fn mark_returned(&mut self, now: NaiveDateTime) -> LibraryResult<()> {
        if self.state.is_returned() {
            return Err(LibraryError::ItemAlreadyReturned);
        }
        self.state = LoanState::Returned(now);
        self.item.borrow_mut().add_copy();
        Ok(())
    }

    /// Move the due date by `days`; negative values bring it forward
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ItemAlreadyReturned` if the loan is already
    /// closed, or `LibraryError::DateOutOfRange` if the new due date is not
    /// representable
    pub fn extend(&mut self, days: i64) -> LibraryResult<()> {
        if self.state.is_returned() {
            return Err(LibraryError::ItemAlreadyReturned);
        }
        self.due_date = add_days(self.due_date, days)?;
        Ok(())
    }

    /// Outstanding and past its due date
    #[must_use]
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.state.is_returned() && self.due_date < now
    }

    /// Whole days elapsed since the due date, truncated towards zero
    #[must_use]
    pub fn days_overdue(&self, now: NaiveDateTime) -> i64 {
        now.signed_duration_since(self.due_date).num_days()
    }

    /// Multi-line receipt handed to the borrower
    #[must_use]
    pub fn receipt(&self) -> String {
        let returned = self
            .returned_date()
            .map_or_else(|| "n/a".to_string(), |at| at.format(DATE_TIME_FORMAT).to_string());

        format!(
            "Loan date: {}\n{} has borrowed {}\nDate due: {}\nReturned: {returned}\nThank you!\n",
            self.loan_date.format(DATE_TIME_FORMAT),
            self.user.full_name(),
            self.title(),
            self.due_date.format(DATE_TIME_FORMAT),
        )
    }
}

impl Summary for Loan {
    fn summary(&self) -> String {
        let returned = self
            .returned_date()
            .map_or_else(|| "n/a".to_string(), |at| at.format(DATE_FORMAT).to_string());

        format!(
            "Loan: User={}; Item={}; Due={}; Returned={returned}",
            self.user.full_name(),
            self.title(),
            self.due_date.format(DATE_FORMAT),
        )
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
