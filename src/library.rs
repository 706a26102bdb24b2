use std::{
    fmt,
    io::{self, Write},
    rc::Rc,
    sync::Arc,
};

use chrono::NaiveDateTime;

use crate::{
    catalogue::{CatalogueItem, SharedItem},
    clock::{Clock, DefaultClock, local_now},
    config::{AvailabilityPolicy, LibraryConfig},
    error::{LibraryError, LibraryResult},
    events::LoanEvent,
    loan::{Loan, LoanId},
    observers::{LateReturnNotifier, LoanLogger, LoanObserver},
    person::Person,
    report::{CatalogueReport, OverdueReport, Report},
};

/// A library: its catalogue, its loan ledger and the clock they are dated by
pub struct Library {
    /// Name shown in the catalogue banner
    name: String,
    /// Days between loan and due date
    loan_length: u32,
    /// Maximum number of catalogue entries, if bounded
    capacity: Option<usize>,
    /// Copy availability check applied when lending
    availability: AvailabilityPolicy,
    /// Catalogue entries in insertion order
    catalogue: Vec<SharedItem>,
    /// Every loan ever made, indexed by `LoanId`
    loans: Vec<Loan>,
    /// Source of "now"
    clock: Arc<dyn Clock>,
    /// Registered loan observers
    observers: Vec<Box<dyn LoanObserver>>,
}

// Manual implementation of Debug for Library
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("name", &self.name)
            .field("loan_length", &self.loan_length)
            .field("capacity", &self.capacity)
            .field("availability", &self.availability)
            .field("catalogue", &self.catalogue)
            .field("loans", &self.loans)
            .field("observers_count", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::from_config(LibraryConfig::default())
    }
}

impl Library {
    /// Create a library with the default 10-day loan length
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::from_config(LibraryConfig::named(name))
    }

    /// Create a library lending for `loan_length` days
    #[must_use]
    pub fn with_loan_length(name: &str, loan_length: u32) -> Self {
        Self::from_config(LibraryConfig { loan_length_days: loan_length, ..LibraryConfig::named(name) })
    }

    /// Build a library from its configuration, seeding the catalogue.
    /// Seed items beyond the capacity are dropped with a warning.
    #[must_use]
    pub fn from_config(config: LibraryConfig) -> Self {
        let mut library = Self {
            name: config.name,
            loan_length: config.loan_length_days,
            capacity: config.catalogue_capacity,
            availability: config.availability,
            catalogue: Vec::new(),
            loans: Vec::new(),
            clock: Arc::new(DefaultClock),
            observers: Vec::new(),
        };

        library.register_observer(Box::new(LoanLogger));
        library.register_observer(Box::new(LateReturnNotifier));

        for item in config.catalogue {
            let title = item.title().to_string();
            if !library.add_item(item) {
                tracing::warn!(%title, "Seed item dropped, catalogue is full");
            }
        }

        library
    }

    /// Replace the clock used to date loans and compute overdue loans
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the availability policy applied when lending
    #[must_use]
    pub fn with_availability(mut self, availability: AvailabilityPolicy) -> Self {
        self.availability = availability;
        self
    }

    /// Register an observer to be notified of loan changes
    pub fn register_observer(&mut self, observer: Box<dyn LoanObserver>) {
        self.observers.push(observer);
    }

    /// `Welcome to <name>`
    #[must_use]
    pub fn welcome(&self) -> String {
        format!("Welcome to {}", self.name)
    }

    /// Library name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Days between loan and due date
    #[must_use]
    pub fn loan_length(&self) -> u32 {
        self.loan_length
    }

    /// Current local time according to the library's clock
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        local_now(self.clock.as_ref())
    }

    /// Add an item to the catalogue.
    ///
    /// Returns `false`, leaving the catalogue untouched, when it is full.
    pub fn add_item(&mut self, item: CatalogueItem) -> bool {
        if self.capacity.is_some_and(|capacity| self.catalogue.len() >= capacity) {
            tracing::warn!(title = %item.title(), "Catalogue is full");
            return false;
        }

        tracing::debug!(title = %item.title(), isbn = %item.isbn(), "Item added to catalogue");
        self.catalogue.push(item.into_shared());
        true
    }

    /// First item whose title or ISBN equals `title_or_isbn`
    #[must_use]
    pub fn find_item(&self, title_or_isbn: &str) -> Option<SharedItem> {
        self.catalogue.iter().find(|item| item.borrow().is_keyed_by(title_or_isbn)).map(Rc::clone)
    }

    /// Catalogue position of the first item keyed by `title_or_isbn`
    fn position_of(&self, title_or_isbn: &str) -> LibraryResult<usize> {
        self.catalogue
            .iter()
            .position(|item| item.borrow().is_keyed_by(title_or_isbn))
            .ok_or_else(|| LibraryError::ItemNotFound(title_or_isbn.to_string()))
    }

    /// Remove one copy of an item
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ItemNotFound` if no item has that title or ISBN
    pub fn remove_item(&mut self, title_or_isbn: &str) -> LibraryResult<()> {
        self.remove_copies(title_or_isbn, 1)
    }

    /// Remove up to `n` copies of an item.
    ///
    /// Each step takes one copy away; removing the last copy drops the item
    /// from the catalogue and stops early.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ItemNotFound` if no item has that title or ISBN
    pub fn remove_copies(&mut self, title_or_isbn: &str, n: u32) -> LibraryResult<()> {
        let index = self.position_of(title_or_isbn)?;

        for _ in 0..n {
            let Some(item) = self.catalogue.get(index) else { break };

            let last_copy = {
                let mut item = item.borrow_mut();
                let last_copy = item.copies() <= 1;
                if item.is_available() {
                    item.decrement_copies();
                }
                last_copy
            };

            if last_copy {
                let removed = self.catalogue.remove(index);
                tracing::debug!(title = %removed.borrow().title(), "Item removed from catalogue");
                break;
            }
        }

        Ok(())
    }

    /// Lend an item to `user` for the library's loan length.
    ///
    /// The item's copy count goes up by one when the loan is recorded.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ItemNotFound` if no item has that title or ISBN,
    /// `LibraryError::NoCopyAvailable` if the policy requires a copy and none
    /// is left, or `LibraryError::DateOutOfRange` if the due date overflows
    pub fn loan_item(&mut self, title_or_isbn: &str, user: Person) -> LibraryResult<LoanId> {
        let item = self
            .find_item(title_or_isbn)
            .ok_or_else(|| LibraryError::ItemNotFound(title_or_isbn.to_string()))?;

        if self.availability == AvailabilityPolicy::RequireCopy && !item.borrow().is_available() {
            return Err(LibraryError::NoCopyAvailable(title_or_isbn.to_string()));
        }

        let loan = Loan::open(Rc::clone(&item), user, self.now(), self.loan_length)?;
        item.borrow_mut().add_copy();

        let id = LoanId(self.loans.len());
        self.loans.push(loan);
        self.notify(id, &LoanEvent::Open);
        Ok(id)
    }

    /// Close a loan
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::LoanNotFound` for an unknown id and
    /// `LibraryError::ItemAlreadyReturned` if the loan is already closed
    pub fn return_item(&mut self, id: LoanId) -> LibraryResult<()> {
        let now = self.now();
        self.loan_mut(id)?.mark_returned(now)?;
        self.notify(id, &LoanEvent::Return);
        Ok(())
    }

    /// Move a loan's due date by `days`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::LoanNotFound` for an unknown id,
    /// `LibraryError::ItemAlreadyReturned` if the loan is already closed, or
    /// `LibraryError::DateOutOfRange` if the due date overflows
    pub fn extend_loan(&mut self, id: LoanId, days: i64) -> LibraryResult<()> {
        self.loan_mut(id)?.extend(days)?;
        self.notify(id, &LoanEvent::Extend(days));
        Ok(())
    }

    /// A loan from the ledger
    #[must_use]
    pub fn loan(&self, id: LoanId) -> Option<&Loan> {
        self.loans.get(id.0)
    }

    /// Mutable access to a ledger entry
    fn loan_mut(&mut self, id: LoanId) -> LibraryResult<&mut Loan> {
        self.loans.get_mut(id.0).ok_or(LibraryError::LoanNotFound(id.0))
    }

    /// Every loan ever made, open or returned
    #[must_use]
    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Copy count of the item keyed by `title_or_isbn`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ItemNotFound` if no item has that title or ISBN
    pub fn copies_available(&self, title_or_isbn: &str) -> LibraryResult<u32> {
        self.find_item(title_or_isbn)
            .map(|item| item.borrow().copies())
            .ok_or_else(|| LibraryError::ItemNotFound(title_or_isbn.to_string()))
    }

    /// Catalogue entries, in no particular order
    #[must_use]
    pub fn catalogue(&self) -> &[SharedItem] {
        &self.catalogue
    }

    /// Title-sorted catalogue report
    #[must_use]
    pub fn catalogue_report(&self) -> CatalogueReport {
        CatalogueReport::build(&self.welcome(), &self.catalogue)
    }

    /// Outstanding loans past their due date, most overdue first
    #[must_use]
    pub fn overdue_report(&self) -> OverdueReport {
        OverdueReport::build(&self.loans, self.now())
    }

    /// Write the catalogue report to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails
    pub fn print_catalogue(&self, out: &mut dyn Write) -> io::Result<()> {
        self.catalogue_report().write_to(out)
    }

    /// Write the overdue report to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails
    pub fn print_overdue(&self, out: &mut dyn Write) -> io::Result<()> {
        self.overdue_report().write_to(out)
    }

    /// Tell every observer about a change to loan `id`
    fn notify(&self, id: LoanId, event: &LoanEvent) {
        if let Some(loan) = self.loans.get(id.0) {
            for observer in &self.observers {
                observer.on_loan_event(id, loan, event);
            }
        }
    }
}
