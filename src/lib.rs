//! Library catalogue and loan ledger.
//!
//! This crate models a small library: a catalogue of books and magazines,
//! the loans made against it, and the catalogue and overdue reports.

pub mod bibtex;
pub mod catalogue;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod library;
pub mod loan;
pub mod loan_state;
pub mod observers;
pub mod person;
pub mod report;

pub use catalogue::{CatalogueItem, Genre, ItemKind, SharedItem, Summary};
pub use config::{AvailabilityPolicy, LibraryConfig};
pub use error::{LibraryError, LibraryResult};
pub use events::LoanEvent;
pub use library::Library;
pub use loan::{Loan, LoanId};
pub use loan_state::LoanState;
pub use person::Person;
pub use report::{CatalogueReport, OverdueReport, Report};
