use std::{
    cmp::Reverse,
    fmt,
    io::{self, Write},
};

use chrono::NaiveDateTime;

use crate::{
    catalogue::{SharedItem, Summary},
    loan::{Loan, LoanId},
};

/// Separator printed around report sections
pub const BORDER: &str = "====================";

/// A report made of plain text lines
pub trait Report {
    /// Every line of the report, without terminators
    fn lines(&self) -> Vec<String>;

    /// Write the report, one newline-terminated line at a time
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails
    fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

/// Title-sorted listing of the catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueReport {
    /// `Welcome to <library>` banner
    welcome: String,
    /// One summary line per item, sorted by title
    entries: Vec<String>,
}

impl CatalogueReport {
    /// Build the report from the catalogue, sorting items by title
    #[must_use]
    pub fn build(welcome: &str, items: &[SharedItem]) -> Self {
        let mut sorted: Vec<&SharedItem> = items.iter().collect();
        sorted.sort_by(|a, b| a.borrow().title().cmp(b.borrow().title()));

        Self {
            welcome: welcome.to_string(),
            entries: sorted.into_iter().map(|item| item.borrow().summary()).collect(),
        }
    }

    /// Summary lines in report order
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Report for CatalogueReport {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            BORDER.to_string(),
            self.welcome.clone(),
            "Catalogue".to_string(),
            BORDER.to_string(),
        ];
        lines.extend(self.entries.iter().cloned());
        lines.push(BORDER.to_string());
        lines
    }
}

/// An overdue loan as it appears in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverdueEntry {
    /// Ledger position of the loan
    pub id: LoanId,
    /// Whole days past the due date
    pub days_overdue: i64,
    /// Loan summary line
    pub summary: String,
}

/// Outstanding loans past their due date, most overdue first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverdueReport {
    /// Overdue loans, sorted by days overdue descending
    entries: Vec<OverdueEntry>,
}

impl OverdueReport {
    /// Select the loans overdue at `now` and sort them by lateness.
    /// Loans equally late keep their ledger order.
    #[must_use]
    pub fn build(loans: &[Loan], now: NaiveDateTime) -> Self {
        let mut entries: Vec<OverdueEntry> = loans
            .iter()
            .enumerate()
            .filter(|(_, loan)| loan.is_overdue(now))
            .map(|(index, loan)| OverdueEntry {
                id: LoanId(index),
                days_overdue: loan.days_overdue(now),
                summary: loan.summary(),
            })
            .collect();
        entries.sort_by_key(|entry| Reverse(entry.days_overdue));

        Self { entries }
    }

    /// Overdue loans in report order
    #[must_use]
    pub fn entries(&self) -> &[OverdueEntry] {
        &self.entries
    }

    /// Whether nothing is overdue
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Report for OverdueReport {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![BORDER.to_string(), "Loans Overdue".to_string(), BORDER.to_string()];
        if self.entries.is_empty() {
            lines.push(BORDER.to_string());
        }
        for entry in &self.entries {
            lines.push(entry.summary.clone());
            lines.push(BORDER.to_string());
        }
        lines
    }
}

impl fmt::Display for CatalogueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lines().iter().try_for_each(|line| writeln!(f, "{line}"))
    }
}

impl fmt::Display for OverdueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lines().iter().try_for_each(|line| writeln!(f, "{line}"))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::arithmetic_side_effects)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    use super::{BORDER, CatalogueReport, OverdueReport, Report};
    use crate::{
        catalogue::{CatalogueItem, SharedItem},
        loan::{Loan, LoanId},
        person::Person,
    };

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 20)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid date")
    }

    fn book(title: &str) -> SharedItem {
        CatalogueItem::book(title, Person::new("John", "Doe")).into_shared()
    }

    fn loan_opened_days_ago(title: &str, days: i64) -> Loan {
        Loan::open(book(title), Person::new("Jose", "Rojas"), noon() - TimeDelta::days(days), 10)
            .expect("representable due date")
    }

    #[test]
    fn catalogue_sorted_by_title() {
        let items = vec![book("Zebra Book"), book("Apple Book")];
        let report = CatalogueReport::build("Welcome to Test", &items);

        let entries = report.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.first().is_some_and(|line| line.contains("Title=Apple Book")));
        assert!(entries.last().is_some_and(|line| line.contains("Title=Zebra Book")));
    }

    #[test]
    fn empty_catalogue_layout() {
        let report = CatalogueReport::build("Welcome to Test", &[]);
        assert_eq!(
            report.to_string(),
            format!("{BORDER}\nWelcome to Test\nCatalogue\n{BORDER}\n{BORDER}\n")
        );
    }

    #[test]
    fn overdue_sorted_by_days_late() {
        let loans = vec![
            loan_opened_days_ago("Recent", 3),
            loan_opened_days_ago("Two Days", 12),
            loan_opened_days_ago("Five Days", 15),
            loan_opened_days_ago("Also Two Days", 12),
        ];
        let report = OverdueReport::build(&loans, noon());

        let ids: Vec<LoanId> = report.entries().iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![LoanId(2), LoanId(1), LoanId(3)]);
        let days: Vec<i64> = report.entries().iter().map(|entry| entry.days_overdue).collect();
        assert_eq!(days, vec![5, 2, 2]);
    }

    #[test]
    fn overdue_lines_have_border_after_each_loan() {
        let loans = vec![loan_opened_days_ago("Book 1", 11)];
        let report = OverdueReport::build(&loans, noon());
        let lines = report.lines();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines.get(1).map(String::as_str), Some("Loans Overdue"));
        assert!(lines.get(3).is_some_and(|line| line.starts_with("Loan: User=Jose Rojas")));
        assert_eq!(lines.get(4).map(String::as_str), Some(BORDER));
    }

    #[test]
    fn nothing_overdue_is_a_single_border_block() {
        let report = OverdueReport::build(&[loan_opened_days_ago("Book 1", 1)], noon());
        assert!(report.is_empty());
        assert_eq!(report.to_string(), format!("{BORDER}\nLoans Overdue\n{BORDER}\n{BORDER}\n"));
    }

    #[test]
    fn write_to_emits_every_line() {
        let report = OverdueReport::build(&[], noon());
        let mut out = Vec::new();
        assert!(report.write_to(&mut out).is_ok());
        assert_eq!(String::from_utf8(out).ok(), Some(report.to_string()));
    }
}
