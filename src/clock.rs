use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, Utc};
pub use mockable::{Clock, DefaultClock};

use crate::error::{LibraryError, LibraryResult};

/// `dd-MM-yyyy`, used for due and return dates in loan summaries
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// `dd-MM-yyyy HH:mm:ss`, used on receipts
pub const DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Read the wall-clock time as a local date-time
#[must_use]
pub fn local_now(clock: &dyn Clock) -> NaiveDateTime {
    clock.local().naive_local()
}

/// Shift `at` by a signed number of whole days
///
/// # Errors
///
/// Returns `LibraryError::DateOutOfRange` if the result is not representable
pub fn add_days(at: NaiveDateTime, days: i64) -> LibraryResult<NaiveDateTime> {
    TimeDelta::try_days(days)
        .and_then(|delta| at.checked_add_signed(delta))
        .ok_or_else(|| LibraryError::DateOutOfRange(format!("{at} shifted by {days} days")))
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    /// Create a clock frozen at `now`
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock to `now`
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock() = now;
    }

    /// Move the clock forward (or back, for a negative delta)
    pub fn advance(&self, delta: TimeDelta) {
        let mut guard = self.lock();
        if let Some(moved) = guard.checked_add_signed(delta) {
            *guard = moved;
        }
    }

    /// Move the clock by whole days
    pub fn advance_days(&self, days: i64) {
        if let Some(delta) = TimeDelta::try_days(days) {
            self.advance(delta);
        }
    }

    /// Lock the current time, recovering from a poisoned lock
    fn lock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};

    use super::{Clock, ManualClock, add_days};
    use crate::error::LibraryError;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("valid timestamp");
        let clock = ManualClock::new(start);
        assert_eq!(clock.utc(), start);

        clock.advance_days(3);
        assert_eq!(clock.utc().signed_duration_since(start), TimeDelta::days(3));

        clock.advance(TimeDelta::hours(-1));
        clock.set(start);
        assert_eq!(clock.utc(), start);
    }

    #[test]
    fn add_days_accepts_negative_shifts() -> Result<(), LibraryError> {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid date");
        assert_eq!(add_days(at, 10)?.format("%d-%m-%Y").to_string(), "11-03-2024");
        assert_eq!(add_days(at, -1)?.format("%d-%m-%Y").to_string(), "29-02-2024");
        Ok(())
    }

    #[test]
    fn add_days_reports_overflow() {
        let at = NaiveDate::MAX.and_hms_opt(0, 0, 0).expect("valid time");
        assert!(matches!(add_days(at, 1), Err(LibraryError::DateOutOfRange(_))));
    }
}
