use crate::{
    catalogue::Summary,
    events::LoanEvent,
    loan::{Loan, LoanId},
    loan_state::LoanState,
};

/// Trait for loan lifecycle observation
pub trait LoanObserver {
    /// Called after a loan changed in response to `event`
    fn on_loan_event(&self, id: LoanId, loan: &Loan, event: &LoanEvent);
}

/// Logs every loan lifecycle event
#[derive(Debug)]
pub struct LoanLogger;

impl LoanObserver for LoanLogger {
    fn on_loan_event(&self, id: LoanId, loan: &Loan, event: &LoanEvent) {
        tracing::info!(
            loan = %id,
            ?event,
            state = %loan.state().get_description(),
            summary = %loan.summary(),
            "Loan updated"
        );
    }
}

/// Warns when an item comes back after its due date
#[derive(Debug)]
pub struct LateReturnNotifier;

impl LoanObserver for LateReturnNotifier {
    fn on_loan_event(&self, id: LoanId, loan: &Loan, event: &LoanEvent) {
        match (event, loan.state()) {
            (LoanEvent::Return, LoanState::Returned(at)) if at > loan.due_date() => {
                tracing::warn!(
                    loan = %id,
                    user = %loan.user().full_name(),
                    days_late = loan.days_overdue(at),
                    "Item returned late"
                );
            }
            _ => {}
        }
    }
}
