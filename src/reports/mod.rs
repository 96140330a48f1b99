mod availability;
mod expenses;
mod general;

pub use availability::{AvailabilityLine, AvailabilityReport};
pub use expenses::ExpenseReport;
pub use general::GeneralReport;

/// Which report a chat command asked for.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReportKind {
    General,
    Expenses,
    Reimbursements
}
