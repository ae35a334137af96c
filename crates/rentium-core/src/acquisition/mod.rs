pub mod amortization;
pub mod cashflow;
pub mod inputs;
pub mod lenient;
pub mod normalizer;
pub mod uncertainty;

pub use cashflow::{compute_results, loan_schedule, FinancialResults, LoanSchedule};
pub use inputs::{AcquisitionInputs, ProSettings};
