//! Amortization engine: EMI formula, monthly schedules, moratoriums and prepayments
//!
//! # Schedule model
//!
//! A schedule is a list of phases walked month by month:
//! 1. **Moratorium**: no principal is repaid. Interest either capitalises
//!    onto the balance (`Accrue`, shown as a negative principal component)
//!    or is paid as it falls due (`PayInterest`).
//! 2. **Installment**: a fixed EMI. The last month of the last phase
//!    clears whatever balance remains, so the principal components always
//!    sum to the original principal.
//!
//! Rows are generated lazily on each call to [`AmortizationSchedule::iter`].
//!
//! # Example
//!
//! ```rust
//! use fincalc::amortization::{build_schedule, LoanTerms};
//!
//! let terms = LoanTerms::new(500_000.0, 12.0, 60);
//! let schedule = build_schedule(&terms).unwrap();
//! let last = schedule.iter().last().unwrap();
//! assert_eq!(last.closing_balance, 0.0);
//! ```

mod schedule;
mod prepayment;

pub use schedule::{
    AmortizationRow, AmortizationSchedule, LoanTerms, MoratoriumMode, ScheduleIter,
    ScheduleSummary, MAX_TENURE_MONTHS, build_schedule, compute_emi,
};
pub use prepayment::{PrepaymentMode, PrepaymentOutcome, apply_prepayment};
