//! Compound growth and annuity primitives
//!
//! Every goal, retirement and education calculator reduces to "inflate a
//! target, then solve for the contribution that reaches it". These
//! primitives assume validated input; calculators check ranges first.

mod rate;
mod annuity;

pub(crate) use rate::compound;
pub use rate::{RatePeriod, future_value_lump_sum, present_value_lump_sum, inflate, real_rate};
pub use annuity::{
    AnnuityPlan, PaymentTiming,
    future_value_annuity, present_value_annuity, total_contributions,
    required_periodic_contribution,
};
