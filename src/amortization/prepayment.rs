//! Part-prepayment with re-amortization of the remaining balance

use log::debug;
use serde::{Deserialize, Serialize};

use super::schedule::{emi_for_rate, AmortizationSchedule, MoratoriumMode, Phase, BALANCE_EPSILON};
use crate::error::{CalcError, Result};
use crate::growth::compound;

/// How the reduced balance is re-amortized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepaymentMode {
    /// Keep the EMI and finish earlier
    #[default]
    ReduceTenure,
    /// Keep the tenure and lower the EMI
    ReduceEmi,
}

/// Result of applying a prepayment to a schedule
#[derive(Debug, Clone, PartialEq)]
pub struct PrepaymentOutcome {
    pub schedule: AmortizationSchedule,
    /// Interest over the original schedule minus interest over the new one
    pub interest_saved: f64,
    /// Number of monthly rows in the new schedule
    pub new_tenure_months: u32,
    /// EMI after the prepayment (0 if the prepayment closes the loan)
    pub new_emi: f64,
}

/// Pay `prepayment_amount` together with installment `at_period` and
/// rebuild the schedule from the reduced balance
///
/// Prepayments already scheduled after `at_period` are discarded, since the
/// remainder of the loan is re-amortized.
pub fn apply_prepayment(
    schedule: &AmortizationSchedule,
    prepayment_amount: f64,
    at_period: u32,
    mode: PrepaymentMode,
) -> Result<PrepaymentOutcome> {
    if !(prepayment_amount.is_finite() && prepayment_amount > 0.0) {
        return Err(CalcError::invalid("Prepayment amount must be positive"));
    }
    if at_period == 0 {
        return Err(CalcError::invalid("Prepayment month must be at least 1"));
    }

    let row = schedule
        .iter()
        .nth((at_period - 1) as usize)
        .ok_or_else(|| {
            CalcError::invalid(format!(
                "Prepayment month {} is beyond the end of the loan",
                at_period
            ))
        })?;

    let outstanding = row.closing_balance;
    if prepayment_amount > outstanding + BALANCE_EPSILON {
        return Err(CalcError::invalid(format!(
            "Prepayment of {:.2} exceeds the outstanding balance of {:.2} after month {}",
            prepayment_amount, outstanding, at_period
        )));
    }

    // Split phases at the prepayment month
    let mut prefix = Vec::new();
    let mut remaining_moratorium = None;
    let mut consumed = 0;
    for phase in &schedule.phases {
        let months = phase.months();
        let used = months.min(at_period.saturating_sub(consumed));
        if used > 0 {
            prefix.push(phase.with_months(used));
        }
        let left = months - used;
        if left > 0 {
            if let Phase::Moratorium { .. } = phase {
                remaining_moratorium = Some(phase.with_months(left));
            }
        }
        consumed += used;
    }

    // Repayment months left in the schedule as it actually runs, which an
    // earlier prepayment may have shortened below the nominal phase length
    let before = schedule.summary();
    let remaining_moratorium_months = remaining_moratorium.map_or(0, |phase| phase.months());
    let remaining_installment_months = before
        .installments
        .saturating_sub(at_period)
        .saturating_sub(remaining_moratorium_months);

    let monthly_rate = schedule.monthly_rate;
    let mut balance = outstanding - prepayment_amount;
    if let Some(Phase::Moratorium { months, mode: MoratoriumMode::Accrue }) = remaining_moratorium {
        balance *= compound(monthly_rate, i64::from(months));
    }

    let emi = match mode {
        PrepaymentMode::ReduceTenure => schedule.installment(),
        PrepaymentMode::ReduceEmi => emi_for_rate(balance, monthly_rate, remaining_installment_months),
    };

    let mut phases = prefix;
    phases.extend(remaining_moratorium);
    phases.push(Phase::Installment {
        emi,
        months: remaining_installment_months,
    });

    let existing_at_period: f64 = schedule
        .prepayments
        .iter()
        .filter(|(p, _)| *p == at_period)
        .map(|(_, amount)| amount)
        .sum();
    let mut prepayments: Vec<(u32, f64)> = schedule
        .prepayments
        .iter()
        .copied()
        .filter(|(p, _)| *p < at_period)
        .collect();
    prepayments.push((at_period, existing_at_period + prepayment_amount));

    let new_schedule = AmortizationSchedule {
        principal: schedule.principal,
        monthly_rate,
        phases,
        prepayments,
    };

    let after = new_schedule.summary();
    let new_emi = if after.installments == at_period {
        0.0
    } else {
        new_schedule.installment()
    };

    debug!(
        "Prepayment of {:.2} at month {} ({:?}): tenure {} -> {}, interest saved {:.2}",
        prepayment_amount,
        at_period,
        mode,
        before.installments,
        after.installments,
        before.total_interest - after.total_interest
    );

    Ok(PrepaymentOutcome {
        interest_saved: before.total_interest - after.total_interest,
        new_tenure_months: after.installments,
        new_emi,
        schedule: new_schedule,
    })
}
