//! Loan terms, EMI and lazy schedule generation

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::growth::{compound, RatePeriod};

/// Balances at or below this are treated as fully repaid
pub(crate) const BALANCE_EPSILON: f64 = 1e-6;

/// Longest loan tenure accepted
pub const MAX_TENURE_MONTHS: u32 = 1_200;

/// Treatment of interest during a moratorium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoratoriumMode {
    /// Interest accrues and capitalises onto the balance
    #[default]
    Accrue,
    /// Interest is paid every month; the balance stays flat
    PayInterest,
}

/// Terms of a monthly-compounding loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: f64,

    /// Annual rate in percent
    pub annual_rate: f64,

    pub tenure_months: u32,

    /// Months at the start of the tenure with no principal repayment
    #[serde(default)]
    pub moratorium_months: u32,

    #[serde(default)]
    pub moratorium_mode: MoratoriumMode,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate: f64, tenure_months: u32) -> Self {
        Self {
            principal,
            annual_rate,
            tenure_months,
            moratorium_months: 0,
            moratorium_mode: MoratoriumMode::Accrue,
        }
    }

    pub fn with_moratorium(mut self, months: u32, mode: MoratoriumMode) -> Self {
        self.moratorium_months = months;
        self.moratorium_mode = mode;
        self
    }

    pub fn monthly_rate(&self) -> f64 {
        RatePeriod::monthly(self.annual_rate).periodic_rate()
    }

    /// Months of EMI repayment after the moratorium
    pub fn repayment_months(&self) -> u32 {
        self.tenure_months.saturating_sub(self.moratorium_months)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.principal.is_finite() && self.principal > 0.0) {
            return Err(CalcError::invalid("Loan principal must be positive"));
        }
        if !(self.annual_rate.is_finite() && self.annual_rate >= 0.0) {
            return Err(CalcError::invalid("Interest rate cannot be negative"));
        }
        if self.tenure_months == 0 {
            return Err(CalcError::invalid("Loan tenure must be at least one month"));
        }
        if self.tenure_months > MAX_TENURE_MONTHS {
            return Err(CalcError::invalid(format!(
                "Loan tenure cannot exceed {} months",
                MAX_TENURE_MONTHS
            )));
        }
        if self.moratorium_months >= self.tenure_months {
            return Err(CalcError::invalid(
                "Moratorium must leave at least one repayment month within the tenure",
            ));
        }
        Ok(())
    }
}

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based month number
    pub period_index: u32,
    pub opening_balance: f64,
    /// Amount paid this month (EMI, interest only, or zero under accrual)
    pub payment: f64,
    pub interest_component: f64,
    /// Balance reduction; negative when interest capitalises
    pub principal_component: f64,
    pub closing_balance: f64,
}

/// Standard fixed installment: P * r * (1+r)^n / ((1+r)^n - 1)
pub fn compute_emi(principal: f64, annual_rate: f64, tenure_months: u32) -> f64 {
    emi_for_rate(principal, RatePeriod::monthly(annual_rate).periodic_rate(), tenure_months)
}

pub(crate) fn emi_for_rate(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        return principal;
    }
    if monthly_rate.abs() < 1e-10 {
        return principal / months as f64;
    }
    let growth = compound(monthly_rate, i64::from(months));
    principal * monthly_rate * growth / (growth - 1.0)
}

/// A contiguous run of months sharing one repayment rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Phase {
    Moratorium { months: u32, mode: MoratoriumMode },
    /// Fixed EMI for at most `months` months; ends early once the balance clears
    Installment { emi: f64, months: u32 },
}

impl Phase {
    pub(crate) fn months(&self) -> u32 {
        match self {
            Phase::Moratorium { months, .. } | Phase::Installment { months, .. } => *months,
        }
    }

    pub(crate) fn with_months(self, months: u32) -> Self {
        match self {
            Phase::Moratorium { mode, .. } => Phase::Moratorium { months, mode },
            Phase::Installment { emi, .. } => Phase::Installment { emi, months },
        }
    }
}

/// Lazy, finite, restartable monthly schedule
#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationSchedule {
    pub(crate) principal: f64,
    pub(crate) monthly_rate: f64,
    pub(crate) phases: Vec<Phase>,
    /// Lump sums paid together with the installment of the given month
    pub(crate) prepayments: Vec<(u32, f64)>,
}

/// Aggregates over a full schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub installments: u32,
    /// Fixed installment of the final repayment phase
    pub emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    /// Interest added to the balance during an accrual moratorium
    pub capitalized_interest: f64,
    pub total_principal: f64,
    pub final_closing_balance: f64,
}

/// Validate terms and build the schedule
///
/// The post-moratorium EMI is computed over the remaining months on the
/// balance left at the end of the moratorium.
pub fn build_schedule(terms: &LoanTerms) -> Result<AmortizationSchedule> {
    terms.validate()?;

    let monthly_rate = terms.monthly_rate();
    let mut phases = Vec::with_capacity(2);

    let mut balance = terms.principal;
    if terms.moratorium_months > 0 {
        phases.push(Phase::Moratorium {
            months: terms.moratorium_months,
            mode: terms.moratorium_mode,
        });
        if terms.moratorium_mode == MoratoriumMode::Accrue {
            balance *= compound(monthly_rate, i64::from(terms.moratorium_months));
        }
    }

    let repayment_months = terms.repayment_months();
    let emi = emi_for_rate(balance, monthly_rate, repayment_months);
    phases.push(Phase::Installment { emi, months: repayment_months });

    debug!(
        "Built schedule: principal={:.2} rate={}% tenure={} moratorium={} emi={:.2}",
        terms.principal, terms.annual_rate, terms.tenure_months, terms.moratorium_months, emi
    );

    Ok(AmortizationSchedule {
        principal: terms.principal,
        monthly_rate,
        phases,
        prepayments: Vec::new(),
    })
}

impl AmortizationSchedule {
    /// Fresh iterator over the rows, starting from month 1
    pub fn iter(&self) -> ScheduleIter<'_> {
        ScheduleIter {
            schedule: self,
            phase_idx: 0,
            months_into_phase: 0,
            period: 0,
            balance: self.principal,
            done: false,
        }
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// EMI of the final repayment phase
    pub fn installment(&self) -> f64 {
        self.phases
            .iter()
            .rev()
            .find_map(|phase| match phase {
                Phase::Installment { emi, .. } => Some(*emi),
                Phase::Moratorium { .. } => None,
            })
            .unwrap_or(0.0)
    }

    /// Upper bound on the number of rows
    pub fn max_months(&self) -> u32 {
        self.phases.iter().map(Phase::months).sum()
    }

    /// Collect every row
    pub fn rows(&self) -> Vec<AmortizationRow> {
        self.iter().collect()
    }

    pub fn summary(&self) -> ScheduleSummary {
        let mut summary = ScheduleSummary {
            installments: 0,
            emi: self.installment(),
            total_payment: 0.0,
            total_interest: 0.0,
            capitalized_interest: 0.0,
            total_principal: 0.0,
            final_closing_balance: self.principal,
        };

        for row in self.iter() {
            summary.installments += 1;
            summary.total_payment += row.payment;
            summary.total_interest += row.interest_component;
            summary.total_principal += row.principal_component;
            if row.principal_component < 0.0 {
                summary.capitalized_interest -= row.principal_component;
            }
            summary.final_closing_balance = row.closing_balance;
        }

        summary
    }

    fn prepayment_at(&self, period: u32) -> f64 {
        self.prepayments
            .iter()
            .filter(|(p, _)| *p == period)
            .map(|(_, amount)| amount)
            .sum()
    }
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = AmortizationRow;
    type IntoIter = ScheduleIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Month-by-month row generator
pub struct ScheduleIter<'a> {
    schedule: &'a AmortizationSchedule,
    phase_idx: usize,
    months_into_phase: u32,
    period: u32,
    balance: f64,
    done: bool,
}

impl Iterator for ScheduleIter<'_> {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<AmortizationRow> {
        if self.done {
            return None;
        }

        // Skip exhausted (or empty) phases
        let phase = loop {
            let Some(phase) = self.schedule.phases.get(self.phase_idx) else {
                self.done = true;
                return None;
            };
            if self.months_into_phase < phase.months() {
                break *phase;
            }
            self.phase_idx += 1;
            self.months_into_phase = 0;
        };

        self.period += 1;
        self.months_into_phase += 1;

        let is_last_phase = self.phase_idx + 1 == self.schedule.phases.len();
        let closes_tenure = is_last_phase && self.months_into_phase == phase.months();

        let opening = self.balance;
        let interest = opening * self.schedule.monthly_rate;

        let (mut payment, mut principal_component) = match phase {
            Phase::Moratorium { mode: MoratoriumMode::Accrue, .. } => (0.0, -interest),
            Phase::Moratorium { mode: MoratoriumMode::PayInterest, .. } => (interest, 0.0),
            Phase::Installment { emi, .. } => {
                if closes_tenure || opening + interest <= emi + BALANCE_EPSILON {
                    (opening + interest, opening)
                } else {
                    (emi, emi - interest)
                }
            }
        };

        let extra = self.schedule.prepayment_at(self.period);
        if extra > 0.0 {
            payment += extra;
            principal_component += extra;
        }

        let mut closing = opening - principal_component;
        if closing <= BALANCE_EPSILON {
            // Residual rounding goes into the final principal component
            principal_component = opening;
            payment = interest + opening;
            closing = 0.0;
            self.done = true;
        }

        self.balance = closing;

        Some(AmortizationRow {
            period_index: self.period,
            opening_balance: opening,
            payment,
            interest_component: interest,
            principal_component,
            closing_balance: closing,
        })
    }
}
