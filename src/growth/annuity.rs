//! Level and step-up annuities

use serde::{Deserialize, Serialize};

use super::rate::{compound, RatePeriod};
use crate::error::{CalcError, Result};

/// When each contribution is made within its period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentTiming {
    /// Ordinary annuity: contribution at the end of the period
    #[default]
    End,
    /// Annuity due: contribution at the start of the period
    Beginning,
}

/// A level or escalating periodic investment stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnuityPlan {
    /// Contribution in the first period
    pub periodic_contribution: f64,

    pub rate: RatePeriod,

    /// Number of contribution periods
    pub total_periods: u32,

    /// Increase in contribution applied after every `periods_per_year` periods (percent)
    pub step_up_percent: f64,

    pub timing: PaymentTiming,
}

impl AnnuityPlan {
    /// Level ordinary annuity
    pub fn level(periodic_contribution: f64, rate: RatePeriod, total_periods: u32) -> Self {
        Self {
            periodic_contribution,
            rate,
            total_periods,
            step_up_percent: 0.0,
            timing: PaymentTiming::End,
        }
    }

    pub fn with_step_up(mut self, step_up_percent: f64) -> Self {
        self.step_up_percent = step_up_percent;
        self
    }

    pub fn with_timing(mut self, timing: PaymentTiming) -> Self {
        self.timing = timing;
        self
    }

    fn has_step_up(&self) -> bool {
        self.step_up_percent.abs() > 0.0
    }

    /// Iterate (contribution, periods) blocks; one block per year of periods
    fn blocks(&self) -> impl Iterator<Item = (f64, u32)> + '_ {
        let block_len = self.rate.periods_per_year.max(1);
        let step = 1.0 + self.step_up_percent / 100.0;
        let mut remaining = self.total_periods;
        let mut contribution = self.periodic_contribution;

        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let len = remaining.min(block_len);
            let block = (contribution, len);
            remaining -= len;
            contribution *= step;
            Some(block)
        })
    }
}

/// Future value of `periods` level contributions
fn level_future_value(contribution: f64, rate: &RatePeriod, periods: u32, timing: PaymentTiming) -> f64 {
    if rate.is_zero() {
        return contribution * periods as f64;
    }

    let r = rate.periodic_rate();
    let fv = contribution * (compound(r, i64::from(periods)) - 1.0) / r;
    match timing {
        PaymentTiming::End => fv,
        PaymentTiming::Beginning => fv * (1.0 + r),
    }
}

/// Future value of an annuity plan at the end of its last period
///
/// Step-up plans are accumulated block by block: the value carried from the
/// prior blocks grows over the current block while the block's own
/// contributions accumulate at the current level.
pub fn future_value_annuity(plan: &AnnuityPlan) -> f64 {
    if !plan.has_step_up() {
        return level_future_value(
            plan.periodic_contribution,
            &plan.rate,
            plan.total_periods,
            plan.timing,
        );
    }

    plan.blocks().fold(0.0, |accumulated, (contribution, len)| {
        accumulated * plan.rate.growth_factor(len as f64)
            + level_future_value(contribution, &plan.rate, len, plan.timing)
    })
}

/// Sum of all contributions made over the plan
pub fn total_contributions(plan: &AnnuityPlan) -> f64 {
    plan.blocks()
        .map(|(contribution, len)| contribution * len as f64)
        .sum()
}

/// Present value of `periods` level payments
pub fn present_value_annuity(payment: f64, rate: &RatePeriod, periods: u32, timing: PaymentTiming) -> f64 {
    if rate.is_zero() {
        return payment * periods as f64;
    }

    let r = rate.periodic_rate();
    let pv = payment * (1.0 - compound(r, -i64::from(periods))) / r;
    match timing {
        PaymentTiming::End => pv,
        PaymentTiming::Beginning => pv * (1.0 + r),
    }
}

/// Level end-of-period contribution that accumulates to `target_future_value`
pub fn required_periodic_contribution(
    target_future_value: f64,
    rate: &RatePeriod,
    periods: u32,
) -> Result<f64> {
    if periods == 0 {
        return Err(CalcError::invalid("Number of periods must be positive"));
    }
    if target_future_value < 0.0 {
        return Err(CalcError::invalid("Target future value cannot be negative"));
    }

    if rate.is_zero() {
        return Ok(target_future_value / periods as f64);
    }

    let r = rate.periodic_rate();
    Ok(target_future_value * r / (compound(r, i64::from(periods)) - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_level_ordinary_annuity() {
        // 1,000/month at 12% for 10 years
        let plan = AnnuityPlan::level(1_000.0, RatePeriod::monthly(12.0), 120);
        assert_relative_eq!(future_value_annuity(&plan), 230_038.69, epsilon = 0.01);
    }

    #[test]
    fn test_annuity_due_is_one_period_more_growth() {
        let rate = RatePeriod::monthly(12.0);
        let ordinary = future_value_annuity(&AnnuityPlan::level(1_000.0, rate, 120));
        let due = future_value_annuity(
            &AnnuityPlan::level(1_000.0, rate, 120).with_timing(PaymentTiming::Beginning),
        );
        assert_relative_eq!(due, ordinary * 1.01, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_rate_annuity() {
        let plan = AnnuityPlan::level(2_500.0, RatePeriod::monthly(0.0), 36);
        assert_eq!(future_value_annuity(&plan), 90_000.0);
    }

    #[test]
    fn test_step_up_matches_month_by_month_sum() {
        let rate = RatePeriod::monthly(10.0);
        let plan = AnnuityPlan::level(5_000.0, rate, 60)
            .with_step_up(10.0)
            .with_timing(PaymentTiming::Beginning);

        let r = rate.periodic_rate();
        let mut expected = 0.0;
        let mut sip = 5_000.0;
        for year in 0..5 {
            for month in 0..12 {
                let remaining = (5 - year) * 12 - month;
                expected += sip * (1.0 + r).powi(remaining);
            }
            sip *= 1.10;
        }

        assert_relative_eq!(future_value_annuity(&plan), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_step_up_partial_final_block() {
        let rate = RatePeriod::monthly(0.0);
        let plan = AnnuityPlan::level(100.0, rate, 18).with_step_up(50.0);
        // 12 x 100 + 6 x 150
        assert_relative_eq!(future_value_annuity(&plan), 2_100.0, epsilon = 1e-9);
        assert_relative_eq!(total_contributions(&plan), 2_100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_required_contribution_round_trip() {
        let rate = RatePeriod::monthly(12.0);
        let sip = required_periodic_contribution(5_000_000.0, &rate, 240).unwrap();
        let fv = future_value_annuity(&AnnuityPlan::level(sip, rate, 240));
        assert_relative_eq!(fv, 5_000_000.0, epsilon = 1e-4);
    }

    #[test]
    fn test_required_contribution_rejects_bad_input() {
        let rate = RatePeriod::monthly(8.0);
        assert!(required_periodic_contribution(1_000.0, &rate, 0).is_err());
        assert!(required_periodic_contribution(-1.0, &rate, 12).is_err());
        assert_eq!(
            required_periodic_contribution(1_200.0, &RatePeriod::monthly(0.0), 12).unwrap(),
            100.0
        );
    }

    #[test]
    fn test_present_value_annuity() {
        // 100/month for 12 months at 6% annual
        let pv = present_value_annuity(100.0, &RatePeriod::monthly(6.0), 12, PaymentTiming::End);
        assert!((pv - 1161.89).abs() < 0.01);
    }
}
