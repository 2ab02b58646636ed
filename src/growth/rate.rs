//! Rate conversions and lump-sum growth

use serde::{Deserialize, Serialize};

/// Below this periodic rate the closed-form formulas switch to their limits
pub(crate) const ZERO_RATE_EPSILON: f64 = 1e-10;

/// An annual percentage rate together with its compounding frequency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePeriod {
    /// Annual rate in percent (7.5 means 7.5%)
    pub annual_rate: f64,

    /// Compounding / contribution periods per year
    pub periods_per_year: u32,
}

impl RatePeriod {
    pub fn new(annual_rate: f64, periods_per_year: u32) -> Self {
        Self {
            annual_rate,
            periods_per_year,
        }
    }

    /// Monthly compounding
    pub fn monthly(annual_rate: f64) -> Self {
        Self::new(annual_rate, 12)
    }

    /// Annual compounding
    pub fn annual(annual_rate: f64) -> Self {
        Self::new(annual_rate, 1)
    }

    /// Effective rate per period as a decimal
    pub fn periodic_rate(&self) -> f64 {
        self.annual_rate / 100.0 / self.periods_per_year as f64
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.periodic_rate().abs() < ZERO_RATE_EPSILON
    }

    /// Growth factor over `periods` periods: (1 + r)^periods
    pub fn growth_factor(&self, periods: f64) -> f64 {
        if self.is_zero() {
            return 1.0;
        }
        (1.0 + self.periodic_rate()).powf(periods)
    }
}

/// (1 + rate)^periods for a whole number of periods, including exponents
/// outside the `i32` range
pub(crate) fn compound(rate: f64, periods: i64) -> f64 {
    match i32::try_from(periods) {
        Ok(n) => (1.0 + rate).powi(n),
        Err(_) => (1.0 + rate).powf(periods as f64),
    }
}

/// Future value of a single amount after `periods` compounding periods
pub fn future_value_lump_sum(principal: f64, rate: &RatePeriod, periods: f64) -> f64 {
    principal * rate.growth_factor(periods)
}

/// Present value of an amount due after `periods` compounding periods
pub fn present_value_lump_sum(amount: f64, rate: &RatePeriod, periods: f64) -> f64 {
    amount / rate.growth_factor(periods)
}

/// Compound a value by an annual inflation rate (percent) over `years`
pub fn inflate(value: f64, inflation_rate_percent: f64, years: f64) -> f64 {
    future_value_lump_sum(value, &RatePeriod::annual(inflation_rate_percent), years)
}

/// Inflation-adjusted rate in percent: (1 + nominal) / (1 + inflation) - 1
pub fn real_rate(nominal_percent: f64, inflation_percent: f64) -> f64 {
    ((1.0 + nominal_percent / 100.0) / (1.0 + inflation_percent / 100.0) - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_periodic_rate() {
        let rate = RatePeriod::new(7.5, 4);
        assert_relative_eq!(rate.periodic_rate(), 0.01875, epsilon = 1e-12);
    }

    #[test]
    fn test_lump_sum_quarterly() {
        // 100,000 at 7.5% compounded quarterly for 5 years
        let rate = RatePeriod::new(7.5, 4);
        let fv = future_value_lump_sum(100_000.0, &rate, 20.0);
        assert_relative_eq!(fv, 144_994.80, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_returns_principal() {
        let rate = RatePeriod::monthly(0.0);
        assert_eq!(future_value_lump_sum(5_000.0, &rate, 120.0), 5_000.0);
        assert_eq!(present_value_lump_sum(5_000.0, &rate, 120.0), 5_000.0);
    }

    #[test]
    fn test_inflate_matches_lump_sum() {
        let inflated = inflate(100_000.0, 6.0, 10.0);
        assert_relative_eq!(inflated, 100_000.0 * 1.06_f64.powi(10), epsilon = 1e-6);
    }

    #[test]
    fn test_compound_beyond_i32() {
        assert_eq!(compound(0.01, 6), 1.01_f64.powi(6));
        assert_eq!(compound(0.0, i64::from(u32::MAX)), 1.0);
        assert!(compound(0.01, i64::from(u32::MAX)).is_infinite());
        assert_eq!(compound(0.01, -i64::from(u32::MAX)), 0.0);
    }

    #[test]
    fn test_real_rate() {
        assert_relative_eq!(real_rate(8.0, 6.0), (1.08 / 1.06 - 1.0) * 100.0, epsilon = 1e-12);
        assert_relative_eq!(real_rate(6.0, 6.0), 0.0, epsilon = 1e-12);
    }
}
