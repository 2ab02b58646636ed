//! Progressive slab tables for the two regimes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Income tax regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// Deductions and exemptions allowed
    Old,
    /// Lower slabs, no deductions
    New,
}

impl TaxRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegime::Old => "old",
            TaxRegime::New => "new",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "old" => Some(TaxRegime::Old),
            "new" => Some(TaxRegime::New),
            _ => None,
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One income band; `upper_bound` of None means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub upper_bound: Option<f64>,
    /// Marginal rate in percent
    pub rate_percent: f64,
}

impl TaxSlab {
    pub fn up_to(upper_bound: f64, rate_percent: f64) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate_percent,
        }
    }

    pub fn above(rate_percent: f64) -> Self {
        Self {
            upper_bound: None,
            rate_percent,
        }
    }
}

/// Tax on `taxable_income` with each band taxed only on the income inside it
///
/// Slabs must be in ascending order of upper bound.
pub fn compute_slab_tax(taxable_income: f64, slabs: &[TaxSlab]) -> f64 {
    let income = taxable_income.max(0.0);
    let mut lower = 0.0;
    let mut tax = 0.0;

    for slab in slabs {
        if income <= lower {
            break;
        }
        let upper = slab.upper_bound.unwrap_or(f64::INFINITY);
        let in_band = income.min(upper) - lower;
        tax += in_band * slab.rate_percent / 100.0;
        lower = upper;
    }

    tax
}

/// Statutory parameters for both regimes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxTables {
    pub old_regime: Vec<TaxSlab>,
    pub new_regime: Vec<TaxSlab>,

    /// Cap on section 80C deductions (old regime only)
    pub section_80c_cap: f64,

    /// Health and education cess on the slab tax (percent)
    pub cess_percent: f64,
}

impl TaxTables {
    /// Indian individual slabs (below 60 years)
    pub fn india_default() -> Self {
        Self {
            old_regime: vec![
                TaxSlab::up_to(250_000.0, 0.0),
                TaxSlab::up_to(500_000.0, 5.0),
                TaxSlab::up_to(1_000_000.0, 20.0),
                TaxSlab::above(30.0),
            ],
            new_regime: vec![
                TaxSlab::up_to(300_000.0, 0.0),
                TaxSlab::up_to(600_000.0, 5.0),
                TaxSlab::up_to(900_000.0, 10.0),
                TaxSlab::up_to(1_200_000.0, 15.0),
                TaxSlab::up_to(1_500_000.0, 20.0),
                TaxSlab::above(30.0),
            ],
            section_80c_cap: 150_000.0,
            cess_percent: 4.0,
        }
    }

    pub fn slabs(&self, regime: TaxRegime) -> &[TaxSlab] {
        match regime {
            TaxRegime::Old => &self.old_regime,
            TaxRegime::New => &self.new_regime,
        }
    }

    /// Slab tax plus cess
    pub fn tax_for(&self, regime: TaxRegime, taxable_income: f64) -> f64 {
        let slab_tax = compute_slab_tax(taxable_income, self.slabs(regime));
        slab_tax * (1.0 + self.cess_percent / 100.0)
    }
}

impl Default for TaxTables {
    fn default() -> Self {
        Self::india_default()
    }
}
