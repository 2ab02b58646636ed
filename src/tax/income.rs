//! Salary income tax under both regimes

use serde::{Deserialize, Serialize};

use super::hra::compute_hra_exemption;
use super::slabs::{TaxRegime, TaxTables};

/// Annual salary figures for a tax computation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxInput {
    pub annual_salary: f64,
    pub section_80c_deduction: f64,
    pub hra_received: f64,
    pub rent_paid: f64,
    /// Basic salary component used by the HRA rule
    pub basic_salary: f64,
    pub metro_city: bool,
}

/// Tax under both regimes and the cheaper choice
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxResult {
    pub hra_exemption: f64,
    /// 80C deduction after the statutory cap
    pub deduction_80c: f64,
    pub taxable_income_old: f64,
    pub taxable_income_new: f64,
    pub tax_old_regime: f64,
    pub tax_new_regime: f64,
    pub recommended_regime: TaxRegime,
    pub savings_if_recommended: f64,
}

/// Compare old-regime tax (after HRA and capped 80C) with new-regime tax
/// on gross salary
///
/// An exact tie recommends the old regime.
pub fn compute_income_tax(input: &TaxInput, tables: &TaxTables) -> TaxResult {
    let hra_exemption = compute_hra_exemption(
        input.basic_salary,
        input.hra_received,
        input.rent_paid,
        input.metro_city,
    );
    let deduction_80c = input.section_80c_deduction.clamp(0.0, tables.section_80c_cap);

    let taxable_income_old = (input.annual_salary - hra_exemption - deduction_80c).max(0.0);
    let taxable_income_new = input.annual_salary.max(0.0);

    let tax_old_regime = tables.tax_for(TaxRegime::Old, taxable_income_old);
    let tax_new_regime = tables.tax_for(TaxRegime::New, taxable_income_new);

    let recommended_regime = if tax_new_regime < tax_old_regime {
        TaxRegime::New
    } else {
        TaxRegime::Old
    };

    TaxResult {
        hra_exemption,
        deduction_80c,
        taxable_income_old,
        taxable_income_new,
        tax_old_regime,
        tax_new_regime,
        recommended_regime,
        savings_if_recommended: (tax_old_regime - tax_new_regime).abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn salaried() -> TaxInput {
        TaxInput {
            annual_salary: 1_200_000.0,
            section_80c_deduction: 150_000.0,
            hra_received: 240_000.0,
            rent_paid: 300_000.0,
            basic_salary: 600_000.0,
            metro_city: false,
        }
    }

    #[test]
    fn test_old_regime_wins_with_deductions() {
        let tables = TaxTables::india_default();
        let result = compute_income_tax(&salaried(), &tables);

        assert_relative_eq!(result.hra_exemption, 240_000.0, epsilon = 1e-6);
        assert_relative_eq!(result.taxable_income_old, 810_000.0, epsilon = 1e-6);
        assert_relative_eq!(result.tax_old_regime, 74_500.0 * 1.04, epsilon = 1e-6);
        assert_relative_eq!(result.tax_new_regime, 90_000.0 * 1.04, epsilon = 1e-6);
        assert_eq!(result.recommended_regime, TaxRegime::Old);
        assert_relative_eq!(result.savings_if_recommended, 15_500.0 * 1.04, epsilon = 1e-6);
    }

    #[test]
    fn test_new_regime_wins_without_deductions() {
        let tables = TaxTables::india_default();
        let input = TaxInput {
            annual_salary: 1_200_000.0,
            ..Default::default()
        };
        let result = compute_income_tax(&input, &tables);
        assert_eq!(result.recommended_regime, TaxRegime::New);
        assert!(result.tax_new_regime < result.tax_old_regime);
    }

    #[test]
    fn test_80c_capped() {
        let tables = TaxTables::india_default();
        let input = TaxInput {
            annual_salary: 900_000.0,
            section_80c_deduction: 400_000.0,
            ..Default::default()
        };
        let result = compute_income_tax(&input, &tables);
        assert_eq!(result.deduction_80c, 150_000.0);
        assert_relative_eq!(result.taxable_income_old, 750_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_tie_goes_to_old_regime() {
        let tables = TaxTables::india_default();
        // Both regimes are nil below the exemption limits
        let input = TaxInput {
            annual_salary: 200_000.0,
            ..Default::default()
        };
        let result = compute_income_tax(&input, &tables);
        assert_eq!(result.tax_old_regime, result.tax_new_regime);
        assert_eq!(result.recommended_regime, TaxRegime::Old);
        assert_eq!(result.savings_if_recommended, 0.0);
    }

    #[test]
    fn test_deductions_cannot_push_income_negative() {
        let tables = TaxTables::india_default();
        let input = TaxInput {
            annual_salary: 100_000.0,
            section_80c_deduction: 150_000.0,
            ..Default::default()
        };
        let result = compute_income_tax(&input, &tables);
        assert_eq!(result.taxable_income_old, 0.0);
        assert_eq!(result.tax_old_regime, 0.0);
    }
}
