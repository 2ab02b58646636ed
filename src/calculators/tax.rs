//! Tax calculators: HRA, income tax and capital gains

use chrono::NaiveDate;
use serde::Deserialize;

use super::validate::{non_negative, positive};
use super::{finish, CalculatorResult, Category, ResultBuilder};
use crate::capital_gains::{compute_capital_gains_tax, AssetType, CapitalGainsInput, CapitalGainsTable};
use crate::error::Result;
use crate::tax::{city_share_percent, compute_hra_exemption, compute_income_tax, TaxInput, TaxTables};

/// Assumed marginal bracket for the HRA saving estimate
const ASSUMED_TAX_BRACKET: f64 = 0.30;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HraRequest {
    /// Monthly basic salary
    pub basic_salary: f64,
    /// Monthly HRA received
    pub hra_received: f64,
    /// Monthly rent paid
    pub actual_rent: f64,
    #[serde(default)]
    pub metro_city: bool,
}

/// Annual HRA exemption from monthly salary figures
pub fn hra_calculator(request: &HraRequest) -> CalculatorResult {
    finish(Category::Tax, hra(request))
}

fn hra(request: &HraRequest) -> Result<ResultBuilder> {
    non_negative("Basic salary", request.basic_salary)?;
    non_negative("HRA received", request.hra_received)?;
    non_negative("Rent paid", request.actual_rent)?;

    let annual_basic = request.basic_salary * 12.0;
    let annual_hra = request.hra_received * 12.0;
    let annual_rent = request.actual_rent * 12.0;

    let hra_exempt = compute_hra_exemption(annual_basic, annual_hra, annual_rent, request.metro_city);
    let rent_excess = (annual_rent - annual_basic * 0.1).max(0.0);

    Ok(ResultBuilder::new(Category::Tax)
        .number("hra_received", annual_hra)
        .number("hra_exempt", hra_exempt)
        .number("hra_taxable", annual_hra - hra_exempt)
        .number("rent_excess", rent_excess)
        .integer("metro_exemption", city_share_percent(request.metro_city) as i64)
        .number("annual_tax_saving", hra_exempt * ASSUMED_TAX_BRACKET))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncomeTaxRequest {
    pub annual_salary: f64,
    #[serde(default)]
    pub section_80c_deduction: f64,
    /// Annual HRA received
    #[serde(default)]
    pub hra_received: f64,
    /// Annual rent paid
    #[serde(default)]
    pub rent_paid: f64,
    /// Annual basic salary
    #[serde(default)]
    pub basic_salary: f64,
    #[serde(default)]
    pub metro_city: bool,
}

/// Tax under both regimes with the cheaper one recommended
pub fn income_tax_calculator(request: &IncomeTaxRequest, tables: &TaxTables) -> CalculatorResult {
    finish(Category::Tax, income_tax(request, tables))
}

fn income_tax(request: &IncomeTaxRequest, tables: &TaxTables) -> Result<ResultBuilder> {
    non_negative("Annual salary", request.annual_salary)?;
    non_negative("Section 80C deduction", request.section_80c_deduction)?;
    non_negative("HRA received", request.hra_received)?;
    non_negative("Rent paid", request.rent_paid)?;
    non_negative("Basic salary", request.basic_salary)?;

    let input = TaxInput {
        annual_salary: request.annual_salary,
        section_80c_deduction: request.section_80c_deduction,
        hra_received: request.hra_received,
        rent_paid: request.rent_paid,
        basic_salary: request.basic_salary,
        metro_city: request.metro_city,
    };
    let result = compute_income_tax(&input, tables);

    let recommendation = if result.savings_if_recommended <= 0.0 {
        "🧾 Both regimes cost the same; the old regime keeps your deductions".to_string()
    } else {
        format!(
            "🧾 The {} regime saves {:.2} in tax",
            result.recommended_regime, result.savings_if_recommended
        )
    };

    Ok(ResultBuilder::new(Category::Tax)
        .number("annual_salary", request.annual_salary)
        .number("hra_exemption", result.hra_exemption)
        .number("deduction_80c", result.deduction_80c)
        .number("taxable_income_old", result.taxable_income_old)
        .number("taxable_income_new", result.taxable_income_new)
        .number("tax_old_regime", result.tax_old_regime)
        .number("tax_new_regime", result.tax_new_regime)
        .text("recommended_regime", result.recommended_regime.as_str())
        .number("savings_if_recommended", result.savings_if_recommended)
        .recommendation(recommendation))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapitalGainsRequest {
    pub asset_type: AssetType,
    pub purchase_price: f64,
    pub sale_price: f64,
    /// ISO 8601 date (YYYY-MM-DD)
    pub purchase_date: NaiveDate,
    pub sale_date: NaiveDate,
}

pub fn capital_gains_tax_calculator(request: &CapitalGainsRequest, table: &CapitalGainsTable) -> CalculatorResult {
    finish(Category::CapitalGains, capital_gains(request, table))
}

fn capital_gains(request: &CapitalGainsRequest, table: &CapitalGainsTable) -> Result<ResultBuilder> {
    positive("Purchase price", request.purchase_price)?;
    non_negative("Sale price", request.sale_price)?;

    let input = CapitalGainsInput {
        asset_type: request.asset_type,
        purchase_price: request.purchase_price,
        sale_price: request.sale_price,
        purchase_date: request.purchase_date,
        sale_date: request.sale_date,
    };
    let result = compute_capital_gains_tax(&input, table)?;

    Ok(ResultBuilder::new(Category::CapitalGains)
        .text("asset_type", request.asset_type.as_str())
        .number("capital_gain", result.capital_gain)
        .integer("holding_period_days", result.holding_period_days)
        .text("classification", result.classification.as_str())
        .number("tax_rate_applied", result.tax_rate_applied)
        .number("tax_liability", result.tax_liability)
        .number("net_gain", result.net_gain))
}
