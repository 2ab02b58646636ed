//! Home buying: affordability and rent versus buy

use serde::Deserialize;

use super::validate::{at_least_one, horizon_months, non_negative, percent, positive};
use super::{finish, CalculatorResult, Category, ResultBuilder};
use crate::amortization::compute_emi;
use crate::error::{CalcError, Result};
use crate::growth::{
    future_value_annuity, future_value_lump_sum, present_value_annuity, AnnuityPlan, PaymentTiming, RatePeriod,
};

fn default_home_loan_rate() -> f64 {
    8.5
}

fn default_home_loan_years() -> u32 {
    20
}

fn default_foir() -> f64 {
    50.0
}

fn default_down_payment() -> f64 {
    20.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HomeLoanAffordabilityRequest {
    pub monthly_income: f64,
    #[serde(default)]
    pub existing_emis: f64,
    #[serde(default = "default_home_loan_rate")]
    pub interest_rate: f64,
    #[serde(default = "default_home_loan_years")]
    pub loan_tenure_years: u32,
    /// Share of income lenders allow for all EMIs (fixed obligations to income ratio)
    #[serde(default = "default_foir")]
    pub foir_percent: f64,
    #[serde(default = "default_down_payment")]
    pub down_payment_percent: f64,
}

/// Largest loan and property price supported by the income left after existing EMIs
pub fn home_loan_affordability_calculator(request: &HomeLoanAffordabilityRequest) -> CalculatorResult {
    finish(Category::HomeLoan, home_loan_affordability(request))
}

fn home_loan_affordability(request: &HomeLoanAffordabilityRequest) -> Result<ResultBuilder> {
    positive("Monthly income", request.monthly_income)?;
    non_negative("Existing EMIs", request.existing_emis)?;
    non_negative("Interest rate", request.interest_rate)?;
    at_least_one("Loan tenure", request.loan_tenure_years)?;
    percent("FOIR", request.foir_percent)?;
    percent("Down payment", request.down_payment_percent)?;
    if request.down_payment_percent >= 100.0 {
        return Err(CalcError::invalid("Down payment must be less than 100%"));
    }

    let max_emi = request.monthly_income * request.foir_percent / 100.0 - request.existing_emis;
    if max_emi <= 0.0 {
        return Err(CalcError::invalid(
            "Existing EMIs already use the full repayment capacity",
        ));
    }

    let months = horizon_months("Loan tenure", request.loan_tenure_years)?;
    let max_loan_amount = present_value_annuity(
        max_emi,
        &RatePeriod::monthly(request.interest_rate),
        months,
        PaymentTiming::End,
    );
    let property_value = max_loan_amount / (1.0 - request.down_payment_percent / 100.0);
    let down_payment = property_value - max_loan_amount;

    let existing_share = request.existing_emis / request.monthly_income * 100.0;
    let recommendation = if existing_share > request.foir_percent / 2.0 {
        "⚠️ Existing EMIs take a large share of income; clearing them raises your home budget"
    } else {
        "🏡 Keep the EMI within this limit to stay comfortably eligible"
    };

    Ok(ResultBuilder::new(Category::HomeLoan)
        .number("max_emi", max_emi)
        .number("max_loan_amount", max_loan_amount)
        .number("property_value", property_value)
        .number("down_payment", down_payment)
        .integer("loan_tenure_years", request.loan_tenure_years as i64)
        .recommendation(recommendation))
}

fn default_rent_increase() -> f64 {
    3.0
}

fn default_appreciation() -> f64 {
    5.0
}

fn default_maintenance() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RentVsBuyRequest {
    pub property_price: f64,
    pub monthly_rent: f64,
    pub down_payment_percent: f64,
    pub loan_tenure_years: u32,
    pub home_loan_rate: f64,
    #[serde(default = "default_rent_increase")]
    pub annual_rent_increase: f64,
    #[serde(default = "default_appreciation")]
    pub annual_property_appreciation: f64,
    /// Yearly upkeep as a percent of the purchase price
    #[serde(default = "default_maintenance")]
    pub maintenance_percent: f64,
}

/// Cost of buying (net of appreciation) against rent paid over the loan tenure
pub fn rent_vs_buy_calculator(request: &RentVsBuyRequest) -> CalculatorResult {
    finish(Category::Property, rent_vs_buy(request))
}

fn rent_vs_buy(request: &RentVsBuyRequest) -> Result<ResultBuilder> {
    positive("Property price", request.property_price)?;
    positive("Monthly rent", request.monthly_rent)?;
    percent("Down payment", request.down_payment_percent)?;
    at_least_one("Loan tenure", request.loan_tenure_years)?;
    non_negative("Home loan rate", request.home_loan_rate)?;
    non_negative("Rent increase", request.annual_rent_increase)?;
    non_negative("Maintenance", request.maintenance_percent)?;

    let years = request.loan_tenure_years;
    let months = horizon_months("Loan tenure", years)?;
    let down_payment = request.property_price * request.down_payment_percent / 100.0;
    let loan_amount = request.property_price - down_payment;
    let monthly_emi = if loan_amount > 0.0 {
        compute_emi(loan_amount, request.home_loan_rate, months)
    } else {
        0.0
    };

    let total_maintenance = request.property_price * request.maintenance_percent / 100.0 * years as f64;
    let buy_total_cost = down_payment + monthly_emi * months as f64 + total_maintenance;

    // Rent rises once a year: a level annual annuity growing at the escalation rate
    let rent_total_cost = future_value_annuity(&AnnuityPlan::level(
        request.monthly_rent * 12.0,
        RatePeriod::annual(request.annual_rent_increase),
        years,
    ));

    let property_value_after_tenure = future_value_lump_sum(
        request.property_price,
        &RatePeriod::annual(request.annual_property_appreciation),
        years as f64,
    );
    let net_buying_cost = buy_total_cost - property_value_after_tenure;

    let recommendation = if net_buying_cost < rent_total_cost {
        "🏠 Buying is more advantageous"
    } else {
        "🏠 Renting is more cost-effective"
    };

    Ok(ResultBuilder::new(Category::Property)
        .number("buy_total_cost", buy_total_cost)
        .number("rent_total_cost", rent_total_cost)
        .number("property_value_after_tenure", property_value_after_tenure)
        .number("net_buying_cost", net_buying_cost)
        .number("monthly_emi", monthly_emi)
        .number("down_payment", down_payment)
        .recommendation(recommendation))
}
