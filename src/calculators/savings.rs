//! Savings and growth calculators: emergency fund, deposits, SIPs and schemes

use serde::Deserialize;

use super::validate::{at_least_one, horizon_months, non_negative, percent, positive, within_horizon};
use super::{finish, CalculatorResult, Category, ResultBuilder};
use crate::error::{CalcError, Result};
use crate::growth::{
    future_value_annuity, future_value_lump_sum, inflate, total_contributions, AnnuityPlan, PaymentTiming,
    RatePeriod,
};

/// Annual PPF deposit limit
pub const PPF_ANNUAL_LIMIT: f64 = 150_000.0;

/// Assumed marginal tax bracket for scheme tax benefits
const ASSUMED_TAX_BRACKET: f64 = 0.30;

/// Ceiling on the NPS tax benefit under 80CCD(1) and 80CCD(1B)
const NPS_MAX_TAX_BENEFIT: f64 = 46_800.0;

/// EPS pensionable salary ceiling
const EPS_SALARY_CEILING: f64 = 15_000.0;

/// Tax-free gratuity limit
const GRATUITY_TAX_FREE_LIMIT: f64 = 2_000_000.0;

fn default_six() -> u32 {
    6
}

fn default_quarterly() -> u32 {
    4
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmergencyFundsRequest {
    pub monthly_expenses: f64,

    /// Months of expenses to hold (default: 6)
    #[serde(default = "default_six")]
    pub months_coverage: u32,

    #[serde(default)]
    pub current_savings: f64,
}

pub fn emergency_funds_calculator(request: &EmergencyFundsRequest) -> CalculatorResult {
    finish(Category::EmergencyFund, emergency_funds(request))
}

fn emergency_funds(request: &EmergencyFundsRequest) -> Result<ResultBuilder> {
    positive("Monthly expenses", request.monthly_expenses)?;
    at_least_one("Months of coverage", request.months_coverage)?;
    non_negative("Current savings", request.current_savings)?;

    let required_fund = request.monthly_expenses * request.months_coverage as f64;
    let shortfall = (required_fund - request.current_savings).max(0.0);
    let months_covered = request.current_savings / request.monthly_expenses;

    let recommendation = if shortfall <= 0.0 {
        "✅ You have adequate emergency funds!"
    } else if months_covered >= 3.0 {
        "⚠️ You have partial coverage. Consider building up to full coverage."
    } else {
        "🚨 Critical: Build emergency fund immediately!"
    };

    Ok(ResultBuilder::new(Category::EmergencyFund)
        .number("required_fund", required_fund)
        .number("current_savings", request.current_savings)
        .number("shortfall", shortfall)
        .number("months_covered", months_covered)
        .recommendation(recommendation))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixedDepositRequest {
    pub principal: f64,
    /// Percent
    pub annual_rate: f64,
    pub tenure_years: f64,
    /// Compounding periods per year (default: 4 for quarterly)
    #[serde(default = "default_quarterly")]
    pub compounding_frequency: u32,
}

pub fn fixed_deposit_calculator(request: &FixedDepositRequest) -> CalculatorResult {
    finish(Category::Deposit, fixed_deposit(request))
}

fn fixed_deposit(request: &FixedDepositRequest) -> Result<ResultBuilder> {
    positive("Principal", request.principal)?;
    non_negative("Interest rate", request.annual_rate)?;
    positive("Tenure", request.tenure_years)?;
    at_least_one("Compounding frequency", request.compounding_frequency)?;

    let rate = RatePeriod::new(request.annual_rate, request.compounding_frequency);
    let periods = request.compounding_frequency as f64 * request.tenure_years;
    let maturity_amount = future_value_lump_sum(request.principal, &rate, periods);
    let interest_earned = maturity_amount - request.principal;
    let effective_rate = ((maturity_amount / request.principal).powf(1.0 / request.tenure_years) - 1.0) * 100.0;

    Ok(ResultBuilder::new(Category::Deposit)
        .number("principal", request.principal)
        .number("maturity_amount", maturity_amount)
        .number("interest_earned", interest_earned)
        .number("effective_rate", effective_rate)
        .number("monthly_interest", interest_earned / (request.tenure_years * 12.0)))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MutualFundSipRequest {
    pub monthly_investment: f64,
    /// Expected annual return (percent)
    pub annual_return: f64,
    pub investment_period_years: u32,
    /// Yearly increase of the SIP amount (percent)
    #[serde(default)]
    pub step_up_percent: f64,
}

/// SIP instalments are invested at the start of each month
pub fn mutual_fund_sip_calculator(request: &MutualFundSipRequest) -> CalculatorResult {
    finish(Category::Investment, mutual_fund_sip(request))
}

fn mutual_fund_sip(request: &MutualFundSipRequest) -> Result<ResultBuilder> {
    positive("Monthly investment", request.monthly_investment)?;
    non_negative("Expected return", request.annual_return)?;
    at_least_one("Investment period", request.investment_period_years)?;
    non_negative("Step-up", request.step_up_percent)?;

    let months = horizon_months("Investment period", request.investment_period_years)?;
    let plan = AnnuityPlan::level(request.monthly_investment, RatePeriod::monthly(request.annual_return), months)
        .with_step_up(request.step_up_percent)
        .with_timing(PaymentTiming::Beginning);

    let total_invested = total_contributions(&plan);
    let maturity_amount = future_value_annuity(&plan);
    let capital_gains = maturity_amount - total_invested;

    Ok(ResultBuilder::new(Category::Investment)
        .number("total_invested", total_invested)
        .number("maturity_amount", maturity_amount)
        .number("capital_gains", capital_gains)
        .number("monthly_return", capital_gains / months as f64)
        .number("annual_return_rate", request.annual_return))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LumpsumInvestmentRequest {
    pub principal: f64,
    pub annual_return: f64,
    pub years: f64,
}

pub fn lumpsum_investment_calculator(request: &LumpsumInvestmentRequest) -> CalculatorResult {
    finish(Category::Investment, lumpsum_investment(request))
}

fn lumpsum_investment(request: &LumpsumInvestmentRequest) -> Result<ResultBuilder> {
    positive("Principal", request.principal)?;
    non_negative("Expected return", request.annual_return)?;
    positive("Investment period", request.years)?;

    let maturity_amount =
        future_value_lump_sum(request.principal, &RatePeriod::annual(request.annual_return), request.years);
    let wealth_gained = maturity_amount - request.principal;

    Ok(ResultBuilder::new(Category::Investment)
        .number("principal", request.principal)
        .number("maturity_amount", maturity_amount)
        .number("wealth_gained", wealth_gained)
        .number("absolute_return_percent", wealth_gained / request.principal * 100.0))
}

fn default_ppf_years() -> u32 {
    15
}

fn default_ppf_rate() -> f64 {
    7.1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PpfRequest {
    /// Capped at the annual deposit limit
    pub annual_contribution: f64,
    #[serde(default = "default_ppf_years")]
    pub contribution_years: u32,
    #[serde(default = "default_ppf_rate")]
    pub interest_rate: f64,
    /// Years the matured balance is left to grow without fresh deposits
    #[serde(default)]
    pub extend_years: u32,
}

pub fn ppf_calculator(request: &PpfRequest) -> CalculatorResult {
    finish(Category::SmallSavings, ppf(request))
}

fn ppf(request: &PpfRequest) -> Result<ResultBuilder> {
    positive("Annual contribution", request.annual_contribution)?;
    at_least_one("Contribution years", request.contribution_years)?;
    within_horizon("Contribution years", request.contribution_years)?;
    non_negative("Interest rate", request.interest_rate)?;

    let annual_contribution = request.annual_contribution.min(PPF_ANNUAL_LIMIT);
    let rate = RatePeriod::annual(request.interest_rate);
    let plan = AnnuityPlan::level(annual_contribution, rate, request.contribution_years);

    let maturity_amount = future_value_annuity(&plan);
    let total_contribution = total_contributions(&plan);
    let extended_amount = future_value_lump_sum(maturity_amount, &rate, request.extend_years as f64);

    Ok(ResultBuilder::new(Category::SmallSavings)
        .number("total_contribution", total_contribution)
        .number("maturity_amount", maturity_amount)
        .number("interest_earned", maturity_amount - total_contribution)
        .number("extended_amount", extended_amount)
        .number("tax_benefit", annual_contribution * ASSUMED_TAX_BRACKET)
        .integer("contribution_years", request.contribution_years as i64))
}

fn default_retirement_age() -> u32 {
    60
}

fn default_nps_return() -> f64 {
    10.0
}

fn default_annuity_rate() -> f64 {
    6.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NpsRequest {
    pub monthly_contribution: f64,
    pub current_age: u32,
    #[serde(default = "default_retirement_age")]
    pub retirement_age: u32,
    #[serde(default = "default_nps_return")]
    pub expected_return: f64,
    /// Annual rate paid by the annuity bought at retirement
    #[serde(default = "default_annuity_rate")]
    pub annuity_rate: f64,
}

pub fn nps_calculator(request: &NpsRequest) -> CalculatorResult {
    finish(Category::Pension, nps(request))
}

fn nps(request: &NpsRequest) -> Result<ResultBuilder> {
    if request.retirement_age <= request.current_age {
        return Err(CalcError::invalid("Retirement age must be greater than current age"));
    }
    positive("Monthly contribution", request.monthly_contribution)?;
    non_negative("Expected return", request.expected_return)?;
    non_negative("Annuity rate", request.annuity_rate)?;

    let investment_years = request.retirement_age - request.current_age;
    let plan = AnnuityPlan::level(
        request.monthly_contribution,
        RatePeriod::monthly(request.expected_return),
        horizon_months("Investment period", investment_years)?,
    );

    let corpus_at_retirement = future_value_annuity(&plan);
    // 60% may be withdrawn; 40% must buy an annuity
    let lumpsum_withdrawal = corpus_at_retirement * 0.6;
    let annuity_amount = corpus_at_retirement * 0.4;
    let monthly_pension = annuity_amount * request.annuity_rate / 100.0 / 12.0;
    let tax_benefit = (request.monthly_contribution * 12.0 * ASSUMED_TAX_BRACKET).min(NPS_MAX_TAX_BENEFIT);

    Ok(ResultBuilder::new(Category::Pension)
        .number("total_contribution", total_contributions(&plan))
        .number("corpus_at_retirement", corpus_at_retirement)
        .number("lumpsum_withdrawal", lumpsum_withdrawal)
        .number("annuity_amount", annuity_amount)
        .number("monthly_pension", monthly_pension)
        .number("tax_benefit", tax_benefit)
        .integer("investment_years", investment_years as i64))
}

fn default_epf_share() -> f64 {
    12.0
}

fn default_service_years() -> u32 {
    30
}

fn default_increment() -> f64 {
    8.0
}

fn default_epf_rate() -> f64 {
    8.5
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EpfRequest {
    pub monthly_basic: f64,
    #[serde(default = "default_epf_share")]
    pub employee_contribution_percent: f64,
    #[serde(default = "default_epf_share")]
    pub employer_contribution_percent: f64,
    #[serde(default = "default_service_years")]
    pub years_of_service: u32,
    /// Yearly salary increment (percent)
    #[serde(default = "default_increment")]
    pub annual_increment: f64,
    #[serde(default = "default_epf_rate")]
    pub epf_interest_rate: f64,
}

/// Contributions rise with the yearly increment and are credited at the start of each month
pub fn epf_calculator(request: &EpfRequest) -> CalculatorResult {
    finish(Category::ProvidentFund, epf(request))
}

fn epf(request: &EpfRequest) -> Result<ResultBuilder> {
    positive("Monthly basic salary", request.monthly_basic)?;
    percent("Employee contribution", request.employee_contribution_percent)?;
    percent("Employer contribution", request.employer_contribution_percent)?;
    at_least_one("Years of service", request.years_of_service)?;
    non_negative("Annual increment", request.annual_increment)?;
    non_negative("EPF interest rate", request.epf_interest_rate)?;

    let rate = RatePeriod::monthly(request.epf_interest_rate);
    let months = horizon_months("Years of service", request.years_of_service)?;
    let stream = |share: f64| {
        AnnuityPlan::level(request.monthly_basic * share / 100.0, rate, months)
            .with_step_up(request.annual_increment)
            .with_timing(PaymentTiming::Beginning)
    };

    let employee = stream(request.employee_contribution_percent);
    let employer = stream(request.employer_contribution_percent);
    let combined = stream(request.employee_contribution_percent + request.employer_contribution_percent);

    let total_employee_contribution = total_contributions(&employee);
    let total_employer_contribution = total_contributions(&employer);
    let pensionable_salary = request.monthly_basic.min(EPS_SALARY_CEILING);

    Ok(ResultBuilder::new(Category::ProvidentFund)
        .number("total_employee_contribution", total_employee_contribution)
        .number("total_employer_contribution", total_employer_contribution)
        .number("total_contribution", total_employee_contribution + total_employer_contribution)
        .number("maturity_amount", future_value_annuity(&combined))
        .number("monthly_pension", pensionable_salary * request.years_of_service as f64 / 70.0)
        .integer("years_of_service", request.years_of_service as i64))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GratuityRequest {
    /// Last drawn basic salary per month
    pub monthly_salary: f64,
    pub years_of_service: u32,
    #[serde(default)]
    pub months_of_service: u32,
}

/// Gratuity = salary × 15 × years / 26
pub fn gratuity_calculator(request: &GratuityRequest) -> CalculatorResult {
    finish(Category::Gratuity, gratuity(request))
}

fn gratuity(request: &GratuityRequest) -> Result<ResultBuilder> {
    positive("Monthly salary", request.monthly_salary)?;
    if request.months_of_service > 11 {
        return Err(CalcError::invalid("Months of service must be between 0 and 11"));
    }

    let total_years = request.years_of_service as f64 + request.months_of_service as f64 / 12.0;
    let gratuity_amount = request.monthly_salary * 15.0 * total_years / 26.0;
    let eligibility = if total_years >= 5.0 {
        "Eligible"
    } else {
        "Not eligible (minimum 5 years required)"
    };

    Ok(ResultBuilder::new(Category::Gratuity)
        .number("gratuity_amount", gratuity_amount)
        .number("taxable_gratuity", (gratuity_amount - GRATUITY_TAX_FREE_LIMIT).max(0.0))
        .number("tax_free_gratuity", gratuity_amount.min(GRATUITY_TAX_FREE_LIMIT))
        .text(
            "service_period",
            format!("{} years {} months", request.years_of_service, request.months_of_service),
        )
        .text("eligibility", eligibility))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CagrRequest {
    pub initial_value: f64,
    pub final_value: f64,
    pub investment_period_years: f64,
}

pub fn cagr_calculator(request: &CagrRequest) -> CalculatorResult {
    finish(Category::Growth, cagr(request))
}

fn cagr(request: &CagrRequest) -> Result<ResultBuilder> {
    if !(request.initial_value > 0.0 && request.investment_period_years > 0.0) {
        return Err(CalcError::invalid("Initial value and investment period must be positive"));
    }
    non_negative("Final value", request.final_value)?;

    let cagr = ((request.final_value / request.initial_value).powf(1.0 / request.investment_period_years) - 1.0)
        * 100.0;
    let total_return = request.final_value - request.initial_value;

    Ok(ResultBuilder::new(Category::Growth)
        .number("cagr", cagr)
        .number("initial_value", request.initial_value)
        .number("final_value", request.final_value)
        .number("total_return", total_return)
        .number("total_return_percent", total_return / request.initial_value * 100.0)
        .number("investment_period_years", request.investment_period_years))
}

fn default_inflation() -> f64 {
    6.0
}

fn default_savings_growth() -> f64 {
    8.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InflationRequest {
    pub current_price: f64,
    pub years: u32,
    #[serde(default = "default_inflation")]
    pub inflation_rate: f64,
    #[serde(default)]
    pub current_savings: f64,
    #[serde(default = "default_savings_growth")]
    pub savings_growth_rate: f64,
}

pub fn inflation_calculator(request: &InflationRequest) -> CalculatorResult {
    finish(Category::Inflation, inflation(request))
}

fn inflation(request: &InflationRequest) -> Result<ResultBuilder> {
    positive("Current price", request.current_price)?;
    non_negative("Inflation rate", request.inflation_rate)?;
    non_negative("Current savings", request.current_savings)?;
    non_negative("Savings growth rate", request.savings_growth_rate)?;

    let years = request.years as f64;
    let future_price = inflate(request.current_price, request.inflation_rate, years);
    let price_increase = future_price - request.current_price;
    let future_savings = future_value_lump_sum(
        request.current_savings,
        &RatePeriod::annual(request.savings_growth_rate),
        years,
    );
    // Savings needed then to buy what the current price buys today
    let required_savings = future_price;

    Ok(ResultBuilder::new(Category::Inflation)
        .number("current_price", request.current_price)
        .number("future_price", future_price)
        .number("price_increase", price_increase)
        .number("purchasing_power_loss", price_increase / request.current_price * 100.0)
        .number("future_savings", future_savings)
        .number("required_savings", required_savings)
        .number("savings_shortfall", (required_savings - future_savings).max(0.0))
        .integer("years", request.years as i64))
}
