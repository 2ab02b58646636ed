//! Goal planning: target corpus, retirement, education and allocation

use serde::Deserialize;

use super::validate::{horizon_months, non_negative, percent, positive};
use super::{finish, CalculatorResult, Category, ResultBuilder};
use crate::error::{CalcError, Result};
use crate::growth::{
    future_value_lump_sum, inflate, present_value_annuity, present_value_lump_sum, real_rate,
    required_periodic_contribution, PaymentTiming, RatePeriod,
};

/// Monthly SIP that closes `gap` over `years` at `annual_return`; zero when there is no gap
fn monthly_sip_for_gap(gap: f64, annual_return: f64, years: u32) -> Result<f64> {
    if gap <= 0.0 {
        return Ok(0.0);
    }
    let months = horizon_months("Investment horizon", years)?;
    required_periodic_contribution(gap, &RatePeriod::monthly(annual_return), months)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MutualFundGoalRequest {
    pub target_amount: f64,
    pub current_age: u32,
    pub target_age: u32,
    pub expected_return: f64,
    #[serde(default)]
    pub current_investment: f64,
}

pub fn mutual_fund_goal_calculator(request: &MutualFundGoalRequest) -> CalculatorResult {
    finish(Category::Goal, mutual_fund_goal(request))
}

fn mutual_fund_goal(request: &MutualFundGoalRequest) -> Result<ResultBuilder> {
    if request.target_age <= request.current_age {
        return Err(CalcError::invalid("Target age must be greater than current age"));
    }
    positive("Target amount", request.target_amount)?;
    non_negative("Expected return", request.expected_return)?;
    non_negative("Current investment", request.current_investment)?;

    let years_to_goal = request.target_age - request.current_age;
    let annual = RatePeriod::annual(request.expected_return);

    let projected_current_value =
        future_value_lump_sum(request.current_investment, &annual, years_to_goal as f64);
    let remaining_amount = request.target_amount - projected_current_value;
    let monthly_sip_needed = monthly_sip_for_gap(remaining_amount, request.expected_return, years_to_goal)?;
    let lumpsum_needed = present_value_lump_sum(remaining_amount, &annual, years_to_goal as f64).max(0.0);

    Ok(ResultBuilder::new(Category::Goal)
        .number("target_amount", request.target_amount)
        .integer("years_to_goal", years_to_goal as i64)
        .number("monthly_sip_needed", monthly_sip_needed)
        .number("lumpsum_needed", lumpsum_needed)
        .number("current_investment", request.current_investment)
        .number("projected_current_value", projected_current_value))
}

fn default_retirement_age() -> u32 {
    60
}

fn default_life_expectancy() -> u32 {
    85
}

fn default_inflation() -> f64 {
    6.0
}

fn default_equity_return() -> f64 {
    12.0
}

fn default_post_retirement_return() -> f64 {
    8.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetirementCorpusRequest {
    pub current_age: u32,
    #[serde(default = "default_retirement_age")]
    pub retirement_age: u32,
    #[serde(default = "default_life_expectancy")]
    pub life_expectancy: u32,
    /// Today's monthly expenses
    pub monthly_expenses: f64,
    #[serde(default = "default_inflation")]
    pub inflation_rate: f64,
    /// Return before retirement
    #[serde(default = "default_equity_return")]
    pub expected_return: f64,
    #[serde(default = "default_post_retirement_return")]
    pub post_retirement_return: f64,
    #[serde(default)]
    pub current_savings: f64,
}

/// Corpus needed at retirement to fund inflation-linked expenses until life expectancy
///
/// Withdrawals are taken at the start of each retirement year and grow with
/// inflation, so the corpus is the present value of an annuity due at the
/// real post-retirement rate.
pub fn retirement_corpus_calculator(request: &RetirementCorpusRequest) -> CalculatorResult {
    finish(Category::Retirement, retirement_corpus(request))
}

fn retirement_corpus(request: &RetirementCorpusRequest) -> Result<ResultBuilder> {
    if request.retirement_age <= request.current_age {
        return Err(CalcError::invalid("Retirement age must be greater than current age"));
    }
    if request.life_expectancy <= request.retirement_age {
        return Err(CalcError::invalid("Life expectancy must be greater than retirement age"));
    }
    positive("Monthly expenses", request.monthly_expenses)?;
    non_negative("Inflation rate", request.inflation_rate)?;
    non_negative("Expected return", request.expected_return)?;
    non_negative("Post-retirement return", request.post_retirement_return)?;
    non_negative("Current savings", request.current_savings)?;

    let years_to_retirement = request.retirement_age - request.current_age;
    let retirement_years = request.life_expectancy - request.retirement_age;

    let monthly_expenses_at_retirement =
        inflate(request.monthly_expenses, request.inflation_rate, years_to_retirement as f64);
    let real_return = real_rate(request.post_retirement_return, request.inflation_rate);
    let retirement_corpus_needed = present_value_annuity(
        monthly_expenses_at_retirement * 12.0,
        &RatePeriod::annual(real_return),
        retirement_years,
        PaymentTiming::Beginning,
    );

    let projected_savings = future_value_lump_sum(
        request.current_savings,
        &RatePeriod::annual(request.expected_return),
        years_to_retirement as f64,
    );
    let corpus_gap = (retirement_corpus_needed - projected_savings).max(0.0);
    let monthly_sip_needed = monthly_sip_for_gap(corpus_gap, request.expected_return, years_to_retirement)?;

    let recommendation = if corpus_gap <= 0.0 {
        "✅ Your current savings are on track to fund retirement".to_string()
    } else {
        format!(
            "📌 Invest about {:.0} per month for {} years to close the retirement gap",
            monthly_sip_needed, years_to_retirement
        )
    };

    Ok(ResultBuilder::new(Category::Retirement)
        .integer("years_to_retirement", years_to_retirement as i64)
        .integer("retirement_years", retirement_years as i64)
        .number("monthly_expenses_at_retirement", monthly_expenses_at_retirement)
        .number("retirement_corpus_needed", retirement_corpus_needed)
        .number("projected_savings", projected_savings)
        .number("corpus_gap", corpus_gap)
        .number("monthly_sip_needed", monthly_sip_needed)
        .recommendation(recommendation))
}

fn default_education_age() -> u32 {
    18
}

fn default_education_inflation() -> f64 {
    10.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChildEducationRequest {
    /// Cost of the education at today's prices
    pub current_cost: f64,
    pub child_age: u32,
    #[serde(default = "default_education_age")]
    pub education_age: u32,
    #[serde(default = "default_education_inflation")]
    pub inflation_rate: f64,
    #[serde(default = "default_equity_return")]
    pub expected_return: f64,
    #[serde(default)]
    pub current_savings: f64,
}

pub fn child_education_calculator(request: &ChildEducationRequest) -> CalculatorResult {
    finish(Category::Education, child_education(request))
}

fn child_education(request: &ChildEducationRequest) -> Result<ResultBuilder> {
    if request.education_age <= request.child_age {
        return Err(CalcError::invalid("Education age must be greater than child's current age"));
    }
    positive("Current cost", request.current_cost)?;
    non_negative("Inflation rate", request.inflation_rate)?;
    non_negative("Expected return", request.expected_return)?;
    non_negative("Current savings", request.current_savings)?;

    let years_to_goal = request.education_age - request.child_age;
    let annual = RatePeriod::annual(request.expected_return);

    let future_cost = inflate(request.current_cost, request.inflation_rate, years_to_goal as f64);
    let projected_savings = future_value_lump_sum(request.current_savings, &annual, years_to_goal as f64);
    let funding_gap = (future_cost - projected_savings).max(0.0);

    Ok(ResultBuilder::new(Category::Education)
        .integer("years_to_goal", years_to_goal as i64)
        .number("future_cost", future_cost)
        .number("projected_savings", projected_savings)
        .number("funding_gap", funding_gap)
        .number(
            "monthly_sip_needed",
            monthly_sip_for_gap(funding_gap, request.expected_return, years_to_goal)?,
        )
        .number("lumpsum_needed", present_value_lump_sum(funding_gap, &annual, years_to_goal as f64)))
}

/// Investor risk appetite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Shift applied to the age-based equity share (percentage points)
    fn equity_tilt(&self) -> f64 {
        match self {
            RiskTolerance::Conservative => -10.0,
            RiskTolerance::Moderate => 0.0,
            RiskTolerance::Aggressive => 10.0,
        }
    }
}

const GOLD_TARGET_PERCENT: f64 = 10.0;
const MIN_EQUITY_PERCENT: f64 = 10.0;
const MAX_EQUITY_PERCENT: f64 = 90.0;
/// Drift (percentage points) tolerated before a rebalance is suggested
const REBALANCE_BAND: f64 = 5.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetAllocationRequest {
    pub current_age: u32,
    pub current_equity_percent: f64,
    pub current_debt_percent: f64,
    pub current_gold_percent: f64,
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
    /// When positive, the rebalance deltas are also given as amounts
    #[serde(default)]
    pub portfolio_value: f64,
}

/// Target mix: equity = 100 − age tilted by risk tolerance, 10% gold, debt the rest
pub fn asset_allocation_rebalancer(request: &AssetAllocationRequest) -> CalculatorResult {
    finish(Category::Allocation, asset_allocation(request))
}

fn asset_allocation(request: &AssetAllocationRequest) -> Result<ResultBuilder> {
    if request.current_age == 0 || request.current_age > 100 {
        return Err(CalcError::invalid("Current age must be between 1 and 100"));
    }
    percent("Equity allocation", request.current_equity_percent)?;
    percent("Debt allocation", request.current_debt_percent)?;
    percent("Gold allocation", request.current_gold_percent)?;
    let allocated = request.current_equity_percent + request.current_debt_percent + request.current_gold_percent;
    if (allocated - 100.0).abs() > 0.01 {
        return Err(CalcError::invalid("Current allocation must add up to 100%"));
    }
    non_negative("Portfolio value", request.portfolio_value)?;

    let suggested_equity = (100.0 - request.current_age as f64 + request.risk_tolerance.equity_tilt())
        .clamp(MIN_EQUITY_PERCENT, MAX_EQUITY_PERCENT);
    let suggested_gold = GOLD_TARGET_PERCENT;
    let suggested_debt = 100.0 - suggested_equity - suggested_gold;

    let equity_change = suggested_equity - request.current_equity_percent;
    let debt_change = suggested_debt - request.current_debt_percent;
    let gold_change = suggested_gold - request.current_gold_percent;

    let mut builder = ResultBuilder::new(Category::Allocation)
        .number("suggested_equity_percent", suggested_equity)
        .number("suggested_debt_percent", suggested_debt)
        .number("suggested_gold_percent", suggested_gold)
        .number("equity_change_percent", equity_change)
        .number("debt_change_percent", debt_change)
        .number("gold_change_percent", gold_change);

    if request.portfolio_value > 0.0 {
        let amount = |change: f64| change / 100.0 * request.portfolio_value;
        builder = builder
            .number("equity_rebalance_amount", amount(equity_change))
            .number("debt_rebalance_amount", amount(debt_change))
            .number("gold_rebalance_amount", amount(gold_change));
    }

    let within_band = [equity_change, debt_change, gold_change]
        .iter()
        .all(|change| change.abs() <= REBALANCE_BAND);
    let recommendation = if within_band {
        "✅ Portfolio is close to its target mix; no rebalancing needed".to_string()
    } else {
        format!(
            "🔄 Rebalance: equity {:+.0}%, debt {:+.0}%, gold {:+.0}%",
            equity_change, debt_change, gold_change
        )
    };

    Ok(builder
        .text(
            "suggested_allocation",
            format!(
                "{:.0}% equity / {:.0}% debt / {:.0}% gold",
                suggested_equity, suggested_debt, suggested_gold
            ),
        )
        .recommendation(recommendation))
}
