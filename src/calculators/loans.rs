//! Loan calculators: credit cards, EMI loans, bank profiles, schedules and prepayments

use serde::Deserialize;

use super::validate::{non_negative, percent, positive};
use super::{finish, CalculatorResult, Category, ResultBuilder};
use crate::amortization::{
    apply_prepayment, build_schedule, AmortizationSchedule, LoanTerms, MoratoriumMode, PrepaymentMode,
    ScheduleSummary,
};
use crate::config::{BankCharge, BankProfile};
use crate::error::{CalcError, Result};
use crate::growth::RatePeriod;

/// Longest credit card payoff simulated (50 years)
pub const MAX_PAYOFF_MONTHS: u32 = 600;

const PAYOFF_EPSILON: f64 = 1e-6;

/// Schedule and totals of a validated loan
struct LoanCost {
    schedule: AmortizationSchedule,
    summary: ScheduleSummary,
}

impl LoanCost {
    fn new(terms: &LoanTerms) -> Result<Self> {
        let schedule = build_schedule(terms)?;
        let summary = schedule.summary();
        Ok(Self { schedule, summary })
    }

    fn emi(&self) -> f64 {
        self.schedule.installment()
    }
}

fn fee(loan_amount: f64, fee_percent: f64) -> f64 {
    loan_amount * fee_percent / 100.0
}

fn default_one_percent() -> f64 {
    1.0
}

fn default_half_percent() -> f64 {
    0.5
}

fn default_minimum_payment() -> f64 {
    5.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreditCardRequest {
    pub outstanding_balance: f64,
    pub annual_interest_rate: f64,
    /// Minimum due as a percent of the starting balance
    #[serde(default = "default_minimum_payment")]
    pub minimum_payment_percent: f64,
    #[serde(default)]
    pub additional_payment: f64,
}

/// Months and interest to clear a card balance with a fixed monthly payment
pub fn credit_card_interest_calculator(request: &CreditCardRequest) -> CalculatorResult {
    finish(Category::CreditCard, credit_card_interest(request))
}

fn credit_card_interest(request: &CreditCardRequest) -> Result<ResultBuilder> {
    positive("Outstanding balance", request.outstanding_balance)?;
    non_negative("Interest rate", request.annual_interest_rate)?;
    percent("Minimum payment", request.minimum_payment_percent)?;
    non_negative("Additional payment", request.additional_payment)?;

    let monthly_rate = RatePeriod::monthly(request.annual_interest_rate).periodic_rate();
    let minimum_payment = request.outstanding_balance * request.minimum_payment_percent / 100.0;
    let total_monthly_payment = minimum_payment + request.additional_payment;

    let mut balance = request.outstanding_balance;
    let mut payoff_months = 0;
    let mut total_interest_paid = 0.0;

    while balance > PAYOFF_EPSILON {
        if payoff_months >= MAX_PAYOFF_MONTHS {
            return Err(CalcError::invalid(format!(
                "Balance is not repaid within {} months at this payment",
                MAX_PAYOFF_MONTHS
            )));
        }
        let interest = balance * monthly_rate;
        let principal = (total_monthly_payment - interest).min(balance);
        if principal <= 0.0 {
            return Err(CalcError::invalid(
                "Monthly payment is less than interest. Balance will never be paid off!",
            ));
        }
        balance -= principal;
        total_interest_paid += interest;
        payoff_months += 1;
    }

    Ok(ResultBuilder::new(Category::CreditCard)
        .number("monthly_interest_rate", monthly_rate * 100.0)
        .number("minimum_payment", minimum_payment)
        .number("total_monthly_payment", total_monthly_payment)
        .integer("payoff_months", payoff_months as i64)
        .number("total_interest_paid", total_interest_paid)
        .number("total_amount_paid", request.outstanding_balance + total_interest_paid)
        .number("outstanding_balance", request.outstanding_balance))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonalLoanRequest {
    pub loan_amount: f64,
    pub annual_interest_rate: f64,
    pub tenure_months: u32,
    #[serde(default = "default_one_percent")]
    pub processing_fee_percent: f64,
}

pub fn personal_loan_emi_calculator(request: &PersonalLoanRequest) -> CalculatorResult {
    finish(Category::PersonalLoan, personal_loan(request))
}

fn personal_loan(request: &PersonalLoanRequest) -> Result<ResultBuilder> {
    percent("Processing fee", request.processing_fee_percent)?;
    let loan = LoanCost::new(&LoanTerms::new(
        request.loan_amount,
        request.annual_interest_rate,
        request.tenure_months,
    ))?;
    let processing_fee = fee(request.loan_amount, request.processing_fee_percent);

    Ok(ResultBuilder::new(Category::PersonalLoan)
        .number("loan_amount", request.loan_amount)
        .number("emi", loan.emi())
        .number("total_payment", loan.summary.total_payment)
        .number("total_interest", loan.summary.total_interest)
        .number("processing_fee", processing_fee)
        .number("total_cost", loan.summary.total_payment + processing_fee)
        .integer("tenure_months", request.tenure_months as i64))
}

fn default_medical_moratorium() -> u32 {
    6
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MedicalLoanRequest {
    pub loan_amount: f64,
    pub annual_interest_rate: f64,
    /// Total tenure including the moratorium
    pub tenure_months: u32,
    #[serde(default = "default_medical_moratorium")]
    pub moratorium_months: u32,
    #[serde(default = "default_half_percent")]
    pub processing_fee_percent: f64,
}

/// EMI loan whose moratorium interest capitalises monthly onto the balance
pub fn medical_loan_emi_calculator(request: &MedicalLoanRequest) -> CalculatorResult {
    finish(Category::MedicalLoan, medical_loan(request))
}

fn medical_loan(request: &MedicalLoanRequest) -> Result<ResultBuilder> {
    percent("Processing fee", request.processing_fee_percent)?;
    let terms = LoanTerms::new(request.loan_amount, request.annual_interest_rate, request.tenure_months)
        .with_moratorium(request.moratorium_months, MoratoriumMode::Accrue);
    let loan = LoanCost::new(&terms)?;

    Ok(ResultBuilder::new(Category::MedicalLoan)
        .number("loan_amount", request.loan_amount)
        .number("emi", loan.emi())
        .number("total_payment", loan.summary.total_payment)
        .number("total_interest", loan.summary.total_interest)
        .number("moratorium_interest", loan.summary.capitalized_interest)
        .number("processing_fee", fee(request.loan_amount, request.processing_fee_percent))
        .integer("moratorium_months", request.moratorium_months as i64)
        .integer("repayment_months", terms.repayment_months() as i64))
}

fn default_prepayment_charges() -> f64 {
    2.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarriageLoanRequest {
    pub loan_amount: f64,
    pub annual_interest_rate: f64,
    pub tenure_months: u32,
    #[serde(default = "default_one_percent")]
    pub processing_fee_percent: f64,
    /// Foreclosure charge as a percent of the loan
    #[serde(default = "default_prepayment_charges")]
    pub prepayment_charges_percent: f64,
}

pub fn marriage_loan_emi_calculator(request: &MarriageLoanRequest) -> CalculatorResult {
    finish(Category::MarriageLoan, marriage_loan(request))
}

fn marriage_loan(request: &MarriageLoanRequest) -> Result<ResultBuilder> {
    percent("Processing fee", request.processing_fee_percent)?;
    percent("Prepayment charges", request.prepayment_charges_percent)?;
    let loan = LoanCost::new(&LoanTerms::new(
        request.loan_amount,
        request.annual_interest_rate,
        request.tenure_months,
    ))?;
    let processing_fee = fee(request.loan_amount, request.processing_fee_percent);

    Ok(ResultBuilder::new(Category::MarriageLoan)
        .number("loan_amount", request.loan_amount)
        .number("emi", loan.emi())
        .number("total_payment", loan.summary.total_payment)
        .number("total_interest", loan.summary.total_interest)
        .number("processing_fee", processing_fee)
        .number("prepayment_charges", fee(request.loan_amount, request.prepayment_charges_percent))
        .number("total_cost", loan.summary.total_payment + processing_fee)
        .integer("tenure_months", request.tenure_months as i64))
}

/// Highest loan-to-value ratio accepted for renovation loans (percent)
const MAX_RENOVATION_LTV: f64 = 80.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HomeRenovationRequest {
    pub loan_amount: f64,
    pub annual_interest_rate: f64,
    pub tenure_months: u32,
    pub property_value: f64,
    #[serde(default = "default_half_percent")]
    pub processing_fee_percent: f64,
}

pub fn home_renovation_emi_calculator(request: &HomeRenovationRequest) -> CalculatorResult {
    finish(Category::RenovationLoan, home_renovation(request))
}

fn home_renovation(request: &HomeRenovationRequest) -> Result<ResultBuilder> {
    positive("Property value", request.property_value)?;
    percent("Processing fee", request.processing_fee_percent)?;
    let loan = LoanCost::new(&LoanTerms::new(
        request.loan_amount,
        request.annual_interest_rate,
        request.tenure_months,
    ))?;

    let loan_to_value_ratio = request.loan_amount / request.property_value * 100.0;
    let eligibility_status = if loan_to_value_ratio <= MAX_RENOVATION_LTV {
        "Eligible".to_string()
    } else {
        format!("Not eligible - LTV exceeds {:.0}%", MAX_RENOVATION_LTV)
    };

    Ok(ResultBuilder::new(Category::RenovationLoan)
        .number("loan_amount", request.loan_amount)
        .number("emi", loan.emi())
        .number("total_payment", loan.summary.total_payment)
        .number("total_interest", loan.summary.total_interest)
        .number("processing_fee", fee(request.loan_amount, request.processing_fee_percent))
        .number("loan_to_value_ratio", loan_to_value_ratio)
        .text("eligibility_status", eligibility_status)
        .number("property_value", request.property_value))
}

/// Personal loan at a specific bank; omitted terms come from the bank's profile
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BankLoanRequest {
    pub loan_amount: f64,
    #[serde(default)]
    pub annual_interest_rate: Option<f64>,
    #[serde(default)]
    pub tenure_months: Option<u32>,
    #[serde(default)]
    pub processing_fee_percent: Option<f64>,
    #[serde(default)]
    pub insurance_premium_percent: Option<f64>,
    #[serde(default)]
    pub documentation_charges: Option<f64>,
    /// Monthly salary for the eligibility check
    #[serde(default)]
    pub salary_requirement: Option<f64>,
}

fn reject_override(profile: &BankProfile, name: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(_) => Err(CalcError::invalid(format!("'{}' does not apply to {}", name, profile.bank))),
        None => Ok(()),
    }
}

/// EMI and all-in cost of a personal loan under a bank profile
pub fn bank_personal_loan_calculator(request: &BankLoanRequest, profile: &BankProfile) -> CalculatorResult {
    finish(Category::BankLoan, bank_personal_loan(request, profile))
}

fn bank_personal_loan(request: &BankLoanRequest, profile: &BankProfile) -> Result<ResultBuilder> {
    positive("Loan amount", request.loan_amount)?;
    let annual_interest_rate = request
        .annual_interest_rate
        .unwrap_or_else(|| profile.rate_for(request.loan_amount));
    let tenure_months = request.tenure_months.unwrap_or(profile.default_tenure_months);
    let fee_percent = request.processing_fee_percent.unwrap_or(profile.processing_fee.percent);
    percent("Processing fee", fee_percent)?;

    let loan = LoanCost::new(&LoanTerms::new(request.loan_amount, annual_interest_rate, tenure_months))?;
    let processing_fee = profile.processing_fee.amount_at(request.loan_amount, fee_percent);

    let mut builder = ResultBuilder::new(Category::BankLoan)
        .text("bank", profile.bank.as_str())
        .number("loan_amount", request.loan_amount)
        .number("annual_interest_rate", annual_interest_rate)
        .number("emi", loan.emi())
        .number("total_payment", loan.summary.total_payment)
        .number("total_interest", loan.summary.total_interest)
        .number("processing_fee", processing_fee);

    let mut total_cost = loan.summary.total_payment + processing_fee;
    match profile.charge {
        BankCharge::InsurancePremium { percent: default_percent } => {
            reject_override(profile, "documentation_charges", request.documentation_charges)?;
            reject_override(profile, "salary_requirement", request.salary_requirement)?;
            let premium_percent = request.insurance_premium_percent.unwrap_or(default_percent);
            percent("Insurance premium", premium_percent)?;
            let insurance_premium = fee(request.loan_amount, premium_percent);
            total_cost += insurance_premium;
            builder = builder.number("insurance_premium", insurance_premium);
        }
        BankCharge::Documentation { amount } => {
            reject_override(profile, "insurance_premium_percent", request.insurance_premium_percent)?;
            reject_override(profile, "salary_requirement", request.salary_requirement)?;
            let documentation_charges = request.documentation_charges.unwrap_or(amount);
            non_negative("Documentation charges", documentation_charges)?;
            total_cost += documentation_charges;
            builder = builder.number("documentation_charges", documentation_charges);
        }
        BankCharge::SalaryEligibility {
            min_monthly_salary,
            loan_multiple_months,
        } => {
            reject_override(profile, "insurance_premium_percent", request.insurance_premium_percent)?;
            reject_override(profile, "documentation_charges", request.documentation_charges)?;
            let salary = request.salary_requirement.unwrap_or(min_monthly_salary);
            positive("Salary", salary)?;
            let max_loan_amount = salary * loan_multiple_months;
            let eligibility_status = if request.loan_amount <= max_loan_amount {
                "Eligible"
            } else {
                "Not eligible - Exceeds income criteria"
            };
            builder = builder
                .text("eligibility_status", eligibility_status)
                .number("max_loan_amount", max_loan_amount)
                .number("salary_requirement", salary);
        }
    }

    Ok(builder
        .number("total_cost", total_cost)
        .integer("tenure_months", tenure_months as i64))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmortizationScheduleRequest {
    pub loan_amount: f64,
    pub annual_interest_rate: f64,
    pub tenure_months: u32,
    #[serde(default)]
    pub moratorium_months: u32,
    #[serde(default)]
    pub moratorium_mode: MoratoriumMode,
}

/// Month-by-month schedule with totals
pub fn loan_amortization_schedule_calculator(request: &AmortizationScheduleRequest) -> CalculatorResult {
    finish(Category::Schedule, amortization_schedule(request))
}

fn amortization_schedule(request: &AmortizationScheduleRequest) -> Result<ResultBuilder> {
    let terms = LoanTerms::new(request.loan_amount, request.annual_interest_rate, request.tenure_months)
        .with_moratorium(request.moratorium_months, request.moratorium_mode);
    let loan = LoanCost::new(&terms)?;

    Ok(ResultBuilder::new(Category::Schedule)
        .number("loan_amount", request.loan_amount)
        .number("emi", loan.emi())
        .integer("installments", loan.summary.installments as i64)
        .number("total_payment", loan.summary.total_payment)
        .number("total_interest", loan.summary.total_interest)
        .number("capitalized_interest", loan.summary.capitalized_interest)
        .table("schedule", loan.schedule.rows()))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoanPrepaymentRequest {
    pub loan_amount: f64,
    pub annual_interest_rate: f64,
    pub tenure_months: u32,
    pub prepayment_amount: f64,
    /// Installment the lump sum is paid with (1-based)
    pub prepayment_month: u32,
    #[serde(default)]
    pub mode: PrepaymentMode,
}

/// Compare a loan with and without a one-off part-prepayment
pub fn loan_prepayment_calculator(request: &LoanPrepaymentRequest) -> CalculatorResult {
    finish(Category::Prepayment, loan_prepayment(request))
}

fn loan_prepayment(request: &LoanPrepaymentRequest) -> Result<ResultBuilder> {
    let original = LoanCost::new(&LoanTerms::new(
        request.loan_amount,
        request.annual_interest_rate,
        request.tenure_months,
    ))?;
    let outcome = apply_prepayment(
        &original.schedule,
        request.prepayment_amount,
        request.prepayment_month,
        request.mode,
    )?;
    let revised = outcome.schedule.summary();

    let (mode, recommendation) = match request.mode {
        PrepaymentMode::ReduceTenure => (
            "reduce_tenure",
            format!(
                "⏩ Keeping the EMI closes the loan {} months early",
                original.summary.installments.saturating_sub(outcome.new_tenure_months)
            ),
        ),
        PrepaymentMode::ReduceEmi => (
            "reduce_emi",
            format!(
                "⏩ Keeping the tenure lowers the EMI by {:.2}",
                original.emi() - outcome.new_emi
            ),
        ),
    };

    Ok(ResultBuilder::new(Category::Prepayment)
        .text("mode", mode)
        .number("original_emi", original.emi())
        .number("new_emi", outcome.new_emi)
        .integer("original_tenure_months", original.summary.installments as i64)
        .integer("new_tenure_months", outcome.new_tenure_months as i64)
        .number("original_total_interest", original.summary.total_interest)
        .number("new_total_interest", revised.total_interest)
        .number("interest_saved", outcome.interest_saved)
        .recommendation(recommendation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BankProfiles;
    use approx::assert_relative_eq;

    fn bank(name: &str) -> BankProfile {
        BankProfiles::default_lenders().by_calculator(name).unwrap().clone()
    }

    #[test]
    fn test_credit_card_payoff() {
        let result = credit_card_interest_calculator(&CreditCardRequest {
            outstanding_balance: 50_000.0,
            annual_interest_rate: 36.0,
            minimum_payment_percent: 5.0,
            additional_payment: 0.0,
        });
        assert_eq!(result.icon(), "💳");
        assert_eq!(result.number("monthly_interest_rate"), Some(3.0));
        assert_eq!(result.number("total_monthly_payment"), Some(2_500.0));
        assert_eq!(result.number("payoff_months"), Some(31.0));
        assert_relative_eq!(result.number("total_interest_paid").unwrap(), 27_497.32, epsilon = 1e-6);
    }

    #[test]
    fn test_credit_card_payment_below_interest() {
        let result = credit_card_interest_calculator(&CreditCardRequest {
            outstanding_balance: 50_000.0,
            annual_interest_rate: 72.0,
            minimum_payment_percent: 5.0,
            additional_payment: 0.0,
        });
        assert!(result.error().unwrap().contains("never be paid off"));
    }

    #[test]
    fn test_credit_card_payoff_horizon() {
        // Payment barely above interest: more than 600 months to repay
        let result = credit_card_interest_calculator(&CreditCardRequest {
            outstanding_balance: 100_000.0,
            annual_interest_rate: 12.0,
            minimum_payment_percent: 1.002,
            additional_payment: 0.0,
        });
        assert!(result.error().unwrap().contains("600 months"));
    }

    #[test]
    fn test_personal_loan() {
        let result = personal_loan_emi_calculator(&PersonalLoanRequest {
            loan_amount: 500_000.0,
            annual_interest_rate: 12.0,
            tenure_months: 60,
            processing_fee_percent: 1.0,
        });
        assert_relative_eq!(result.number("emi").unwrap(), 11_122.22, epsilon = 1e-6);
        assert_relative_eq!(result.number("total_payment").unwrap(), 667_333.43, epsilon = 1e-6);
        assert_relative_eq!(result.number("total_interest").unwrap(), 167_333.43, epsilon = 1e-6);
        assert_relative_eq!(result.number("total_cost").unwrap(), 672_333.43, epsilon = 1e-6);
    }

    #[test]
    fn test_personal_loan_invalid_tenure() {
        let result = personal_loan_emi_calculator(&PersonalLoanRequest {
            loan_amount: 500_000.0,
            annual_interest_rate: 12.0,
            tenure_months: 0,
            processing_fee_percent: 1.0,
        });
        assert_eq!(result.error(), Some("Loan tenure must be at least one month"));
    }

    #[test]
    fn test_medical_loan_capitalises_moratorium() {
        let result = medical_loan_emi_calculator(&MedicalLoanRequest {
            loan_amount: 300_000.0,
            annual_interest_rate: 12.0,
            tenure_months: 36,
            moratorium_months: 6,
            processing_fee_percent: 0.5,
        });
        assert_eq!(result.icon(), "🩺");
        assert_relative_eq!(result.number("emi").unwrap(), 12_339.57, epsilon = 1e-6);
        assert_relative_eq!(result.number("moratorium_interest").unwrap(), 18_456.05, epsilon = 1e-6);
        assert_relative_eq!(result.number("total_interest").unwrap(), 70_187.13, epsilon = 1e-6);
        assert_eq!(result.number("repayment_months"), Some(30.0));
    }

    #[test]
    fn test_renovation_ltv() {
        let eligible = home_renovation_emi_calculator(&HomeRenovationRequest {
            loan_amount: 200_000.0,
            annual_interest_rate: 11.0,
            tenure_months: 36,
            property_value: 1_000_000.0,
            processing_fee_percent: 0.5,
        });
        assert_eq!(eligible.number("loan_to_value_ratio"), Some(20.0));
        assert_eq!(eligible.text("eligibility_status"), Some("Eligible"));

        let over = home_renovation_emi_calculator(&HomeRenovationRequest {
            loan_amount: 900_000.0,
            annual_interest_rate: 11.0,
            tenure_months: 36,
            property_value: 1_000_000.0,
            processing_fee_percent: 0.5,
        });
        assert_eq!(over.text("eligibility_status"), Some("Not eligible - LTV exceeds 80%"));
    }

    #[test]
    fn test_axis_profile_defaults() {
        let request = BankLoanRequest {
            loan_amount: 500_000.0,
            annual_interest_rate: None,
            tenure_months: None,
            processing_fee_percent: None,
            insurance_premium_percent: None,
            documentation_charges: None,
            salary_requirement: None,
        };
        let result = bank_personal_loan_calculator(&request, &bank("axis_bank_personal_loan_calculator"));
        assert_eq!(result.text("bank"), Some("Axis Bank"));
        assert_eq!(result.number("annual_interest_rate"), Some(10.5));
        assert_relative_eq!(result.number("emi").unwrap(), 10_746.95, epsilon = 1e-6);
        assert_eq!(result.number("processing_fee"), Some(10_000.0));
        assert_eq!(result.number("insurance_premium"), Some(2_500.0));
        assert_relative_eq!(result.number("total_cost").unwrap(), 657_317.01, epsilon = 1e-6);
        assert_eq!(result.number("tenure_months"), Some(60.0));
    }

    #[test]
    fn test_hdfc_salary_eligibility() {
        let request = BankLoanRequest {
            loan_amount: 500_000.0,
            annual_interest_rate: None,
            tenure_months: Some(36),
            processing_fee_percent: None,
            insurance_premium_percent: None,
            documentation_charges: None,
            salary_requirement: None,
        };
        let profile = bank("hdfc_bank_personal_loan_calculator");
        let result = bank_personal_loan_calculator(&request, &profile);
        assert_eq!(result.number("max_loan_amount"), Some(300_000.0));
        assert_eq!(result.text("eligibility_status"), Some("Not eligible - Exceeds income criteria"));

        let richer = BankLoanRequest {
            salary_requirement: Some(50_000.0),
            ..request
        };
        let result = bank_personal_loan_calculator(&richer, &profile);
        assert_eq!(result.text("eligibility_status"), Some("Eligible"));
    }

    #[test]
    fn test_bank_rejects_foreign_charge() {
        let request = BankLoanRequest {
            loan_amount: 500_000.0,
            annual_interest_rate: None,
            tenure_months: None,
            processing_fee_percent: None,
            insurance_premium_percent: Some(1.0),
            documentation_charges: None,
            salary_requirement: None,
        };
        let result = bank_personal_loan_calculator(&request, &bank("icici_bank_personal_loan_emi_calculator"));
        assert_eq!(
            result.error(),
            Some("'insurance_premium_percent' does not apply to ICICI Bank")
        );
    }

    #[test]
    fn test_schedule_table() {
        let result = loan_amortization_schedule_calculator(&AmortizationScheduleRequest {
            loan_amount: 100_000.0,
            annual_interest_rate: 12.0,
            tenure_months: 12,
            moratorium_months: 0,
            moratorium_mode: MoratoriumMode::Accrue,
        });
        assert_relative_eq!(result.number("emi").unwrap(), 8_884.88, epsilon = 1e-6);
        let rows = result.table("schedule").unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].opening_balance, 100_000.0);
        assert_eq!(rows[0].interest_component, 1_000.0);
        assert_eq!(rows[11].closing_balance, 0.0);
    }

    #[test]
    fn test_prepayment_modes() {
        let request = LoanPrepaymentRequest {
            loan_amount: 1_000_000.0,
            annual_interest_rate: 9.0,
            tenure_months: 240,
            prepayment_amount: 200_000.0,
            prepayment_month: 12,
            mode: PrepaymentMode::ReduceTenure,
        };
        let tenure = loan_prepayment_calculator(&request);
        assert_eq!(tenure.number("new_emi"), tenure.number("original_emi"));
        assert!(tenure.number("new_tenure_months").unwrap() < 240.0);
        assert!(tenure.number("interest_saved").unwrap() > 0.0);

        let emi = loan_prepayment_calculator(&LoanPrepaymentRequest {
            mode: PrepaymentMode::ReduceEmi,
            ..request.clone()
        });
        assert_eq!(emi.number("new_tenure_months"), Some(240.0));
        assert!(emi.number("new_emi").unwrap() < emi.number("original_emi").unwrap());
        // Shortening the tenure saves more interest than lowering the EMI
        assert!(tenure.number("interest_saved").unwrap() > emi.number("interest_saved").unwrap());
    }

    #[test]
    fn test_prepayment_exceeding_balance() {
        let result = loan_prepayment_calculator(&LoanPrepaymentRequest {
            loan_amount: 100_000.0,
            annual_interest_rate: 9.0,
            tenure_months: 12,
            prepayment_amount: 150_000.0,
            prepayment_month: 3,
            mode: PrepaymentMode::ReduceTenure,
        });
        assert!(result.error().unwrap().contains("exceeds the outstanding balance"));
    }
}
