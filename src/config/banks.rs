//! Lender profiles for the parameterised personal loan calculator

use serde::{Deserialize, Serialize};

/// Interest rate for loans up to `up_to_amount` (None = any amount)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    pub up_to_amount: Option<f64>,
    /// Annual rate in percent
    pub annual_rate: f64,
}

/// Processing fee as a percent of the loan with optional floor and ceiling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessingFee {
    pub percent: f64,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl ProcessingFee {
    pub fn flat_percent(percent: f64) -> Self {
        Self {
            percent,
            minimum: None,
            maximum: None,
        }
    }

    /// Fee on `loan_amount` at `percent` (overriding the schedule's percent)
    pub fn amount_at(&self, loan_amount: f64, percent: f64) -> f64 {
        let mut fee = loan_amount * percent / 100.0;
        if let Some(min) = self.minimum {
            fee = fee.max(min);
        }
        if let Some(max) = self.maximum {
            fee = fee.min(max);
        }
        fee
    }
}

/// The one lender-specific charge or check each profile carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankCharge {
    /// Loan protection insurance as a percent of the loan, added to cost
    InsurancePremium { percent: f64 },
    /// Flat documentation charge, added to cost
    Documentation { amount: f64 },
    /// Eligibility capped at a multiple of monthly salary
    SalaryEligibility { min_monthly_salary: f64, loan_multiple_months: f64 },
}

/// Lending terms of a single bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankProfile {
    pub bank: String,
    /// Registry name of the calculator for this bank
    pub calculator_name: String,
    /// Ascending by `up_to_amount`
    pub rate_bands: Vec<RateBand>,
    pub default_tenure_months: u32,
    pub processing_fee: ProcessingFee,
    pub charge: BankCharge,
}

impl BankProfile {
    /// Rate of the first band covering `loan_amount`
    pub fn rate_for(&self, loan_amount: f64) -> f64 {
        self.rate_bands
            .iter()
            .find(|band| band.up_to_amount.map_or(true, |limit| loan_amount <= limit))
            .or_else(|| self.rate_bands.last())
            .map(|band| band.annual_rate)
            .unwrap_or(0.0)
    }
}

/// All configured lenders
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BankProfiles {
    profiles: Vec<BankProfile>,
}

impl BankProfiles {
    pub fn new(profiles: Vec<BankProfile>) -> Self {
        Self { profiles }
    }

    /// Axis, ICICI and HDFC personal loan terms
    pub fn default_lenders() -> Self {
        Self::new(vec![
            BankProfile {
                bank: "Axis Bank".to_string(),
                calculator_name: "axis_bank_personal_loan_calculator".to_string(),
                rate_bands: vec![RateBand { up_to_amount: None, annual_rate: 10.5 }],
                default_tenure_months: 60,
                processing_fee: ProcessingFee::flat_percent(2.0),
                charge: BankCharge::InsurancePremium { percent: 0.5 },
            },
            BankProfile {
                bank: "ICICI Bank".to_string(),
                calculator_name: "icici_bank_personal_loan_emi_calculator".to_string(),
                rate_bands: vec![RateBand { up_to_amount: None, annual_rate: 10.75 }],
                default_tenure_months: 60,
                processing_fee: ProcessingFee::flat_percent(2.5),
                charge: BankCharge::Documentation { amount: 5_000.0 },
            },
            BankProfile {
                bank: "HDFC Bank".to_string(),
                calculator_name: "hdfc_bank_personal_loan_calculator".to_string(),
                rate_bands: vec![RateBand { up_to_amount: None, annual_rate: 10.85 }],
                default_tenure_months: 60,
                processing_fee: ProcessingFee::flat_percent(2.5),
                charge: BankCharge::SalaryEligibility {
                    min_monthly_salary: 25_000.0,
                    loan_multiple_months: 12.0,
                },
            },
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &BankProfile> {
        self.profiles.iter()
    }

    pub fn by_calculator(&self, calculator_name: &str) -> Option<&BankProfile> {
        self.profiles.iter().find(|p| p.calculator_name == calculator_name)
    }
}
