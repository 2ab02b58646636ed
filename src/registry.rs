//! Name → calculator registry
//!
//! Built once from an [`EngineConfig`]; every calculator is addressable by
//! its public name and takes its parameters as a JSON object.

use log::debug;
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::calculators::{goals, loans, property, savings, tax, wealth};
use crate::calculators::{CalculatorResult, Category};
use crate::config::EngineConfig;
use crate::error::CalcError;

type Calculator = Box<dyn Fn(&Value, &EngineConfig) -> CalculatorResult + Send + Sync>;

/// Wrap a typed calculator so it accepts raw JSON parameters
fn entry<R, F>(category: Category, run: F) -> Calculator
where
    R: DeserializeOwned,
    F: Fn(&R, &EngineConfig) -> CalculatorResult + Send + Sync + 'static,
{
    Box::new(move |params: &Value, config: &EngineConfig| {
        // A missing parameter object means "all defaults"
        let parsed = match params {
            Value::Null => R::deserialize(&Value::Object(Default::default())),
            params => R::deserialize(params),
        };
        match parsed {
            Ok(request) => run(&request, config),
            Err(err) => CalculatorResult::failure(category, format!("Invalid parameters: {}", err)),
        }
    })
}

/// One call of a batch
#[derive(Debug, Clone, Deserialize)]
pub struct BatchCall {
    pub calculator: String,
    #[serde(default)]
    pub params: Value,
}

pub struct Registry {
    config: EngineConfig,
    calculators: Vec<(String, Calculator)>,
}

impl Registry {
    pub fn new(config: EngineConfig) -> Self {
        let mut calculators: Vec<(String, Calculator)> = Vec::new();
        let mut add = |name: &str, calculator: Calculator| calculators.push((name.to_string(), calculator));

        add("emergency_funds_calculator", entry(Category::EmergencyFund, |r, _| savings::emergency_funds_calculator(r)));
        add("fixed_deposit_calculator", entry(Category::Deposit, |r, _| savings::fixed_deposit_calculator(r)));
        add("mutual_fund_sip_calculator", entry(Category::Investment, |r, _| savings::mutual_fund_sip_calculator(r)));
        add("lumpsum_investment_calculator", entry(Category::Investment, |r, _| savings::lumpsum_investment_calculator(r)));
        add("ppf_calculator", entry(Category::SmallSavings, |r, _| savings::ppf_calculator(r)));
        add("nps_calculator", entry(Category::Pension, |r, _| savings::nps_calculator(r)));
        add("epf_calculator", entry(Category::ProvidentFund, |r, _| savings::epf_calculator(r)));
        add("gratuity_calculator", entry(Category::Gratuity, |r, _| savings::gratuity_calculator(r)));
        add("cagr_calculator", entry(Category::Growth, |r, _| savings::cagr_calculator(r)));
        add("inflation_calculator", entry(Category::Inflation, |r, _| savings::inflation_calculator(r)));

        add("mutual_fund_goal_calculator", entry(Category::Goal, |r, _| goals::mutual_fund_goal_calculator(r)));
        add("retirement_corpus_calculator", entry(Category::Retirement, |r, _| goals::retirement_corpus_calculator(r)));
        add("child_education_calculator", entry(Category::Education, |r, _| goals::child_education_calculator(r)));
        add("asset_allocation_rebalancer", entry(Category::Allocation, |r, _| goals::asset_allocation_rebalancer(r)));

        add("credit_card_interest_calculator", entry(Category::CreditCard, |r, _| loans::credit_card_interest_calculator(r)));
        add("personal_loan_emi_calculator", entry(Category::PersonalLoan, |r, _| loans::personal_loan_emi_calculator(r)));
        add("medical_loan_emi_calculator", entry(Category::MedicalLoan, |r, _| loans::medical_loan_emi_calculator(r)));
        add("marriage_loan_emi_calculator", entry(Category::MarriageLoan, |r, _| loans::marriage_loan_emi_calculator(r)));
        add("home_renovation_emi_calculator", entry(Category::RenovationLoan, |r, _| loans::home_renovation_emi_calculator(r)));
        for profile in config.banks.iter() {
            let name = profile.calculator_name.clone();
            let profile = profile.clone();
            add(
                &name,
                entry(Category::BankLoan, move |r, _| loans::bank_personal_loan_calculator(r, &profile)),
            );
        }
        add("home_loan_affordability_calculator", entry(Category::HomeLoan, |r, _| property::home_loan_affordability_calculator(r)));
        add("debt_to_income_ratio_calculator", entry(Category::DebtRatio, |r, _| wealth::debt_to_income_ratio_calculator(r)));
        add("rent_vs_buy_calculator", entry(Category::Property, |r, _| property::rent_vs_buy_calculator(r)));
        add("loan_amortization_schedule_calculator", entry(Category::Schedule, |r, _| loans::loan_amortization_schedule_calculator(r)));
        add("loan_prepayment_calculator", entry(Category::Prepayment, |r, _| loans::loan_prepayment_calculator(r)));

        add("hra_calculator", entry(Category::Tax, |r, _| tax::hra_calculator(r)));
        add("income_tax_calculator", entry(Category::Tax, |r, c| tax::income_tax_calculator(r, &c.tax)));
        add(
            "capital_gains_tax_calculator",
            entry(Category::CapitalGains, |r, c| tax::capital_gains_tax_calculator(r, &c.capital_gains)),
        );

        add("net_worth_calculator", entry(Category::NetWorth, |r, _| wealth::net_worth_calculator(r)));

        debug!("Registered {} calculators", calculators.len());
        Self { config, calculators }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Calculator names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.calculators.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.calculators.iter().any(|(n, _)| n == name)
    }

    /// Run one calculator; bad parameters come back as its error envelope
    pub fn call(&self, name: &str, params: &Value) -> Result<CalculatorResult, CalcError> {
        let (_, calculator) = self
            .calculators
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| CalcError::UnknownCalculator(name.to_string()))?;

        debug!("Dispatching {}", name);
        Ok(calculator(params, &self.config))
    }

    /// Run independent calls in parallel; results keep input order
    pub fn evaluate_batch(&self, calls: &[BatchCall]) -> Vec<Result<CalculatorResult, CalcError>> {
        debug!("Evaluating batch of {} calls", calls.len());
        calls
            .par_iter()
            .map(|call| self.call(&call.calculator, &call.params))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(EngineConfig::default_india())
    }
}
