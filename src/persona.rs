//! Read-only persona data feeding calculator parameters
//!
//! A provider returns scalar figures for a user id, or None when the record
//! is not available. [`PersonaSnapshot`] collects them once and turns them
//! into registry parameters, applying each calculator's default for a
//! missing figure.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Scalar figure a persona record may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaFigure {
    NetWorth,
    LiquidSavings,
    MonthlyIncome,
    MonthlyExpenses,
    MonthlyDebtPayments,
    EpfBalance,
    CreditScore,
}

impl PersonaFigure {
    pub const ALL: [PersonaFigure; 7] = [
        PersonaFigure::NetWorth,
        PersonaFigure::LiquidSavings,
        PersonaFigure::MonthlyIncome,
        PersonaFigure::MonthlyExpenses,
        PersonaFigure::MonthlyDebtPayments,
        PersonaFigure::EpfBalance,
        PersonaFigure::CreditScore,
    ];
}

/// Source of persona figures keyed by user id
pub trait PersonaDataProvider: Send + Sync {
    fn figure(&self, user_id: &str, figure: PersonaFigure) -> Option<f64>;
}

/// Figures for one user, fetched once
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonaSnapshot {
    pub user_id: String,
    pub net_worth: Option<f64>,
    pub liquid_savings: Option<f64>,
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub monthly_debt_payments: Option<f64>,
    pub epf_balance: Option<f64>,
    pub credit_score: Option<f64>,
}

impl PersonaSnapshot {
    pub fn fetch(provider: &dyn PersonaDataProvider, user_id: &str) -> Self {
        let get = |figure| provider.figure(user_id, figure).filter(|v: &f64| v.is_finite());
        Self {
            user_id: user_id.to_string(),
            net_worth: get(PersonaFigure::NetWorth),
            liquid_savings: get(PersonaFigure::LiquidSavings),
            monthly_income: get(PersonaFigure::MonthlyIncome),
            monthly_expenses: get(PersonaFigure::MonthlyExpenses),
            monthly_debt_payments: get(PersonaFigure::MonthlyDebtPayments),
            epf_balance: get(PersonaFigure::EpfBalance),
            credit_score: get(PersonaFigure::CreditScore),
        }
    }

    /// Share of figures present, in percent
    pub fn completeness(&self) -> f64 {
        let present = [
            self.net_worth,
            self.liquid_savings,
            self.monthly_income,
            self.monthly_expenses,
            self.monthly_debt_payments,
            self.epf_balance,
            self.credit_score,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count();
        present as f64 / PersonaFigure::ALL.len() as f64 * 100.0
    }

    /// Parameters for `emergency_funds_calculator`; None without expenses
    pub fn emergency_funds_params(&self, months_coverage: u32) -> Option<Value> {
        let monthly_expenses = self.monthly_expenses?;
        Some(json!({
            "monthly_expenses": monthly_expenses,
            "months_coverage": months_coverage,
            "current_savings": self.liquid_savings.unwrap_or(0.0),
        }))
    }

    /// Parameters for `debt_to_income_ratio_calculator`; None without income
    pub fn debt_to_income_params(&self) -> Option<Value> {
        let monthly_income = self.monthly_income?;
        Some(json!({
            "monthly_income": monthly_income,
            "monthly_debt_payments": self.monthly_debt_payments.unwrap_or(0.0),
        }))
    }

    /// Parameters for `retirement_corpus_calculator`; None without expenses
    ///
    /// Liquid savings and the EPF balance both count toward current savings.
    pub fn retirement_corpus_params(&self, current_age: u32) -> Option<Value> {
        let monthly_expenses = self.monthly_expenses?;
        let current_savings = self.liquid_savings.unwrap_or(0.0) + self.epf_balance.unwrap_or(0.0);
        Some(json!({
            "current_age": current_age,
            "monthly_expenses": monthly_expenses,
            "current_savings": current_savings,
        }))
    }
}

/// Provider backed by a map, for tests and demos
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersonaProvider {
    figures: HashMap<(String, PersonaFigure), f64>,
}

impl InMemoryPersonaProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user_id: &str, figure: PersonaFigure, value: f64) {
        self.figures.insert((user_id.to_string(), figure), value);
    }

    pub fn with_figure(mut self, user_id: &str, figure: PersonaFigure, value: f64) -> Self {
        self.insert(user_id, figure, value);
        self
    }
}

impl PersonaDataProvider for InMemoryPersonaProvider {
    fn figure(&self, user_id: &str, figure: PersonaFigure) -> Option<f64> {
        self.figures.get(&(user_id.to_string(), figure)).copied()
    }
}
