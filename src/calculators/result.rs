//! Uniform calculator result envelope
//!
//! Every calculator returns a [`CalculatorResult`]: a category icon plus
//! either an ordered list of named fields or an error message. Numbers are
//! rounded exactly once, in [`ResultBuilder::build`].

use log::warn;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use crate::amortization::AmortizationRow;

/// Calculator category, shown as an icon on every result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    EmergencyFund,
    Deposit,
    Investment,
    SmallSavings,
    PersonalLoan,
    BankLoan,
    Pension,
    ProvidentFund,
    Gratuity,
    Growth,
    Inflation,
    Goal,
    Retirement,
    Education,
    Allocation,
    CreditCard,
    MedicalLoan,
    MarriageLoan,
    RenovationLoan,
    HomeLoan,
    DebtRatio,
    Property,
    Schedule,
    Prepayment,
    Tax,
    CapitalGains,
    NetWorth,
}

impl Category {
    pub fn icon(&self) -> &'static str {
        match self {
            Category::EmergencyFund => "🚨",
            Category::Deposit => "🏦",
            Category::Investment => "📈",
            Category::SmallSavings | Category::PersonalLoan => "💸",
            Category::BankLoan => "🏦",
            Category::Pension => "💼",
            Category::ProvidentFund => "📚",
            Category::Gratuity => "💰",
            Category::Growth => "📊",
            Category::Inflation => "📉",
            Category::Goal => "🎯",
            Category::Retirement => "👴",
            Category::Education => "🎓",
            Category::Allocation => "🧮",
            Category::CreditCard => "💳",
            Category::MedicalLoan => "🩺",
            Category::MarriageLoan => "💍",
            Category::RenovationLoan => "🔨",
            Category::HomeLoan => "🏡",
            Category::DebtRatio => "📐",
            Category::Property => "🏠",
            Category::Schedule => "📅",
            Category::Prepayment => "⏩",
            Category::Tax => "🧾",
            Category::CapitalGains => "💹",
            Category::NetWorth => "⚖️",
        }
    }
}

/// A single named output value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Integer(i64),
    Text(String),
    /// Category → amount, emitted in key order
    Breakdown(BTreeMap<String, f64>),
    Table(Vec<AmortizationRow>),
}

impl FieldValue {
    /// Round every number inside to 2 decimals; None if any is non-finite
    fn rounded(self) -> Option<FieldValue> {
        match self {
            FieldValue::Number(value) => round2(value).map(FieldValue::Number),
            FieldValue::Breakdown(map) => map
                .into_iter()
                .map(|(key, value)| round2(value).map(|v| (key, v)))
                .collect::<Option<BTreeMap<_, _>>>()
                .map(FieldValue::Breakdown),
            FieldValue::Table(rows) => rows
                .into_iter()
                .map(round_row)
                .collect::<Option<Vec<_>>>()
                .map(FieldValue::Table),
            other => Some(other),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Number(value) => serializer.serialize_f64(*value),
            FieldValue::Integer(value) => serializer.serialize_i64(*value),
            FieldValue::Text(value) => serializer.serialize_str(value),
            FieldValue::Breakdown(map) => map.serialize(serializer),
            FieldValue::Table(rows) => rows.serialize(serializer),
        }
    }
}

/// Half away from zero, never negative zero
pub(crate) fn round2(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let rounded = (value * 100.0).round() / 100.0;
    Some(if rounded == 0.0 { 0.0 } else { rounded })
}

fn round_row(row: AmortizationRow) -> Option<AmortizationRow> {
    Some(AmortizationRow {
        period_index: row.period_index,
        opening_balance: round2(row.opening_balance)?,
        payment: round2(row.payment)?,
        interest_component: round2(row.interest_component)?,
        principal_component: round2(row.principal_component)?,
        closing_balance: round2(row.closing_balance)?,
    })
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Success {
        fields: Vec<(&'static str, FieldValue)>,
        recommendation: Option<String>,
    },
    Failure {
        error: String,
    },
}

/// Icon plus either ordered output fields or an error
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorResult {
    icon: &'static str,
    outcome: Outcome,
}

impl CalculatorResult {
    pub fn failure(category: Category, error: impl Into<String>) -> Self {
        Self {
            icon: category.icon(),
            outcome: Outcome::Failure { error: error.into() },
        }
    }

    pub fn icon(&self) -> &'static str {
        self.icon
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failure { error } => Some(error),
            Outcome::Success { .. } => None,
        }
    }

    pub fn recommendation(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { recommendation, .. } => recommendation.as_deref(),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        match &self.outcome {
            Outcome::Success { fields, .. } => fields
                .iter()
                .find(|(field, _)| *field == name)
                .map(|(_, value)| value),
            Outcome::Failure { .. } => None,
        }
    }

    /// Field names in output order
    pub fn field_names(&self) -> Vec<&'static str> {
        match &self.outcome {
            Outcome::Success { fields, .. } => fields.iter().map(|(name, _)| *name).collect(),
            Outcome::Failure { .. } => Vec::new(),
        }
    }

    /// Numeric field (integers widen to f64)
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.field(name)? {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.field(name)? {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn breakdown(&self, name: &str) -> Option<&BTreeMap<String, f64>> {
        match self.field(name)? {
            FieldValue::Breakdown(map) => Some(map),
            _ => None,
        }
    }

    pub fn table(&self, name: &str) -> Option<&[AmortizationRow]> {
        match self.field(name)? {
            FieldValue::Table(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl Serialize for CalculatorResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.outcome {
            Outcome::Success { fields, recommendation } => {
                let len = 1 + fields.len() + usize::from(recommendation.is_some());
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("icon", self.icon)?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                if let Some(recommendation) = recommendation {
                    map.serialize_entry("recommendation", recommendation)?;
                }
                map.end()
            }
            Outcome::Failure { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("icon", self.icon)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

/// Collects output fields in order and rounds them on `build`
#[derive(Debug, Clone)]
pub struct ResultBuilder {
    category: Category,
    fields: Vec<(&'static str, FieldValue)>,
    recommendation: Option<String>,
}

impl ResultBuilder {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            fields: Vec::new(),
            recommendation: None,
        }
    }

    pub fn number(mut self, name: &'static str, value: f64) -> Self {
        self.fields.push((name, FieldValue::Number(value)));
        self
    }

    pub fn integer(mut self, name: &'static str, value: i64) -> Self {
        self.fields.push((name, FieldValue::Integer(value)));
        self
    }

    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, FieldValue::Text(value.into())));
        self
    }

    pub fn breakdown(mut self, name: &'static str, value: BTreeMap<String, f64>) -> Self {
        self.fields.push((name, FieldValue::Breakdown(value)));
        self
    }

    pub fn table(mut self, name: &'static str, rows: Vec<AmortizationRow>) -> Self {
        self.fields.push((name, FieldValue::Table(rows)));
        self
    }

    pub fn recommendation(mut self, text: impl Into<String>) -> Self {
        self.recommendation = Some(text.into());
        self
    }

    /// Round all numbers; a non-finite value turns the result into a failure
    pub fn build(self) -> CalculatorResult {
        let mut fields = Vec::with_capacity(self.fields.len());
        for (name, value) in self.fields {
            match value.rounded() {
                Some(value) => fields.push((name, value)),
                None => {
                    warn!("Non-finite value in field '{}'", name);
                    return CalculatorResult::failure(
                        self.category,
                        format!("Calculation produced a non-finite value for '{}'", name),
                    );
                }
            }
        }

        CalculatorResult {
            icon: self.category.icon(),
            outcome: Outcome::Success {
                fields,
                recommendation: self.recommendation,
            },
        }
    }
}
