//! Balance-sheet health: debt-to-income and net worth

use serde::Deserialize;
use std::collections::BTreeMap;

use super::validate::{non_negative, positive};
use super::{finish, CalculatorResult, Category, ResultBuilder};
use crate::error::{CalcError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebtToIncomeRequest {
    pub monthly_income: f64,
    pub monthly_debt_payments: f64,
}

pub fn debt_to_income_ratio_calculator(request: &DebtToIncomeRequest) -> CalculatorResult {
    finish(Category::DebtRatio, debt_to_income(request))
}

fn debt_to_income(request: &DebtToIncomeRequest) -> Result<ResultBuilder> {
    positive("Monthly income", request.monthly_income)?;
    non_negative("Monthly debt payments", request.monthly_debt_payments)?;

    let ratio = request.monthly_debt_payments / request.monthly_income * 100.0;
    let (status, recommendation) = match ratio {
        r if r <= 20.0 => ("Excellent", "✅ Debt is well under control"),
        r if r <= 36.0 => ("Good", "👍 Manageable debt; avoid adding new loans"),
        r if r <= 50.0 => ("Fair", "⚠️ Debt is high; prioritise paying down costly loans"),
        _ => ("Poor", "🚨 Debt exceeds half of income; restructure or consolidate"),
    };

    Ok(ResultBuilder::new(Category::DebtRatio)
        .number("debt_to_income_ratio", ratio)
        .number("monthly_income", request.monthly_income)
        .number("monthly_debt_payments", request.monthly_debt_payments)
        .number("disposable_income", request.monthly_income - request.monthly_debt_payments)
        .text("status", status)
        .recommendation(recommendation))
}

/// Category name to amount; order carries no meaning
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetWorthRequest {
    #[serde(default)]
    pub assets: BTreeMap<String, f64>,
    #[serde(default)]
    pub liabilities: BTreeMap<String, f64>,
}

pub fn net_worth_calculator(request: &NetWorthRequest) -> CalculatorResult {
    finish(Category::NetWorth, net_worth(request))
}

fn total(kind: &str, entries: &BTreeMap<String, f64>) -> Result<f64> {
    for (category, amount) in entries {
        if !amount.is_finite() || *amount < 0.0 {
            return Err(CalcError::invalid(format!(
                "{} '{}' cannot be negative",
                kind, category
            )));
        }
    }
    Ok(entries.values().sum())
}

fn net_worth(request: &NetWorthRequest) -> Result<ResultBuilder> {
    let total_assets = total("Asset", &request.assets)?;
    let total_liabilities = total("Liability", &request.liabilities)?;

    let debt_to_asset_ratio = if total_assets > 0.0 {
        total_liabilities / total_assets * 100.0
    } else if total_liabilities > 0.0 {
        return Err(CalcError::invalid(
            "Debt to asset ratio is undefined when liabilities exist without assets",
        ));
    } else {
        0.0
    };

    let financial_health = match debt_to_asset_ratio {
        r if r <= 30.0 => "Excellent - Low debt burden",
        r if r <= 50.0 => "Good - Moderate debt burden",
        r if r <= 70.0 => "Average - High debt burden",
        _ => "Poor - Very high debt burden",
    };

    Ok(ResultBuilder::new(Category::NetWorth)
        .number("total_assets", total_assets)
        .number("total_liabilities", total_liabilities)
        .number("net_worth", total_assets - total_liabilities)
        .breakdown("asset_breakdown", request.assets.clone())
        .breakdown("liability_breakdown", request.liabilities.clone())
        .number("debt_to_asset_ratio", debt_to_asset_ratio)
        .text("financial_health", financial_health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_debt_to_income_bands() {
        let band = |debt: f64| {
            debt_to_income_ratio_calculator(&DebtToIncomeRequest {
                monthly_income: 100_000.0,
                monthly_debt_payments: debt,
            })
            .text("status")
            .map(str::to_string)
        };
        assert_eq!(band(20_000.0).as_deref(), Some("Excellent"));
        assert_eq!(band(36_000.0).as_deref(), Some("Good"));
        assert_eq!(band(50_000.0).as_deref(), Some("Fair"));
        assert_eq!(band(50_001.0).as_deref(), Some("Poor"));
    }

    #[test]
    fn test_debt_to_income_zero_income() {
        let result = debt_to_income_ratio_calculator(&DebtToIncomeRequest {
            monthly_income: 0.0,
            monthly_debt_payments: 1_000.0,
        });
        assert_eq!(result.icon(), "📐");
        assert_eq!(result.error(), Some("Monthly income must be positive"));
    }

    #[test]
    fn test_net_worth_from_json() {
        let request: NetWorthRequest = serde_json::from_value(json!({
            "assets": {"real_estate": 1_000_000, "cash": 50_000, "investments": 200_000},
            "liabilities": {"home_loan": 800_000, "credit_card": 25_000}
        }))
        .unwrap();
        let result = net_worth_calculator(&request);

        assert_eq!(result.number("total_assets"), Some(1_250_000.0));
        assert_eq!(result.number("total_liabilities"), Some(825_000.0));
        assert_eq!(result.number("net_worth"), Some(425_000.0));
        assert_eq!(result.number("debt_to_asset_ratio"), Some(66.0));
        assert_eq!(result.text("financial_health"), Some("Average - High debt burden"));

        let keys: Vec<_> = result.breakdown("asset_breakdown").unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["cash", "investments", "real_estate"]);
    }

    #[test]
    fn test_net_worth_empty() {
        let request: NetWorthRequest = serde_json::from_value(json!({})).unwrap();
        let result = net_worth_calculator(&request);
        assert_eq!(result.number("net_worth"), Some(0.0));
        assert_eq!(result.number("debt_to_asset_ratio"), Some(0.0));
        assert_eq!(result.text("financial_health"), Some("Excellent - Low debt burden"));
    }

    #[test]
    fn test_net_worth_rejects_negative_entries() {
        let mut assets = BTreeMap::new();
        assets.insert("cash".to_string(), -5.0);
        let result = net_worth_calculator(&NetWorthRequest {
            assets,
            liabilities: BTreeMap::new(),
        });
        assert_eq!(result.error(), Some("Asset 'cash' cannot be negative"));
    }

    #[test]
    fn test_net_worth_liabilities_without_assets() {
        let mut liabilities = BTreeMap::new();
        liabilities.insert("personal_loan".to_string(), 10_000.0);
        let result = net_worth_calculator(&NetWorthRequest {
            assets: BTreeMap::new(),
            liabilities,
        });
        assert!(!result.is_success());
    }
}
