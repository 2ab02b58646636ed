//! Asset classes, classification and the rate table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Asset class of a disposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Equity,
    Debt,
    RealEstate,
    Gold,
    Other,
}

impl AssetType {
    pub const ALL: [AssetType; 5] = [
        AssetType::Equity,
        AssetType::Debt,
        AssetType::RealEstate,
        AssetType::Gold,
        AssetType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Equity => "equity",
            AssetType::Debt => "debt",
            AssetType::RealEstate => "real_estate",
            AssetType::Gold => "gold",
            AssetType::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "equity" => Some(AssetType::Equity),
            "debt" => Some(AssetType::Debt),
            "real_estate" => Some(AssetType::RealEstate),
            "gold" => Some(AssetType::Gold),
            "other" => Some(AssetType::Other),
            _ => None,
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short- or long-term gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingClassification {
    ShortTerm,
    LongTerm,
}

impl HoldingClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoldingClassification::ShortTerm => "short_term",
            HoldingClassification::LongTerm => "long_term",
        }
    }
}

/// Threshold and rates for one asset class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetRule {
    /// Holdings strictly longer than this many days are long-term
    pub long_term_after_days: i64,
    /// Percent
    pub short_term_rate: f64,
    /// Percent
    pub long_term_rate: f64,
}

impl AssetRule {
    pub fn rate(&self, classification: HoldingClassification) -> f64 {
        match classification {
            HoldingClassification::ShortTerm => self.short_term_rate,
            HoldingClassification::LongTerm => self.long_term_rate,
        }
    }
}

/// Per-asset holding thresholds and tax rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalGainsTable {
    rules: HashMap<AssetType, AssetRule>,
}

impl CapitalGainsTable {
    pub fn india_default() -> Self {
        let mut rules = HashMap::new();
        rules.insert(AssetType::Equity, AssetRule { long_term_after_days: 365, short_term_rate: 15.0, long_term_rate: 10.0 });
        rules.insert(AssetType::RealEstate, AssetRule { long_term_after_days: 730, short_term_rate: 30.0, long_term_rate: 20.0 });
        rules.insert(AssetType::Debt, AssetRule { long_term_after_days: 1095, short_term_rate: 30.0, long_term_rate: 20.0 });
        rules.insert(AssetType::Gold, AssetRule { long_term_after_days: 1095, short_term_rate: 30.0, long_term_rate: 20.0 });
        rules.insert(AssetType::Other, AssetRule { long_term_after_days: 1095, short_term_rate: 30.0, long_term_rate: 20.0 });
        Self { rules }
    }

    /// Build from explicit rules; every asset class must be covered
    pub fn from_rules(rules: HashMap<AssetType, AssetRule>) -> Option<Self> {
        AssetType::ALL
            .iter()
            .all(|asset| rules.contains_key(asset))
            .then_some(Self { rules })
    }

    pub fn rule(&self, asset_type: AssetType) -> AssetRule {
        self.rules
            .get(&asset_type)
            .copied()
            .unwrap_or(AssetRule { long_term_after_days: 1095, short_term_rate: 30.0, long_term_rate: 20.0 })
    }
}

impl Default for CapitalGainsTable {
    fn default() -> Self {
        Self::india_default()
    }
}

/// A single asset disposal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapitalGainsInput {
    pub asset_type: AssetType,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub purchase_date: NaiveDate,
    pub sale_date: NaiveDate,
}

/// Gain, classification and tax on a disposal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapitalGainsResult {
    /// Signed; negative for a loss
    pub capital_gain: f64,
    pub holding_period_days: i64,
    pub classification: HoldingClassification,
    /// Percent
    pub tax_rate_applied: f64,
    pub tax_liability: f64,
    pub net_gain: f64,
}
