//! Capital gains: holding-period classification and tax per asset class

mod types;
mod classify;

pub use types::{
    AssetRule, AssetType, CapitalGainsInput, CapitalGainsResult, CapitalGainsTable,
    HoldingClassification,
};
pub use classify::{classify_holding_period, compute_capital_gains_tax};
