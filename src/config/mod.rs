//! Engine configuration: tax tables, capital gains rules and bank loan profiles

mod banks;
pub mod loader;

pub use banks::{BankCharge, BankProfile, BankProfiles, ProcessingFee, RateBand};
pub use loader::DEFAULT_CONFIG_PATH;

use std::path::Path;

use crate::capital_gains::CapitalGainsTable;
use crate::error::ConfigError;
use crate::tax::TaxTables;

/// Container for every table the calculators read
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub tax: TaxTables,
    pub capital_gains: CapitalGainsTable,
    pub banks: BankProfiles,
}

impl EngineConfig {
    /// Built-in Indian statutory defaults
    pub fn default_india() -> Self {
        Self {
            tax: TaxTables::india_default(),
            capital_gains: CapitalGainsTable::india_default(),
            banks: BankProfiles::default_lenders(),
        }
    }

    /// Load tables from CSV files in the default location (data/config/)
    pub fn from_csv() -> Result<Self, ConfigError> {
        Self::from_csv_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load tables from CSV files in a specific directory; bank profiles stay built in
    pub fn from_csv_path(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            tax: loader::load_tax_tables(path)?,
            capital_gains: loader::load_capital_gains_table(path)?,
            banks: BankProfiles::default_lenders(),
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::default_india()
    }
}
