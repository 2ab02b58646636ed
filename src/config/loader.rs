//! CSV-based configuration loader
//!
//! Loads statutory tables from CSV files in data/config/

use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::capital_gains::{AssetRule, AssetType, CapitalGainsTable};
use crate::error::ConfigError;
use crate::tax::{TaxRegime, TaxSlab, TaxTables};

/// Default path to the configuration directory
pub const DEFAULT_CONFIG_PATH: &str = "data/config";

const TAX_SLABS_FILE: &str = "tax_slabs.csv";
const TAX_PARAMETERS_FILE: &str = "tax_parameters.csv";
const CAPITAL_GAINS_FILE: &str = "capital_gains.csv";

#[derive(Debug, Deserialize)]
struct SlabRow {
    regime: String,
    /// Blank for the top (unbounded) slab
    upper_bound: Option<f64>,
    rate_percent: f64,
}

#[derive(Debug, Deserialize)]
struct ParameterRow {
    key: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct CapitalGainsRow {
    asset_type: String,
    long_term_after_days: i64,
    short_term_rate: f64,
    long_term_rate: f64,
}

/// Load slabs and tax parameters from `tax_slabs.csv` and `tax_parameters.csv`
pub fn load_tax_tables(path: &Path) -> Result<TaxTables, ConfigError> {
    let slabs = File::open(path.join(TAX_SLABS_FILE))?;
    let params = File::open(path.join(TAX_PARAMETERS_FILE))?;
    load_tax_tables_from_readers(slabs, params)
}

/// Load tax tables from any readers (useful for testing)
pub fn load_tax_tables_from_readers<S: Read, P: Read>(slabs: S, params: P) -> Result<TaxTables, ConfigError> {
    let mut tables = TaxTables::india_default();
    tables.old_regime.clear();
    tables.new_regime.clear();

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(slabs);
    for result in reader.deserialize() {
        let row: SlabRow = result?;
        let regime = TaxRegime::parse(&row.regime).ok_or_else(|| {
            ConfigError::invalid(TAX_SLABS_FILE, format!("unknown regime '{}'", row.regime))
        })?;
        if row.rate_percent < 0.0 {
            return Err(ConfigError::invalid(TAX_SLABS_FILE, "slab rates cannot be negative"));
        }
        let slab = TaxSlab {
            upper_bound: row.upper_bound,
            rate_percent: row.rate_percent,
        };
        match regime {
            TaxRegime::Old => tables.old_regime.push(slab),
            TaxRegime::New => tables.new_regime.push(slab),
        }
    }

    for regime in [TaxRegime::Old, TaxRegime::New] {
        validate_slabs(regime, tables.slabs(regime))?;
    }

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(params);
    for result in reader.deserialize() {
        let row: ParameterRow = result?;
        if row.value < 0.0 {
            return Err(ConfigError::invalid(
                TAX_PARAMETERS_FILE,
                format!("'{}' cannot be negative", row.key),
            ));
        }
        match row.key.as_str() {
            "section_80c_cap" => tables.section_80c_cap = row.value,
            "cess_percent" => tables.cess_percent = row.value,
            other => warn!("Ignoring unknown tax parameter '{}'", other),
        }
    }

    Ok(tables)
}

/// Slabs must be strictly ascending and end with one unbounded slab
fn validate_slabs(regime: TaxRegime, slabs: &[TaxSlab]) -> Result<(), ConfigError> {
    let Some((last, bounded)) = slabs.split_last() else {
        return Err(ConfigError::invalid(
            TAX_SLABS_FILE,
            format!("no slabs for the {} regime", regime),
        ));
    };
    if last.upper_bound.is_some() {
        return Err(ConfigError::invalid(
            TAX_SLABS_FILE,
            format!("the last {} regime slab must have a blank upper_bound", regime),
        ));
    }

    let mut previous = 0.0;
    for slab in bounded {
        match slab.upper_bound {
            Some(upper) if upper > previous => previous = upper,
            _ => {
                return Err(ConfigError::invalid(
                    TAX_SLABS_FILE,
                    format!("{} regime slabs must be bounded and strictly ascending", regime),
                ))
            }
        }
    }
    Ok(())
}

/// Load thresholds and rates from `capital_gains.csv`
pub fn load_capital_gains_table(path: &Path) -> Result<CapitalGainsTable, ConfigError> {
    let file = File::open(path.join(CAPITAL_GAINS_FILE))?;
    load_capital_gains_from_reader(file)
}

/// Load the capital gains table from any reader (useful for testing)
pub fn load_capital_gains_from_reader<R: Read>(reader: R) -> Result<CapitalGainsTable, ConfigError> {
    let mut rules = HashMap::new();

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    for result in reader.deserialize() {
        let row: CapitalGainsRow = result?;
        let asset = AssetType::parse(&row.asset_type).ok_or_else(|| {
            ConfigError::invalid(CAPITAL_GAINS_FILE, format!("unknown asset type '{}'", row.asset_type))
        })?;
        if row.long_term_after_days < 0 || row.short_term_rate < 0.0 || row.long_term_rate < 0.0 {
            return Err(ConfigError::invalid(
                CAPITAL_GAINS_FILE,
                format!("negative threshold or rate for '{}'", asset),
            ));
        }
        let rule = AssetRule {
            long_term_after_days: row.long_term_after_days,
            short_term_rate: row.short_term_rate,
            long_term_rate: row.long_term_rate,
        };
        if rules.insert(asset, rule).is_some() {
            warn!("Duplicate capital gains row for '{}'; keeping the last one", asset);
        }
    }

    let missing: Vec<&str> = AssetType::ALL
        .iter()
        .filter(|asset| !rules.contains_key(*asset))
        .map(AssetType::as_str)
        .collect();

    CapitalGainsTable::from_rules(rules).ok_or_else(|| {
        ConfigError::invalid(CAPITAL_GAINS_FILE, format!("missing asset types: {}", missing.join(", ")))
    })
}
