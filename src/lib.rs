//! Financial calculation engine for Indian personal finance
//!
//! This library provides:
//! - Compound growth and annuity primitives (SIP, step-up, inverse solving)
//! - EMI amortization schedules with moratorium and prepayment handling
//! - Slab-based income tax under the old and new regimes
//! - Capital gains classification and taxation by asset class
//! - Thirty-one named calculators behind a single registry

pub mod amortization;
pub mod calculators;
pub mod capital_gains;
pub mod config;
pub mod error;
pub mod growth;
pub mod persona;
pub mod registry;
pub mod tax;

// Re-export commonly used types
pub use calculators::{CalculatorResult, Category, FieldValue};
pub use config::EngineConfig;
pub use error::{CalcError, ConfigError};
pub use persona::{InMemoryPersonaProvider, PersonaDataProvider, PersonaFigure, PersonaSnapshot};
pub use registry::{BatchCall, Registry};
