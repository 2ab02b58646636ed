//! Income tax computation: HRA exemption, marginal slabs and regime comparison

mod slabs;
mod hra;
mod income;

pub use slabs::{TaxRegime, TaxSlab, TaxTables, compute_slab_tax};
pub use hra::{city_share_percent, compute_hra_exemption};
pub use income::{TaxInput, TaxResult, compute_income_tax};
