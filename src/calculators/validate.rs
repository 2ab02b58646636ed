//! Boundary checks shared by the calculators

use crate::error::{CalcError, Result};

/// Longest saving or repayment horizon accepted, in years
pub(crate) const MAX_HORIZON_YEARS: u32 = 100;

pub(crate) fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid(format!("{} must be positive", name)))
    }
}

pub(crate) fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid(format!("{} cannot be negative", name)))
    }
}

pub(crate) fn percent(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(CalcError::invalid(format!("{} must be between 0 and 100", name)))
    }
}

pub(crate) fn at_least_one(name: &str, value: u32) -> Result<()> {
    if value >= 1 {
        Ok(())
    } else {
        Err(CalcError::invalid(format!("{} must be at least 1", name)))
    }
}

pub(crate) fn within_horizon(name: &str, years: u32) -> Result<()> {
    if years <= MAX_HORIZON_YEARS {
        Ok(())
    } else {
        Err(CalcError::invalid(format!(
            "{} cannot exceed {} years",
            name, MAX_HORIZON_YEARS
        )))
    }
}

/// Months in a horizon of `years`, rejecting horizons past the maximum
pub(crate) fn horizon_months(name: &str, years: u32) -> Result<u32> {
    within_horizon(name, years)?;
    Ok(years * 12)
}
