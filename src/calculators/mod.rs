//! Named calculators over the growth, amortization, tax and capital gains engines
//!
//! Each calculator takes a deserialisable request, validates it once, calls
//! into the engines and shapes a [`CalculatorResult`]. Validation failures
//! come back as the calculator's error envelope, never as a panic.

mod result;
mod validate;

pub mod goals;
pub mod loans;
pub mod property;
pub mod savings;
pub mod tax;
pub mod wealth;

pub use result::{CalculatorResult, Category, FieldValue, ResultBuilder};

use log::warn;

use crate::error::Result;

/// Build the success envelope, or the failure envelope for a rejected input
pub(crate) fn finish(category: Category, calculation: Result<ResultBuilder>) -> CalculatorResult {
    match calculation {
        Ok(builder) => builder.build(),
        Err(err) => {
            warn!("{:?} calculation rejected: {}", category, err);
            CalculatorResult::failure(category, err.to_string())
        }
    }
}
