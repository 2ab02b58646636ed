//! House Rent Allowance exemption

/// Share of basic salary exempt in metro cities (percent)
const METRO_BASIC_SHARE: f64 = 50.0;

/// Share of basic salary exempt elsewhere (percent)
const NON_METRO_BASIC_SHARE: f64 = 40.0;

/// Exempt HRA: the least of HRA received, rent in excess of 10% of basic,
/// and 50% (metro) / 40% of basic
///
/// All amounts are for the same period (monthly or annual).
pub fn compute_hra_exemption(basic_salary: f64, hra_received: f64, rent_paid: f64, is_metro: bool) -> f64 {
    let city_share = if is_metro { METRO_BASIC_SHARE } else { NON_METRO_BASIC_SHARE };
    let city_limit = basic_salary * city_share / 100.0;
    let rent_excess = (rent_paid - basic_salary * 0.10).max(0.0);

    hra_received.min(rent_excess).min(city_limit).max(0.0)
}

/// Percent of basic used for the city limit
pub fn city_share_percent(is_metro: bool) -> f64 {
    if is_metro { METRO_BASIC_SHARE } else { NON_METRO_BASIC_SHARE }
}
