//! Holding-period classification and capital gains tax

use chrono::NaiveDate;

use super::types::{AssetType, CapitalGainsInput, CapitalGainsResult, CapitalGainsTable, HoldingClassification};
use crate::error::{CalcError, Result};

/// Whole days held and the resulting classification
///
/// Long-term only when the holding strictly exceeds the asset's threshold.
pub fn classify_holding_period(
    asset_type: AssetType,
    purchase_date: NaiveDate,
    sale_date: NaiveDate,
    table: &CapitalGainsTable,
) -> Result<(i64, HoldingClassification)> {
    if sale_date < purchase_date {
        return Err(CalcError::invalid("Sale date cannot be before purchase date"));
    }

    let holding_period_days = (sale_date - purchase_date).num_days();
    let rule = table.rule(asset_type);
    let classification = if holding_period_days > rule.long_term_after_days {
        HoldingClassification::LongTerm
    } else {
        HoldingClassification::ShortTerm
    };

    Ok((holding_period_days, classification))
}

/// Signed gain, applicable rate and tax (losses attract no tax)
pub fn compute_capital_gains_tax(input: &CapitalGainsInput, table: &CapitalGainsTable) -> Result<CapitalGainsResult> {
    let (holding_period_days, classification) =
        classify_holding_period(input.asset_type, input.purchase_date, input.sale_date, table)?;

    let capital_gain = input.sale_price - input.purchase_price;
    let tax_rate_applied = table.rule(input.asset_type).rate(classification);
    let tax_liability = capital_gain.max(0.0) * tax_rate_applied / 100.0;

    Ok(CapitalGainsResult {
        capital_gain,
        holding_period_days,
        classification,
        tax_rate_applied,
        tax_liability,
        net_gain: capital_gain - tax_liability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_equity_boundary() {
        let table = CapitalGainsTable::india_default();

        let (days, class) =
            classify_holding_period(AssetType::Equity, date(2020, 1, 1), date(2021, 1, 2), &table).unwrap();
        assert_eq!(days, 367);
        assert_eq!(class, HoldingClassification::LongTerm);

        let (days, class) =
            classify_holding_period(AssetType::Equity, date(2020, 1, 1), date(2020, 12, 31), &table).unwrap();
        assert_eq!(days, 365);
        assert_eq!(class, HoldingClassification::ShortTerm);
    }

    #[test]
    fn test_threshold_day_is_short_term() {
        let table = CapitalGainsTable::india_default();
        // 2021 is not a leap year: exactly 365 days
        let (days, class) =
            classify_holding_period(AssetType::Equity, date(2021, 1, 1), date(2022, 1, 1), &table).unwrap();
        assert_eq!(days, 365);
        assert_eq!(class, HoldingClassification::ShortTerm);
    }

    #[test]
    fn test_thresholds_differ_by_asset() {
        let table = CapitalGainsTable::india_default();
        let bought = date(2019, 1, 1);
        let sold = date(2021, 6, 1);
        let (_, equity) = classify_holding_period(AssetType::Equity, bought, sold, &table).unwrap();
        let (_, real_estate) = classify_holding_period(AssetType::RealEstate, bought, sold, &table).unwrap();
        let (_, debt) = classify_holding_period(AssetType::Debt, bought, sold, &table).unwrap();
        assert_eq!(equity, HoldingClassification::LongTerm);
        assert_eq!(real_estate, HoldingClassification::LongTerm);
        assert_eq!(debt, HoldingClassification::ShortTerm);
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let table = CapitalGainsTable::india_default();
        let result = classify_holding_period(AssetType::Gold, date(2022, 1, 1), date(2021, 1, 1), &table);
        assert!(matches!(result, Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn test_loss_has_no_tax() {
        let table = CapitalGainsTable::india_default();
        let input = CapitalGainsInput {
            asset_type: AssetType::Equity,
            purchase_price: 100_000.0,
            sale_price: 80_000.0,
            purchase_date: date(2020, 1, 1),
            sale_date: date(2020, 6, 1),
        };
        let result = compute_capital_gains_tax(&input, &table).unwrap();
        assert_eq!(result.capital_gain, -20_000.0);
        assert_eq!(result.tax_liability, 0.0);
        assert_eq!(result.net_gain, -20_000.0);
    }

    #[test]
    fn test_long_term_equity_gain() {
        let table = CapitalGainsTable::india_default();
        let input = CapitalGainsInput {
            asset_type: AssetType::Equity,
            purchase_price: 100_000.0,
            sale_price: 150_000.0,
            purchase_date: date(2020, 1, 1),
            sale_date: date(2021, 1, 2),
        };
        let result = compute_capital_gains_tax(&input, &table).unwrap();
        assert_eq!(result.classification, HoldingClassification::LongTerm);
        assert_eq!(result.tax_rate_applied, 10.0);
        assert!((result.tax_liability - 5_000.0).abs() < 1e-9);
        assert!((result.net_gain - 45_000.0).abs() < 1e-9);
    }
}
