//! Invariants of the growth and amortization primitives

use approx::assert_relative_eq;
use proptest::prelude::*;

use fincalc::amortization::{apply_prepayment, build_schedule, compute_emi, LoanTerms, MoratoriumMode, PrepaymentMode};
use fincalc::growth::{
    future_value_annuity, future_value_lump_sum, required_periodic_contribution, AnnuityPlan, RatePeriod,
};

#[test]
fn zero_rate_limits() {
    assert_eq!(compute_emi(120_000.0, 0.0, 24), 5_000.0);

    let plan = AnnuityPlan::level(2_500.0, RatePeriod::monthly(0.0), 36);
    assert_eq!(future_value_annuity(&plan), 2_500.0 * 36.0);
}

#[test]
fn moratorium_raises_emi() {
    let plain = build_schedule(&LoanTerms::new(500_000.0, 11.0, 60)).unwrap();
    let deferred = build_schedule(
        &LoanTerms::new(500_000.0, 11.0, 60).with_moratorium(6, MoratoriumMode::Accrue),
    )
    .unwrap();
    assert!(deferred.installment() > plain.installment());
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_schedule_conserves_principal(
        principal in 1_000u32..5_000_000,
        rate_bp in 0u32..2_400,
        tenure in 2u32..361,
        moratorium_share in 0u32..25,
        accrue in any::<bool>()
    ) {
        let tenure_months = tenure;
        let moratorium = (tenure_months - 1) * moratorium_share / 100;
        let mode = if accrue { MoratoriumMode::Accrue } else { MoratoriumMode::PayInterest };
        let terms = LoanTerms::new(principal as f64, rate_bp as f64 / 100.0, tenure_months)
            .with_moratorium(moratorium, mode);
        let schedule = build_schedule(&terms).unwrap();

        let rows: Vec<_> = schedule.iter().collect();
        prop_assert_eq!(rows.len() as u32, tenure_months);

        let principal_paid: f64 = rows.iter().map(|row| row.principal_component).sum();
        prop_assert!((principal_paid - principal as f64).abs() <= 0.01);
        prop_assert_eq!(rows.last().unwrap().closing_balance, 0.0);

        for pair in rows.windows(2) {
            prop_assert_eq!(pair[0].closing_balance, pair[1].opening_balance);
        }
    }

    #[test]
    fn prop_lump_sum_monotone_in_rate_and_tenure(
        principal in 1_000u32..10_000_000,
        rate_bp in 1u32..2_000,
        extra_bp in 1u32..500,
        years in 1u32..40
    ) {
        let p = principal as f64;
        let low = RatePeriod::annual(rate_bp as f64 / 100.0);
        let high = RatePeriod::annual((rate_bp + extra_bp) as f64 / 100.0);

        prop_assert!(future_value_lump_sum(p, &high, years as f64) > future_value_lump_sum(p, &low, years as f64));
        prop_assert!(future_value_lump_sum(p, &low, (years + 1) as f64) > future_value_lump_sum(p, &low, years as f64));
    }

    #[test]
    fn prop_annuity_monotone_in_rate_and_tenure(
        contribution in 100u32..100_000,
        rate_bp in 1u32..2_000,
        extra_bp in 1u32..500,
        periods in 2u32..480
    ) {
        let c = contribution as f64;
        let low = RatePeriod::monthly(rate_bp as f64 / 100.0);
        let high = RatePeriod::monthly((rate_bp + extra_bp) as f64 / 100.0);

        let base = future_value_annuity(&AnnuityPlan::level(c, low, periods));
        prop_assert!(future_value_annuity(&AnnuityPlan::level(c, high, periods)) > base);
        prop_assert!(future_value_annuity(&AnnuityPlan::level(c, low, periods + 1)) > base);
    }

    #[test]
    fn prop_required_contribution_reaches_target(
        target in 1_000u32..50_000_000,
        rate_bp in 0u32..2_000,
        periods in 1u32..480
    ) {
        let rate = RatePeriod::monthly(rate_bp as f64 / 100.0);
        let contribution = required_periodic_contribution(target as f64, &rate, periods).unwrap();
        let reached = future_value_annuity(&AnnuityPlan::level(contribution, rate, periods));
        assert_relative_eq!(reached, target as f64, max_relative = 1e-9);
    }

    #[test]
    fn prop_prepayment_never_costs_interest(
        principal in 100_000u32..5_000_000,
        rate_bp in 100u32..2_000,
        tenure in 12u32..241,
        at_share in 1u32..90,
        prepay_share in 1u32..50,
        reduce_emi in any::<bool>()
    ) {
        let schedule = build_schedule(&LoanTerms::new(principal as f64, rate_bp as f64 / 100.0, tenure)).unwrap();
        let at_period = (tenure * at_share / 100).max(1);
        let outstanding = schedule.iter().nth((at_period - 1) as usize).unwrap().closing_balance;
        let amount = outstanding * prepay_share as f64 / 100.0;
        let mode = if reduce_emi { PrepaymentMode::ReduceEmi } else { PrepaymentMode::ReduceTenure };

        let outcome = apply_prepayment(&schedule, amount, at_period, mode).unwrap();
        prop_assert!(outcome.interest_saved >= -1e-6);
        prop_assert!(outcome.new_tenure_months <= tenure);
        prop_assert_eq!(outcome.schedule.iter().last().unwrap().closing_balance, 0.0);
    }

    #[test]
    fn prop_chained_prepayments_never_extend_the_loan(
        principal in 100_000u32..5_000_000,
        rate_bp in 100u32..2_000,
        tenure in 24u32..241,
        first_share in 1u32..50,
        second_share in 1u32..90,
        first_amount_share in 1u32..50,
        second_amount_share in 1u32..50,
        first_reduce_emi in any::<bool>(),
        second_reduce_emi in any::<bool>()
    ) {
        let mode = |reduce_emi: bool| if reduce_emi { PrepaymentMode::ReduceEmi } else { PrepaymentMode::ReduceTenure };
        let schedule = build_schedule(&LoanTerms::new(principal as f64, rate_bp as f64 / 100.0, tenure)).unwrap();

        let first_at = (tenure * first_share / 100).max(1);
        let outstanding = schedule.iter().nth((first_at - 1) as usize).unwrap().closing_balance;
        let first_amount = outstanding * first_amount_share as f64 / 100.0;
        let first = apply_prepayment(&schedule, first_amount, first_at, mode(first_reduce_emi)).unwrap();

        let second_at = first_at + (first.new_tenure_months - first_at) * second_share / 100;
        prop_assume!(second_at > first_at && second_at < first.new_tenure_months);
        let outstanding = first.schedule.iter().nth((second_at - 1) as usize).unwrap().closing_balance;
        let second_amount = outstanding * second_amount_share as f64 / 100.0;
        prop_assume!(second_amount > 0.01);
        let second = apply_prepayment(&first.schedule, second_amount, second_at, mode(second_reduce_emi)).unwrap();

        prop_assert!(second.new_tenure_months <= first.new_tenure_months);
        prop_assert!(second.interest_saved >= -1e-6);
        prop_assert_eq!(second.schedule.iter().last().unwrap().closing_balance, 0.0);
    }
}
