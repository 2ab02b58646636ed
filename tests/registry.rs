//! End-to-end calls through the registry's JSON surface

use serde_json::{json, Value};

use fincalc::{BatchCall, CalcError, EngineConfig, Registry};

fn run(name: &str, params: Value) -> Value {
    Registry::default().call(name, &params).unwrap().to_json().unwrap()
}

#[test]
fn every_success_carries_an_icon() {
    let registry = Registry::default();
    let calls = [
        ("emergency_funds_calculator", json!({"monthly_expenses": 50000})),
        ("fixed_deposit_calculator", json!({"principal": 100000, "annual_rate": 7.5, "tenure_years": 5})),
        ("cagr_calculator", json!({"initial_value": 100000, "final_value": 200000, "investment_period_years": 5})),
        ("hra_calculator", json!({"basic_salary": 50000, "hra_received": 20000, "actual_rent": 25000})),
        ("net_worth_calculator", json!({"assets": {"cash": 10}, "liabilities": {}})),
    ];
    for (name, params) in calls {
        let result = registry.call(name, &params).unwrap();
        assert!(result.is_success(), "{} failed: {:?}", name, result.error());
        let value = result.to_json().unwrap();
        assert!(value["icon"].is_string());
        assert!(value.get("error").is_none());
    }
}

#[test]
fn tax_regime_selection() {
    let value = run(
        "income_tax_calculator",
        json!({
            "annual_salary": 1_200_000,
            "section_80c_deduction": 150_000,
            "hra_received": 240_000,
            "rent_paid": 300_000,
            "basic_salary": 600_000
        }),
    );
    let old = value["tax_old_regime"].as_f64().unwrap();
    let new = value["tax_new_regime"].as_f64().unwrap();
    let expected = if new < old { "new" } else { "old" };
    assert_eq!(value["recommended_regime"], json!(expected));
    assert_eq!(value["icon"], json!("🧾"));
}

#[test]
fn capital_loss_is_untaxed() {
    let value = run(
        "capital_gains_tax_calculator",
        json!({
            "asset_type": "equity",
            "purchase_price": 100_000,
            "sale_price": 80_000,
            "purchase_date": "2019-04-01",
            "sale_date": "2021-04-01"
        }),
    );
    assert_eq!(value["capital_gain"], json!(-20_000.0));
    assert_eq!(value["tax_liability"], json!(0.0));
    assert_eq!(value["net_gain"], json!(-20_000.0));
}

#[test]
fn equity_holding_period_boundary() {
    let params = |sale_date: &str| {
        json!({
            "asset_type": "equity",
            "purchase_price": 100_000,
            "sale_price": 150_000,
            "purchase_date": "2020-01-01",
            "sale_date": sale_date
        })
    };

    let long = run("capital_gains_tax_calculator", params("2021-01-02"));
    assert_eq!(long["holding_period_days"], json!(367));
    assert_eq!(long["classification"], json!("long_term"));

    let short = run("capital_gains_tax_calculator", params("2020-12-31"));
    assert_eq!(short["classification"], json!("short_term"));
}

#[test]
fn unknown_asset_type_is_rejected() {
    let value = run(
        "capital_gains_tax_calculator",
        json!({
            "asset_type": "crypto",
            "purchase_price": 1,
            "sale_price": 2,
            "purchase_date": "2020-01-01",
            "sale_date": "2021-01-01"
        }),
    );
    assert_eq!(value["icon"], json!("💹"));
    assert!(value["error"].as_str().unwrap().starts_with("Invalid parameters"));
}

#[test]
fn goal_age_ordering_rejected() {
    let value = run(
        "mutual_fund_goal_calculator",
        json!({"target_amount": 1_000_000, "current_age": 45, "target_age": 25, "expected_return": 12}),
    );
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(value["icon"], json!("🎯"));
    assert!(value["error"].as_str().unwrap().contains("age"));
}

#[test]
fn moratorium_raises_emi() {
    let with_moratorium = run(
        "loan_amortization_schedule_calculator",
        json!({"loan_amount": 500_000, "annual_interest_rate": 11, "tenure_months": 60, "moratorium_months": 6}),
    );
    let without = run(
        "loan_amortization_schedule_calculator",
        json!({"loan_amount": 500_000, "annual_interest_rate": 11, "tenure_months": 60}),
    );
    assert!(with_moratorium["emi"].as_f64().unwrap() > without["emi"].as_f64().unwrap());
}

#[test]
fn schedule_table_is_complete() {
    let value = run(
        "loan_amortization_schedule_calculator",
        json!({"loan_amount": 120_000, "annual_interest_rate": 0, "tenure_months": 24}),
    );
    let rows = value["schedule"].as_array().unwrap();
    assert_eq!(rows.len(), 24);
    assert_eq!(rows[0]["payment"], json!(5_000.0));
    assert_eq!(rows[23]["closing_balance"], json!(0.0));
}

#[test]
fn banks_share_one_calculator() {
    let params = json!({"loan_amount": 500_000});
    let axis = run("axis_bank_personal_loan_calculator", params.clone());
    let icici = run("icici_bank_personal_loan_emi_calculator", params.clone());
    let hdfc = run("hdfc_bank_personal_loan_calculator", params);

    assert_eq!(axis["bank"], json!("Axis Bank"));
    assert!(axis.get("insurance_premium").is_some());
    assert!(icici.get("documentation_charges").is_some());
    assert!(hdfc.get("max_loan_amount").is_some());
    assert_ne!(axis["emi"], icici["emi"]);
}

#[test]
fn unknown_calculator_is_an_error() {
    let err = Registry::default().call("crystal_ball_calculator", &json!({})).unwrap_err();
    assert!(matches!(err, CalcError::UnknownCalculator(_)));
}

#[test]
fn batch_matches_sequential_calls() {
    let registry = Registry::new(EngineConfig::default_india());
    let calls: Vec<BatchCall> = serde_json::from_value(json!([
        {"calculator": "lumpsum_investment_calculator", "params": {"principal": 100000, "annual_return": 12, "years": 10}},
        {"calculator": "inflation_calculator", "params": {"current_price": 100000, "years": 10}},
        {"calculator": "gratuity_calculator", "params": {"monthly_salary": 50000, "years_of_service": 10}}
    ]))
    .unwrap();

    let batch = registry.evaluate_batch(&calls);
    for (call, result) in calls.iter().zip(batch) {
        let sequential = registry.call(&call.calculator, &call.params).unwrap();
        assert_eq!(result.unwrap(), sequential);
    }
}

#[test]
fn shipped_csv_config_matches_builtins() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/config");
    let loaded = EngineConfig::from_csv_path(&dir).unwrap();
    assert_eq!(loaded, EngineConfig::default_india());
}

#[test]
fn horizons_past_the_limit_are_rejected() {
    let sip = run(
        "mutual_fund_sip_calculator",
        json!({"monthly_investment": 5000, "annual_return": 12, "investment_period_years": 400_000_000}),
    );
    assert_eq!(sip["icon"], json!("📈"));
    assert!(sip["error"].as_str().unwrap().contains("cannot exceed 100 years"));

    let schedule = run(
        "loan_amortization_schedule_calculator",
        json!({"loan_amount": 500_000, "annual_interest_rate": 11, "tenure_months": 4_000_000_000u32}),
    );
    assert!(schedule["error"].as_str().unwrap().contains("cannot exceed 1200 months"));

    let nps = run("nps_calculator", json!({"monthly_contribution": 5000, "current_age": 0, "retirement_age": 4_000_000_000u32}));
    assert!(nps.get("error").is_some());

    let epf = run("epf_calculator", json!({"monthly_basic": 30000, "years_of_service": 400_000_000}));
    assert!(epf.get("error").is_some());
}
