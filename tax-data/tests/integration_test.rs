//! Integration tests for batch calculation against the on-disk fixture.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::{FilerStatus, PayPeriod, PayeCalculator};
use tax_data::{BatchLoadError, evaluate, load_from_file, total_tax, write_results};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join("sample_requests.csv")
}

#[test]
fn test_load_fixture_file() {
    let requests = load_from_file(&fixture_path()).expect("fixture should load");

    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0].label.as_deref(), Some("Entry level"));
    assert_eq!(requests[0].input.gross, dec!(250000));
    assert_eq!(requests[2].status, FilerStatus::Freelance);
    assert_eq!(requests[2].input.period, PayPeriod::Annual);
    assert_eq!(requests[2].input.rent, dec!(3000000));
}

#[test]
fn test_salaried_executive_keeps_pension() {
    let requests = load_from_file(&fixture_path()).unwrap();

    assert!(requests[3].input.has_pension);
    assert!(!requests[1].input.has_pension);
}

#[test]
fn test_evaluate_fixture_rows() {
    let requests = load_from_file(&fixture_path()).unwrap();
    let rows = evaluate(&PayeCalculator::default(), &requests);

    // Entry level: 3m annual, 240k pension
    assert_eq!(rows[0].chargeable_income, dec!(2760000));
    assert_eq!(rows[0].total_annual_tax, dec!(294000));
    assert_eq!(rows[0].effective_rate, dec!(9.8));

    // Mid career: 6m annual, 240k rent relief, no pension
    assert_eq!(rows[1].rent_relief, dec!(240000));
    assert_eq!(rows[1].total_annual_tax, dec!(826800));
    assert_eq!(rows[1].total_monthly_tax, dec!(68900));

    // Consultant: rent relief capped
    assert_eq!(rows[2].rent_relief, dec!(500000));
    assert_eq!(rows[2].pension_deduction, dec!(960000));
    assert_eq!(rows[2].total_annual_tax, dec!(1687200));

    // Executive: reaches the top band
    assert_eq!(rows[3].chargeable_income, dec!(54700000));
    assert_eq!(rows[3].total_annual_tax, dec!(11605000));
    assert_eq!(rows[3].total_monthly_tax, dec!(967083.33));
    assert_eq!(rows[3].effective_rate, dec!(19.34));

    assert_eq!(total_tax(&rows), dec!(14413000));
}

#[test]
fn test_write_fixture_results_to_file() {
    let requests = load_from_file(&fixture_path()).unwrap();
    let rows = evaluate(&PayeCalculator::default(), &requests);

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("results.csv");
    let file = std::fs::File::create(&out_path).unwrap();
    write_results(file, &rows).unwrap();

    let written = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(written.lines().count(), 5);
    assert!(written.contains("Consultant,freelance,annual,12000000,3000000,true"));
}

#[test]
fn test_load_nonexistent_file_returns_io_error() {
    let result = load_from_file(Path::new("/this/path/does/not/exist.csv"));

    assert!(matches!(result, Err(BatchLoadError::Io(_))));
}
