//! End-to-end runs of the `takehome` binary.

use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn takehome(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_takehome"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run takehome")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is not UTF-8")
}

#[test]
fn compare_prints_both_earners_for_default_year() {
    let output = takehome(&["compare", "--ctc", "1200"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "For a CTC of 12 lac a year, an employee takes home 63K, while a consultant takes home 96K, each month.\n"
    );
}

#[test]
fn gross_quotes_fee_for_marginal_consultant() {
    let output = takehome(&["--year", "fy2021-22-marginal", "gross", "--target", "160664"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "For a net income of ₹160664 a month, a consultant should quote a fee of ₹233732 a month.\n"
    );
}

#[test]
fn net_json_carries_breakdown() {
    let output = takehome(&["net", "--gross", "1200", "--json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["earner"], "employee");
    assert_eq!(json["taxable_income"], "1040");
    assert_eq!(json["take_home"], "63");
}

#[test]
fn negative_gross_fails_with_context() {
    let output = takehome(&["net", "--gross=-5"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to assess gross income -5"), "{stderr}");
    assert!(stderr.contains("gross income must be non-negative"), "{stderr}");
}
