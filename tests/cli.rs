//! E2E tests driving the tradetax binary against a scratch data directory

use rust_decimal::Decimal;
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use std::str::FromStr;
use tempfile::TempDir;

const TODAY: &str = "2026-10-19";

fn tradetax(data_dir: &Path, args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--", "--data-dir"])
        .arg(data_dir)
        .args(["--today", TODAY])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let output = tradetax(data_dir, args);
    assert!(output.status.success(), "Command {:?} failed: {:?}", args, output);
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn run_json(data_dir: &Path, args: &[&str]) -> Value {
    let stdout = run_ok(data_dir, args);
    serde_json::from_str(&stdout).expect("valid JSON output")
}

fn money(value: &Value) -> Decimal {
    let text = value.as_str().expect("decimal serialized as a string");
    Decimal::from_str(text).expect("decimal value")
}

/// Summary taxes net profit and spreads it over the months left in the year
#[test]
fn summary_estimates_tax_on_net_profit() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "income", "-a", "62000", "-c", "client", "--date", "2026-03-01"]);
    run_ok(dir.path(), &["add", "expense", "-a", "2000", "-c", "materials", "--date", "2026-04-01"]);

    let summary = run_json(dir.path(), &["summary", "--json"]);
    assert_eq!(money(&summary["total_income"]), Decimal::from(62000));
    assert_eq!(money(&summary["total_expenses"]), Decimal::from(2000));
    assert_eq!(money(&summary["net_profit"]), Decimal::from(60000));
    assert_eq!(money(&summary["estimated_tax"]), Decimal::from(9486));
    // October leaves three months
    assert_eq!(money(&summary["set_aside_per_month"]), Decimal::from(3162));
}

#[test]
fn summary_table_output() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "income", "-a", "1,250.50", "-c", "sale"]);

    let stdout = run_ok(dir.path(), &["summary"]);
    assert!(stdout.contains("SUMMARY (as of 2026-10-19)"));
    assert!(stdout.contains("£1,250.50"));
    assert!(stdout.contains("3 months left"));
}

#[test]
fn tax_liability_with_default_settings() {
    let dir = TempDir::new().unwrap();
    let result = run_json(dir.path(), &["tax", "--income", "60000", "--json"]);
    assert_eq!(money(&result["personal_allowance"]), Decimal::from(12570));
    assert_eq!(money(&result["taxable_income"]), Decimal::from(47430));
    assert_eq!(money(&result["total_tax"]), Decimal::from(9486));
    assert_eq!(money(&result["effective_rate"]), Decimal::from_str("15.81").unwrap());

    let stdout = run_ok(dir.path(), &["tax", "--income", "150280"]);
    assert!(stdout.contains("TOTAL TAX: £51,315.00"));
    assert!(stdout.contains("Additional"));
}

#[test]
fn settings_from_file_feed_the_calculator() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("settings.json");
    std::fs::write(
        &file,
        r#"{
            "personal_allowance": "0",
            "basic_threshold": "50000",
            "higher_threshold": "150000",
            "basic_rate": "0.10",
            "higher_rate": "0.40",
            "additional_rate": "0.45"
        }"#,
    )
    .unwrap();

    run_ok(dir.path(), &["settings", "set", file.to_str().unwrap()]);
    let result = run_json(dir.path(), &["tax", "--income", "10000", "--json"]);
    assert_eq!(money(&result["total_tax"]), Decimal::from(1000));

    run_ok(dir.path(), &["settings", "reset"]);
    let settings = run_json(dir.path(), &["settings", "show", "--json"]);
    assert_eq!(money(&settings["personal_allowance"]), Decimal::from(12570));
}

#[test]
fn invalid_settings_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("settings.json");
    std::fs::write(
        &file,
        r#"{
            "personal_allowance": "12570",
            "basic_threshold": "130000",
            "higher_threshold": "125140",
            "basic_rate": "0.20",
            "higher_rate": "0.40",
            "additional_rate": "0.45"
        }"#,
    )
    .unwrap();

    let output = tradetax(dir.path(), &["settings", "set", file.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("threshold"), "stderr: {stderr}");
}

#[test]
fn vat_comparison() {
    let dir = TempDir::new().unwrap();
    let result = run_json(
        dir.path(),
        &["vat", "--turnover", "100000", "--purchases-vat", "10000", "--json"],
    );
    assert_eq!(money(&result["standard"]["net_vat"]), Decimal::from(18000));
    assert_eq!(money(&result["flat_rate"]["net_vat"]), Decimal::from(10000));
    assert_eq!(money(&result["savings"]), Decimal::from(8000));
    assert_eq!(result["must_register"], Value::Bool(true));

    let stdout = run_ok(dir.path(), &["vat", "--turnover", "100000", "--purchases-vat", "10000"]);
    assert!(stdout.contains("Flat rate saves £8,000.00"));
}

#[test]
fn vat_zero_flat_rate_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let result = run_json(
        dir.path(),
        &["vat", "--turnover", "50000", "--flat-rate", "0", "--json"],
    );
    assert_eq!(money(&result["flat_rate"]["flat_rate_percent"]), Decimal::from(12));
    assert_eq!(money(&result["flat_rate"]["flat_vat"]), Decimal::from(6000));
    assert_eq!(result["must_register"], Value::Bool(false));
}

#[test]
fn mileage_deduction_for_business_trips() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["mileage", "add", "-p", "Site visit", "-m", "100", "--date", "2026-09-02"]);
    run_ok(dir.path(), &["mileage", "add", "-p", "Wholesaler", "-m", "10", "-v", "van"]);
    run_ok(dir.path(), &["mileage", "add", "-p", "Shopping", "-m", "7", "--personal"]);

    let summary = run_json(dir.path(), &["mileage", "summary", "--json"]);
    assert_eq!(money(&summary["total_miles"]), Decimal::from(117));
    assert_eq!(money(&summary["total_business_miles"]), Decimal::from(110));
    // 100 * 0.45 + 10 * 0.27
    assert_eq!(money(&summary["total_deduction"]), Decimal::from_str("47.70").unwrap());

    let months = summary["by_month"].as_array().unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0]["month"]["month"], Value::from(10));
}

#[test]
fn mileage_rejects_zero_miles() {
    let dir = TempDir::new().unwrap();
    let output = tradetax(dir.path(), &["mileage", "add", "-p", "Nowhere", "-m", "abc"]);
    assert!(!output.status.success());
    let trips = run_json(dir.path(), &["mileage", "list", "--json"]);
    assert_eq!(trips.as_array().unwrap().len(), 0);
}

#[test]
fn forecast_uses_recurring_items_then_averages() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "income", "-a", "3000", "-c", "client", "--date", "2026-08-10"]);
    run_ok(dir.path(), &["add", "income", "-a", "1000", "-c", "client", "--date", "2026-09-10"]);
    run_ok(dir.path(), &["add", "expense", "-a", "400", "-c", "office", "--date", "2026-09-12"]);
    run_ok(
        dir.path(),
        &["recurring", "add", "expense", "-d", "Van lease", "-a", "350", "-f", "monthly"],
    );

    let result = run_json(dir.path(), &["forecast", "--months", "3", "--json"]);
    let points = result["points"].as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0]["month"]["year"], Value::from(2026));
    assert_eq!(points[0]["month"]["month"], Value::from(10));
    assert_eq!(points[2]["month"]["month"], Value::from(12));
    // Averaged over the two months with income
    assert_eq!(money(&points[0]["income"]), Decimal::from(2000));
    assert_eq!(money(&points[0]["expense"]), Decimal::from(350));
    assert_eq!(money(&points[0]["net"]), Decimal::from(1650));

    assert_eq!(money(&result["end_of_year"]["projected_income"]), Decimal::from(24000));
    assert_eq!(result["end_of_year"]["months_remaining"], Value::from(3));
    assert_eq!(money(&result["year_to_date"]["net"]), Decimal::from(3600));
}

#[test]
fn forecast_horizon_is_bounded() {
    let dir = TempDir::new().unwrap();
    let output = tradetax(dir.path(), &["forecast", "--months", "3200000"]);
    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("panicked"));

    let stdout = run_ok(dir.path(), &["forecast", "--months", "600"]);
    assert!(stdout.contains("Sep 76"));
}

#[test]
fn report_breaks_down_the_current_quarter() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "income", "-a", "1000", "-c", "client", "--date", "2026-10-01"]);
    run_ok(dir.path(), &["add", "expense", "-a", "300", "-c", "materials", "--date", "2026-10-05"]);
    run_ok(dir.path(), &["add", "expense", "-a", "100", "-c", "other", "--date", "2026-10-06"]);
    run_ok(dir.path(), &["add", "income", "-a", "5000", "-c", "client", "--date", "2026-09-30"]);

    let report = run_json(dir.path(), &["report", "--period", "quarter", "--json"]);
    assert_eq!(report["start_date"], Value::from("2026-10-01"));
    assert_eq!(report["transaction_count"], Value::from(3));
    assert_eq!(money(&report["net"]), Decimal::from(600));
    let expenses = report["expense_breakdown"].as_array().unwrap();
    assert_eq!(expenses[0]["category"], Value::from("Materials"));
    assert_eq!(money(&expenses[0]["percentage"]), Decimal::from(75));

    let stdout = run_ok(dir.path(), &["report", "-p", "quarter"]);
    assert!(stdout.contains("This Quarter"));
    assert!(stdout.contains("Deductible"));
}

#[test]
fn update_and_delete_by_id() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "expense", "-a", "45", "-c", "meals", "-d", "Lunch"]);

    let list = run_json(dir.path(), &["list", "--json"]);
    let id = list[0]["id"].as_str().unwrap().to_string();
    assert_eq!(list[0]["type"], Value::from("expense"));

    run_ok(dir.path(), &["update", &id, "-a", "50", "-c", "travel"]);
    let list = run_json(dir.path(), &["list", "--json"]);
    assert_eq!(list[0]["id"], Value::from(id.as_str()));
    assert_eq!(money(&list[0]["amount"]), Decimal::from(50));
    assert_eq!(list[0]["category"], Value::from("travel"));

    // Income categories do not apply to an expense
    assert!(!tradetax(dir.path(), &["update", &id, "-c", "client"]).status.success());

    run_ok(dir.path(), &["delete", &id]);
    assert_eq!(run_json(dir.path(), &["list", "--json"]).as_array().unwrap().len(), 0);
    assert!(!tradetax(dir.path(), &["delete", &id]).status.success());
}

#[test]
fn add_rejects_bad_input() {
    let dir = TempDir::new().unwrap();

    let output = tradetax(dir.path(), &["add", "income", "-a", "0", "-c", "client"]);
    assert!(!output.status.success());

    let output = tradetax(dir.path(), &["add", "income", "-a", "10", "-c", "materials"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("client, sale, refund, other"), "stderr: {stderr}");

    let output = tradetax(dir.path(), &["add", "income", "-a", "12.345", "-c", "client"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fractions of a penny"), "stderr: {stderr}");

    assert_eq!(run_json(dir.path(), &["list", "--json"]).as_array().unwrap().len(), 0);
}

#[test]
fn oversized_amounts_are_refused_without_panicking() {
    let dir = TempDir::new().unwrap();
    let max = "79228162514264337593543950335";

    for args in [
        vec!["add", "income", "-a", max, "-c", "client"],
        vec!["recurring", "add", "income", "-d", "Retainer", "-a", max],
        vec!["mileage", "add", "-p", "Delivery", "-m", max],
        vec!["tax", "--income", max],
        vec!["vat", "--turnover", max],
    ] {
        let output = tradetax(dir.path(), &args);
        assert!(!output.status.success(), "{args:?} should fail");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("panicked"), "{args:?}: {stderr}");
    }

    run_ok(dir.path(), &["add", "income", "-a", "1000000000", "-c", "client"]);
    run_ok(dir.path(), &["add", "income", "-a", "1000000000", "-c", "sale"]);
    let summary = run_json(dir.path(), &["summary", "--json"]);
    assert_eq!(money(&summary["total_income"]), Decimal::from(2_000_000_000u64));
}

#[test]
fn export_quotes_embedded_commas() {
    let dir = TempDir::new().unwrap();
    run_ok(
        dir.path(),
        &["add", "expense", "-a", "12.50", "-c", "materials", "-d", "Screws, nails", "--date", "2026-10-02"],
    );
    run_ok(dir.path(), &["add", "income", "-a", "250", "-c", "client", "--date", "2026-10-03"]);

    let stdout = run_ok(dir.path(), &["export"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Date,Type,Category,Description,Amount");
    assert_eq!(lines[1], "2026-10-03,income,client,,250");
    assert_eq!(lines[2], "2026-10-02,expense,materials,\"Screws, nails\",12.50");

    let file = dir.path().join("out.csv");
    run_ok(dir.path(), &["export", "-o", file.to_str().unwrap()]);
    assert_eq!(std::fs::read_to_string(&file).unwrap(), stdout);
}

#[test]
fn clear_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "income", "-a", "100", "-c", "sale"]);
    run_ok(dir.path(), &["mileage", "add", "-p", "Delivery", "-m", "12"]);

    assert!(!tradetax(dir.path(), &["clear"]).status.success());
    run_ok(dir.path(), &["clear", "--yes"]);

    assert_eq!(run_json(dir.path(), &["list", "--json"]).as_array().unwrap().len(), 0);
    // Trips are not part of a clear
    assert_eq!(run_json(dir.path(), &["mileage", "list", "--json"]).as_array().unwrap().len(), 1);
}

#[test]
fn invoice_totals_with_vat() {
    let dir = TempDir::new().unwrap();
    let invoice = run_json(
        dir.path(),
        &[
            "invoice", "-c", "Acme Ltd", "-n", "INV-001", "-i", "Labour:2:150", "-i", "Parts:1:50",
            "--json",
        ],
    );
    assert_eq!(money(&invoice["subtotal"]), Decimal::from(350));
    assert_eq!(money(&invoice["vat"]), Decimal::from(70));
    assert_eq!(money(&invoice["total"]), Decimal::from(420));

    let output = tradetax(dir.path(), &["invoice", "-c", "Acme Ltd", "-i", "Labour:2:0"]);
    assert!(!output.status.success());

    let output = tradetax(dir.path(), &["invoice", "-c", "Acme Ltd", "-i", "Labour:-2:150"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("quantity above zero"), "stderr: {stderr}");
}

#[test]
fn schema_outputs() {
    let dir = TempDir::new().unwrap();
    let stdout = run_ok(dir.path(), &["schema", "csv-header"]);
    assert_eq!(stdout.trim(), "Date,Type,Category,Description,Amount");

    let stdout = run_ok(dir.path(), &["schema", "csv-fields"]);
    assert!(stdout.contains("Description  (optional)"));
    assert!(stdout.contains("Amount       (required)"));

    let schema = run_json(dir.path(), &["schema", "json-schema", "-d", "settings"]);
    assert!(schema["properties"]["basic_threshold"].is_object());
    assert_eq!(schema["properties"]["basic_threshold"]["type"], Value::from("string"));
}

#[test]
fn categories_show_deductibility() {
    let dir = TempDir::new().unwrap();
    let stdout = run_ok(dir.path(), &["categories", "expense"]);
    assert!(stdout.contains("materials"));
    assert!(stdout.contains("Professional"));
    assert!(!stdout.contains("client"));
}

#[test]
fn import_restores_an_export() {
    let source = TempDir::new().unwrap();
    run_ok(source.path(), &["add", "income", "-a", "900", "-c", "client", "--date", "2026-06-01"]);
    run_ok(source.path(), &["add", "expense", "-a", "35.20", "-c", "travel", "-d", "Train, return"]);
    let file = source.path().join("backup.csv");
    run_ok(source.path(), &["export", "-o", file.to_str().unwrap()]);

    let target = TempDir::new().unwrap();
    run_ok(target.path(), &["import", file.to_str().unwrap()]);
    assert_eq!(
        run_ok(target.path(), &["export"]),
        std::fs::read_to_string(&file).unwrap()
    );
}

#[test]
fn import_rejects_unknown_category_without_saving() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.csv");
    std::fs::write(
        &file,
        "Date,Type,Category,Description,Amount\n2026-01-02,income,client,,100\n2026-01-03,income,travel,,50\n",
    )
    .unwrap();

    assert!(!tradetax(dir.path(), &["import", file.to_str().unwrap()]).status.success());
    assert_eq!(run_json(dir.path(), &["list", "--json"]).as_array().unwrap().len(), 0);
}
