use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("petty_cash_cli").unwrap();
    cmd.env("PETTY_CASH_CLI_SCRIPT", "1")
        .env("PETTY_CASH_HOME", home.path())
        .env_remove("PETTY_CASH_JSON");
    cmd
}

#[test]
fn script_mode_prints_totals_and_summaries() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("500.00\nMain Cash\n20.00\nStationery\n")
        .assert()
        .success()
        .stdout(contains("Total Income: 500.00"))
        .stdout(contains("Total Expenses: 20.00"))
        .stdout(contains("Net Balance: 480.00"))
        .stdout(contains("[INCOME]"))
        .stdout(contains("Stationery"));
}

#[test]
fn script_mode_prints_report_layout() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("500.00\nMain Cash\n20.00\nStationery\n")
        .assert()
        .success()
        .stdout(contains("Net Balance: 480.00\n\n[INCOME]"))
        .stdout(contains("Main Cash").and(contains("===").not()));
}

#[test]
fn rust_log_enables_debug_events() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .env("RUST_LOG", "petty_cash_ledger=debug")
        .write_stdin("5\nBank\n2\nFood\n")
        .assert()
        .success()
        .stderr(contains("ledger entry added"));
}

#[test]
fn time_date_format_in_config_is_reported_not_panicked() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.json"),
        r#"{ "date_format": "%Y-%m-%d %H:%M" }"#,
    )
    .unwrap();
    cli(&home)
        .write_stdin("5\nBank\n2\nFood\n")
        .assert()
        .failure()
        .stderr(contains("unsupported date format"))
        .stderr(contains("panicked").not());
}

#[test]
fn script_mode_reprompts_on_bad_amount() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("ten\n10\nBank\n4\nFood\n")
        .assert()
        .success()
        .stderr(contains("Invalid amount"))
        .stdout(contains("Net Balance: 6"));
}

#[test]
fn json_output_from_config_file() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.json"), r#"{ "json_output": true }"#).unwrap();
    cli(&home)
        .write_stdin("5\nBank\n2\nFood\n")
        .assert()
        .success()
        .stdout(contains("\"net_balance\": \"3\""));
}

#[test]
fn truncated_input_fails() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("5\n")
        .assert()
        .failure()
        .stderr(contains("input ended"));
}
