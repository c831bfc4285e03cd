use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn expense_cmd() -> Command {
    Command::cargo_bin("expense").unwrap()
}

#[test]
fn first_run_reports_no_prior_data_and_saves_on_exit() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("expenses.csv");

    expense_cmd()
        .arg(&data_file)
        .write_stdin("1\n42.50\n2025-06-15\nfood\ndinner, with friends\n8\n")
        .assert()
        .success()
        .stdout(contains("No previous data found."))
        .stdout(contains("Added expense:"))
        .stdout(contains("Exiting application."));

    let saved = std::fs::read_to_string(&data_file).unwrap();
    let lines: Vec<&str> = saved.lines().collect();
    assert_eq!(lines[0], "amount,date,category,description");
    assert_eq!(lines[1], "42.50,2025-06-15,food,\"dinner, with friends\"");
}

#[test]
fn second_run_loads_saved_expenses() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("expenses.csv");
    std::fs::write(
        &data_file,
        "amount,date,category,description\n10,2025-01-01,food,a\n3.5,2025-01-02,transport,b\n",
    )
    .unwrap();

    expense_cmd()
        .arg(&data_file)
        .write_stdin("5\ntransport\n8\n")
        .assert()
        .success()
        .stdout(contains("Loaded 2 expense(s)"))
        .stdout(contains("1 expense(s), total $3.50"));
}

#[test]
fn corrupt_file_is_reported_and_left_alone() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("expenses.csv");
    let corrupt = "amount,date,category,description\nten,2025-01-01,food,a\n";
    std::fs::write(&data_file, corrupt).unwrap();

    expense_cmd()
        .arg(&data_file)
        .write_stdin("2\n8\n")
        .assert()
        .success()
        .stdout(contains("Parse error on line 2"))
        .stdout(contains("No expenses recorded."))
        .stdout(contains("skipping automatic save"));

    assert_eq!(std::fs::read_to_string(&data_file).unwrap(), corrupt);
}

#[test]
fn mutations_are_written_to_audit_log() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("expenses.csv");

    expense_cmd()
        .arg(&data_file)
        .write_stdin("1\n5\n2025-06-15\nfood\nlunch\n3\n0\n8\n")
        .assert()
        .success()
        .stdout(contains("Deleted expense:"));

    let log = std::fs::read_to_string(temp_dir.path().join("expenses.audit.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"operation\":\"create\""));
    assert!(lines[1].contains("\"operation\":\"delete\""));
}

#[test]
fn audit_can_be_disabled_in_settings() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("expenses.csv");
    std::fs::write(
        temp_dir.path().join("expense-cli.json"),
        r#"{"currency_symbol": "€", "audit_enabled": false}"#,
    )
    .unwrap();

    expense_cmd()
        .arg(&data_file)
        .write_stdin("1\n5\n2025-06-15\nfood\nlunch\n2\n8\n")
        .assert()
        .success()
        .stdout(contains("total €5.00"));

    assert!(!temp_dir.path().join("expenses.audit.log").exists());
}

#[test]
fn help_mentions_file_argument() {
    expense_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("[FILE]"));
}

#[test]
fn history_prints_recent_audit_entries() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("expenses.csv");

    expense_cmd()
        .arg(&data_file)
        .write_stdin("1\n5\n2025-06-15\nfood\nlunch\n1\n2\n2025-06-16\nbus\nticket\n3\n0\n8\n")
        .assert()
        .success();

    let output = expense_cmd()
        .arg(&data_file)
        .args(["--history", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output = String::from_utf8(output).unwrap();

    assert!(!output.contains("CREATE expense #0"));
    assert!(output.contains("CREATE expense #1 (bus)"));
    assert!(output.contains("DELETE expense #0 (food)"));
    assert!(!output.contains("Expense Tracker Menu"));
}

#[test]
fn history_without_log_says_so() {
    let temp_dir = TempDir::new().unwrap();

    expense_cmd()
        .arg(temp_dir.path().join("expenses.csv"))
        .args(["--history", "5"])
        .assert()
        .success()
        .stdout(contains("No changes recorded in the audit log."));
}

#[test]
fn init_settings_writes_defaults() {
    let temp_dir = TempDir::new().unwrap();

    expense_cmd()
        .arg(temp_dir.path().join("expenses.csv"))
        .arg("--init-settings")
        .assert()
        .success()
        .stdout(contains("Settings written to"));

    let written = std::fs::read_to_string(temp_dir.path().join("expense-cli.json")).unwrap();
    assert!(written.contains("\"currency_symbol\": \"$\""));
    assert!(written.contains("\"audit_enabled\": true"));
}

#[test]
fn init_settings_keeps_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let settings_file = temp_dir.path().join("expense-cli.json");
    std::fs::write(&settings_file, "not json").unwrap();

    expense_cmd()
        .arg(temp_dir.path().join("expenses.csv"))
        .arg("--init-settings")
        .assert()
        .failure();

    assert_eq!(std::fs::read_to_string(&settings_file).unwrap(), "not json");
}
