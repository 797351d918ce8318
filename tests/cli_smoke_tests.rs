mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use spendwise::store::load_snapshot_from_path;
use tempfile::TempDir;

const BIN_NAME: &str = "spendwise_cli";

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("SPENDWISE_CLI_SCRIPT", "1")
        .env("SPENDWISE_HOME", home.path())
        .env("SPENDWISE_TODAY", "2024-03-10")
        .env_remove("SPENDWISE_SNAPSHOT")
        .env_remove("RUST_LOG");
    cmd
}

fn home() -> TempDir {
    TempDir::new().expect("temp home")
}

#[test]
fn help_lists_commands() {
    let home = home();
    script_command(&home)
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("Available commands").and(contains("dashboard")));
}

#[test]
fn version_prints_build_info() {
    let home = home();
    script_command(&home)
        .write_stdin("version\n")
        .assert()
        .success()
        .stdout(contains("Spendwise version"));
}

#[test]
fn dashboard_for_pinned_date() {
    let home = home();
    script_command(&home)
        .env("SPENDWISE_SNAPSHOT", common::fixture_path())
        .write_stdin("dashboard\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Dashboard for March 2024")
                .and(contains("$3,050.81"))
                .and(contains("Rent"))
                .and(contains("Due in 2 days")),
        );
}

#[test]
fn load_then_bills_and_reminders() {
    let home = home();
    let script = format!(
        "load \"{}\"\nbills --sorted\nreminders\nexit\n",
        common::fixture_path().display()
    );
    script_command(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Loaded 12 records")
                .and(contains("Overdue"))
                .and(contains("Rent is due tomorrow - $1,450.00")),
        );
}

#[test]
fn unknown_command_gets_suggestion() {
    let home = home();
    script_command(&home)
        .write_stdin("repot\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `repot`").and(contains("`report`")));
}

#[test]
fn bad_arguments_keep_the_shell_alive() {
    let home = home();
    script_command(&home)
        .write_stdin("trend zero\ntoday\n")
        .assert()
        .success()
        .stdout(contains("not a number of months").and(contains("Today is Mar 10, 2024.")));
}

#[test]
fn config_changes_persist_between_runs() {
    let home = home();
    script_command(&home)
        .write_stdin("config currency eur\n")
        .assert()
        .success()
        .stdout(contains("currency set to EUR"));
    script_command(&home)
        .write_stdin("config currency\n")
        .assert()
        .success()
        .stdout(contains("currency = EUR"));
}

#[test]
fn invalid_pinned_date_fails_startup() {
    let home = home();
    script_command(&home)
        .env("SPENDWISE_TODAY", "tomorrow")
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(contains("SPENDWISE_TODAY"));
}

fn copy_fixture(home: &TempDir) -> std::path::PathBuf {
    let path = home.path().join("records.json");
    std::fs::copy(common::fixture_path(), &path).expect("copy fixture");
    path
}

#[test]
fn writes_go_through_the_store_to_the_open_file() {
    let home = home();
    let records = copy_fixture(&home);
    script_command(&home)
        .env("SPENDWISE_SNAPSHOT", &records)
        .write_stdin(
            "pay bill-2 2024-03-11\n\
             add expense 12.50 \"Coffee beans\" Shopping 2024-03-09\n\
             delete expense exp-3\n\
             edit expense exp-1 amount 90\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(
            contains("Marked Rent (due 2024-03-12) as paid on Mar 11, 2024.")
                .and(contains("Added expense Coffee beans (Shopping)"))
                .and(contains("Deleted expense Streaming (Entertainment)."))
                .and(contains("Updated expense Weekly groceries (Food & Dining).")),
        );

    let saved = load_snapshot_from_path(&records).expect("reload saved records");
    let rent = saved.bills.iter().find(|bill| bill.id == "bill-2").unwrap();
    assert!(rent.paid);
    assert_eq!(rent.paid_date, Some(common::date(2024, 3, 11)));
    assert_eq!(saved.expenses.len(), 5);
    assert!(saved.expenses.iter().all(|expense| expense.id != "exp-3"));
    let groceries = saved.expenses.iter().find(|e| e.id == "exp-1").unwrap();
    assert_eq!(groceries.amount, 90.0);
    let beans = saved
        .expenses
        .iter()
        .find(|e| e.description == "Coffee beans")
        .unwrap();
    assert_eq!(beans.amount, 12.5);
    assert!(beans.user_id.is_some());
    assert!(beans.created_at.is_some());
}

#[test]
fn unknown_record_ids_are_reported() {
    let home = home();
    let records = copy_fixture(&home);
    script_command(&home)
        .env("SPENDWISE_SNAPSHOT", &records)
        .write_stdin("pay bill-99\ndelete income nope\ntoday\n")
        .assert()
        .success()
        .stdout(
            contains("Record not found: bill bill-99")
                .and(contains("Record not found: income nope"))
                .and(contains("Today is Mar 10, 2024.")),
        );
}

#[test]
fn unsaved_changes_can_be_saved_to_a_new_file() {
    let home = home();
    let target = home.path().join("out/new.json");
    let script = format!(
        "add income 50 Gift\nadd bill Water 20 2024-03-15 --recurring\nsave \"{}\"\n",
        target.display()
    );
    script_command(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("No snapshot file is open").and(contains("Saved 2 records")));

    let saved = load_snapshot_from_path(&target).expect("saved file");
    assert_eq!(saved.income[0].source, "Gift");
    assert_eq!(saved.income[0].date, common::date(2024, 3, 10));
    assert!(saved.bills[0].recurring);
}

#[test]
fn out_of_range_settings_are_rejected_and_not_persisted() {
    let home = home();
    script_command(&home)
        .env("SPENDWISE_SNAPSHOT", common::fixture_path())
        .write_stdin(
            "config bill_horizon_days 4294967295\n\
             config due_soon_days 999\n\
             trend 3000000000\n\
             dashboard\n",
        )
        .assert()
        .success()
        .stdout(
            contains("Invalid value `4294967295` for `bill_horizon_days`")
                .and(contains("Invalid value `999` for `due_soon_days`"))
                .and(contains("at most 24 months"))
                .and(contains("Dashboard for March 2024")),
        );
    script_command(&home)
        .write_stdin("config bill_horizon_days\n")
        .assert()
        .success()
        .stdout(contains("bill_horizon_days = 7"));
}

#[test]
fn bill_due_today_is_listed_once_as_overdue() {
    let home = home();
    let output = script_command(&home)
        .env("SPENDWISE_SNAPSHOT", common::fixture_path())
        .env("SPENDWISE_TODAY", "2024-03-12")
        .write_stdin("bills\n")
        .output()
        .expect("run shell");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Rent").count(), 1);
    let overdue_at = stdout.find("Overdue").expect("overdue section");
    assert!(stdout.find("Rent").unwrap() > overdue_at);
}
