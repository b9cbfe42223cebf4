mod common;

use chrono::NaiveDate;
use expense_core::{
    accounts::AccountDirectory,
    core::Session,
    errors::ExpenseError,
    ledger::LoadOutcome,
    reports::{report_window_for, summarize, ReportKind},
    utils::clock::FixedClock,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn monthly_report_covers_leap_february() {
    let (paths, directory) = common::setup_test_env();
    let (mut session, outcome) =
        Session::login(&directory, &paths, "admin", "password123").expect("login");
    assert_eq!(outcome, LoadOutcome::NoPriorData);

    let store = session.store_mut();
    store.add("Groceries", 10.0, "Food", date(2024, 2, 1)).unwrap();
    store.add("Dinner", 20.0, "Food", date(2024, 2, 29)).unwrap();
    store.add("Train", 5.0, "Transport", date(2024, 3, 1)).unwrap();

    let report = session.report(ReportKind::Monthly, &FixedClock(date(2024, 2, 10)));
    assert_eq!(report.window.start, date(2024, 2, 1));
    assert_eq!(report.window.end, date(2024, 2, 29));
    assert_eq!(report.summary.total, 30.0);
    assert_eq!(report.summary.by_category.len(), 1);
    assert_eq!(report.summary.by_category.get("Food"), Some(&30.0));

    let everything = summarize(session.store().iter());
    assert_eq!(everything.total, session.store().total());
    assert_eq!(everything.total, 35.0);
}

#[test]
fn weekly_and_yearly_windows_follow_the_calendar() {
    let today = date(2024, 2, 15);
    let weekly = report_window_for("weekly", today).unwrap();
    assert_eq!((weekly.start, weekly.end), (date(2024, 2, 12), date(2024, 2, 18)));

    let yearly = report_window_for("YEARLY", today).unwrap();
    assert_eq!((yearly.start, yearly.end), (date(2024, 1, 1), date(2024, 12, 31)));

    let err = report_window_for("daily", today).expect_err("unknown kind");
    assert!(matches!(err, ExpenseError::InvalidReportKind(_)));
}

#[test]
fn expenses_survive_close_and_login() {
    let (paths, directory) = common::setup_test_env();
    let (mut session, _) = Session::login(&directory, &paths, "admin", "password123").unwrap();
    session
        .store_mut()
        .add("Cinema", 12.5, "Entertainment", date(2024, 5, 4))
        .unwrap();
    session.close().expect("close saves pending changes");

    let (session, outcome) = Session::login(&directory, &paths, "admin", "password123").unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded { count: 1 });
    let expense = session.store().get(0).unwrap();
    assert_eq!(expense.description(), "Cinema");
    assert_eq!(expense.amount(), 12.5);
    assert_eq!(expense.category(), "Entertainment");
    assert_eq!(expense.date(), date(2024, 5, 4));
}

#[test]
fn registered_users_keep_separate_records() {
    let (paths, mut directory) = common::setup_test_env();
    directory.register("bob", "hunter2").unwrap();

    let reloaded = AccountDirectory::load(paths.users_file()).unwrap();
    let (mut bob, _) = Session::login(&reloaded, &paths, "bob", "hunter2").unwrap();
    bob.store_mut()
        .add("Rent", 800.0, "Housing", date(2024, 1, 1))
        .unwrap();
    bob.close().unwrap();

    let (admin, outcome) = Session::login(&reloaded, &paths, "admin", "password123").unwrap();
    assert_eq!(outcome, LoadOutcome::NoPriorData);
    assert!(admin.store().is_empty());

    let err = Session::login(&reloaded, &paths, "bob", "wrong").expect_err("bad password");
    assert!(matches!(err, ExpenseError::AuthenticationFailed));
}

#[test]
fn distribution_counts_records_per_category() {
    let (paths, directory) = common::setup_test_env();
    let (mut session, _) = Session::login(&directory, &paths, "admin", "password123").unwrap();
    let store = session.store_mut();
    store.add("Lunch", 9.0, "Food", date(2024, 3, 1)).unwrap();
    store.add("Bus", 2.0, "Transport", date(2024, 3, 1)).unwrap();
    store.add("Dinner", 15.0, "Food", date(2024, 3, 2)).unwrap();

    let counts = session.distribution();
    assert_eq!(counts.get("Food"), Some(&2));
    assert_eq!(counts.get("Transport"), Some(&1));
}

#[test]
fn export_writes_csv_rows() {
    let (paths, directory) = common::setup_test_env();
    let (mut session, _) = Session::login(&directory, &paths, "admin", "password123").unwrap();
    session
        .store_mut()
        .add("Gym", 30.0, "Healthcare", date(2024, 4, 1))
        .unwrap();

    let target = common::temp_home().join("expenses.csv");
    assert_eq!(session.export(&target).unwrap(), 1);
    let contents = std::fs::read_to_string(&target).unwrap();
    assert!(contents.starts_with("description,amount,category,date"));
    assert!(contents.contains("Gym,30.0,Healthcare,2024-04-01"));
}
