//! End-to-end tests: the real binary against the fixture backend.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use provdash_testing::{Endpoint, TestWorld};
use provdash_types::ReviewStatus;

fn provdash(world: &TestWorld) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("provdash");
    world.configure_command(&mut cmd);
    cmd
}

#[test]
fn test_stats_shows_distributions_and_queue() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 item(s) awaiting manual review"))
        .stdout(predicate::str::contains("Drift distribution"))
        .stdout(predicate::str::contains("Average PCS: 72.4"))
        .stdout(predicate::str::contains("Pending reviews: 2"));
}

#[test]
fn test_stats_without_backend_fails() {
    let world = TestWorld::new();

    provdash(&world)
        .arg("stats")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Failed to load stats"));
}

#[test]
fn test_providers_search_filters_rows() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["providers", "--search", "cardio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hopper"))
        .stdout(predicate::str::contains("Turing").not());
}

#[test]
fn test_show_provider_detail() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["show", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dr. Grace Hopper"))
        .stdout(predicate::str::contains("License expires within 60 days."));
}

#[test]
fn test_show_unknown_provider_fails() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["show", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load provider #999"));
}

#[test]
fn test_reviews_lists_only_pending_items() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .arg("reviews")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 item(s) pending review"))
        .stdout(predicate::str::contains("555-0199"))
        .stdout(predicate::str::contains("MD-4471").not());
}

#[test]
fn test_review_approve_updates_backend() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["review", "1", "approve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Item #1:"))
        .stdout(predicate::str::contains("1 item(s) still pending review"));

    let backend = world.backend().expect("backend running");
    let item = backend
        .review_items()
        .into_iter()
        .find(|item| item.id == 1)
        .expect("item 1");
    assert_eq!(item.status, ReviewStatus::Approved);
}

#[test]
fn test_override_with_blank_value_sends_nothing() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["review", "2", "override"])
        .write_stdin("   \n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Override cancelled"));

    let backend = world.backend().expect("backend running");
    assert_eq!(backend.count(Endpoint::ReviewAction), 0);
}

#[test]
fn test_override_with_value() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["review", "2", "override", "--value", "2 Bletchley Park"])
        .assert()
        .success();

    let backend = world.backend().expect("backend running");
    let item = backend
        .review_items()
        .into_iter()
        .find(|item| item.id == 2)
        .expect("item 2");
    assert_eq!(item.current_value.as_deref(), Some("2 Bletchley Park"));
}

#[test]
fn test_review_of_settled_item_fails() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["review", "3", "reject"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Review item #3 is not pending"));
}

#[test]
fn test_explain_field() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["explain", "field", "42", "phone"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "phone was marked manual_review at confidence 0.55.",
        ));
}

#[test]
fn test_explain_unvalidated_field_fails() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["explain", "field", "42", "email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no validation result for 'email'"));

    let backend = world.backend().expect("backend running");
    assert_eq!(backend.count(Endpoint::Explain), 0);
}

#[test]
fn test_batch_with_yes_runs() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["batch", "--kind", "weekly", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch run complete!"));

    let backend = world.backend().expect("backend running");
    assert_eq!(backend.count(Endpoint::Batch), 1);
}

#[test]
fn test_batch_declined_sends_nothing() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .arg("batch")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch run cancelled"));

    let backend = world.backend().expect("backend running");
    assert_eq!(backend.count(Endpoint::Batch), 0);
}

#[test]
fn test_report_is_saved_to_report_dir() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    let names: Vec<String> = std::fs::read_dir(world.report_dir())
        .expect("report dir exists")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("validation_report_"));
    assert!(names[0].ends_with(".pdf"));
}

#[test]
fn test_doctor_reports_unreachable_backend_without_failing() {
    let world = TestWorld::new();

    provdash(&world)
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend unreachable"));
}

#[test]
fn test_doctor_with_backend() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend reachable"));
}

#[test]
fn test_config_show_prints_effective_config() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[backend]"))
        .stdout(predicate::str::contains(world.base_url()));
}

#[test]
fn test_base_url_flag_overrides_config() {
    let world = TestWorld::new().with_backend();

    provdash(&world)
        .args(["--base-url", "http://127.0.0.1:9", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:9"));
}
