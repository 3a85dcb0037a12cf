// CLI surface checks: the binary's help output and its refusal to run
// without the required configuration.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_both_subcommands() {
    let mut cmd = Command::cargo_bin("org-migrator").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("export-users"));
}

#[test]
fn migrate_help_documents_the_execute_toggle() {
    let mut cmd = Command::cargo_bin("org-migrator").unwrap();
    cmd.args(["migrate", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--execute"))
        .stdout(predicate::str::contains("dry run"))
        .stdout(predicate::str::contains("--repos-file"));
}

#[test]
fn migrate_refuses_to_run_without_a_target_org() {
    let mut cmd = Command::cargo_bin("org-migrator").unwrap();
    cmd.arg("migrate")
        .env_remove("TARGET_ORG")
        .env_remove("SOURCE_ORGS");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("TARGET_ORG"));
}
