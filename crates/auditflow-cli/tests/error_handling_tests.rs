//! Tests for error handling, suggestions, and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

fn auditflow() -> Command {
    let mut cmd = Command::cargo_bin("auditflow").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn unknown_template_exits_not_found() {
    auditflow()
        .args(["scaffold", "--template", "no-such-layout", "--dry-run"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no-such-layout"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn invalid_service_name_exits_user_error() {
    auditflow()
        .args(["scaffold", "--service", "Payment_Service", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("kebab-case"));
}

#[test]
fn missing_config_file_exits_config_error() {
    auditflow()
        .args(["--config", "/definitely/not/here.toml", "run", "--ticks", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration"));
}

#[test]
fn bad_table_override_is_rejected() {
    auditflow()
        .env("AUDITFLOW_STORES__ROW_TABLE", "has.a.dot")
        .args(["seed", "--count", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must not contain"));
}

#[test]
fn unknown_subcommand_is_a_parse_error() {
    auditflow()
        .arg("frobnicate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn quiet_conflicts_with_verbose() {
    auditflow()
        .args(["-q", "-v", "scaffold", "--dry-run"])
        .assert()
        .code(2);
}
