#![cfg(unix)]

mod common;

use common::FakeProject;
use common::helpers::{stderr, stdout};
use std::fs;
use std::os::unix::fs::PermissionsExt;

#[test]
fn install_tools_installs_missing_only() {
    let project = FakeProject::new();
    project.remove_tool("gopy");

    let output = project.run(&["install-tools"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        project.log_lines(),
        ["go install github.com/go-python/gopy@latest"]
    );
    assert!(stdout(&output).contains("Installed: gopy"));
    assert!(project.gobin().join("gopy").is_file());
}

#[test]
fn install_tools_twice_is_a_no_op() {
    let project = FakeProject::new();
    project.remove_tool("gopy");
    project.remove_tool("goimports");
    assert!(project.run(&["install-tools"]).status.success());
    assert_eq!(project.log_lines().len(), 2);

    let output = project.run(&["install-tools"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("All tools already installed"));
    assert_eq!(project.log_lines().len(), 2);
}

#[test]
fn install_tools_dry_run_installs_nothing() {
    let project = FakeProject::new();
    project.remove_tool("goimports");

    let output = project.run(&["install-tools", "--dry-run"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("install golang.org/x/tools/cmd/goimports@latest"));
    assert!(out.contains("Would install: goimports"));
    assert!(!out.contains("Installed:"));
    assert!(project.log_lines().is_empty());
    assert!(!project.gobin().join("goimports").exists());
}

#[test]
fn install_tools_without_go_fails() {
    let project = FakeProject::new();
    project.remove_tool("gopy");

    let output = project.run(&["install-tools", "--go-command", "goext-test-missing-go"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Go 1.16 or above"));
    assert!(project.log_lines().is_empty());
}

#[test]
fn check_tools_reports_every_tool() {
    let project = FakeProject::new();

    let output = project.run(&["check-tools"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    for tool in ["go", "gopy", "goimports"] {
        let line = format!("  {tool}: {}", project.bin().join(tool).display());
        assert!(out.contains(&line), "missing {line:?} in {out}");
    }
    assert!(out.contains("All tools found"));
}

#[test]
fn check_tools_finds_tools_in_gobin() {
    let project = FakeProject::new();
    project.remove_tool("gopy");
    let target = project.gobin().join("gopy");
    fs::write(&target, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&target, fs::Permissions::from_mode(0o755)).unwrap();

    let output = project.run(&["check-tools"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(&format!("  gopy: {}", target.display())));
}

#[test]
fn check_tools_fails_when_missing() {
    let project = FakeProject::new();
    project.remove_tool("gopy");

    let output = project.run(&["check-tools"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("  gopy: not found"));
    assert!(stderr(&output).contains("Missing tools: gopy"));
    assert!(project.log_lines().is_empty());
}

#[test]
fn check_tools_without_python_still_runs() {
    let project = FakeProject::bare();
    project.write_tool("go", "#!/bin/sh\nexit 0\n");

    let output = project.run(&["check-tools"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("  gopy: not found"));
    assert!(out.contains("  goimports: not found"));
}
