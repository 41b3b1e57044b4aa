#![cfg(unix)]

mod common;

use common::FakeProject;
use common::helpers::{stderr, stdout};

#[test]
fn help_lists_commands() {
    let project = FakeProject::bare();

    let output = project.run(&["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    for command in ["build", "generate", "install-tools", "check-tools", "completion"] {
        assert!(out.contains(command), "missing {command} in {out}");
    }
}

#[test]
fn version_flag() {
    let project = FakeProject::bare();

    let output = project.run(&["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generate_requires_packages() {
    let project = FakeProject::new();

    let output = project.run(&["generate", "--name", "mypkg.go", "--output", "gen"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("<PACKAGES>"));
    assert!(project.log_lines().is_empty());
}

#[test]
fn completion_script_names_binary() {
    let project = FakeProject::bare();

    let output = project.run(&["completion", "bash"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("goext"));
}

#[test]
fn broken_config_is_reported() {
    let project = FakeProject::new();
    project.write_config("[[go_extension]\n");

    let output = project.run(&["build"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Failed to load goext configuration"), "stderr: {err}");
    assert!(err.contains("goext.toml"));
}
