//! Shared test helpers and utilities

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Get the path to the goext binary built for this test run
pub(crate) fn get_goext_binary() -> String {
    env!("CARGO_BIN_EXE_goext").to_string()
}

/// Appends its arguments to the log; `go install` drops a logging stub into `$GOBIN`
const FAKE_GO: &str = r#"#!/bin/sh
echo "go $*" >> "$GOEXT_TEST_LOG"
if [ "$1" = "install" ]; then
  spec="${2%@*}"
  tool="${spec##*/}"
  printf '#!/bin/sh\necho "%s $*" >> "$GOEXT_TEST_LOG"\n' "$tool" > "$GOBIN/$tool"
  chmod +x "$GOBIN/$tool"
fi
"#;

/// Logs its arguments; `build` writes `_go.so` into the `-output=` directory
const FAKE_GOPY: &str = r#"#!/bin/sh
echo "gopy $*" >> "$GOEXT_TEST_LOG"
if [ -n "$GOEXT_TEST_GOPY_FAIL" ]; then
  echo "gopy: cannot find package" >&2
  exit 3
fi
out=""
for arg in "$@"; do
  case "$arg" in
    -output=*) out="${arg#-output=}" ;;
  esac
done
if [ "$1" = "build" ] && [ -n "$out" ]; then
  : > "$out/_go.so"
fi
"#;

const FAKE_GOIMPORTS: &str = "#!/bin/sh\nexit 0\n";

const FAKE_PYTHON: &str = "#!/bin/sh\necho .so\n";

/// A temporary Python project with fake `go`, `gopy`, `goimports` and `python3`
pub(crate) struct FakeProject {
    dir: TempDir,
}

#[allow(dead_code)]
impl FakeProject {
    /// Project with all tools present and one Go extension configured
    pub(crate) fn new() -> Self {
        let project = Self::bare();
        project.write_tool("go", FAKE_GO);
        project.write_tool("gopy", FAKE_GOPY);
        project.write_tool("goimports", FAKE_GOIMPORTS);
        project.write_tool("python3", FAKE_PYTHON);
        project.write_file("ops/add.go", "package ops\n");
        project.write_config(&format!(
            r#"python = "{}"
ext_suffix = ".so"
package_dir = {{ "" = "src" }}

[[go_extension]]
name = "mypkg.go"
packages = ["example.com/calc/ops"]
sources = ["ops/add.go"]
"#,
            project.bin().join("python3").display()
        ));
        project
    }

    /// Empty project with empty bin and `GOBIN` directories
    pub(crate) fn bare() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("bin")).expect("Failed to create bin dir");
        fs::create_dir_all(dir.path().join("gobin")).expect("Failed to create gobin dir");
        Self { dir }
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn bin(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    pub(crate) fn gobin(&self) -> PathBuf {
        self.dir.path().join("gobin")
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.dir.path().join("tools.log")
    }

    /// Lines the fake tools appended to the log, in order
    pub(crate) fn log_lines(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub(crate) fn write_tool(&self, name: &str, script: &str) {
        let path = self.bin().join(name);
        fs::write(&path, script).expect("Failed to write fake tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake tool executable");
    }

    pub(crate) fn remove_tool(&self, name: &str) {
        fs::remove_file(self.bin().join(name)).expect("Failed to remove fake tool");
    }

    pub(crate) fn write_file(&self, relative: &str, contents: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, contents).expect("Failed to write file");
    }

    pub(crate) fn write_config(&self, contents: &str) {
        self.write_file("goext.toml", contents);
    }

    /// `goext` command running inside the project with an isolated environment
    pub(crate) fn goext(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(get_goext_binary());
        cmd.args(args)
            .current_dir(self.dir.path())
            .env("PATH", format!("{}:/usr/bin:/bin", self.bin().display()))
            .env("GOBIN", self.gobin())
            .env("HOME", self.dir.path())
            .env("GOEXT_TEST_LOG", self.log_path())
            .env_remove("GOEXT_GO")
            .env_remove("GOEXT_PYTHON")
            .env_remove("PYTHON")
            .env_remove("GOPATH")
            .env_remove("XDG_CONFIG_HOME");
        cmd
    }

    pub(crate) fn run(&self, args: &[&str]) -> Output {
        self.goext(args).output().expect("Failed to run goext")
    }
}

/// stdout of a finished command as text
#[allow(dead_code)]
pub(crate) fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// stderr of a finished command as text
#[allow(dead_code)]
pub(crate) fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
