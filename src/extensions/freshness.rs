//! Up-to-date checks
//!
//! An extension is rebuilt when its artifact is missing or any input is
//! newer than it. Inputs are the declared sources and depends plus, when
//! the project has a `go.mod`, the Go files of every bound package that
//! lives inside the module.

use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

const GO_MOD: &str = "go.mod";
const GO_SUM: &str = "go.sum";
const RECURSIVE_SUFFIX: &str = "/...";

fn modified(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

fn stamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

/// Whether `target` is out of date with respect to `sources`.
///
/// * missing target: out of date
/// * missing source: out of date
/// * any source strictly newer than the target: out of date
///
/// Equal timestamps count as up to date, and so does an empty source list
/// when the target exists.
pub fn newer_group(sources: &[PathBuf], target: &Path) -> bool {
    let Ok(target_time) = modified(target) else {
        crate::debug!("{} missing, rebuilding", target.display());
        return true;
    };

    for source in sources {
        match modified(source) {
            Ok(source_time) if source_time > target_time => {
                crate::debug!(
                    "{} ({}) newer than {} ({})",
                    source.display(),
                    stamp(source_time),
                    target.display(),
                    stamp(target_time)
                );
                return true;
            }
            Ok(_) => {}
            Err(_) => {
                crate::debug!("{} missing, treating as newer", source.display());
                return true;
            }
        }
    }

    false
}

/// Whether a build of `target` can be skipped.
///
/// `force` always builds; otherwise skip unless [`newer_group`] says the
/// target is out of date.
pub fn should_skip(inputs: &[PathBuf], target: &Path, force: bool) -> bool {
    !(force || newer_group(inputs, target))
}

/// Module path declared in `go.mod` under `root`, if any
pub fn go_module_path(root: &Path) -> Option<String> {
    let contents = fs::read_to_string(root.join(GO_MOD)).ok()?;
    contents.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.split("//").next()?.trim().trim_matches('"');
        (!module.is_empty()).then(|| module.to_string())
    })
}

/// Go files behind `packages` that live in the module rooted at `root`.
///
/// Packages outside the module (third-party imports) contribute nothing.
/// A `/...` suffix includes every package below the directory. `go.mod`
/// and `go.sum` are included whenever any package matched.
pub fn go_package_files(packages: &[String], root: &Path) -> Vec<PathBuf> {
    let Some(module) = go_module_path(root) else {
        return Vec::new();
    };

    let mut files = Vec::new();
    for package in packages {
        let (import_path, recursive) = package
            .strip_suffix(RECURSIVE_SUFFIX)
            .map_or((package.as_str(), false), |base| (base, true));

        let relative = if import_path == module {
            Some("")
        } else {
            import_path
                .strip_prefix(module.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
        };
        let Some(relative) = relative else {
            continue;
        };

        let dir = root.join(relative);
        let max_depth = if recursive { usize::MAX } else { 1 };
        files.extend(
            WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(max_depth)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
                .filter(|entry| entry.file_type().is_file())
                .map(walkdir::DirEntry::into_path)
                .filter(|path| path.extension().is_some_and(|ext| ext == "go")),
        );
    }

    if !files.is_empty() {
        files.push(root.join(GO_MOD));
        let sum = root.join(GO_SUM);
        if sum.is_file() {
            files.push(sum);
        }
    }
    files.sort();
    files.dedup();
    files
}
