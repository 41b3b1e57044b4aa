//! Where build outputs and package sources live.
//!
//! Mirrors the Python packaging conventions: compiled modules land under a
//! build directory as `<build_lib>/<parent packages>/<leaf><EXT_SUFFIX>`,
//! and packages are mapped to source directories through a `package_dir`
//! table where the empty key names the root package directory.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Build directory used when none is configured
pub const DEFAULT_BUILD_LIB: &str = "build/lib";

/// Path questions the build coordinator asks its host
pub trait HostPaths: fmt::Debug {
    /// Final artifact path for the dotted module `ext_name`.
    fn ext_fullpath(&self, ext_name: &str) -> PathBuf;

    /// Source directory of the dotted `package`.
    fn package_dir(&self, package: &str) -> PathBuf;
}

/// Output and source layout of one project
#[derive(Debug, Clone)]
pub struct BuildLayout {
    source_root: PathBuf,
    build_lib: PathBuf,
    ext_suffix: String,
    package_dirs: BTreeMap<String, PathBuf>,
}

impl BuildLayout {
    /// Create a layout rooted at the current directory.
    ///
    /// # Arguments
    /// * `build_lib` - Directory compiled modules are written under
    /// * `ext_suffix` - Interpreter-specific module suffix, e.g. `.cpython-312-x86_64-linux-gnu.so`
    pub fn new(build_lib: impl Into<PathBuf>, ext_suffix: impl Into<String>) -> Self {
        Self {
            source_root: PathBuf::from("."),
            build_lib: build_lib.into(),
            ext_suffix: ext_suffix.into(),
            package_dirs: BTreeMap::new(),
        }
    }

    /// Resolve package directories against `root` instead of `.`
    #[must_use]
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }

    /// Map `package` (empty string for the root) to `dir`
    #[must_use]
    pub fn with_package_dir(mut self, package: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.package_dirs.insert(package.into(), dir.into());
        self
    }

    #[must_use]
    pub fn with_package_dirs(mut self, dirs: BTreeMap<String, PathBuf>) -> Self {
        self.package_dirs.extend(dirs);
        self
    }

    pub fn build_lib(&self) -> &Path {
        &self.build_lib
    }

    pub fn ext_suffix(&self) -> &str {
        &self.ext_suffix
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }
}

fn segments(dotted: &str) -> Vec<&str> {
    dotted.split('.').filter(|s| !s.is_empty()).collect()
}

impl HostPaths for BuildLayout {
    fn ext_fullpath(&self, ext_name: &str) -> PathBuf {
        let mut parents = segments(ext_name);
        let leaf = parents.pop().unwrap_or_default();

        let mut path = self.build_lib.clone();
        path.extend(parents);
        path.push(format!("{leaf}{}", self.ext_suffix));
        path
    }

    fn package_dir(&self, package: &str) -> PathBuf {
        // Longest mapped prefix wins; unmatched trailing segments become subdirectories
        let mut head = segments(package);
        let mut tail: Vec<&str> = Vec::new();

        let base = loop {
            if head.is_empty() {
                break self.package_dirs.get("");
            }
            if let Some(dir) = self.package_dirs.get(head.join(".").as_str()) {
                break Some(dir);
            }
            if let Some(last) = head.pop() {
                tail.push(last);
            }
        };

        let mut dir = self.source_root.clone();
        if let Some(base) = base
            && !base.as_os_str().is_empty()
        {
            dir.push(base);
        }
        dir.extend(tail.iter().rev());
        dir
    }
}
