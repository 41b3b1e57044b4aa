//! Go extension descriptor
//!
//! A Go extension is declared under a logical dotted name (`mypkg.go`) and a
//! list of Go import paths. gopy is always invoked with the fixed
//! [`COMPILED_NAME`], so the importable module ends up one level below the
//! logical name as `mypkg.go._go`.

use super::error::BuildError;
use std::path::PathBuf;

/// Name handed to gopy's `-name=` flag
pub const COMPILED_NAME: &str = "go";

/// One Python extension module built from Go packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoExtension {
    name: String,
    packages: Vec<String>,
    sources: Vec<PathBuf>,
    depends: Vec<PathBuf>,
}

impl GoExtension {
    /// Declare a Go extension.
    ///
    /// # Arguments
    /// * `name` - Logical dotted module name, e.g. `mypkg.go`
    /// * `packages` - Go import paths to bind (at least one)
    ///
    /// # Errors
    /// `BuildError::InvalidDescriptor` when the name is blank, no packages are
    /// given, or a package path is blank.
    pub fn new<I, S>(name: impl Into<String>, packages: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let packages: Vec<String> = packages.into_iter().map(Into::into).collect();

        if name.trim().is_empty() || name.split('.').any(str::is_empty) {
            return Err(BuildError::InvalidDescriptor {
                name,
                reason: "module name must be a non-empty dotted path".to_string(),
            });
        }
        if packages.is_empty() {
            return Err(BuildError::InvalidDescriptor {
                name,
                reason: "at least one Go package is required".to_string(),
            });
        }
        if packages.iter().any(|package| package.trim().is_empty()) {
            return Err(BuildError::InvalidDescriptor {
                name,
                reason: "Go package paths must not be blank".to_string(),
            });
        }

        Ok(Self {
            name,
            packages,
            sources: Vec::new(),
            depends: Vec::new(),
        })
    }

    /// Attach source files that participate in freshness checks.
    #[must_use]
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Attach extra dependency files that participate in freshness checks.
    #[must_use]
    pub fn with_depends(mut self, depends: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.depends = depends.into_iter().map(Into::into).collect();
        self
    }

    /// Logical name as declared (`mypkg.go`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Go import paths, in declaration order
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn depends(&self) -> &[PathBuf] {
        &self.depends
    }

    /// Value for gopy's `-name=` flag
    pub const fn compiled_name(&self) -> &'static str {
        COMPILED_NAME
    }

    /// Importable module name of the compiled artifact (`mypkg.go._go`)
    pub fn module_name(&self) -> String {
        format!("{}._{COMPILED_NAME}", self.name)
    }

    /// Package that receives generated glue code on in-place builds
    ///
    /// This is the parent package of [`module_name`](Self::module_name),
    /// which is the logical name itself.
    pub fn package(&self) -> &str {
        &self.name
    }

    /// Declared sources followed by declared depends
    pub fn declared_inputs(&self) -> Vec<PathBuf> {
        self.sources.iter().chain(&self.depends).cloned().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;

    #[test]
    fn module_name_appends_compiled_leaf() {
        let ext = GoExtension::new("mypkg.go", ["github.com/x/y"]).unwrap();
        assert_eq!(ext.module_name(), "mypkg.go._go");
        assert_eq!(ext.compiled_name(), "go");
        assert_eq!(ext.package(), "mypkg.go");
    }

    #[test]
    fn keeps_package_order() {
        let ext = GoExtension::new("a", ["p/one", "p/two", "p/three"]).unwrap();
        assert_eq!(ext.packages(), ["p/one", "p/two", "p/three"]);
    }

    #[test]
    fn rejects_empty_packages() {
        let err = GoExtension::new("mypkg.go", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, BuildError::InvalidDescriptor { ref name, .. } if name == "mypkg.go"));
    }

    #[test]
    fn blank_packages_are_rejected() {
        assert!(GoExtension::new("mypkg.go", ["", "  "]).is_err());

        let err = GoExtension::new("mypkg.go", ["", "p"]).unwrap_err();
        assert!(matches!(
            err,
            BuildError::InvalidDescriptor { ref reason, .. } if reason.contains("blank")
        ));
    }

    #[test]
    fn rejects_malformed_names() {
        assert!(GoExtension::new("", ["p"]).is_err());
        assert!(GoExtension::new("mypkg..go", ["p"]).is_err());
        assert!(GoExtension::new(".go", ["p"]).is_err());
    }

    #[test]
    fn declared_inputs_lists_sources_then_depends() {
        let ext = GoExtension::new("m", ["p"])
            .unwrap()
            .with_sources(["a.go"])
            .with_depends(["go.sum"]);
        assert_eq!(
            ext.declared_inputs(),
            vec![PathBuf::from("a.go"), PathBuf::from("go.sum")]
        );
    }
}
