//! Configuration file management
//!
//! Extensions and toolchain defaults are read from the project's
//! `goext.toml`, from the `[tool.goext]` table of `pyproject.toml`, or from
//! the user configuration directory.
//!
//! ```toml
//! python = "python3.12"
//! package_dir = { "" = "src" }
//!
//! [[go_extension]]
//! name = "mypkg.go"
//! packages = ["example.com/calc/ops"]
//! sources = ["ops/add.go"]
//! ```

use crate::extensions::{BuildError, ExtensionKind, GoExtension, NativeExtension};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Project configuration file name
pub const CONFIG_FILE: &str = "goext.toml";

/// Python project metadata file carrying a `[tool.goext]` table
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Application configuration loaded from TOML files
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Go executable (default `go`)
    #[serde(default)]
    pub go_command: Option<String>,

    /// Python interpreter the extensions are built for
    #[serde(default)]
    pub python: Option<String>,

    /// Build output directory (default `build/lib`)
    #[serde(default)]
    pub build_lib: Option<String>,

    /// Extension module suffix, overriding the interpreter's
    #[serde(default)]
    pub ext_suffix: Option<String>,

    /// Dotted package -> source directory; `""` is the root package
    #[serde(default)]
    pub package_dir: BTreeMap<String, String>,

    #[serde(default, rename = "go_extension")]
    pub go_extensions: Vec<GoExtensionConfig>,

    #[serde(default, rename = "native_extension")]
    pub native_extensions: Vec<NativeExtensionConfig>,
}

/// `[[go_extension]]` entry
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GoExtensionConfig {
    pub name: String,
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub depends: Vec<String>,
}

/// `[[native_extension]]` entry
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct NativeExtensionConfig {
    pub name: String,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub depends: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: Option<PyProjectTools>,
}

#[derive(Debug, Deserialize)]
struct PyProjectTools {
    #[serde(default)]
    goext: Option<Config>,
}

impl Config {
    /// Load configuration from the current directory.
    /// Priority: ./goext.toml -> ./pyproject.toml `[tool.goext]` -> ~/.config/goext/config.toml
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_with_options(None)
    }

    /// Load configuration with custom options.
    ///
    /// # Arguments
    /// * `custom_path` - Optional custom path to config file (overrides defaults)
    pub fn load_with_options(custom_path: Option<&Path>) -> Result<Self> {
        Self::load_in(Path::new("."), custom_path)
    }

    /// Load configuration for the project rooted at `root`.
    pub fn load_in(root: &Path, custom_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = custom_path {
            return Self::load_from(path);
        }

        let local = root.join(CONFIG_FILE);
        if local.is_file() {
            return Self::load_from(&local);
        }

        if let Some(config) = Self::load_pyproject(&root.join(PYPROJECT_FILE))? {
            return Ok(config);
        }

        if let Some(config_dir) = Self::user_config_dir() {
            let config_path = config_dir.join("config.toml");
            if config_path.is_file() {
                return Self::load_from(&config_path);
            }
        }

        crate::debug!("no configuration found, using defaults");
        Ok(Self::default())
    }

    fn load_from(path: &Path) -> Result<Self> {
        crate::debug!("loading config from {}", path.display());
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn load_pyproject(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let pyproject: PyProject = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        let config = pyproject.tool.and_then(|tool| tool.goext);
        if config.is_some() {
            crate::debug!("loading config from [tool.goext] in {}", path.display());
        }
        Ok(config)
    }

    fn user_config_dir() -> Option<PathBuf> {
        // Check XDG_CONFIG_HOME first
        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(PathBuf::from(xdg_config).join("goext"));
        }

        // Fall back to ~/.config/goext
        dirs::home_dir().map(|home| home.join(".config").join("goext"))
    }

    /// Declared extensions, Go ones first, each group in file order.
    ///
    /// # Errors
    /// `BuildError::InvalidDescriptor` for the first unusable declaration.
    pub fn extensions(&self) -> Result<Vec<ExtensionKind>, BuildError> {
        let go = self.go_extensions.iter().map(|ext| {
            GoExtension::new(ext.name.clone(), ext.packages.iter().cloned()).map(|go| {
                ExtensionKind::Go(go.with_sources(&ext.sources).with_depends(&ext.depends))
            })
        });
        let native = self.native_extensions.iter().map(|ext| {
            NativeExtension::new(ext.name.clone(), ext.command.iter().cloned()).map(|native| {
                ExtensionKind::Native(native.with_sources(&ext.sources).with_depends(&ext.depends))
            })
        });
        go.chain(native).collect()
    }

    /// `package_dir` as paths
    pub fn package_dirs(&self) -> BTreeMap<String, PathBuf> {
        self.package_dir
            .iter()
            .map(|(package, dir)| (package.clone(), PathBuf::from(dir)))
            .collect()
    }
}
