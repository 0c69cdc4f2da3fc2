//! TOML configuration for wheel builds.
//!
//! A build script can keep its wheel inputs in a file such as
//! `dynawheel.toml` instead of repeating them on the command line:
//!
//! ```toml
//! [wheel]
//! name = "anamespace.pkg2"
//! version = "1.0.0"
//! src_root = "src"
//! platform_tag = "linux_x86_64"
//! interpreter_tag = "py3.8"
//! dest_dir = "../dist"
//!
//! [metadata]
//! summary = "add-pkgs example"
//! classifiers = ["Operating System :: POSIX"]
//! ```
//!
//! Every field is optional at parse time so that command-line flags can
//! fill the gaps. Relative paths resolve against the file's directory.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;
use thiserror::Error;

/// Errors arising while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the schema.
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying deserialisation error.
        source: toml::de::Error,
    },
}

/// Top-level configuration document.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WheelConfig {
    /// Archive inputs.
    pub wheel: WheelSection,
    /// Core metadata used when no metadata file is given.
    pub metadata: MetadataSection,
}

/// The `[wheel]` table.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WheelSection {
    /// Distribution name.
    pub name: Option<String>,
    /// Distribution version.
    pub version: Option<String>,
    /// Directory whose contents are archived.
    pub src_root: Option<Utf8PathBuf>,
    /// Platform compatibility tag.
    pub platform_tag: Option<String>,
    /// Interpreter compatibility tag.
    pub interpreter_tag: Option<String>,
    /// ABI compatibility tag.
    pub abi_tag: Option<String>,
    /// Optional build tag.
    pub build_tag: Option<String>,
    /// Output directory for the archive.
    pub dest_dir: Option<Utf8PathBuf>,
    /// Whether the archive root is pure-Python.
    pub pure: Option<bool>,
    /// Leave the staged `.dist-info` directory on disk.
    pub keep_dist_info: Option<bool>,
}

/// The `[metadata]` table.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataSection {
    /// File whose contents are used verbatim as `METADATA`.
    pub metadata_file: Option<Utf8PathBuf>,
    /// One-line summary.
    pub summary: Option<String>,
    /// Project home page.
    pub home_page: Option<String>,
    /// Author name.
    pub author: Option<String>,
    /// Author e-mail address.
    pub author_email: Option<String>,
    /// License text or identifier.
    pub license: Option<String>,
    /// Supported platform.
    pub platform: Option<String>,
    /// Trove classifiers.
    pub classifiers: Vec<String>,
    /// Long description.
    pub description: Option<String>,
}

impl WheelConfig {
    /// Load and parse `path`, resolving relative paths against its parent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not a valid configuration.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Utf8Path::new(""));
        Ok(config.resolve_relative_to(base))
    }

    /// Parse a configuration document without touching the filesystem.
    ///
    /// ```
    /// use dynawheel::config::WheelConfig;
    ///
    /// let config = WheelConfig::from_toml_str("[wheel]\nname = \"demo\"\n")
    ///     .expect("valid configuration");
    /// assert_eq!(config.wheel.name.as_deref(), Some("demo"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the TOML deserialiser's error for malformed input or unknown
    /// keys.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Rebase relative `src_root`, `dest_dir`, and `metadata_file` onto `base`.
    #[must_use]
    pub fn resolve_relative_to(mut self, base: &Utf8Path) -> Self {
        let rebase = |path: Option<Utf8PathBuf>| {
            path.map(|p| if p.is_relative() { base.join(p) } else { p })
        };
        self.wheel.src_root = rebase(self.wheel.src_root.take());
        self.wheel.dest_dir = rebase(self.wheel.dest_dir.take());
        self.metadata.metadata_file = rebase(self.metadata.metadata_file.take());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    const SAMPLE: &str = concat!(
        "[wheel]\n",
        "name = \"anamespace.pkg2\"\n",
        "version = \"1.0.0\"\n",
        "src_root = \"src\"\n",
        "platform_tag = \"linux_x86_64\"\n",
        "interpreter_tag = \"py3.8\"\n",
        "dest_dir = \"../dist\"\n",
        "pure = false\n",
        "\n",
        "[metadata]\n",
        "summary = \"add-pkgs example\"\n",
        "classifiers = [\"Environment :: Console\"]\n",
    );

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("temp dir creation succeeds")
    }

    #[rstest]
    fn empty_document_uses_defaults() {
        let config = WheelConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, WheelConfig::default());
    }

    #[rstest]
    fn parses_wheel_and_metadata_tables() {
        let config = WheelConfig::from_toml_str(SAMPLE).expect("sample parses");

        assert_eq!(config.wheel.name.as_deref(), Some("anamespace.pkg2"));
        assert_eq!(config.wheel.interpreter_tag.as_deref(), Some("py3.8"));
        assert_eq!(config.wheel.pure, Some(false));
        assert_eq!(config.wheel.abi_tag, None);
        assert_eq!(config.metadata.summary.as_deref(), Some("add-pkgs example"));
        assert_eq!(config.metadata.classifiers, ["Environment :: Console"]);
    }

    #[rstest]
    fn rejects_unknown_keys() {
        let result = WheelConfig::from_toml_str("[wheel]\narch = \"x86_64\"\n");
        assert!(result.is_err());
    }

    #[rstest]
    fn load_resolves_paths_against_file_directory(temp_dir: TempDir) {
        let dir = Utf8PathBuf::from_path_buf(temp_dir.path().join("pkg2")).expect("utf8 path");
        fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("dynawheel.toml");
        fs::write(&path, SAMPLE).expect("write config");

        let config = WheelConfig::load(&path).expect("load succeeds");

        assert_eq!(config.wheel.src_root, Some(dir.join("src")));
        assert_eq!(config.wheel.dest_dir, Some(dir.join("../dist")));
    }

    #[rstest]
    fn absolute_paths_are_kept() {
        let config = WheelConfig::from_toml_str("[wheel]\nsrc_root = \"/opt/src\"\n")
            .expect("parses")
            .resolve_relative_to(Utf8Path::new("/elsewhere"));

        assert_eq!(config.wheel.src_root, Some(Utf8PathBuf::from("/opt/src")));
    }

    #[rstest]
    fn load_reports_missing_file(temp_dir: TempDir) {
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("absent.toml"))
            .expect("utf8 path");

        let err = WheelConfig::load(&path).expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[rstest]
    fn load_reports_parse_errors(temp_dir: TempDir) {
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("bad.toml"))
            .expect("utf8 path");
        fs::write(&path, "[wheel\n").expect("write");

        let err = WheelConfig::load(&path).expect_err("malformed file");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }
}
