//! CLI argument definitions for the `dynawheel` binary.
//!
//! Flags mirror the `[wheel]` and `[metadata]` tables of the configuration
//! file. A flag given on the command line wins over the file value for the
//! same field.

use crate::config::{MetadataSection, WheelConfig};
use crate::error::{CliError, Result};
use crate::metadata::CoreMetadata;
use crate::wheel::assemble::WheelRequest;
use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;
use std::fs;

/// Assemble a Python wheel from a prepared source tree.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dynawheel", about, disable_version_flag = true)]
#[command(long_about = concat!(
    "Assemble a Python wheel from a prepared source tree.\n\n",
    "Writes METADATA and WHEEL into <src-root>/<name>-<version>.dist-info, ",
    "zips the source root into <dest-dir> with a generated RECORD, and ",
    "removes the staging directory unless --keep-dist-info is given.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Build from a configuration file:\n",
    "    $ dynawheel --config dynawheel.toml\n\n",
    "  Build a platform wheel from flags alone:\n",
    "    $ dynawheel --name anamespace.pkg2 --version 1.0.0 --src-root src \\\n",
    "        --platform-tag linux_x86_64 --interpreter-tag py3.8 --dest-dir dist\n",
))]
pub struct Cli {
    /// TOML configuration file with `[wheel]` and `[metadata]` tables.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Distribution name.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Distribution version.
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Directory whose contents are archived.
    #[arg(long, value_name = "DIR")]
    pub src_root: Option<Utf8PathBuf>,

    /// Platform compatibility tag, for example `linux_x86_64`.
    #[arg(long, value_name = "TAG")]
    pub platform_tag: Option<String>,

    /// Interpreter compatibility tag, for example `py3` or `cp38`.
    #[arg(long, value_name = "TAG")]
    pub interpreter_tag: Option<String>,

    /// ABI compatibility tag [default: none].
    #[arg(long, value_name = "TAG")]
    pub abi_tag: Option<String>,

    /// Build tag inserted after the version in the archive name.
    #[arg(long, value_name = "TAG")]
    pub build_tag: Option<String>,

    /// Output directory for the archive [default: dist].
    #[arg(short, long, value_name = "DIR")]
    pub dest_dir: Option<Utf8PathBuf>,

    /// Mark the archive root as pure-Python (`--pure=false` to unset).
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub pure: Option<bool>,

    /// Leave the staged `.dist-info` directory on disk (`--keep-dist-info=false`
    /// to unset).
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub keep_dist_info: Option<bool>,

    /// Use this file verbatim as METADATA instead of rendering one.
    #[arg(long, value_name = "FILE")]
    pub metadata_file: Option<Utf8PathBuf>,

    /// Summary line for rendered METADATA.
    #[arg(long, value_name = "TEXT")]
    pub summary: Option<String>,

    /// Trove classifier for rendered METADATA (can be repeated).
    #[arg(long, value_name = "CLASSIFIER")]
    pub classifier: Vec<String>,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(short, long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Return the log level selected by `-v` flags.
    ///
    /// `RUST_LOG` still takes precedence when set.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Load the configuration file, if any, and build the assembly request.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] when the configuration file cannot be
    /// loaded, plus any error from [`Cli::merge`].
    pub fn into_request(self) -> Result<WheelRequest> {
        let config = match &self.config {
            Some(path) => WheelConfig::load(path)?,
            None => WheelConfig::default(),
        };
        self.merge(config)
    }

    /// Combine command-line values with `config`, preferring the former.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::MissingField`] when a required input is absent
    /// from both sources, or [`CliError::MetadataFile`] when a verbatim
    /// metadata file cannot be read.
    pub fn merge(self, config: WheelConfig) -> Result<WheelRequest> {
        let WheelConfig { wheel, metadata } = config;

        let name = require(self.name, wheel.name, "name")?;
        let version = require(self.version, wheel.version, "version")?;
        let src_root = require(self.src_root, wheel.src_root, "src_root")?;
        let platform_tag = require(self.platform_tag, wheel.platform_tag, "platform_tag")?;
        let interpreter_tag =
            require(self.interpreter_tag, wheel.interpreter_tag, "interpreter_tag")?;

        let overrides = MetadataOverrides {
            metadata_file: self.metadata_file,
            summary: self.summary,
            classifiers: self.classifier,
        };
        let metadata_content = metadata_content(&name, &version, overrides, metadata)?;

        let mut request = WheelRequest::new(
            metadata_content,
            src_root,
            name,
            version,
            platform_tag,
            interpreter_tag,
        )
        .with_pure(self.pure.or(wheel.pure).unwrap_or(false))
        .with_cleanup_staging(!self.keep_dist_info.or(wheel.keep_dist_info).unwrap_or(false));

        if let Some(dest_dir) = self.dest_dir.or(wheel.dest_dir) {
            request = request.with_dest_dir(dest_dir);
        }
        if let Some(abi_tag) = self.abi_tag.or(wheel.abi_tag) {
            request = request.with_abi_tag(abi_tag);
        }
        if let Some(build_tag) = self.build_tag.or(wheel.build_tag) {
            request = request.with_build_tag(build_tag);
        }
        Ok(request)
    }
}

/// Metadata flags that override the `[metadata]` table.
struct MetadataOverrides {
    metadata_file: Option<Utf8PathBuf>,
    summary: Option<String>,
    classifiers: Vec<String>,
}

fn require<T>(flag: Option<T>, configured: Option<T>, field: &'static str) -> Result<T> {
    flag.or(configured).ok_or(CliError::MissingField(field))
}

/// Read the verbatim metadata file, or render core metadata from the
/// merged fields.
fn metadata_content(
    name: &str,
    version: &str,
    overrides: MetadataOverrides,
    section: MetadataSection,
) -> Result<String> {
    if let Some(path) = overrides.metadata_file.or(section.metadata_file) {
        return fs::read_to_string(&path).map_err(|source| CliError::MetadataFile { path, source });
    }

    let classifiers = if overrides.classifiers.is_empty() {
        section.classifiers
    } else {
        overrides.classifiers
    };
    let metadata = CoreMetadata {
        name: name.to_owned(),
        version: version.to_owned(),
        summary: overrides.summary.or(section.summary),
        home_page: section.home_page,
        author: section.author,
        author_email: section.author_email,
        license: section.license,
        platform: section.platform,
        classifiers,
        description: section.description,
    };

    // The assembler appends the final newline itself.
    Ok(metadata.render().trim_end_matches('\n').to_owned())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
