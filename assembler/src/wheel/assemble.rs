//! Wheel assembly from a staged source tree.
//!
//! Stages a `<pkg>-<version>.dist-info` directory under the source root,
//! writes `METADATA` and `WHEEL` into it, zips the whole root into
//! `<dest_dir>/<wheel name>` with a generated `RECORD`, and optionally
//! removes the staging directory afterwards.

use super::descriptor::{DescriptorGuard, TagResolver};
use super::error::Result;
use super::naming::{DEFAULT_ABI_TAG, WheelName, dist_info_dir_name};
use super::tag::WheelTag;
use super::writer::WheelWriter;
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Basename of the core metadata file inside the `.dist-info` directory.
pub const METADATA_FILE_NAME: &str = "METADATA";

/// Destination directory used when the caller does not name one.
pub const DEFAULT_DEST_DIR: &str = "dist";

/// Inputs for a single [`assemble_wheel`] invocation.
///
/// Optional settings default to: destination `dist`, not pure, no build
/// tag, ABI tag `none`, staging directory removed after archiving.
///
/// # Examples
///
/// ```
/// use dynawheel::wheel::assemble::WheelRequest;
///
/// let request = WheelRequest::new(
///     "Metadata-Version: 2.1\nName: demo\nVersion: 1.0.0\n",
///     "src",
///     "demo",
///     "1.0.0",
///     "linux_x86_64",
///     "py3.8",
/// )
/// .with_build_tag("5");
///
/// assert_eq!(request.wheel_name().filename(), "demo-1.0.0-5-py3.8-none-linux_x86_64.whl");
/// assert!(request.dist_info_dir().ends_with("demo-1.0.0.dist-info"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelRequest {
    metadata_content: String,
    src_root: PathBuf,
    package: String,
    version: String,
    platform_tag: String,
    interpreter_tag: String,
    dest_dir: PathBuf,
    pure: bool,
    build_tag: Option<String>,
    abi_tag: String,
    cleanup_staging: bool,
}

impl WheelRequest {
    /// Create a request from the required inputs, with defaults for the rest.
    #[must_use]
    pub fn new(
        metadata_content: impl Into<String>,
        src_root: impl Into<PathBuf>,
        package: impl Into<String>,
        version: impl Into<String>,
        platform_tag: impl Into<String>,
        interpreter_tag: impl Into<String>,
    ) -> Self {
        Self {
            metadata_content: metadata_content.into(),
            src_root: src_root.into(),
            package: package.into(),
            version: version.into(),
            platform_tag: platform_tag.into(),
            interpreter_tag: interpreter_tag.into(),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            pure: false,
            build_tag: None,
            abi_tag: DEFAULT_ABI_TAG.to_owned(),
            cleanup_staging: true,
        }
    }

    /// Write the archive into `dest_dir`.
    #[must_use]
    pub fn with_dest_dir(mut self, dest_dir: impl Into<PathBuf>) -> Self {
        self.dest_dir = dest_dir.into();
        self
    }

    /// Mark the archive root as pure-Python.
    #[must_use]
    pub fn with_pure(mut self, pure: bool) -> Self {
        self.pure = pure;
        self
    }

    /// Add a build tag to the archive name.
    #[must_use]
    pub fn with_build_tag(mut self, build_tag: impl Into<String>) -> Self {
        self.build_tag = Some(build_tag.into());
        self
    }

    /// Override the ABI tag.
    #[must_use]
    pub fn with_abi_tag(mut self, abi_tag: impl Into<String>) -> Self {
        self.abi_tag = abi_tag.into();
        self
    }

    /// Choose whether the staging directory is removed after archiving.
    #[must_use]
    pub fn with_cleanup_staging(mut self, cleanup_staging: bool) -> Self {
        self.cleanup_staging = cleanup_staging;
        self
    }

    /// Return the caller-supplied metadata text.
    #[must_use]
    pub fn metadata_content(&self) -> &str {
        &self.metadata_content
    }

    /// Return the source root that is archived.
    #[must_use]
    pub fn src_root(&self) -> &Path {
        &self.src_root
    }

    /// Return the package name.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Return the version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Return the platform tag.
    #[must_use]
    pub fn platform_tag(&self) -> &str {
        &self.platform_tag
    }

    /// Return the interpreter tag.
    #[must_use]
    pub fn interpreter_tag(&self) -> &str {
        &self.interpreter_tag
    }

    /// Return the destination directory.
    #[must_use]
    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Return whether the archive root is pure-Python.
    #[must_use]
    pub fn is_pure(&self) -> bool {
        self.pure
    }

    /// Return the build tag, if any.
    #[must_use]
    pub fn build_tag(&self) -> Option<&str> {
        self.build_tag.as_deref()
    }

    /// Return the ABI tag.
    #[must_use]
    pub fn abi_tag(&self) -> &str {
        &self.abi_tag
    }

    /// Return whether the staging directory is removed after archiving.
    #[must_use]
    pub fn cleanup_staging(&self) -> bool {
        self.cleanup_staging
    }

    /// Return the staging directory path, `<src_root>/<pkg>-<version>.dist-info`.
    #[must_use]
    pub fn dist_info_dir(&self) -> PathBuf {
        self.src_root
            .join(dist_info_dir_name(&self.package, &self.version))
    }

    /// Return the archive name for this request.
    #[must_use]
    pub fn wheel_name(&self) -> WheelName {
        let tag = WheelTag::new(&self.interpreter_tag, &self.abi_tag, &self.platform_tag);
        let name = WheelName::new(&self.package, &self.version, tag);
        match &self.build_tag {
            Some(build_tag) => name.with_build_tag(build_tag),
            None => name,
        }
    }

    /// Return the archive path, `<dest_dir>/<wheel name>`.
    #[must_use]
    pub fn wheel_path(&self) -> PathBuf {
        self.dest_dir.join(self.wheel_name().filename())
    }
}

/// Configure the `WHEEL` tag resolver for `request`.
///
/// The interpreter and platform tags and the build tag are always supplied.
/// Only non-pure requests receive the full `(interpreter, abi, platform)`
/// override.
#[must_use]
pub fn tag_resolver_for(request: &WheelRequest) -> TagResolver {
    let mut resolver = TagResolver::new(request.pure);
    resolver.python_tag = Some(request.interpreter_tag.clone());
    resolver.plat_name = Some(request.platform_tag.clone());
    resolver.build = request.build_tag.clone();
    if !request.pure {
        resolver.full_tag = Some(WheelTag::new(
            &request.interpreter_tag,
            &request.abi_tag,
            &request.platform_tag,
        ));
    }
    resolver
}

/// Assemble a wheel for `request` and return the archive path.
///
/// Writes a `wrote <path>` confirmation line to `out` once the archive is
/// closed. Nothing is rolled back on failure: the staging directory is left
/// in whatever state it reached.
///
/// # Errors
///
/// Returns [`super::error::AssemblyError`] for any filesystem, archive, or
/// manifest encoding failure, including a failure to write to `out`.
pub fn assemble_wheel(request: &WheelRequest, out: &mut dyn Write) -> Result<PathBuf> {
    let dist_info_dir = request.dist_info_dir();
    debug!("staging metadata in {}", dist_info_dir.display());

    fs::create_dir_all(&request.dest_dir)?;
    fs::create_dir_all(&dist_info_dir)?;

    write_metadata(&dist_info_dir, &request.metadata_content)?;

    let guard = DescriptorGuard::with_resolver(tag_resolver_for(request), &dist_info_dir);
    guard.finish()?;

    let wheel_name = request.wheel_name();
    let wheel_path = request.dest_dir.join(wheel_name.filename());

    let mut writer = WheelWriter::create(&wheel_path, &wheel_name.dist_info_dir())?;
    writer.write_files(&request.src_root)?;
    writer.finish()?;

    writeln!(out, "wrote {}", wheel_path.display())?;

    if request.cleanup_staging {
        debug!("removing {}", dist_info_dir.display());
        fs::remove_dir_all(&dist_info_dir)?;
    }

    Ok(wheel_path)
}

/// Write `content` plus one trailing newline to `METADATA`.
fn write_metadata(dist_info_dir: &Path, content: &str) -> Result<PathBuf> {
    let path = dist_info_dir.join(METADATA_FILE_NAME);
    let mut file = fs::File::create(&path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(path)
}

#[cfg(test)]
#[path = "assemble_tests.rs"]
mod tests;
