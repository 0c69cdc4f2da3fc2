//! `WHEEL` descriptor resolution and writing.
//!
//! The descriptor declares the wheel format version, whether the archive
//! root is pure-Python, an optional build number, and one `Tag:` header per
//! supported compatibility tag. [`TagResolver`] computes the tags;
//! [`DescriptorGuard`] scopes a resolver to a `.dist-info` directory and
//! writes the file exactly once when the scope ends.

use super::tag::WheelTag;
use log::{debug, warn};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

/// Basename of the descriptor inside the `.dist-info` directory.
pub const WHEEL_FILE_NAME: &str = "WHEEL";

/// Version of the wheel format this crate emits.
const WHEEL_FORMAT_VERSION: &str = "1.0";

/// Interpreter tag used when none is configured.
const DEFAULT_PYTHON_TAG: &str = "py3";

/// Platform tag for archives with no platform-specific content.
const ANY_PLATFORM: &str = "any";

/// ABI tag used by the default tag computation.
const NO_ABI: &str = "none";

/// Tag computation settings for a `WHEEL` descriptor.
///
/// When `full_tag` is set it is used verbatim. Otherwise the tag is derived
/// from `python_tag`, `plat_name`, and purity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagResolver {
    /// Whether the archive root installs into `purelib`.
    pub root_is_pure: bool,
    /// Interpreter tag for the default computation.
    pub python_tag: Option<String>,
    /// Explicit platform name; overrides platform detection.
    pub plat_name: Option<String>,
    /// Complete tag triple that bypasses the default computation.
    pub full_tag: Option<WheelTag>,
    /// Build number recorded in the `Build` header.
    pub build: Option<String>,
}

impl TagResolver {
    /// Create a resolver with only the purity flag set.
    #[must_use]
    pub fn new(root_is_pure: bool) -> Self {
        Self {
            root_is_pure,
            ..Self::default()
        }
    }

    /// Resolve the compatibility tag triple.
    ///
    /// ```
    /// use dynawheel::wheel::descriptor::TagResolver;
    ///
    /// let resolver = TagResolver::new(true);
    /// assert_eq!(resolver.tag().to_string(), "py3-none-any");
    /// ```
    #[must_use]
    pub fn tag(&self) -> WheelTag {
        if let Some(full_tag) = &self.full_tag {
            return full_tag.clone();
        }

        let platform = match &self.plat_name {
            Some(name) => normalise_platform(name),
            None if self.root_is_pure => ANY_PLATFORM.to_owned(),
            None => normalise_platform(&host_platform()),
        };
        let python_tag = self.python_tag.as_deref().unwrap_or(DEFAULT_PYTHON_TAG);
        WheelTag::new(python_tag, NO_ABI, platform)
    }

    /// Render the descriptor text.
    ///
    /// ```
    /// use dynawheel::wheel::descriptor::TagResolver;
    ///
    /// let mut resolver = TagResolver::new(true);
    /// resolver.plat_name = Some("any".to_owned());
    /// let text = resolver.render();
    /// assert!(text.starts_with("Wheel-Version: 1.0\n"));
    /// assert!(text.contains("Root-Is-Purelib: true\n"));
    /// assert!(text.contains("Tag: py3-none-any\n"));
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(text, "Wheel-Version: {WHEEL_FORMAT_VERSION}");
        let _ = writeln!(text, "Generator: {}", generator());
        let _ = writeln!(text, "Root-Is-Purelib: {}", self.root_is_pure);
        if let Some(build) = &self.build {
            let _ = writeln!(text, "Build: {build}");
        }
        for tag in self.tag().expand() {
            let _ = writeln!(text, "Tag: {tag}");
        }
        text.push('\n');
        text
    }

    /// Write the descriptor into `dist_info_dir` and return its path.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while writing the file.
    pub fn write_wheelfile(&self, dist_info_dir: &Path) -> io::Result<PathBuf> {
        let path = dist_info_dir.join(WHEEL_FILE_NAME);
        debug!("creating {}", path.display());
        fs::write(&path, self.render())?;
        Ok(path)
    }
}

/// Scoped handle over a [`TagResolver`] that writes `WHEEL` on release.
///
/// Configure the resolver through `Deref`/`DerefMut`, then call
/// [`DescriptorGuard::finish`] to write the file and observe errors. If the
/// guard is dropped without `finish` (an early return or unwind), the file is
/// written from `Drop` and failures are logged.
///
/// ```
/// use dynawheel::wheel::descriptor::DescriptorGuard;
///
/// let dir = tempfile::tempdir().expect("temp dir");
/// {
///     let mut guard = DescriptorGuard::acquire(false, dir.path());
///     guard.python_tag = Some("py3".to_owned());
///     guard.plat_name = Some("linux_x86_64".to_owned());
/// }
/// assert!(dir.path().join("WHEEL").is_file());
/// ```
#[derive(Debug)]
pub struct DescriptorGuard {
    resolver: TagResolver,
    dist_info_dir: PathBuf,
    released: bool,
}

impl DescriptorGuard {
    /// Scope a fresh resolver with the given purity to `dist_info_dir`.
    #[must_use]
    pub fn acquire(root_is_pure: bool, dist_info_dir: impl Into<PathBuf>) -> Self {
        Self::with_resolver(TagResolver::new(root_is_pure), dist_info_dir)
    }

    /// Scope an already-configured resolver to `dist_info_dir`.
    #[must_use]
    pub fn with_resolver(resolver: TagResolver, dist_info_dir: impl Into<PathBuf>) -> Self {
        Self {
            resolver,
            dist_info_dir: dist_info_dir.into(),
            released: false,
        }
    }

    /// Return the directory the descriptor will be written into.
    #[must_use]
    pub fn dist_info_dir(&self) -> &Path {
        &self.dist_info_dir
    }

    /// Release the guard, writing `WHEEL` and returning its path.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while writing the file. The write is
    /// not retried on drop.
    pub fn finish(mut self) -> io::Result<PathBuf> {
        self.released = true;
        self.resolver.write_wheelfile(&self.dist_info_dir)
    }
}

impl Deref for DescriptorGuard {
    type Target = TagResolver;

    fn deref(&self) -> &TagResolver {
        &self.resolver
    }
}

impl DerefMut for DescriptorGuard {
    fn deref_mut(&mut self) -> &mut TagResolver {
        &mut self.resolver
    }
}

impl Drop for DescriptorGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = self.resolver.write_wheelfile(&self.dist_info_dir) {
            warn!(
                "failed to write {} into {}: {err}",
                WHEEL_FILE_NAME,
                self.dist_info_dir.display()
            );
        }
    }
}

/// Value of the `Generator` header.
fn generator() -> String {
    format!("{} ({})", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Lower-case a platform name and replace `-` and `.` with `_`.
fn normalise_platform(name: &str) -> String {
    name.to_lowercase().replace(['-', '.'], "_")
}

/// Platform tag for the compilation target.
fn host_platform() -> String {
    match (std::env::consts::OS, std::env::consts::ARCH) {
        ("windows", "x86_64") => "win_amd64".to_owned(),
        ("windows", "x86") => "win32".to_owned(),
        ("windows", "aarch64") => "win_arm64".to_owned(),
        ("macos", arch) => format!("macosx_11_0_{arch}"),
        (os, arch) => format!("{os}_{arch}"),
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
