//! Wheel naming policy.
//!
//! Constructs deterministic archive names in the binary distribution format:
//! `<pkg>-<version>[-<build>]-<interpreter>-<abi>-<platform>.whl`, and the
//! matching `<pkg>-<version>.dist-info` metadata directory name.
//!
//! Segments are joined verbatim. Callers supply filename-safe tokens; the
//! composer performs no escaping and never fails.

use super::tag::WheelTag;
use std::fmt;

/// The fixed file extension for wheel archives.
const WHEEL_EXTENSION: &str = ".whl";

/// The fixed suffix of the metadata directory embedded in every wheel.
const DIST_INFO_SUFFIX: &str = ".dist-info";

/// ABI tag used when the caller does not name one.
pub const DEFAULT_ABI_TAG: &str = "none";

/// A fully-qualified wheel archive name.
///
/// # Examples
///
/// ```
/// use dynawheel::wheel::naming::WheelName;
/// use dynawheel::wheel::tag::WheelTag;
///
/// let name = WheelName::new("demo", "1.0.0", WheelTag::new("py3.8", "none", "linux_x86_64"));
/// assert_eq!(name.to_string(), "demo-1.0.0-py3.8-none-linux_x86_64.whl");
///
/// let built = name.with_build_tag("5");
/// assert_eq!(built.to_string(), "demo-1.0.0-5-py3.8-none-linux_x86_64.whl");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelName {
    package: String,
    version: String,
    build_tag: Option<String>,
    tag: WheelTag,
}

impl WheelName {
    /// Create a wheel name without a build tag.
    #[must_use]
    pub fn new(package: impl Into<String>, version: impl Into<String>, tag: WheelTag) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
            build_tag: None,
            tag,
        }
    }

    /// Attach a build tag, emitted between the version and interpreter tag.
    #[must_use]
    pub fn with_build_tag(mut self, build_tag: impl Into<String>) -> Self {
        self.build_tag = Some(build_tag.into());
        self
    }

    /// Return the package component.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Return the version component.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Return the build tag, if any.
    #[must_use]
    pub fn build_tag(&self) -> Option<&str> {
        self.build_tag.as_deref()
    }

    /// Return the compatibility tag triple.
    #[must_use]
    pub fn tag(&self) -> &WheelTag {
        &self.tag
    }

    /// Return the filename as a string without consuming the value.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }

    /// Return the name of the `.dist-info` directory for this wheel.
    #[must_use]
    pub fn dist_info_dir(&self) -> String {
        dist_info_dir_name(&self.package, &self.version)
    }
}

impl fmt::Display for WheelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.package, self.version)?;
        if let Some(build_tag) = &self.build_tag {
            write!(f, "-{build_tag}")?;
        }
        write!(f, "-{}{WHEEL_EXTENSION}", self.tag)
    }
}

/// Compose a wheel filename from its raw components.
///
/// Argument order follows the caller-facing contract: package, version,
/// platform tag, interpreter tag, optional build tag, ABI tag.
///
/// ```
/// use dynawheel::wheel::naming::compose_name;
///
/// assert_eq!(
///     compose_name("demo", "1.0.0", "linux_x86_64", "py3.8", None, "none"),
///     "demo-1.0.0-py3.8-none-linux_x86_64.whl"
/// );
/// ```
#[must_use]
pub fn compose_name(
    package: &str,
    version: &str,
    platform_tag: &str,
    interpreter_tag: &str,
    build_tag: Option<&str>,
    abi_tag: &str,
) -> String {
    let name = WheelName::new(
        package,
        version,
        WheelTag::new(interpreter_tag, abi_tag, platform_tag),
    );
    match build_tag {
        Some(build_tag) => name.with_build_tag(build_tag).filename(),
        None => name.filename(),
    }
}

/// Return `<package>-<version>.dist-info`.
#[must_use]
pub fn dist_info_dir_name(package: &str, version: &str) -> String {
    format!("{package}-{version}{DIST_INFO_SUFFIX}")
}
