//! Compatibility tag triple for wheel archives.
//!
//! A wheel advertises the interpreters, ABIs, and platforms it supports as
//! an `(interpreter, abi, platform)` triple. Each component may be a
//! compressed tag set, a `.`-separated list such as `py2.py3`, which expands
//! to one concrete tag per combination.

use std::fmt;

/// An `(interpreter, abi, platform)` compatibility tag triple.
///
/// Components are stored verbatim; no validation or normalisation is
/// applied.
///
/// # Examples
///
/// ```
/// use dynawheel::wheel::tag::WheelTag;
///
/// let tag = WheelTag::new("py3", "none", "linux_x86_64");
/// assert_eq!(tag.to_string(), "py3-none-linux_x86_64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WheelTag {
    interpreter: String,
    abi: String,
    platform: String,
}

impl WheelTag {
    /// Create a tag triple from its three components.
    #[must_use]
    pub fn new(
        interpreter: impl Into<String>,
        abi: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            abi: abi.into(),
            platform: platform.into(),
        }
    }

    /// Return the interpreter component.
    #[must_use]
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Return the ABI component.
    #[must_use]
    pub fn abi(&self) -> &str {
        &self.abi
    }

    /// Return the platform component.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Expand compressed tag sets into concrete `impl-abi-plat` strings.
    ///
    /// Iterates interpreter components outermost and platform components
    /// innermost, each split on `.`.
    ///
    /// ```
    /// use dynawheel::wheel::tag::WheelTag;
    ///
    /// let tag = WheelTag::new("py2.py3", "none", "any");
    /// assert_eq!(tag.expand(), vec!["py2-none-any", "py3-none-any"]);
    /// ```
    #[must_use]
    pub fn expand(&self) -> Vec<String> {
        let mut tags = Vec::new();
        for interpreter in self.interpreter.split('.') {
            for abi in self.abi.split('.') {
                for platform in self.platform.split('.') {
                    tags.push(format!("{interpreter}-{abi}-{platform}"));
                }
            }
        }
        tags
    }
}

impl fmt::Display for WheelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.interpreter, self.abi, self.platform)
    }
}
