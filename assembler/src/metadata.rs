//! Core metadata templating.
//!
//! Renders the `METADATA` text (core metadata version 2.1) for the common
//! case of a name, version, summary, and a list of trove classifiers. The
//! assembler itself only consumes a string, so callers with a hand-written
//! file can skip this module entirely.

use std::fmt;

/// Core metadata format version emitted by [`CoreMetadata`].
pub const METADATA_VERSION: &str = "2.1";

/// Placeholder for optional fields left unset.
const UNKNOWN: &str = "UNKNOWN";

/// Fields rendered into a `METADATA` document.
///
/// # Examples
///
/// ```
/// use dynawheel::metadata::CoreMetadata;
///
/// let metadata = CoreMetadata::new("anamespace.pkg2", "1.0.0")
///     .with_summary("example package")
///     .with_classifier("Operating System :: POSIX");
/// let text = metadata.to_string();
///
/// assert!(text.starts_with("Metadata-Version: 2.1\nName: anamespace.pkg2\n"));
/// assert!(text.contains("Classifier: Operating System :: POSIX\n"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreMetadata {
    /// Distribution name.
    pub name: String,
    /// Distribution version.
    pub version: String,
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
    /// Trove classifiers, one header each.
    pub classifiers: Vec<String>,
    /// Long description placed after the headers.
    pub description: Option<String>,
}

impl CoreMetadata {
    /// Create metadata with only name and version set.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Set the summary line.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the author name.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Append a trove classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifiers.push(classifier.into());
        self
    }

    /// Set the long description body.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Render the document as a string.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CoreMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_unknown = |value: &Option<String>| value.as_deref().unwrap_or(UNKNOWN).to_owned();

        writeln!(f, "Metadata-Version: {METADATA_VERSION}")?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Summary: {}", or_unknown(&self.summary))?;
        writeln!(f, "Home-page: {}", or_unknown(&self.home_page))?;
        writeln!(f, "Author: {}", or_unknown(&self.author))?;
        writeln!(f, "Author-email: {}", or_unknown(&self.author_email))?;
        writeln!(f, "License: {}", or_unknown(&self.license))?;
        writeln!(f, "Platform: {}", or_unknown(&self.platform))?;
        for classifier in &self.classifiers {
            writeln!(f, "Classifier: {classifier}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", or_unknown(&self.description))
    }
}
