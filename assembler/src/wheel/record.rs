//! `RECORD` manifest generation.
//!
//! Every wheel lists its files in `<name>-<version>.dist-info/RECORD`, one
//! CSV row per entry: the archive path, a `sha256=` digest encoded as
//! URL-safe base64 without padding, and the size in bytes. The manifest's
//! own row carries empty hash and size columns.

use super::error::{AssemblyError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Basename of the manifest inside the `.dist-info` directory.
pub const RECORD_FILE_NAME: &str = "RECORD";

/// Hash algorithm label prefixed to every digest.
const HASH_ALGORITHM: &str = "sha256";

/// One row of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    /// Archive-relative path with `/` separators.
    pub path: String,
    /// `sha256=<digest>` for the entry contents.
    pub hash: String,
    /// Uncompressed size in bytes.
    pub size: usize,
}

/// Accumulates manifest rows in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<RecordEntry>,
}

impl Record {
    /// Create an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash `contents` and append a row for `path`.
    pub fn push(&mut self, path: impl Into<String>, contents: &[u8]) {
        self.entries.push(RecordEntry {
            path: path.into(),
            hash: record_hash(contents),
            size: contents.len(),
        });
    }

    /// Return the rows recorded so far.
    #[must_use]
    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// Return `true` when no rows have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode the manifest as CSV, terminated by the row for `record_path`.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::Record`] if a row cannot be encoded, or
    /// [`AssemblyError::Io`] if the buffer cannot be flushed.
    pub fn to_csv(&self, record_path: &str) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        for entry in &self.entries {
            let size = entry.size.to_string();
            writer.write_record([entry.path.as_str(), entry.hash.as_str(), size.as_str()])?;
        }
        writer.write_record([record_path, "", ""])?;

        writer
            .into_inner()
            .map_err(|err| AssemblyError::Io(err.into_error()))
    }
}

/// Return `sha256=<urlsafe-b64-nopad>` for `contents`.
///
/// ```
/// use dynawheel::wheel::record::record_hash;
///
/// assert_eq!(
///     record_hash(b""),
///     "sha256=47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU"
/// );
/// ```
#[must_use]
pub fn record_hash(contents: &[u8]) -> String {
    let digest = Sha256::digest(contents);
    format!("{HASH_ALGORITHM}={}", URL_SAFE_NO_PAD.encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn push_records_hash_and_size() {
        let mut record = Record::new();
        record.push("pkg/__init__.py", b"print('hi')\n");

        let entry = record.entries().first().expect("one entry");
        assert_eq!(entry.path, "pkg/__init__.py");
        assert_eq!(entry.size, 12);
        assert!(entry.hash.starts_with("sha256="));
        assert!(!entry.hash.ends_with('='), "digest must be unpadded");
    }

    #[rstest]
    fn hash_is_url_safe() {
        // Digest of this payload contains both `-` and `_` once base64 encoded.
        let hash = record_hash(b"");
        assert!(!hash.contains('+'));
        assert!(!hash.contains('/'));
    }

    #[rstest]
    fn csv_lists_entries_then_record_row() {
        let mut record = Record::new();
        record.push("a.py", b"");
        record.push("demo-1.0.dist-info/METADATA", b"Name: demo\n");

        let csv = String::from_utf8(record.to_csv("demo-1.0.dist-info/RECORD").expect("encode"))
            .expect("utf8");
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines.first().copied(),
            Some("a.py,sha256=47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU,0")
        );
        assert!(lines[1].starts_with("demo-1.0.dist-info/METADATA,sha256="));
        assert!(lines[1].ends_with(",11"));
        assert_eq!(lines.last().copied(), Some("demo-1.0.dist-info/RECORD,,"));
        assert!(csv.ends_with('\n'));
        assert!(!csv.contains('\r'));
    }

    #[rstest]
    fn csv_quotes_paths_containing_commas() {
        let mut record = Record::new();
        record.push("data/a,b.txt", b"x");

        let csv = String::from_utf8(record.to_csv("x-1.dist-info/RECORD").expect("encode"))
            .expect("utf8");
        assert!(csv.starts_with("\"data/a,b.txt\",sha256="));
    }

    #[rstest]
    fn empty_record_contains_only_its_own_row() {
        let record = Record::new();
        assert!(record.is_empty());
        let csv = record.to_csv("x-1.dist-info/RECORD").expect("encode");
        assert_eq!(csv, b"x-1.dist-info/RECORD,,\n");
    }
}
