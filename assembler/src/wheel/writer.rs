//! Zip archive writer for wheels.
//!
//! [`WheelWriter`] adds files to a deflated zip, hashing each entry as it
//! goes, and appends the `RECORD` manifest when finished. Entries carry a
//! fixed timestamp so identical inputs produce byte-identical archives.

use super::error::Result;
use super::record::{RECORD_FILE_NAME, Record};
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Suffix identifying metadata directories whose files are written last.
const DIST_INFO_SUFFIX: &str = ".dist-info";

/// Permission bits for generated entries and non-Unix sources.
const DEFAULT_MODE: u32 = 0o644;

/// Streams files into a wheel archive and tracks their `RECORD` rows.
pub struct WheelWriter {
    zip: ZipWriter<fs::File>,
    path: PathBuf,
    record_path: String,
    record: Record,
}

impl WheelWriter {
    /// Create the archive at `path`, truncating any existing file.
    ///
    /// `dist_info_dir` names the `.dist-info` directory that will hold the
    /// generated `RECORD`.
    ///
    /// # Errors
    ///
    /// Returns [`super::error::AssemblyError::Io`] if the file cannot be
    /// created.
    pub fn create(path: &Path, dist_info_dir: &str) -> Result<Self> {
        let file = fs::File::create(path)?;
        debug!("opened {} for writing", path.display());
        Ok(Self {
            zip: ZipWriter::new(file),
            path: path.to_path_buf(),
            record_path: format!("{dist_info_dir}/{RECORD_FILE_NAME}"),
            record: Record::new(),
        })
    }

    /// Return the archive path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the archive-relative path of the manifest.
    #[must_use]
    pub fn record_path(&self) -> &str {
        &self.record_path
    }

    /// Recursively add every regular file under `base_dir`.
    ///
    /// Directories are walked in name order. Files inside `*.dist-info`
    /// directories are deferred and written last, sorted by archive name.
    /// A pre-existing manifest at the record path is skipped because a
    /// fresh one is generated on [`WheelWriter::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if `base_dir` cannot be walked, a file cannot be
    /// read, or the archive rejects an entry.
    pub fn write_files(&mut self, base_dir: &Path) -> Result<()> {
        info!(
            "creating {} and adding {} to it",
            self.path.display(),
            base_dir.display()
        );
        let mut layout = WalkLayout::default();
        walk(base_dir, &mut layout)?;

        layout.deferred.sort_by(|a, b| a.1.cmp(&b.1));
        for (path, arcname) in layout.immediate.iter().chain(layout.deferred.iter()) {
            if *arcname == self.record_path {
                continue;
            }
            self.write_file(path, arcname)?;
        }
        Ok(())
    }

    /// Add the file at `source` under `arcname`, keeping its permission bits.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the entry cannot be
    /// written.
    pub fn write_file(&mut self, source: &Path, arcname: &str) -> Result<()> {
        let contents = fs::read(source)?;
        let mode = source_mode(&fs::metadata(source)?);
        self.write_bytes(arcname, &contents, mode)
    }

    /// Add `contents` under `arcname` with the given Unix permission bits.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive rejects the entry.
    pub fn write_bytes(&mut self, arcname: &str, contents: &[u8], mode: u32) -> Result<()> {
        debug!("adding '{arcname}'");
        self.zip.start_file(arcname, entry_options(mode))?;
        self.zip.write_all(contents)?;
        self.record.push(arcname, contents);
        Ok(())
    }

    /// Append `RECORD`, finalise the archive, and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be encoded or the archive
    /// cannot be flushed.
    pub fn finish(mut self) -> Result<PathBuf> {
        let manifest = self.record.to_csv(&self.record_path)?;
        debug!("adding '{}'", self.record_path);
        self.zip
            .start_file(self.record_path.as_str(), entry_options(DEFAULT_MODE))?;
        self.zip.write_all(&manifest)?;
        let mut file = self.zip.finish()?;
        file.flush()?;
        Ok(self.path)
    }
}

/// Files gathered by a directory walk, split by write phase.
#[derive(Default)]
struct WalkLayout {
    /// `(source_path, archive_name)` pairs written in walk order.
    immediate: Vec<(PathBuf, String)>,
    /// `(source_path, archive_name)` pairs from `*.dist-info` directories.
    deferred: Vec<(PathBuf, String)>,
}

/// Walk `base_dir` top-down: each directory's files first, then its
/// subdirectories, both by name.
///
/// Symlinked directories are not descended into; symlinked files are
/// followed.
fn walk(base_dir: &Path, layout: &mut WalkLayout) -> io::Result<()> {
    let walker = WalkDir::new(base_dir)
        .min_depth(1)
        .sort_by(|a, b| {
            (a.file_type().is_dir(), a.file_name()).cmp(&(b.file_type().is_dir(), b.file_name()))
        });

    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if entry.file_type().is_dir() || !path.is_file() {
            continue;
        }
        let arcname = archive_name(base_dir, path)?;
        let in_dist_info = path
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|name| name.to_string_lossy().ends_with(DIST_INFO_SUFFIX));
        if in_dist_info {
            layout.deferred.push((path.to_path_buf(), arcname));
        } else {
            layout.immediate.push((path.to_path_buf(), arcname));
        }
    }
    Ok(())
}

/// Relative path of `path` under `base_dir`, joined with `/`.
///
/// Archive names must be UTF-8; other file names are rejected.
fn archive_name(base_dir: &Path, path: &Path) -> io::Result<String> {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    let parts = relative
        .components()
        .map(|component| {
            component.as_os_str().to_str().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("file name is not valid UTF-8: {}", path.display()),
                )
            })
        })
        .collect::<io::Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}

fn entry_options(mode: u32) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(mode)
}

#[cfg(unix)]
fn source_mode(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn source_mode(_metadata: &fs::Metadata) -> u32 {
    DEFAULT_MODE
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
