use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use corpusprep_logging::prep_debug;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error writing {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

impl PersistError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

fn parent_dir(target: &Path) -> PathBuf {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// A file written line by line into a temporary sibling of its target and
/// renamed into place by [`StagedFile::commit`].
///
/// Dropping it without committing removes the temporary file, so a failed
/// run never leaves a partial file at the target path.
pub struct StagedFile {
    target: PathBuf,
    writer: BufWriter<NamedTempFile>,
}

impl StagedFile {
    pub fn create(target: &Path) -> Result<Self, PersistError> {
        let dir = parent_dir(target);
        ensure_output_dir(&dir)?;
        let tmp = NamedTempFile::new_in(&dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        Ok(Self {
            target: target.to_path_buf(),
            writer: BufWriter::new(tmp),
        })
    }

    /// Write `line` followed by a single `\n`.
    pub fn write_line(&mut self, line: &str) -> Result<(), PersistError> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .map_err(|e| PersistError::io(&self.target, e))
    }

    pub fn commit(self) -> Result<PathBuf, PersistError> {
        let Self { target, writer } = self;
        let tmp = writer
            .into_inner()
            .map_err(|e| PersistError::io(&target, e.into_error()))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| PersistError::io(&target, e))?;
        // Rename over any existing file; the target is never absent.
        tmp.persist(&target)
            .map_err(|e| PersistError::io(&target, e.error))?;
        prep_debug!("Committed {:?}", target);
        Ok(target)
    }
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writer targeting the directory that holds `path`.
    pub fn for_path(path: &Path) -> Self {
        Self::new(parent_dir(path))
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        let mut staged = StagedFile::create(&self.dir.join(filename))?;
        staged
            .writer
            .write_all(content.as_bytes())
            .map_err(|e| PersistError::io(&staged.target, e))?;
        staged.commit()
    }
}
