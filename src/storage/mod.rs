//! Storage layer for Vilo data.
//!
//! The whole document lives in a single JSON file, `boards.json`, inside a
//! per-user data directory:
//!
//! - an explicit `--data-dir` path wins,
//! - then the `VILO_DATA_DIR` environment variable,
//! - then `dirs::data_dir()/vilo` (e.g. `~/.local/share/vilo/` on Linux).
//!
//! There is no partial update: `save` rewrites the full document every time,
//! atomically (write to a temp file in the same directory, then rename), so
//! a crash mid-write can never truncate the previous valid file. A missing
//! file loads as the empty document; a malformed file is an error, never
//! silently replaced.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::models::Document;
use crate::{Error, Result};

/// File name of the persisted document inside the data directory.
pub const BOARDS_FILE: &str = "boards.json";

/// Resolve the data directory: explicit override, then `VILO_DATA_DIR`,
/// then the platform data directory.
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    if let Some(dir) = env::var_os("VILO_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    Ok(dirs::data_dir().ok_or(Error::NoDataDir)?.join("vilo"))
}

/// Whole-document persistence for one data directory.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    /// A store rooted at the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// A store at the resolved default location (see `resolve_data_dir`).
    pub fn open(override_dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self::new(resolve_data_dir(override_dir)?))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the document file.
    pub fn boards_path(&self) -> PathBuf {
        self.data_dir.join(BOARDS_FILE)
    }

    /// Whether a document has ever been saved here.
    pub fn exists(&self) -> bool {
        self.boards_path().exists()
    }

    /// Read the persisted document.
    ///
    /// Returns the empty document when no file exists. Malformed bytes fail
    /// with `Error::CorruptData`; the file is left untouched so the user can
    /// repair or remove it.
    pub fn load(&self) -> Result<Document> {
        let path = self.boards_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Document::default());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(|source| Error::CorruptData { path, source })
    }

    /// Serialize and atomically replace the persisted document.
    ///
    /// The document is written 2-space-indented (the layout older builds
    /// wrote, so existing files stay diff-stable) to a temp file in the data
    /// directory, then renamed over `boards.json`. I/O failures surface as
    /// `Error::WriteFailed` and must not be swallowed by callers.
    pub fn save(&self, doc: &Document) -> Result<()> {
        let path = self.boards_path();
        let json = serde_json::to_vec_pretty(doc)?;

        fs::create_dir_all(&self.data_dir).map_err(|source| Error::WriteFailed {
            path: self.data_dir.clone(),
            source,
        })?;

        let mut tmp =
            NamedTempFile::new_in(&self.data_dir).map_err(|source| Error::WriteFailed {
                path: path.clone(),
                source,
            })?;
        tmp.write_all(&json).map_err(|source| Error::WriteFailed {
            path: path.clone(),
            source,
        })?;
        tmp.persist(&path).map_err(|e| Error::WriteFailed {
            path,
            source: e.error,
        })?;
        Ok(())
    }
}
