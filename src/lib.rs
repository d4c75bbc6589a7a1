//! Vilo - a single-user kanban board with checklist tracking.
//!
//! This library provides the core functionality for the `vilo` CLI tool:
//! the board/section/task/checklist tree and its structural operations,
//! drop-position inference for drag-and-drop reordering, whole-document
//! JSON persistence, and a pure view projection for shells to render.

pub mod action_log;
pub mod cli;
pub mod commands;
pub mod dnd;
pub mod models;
pub mod storage;
pub mod tree;


/// Library-level error type for Vilo operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt board data in {}: {source}", .path.display())]
    CorruptData {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not write {}: {source}", .path.display())]
    WriteFailed {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine a data directory (pass --data-dir or set VILO_DATA_DIR)")]
    NoDataDir,

    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type alias for Vilo operations.
pub type Result<T> = std::result::Result<T, Error>;
