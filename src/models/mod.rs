//! Data models for Vilo entities.
//!
//! This module defines the persisted tree:
//! - `Document` - the full collection of boards (the unit of persistence)
//! - `Board` - a kanban workspace holding ordered sections
//! - `Section` - a named column holding ordered tasks
//! - `Task` - a work item with a description and a checklist
//! - `ChecklistItem` - a sub-step with text and a checked state
//!
//! Ids are opaque integers drawn from a monotonic millisecond clock, so
//! documents written by older builds (which stored plain creation-time
//! timestamps) keep loading unchanged.

pub mod view;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier for boards, sections, and tasks.
///
/// Serialized as a bare JSON integer to stay wire-compatible with the
/// historical `boards.json` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(i64);

impl Id {
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Id {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Id)
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id(value)
    }
}

/// Issues unique ids based on the current wall clock.
///
/// Each id is `max(now_ms, last_issued + 1)`, so ids stay unique even when
/// entities are created faster than once per millisecond, and stay ahead of
/// every id already present in a loaded document.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Create a generator that will never collide with an id in `doc`.
    pub fn seeded_from(doc: &Document) -> Self {
        Self {
            last: doc.max_id().map(Id::as_i64).unwrap_or(0),
        }
    }

    /// Issue the next id.
    pub fn next_id(&mut self) -> Id {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        Id(self.last)
    }
}

/// The full persisted collection of boards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub boards: Vec<Board>,
}

impl Document {
    pub fn find_board(&self, id: Id) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn find_board_mut(&mut self, id: Id) -> Option<&mut Board> {
        self.boards.iter_mut().find(|b| b.id == id)
    }

    /// Look up a section by id anywhere in the document.
    ///
    /// Ids are document-unique, so the owning board does not need to be named.
    pub fn find_section(&self, id: Id) -> Option<&Section> {
        self.boards
            .iter()
            .flat_map(|b| b.sections.iter())
            .find(|s| s.id == id)
    }

    pub fn find_section_mut(&mut self, id: Id) -> Option<&mut Section> {
        self.boards
            .iter_mut()
            .flat_map(|b| b.sections.iter_mut())
            .find(|s| s.id == id)
    }

    /// Look up a task by id anywhere in the document.
    pub fn find_task(&self, id: Id) -> Option<&Task> {
        self.boards
            .iter()
            .flat_map(|b| b.sections.iter())
            .flat_map(|s| s.tasks.iter())
            .find(|t| t.id == id)
    }

    pub fn find_task_mut(&mut self, id: Id) -> Option<&mut Task> {
        self.boards
            .iter_mut()
            .flat_map(|b| b.sections.iter_mut())
            .flat_map(|s| s.tasks.iter_mut())
            .find(|t| t.id == id)
    }

    /// The largest id anywhere in the document, used to seed the generator.
    pub fn max_id(&self) -> Option<Id> {
        self.boards
            .iter()
            .flat_map(|b| {
                std::iter::once(b.id).chain(b.sections.iter().flat_map(|s| {
                    std::iter::once(s.id).chain(s.tasks.iter().map(|t| t.id))
                }))
            })
            .max()
    }
}

/// A kanban workspace: an ordered list of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: Id,
    pub name: String,
    pub sections: Vec<Section>,
}

impl Board {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sections: Vec::new(),
        }
    }
}

/// A named column within a board holding an ordered list of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Id,
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Section {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
        }
    }
}

/// A unit of work with a free-text description and an ordered checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub checklist: Vec<ChecklistItem>,
}

impl Task {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            checklist: Vec::new(),
        }
    }

    /// Checklist completion as a whole percentage, 0 for an empty checklist.
    pub fn progress_percent(&self) -> u8 {
        progress_percent(&self.checklist)
    }
}

/// A sub-step of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: false,
        }
    }
}

/// `round(100 * checked / total)`, defined as 0 when the list is empty.
pub fn progress_percent(checklist: &[ChecklistItem]) -> u8 {
    if checklist.is_empty() {
        return 0;
    }
    let done = checklist.iter().filter(|i| i.checked).count();
    ((done as f64 / checklist.len() as f64) * 100.0).round() as u8
}
