//! Command implementations for the Vilo CLI.
//!
//! This module contains the business logic for each CLI command, bridging
//! parsed arguments to the board tree and the view projection. Each function
//! returns a serializable result implementing `Output`, which the binary
//! prints as JSON (default) or human-readable text (`-H`).

use std::path::Path;

use serde::Serialize;

use crate::models::view::{self, Screen, TaskOverlay, UiSelection, ViewModel};
use crate::models::Id;
use crate::storage::Store;
use crate::tree::BoardTree;
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output: Serialize {
    /// Serialize to a JSON string.
    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.to_string())
    }

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn open_tree(data_dir: &Path) -> Result<BoardTree> {
    BoardTree::open(Store::new(data_dir))
}

fn load_document(data_dir: &Path) -> Result<crate::models::Document> {
    Store::new(data_dir).load()
}

/// Result of a create command.
#[derive(Debug, Serialize)]
pub struct Created {
    pub entity: &'static str,
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
}

impl Created {
    fn new(entity: &'static str, id: Option<Id>, name: &str) -> Self {
        Self {
            entity,
            created: id.is_some(),
            id,
            name: name.to_string(),
        }
    }
}

impl Output for Created {
    fn to_human(&self) -> String {
        match self.id {
            Some(id) => format!("Created {} {} \"{}\"", self.entity, id, self.name),
            None => format!(
                "No {} created (empty name, or no such parent)",
                self.entity
            ),
        }
    }
}

/// Result of a mutation that either applied or was a lenient no-op.
#[derive(Debug, Serialize)]
pub struct Changed {
    pub entity: &'static str,
    /// Past-tense verb, e.g. "renamed", "deleted", "moved".
    pub action: &'static str,
    pub changed: bool,
    pub id: Id,
}

impl Changed {
    fn new(entity: &'static str, action: &'static str, changed: bool, id: Id) -> Self {
        Self {
            entity,
            action,
            changed,
            id,
        }
    }
}

impl Output for Changed {
    fn to_human(&self) -> String {
        if self.changed {
            let mut verb = self.action.to_string();
            if let Some(first) = verb.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            format!("{} {} {}", verb, self.entity, self.id)
        } else {
            format!("No change ({} {} not {})", self.entity, self.id, self.action)
        }
    }
}

/// Printed when the user declines a delete confirmation.
#[derive(Debug, Serialize)]
pub struct Cancelled {
    pub entity: &'static str,
    pub id: Id,
    pub cancelled: bool,
}

impl Cancelled {
    pub fn new(entity: &'static str, id: Id) -> Self {
        Self {
            entity,
            id,
            cancelled: true,
        }
    }
}

impl Output for Cancelled {
    fn to_human(&self) -> String {
        format!("Cancelled: {} {} was not deleted", self.entity, self.id)
    }
}

/// The board list or one open board.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ShowOutput {
    pub view: ViewModel,
}

impl Output for ShowOutput {
    fn to_human(&self) -> String {
        match &self.view.screen {
            Screen::BoardList { boards } if boards.is_empty() => {
                "No boards yet. Create one with `vilo board create <name>`.".to_string()
            }
            Screen::BoardList { boards } => boards
                .iter()
                .map(|b| {
                    format!(
                        "{}  {} ({} section{})",
                        b.id,
                        b.name,
                        b.sections,
                        if b.sections == 1 { "" } else { "s" }
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Screen::Board(board) => {
                let mut lines = vec![format!("{} ({})", board.name, board.id)];
                for section in &board.sections {
                    lines.push(format!("  {} ({})", section.name, section.id));
                    if section.tasks.is_empty() {
                        lines.push("    (no tasks)".to_string());
                    }
                    for task in &section.tasks {
                        lines.push(format!(
                            "    [{:>3}%] {}  {}",
                            task.progress_percent, task.id, task.name
                        ));
                    }
                }
                lines.join("\n")
            }
        }
    }
}

/// One task's overlay: name, description, progress, checklist.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct TaskShow {
    pub task: TaskOverlay,
}

impl Output for TaskShow {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "{} ({}) - {}%",
            self.task.name, self.task.id, self.task.progress_percent
        )];
        if !self.task.description.is_empty() {
            lines.push(self.task.description.clone());
        }
        for (index, item) in self.task.checklist.iter().enumerate() {
            let mark = if item.checked { "x" } else { " " };
            lines.push(format!("  {index}. [{mark}] {}", item.text));
        }
        lines.join("\n")
    }
}

// === Show ===

pub fn show(data_dir: &Path, board: Option<Id>) -> Result<ShowOutput> {
    let doc = load_document(data_dir)?;
    let selection = match board {
        Some(id) => {
            if doc.find_board(id).is_none() {
                return Err(Error::NotFound(format!("board {id}")));
            }
            UiSelection::board(id)
        }
        None => UiSelection::none(),
    };
    Ok(ShowOutput {
        view: view::render(&doc, &selection),
    })
}

// === Boards ===

pub fn board_create(data_dir: &Path, name: &str) -> Result<Created> {
    let mut tree = open_tree(data_dir)?;
    let id = tree.create_board(name)?;
    Ok(Created::new("board", id, name))
}

pub fn board_rename(data_dir: &Path, id: Id, name: &str) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.rename_board(id, name)?;
    Ok(Changed::new("board", "renamed", changed, id))
}

pub fn board_delete(data_dir: &Path, id: Id) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.delete_board(id)?;
    Ok(Changed::new("board", "deleted", changed, id))
}

// === Sections ===

pub fn section_create(data_dir: &Path, board: Id, name: &str) -> Result<Created> {
    let mut tree = open_tree(data_dir)?;
    let id = tree.create_section(board, name)?;
    Ok(Created::new("section", id, name))
}

pub fn section_rename(data_dir: &Path, id: Id, name: &str) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.rename_section(id, name)?;
    Ok(Changed::new("section", "renamed", changed, id))
}

pub fn section_delete(data_dir: &Path, id: Id) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.delete_section(id)?;
    Ok(Changed::new("section", "deleted", changed, id))
}

pub fn section_move(data_dir: &Path, board: Id, from: usize, to: usize) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.reorder_sections(board, from, to)?;
    Ok(Changed::new("section", "moved", changed, board))
}

// === Tasks ===

pub fn task_create(data_dir: &Path, section: Id, name: &str) -> Result<Created> {
    let mut tree = open_tree(data_dir)?;
    let id = tree.create_task(section, name)?;
    Ok(Created::new("task", id, name))
}

pub fn task_show(data_dir: &Path, id: Id) -> Result<TaskShow> {
    let doc = load_document(data_dir)?;
    let rendered = view::render(&doc, &UiSelection::task(id));
    match rendered.task_overlay {
        Some(task) => Ok(TaskShow { task }),
        None => Err(Error::NotFound(format!("task {id}"))),
    }
}

pub fn task_update(
    data_dir: &Path,
    id: Id,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.update_task(id, name, description)?;
    Ok(Changed::new("task", "updated", changed, id))
}

pub fn task_delete(data_dir: &Path, section: Id, id: Id) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.delete_task(section, id)?;
    Ok(Changed::new("task", "deleted", changed, id))
}

pub fn task_move(
    data_dir: &Path,
    from_section: Id,
    from_index: usize,
    to_section: Id,
    to_index: usize,
) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.move_task(from_section, from_index, to_section, to_index)?;
    Ok(Changed::new("task", "moved", changed, from_section))
}

// === Checklist ===

pub fn check_add(data_dir: &Path, task: Id, text: &str) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.add_checklist_item(task, text)?;
    Ok(Changed::new("checklist item", "added", changed, task))
}

pub fn check_edit(data_dir: &Path, task: Id, index: usize, text: &str) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.edit_checklist_item(task, index, text)?;
    Ok(Changed::new("checklist item", "edited", changed, task))
}

pub fn check_toggle(data_dir: &Path, task: Id, index: usize) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.toggle_checklist_item(task, index)?;
    Ok(Changed::new("checklist item", "toggled", changed, task))
}

pub fn check_rm(data_dir: &Path, task: Id, index: usize) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.remove_checklist_item(task, index)?;
    Ok(Changed::new("checklist item", "removed", changed, task))
}

pub fn check_move(data_dir: &Path, task: Id, from: usize, to: usize) -> Result<Changed> {
    let mut tree = open_tree(data_dir)?;
    let changed = tree.move_checklist_item(task, from, to)?;
    Ok(Changed::new("checklist item", "moved", changed, task))
}
