//! The mutable board tree and its structural operations.
//!
//! `BoardTree` owns the in-memory document and the store beneath it. Every
//! operation mutates the tree in place and synchronously rewrites the whole
//! document through the store when (and only when) something changed. The
//! returned `bool` reports exactly that: `Ok(true)` means the change is on
//! disk, `Ok(false)` means the operation was a no-op and the file was not
//! touched.
//!
//! Operations referencing an id that is not in the tree, or an index that is
//! out of range, are silent no-ops. Names must be non-empty; checklist item
//! text may be empty.

use crate::models::{Board, ChecklistItem, Document, Id, IdGenerator, Section, Task};
use crate::storage::Store;
use crate::Result;

/// In-memory tree of boards with save-on-mutate semantics.
#[derive(Debug)]
pub struct BoardTree {
    doc: Document,
    ids: IdGenerator,
    store: Store,
}

impl BoardTree {
    /// Load the persisted document and seed the id generator past it.
    pub fn open(store: Store) -> Result<Self> {
        let doc = store.load()?;
        let ids = IdGenerator::seeded_from(&doc);
        Ok(Self { doc, ids, store })
    }

    /// Read-only access for rendering.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    fn commit(&mut self) -> Result<bool> {
        self.store.save(&self.doc)?;
        Ok(true)
    }

    /// Append a new board. Empty names create nothing.
    pub fn create_board(&mut self, name: &str) -> Result<Option<Id>> {
        if name.is_empty() {
            return Ok(None);
        }
        let id = self.ids.next_id();
        self.doc.boards.push(Board::new(id, name));
        self.commit()?;
        Ok(Some(id))
    }

    pub fn rename_board(&mut self, id: Id, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Ok(false);
        }
        match self.doc.find_board_mut(id) {
            Some(board) if board.name != name => {
                board.name = name.to_string();
                self.commit()
            }
            _ => Ok(false),
        }
    }

    /// Remove a board and everything nested beneath it.
    pub fn delete_board(&mut self, id: Id) -> Result<bool> {
        let before = self.doc.boards.len();
        self.doc.boards.retain(|b| b.id != id);
        if self.doc.boards.len() == before {
            return Ok(false);
        }
        self.commit()
    }

    /// Append a new section to a board. Empty names create nothing.
    pub fn create_section(&mut self, board: Id, name: &str) -> Result<Option<Id>> {
        if name.is_empty() {
            return Ok(None);
        }
        let id = self.ids.next_id();
        match self.doc.find_board_mut(board) {
            Some(board) => {
                board.sections.push(Section::new(id, name));
                self.commit()?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    pub fn rename_section(&mut self, id: Id, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Ok(false);
        }
        match self.doc.find_section_mut(id) {
            Some(section) if section.name != name => {
                section.name = name.to_string();
                self.commit()
            }
            _ => Ok(false),
        }
    }

    /// Remove a section and all its tasks.
    pub fn delete_section(&mut self, id: Id) -> Result<bool> {
        let mut removed = false;
        for board in &mut self.doc.boards {
            let before = board.sections.len();
            board.sections.retain(|s| s.id != id);
            removed |= board.sections.len() != before;
        }
        if !removed {
            return Ok(false);
        }
        self.commit()
    }

    /// Append a new task to a section. Empty names create nothing.
    pub fn create_task(&mut self, section: Id, name: &str) -> Result<Option<Id>> {
        if name.is_empty() {
            return Ok(None);
        }
        let id = self.ids.next_id();
        match self.doc.find_section_mut(section) {
            Some(section) => {
                section.tasks.push(Task::new(id, name));
                self.commit()?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Set a task's name and/or description in one save, the way the task
    /// overlay commits both fields together. An empty name is ignored.
    pub fn update_task(
        &mut self,
        id: Id,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<bool> {
        let Some(task) = self.doc.find_task_mut(id) else {
            return Ok(false);
        };
        let mut changed = false;
        if let Some(name) = name {
            if !name.is_empty() && task.name != name {
                task.name = name.to_string();
                changed = true;
            }
        }
        if let Some(description) = description {
            if task.description != description {
                task.description = description.to_string();
                changed = true;
            }
        }
        if !changed {
            return Ok(false);
        }
        self.commit()
    }

    /// Remove a task (and its checklist) from the given section.
    pub fn delete_task(&mut self, section: Id, task: Id) -> Result<bool> {
        let Some(section) = self.doc.find_section_mut(section) else {
            return Ok(false);
        };
        let before = section.tasks.len();
        section.tasks.retain(|t| t.id != task);
        if section.tasks.len() == before {
            return Ok(false);
        }
        self.commit()
    }

    /// Splice the section at `from` back in at `to` within the same board.
    pub fn reorder_sections(&mut self, board: Id, from: usize, to: usize) -> Result<bool> {
        let Some(board) = self.doc.find_board_mut(board) else {
            return Ok(false);
        };
        if from == to || from >= board.sections.len() || to >= board.sections.len() {
            return Ok(false);
        }
        let moved = board.sections.remove(from);
        board.sections.insert(to, moved);
        self.commit()
    }

    /// Move the task at `from_index` of `from_section` to `to_index` of
    /// `to_section` (which may be the same section).
    ///
    /// `to_index` addresses the target list after the task is removed, so
    /// `to_index == len` appends. Out-of-range indices and unknown sections
    /// are no-ops.
    pub fn move_task(
        &mut self,
        from_section: Id,
        from_index: usize,
        to_section: Id,
        to_index: usize,
    ) -> Result<bool> {
        let to_capacity = match self.doc.find_section(to_section) {
            Some(s) if to_section == from_section => s.tasks.len().saturating_sub(1),
            Some(s) => s.tasks.len(),
            None => return Ok(false),
        };
        if to_index > to_capacity {
            return Ok(false);
        }
        let moved = match self.doc.find_section_mut(from_section) {
            Some(s) if from_index < s.tasks.len() => s.tasks.remove(from_index),
            _ => return Ok(false),
        };
        if let Some(s) = self.doc.find_section_mut(to_section) {
            s.tasks.insert(to_index, moved);
        }
        self.commit()
    }

    /// Splice the checklist item at `from` back in at `to`.
    pub fn move_checklist_item(&mut self, task: Id, from: usize, to: usize) -> Result<bool> {
        let Some(task) = self.doc.find_task_mut(task) else {
            return Ok(false);
        };
        if from == to || from >= task.checklist.len() || to >= task.checklist.len() {
            return Ok(false);
        }
        let moved = task.checklist.remove(from);
        task.checklist.insert(to, moved);
        self.commit()
    }

    pub fn toggle_checklist_item(&mut self, task: Id, index: usize) -> Result<bool> {
        match self
            .doc
            .find_task_mut(task)
            .and_then(|t| t.checklist.get_mut(index))
        {
            Some(item) => {
                item.checked = !item.checked;
                self.commit()
            }
            None => Ok(false),
        }
    }

    pub fn edit_checklist_item(&mut self, task: Id, index: usize, text: &str) -> Result<bool> {
        match self
            .doc
            .find_task_mut(task)
            .and_then(|t| t.checklist.get_mut(index))
        {
            Some(item) if item.text != text => {
                item.text = text.to_string();
                self.commit()
            }
            _ => Ok(false),
        }
    }

    /// Append a checklist item. Text may be empty; items often start blank
    /// and get filled in by a later edit.
    pub fn add_checklist_item(&mut self, task: Id, text: &str) -> Result<bool> {
        match self.doc.find_task_mut(task) {
            Some(task) => {
                task.checklist.push(ChecklistItem::new(text));
                self.commit()
            }
            None => Ok(false),
        }
    }

    pub fn remove_checklist_item(&mut self, task: Id, index: usize) -> Result<bool> {
        match self.doc.find_task_mut(task) {
            Some(task) if index < task.checklist.len() => {
                task.checklist.remove(index);
                self.commit()
            }
            _ => Ok(false),
        }
    }
}
