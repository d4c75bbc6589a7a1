//! Drop-position inference and drag gesture state.
//!
//! Reordering is pointer-driven: the shell reports where the pointer is and
//! how the target list's items are laid out, and this module answers where
//! the dragged item should land. Two pieces:
//!
//! - `drop_position` - the nearest-before insertion heuristic
//! - `DragGesture` - the single "what is being dragged" marker that makes
//!   section, task, and checklist drags mutually exclusive and rejects
//!   cross-level drops
//!
//! Sections and checklist items drop onto an explicit sibling slot, so only
//! task drops consult the pointer geometry.

use crate::models::Id;

/// Vertical extent of one rendered list item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemRect {
    pub top: f64,
    pub height: f64,
}

impl ItemRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    fn midpoint(self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Where a dragged item should be inserted in the target list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    /// Insert before the sibling at this index.
    Before(usize),
    /// Append after every sibling.
    End,
}

/// Infer the insertion point from the pointer's vertical position.
///
/// `siblings` are the target list's items in list order, excluding the item
/// being dragged. For each sibling, `offset = pointer_y - midpoint`; among
/// siblings whose midpoint lies below the pointer (`offset < 0`), the one
/// with the offset closest to zero wins and the drop lands before it. If no
/// sibling qualifies the drop appends at the end.
pub fn drop_position(siblings: &[ItemRect], pointer_y: f64) -> DropPosition {
    let mut closest: Option<(f64, usize)> = None;
    for (index, rect) in siblings.iter().enumerate() {
        let offset = pointer_y - rect.midpoint();
        if offset < 0.0 && closest.is_none_or(|(best, _)| offset > best) {
            closest = Some((offset, index));
        }
    }
    match closest {
        Some((_, index)) => DropPosition::Before(index),
        None => DropPosition::End,
    }
}

/// `drop_position` resolved to a splice index into the sibling list.
pub fn insertion_index(siblings: &[ItemRect], pointer_y: f64) -> usize {
    match drop_position(siblings, pointer_y) {
        DropPosition::Before(index) => index,
        DropPosition::End => siblings.len(),
    }
}

/// What is currently being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Section { board: Id, index: usize },
    Task { section: Id, index: usize },
    ChecklistItem { task: Id, index: usize },
}

/// A resolved section reorder within one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionReorder {
    pub board: Id,
    pub from: usize,
    pub to: usize,
}

/// A resolved task move, possibly across sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskMove {
    pub from_section: Id,
    pub from_index: usize,
    pub to_section: Id,
    /// Index into the target task list after the dragged task is removed.
    pub to_index: usize,
}

/// A resolved checklist reorder within one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistMove {
    pub task: Id,
    pub from: usize,
    pub to: usize,
}

/// Tracks one drag gesture from start to drop.
///
/// At most one item can be dragged at a time; a drop is only accepted at the
/// level matching the active drag. Any drop attempt resolves the gesture,
/// whether or not it produced a move.
#[derive(Debug, Default)]
pub struct DragGesture {
    active: Option<DragSource>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging. Refused (returns false) while another drag is active.
    pub fn start(&mut self, source: DragSource) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(source);
        true
    }

    pub fn active(&self) -> Option<DragSource> {
        self.active
    }

    /// Abandon the gesture without a drop.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Drop onto the section slot at `target_index` of `board`.
    ///
    /// Yields a reorder only when a section of that board is being dragged.
    pub fn drop_on_sections(&mut self, board: Id, target_index: usize) -> Option<SectionReorder> {
        match self.active.take() {
            Some(DragSource::Section { board: b, index }) if b == board => Some(SectionReorder {
                board,
                from: index,
                to: target_index,
            }),
            _ => None,
        }
    }

    /// Drop onto the task list of `section` at the given pointer position.
    ///
    /// `siblings` are the target list's task rects excluding the dragged
    /// task. Yields a move only when a task is being dragged.
    pub fn drop_on_tasks(
        &mut self,
        section: Id,
        siblings: &[ItemRect],
        pointer_y: f64,
    ) -> Option<TaskMove> {
        match self.active.take() {
            Some(DragSource::Task {
                section: from_section,
                index,
            }) => Some(TaskMove {
                from_section,
                from_index: index,
                to_section: section,
                to_index: insertion_index(siblings, pointer_y),
            }),
            _ => None,
        }
    }

    /// Drop onto the checklist slot at `target_index` of `task`.
    pub fn drop_on_checklist(&mut self, task: Id, target_index: usize) -> Option<ChecklistMove> {
        match self.active.take() {
            Some(DragSource::ChecklistItem { task: t, index }) if t == task => {
                Some(ChecklistMove {
                    task,
                    from: index,
                    to: target_index,
                })
            }
            _ => None,
        }
    }
}
