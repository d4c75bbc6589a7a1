//! Read-only view projection of a document.
//!
//! `render` turns a `Document` plus the current `UiSelection` into a
//! `ViewModel`: plain serializable data holding everything a shell needs to
//! draw the board list, one open board, or the task overlay, including
//! checklist progress percentages. The projection never mutates and carries
//! no references back into the tree, so any shell (the CLI here, a windowed
//! front end elsewhere) can consume it without touching the mutation API.

use serde::Serialize;

use crate::models::{Document, Id};

/// Which entities the user currently has open.
///
/// The shell owns one of these and passes it into `render`; selection is
/// never ambient state inside the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiSelection {
    /// The open board, if any.
    pub board: Option<Id>,
    /// The task whose overlay is showing, if any.
    pub task: Option<Id>,
}

impl UiSelection {
    /// Nothing open: the board-list screen.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn board(id: Id) -> Self {
        Self {
            board: Some(id),
            ..Self::default()
        }
    }

    pub fn task(id: Id) -> Self {
        Self {
            task: Some(id),
            ..Self::default()
        }
    }
}

/// Everything a shell needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    #[serde(flatten)]
    pub screen: Screen,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_overlay: Option<TaskOverlay>,
}

/// The main screen: either the board list or one open board.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    BoardList { boards: Vec<BoardCard> },
    Board(BoardView),
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardCard {
    pub id: Id,
    pub name: String,
    pub sections: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub id: Id,
    pub name: String,
    pub sections: Vec<SectionColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionColumn {
    pub id: Id,
    pub name: String,
    pub tasks: Vec<TaskCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskCard {
    pub id: Id,
    pub name: String,
    pub progress_percent: u8,
}

/// The task detail overlay.
#[derive(Debug, Clone, Serialize)]
pub struct TaskOverlay {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub progress_percent: u8,
    pub checklist: Vec<ChecklistRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistRow {
    pub text: String,
    pub checked: bool,
}

/// Project the document into a view model.
///
/// A selection pointing at an id that no longer exists falls back to the
/// board-list screen (respectively no overlay), so a selection left stale
/// by a delete degrades gracefully instead of erroring.
pub fn render(doc: &Document, selection: &UiSelection) -> ViewModel {
    let screen = match selection.board.and_then(|id| doc.find_board(id)) {
        Some(board) => Screen::Board(BoardView {
            id: board.id,
            name: board.name.clone(),
            sections: board
                .sections
                .iter()
                .map(|section| SectionColumn {
                    id: section.id,
                    name: section.name.clone(),
                    tasks: section
                        .tasks
                        .iter()
                        .map(|task| TaskCard {
                            id: task.id,
                            name: task.name.clone(),
                            progress_percent: task.progress_percent(),
                        })
                        .collect(),
                })
                .collect(),
        }),
        None => Screen::BoardList {
            boards: doc
                .boards
                .iter()
                .map(|board| BoardCard {
                    id: board.id,
                    name: board.name.clone(),
                    sections: board.sections.len(),
                })
                .collect(),
        },
    };

    let task_overlay = selection
        .task
        .and_then(|id| doc.find_task(id))
        .map(|task| TaskOverlay {
            id: task.id,
            name: task.name.clone(),
            description: task.description.clone(),
            progress_percent: task.progress_percent(),
            checklist: task
                .checklist
                .iter()
                .map(|item| ChecklistRow {
                    text: item.text.clone(),
                    checked: item.checked,
                })
                .collect(),
        });

    ViewModel {
        screen,
        task_overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Board, ChecklistItem, Section, Task};

    fn two_board_document() -> Document {
        let mut first = Board::new(Id::from(1), "Web");
        let mut todo = Section::new(Id::from(10), "Todo");
        let mut task = Task::new(Id::from(100), "Ship it");
        task.checklist = vec![
            ChecklistItem {
                text: "write".to_string(),
                checked: true,
            },
            ChecklistItem {
                text: "review".to_string(),
                checked: false,
            },
        ];
        todo.tasks.push(task);
        first.sections.push(todo);
        first.sections.push(Section::new(Id::from(11), "Done"));

        Document {
            boards: vec![first, Board::new(Id::from(2), "Home")],
        }
    }

    #[test]
    fn test_render_board_list_by_default() {
        let doc = two_board_document();
        let vm = render(&doc, &UiSelection::none());

        match vm.screen {
            Screen::BoardList { boards } => {
                assert_eq!(boards.len(), 2);
                assert_eq!(boards[0].name, "Web");
                assert_eq!(boards[0].sections, 2);
            }
            Screen::Board(_) => panic!("expected board list"),
        }
        assert!(vm.task_overlay.is_none());
    }

    #[test]
    fn test_render_open_board_with_progress() {
        let doc = two_board_document();
        let vm = render(&doc, &UiSelection::board(Id::from(1)));

        match vm.screen {
            Screen::Board(board) => {
                assert_eq!(board.name, "Web");
                assert_eq!(board.sections.len(), 2);
                assert_eq!(board.sections[0].tasks[0].progress_percent, 50);
                assert!(board.sections[1].tasks.is_empty());
            }
            Screen::BoardList { .. } => panic!("expected open board"),
        }
    }

    #[test]
    fn test_render_missing_board_falls_back_to_list() {
        let doc = two_board_document();
        let vm = render(&doc, &UiSelection::board(Id::from(999)));
        assert!(matches!(vm.screen, Screen::BoardList { .. }));
    }

    #[test]
    fn test_render_task_overlay() {
        let doc = two_board_document();
        let vm = render(&doc, &UiSelection::task(Id::from(100)));

        let overlay = vm.task_overlay.expect("overlay");
        assert_eq!(overlay.name, "Ship it");
        assert_eq!(overlay.progress_percent, 50);
        assert_eq!(overlay.checklist.len(), 2);
        assert!(overlay.checklist[0].checked);
    }

    #[test]
    fn test_render_missing_task_has_no_overlay() {
        let doc = two_board_document();
        let vm = render(&doc, &UiSelection::task(Id::from(999)));
        assert!(vm.task_overlay.is_none());
    }
}
