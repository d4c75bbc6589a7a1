//! Vilo CLI - a single-user kanban board with checklist tracking.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;
use std::time::Instant;

use vilo::action_log;
use vilo::cli::{BoardCommands, CheckCommands, Cli, Commands, SectionCommands, TaskCommands};
use vilo::commands::{self, Output};
use vilo::storage;

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    // Resolve the data directory: --data-dir flag > VILO_DATA_DIR env >
    // platform default.
    let data_dir = match storage::resolve_data_dir(cli.data_dir.clone()) {
        Ok(dir) => dir,
        Err(e) => {
            print_error(&e, human);
            process::exit(1);
        }
    };

    // Serialize command for logging
    let (cmd_name, args_json) = serialize_command(&cli.command);

    let start = Instant::now();
    let result = run_command(cli.command, &data_dir, human);
    let duration = start.elapsed().as_millis() as u64;

    let (success, error) = match &result {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };

    // Log the action (best-effort; failures only warn)
    let _ = action_log::log_action(&data_dir, &cmd_name, args_json, success, error, duration);

    if let Err(e) = result {
        print_error(&e, human);
        process::exit(1);
    }
}

fn run_command(command: Commands, data_dir: &Path, human: bool) -> vilo::Result<()> {
    match command {
        Commands::Show { board } => {
            output(&commands::show(data_dir, board)?, human);
        }

        Commands::Board { command } => match command {
            BoardCommands::Create { name } => {
                output(&commands::board_create(data_dir, &name)?, human);
            }
            BoardCommands::Rename { id, name } => {
                output(&commands::board_rename(data_dir, id, &name)?, human);
            }
            BoardCommands::Delete { id, yes } => {
                if !yes && !confirm("Delete this board and everything on it?")? {
                    output(&commands::Cancelled::new("board", id), human);
                    return Ok(());
                }
                output(&commands::board_delete(data_dir, id)?, human);
            }
        },

        Commands::Section { command } => match command {
            SectionCommands::Create { board, name } => {
                output(&commands::section_create(data_dir, board, &name)?, human);
            }
            SectionCommands::Rename { id, name } => {
                output(&commands::section_rename(data_dir, id, &name)?, human);
            }
            SectionCommands::Delete { id, yes } => {
                if !yes && !confirm("Delete this section and all its tasks?")? {
                    output(&commands::Cancelled::new("section", id), human);
                    return Ok(());
                }
                output(&commands::section_delete(data_dir, id)?, human);
            }
            SectionCommands::Move { board, from, to } => {
                output(&commands::section_move(data_dir, board, from, to)?, human);
            }
        },

        Commands::Task { command } => match command {
            TaskCommands::Create { section, name } => {
                output(&commands::task_create(data_dir, section, &name)?, human);
            }
            TaskCommands::Show { id } => {
                output(&commands::task_show(data_dir, id)?, human);
            }
            TaskCommands::Update {
                id,
                name,
                description,
            } => {
                output(
                    &commands::task_update(data_dir, id, name.as_deref(), description.as_deref())?,
                    human,
                );
            }
            TaskCommands::Delete { section, id, yes } => {
                if !yes && !confirm("Delete this task?")? {
                    output(&commands::Cancelled::new("task", id), human);
                    return Ok(());
                }
                output(&commands::task_delete(data_dir, section, id)?, human);
            }
            TaskCommands::Move {
                from_section,
                from_index,
                to_section,
                to_index,
            } => {
                output(
                    &commands::task_move(data_dir, from_section, from_index, to_section, to_index)?,
                    human,
                );
            }
        },

        Commands::Check { command } => match command {
            CheckCommands::Add { task, text } => {
                output(&commands::check_add(data_dir, task, &text)?, human);
            }
            CheckCommands::Edit { task, index, text } => {
                output(&commands::check_edit(data_dir, task, index, &text)?, human);
            }
            CheckCommands::Toggle { task, index } => {
                output(&commands::check_toggle(data_dir, task, index)?, human);
            }
            CheckCommands::Rm { task, index } => {
                output(&commands::check_rm(data_dir, task, index)?, human);
            }
            CheckCommands::Move { task, from, to } => {
                output(&commands::check_move(data_dir, task, from, to)?, human);
            }
        },
    }

    Ok(())
}

/// Ask the user to confirm a delete on stdin. The prompt goes to stderr so
/// stdout stays clean for JSON consumers.
fn confirm(prompt: &str) -> io::Result<bool> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

fn print_error(error: &vilo::Error, human: bool) {
    if human {
        eprintln!("Error: {}", error);
    } else {
        eprintln!("{}", serde_json::json!({ "error": error.to_string() }));
    }
}

/// Name and arguments of the command, for the action log.
fn serialize_command(command: &Commands) -> (String, serde_json::Value) {
    use serde_json::json;

    match command {
        Commands::Show { board } => ("show".to_string(), json!({ "board": board })),

        Commands::Board { command } => match command {
            BoardCommands::Create { name } => {
                ("board create".to_string(), json!({ "name": name }))
            }
            BoardCommands::Rename { id, name } => (
                "board rename".to_string(),
                json!({ "id": id, "name": name }),
            ),
            BoardCommands::Delete { id, .. } => {
                ("board delete".to_string(), json!({ "id": id }))
            }
        },

        Commands::Section { command } => match command {
            SectionCommands::Create { board, name } => (
                "section create".to_string(),
                json!({ "board": board, "name": name }),
            ),
            SectionCommands::Rename { id, name } => (
                "section rename".to_string(),
                json!({ "id": id, "name": name }),
            ),
            SectionCommands::Delete { id, .. } => {
                ("section delete".to_string(), json!({ "id": id }))
            }
            SectionCommands::Move { board, from, to } => (
                "section move".to_string(),
                json!({ "board": board, "from": from, "to": to }),
            ),
        },

        Commands::Task { command } => match command {
            TaskCommands::Create { section, name } => (
                "task create".to_string(),
                json!({ "section": section, "name": name }),
            ),
            TaskCommands::Show { id } => ("task show".to_string(), json!({ "id": id })),
            TaskCommands::Update {
                id,
                name,
                description,
            } => (
                "task update".to_string(),
                json!({ "id": id, "name": name, "description": description }),
            ),
            TaskCommands::Delete { section, id, .. } => (
                "task delete".to_string(),
                json!({ "section": section, "id": id }),
            ),
            TaskCommands::Move {
                from_section,
                from_index,
                to_section,
                to_index,
            } => (
                "task move".to_string(),
                json!({
                    "from_section": from_section,
                    "from_index": from_index,
                    "to_section": to_section,
                    "to_index": to_index,
                }),
            ),
        },

        Commands::Check { command } => match command {
            CheckCommands::Add { task, text } => (
                "check add".to_string(),
                json!({ "task": task, "text": text }),
            ),
            CheckCommands::Edit { task, index, text } => (
                "check edit".to_string(),
                json!({ "task": task, "index": index, "text": text }),
            ),
            CheckCommands::Toggle { task, index } => (
                "check toggle".to_string(),
                json!({ "task": task, "index": index }),
            ),
            CheckCommands::Rm { task, index } => (
                "check rm".to_string(),
                json!({ "task": task, "index": index }),
            ),
            CheckCommands::Move { task, from, to } => (
                "check move".to_string(),
                json!({ "task": task, "from": from, "to": to }),
            ),
        },
    }
}
