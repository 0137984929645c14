//! CLI entry point.
//!
//! # Responsibility
//! - Drive `dayplan_core` as its rendering collaborator: one store
//!   operation per invocation, then render the resulting state.
//! - Keep output deterministic for quick local sanity checks.

use dayplan_core::db::open_db;
use dayplan_core::{default_log_level, init_logging, Filter, SqliteSnapshotRepository, TodoStore};
use std::env;
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "usage: dayplan <db-path> <command> [args]

commands:
  add <title>                    create a todo
  list [all|active|completed]    render the (filtered) list
  toggle <id>                    flip completion on a todo
  rm <id>                        delete a todo
  edit <id> [title]              commit an edit (empty text deletes)
  clear                          remove all completed todos";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let [db_path, command, rest @ ..] = args else {
        return Err("missing <db-path> and <command>".to_string());
    };

    setup_logging(Path::new(db_path));

    let conn = open_db(db_path).map_err(|err| format!("cannot open `{db_path}`: {err}"))?;
    let repo = SqliteSnapshotRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let mut store = TodoStore::new(repo);

    match (command.as_str(), rest) {
        ("add", title @ [_, ..]) => store.add(&title.join(" ")),
        ("list", []) => {}
        ("list", [filter]) => store.set_filter(parse_filter(filter)?),
        ("toggle", [id]) => store.toggle(id),
        ("rm", [id]) => store.remove(id),
        ("edit", [id, text @ ..]) => store.commit_edit(id, &text.join(" ")),
        ("clear", []) => store.clear_completed(),
        _ => return Err(format!("unknown command or arguments: `{command}`")),
    }

    render(&store);
    Ok(())
}

fn parse_filter(value: &str) -> Result<Filter, String> {
    match value {
        "all" => Ok(Filter::All),
        "active" => Ok(Filter::Active),
        "completed" => Ok(Filter::Completed),
        other => Err(format!(
            "unknown filter `{other}`; expected all|active|completed"
        )),
    }
}

fn render(store: &TodoStore<SqliteSnapshotRepository<'_>>) {
    let remaining = store.remaining_count();
    let noun = if remaining == 1 { "item" } else { "items" };
    println!("{remaining} {noun} left");

    for todo in store.visible_todos() {
        let mark = if todo.done { 'x' } else { ' ' };
        println!("[{mark}] {} {}", todo.id, todo.title);
    }
}

/// Best-effort file logging next to the database; a failed init only
/// disables logging, never the command.
fn setup_logging(db_path: &Path) {
    let parent = db_path.parent().filter(|p| !p.as_os_str().is_empty());
    let base = match parent {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => return,
        },
        None => match env::current_dir() {
            Ok(cwd) => cwd,
            Err(_) => return,
        },
    };

    let log_dir = base.join("logs");
    let Some(log_dir) = log_dir.to_str() else {
        return;
    };
    if let Err(err) = init_logging(default_log_level(), log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }
}
