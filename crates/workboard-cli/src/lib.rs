pub mod cli;
pub mod render;

use std::ffi::OsString;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde_json::Value;
use tracing::{debug, info};
use workboard_core::board::{Board, BoardIntent};
use workboard_core::column::Column;
use workboard_core::config::BoardConfig;
use workboard_core::datetime::parse_due_date;
use workboard_core::owner::BoardOwner;
use workboard_core::stages::{Stage, partition_tasks};
use workboard_core::task::Task;

use crate::cli::{BoardSource, Command, GlobalCli, MoveArgs, ShowArgs};
use crate::render::Renderer;

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting workboard CLI"
    );

    let cfg = BoardConfig::load(cli.config.as_deref())?;
    let renderer = Renderer::new(!cli.no_color && io::stdout().is_terminal());
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Stages => renderer.print_stages(&mut out, &cfg.stages)?,
        Command::Show(args) => show(&mut out, &renderer, &cfg, args)?,
        Command::Move(args) => move_task(&mut out, &renderer, &cfg, args)?,
    }

    out.flush()?;
    info!("done");
    Ok(())
}

/// A column array is recognised by its first element carrying `tasks` or
/// `color`; anything else is read as a flat task list.
fn is_column_list(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_object)
        .is_some_and(|first| first.contains_key("tasks") || first.contains_key("color"))
}

/// Reads either a column array (used as is) or a flat task array (bucketed
/// into the configured stages).
pub fn load_columns(path: &Path, stages: &[Stage]) -> anyhow::Result<Vec<Column>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = serde_json::from_str::<Value>(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    if is_column_list(&value) {
        let columns = serde_json::from_value::<Vec<Column>>(value)
            .with_context(|| format!("invalid column list in {}", path.display()))?;
        debug!(column_count = columns.len(), "loaded column list");
        return Ok(columns);
    }

    let tasks = serde_json::from_value::<Vec<Task>>(value)
        .with_context(|| format!("invalid task list in {}", path.display()))?;
    debug!(task_count = tasks.len(), "partitioning flat task list");
    Ok(partition_tasks(tasks, stages))
}

fn resolve_now(raw: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match raw {
        None => Ok(Utc::now()),
        Some(text) => parse_due_date(text).ok_or_else(|| anyhow!("invalid --now value: {text}")),
    }
}

fn write_output<W: Write>(
    out: &mut W,
    renderer: &Renderer,
    board: &Board,
    source: &BoardSource,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    if source.json {
        serde_json::to_writer_pretty(&mut *out, board.columns())?;
        writeln!(out)?;
        return Ok(());
    }
    renderer.print_board(out, &board.layout(now))
}

pub fn show<W: Write>(
    out: &mut W,
    renderer: &Renderer,
    cfg: &BoardConfig,
    args: ShowArgs,
) -> anyhow::Result<()> {
    let now = resolve_now(args.source.now.as_deref())?;
    let columns = load_columns(&args.source.tasks, &cfg.stages)?;
    let mut board = Board::new(columns);
    for column_id in &args.collapse {
        if board.visibility().is_expanded(column_id) {
            board.toggle_column(column_id);
        }
    }
    write_output(out, renderer, &board, &args.source, now)
}

/// Plays one drag-and-drop gesture through the board protocol and applies the
/// resulting intent.
pub fn move_task<W: Write>(
    out: &mut W,
    renderer: &Renderer,
    cfg: &BoardConfig,
    args: MoveArgs,
) -> anyhow::Result<()> {
    let now = resolve_now(args.source.now.as_deref())?;
    let columns = load_columns(&args.source.tasks, &cfg.stages)?;

    let from_column = columns
        .iter()
        .find(|column| column.contains_task(&args.task_id))
        .map(|column| column.id.clone())
        .ok_or_else(|| anyhow!("task {} is not on the board", args.task_id))?;

    let mut board = Board::new(columns.clone());
    let mut owner = BoardOwner::new(columns);

    let native = board
        .begin_drag(&args.task_id, &from_column)
        .map(|payload| payload.encode())
        .transpose()?;
    board.hover(&args.to_column);
    let intent = board.drop_on(&args.to_column, native.as_deref());
    board.end_drag();

    let changed = match intent {
        Some(intent @ BoardIntent::Move(_)) => owner.apply(intent, now),
        _ => false,
    };
    if !changed {
        writeln!(out, "no change: {} stays in {}", args.task_id, from_column)?;
    }

    board.set_columns(owner.into_columns());
    write_output(out, renderer, &board, &args.source, now)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;
    use std::path::PathBuf;

    use tempfile::NamedTempFile;

    use super::*;

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "{contents}").expect("write json");
        file
    }

    fn task_file() -> NamedTempFile {
        json_file(
            r#"[
                {"id":"t1","title":"Write copy","stage":"todo","priority":"high"},
                {"id":"t2","title":"Launch","stage":"done","dueDate":"2020-01-01"},
                {"id":"t3","title":"Sketch","projectId":"review"}
            ]"#,
        )
    }

    fn source(path: PathBuf, json: bool) -> BoardSource {
        BoardSource {
            tasks: path,
            now: Some("2026-10-19".to_string()),
            json,
        }
    }

    fn move_args(file: &NamedTempFile, task_id: &str, to_column: &str, json: bool) -> MoveArgs {
        MoveArgs {
            source: source(file.path().to_path_buf(), json),
            task_id: task_id.to_string(),
            to_column: to_column.to_string(),
        }
    }

    #[test]
    fn flat_tasks_are_partitioned() {
        let file = task_file();
        let columns =
            load_columns(file.path(), &BoardConfig::embedded().stages).expect("load");
        assert_eq!(columns.len(), 5);
        assert!(columns[1].contains_task("t1"));
        assert!(columns[3].contains_task("t3"));
        assert!(columns[4].contains_task("t2"));
    }

    #[test]
    fn column_list_is_used_as_is() {
        let file = json_file(
            r#"[{"id":"inbox","title":"Inbox","color":"red","tasks":[{"id":"t1","title":"Call"}]}]"#,
        );
        let columns =
            load_columns(file.path(), &BoardConfig::embedded().stages).expect("load");
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].id, "inbox");
        assert!(columns[0].contains_task("t1"));
    }

    #[test]
    fn bad_priority_names_the_field() {
        let file = json_file(r#"[{"id":"t1","title":"Write copy","priority":"critical"}]"#);
        let error = load_columns(file.path(), &BoardConfig::embedded().stages)
            .expect_err("unknown priority");
        let message = format!("{error:#}");
        assert!(message.contains("invalid task list"));
        assert!(message.contains("critical"));
    }

    #[test]
    fn move_updates_board_json() {
        let file = task_file();
        let mut out = Vec::new();
        move_task(
            &mut out,
            &Renderer::new(false),
            &BoardConfig::embedded(),
            move_args(&file, "t1", "review", true),
        )
        .expect("move");

        let columns: Vec<Column> = serde_json::from_slice(&out).expect("json");
        assert!(!columns[1].contains_task("t1"));
        let moved = columns[3]
            .tasks
            .iter()
            .find(|task| task.id == "t1")
            .expect("moved task");
        assert_eq!(moved.stage.as_deref(), Some("review"));
    }

    #[test]
    fn same_column_move_reports_no_change() {
        let file = task_file();
        let mut out = Vec::new();
        move_task(
            &mut out,
            &Renderer::new(false),
            &BoardConfig::embedded(),
            move_args(&file, "t1", "todo", false),
        )
        .expect("move");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("no change: t1 stays in todo"));
    }

    #[test]
    fn unknown_task_is_an_error() {
        let file = task_file();
        let error = move_task(
            &mut Vec::new(),
            &Renderer::new(false),
            &BoardConfig::embedded(),
            move_args(&file, "nope", "done", false),
        )
        .expect_err("unknown task");
        assert!(error.to_string().contains("nope"));
    }

    #[test]
    fn show_honours_collapse() {
        let file = task_file();
        let mut out = Vec::new();
        show(
            &mut out,
            &Renderer::new(false),
            &BoardConfig::embedded(),
            ShowArgs {
                source: source(file.path().to_path_buf(), false),
                collapse: vec!["done".to_string()],
            },
        )
        .expect("show");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("|| Klaar (1) [green]"));
        assert!(text.contains("== Te doen (1) [blue]"));
    }
}
