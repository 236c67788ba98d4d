//! Line-oriented front end: one command per line on stdin.

mod logging;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use webpad::app::{Collaborators, Workbench};
use webpad::kernel::services::adapters::{
    ensure_downloads_dir, ensure_settings_file, ensure_state_dir, load_settings, AsyncRuntime,
    DirectoryDownloads, FilePreview, FileSlot, HeadlessWidget, PrettierFormatter, PythonProcess,
    ScriptHost,
};
use webpad::kernel::services::ports::Settings;
use webpad::kernel::{Action, FileListView, ImportedFile};

const TICK: Duration = Duration::from_millis(50);
const QUIT_GRACE: Duration = Duration::from_secs(10);
const PREVIEW_FILE: &str = "preview.html";

const HELP: &str = "\
commands:
  new <name>          create a file (or select it if it exists)
  delete <name>       delete a file
  close <name>        close a tab
  select <name>       show a file
  type <text>         insert at the cursor (\\n, \\t and \\\\ escapes)
  cursor <ln> <col>   move the cursor (1-based)
  run                 run or preview the active file
  format              format the active file now
  export              download the active file
  export-zip          download every file as project_files.zip
  import <path>...    import files from disk
  clear-log | toggle-preview | toggle-log
  ls | log | status | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Dispatch(Action),
    Type(String),
    Cursor { line: usize, column: usize },
    Import(Vec<PathBuf>),
    Ls,
    Log,
    Status,
    Help,
    Quit,
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = match line.trim_start().split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (line.trim(), ""),
    };
    let arg = rest.trim();
    let name = |what: &str| {
        if arg.is_empty() {
            Err(format!("usage: {what} <name>"))
        } else {
            Ok(arg.to_string())
        }
    };

    let command = match word {
        "new" => Command::Dispatch(Action::NewFile(name("new")?)),
        "delete" => Command::Dispatch(Action::DeleteFile(name("delete")?)),
        "close" => Command::Dispatch(Action::CloseFile(name("close")?)),
        "select" => Command::Dispatch(Action::SelectFile(name("select")?)),
        "type" => Command::Type(unescape(rest)),
        "cursor" => {
            let mut parts = arg.split_whitespace().map(str::parse::<usize>);
            match (parts.next(), parts.next()) {
                (Some(Ok(line)), Some(Ok(column))) => Command::Cursor {
                    line: line.saturating_sub(1),
                    column: column.saturating_sub(1),
                },
                _ => return Err("usage: cursor <line> <col>".to_string()),
            }
        }
        "run" => Command::Dispatch(Action::Run),
        "format" => Command::Dispatch(Action::FormatNow),
        "export" => Command::Dispatch(Action::ExportFile),
        "export-zip" => Command::Dispatch(Action::ExportArchive),
        "import" => {
            let paths: Vec<PathBuf> = arg.split_whitespace().map(PathBuf::from).collect();
            if paths.is_empty() {
                return Err("usage: import <path>...".to_string());
            }
            Command::Import(paths)
        }
        "clear-log" => Command::Dispatch(Action::ClearLog),
        "toggle-preview" => Command::Dispatch(Action::TogglePreview),
        "toggle-log" => Command::Dispatch(Action::ToggleLog),
        "ls" => Command::Ls,
        "log" => Command::Log,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "" => return Err(String::new()),
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(command)
}

fn read_imports(paths: &[PathBuf]) -> (Vec<ImportedFile>, Vec<String>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();
    for path in paths {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            errors.push(format!("not a file: {}", path.display()));
            continue;
        };
        match std::fs::read_to_string(path) {
            Ok(text) => files.push(ImportedFile { name, text }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "import read failed");
                errors.push(format!("cannot read {}: {e}", path.display()));
            }
        }
    }
    (files, errors)
}

fn execute(workbench: &mut Workbench, command: Command, out: &mut impl Write) -> io::Result<()> {
    match command {
        Command::Dispatch(action) => {
            workbench.dispatch(action);
        }
        Command::Type(text) => {
            if !workbench.type_text(&text) {
                writeln!(out, "no file open")?;
            }
        }
        Command::Cursor { line, column } => {
            workbench.move_cursor(line, column);
        }
        Command::Import(paths) => {
            let (files, errors) = read_imports(&paths);
            for error in errors {
                writeln!(out, "{error}")?;
            }
            if !files.is_empty() {
                workbench.dispatch(Action::ImportFiles(files));
            }
        }
        Command::Ls => match workbench.file_list() {
            FileListView::Empty { placeholder } => writeln!(out, "{placeholder}")?,
            FileListView::Rows(rows) => {
                for row in rows {
                    let marker = if row.active { '*' } else { ' ' };
                    writeln!(out, "{marker} {}", row.name)?;
                }
            }
        },
        Command::Log => {
            for line in workbench.state().log.lines() {
                writeln!(out, "{line}")?;
            }
        }
        Command::Status => {
            let status = workbench.status();
            let mut fields = vec![status.file.as_str(), status.language.as_str()];
            fields.extend(
                [status.position.as_str(), status.chars.as_str()]
                    .into_iter()
                    .filter(|s| !s.is_empty()),
            );
            writeln!(out, "{}", fields.join(" | "))?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

/// Prints log lines appended since `printed`; returns the new watermark.
fn flush_log(workbench: &Workbench, printed: usize, out: &mut impl Write) -> io::Result<usize> {
    let state = workbench.state();
    let lines = state.log.lines();
    let start = if lines.len() < printed { 0 } else { printed };
    if state.ui.log_visible {
        for line in &lines[start..] {
            writeln!(out, "{line}")?;
        }
    }
    Ok(lines.len())
}

fn spawn_stdin_reader() -> io::Result<Receiver<String>> {
    let (tx, rx) = mpsc::channel();
    std::thread::Builder::new()
        .name("webpad-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Waits for outstanding script runs, up to `QUIT_GRACE`. Runs still
/// going after that are dropped with the runtime and reported in the log.
fn drain_pending_runs(workbench: &mut Workbench) {
    let deadline = Instant::now() + QUIT_GRACE;
    while workbench.pending_runs() > 0 {
        let Some(left) = deadline.checked_duration_since(Instant::now()) else {
            break;
        };
        workbench.wait_for_message(left.min(TICK));
    }

    let abandoned = workbench.pending_runs();
    if abandoned > 0 {
        tracing::warn!(abandoned, "exiting with script runs still in flight");
        workbench.dispatch(Action::AppendLog(format!("Abandoned {abandoned} pending run(s)")));
    }
}

fn fallback_dir(what: &str) -> PathBuf {
    std::env::temp_dir().join("webpad").join(what)
}

fn build_workbench(settings: Settings, state_dir: &Path, downloads_dir: PathBuf) -> Workbench {
    let (tx, rx) = mpsc::channel();
    let host = Arc::new(ScriptHost::new(Arc::new(PythonProcess::new(
        &settings.python,
    ))));
    let runtime = match AsyncRuntime::new(tx, host) {
        Ok(runtime) => Some((runtime, rx)),
        Err(e) => {
            tracing::error!(error = %e, "script runtime unavailable");
            None
        }
    };

    let collaborators = Collaborators {
        widget: Box::new(HeadlessWidget::new()),
        formatter: Box::new(PrettierFormatter::new(settings.formatter.clone())),
        slot: Box::new(FileSlot::in_dir(state_dir, &settings.storage_key)),
        preview: Box::new(FilePreview::new(state_dir.join(PREVIEW_FILE))),
        downloads: Box::new(DirectoryDownloads::new(downloads_dir)),
        runtime,
    };
    Workbench::new(settings, collaborators)
}

fn main() -> io::Result<()> {
    let _logging = logging::init();

    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "settings file unavailable");
    }
    let settings = load_settings().unwrap_or_default();

    let state_dir = ensure_state_dir().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "state dir unavailable, using temp dir");
        fallback_dir("state")
    });
    let downloads_dir = settings
        .downloads_dir
        .clone()
        .or_else(|| ensure_downloads_dir().ok())
        .unwrap_or_else(|| fallback_dir("downloads"));
    tracing::info!(
        state_dir = %state_dir.display(),
        downloads_dir = %downloads_dir.display(),
        "starting"
    );

    let mut workbench = build_workbench(settings, &state_dir, downloads_dir);
    let lines = spawn_stdin_reader()?;
    let mut out = io::stdout().lock();
    let mut printed = flush_log(&workbench, 0, &mut out)?;

    loop {
        match lines.recv_timeout(TICK) {
            Ok(line) => match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => execute(&mut workbench, command, &mut out)?,
                Err(message) if message.is_empty() => {}
                Err(message) => writeln!(out, "{message}")?,
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        workbench.tick();
        printed = flush_log(&workbench, printed, &mut out)?;
        out.flush()?;
    }

    drain_pending_runs(&mut workbench);
    flush_log(&workbench, printed, &mut out)?;
    tracing::info!("exiting");
    Ok(())
}
