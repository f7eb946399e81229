//! Command-line argument parsing for the BeRay CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Print the signed-in user
    Me,
    /// List tasks
    Tasks,
    /// Print one task
    Task(i64),
    /// List a directory of a task's workspace
    Files { task_id: i64, path: Option<String> },
    /// Follow a task's update stream, one JSON line per event
    Stream(i64),
    /// Arguments could not be understood
    Invalid(String),
}

/// Usage text printed for `--help` and invalid arguments.
pub const USAGE: &str = "\
Usage: beray [--version] [--help] <command>

Commands:
  me                     Show the signed-in user
  tasks                  List tasks
  task <id>              Show one task
  files <id> [path]      List a task's workspace (default path: .)
  stream <id>            Follow a task's updates as JSON lines

Environment:
  BERAY_BASE_URL, BERAY_TOKEN, BERAY_TIMEOUT_SECS,
  BERAY_STREAM_IDLE_TIMEOUT_SECS, RUST_LOG";

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use beray::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["beray".to_string(), "stream".to_string(), "42".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Stream(42));
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);

    let Some(first) = args.next() else {
        return CliCommand::Help;
    };

    match first.as_str() {
        "--version" | "-V" => CliCommand::Version,
        "--help" | "-h" | "help" => CliCommand::Help,
        "me" => CliCommand::Me,
        "tasks" => CliCommand::Tasks,
        "task" => with_task_id(&first, args.next(), CliCommand::Task),
        "stream" => with_task_id(&first, args.next(), CliCommand::Stream),
        "files" => {
            let task_id = args.next();
            let path = args.next();
            with_task_id(&first, task_id, |task_id| CliCommand::Files { task_id, path })
        }
        other => CliCommand::Invalid(format!("unknown command '{}'", other)),
    }
}

fn with_task_id(
    command: &str,
    arg: Option<String>,
    build: impl FnOnce(i64) -> CliCommand,
) -> CliCommand {
    match arg.as_deref().map(str::parse::<i64>) {
        Some(Ok(task_id)) => build(task_id),
        Some(Err(_)) => CliCommand::Invalid(format!(
            "'{}' expects a numeric task id, got '{}'",
            command,
            arg.unwrap_or_default()
        )),
        None => CliCommand::Invalid(format!("'{}' requires a task id", command)),
    }
}
