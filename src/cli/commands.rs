//! Command handlers for the BeRay CLI.
//!
//! Handlers write to any [`Write`] so they can be exercised against a buffer.

use std::io::Write;

use color_eyre::Result;
use futures::StreamExt;
use tracing::info;

use super::args::CliCommand;
use crate::client::BerayClient;
use crate::models::FileEntry;

/// Run a command that talks to the server.
///
/// `Version`, `Help` and `Invalid` are handled by the caller before a client
/// exists; passing them here is a no-op.
pub async fn run_command<W: Write>(client: &BerayClient, command: CliCommand, out: &mut W) -> Result<()> {
    match command {
        CliCommand::Me => {
            let user = client.get_current_user().await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&user)?)?;
        }
        CliCommand::Tasks => {
            for task in client.list_tasks().await? {
                writeln!(out, "{:>6}  {:<10}  {}", task.id, task.status_label(), task.goal)?;
            }
        }
        CliCommand::Task(task_id) => {
            let task = client.get_task(task_id).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&task)?)?;
        }
        CliCommand::Files { task_id, path } => {
            for entry in client.list_files_tree(task_id, path.as_deref()).await? {
                writeln!(out, "{}", format_entry(&entry))?;
            }
        }
        CliCommand::Stream(task_id) => stream_to(client, task_id, out).await?,
        CliCommand::Version | CliCommand::Help | CliCommand::Invalid(_) => {}
    }
    Ok(())
}

/// Print each event of a task's stream as one JSON line until the server closes it.
async fn stream_to<W: Write>(client: &BerayClient, task_id: i64, out: &mut W) -> Result<()> {
    let mut events = client.stream_events(task_id).await?;
    let mut count = 0usize;

    while let Some(event) = events.next().await {
        let event = event?;
        writeln!(out, "{}", serde_json::to_string(&event)?)?;
        out.flush()?;
        count += 1;
    }

    info!("Stream for task {} finished after {} events", task_id, count);
    Ok(())
}

fn format_entry(entry: &FileEntry) -> String {
    let name = match &entry.path {
        Some(path) => path.as_str(),
        None => entry.name.as_str(),
    };
    if entry.is_dir() {
        format!("{:>10}  {}/", "-", name)
    } else {
        format!("{:>10}  {}", entry.format_size().unwrap_or_default(), name)
    }
}
