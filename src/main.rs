use beray::cli::{parse_args, run_command, version_string, CliCommand, USAGE};
use beray::{BerayClient, ClientConfig};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout carries only command output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("beray=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let command = parse_args(std::env::args());

    // Handle flags that need no client before any initialization
    match &command {
        CliCommand::Version => {
            println!("{}", version_string());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Invalid(message) => {
            eprintln!("Error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
        _ => {}
    }

    color_eyre::install()?;
    init_tracing();

    let client = BerayClient::new(ClientConfig::from_env())?;
    run_command(&client, command, &mut std::io::stdout()).await
}
