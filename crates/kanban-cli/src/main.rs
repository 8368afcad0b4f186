mod cli;
mod context;
mod feedback;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        // stdout carries the JSON envelope.
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let Cli {
        api_url,
        filter,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "kanban-sync",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let assume_yes = command.assume_yes();
    let result = match CliContext::connect(api_url, filter, assume_yes).await {
        Ok(ctx) => match command {
            Commands::Board(board_cmd) => handlers::board::handle(&ctx, board_cmd.action).await,
            Commands::Task(task_cmd) => handlers::task::handle(&ctx, task_cmd.action).await,
            Commands::Completions { .. } => Ok(()),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}
