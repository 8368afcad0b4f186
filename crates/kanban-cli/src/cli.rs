use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use kanban_domain::{SprintId, TaskId, TaskStatus};

#[derive(Parser)]
#[command(name = "kanban-sync")]
#[command(about = "Drive a kanban board against a live task API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the task API (or set KANBAN_API_URL env var)
    #[arg(long, global = true, value_name = "URL", env = "KANBAN_API_URL")]
    pub api_url: Option<String>,

    /// Project/sprint filter, "all" for every task (or set KANBAN_FILTER env var)
    #[arg(long, global = true, value_name = "FILTER", env = "KANBAN_FILTER")]
    pub filter: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Task operations
    Task(TaskCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Whether confirmation prompts should be answered without asking.
    pub fn assume_yes(&self) -> bool {
        matches!(
            self,
            Commands::Task(TaskCommand {
                action: TaskAction::Delete { yes: true, .. }
            })
        )
    }
}

#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Load the board under the active filter and print it
    Show,
}

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Quick-add a task
    Create(TaskCreateArgs),
    /// Drag a task onto another column
    Move {
        #[arg(long)]
        id: TaskId,
        /// Target column, as label ("Under Review") or code (IN_REVIEW)
        #[arg(long, value_parser = parse_status)]
        to: TaskStatus,
    },
    /// Delete a task after confirmation
    Delete {
        #[arg(long)]
        id: TaskId,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args)]
pub struct TaskCreateArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    /// Assignee display name or user id
    #[arg(long)]
    pub assignee: Option<String>,
    #[arg(long, default_value = "Medium")]
    pub priority: String,
    #[arg(long, default_value = "To Do")]
    pub status: String,
    /// Estimated hours
    #[arg(long)]
    pub estimate: Option<f64>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,
    /// Sprint id, overriding the active filter
    #[arg(long)]
    pub sprint: Option<SprintId>,
}

fn parse_status(value: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse_any(value).ok_or_else(|| {
        format!(
            "unknown status '{}' (expected one of: {})",
            value,
            TaskStatus::ALL.map(|s| s.label()).join(", ")
        )
    })
}
