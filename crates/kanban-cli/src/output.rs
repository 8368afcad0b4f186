use kanban_board::BoardSurface;
use kanban_core::LogEntry;
use kanban_domain::{CardView, TaskStatus};
use serde::Serialize;

#[derive(Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    pub api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct ColumnView {
    pub status: TaskStatus,
    pub label: &'static str,
    pub count: usize,
    pub cards: Vec<CardView>,
}

#[derive(Serialize)]
pub struct BoardView {
    pub filter: String,
    pub columns: Vec<ColumnView>,
}

impl From<&BoardSurface> for BoardView {
    fn from(surface: &BoardSurface) -> Self {
        let columns = surface
            .columns()
            .iter()
            .map(|column| ColumnView {
                status: column.status(),
                label: column.status().label(),
                count: column.displayed_count(),
                cards: column.cards().iter().map(|c| c.view().clone()).collect(),
            })
            .collect();
        Self {
            filter: surface.active_filter().to_string(),
            columns,
        }
    }
}

/// Outcome of a task operation together with what the user was told.
#[derive(Serialize)]
pub struct TaskReport<T: Serialize> {
    pub outcome: T,
    pub notices: Vec<LogEntry>,
}

pub fn output_success<T: Serialize>(data: T) -> anyhow::Result<()> {
    let response = CliResponse {
        success: true,
        api_version: env!("CARGO_PKG_VERSION"),
        data: Some(data),
        error: None,
    };
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

/// Prints an error envelope to stderr and exits with code 1.
pub fn output_error(message: &str) -> ! {
    let response: CliResponse<()> = CliResponse {
        success: false,
        api_version: env!("CARGO_PKG_VERSION"),
        data: None,
        error: Some(message.to_string()),
    };
    match serde_json::to_string(&response) {
        Ok(json) => eprintln!("{}", json),
        Err(_) => eprintln!("{}", message),
    }
    std::process::exit(1);
}
