use kanban_api::HttpTaskApi;
use kanban_board::{BoardPage, LoadReport, SyncSettings};
use kanban_core::{AppConfig, LogEntry};
use kanban_domain::BoardFilter;
use serde::Serialize;
use std::sync::Arc;

use crate::feedback::ConsoleFeedback;
use crate::output::{BoardView, TaskReport};

/// An opened board page wired to the HTTP task API.
pub struct CliContext {
    page: BoardPage,
    feedback: Arc<ConsoleFeedback>,
    load: LoadReport,
}

impl CliContext {
    /// Loads config, applies command-line overrides, and opens the board.
    pub async fn connect(
        api_url: Option<String>,
        filter: Option<String>,
        assume_yes: bool,
    ) -> anyhow::Result<Self> {
        let mut config = AppConfig::load();
        if let Some(url) = api_url {
            config.api_base_url = Some(url);
        }
        let filter = BoardFilter::parse(
            filter
                .as_deref()
                .unwrap_or_else(|| config.effective_default_filter()),
        );

        let api = Arc::new(HttpTaskApi::from_config(&config)?);
        tracing::debug!(base = api.endpoints().base(), %filter, "connecting");

        let feedback = Arc::new(ConsoleFeedback::new(assume_yes));
        let page = BoardPage::new(
            api.clone(),
            api,
            feedback.clone(),
            feedback.clone(),
            SyncSettings::from_config(&config),
        );
        let load = page.open(filter).await;

        Ok(Self {
            page,
            feedback,
            load,
        })
    }

    pub fn page(&self) -> &BoardPage {
        &self.page
    }

    pub fn load_report(&self) -> LoadReport {
        self.load
    }

    pub fn board_view(&self) -> BoardView {
        BoardView::from(&self.page.snapshot())
    }

    pub fn notices(&self) -> Vec<LogEntry> {
        self.feedback.notices()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.feedback.last_alert()
    }

    pub fn report<T: Serialize>(&self, outcome: T) -> TaskReport<T> {
        TaskReport {
            outcome,
            notices: self.notices(),
        }
    }
}
