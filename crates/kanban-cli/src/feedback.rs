use kanban_core::{Confirm, LogEntry, Loggable, NoticeLevel, Notifier};
use parking_lot::Mutex;
use std::io::{BufRead, Write};

#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: Vec<LogEntry>,
}

impl Loggable for NoticeLog {
    fn add_log(&mut self, level: NoticeLevel, message: String) {
        self.entries.push(LogEntry::new(level, message));
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.entries
    }
}

/// Terminal stand-in for the page's toasts and confirmation dialog.
pub struct ConsoleFeedback {
    log: Mutex<NoticeLog>,
    assume_yes: bool,
}

impl ConsoleFeedback {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            log: Mutex::new(NoticeLog::default()),
            assume_yes,
        }
    }

    pub fn notices(&self) -> Vec<LogEntry> {
        self.log.lock().get_logs().to_vec()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.log
            .lock()
            .get_logs()
            .iter()
            .rev()
            .find(|entry| entry.level == NoticeLevel::Error)
            .map(|entry| entry.message.clone())
    }
}

impl Notifier for ConsoleFeedback {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
        self.log.lock().add_log(NoticeLevel::Success, message.to_string());
    }

    fn alert(&self, message: &str) {
        tracing::debug!("alert: {}", message);
        self.log.lock().add_log(NoticeLevel::Error, message.to_string());
    }
}

impl Confirm for ConsoleFeedback {
    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{} [y/N] ", question);
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "could not read confirmation");
                false
            }
        }
    }
}
