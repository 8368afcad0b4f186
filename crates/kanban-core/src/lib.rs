pub mod config;
pub mod error;
pub mod logging;
pub mod traits;

pub use config::AppConfig;
pub use error::{KanbanError, KanbanResult};
pub use logging::{LogEntry, Loggable, NoticeLevel};
pub use traits::{Confirm, Notifier};
