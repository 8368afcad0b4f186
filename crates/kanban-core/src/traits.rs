/// Surfaces outcomes to the user. `alert` is the blocking error dialog.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn alert(&self, message: &str);
}

/// Asks the user a yes/no question before a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}
