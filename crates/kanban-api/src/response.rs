use kanban_core::KanbanError;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Builds the error for a non-2xx response.
///
/// The body's `error` field wins, then `message`; a body without either
/// yields `fallback` together with the HTTP status.
pub fn error_from_body(status: u16, body: &str, fallback: &str) -> KanbanError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .error
        .or(parsed.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("{} (HTTP {})", fallback, status));
    KanbanError::Server { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: KanbanError) -> String {
        match err {
            KanbanError::Server { message, .. } => message,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_field_is_verbatim() {
        let err = error_from_body(400, r#"{"error": "Task title is required"}"#, "Request failed");
        assert_eq!(message(err), "Task title is required");
    }

    #[test]
    fn test_message_field_used_when_no_error() {
        let err = error_from_body(404, r#"{"message": "gone"}"#, "Request failed");
        assert_eq!(message(err), "gone");
    }

    #[test]
    fn test_fallback_for_unusable_bodies() {
        for body in ["", "<html>oops</html>", "{}", r#"{"error": "  "}"#, "[1,2]"] {
            let err = error_from_body(500, body, "Unknown server error during creation.");
            assert_eq!(
                message(err),
                "Unknown server error during creation. (HTTP 500)"
            );
        }
    }

    #[test]
    fn test_status_is_kept() {
        let err = error_from_body(503, "", "Request failed");
        assert!(matches!(err, KanbanError::Server { status: 503, .. }));
    }
}
