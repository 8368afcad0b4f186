use crate::cli::{TaskAction, TaskCreateArgs};
use crate::context::CliContext;
use crate::output;
use kanban_board::{DeleteOutcome, MoveResolution};
use kanban_core::KanbanError;
use kanban_domain::QuickTaskForm;

pub async fn handle(ctx: &CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Create(args) => match ctx.page().submit_quick_add(form_from(args)).await {
            Ok(outcome) => output::output_success(ctx.report(outcome)),
            Err(e) => fail(ctx, &e),
        },
        TaskAction::Move { id, to } => match ctx.page().move_task(id, to).await? {
            None => output::output_success(ctx.report(serde_json::json!({
                "task_id": id,
                "status": to,
                "result": "unchanged",
            }))),
            Some(MoveResolution::RolledBack { message, .. }) => output::output_error(&message),
            Some(resolution) => output::output_success(ctx.report(resolution)),
        },
        TaskAction::Delete { id, .. } => match ctx.page().activate_delete(id).await {
            Ok(outcome) => {
                if outcome == DeleteOutcome::Cancelled {
                    tracing::info!(task_id = id, "delete declined");
                }
                output::output_success(ctx.report(outcome))
            }
            Err(e) => fail(ctx, &e),
        },
    }
}

fn form_from(args: TaskCreateArgs) -> QuickTaskForm {
    QuickTaskForm {
        title: args.title,
        assignee: args.assignee,
        priority: args.priority,
        status: args.status,
        estimate_hours: args.estimate,
        due_date: args.due,
        sprint_id: args.sprint,
    }
}

/// Reports the alert the user was shown, or the error itself when there was none.
fn fail(ctx: &CliContext, error: &KanbanError) -> ! {
    let message = ctx.last_alert().unwrap_or_else(|| error.user_message());
    output::output_error(&message)
}
