use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use kanban_board::LoadReport;

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Show => {
            if ctx.load_report() == LoadReport::Failed {
                tracing::warn!("task list unavailable, showing an empty board");
            }
            output::output_success(ctx.board_view())
        }
    }
}
