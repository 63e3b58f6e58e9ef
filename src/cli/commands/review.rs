use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::core::workflow::{ReviewAction, WorkflowLogic};
use crate::errors::AppResult;
use crate::models::report::LeaveRow;
use crate::ui::render::{self, emit};

/// Handle pm-pending / pm-approve / pm-deny / admin-approve / admin-deny
pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    if matches!(cmd, Commands::PmPending) {
        let mut pool = ctx.open()?;
        let rows: Vec<LeaveRow> = WorkflowLogic::pending_requests(&mut pool)?
            .into_iter()
            .map(|(r, username)| LeaveRow {
                request_id: r.id,
                user_id: r.user_id,
                username,
                start_date: r.start_date,
                end_date: r.end_date,
                requested_days: r.requested_days,
                reason: r.reason,
                created_at: r.created_at,
            })
            .collect();
        return emit(ctx.json, &rows, render::pending);
    }

    let (id, action, reason) = match cmd {
        Commands::PmApprove { request_id } => (*request_id, ReviewAction::PmApprove, None),
        Commands::PmDeny { request_id, reason } => (*request_id, ReviewAction::PmReject, reason.as_deref()),
        Commands::AdminApprove { request_id } => (*request_id, ReviewAction::AdminApprove, None),
        Commands::AdminDeny { request_id, reason } => {
            (*request_id, ReviewAction::AdminReject, reason.as_deref())
        }
        _ => return Ok(()),
    };

    let (mut pool, actor) = ctx.open_as_actor()?;
    let r = WorkflowLogic::review(&mut pool, id, action, &actor.id, reason, ctx.now)?;
    emit(ctx.json, &r, render::reviewed)
}
