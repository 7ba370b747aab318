//! `guard <access>`: shows where a view of the given access class would
//! route the current session.

use crate::context::AppContext;
use crate::output;
use anyhow::Result;
use portal_core::guard::{GuardDecision, RouteAccess};
use std::process::ExitCode;

pub fn run(ctx: &AppContext, access: RouteAccess, json: bool) -> Result<ExitCode> {
    let decision = ctx.guard.decide(&ctx.session.state(), access);

    if json {
        output::json(&decision)?;
    } else {
        match &decision {
            GuardDecision::Allow => output::success(&format!("{} view: allowed", access)),
            GuardDecision::Redirect(to) => {
                output::warning(&format!("{} view: redirect to {}", access, to))
            }
            GuardDecision::Pending => output::info(&format!("{} view: pending", access)),
        }
    }
    Ok(ExitCode::SUCCESS)
}
