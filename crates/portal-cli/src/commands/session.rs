//! `login`, `register`, `logout`, `whoami` and `status`.

use crate::context::AppContext;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use portal_core::session::{AuthOutcome, SessionPhase};
use serde::Serialize;
use std::io::BufRead;
use std::process::ExitCode;

/// Where the password comes from. Without a flag or the environment
/// variable, it is prompted for on the terminal.
#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Password (visible in shell history; prefer the prompt)
    #[arg(long, env = "STUDYPORTAL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long, conflicts_with = "password")]
    pub password_stdin: bool,
}

impl PasswordArgs {
    pub fn resolve(self) -> Result<String> {
        if let Some(password) = self.password {
            return Ok(password);
        }
        if self.password_stdin {
            return read_first_line(std::io::stdin().lock());
        }
        output::prompt_password("Password: ")
    }
}

fn read_first_line(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(
    ctx: &AppContext,
    email: &str,
    password: PasswordArgs,
    json: bool,
) -> Result<ExitCode> {
    let password = password.resolve()?;
    let outcome = ctx.session.login(email, &password).await;
    report(ctx, &outcome, "Logged in", json)
}

pub async fn register(
    ctx: &AppContext,
    name: &str,
    email: &str,
    password: PasswordArgs,
    json: bool,
) -> Result<ExitCode> {
    let password = password.resolve()?;
    let outcome = ctx.session.register(name, email, &password).await;
    report(ctx, &outcome, "Account created", json)
}

pub async fn logout(ctx: &AppContext, json: bool) -> Result<ExitCode> {
    let was_authenticated = ctx.session.state().is_authenticated();
    ctx.session.logout().await;

    if json {
        output::json(&AuthOutcome::success())?;
    } else if was_authenticated {
        output::success("Logged out");
    } else {
        output::info("No active session");
    }
    Ok(ExitCode::SUCCESS)
}

pub fn whoami(ctx: &AppContext, json: bool) -> Result<ExitCode> {
    let state = ctx.session.state();
    let Some(user) = state.user() else {
        output::error("Not logged in");
        return Ok(ExitCode::FAILURE);
    };

    if json {
        output::json(user)?;
    } else {
        output::field("Name", &user.name);
        output::field("Email", &user.email);
        output::field("ID", &user.id);
    }
    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct StatusReport<'a> {
    phase: SessionPhase,
    user: Option<&'a portal_core::user::UserProfile>,
    api_base_url: &'a str,
    credentials_file: Option<String>,
}

pub fn status(ctx: &AppContext, json: bool) -> Result<ExitCode> {
    let state = ctx.session.state();
    let report = StatusReport {
        phase: state.phase(),
        user: state.user(),
        api_base_url: &ctx.config.api.base_url,
        credentials_file: ctx
            .credentials_path
            .as_ref()
            .map(|path| path.display().to_string()),
    };

    if json {
        output::json(&report)?;
        return Ok(ExitCode::SUCCESS);
    }

    let phase = match report.phase {
        SessionPhase::Authenticated => "authenticated",
        SessionPhase::Unauthenticated => "signed out",
        SessionPhase::Bootstrapping => "starting",
        SessionPhase::Disposed => "closed",
    };
    output::field("Session", phase);
    if let Some(user) = report.user {
        output::field("User", format!("{} <{}>", user.name, user.email));
    }
    output::field("API", report.api_base_url);
    output::field(
        "Credentials",
        report.credentials_file.as_deref().unwrap_or("(memory only)"),
    );
    Ok(ExitCode::SUCCESS)
}

fn report(ctx: &AppContext, outcome: &AuthOutcome, done: &str, json: bool) -> Result<ExitCode> {
    if json {
        output::json(outcome)?;
    } else if outcome.success {
        let name = ctx
            .session
            .state()
            .user()
            .map(|user| user.name.clone())
            .unwrap_or_default();
        output::success(&format!("{} as {}", done, name));
    } else {
        output::error(outcome.message().unwrap_or("Request failed"));
    }

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
