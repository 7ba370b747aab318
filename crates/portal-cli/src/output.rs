//! Terminal output helpers.

use colored::Colorize;
use serde::Serialize;

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", "!".yellow().bold(), message);
}

pub fn info(message: &str) {
    println!("{} {}", "i".blue().bold(), message);
}

/// Label/value line used by `status` and `whoami`.
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<14} {}", format!("{}:", label).bright_black(), value);
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Reads a password from the terminal without echoing it.
pub fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    Ok(rpassword::prompt_password(prompt)?)
}
