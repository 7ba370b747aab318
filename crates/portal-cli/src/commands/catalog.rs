//! `catalog ...`: read-only browsing of the study catalog.

use crate::context::AppContext;
use crate::output;
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use portal_core::catalog::{
    Branch, CatalogApi, CatalogFilter, Difficulty, ExamResource, PlacementCategory, ResourceKind,
    Selection, difficulty_breakdown, filter_items,
};
use std::process::ExitCode;

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List engineering branches
    Branches,
    /// List subjects of a branch and semester
    Subjects { branch: String, semester: String },
    /// List notes or previous-year questions for a subject
    Material {
        branch: String,
        semester: String,
        subject_id: String,
        /// notes | pyq
        kind: ResourceKind,
    },
    /// List placement topics
    Topics,
    /// List subtopics of a placement topic
    Subtopics { topic: String },
    /// List questions of a placement subtopic
    Questions {
        topic: String,
        subtopic: String,
        /// Case-insensitive text search
        #[arg(long, default_value = "")]
        search: String,
        /// easy | medium | hard | all
        #[arg(long, default_value = "all")]
        difficulty: Selection<Difficulty>,
    },
    /// Search the shared resource library
    Resources {
        #[arg(long, default_value = "")]
        search: String,
        /// CSE | ECE | ME | CE | EEE | all
        #[arg(long, default_value = "all")]
        branch: Selection<Branch>,
        /// notes | pyq | all
        #[arg(long, default_value = "all")]
        kind: Selection<ResourceKind>,
    },
}

pub async fn run(ctx: &AppContext, command: CatalogCommand, json: bool) -> Result<ExitCode> {
    ctx.require_login()?;
    let api = &ctx.catalog;

    match command {
        CatalogCommand::Branches => {
            let branches = api.branches().await?;
            if json {
                output::json(&branches)?;
            } else {
                for entry in &branches {
                    let name = entry
                        .branch_name
                        .parse::<Branch>()
                        .map(|branch| format!("{} ({})", branch, branch.label()))
                        .unwrap_or_else(|_| entry.branch_name.clone());
                    println!("  {}", name);
                }
            }
        }
        CatalogCommand::Subjects { branch, semester } => {
            let subjects = api.subjects(&branch, &semester).await?;
            if json {
                output::json(&subjects)?;
            } else {
                for subject in &subjects {
                    println!(
                        "  {:<10} {} {}",
                        subject.subject_code.bold(),
                        subject.subject_name,
                        format!("[{}]", subject.id).bright_black()
                    );
                }
            }
        }
        CatalogCommand::Material {
            branch,
            semester,
            subject_id,
            kind,
        } => {
            let material = api
                .exam_resources(&branch, &semester, &subject_id, kind)
                .await?;
            if json {
                output::json(&material)?;
            } else {
                println!("{}", kind.label().bold());
                print_resources(material.iter());
            }
        }
        CatalogCommand::Topics => {
            let topics = api.placement_topics().await?;
            if json {
                output::json(&topics)?;
            } else {
                for topic in &topics {
                    let track = PlacementCategory::for_topic(&topic.topic_name);
                    println!(
                        "  {:<18} {}",
                        topic.topic_name.bold(),
                        track.label().bright_black()
                    );
                    if let Some(description) = &topic.description {
                        println!("  {:<18} {}", "", description);
                    }
                }
            }
        }
        CatalogCommand::Subtopics { topic } => {
            let subtopics = api.placement_subtopics(&topic).await?;
            if json {
                output::json(&subtopics)?;
            } else {
                for subtopic in &subtopics {
                    println!("  {}", subtopic);
                }
            }
        }
        CatalogCommand::Questions {
            topic,
            subtopic,
            search,
            difficulty,
        } => {
            let questions = api.placement_questions(&topic, &subtopic).await?;
            let filter = CatalogFilter::new()
                .with_query(&search)
                .with_difficulty(difficulty);
            let shown = filter_items(&questions, &filter);
            let counts = difficulty_breakdown(&shown);

            if json {
                output::json(&serde_json::json!({
                    "questions": shown,
                    "breakdown": counts,
                }))?;
            } else {
                for question in &shown {
                    println!("  {} {}", badge(question.difficulty), question.question);
                    for link in question.links() {
                        println!("      {}", link.bright_blue());
                    }
                }
                println!(
                    "{}",
                    format!(
                        "{} shown ({} easy, {} medium, {} hard) of {}",
                        counts.total,
                        counts.easy,
                        counts.medium,
                        counts.hard,
                        questions.len()
                    )
                    .bright_black()
                );
            }
        }
        CatalogCommand::Resources { search, branch, kind } => {
            let resources = api.resources().await?;
            let filter = CatalogFilter::new()
                .with_query(&search)
                .with_branch(branch)
                .with_kind(kind);
            let shown = filter_items(&resources, &filter);

            if json {
                output::json(&shown)?;
            } else if shown.is_empty() {
                output::info("No resources match");
            } else {
                print_resources(shown);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_resources<'a>(items: impl IntoIterator<Item = &'a ExamResource>) {
    for item in items {
        println!(
            "  {} {} {}",
            item.title.bold(),
            format!("[{} {}]", item.branch, item.kind).bright_black(),
            item.download_url
                .as_deref()
                .unwrap_or("(no download)")
                .bright_blue()
        );
    }
}

fn badge(difficulty: Difficulty) -> colored::ColoredString {
    let label = format!("{:<6}", difficulty.label());
    match difficulty {
        Difficulty::Easy => label.green(),
        Difficulty::Medium => label.yellow(),
        Difficulty::Hard => label.red(),
    }
}
