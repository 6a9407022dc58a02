//! studypath CLI - learning goal tracker.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::Level;

use studypath_core::{DurationUnit, EstimatedDuration, GoalId, GoalSpec, GoalStatus, MilestoneId};
use studypath_engine::GoalService;
use studypath_ledger::{current_streak, weekly_velocity, JsonLedger, ProgressLedger};
use studypath_plan::builtin_plan;
use studypath_storage::JsonStore;

#[derive(Parser)]
#[command(name = "studypath")]
#[command(about = "Learning goal tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new goal with a generated milestone plan
    Add {
        /// Goal title
        title: String,
        /// Subject category (programming, language, music, ...)
        #[arg(long, default_value = "general")]
        category: String,
        /// Estimated duration
        #[arg(long, default_value = "4")]
        duration: u32,
        /// Duration unit (weeks or months)
        #[arg(long, default_value = "weeks")]
        unit: String,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List goals
    List,
    /// Show a goal and its milestones
    Show {
        /// Goal ID
        id: String,
    },
    /// Complete a milestone
    Complete {
        /// Goal ID
        goal: String,
        /// Milestone ID
        milestone: String,
    },
    /// Replace a milestone's dependencies
    Deps {
        /// Goal ID
        goal: String,
        /// Milestone ID
        milestone: String,
        /// Dependency milestone IDs
        dependencies: Vec<String>,
    },
    /// Show progress, streak, and velocity for a goal
    Stats {
        /// Goal ID
        goal: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let data_dir = std::path::PathBuf::from(".studypath");
    let storage = JsonStore::new(&data_dir).await?;
    let ledger: Arc<dyn ProgressLedger> =
        Arc::new(JsonLedger::new(data_dir.join("ledger.jsonl")).await?);
    let service = GoalService::new(storage).with_ledger(ledger.clone());

    match cli.command {
        Commands::Add {
            title,
            category,
            duration,
            unit,
            description,
        } => {
            let unit = parse_unit(&unit)?;
            let spec = GoalSpec {
                title,
                description,
                category: Some(category.clone()),
                estimated_duration: Some(EstimatedDuration {
                    value: duration,
                    unit,
                }),
                milestones: builtin_plan(&category),
            };

            let goal = service.create_goal(spec).await?;
            println!(
                "Added goal: {} - {} ({} milestones)",
                goal.id,
                goal.title,
                goal.milestones.len()
            );
        }
        Commands::List => {
            let goals = service.goals().await?;

            println!("Goals ({})", goals.len());
            for goal in goals {
                println!(
                    "  {} | {} | {:>3}% | {}",
                    goal.id,
                    format_status(goal.status),
                    goal.progress,
                    goal.title,
                );
            }
        }
        Commands::Show { id } => {
            let goal = service.goal(parse_goal_id(&id)?).await?;

            println!("Goal: {}", goal.id);
            println!("  Title: {}", goal.title);
            println!("  Category: {}", goal.category);
            println!("  Status: {}", format_status(goal.status));
            println!(
                "  Progress: {}% ({}/{} milestones)",
                goal.progress,
                goal.completed_milestones,
                goal.milestones.len()
            );
            println!("  Milestones:");
            for milestone in goal.ordered_milestones() {
                let marker = if milestone.is_completed {
                    "DONE"
                } else if studypath_engine::is_blocked(&goal, milestone) {
                    "BLOCKED"
                } else {
                    "READY"
                };
                println!(
                    "    {:>2}. [{:<7}] {} - {}",
                    milestone.order, marker, milestone.id, milestone.title
                );
            }
        }
        Commands::Complete { goal, milestone } => {
            let goal = service
                .complete_milestone(parse_goal_id(&goal)?, parse_milestone_id(&milestone)?)
                .await?;

            println!("Milestone completed. Progress: {}%", goal.progress);
            if goal.status == GoalStatus::Completed {
                println!("Goal '{}' completed!", goal.title);
            }
        }
        Commands::Deps {
            goal,
            milestone,
            dependencies,
        } => {
            let dependencies = dependencies
                .iter()
                .map(|d| parse_milestone_id(d))
                .collect::<Result<Vec<_>>>()?;

            let milestone = service
                .set_dependencies(
                    parse_goal_id(&goal)?,
                    parse_milestone_id(&milestone)?,
                    &dependencies,
                )
                .await?;
            println!(
                "Milestone '{}' now has {} dependencies",
                milestone.title,
                milestone.dependencies.len()
            );
        }
        Commands::Stats { goal } => {
            let goal = service.goal(parse_goal_id(&goal)?).await?;
            let entries = ledger.entries_for(goal.id).await?;

            let now = Utc::now();
            println!("Stats for '{}'", goal.title);
            println!("  Status: {}", format_status(goal.status));
            println!("  Progress: {}%", goal.progress);
            println!("  Streak: {} days", current_streak(&entries, now.date_naive()));
            println!(
                "  Velocity: {:.1} milestones/week",
                weekly_velocity(&entries, now)
            );
        }
    }

    Ok(())
}

fn parse_goal_id(s: &str) -> Result<GoalId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid goal ID: {}", s))
}

fn parse_milestone_id(s: &str) -> Result<MilestoneId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid milestone ID: {}", s))
}

fn parse_unit(s: &str) -> Result<DurationUnit> {
    match s.to_lowercase().as_str() {
        "weeks" | "week" | "w" => Ok(DurationUnit::Weeks),
        "months" | "month" | "m" => Ok(DurationUnit::Months),
        _ => Err(anyhow::anyhow!("Unknown duration unit: {}", s)),
    }
}

fn format_status(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::Planning => "PLANNING",
        GoalStatus::Active => "ACTIVE",
        GoalStatus::Paused => "PAUSED",
        GoalStatus::Completed => "COMPLETED",
        GoalStatus::Cancelled => "CANCELLED",
    }
}
