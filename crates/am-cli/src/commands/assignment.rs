//! Assignment commands
//!
//! List, show, create, duplicate, delete and reorder stored assignments.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use am_core::assignment::{subsection_letter, Assignment, MoveDirection, EXAMPLE_LOADED_MESSAGE};

use super::AppContext;

/// Arguments for `list`
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `show`
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Assignment ID
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `new`
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Course code, e.g. ENG6
    #[arg(long)]
    pub course: Option<String>,

    /// Assignment title
    #[arg(long)]
    pub title: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due_date: Option<NaiveDate>,

    /// Due time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    pub due_time: Option<NaiveTime>,

    /// Preamble text
    #[arg(long)]
    pub preamble: Option<String>,

    /// Start from an assignment JSON document; every id is regenerated
    #[arg(long, value_name = "FILE")]
    pub from_template: Option<PathBuf>,
}

/// Arguments for `duplicate`
#[derive(Debug, Args)]
pub struct DuplicateArgs {
    /// Assignment ID
    pub id: String,
}

/// Arguments for `delete`
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Assignment ID
    pub id: String,

    /// Skip confirmation
    #[arg(long, short)]
    pub yes: bool,
}

/// Direction for `move-problem`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

/// Arguments for `move-problem`
#[derive(Debug, Args)]
pub struct MoveProblemArgs {
    /// Assignment ID
    pub id: String,

    /// Problem number (1-based)
    pub problem: usize,

    /// Direction to move
    #[arg(value_enum)]
    pub direction: Direction,
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {}", e))
}

pub fn list(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let manager = ctx.manager()?;
    let assignments = manager.list()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assignments)?);
        return Ok(());
    }

    if assignments.is_empty() {
        println!("No assignments found. Run '{}' to add one.", "assignment-maker example".cyan());
        return Ok(());
    }

    println!("{}", "Assignments:".bold().underline());
    println!();

    for a in &assignments {
        println!(
            "  {} {} {}",
            a.course_code.cyan(),
            a.title.bold(),
            a.id.to_string().dimmed()
        );
        println!(
            "    Due: {}  Problems: {}  Points: {}",
            due_label(a),
            a.problems.len().to_string().yellow(),
            a.total_points().to_string().green()
        );
    }

    Ok(())
}

pub fn show(ctx: &AppContext, args: ShowArgs) -> Result<()> {
    let manager = ctx.manager()?;
    let assignment = manager.require(&args.id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assignment)?);
        return Ok(());
    }

    println!("{}", "Assignment Details".bold().underline());
    println!();
    println!("  ID: {}", assignment.id.to_string().green());
    println!("  Course: {}", assignment.course_code);
    println!("  Title: {}", assignment.title);
    println!("  Due: {}", due_label(&assignment));
    println!("  Total points: {}", assignment.total_points().to_string().yellow());
    if !assignment.preamble.is_empty() {
        println!();
        println!("{}", "Preamble".bold());
        for line in assignment.preamble.lines() {
            println!("  {}", line);
        }
    }

    for (i, problem) in assignment.problems.iter().enumerate() {
        println!();
        println!(
            "{} {} [{} pts]",
            format!("Problem {}:", i + 1).bold(),
            problem.name,
            problem.total_points()
        );
        for (j, sub) in problem.subsections.iter().enumerate() {
            let mut kind = sub.submission_type.label().to_string();
            if sub.submission_type.is_image() {
                kind.push_str(&format!(", max {} images", sub.effective_max_images()));
            }
            println!(
                "  ({}) {} [{} pts] {}",
                subsection_letter(j),
                sub.name,
                sub.points,
                kind.dimmed()
            );
        }
    }

    Ok(())
}

pub fn create(ctx: &AppContext, args: NewArgs) -> Result<()> {
    let manager = ctx.manager()?;

    let mut assignment = match &args.from_template {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            manager.draft_from_template(&json)?
        }
        None => Assignment::new("", ""),
    };

    if let Some(course) = args.course {
        assignment.course_code = course;
    }
    if let Some(title) = args.title {
        assignment.title = title;
    }
    if let Some(date) = args.due_date {
        assignment.due_date = Some(date);
    }
    if let Some(time) = args.due_time {
        assignment.due_time = Some(time);
    }
    if let Some(preamble) = args.preamble {
        assignment.preamble = preamble;
    }

    manager.create(&mut assignment)?;

    println!(
        "{} Created {} {} ({})",
        "✓".green(),
        assignment.course_code,
        assignment.title,
        assignment.id.to_string().cyan()
    );
    Ok(())
}

pub fn example(ctx: &AppContext) -> Result<()> {
    let manager = ctx.manager()?;
    let example = manager.seed_example(Local::now().date_naive())?;

    println!("{} {}", "✓".green(), EXAMPLE_LOADED_MESSAGE);
    println!("  ID: {}", example.id.to_string().cyan());
    Ok(())
}

pub fn duplicate(ctx: &AppContext, args: DuplicateArgs) -> Result<()> {
    let manager = ctx.manager()?;
    let copy = manager.duplicate(&args.id)?;

    println!(
        "{} Saved '{}' as {}",
        "✓".green(),
        copy.title,
        copy.id.to_string().cyan()
    );
    Ok(())
}

pub fn delete(ctx: &AppContext, args: DeleteArgs) -> Result<()> {
    let manager = ctx.manager()?;
    let assignment = manager.require(&args.id)?;

    if !args.yes {
        use dialoguer::Confirm;

        println!("Assignment: {} {}", assignment.course_code, assignment.title.green());
        println!(
            "  {} problems, {} points",
            assignment.problems.len(),
            assignment.total_points()
        );

        let confirmed = Confirm::new()
            .with_prompt("Delete this assignment?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    manager.delete(&args.id)?;
    println!("{} Assignment '{}' deleted.", "✓".green(), args.id.trim());
    Ok(())
}

pub fn move_problem(ctx: &AppContext, args: MoveProblemArgs) -> Result<()> {
    let manager = ctx.manager()?;
    let index = args
        .problem
        .checked_sub(1)
        .context("Problem numbers start at 1")?;

    if manager.move_problem(&args.id, index, args.direction.into())? {
        println!("{} Moved problem {} {:?}.", "✓".green(), args.problem, args.direction);
    } else {
        println!("{} Problem {} cannot move {:?}.", "⚠".yellow(), args.problem, args.direction);
    }
    Ok(())
}

fn due_label(assignment: &Assignment) -> String {
    let date = assignment.due_date_label();
    if date.is_empty() {
        return "not set".to_string();
    }
    format!("{} {}", date, assignment.due_time_label())
        .trim_end()
        .to_string()
}
