use std::error::Error;
use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use gantt_schedule::graph::dot::render_dot;
use gantt_schedule::logging::{self, LogLevel};
use gantt_schedule::{
    EntryKind, Schedule, ScheduledEntry, load_plan_from_json, save_entries_to_csv,
    save_entries_to_json, write_entries_csv,
};

#[derive(Debug, Parser)]
#[command(
    name = "gantt-schedule",
    version,
    about = "Compute earliest start/finish dates for a dependency graph of tasks and milestones.",
    long_about = None
)]
struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GANTT_SCHEDULE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the schedule for a project plan (JSON).
    Compute {
        plan: PathBuf,
        /// Override the plan's project start date (YYYY-MM-DD).
        #[arg(long, value_name = "DATE")]
        start: Option<NaiveDate>,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
        /// Write to this file instead of stdout (json and csv only).
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Validate records and check the dependency graph for cycles.
    Check { plan: PathBuf },
    /// Print the dependency graph in Graphviz DOT format.
    Graph { plan: PathBuf },
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn entry_kind_label(kind: EntryKind) -> String {
    match kind {
        EntryKind::Task(id) => format!("task {id}"),
        EntryKind::Milestone(id) => format!("milestone {id}"),
    }
}

fn render_entries_as_text_table(entries: &[ScheduledEntry]) -> String {
    let col_names = ["kind", "label", "category", "start", "finish", "days"];
    let rows: Vec<[String; 6]> = entries
        .iter()
        .map(|entry| {
            [
                entry_kind_label(entry.kind),
                entry.label.clone(),
                entry.category.clone(),
                entry.start.to_string(),
                entry.finish.to_string(),
                entry.duration_days().to_string(),
            ]
        })
        .collect();

    // Compute column widths
    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    // Build horizontal separator
    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let push_row = |out: &mut String, cells: &[&str]| {
        out.push('|');
        for (ci, cell) in cells.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            let pad = widths[ci].saturating_sub(cell.chars().count());
            out.push_str(&" ".repeat(pad));
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &col_names[..]);
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_row(&mut out, &cells);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn compute(
    plan: PathBuf,
    start: Option<NaiveDate>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let mut plan = load_plan_from_json(&plan)?;
    if let Some(start) = start {
        plan.metadata.project_start_date = start;
    }
    let schedule: Schedule = plan.schedule()?;

    match (format, output) {
        (OutputFormat::Table, None) => {
            println!("{}", plan.metadata.project_name);
            print!("{}", render_entries_as_text_table(schedule.entries()));
            println!("{}", schedule.summary().to_cli_summary());
        }
        (OutputFormat::Table, Some(_)) => {
            return Err("--output requires --format json or --format csv".into());
        }
        (OutputFormat::Json, None) => {
            println!("{}", serde_json::to_string_pretty(schedule.entries())?);
        }
        (OutputFormat::Json, Some(path)) => {
            save_entries_to_json(schedule.entries(), &path)?;
            println!("Schedule written to {}", path.display());
        }
        (OutputFormat::Csv, None) => {
            write_entries_csv(schedule.entries(), io::stdout().lock())?;
        }
        (OutputFormat::Csv, Some(path)) => {
            save_entries_to_csv(schedule.entries(), &path)?;
            println!("Schedule written to {}", path.display());
        }
    }
    Ok(())
}

fn check(plan: PathBuf) -> Result<(), Box<dyn Error>> {
    let plan = load_plan_from_json(&plan)?;
    let graph = plan.check()?;
    println!(
        "ok: {} tasks, {} milestones",
        graph.len(),
        plan.milestones.len()
    );
    Ok(())
}

fn graph(plan: PathBuf) -> Result<(), Box<dyn Error>> {
    let plan = load_plan_from_json(&plan)?;
    let graph = plan.check()?;
    print!("{}", render_dot(&graph));
    Ok(())
}

fn run(args: CliArgs) -> Result<(), Box<dyn Error>> {
    match args.command {
        Command::Compute {
            plan,
            start,
            format,
            output,
        } => compute(plan, start, format, output),
        Command::Check { plan } => check(plan),
        Command::Graph { plan } => graph(plan),
    }
}

fn main() {
    let args = CliArgs::parse();
    logging::init_logging(args.log_level);
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
