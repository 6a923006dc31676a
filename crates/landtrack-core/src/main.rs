//! `landtrack` command line: lot, plan and project progress from a JSON bundle.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use landtrack_core::prelude::*;
use landtrack_core::ProjectReport;
use landtrack_progress::SectionResult;
use landtrack_snapshot::{LotId, PlanId, ProjectId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let bundle = Arg::new("bundle")
        .long("bundle")
        .short('b')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON bundle of projects, plans and lot snapshots");

    Command::new("landtrack")
        .version(landtrack_core::VERSION)
        .about("Land acquisition progress for lots, plans and projects")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Engine configuration (TOML)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand(
            Command::new("lot")
                .about("Progress of a single lot")
                .arg(bundle.clone())
                .arg(
                    Arg::new("lot")
                        .long("lot")
                        .required(true)
                        .value_parser(value_parser!(u64))
                        .help("Lot id"),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Progress of a plan and its lots")
                .arg(bundle.clone())
                .arg(
                    Arg::new("plan")
                        .long("plan")
                        .required(true)
                        .value_parser(value_parser!(u64))
                        .help("Plan id"),
                )
                .arg(
                    Arg::new("phase")
                        .long("phase")
                        .action(ArgAction::Append)
                        .value_parser(value_parser!(LotPhase))
                        .help("Only fold lots in this phase (repeatable)"),
                )
                .arg(
                    Arg::new("min")
                        .long("min")
                        .value_parser(value_parser!(u8).range(0..=100))
                        .help("Only fold lots at or above this percentage"),
                )
                .arg(
                    Arg::new("max")
                        .long("max")
                        .value_parser(value_parser!(u8).range(0..=100))
                        .help("Only fold lots at or below this percentage"),
                ),
        )
        .subcommand(
            Command::new("project")
                .about("Progress of a project and its plans")
                .arg(bundle)
                .arg(
                    Arg::new("project")
                        .long("project")
                        .required(true)
                        .value_parser(value_parser!(u64))
                        .help("Project id"),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => EngineConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let json = matches.get_flag("json");

    match matches.subcommand() {
        Some(("lot", args)) => {
            let service = service(args, config).await?;
            let lot_id = LotId::new(*args.get_one::<u64>("lot").context("missing --lot")?);
            let lot = service.lot_progress(lot_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&lot)?);
            } else {
                print_lot(&lot);
            }
        }
        Some(("plan", args)) => {
            let service = service(args, config).await?;
            let plan_id = PlanId::new(*args.get_one::<u64>("plan").context("missing --plan")?);
            let filter = LotFilter::new()
                .with_phases(args.get_many::<LotPhase>("phase").into_iter().flatten().copied())
                .with_percent_range(
                    args.get_one::<u8>("min").copied(),
                    args.get_one::<u8>("max").copied(),
                );

            let report = service.plan_report_filtered(plan_id, &filter).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_plan(&report);
            }
        }
        Some(("project", args)) => {
            let service = service(args, config).await?;
            let project_id = ProjectId::new(
                *args
                    .get_one::<u64>("project")
                    .context("missing --project")?,
            );
            let report = service.project_report(project_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_project(&report);
            }
        }
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}

async fn service(args: &ArgMatches, config: EngineConfig) -> Result<ProgressService<InMemorySource>> {
    let path = args
        .get_one::<PathBuf>("bundle")
        .context("missing --bundle")?;
    let source = InMemorySource::load(path)
        .await
        .with_context(|| format!("loading bundle {}", path.display()))?;
    Ok(ProgressService::with_config(Arc::new(source), config))
}

fn print_lot(lot: &LotProgress) {
    let label = if lot.lot_number.is_empty() {
        lot.lot_id.to_string()
    } else {
        lot.lot_number.clone()
    };
    println!("Lot {label} (plan {}): {}", lot.plan_id, format_message(lot));
    println!("  Phase: {}", lot.status);
    println!("  Next:  {}", next_action(&lot.sections));
    for section in &lot.sections {
        print_section(section);
    }
}

fn print_section(section: &SectionResult) {
    let percent = section.completeness * 100.0;
    if section.missing.is_empty() {
        println!("    {:<14} {:<12} {percent:>5.1}%", section.name(), section.status.as_str());
    } else {
        println!(
            "    {:<14} {:<12} {percent:>5.1}%  missing: {}",
            section.name(),
            section.status.as_str(),
            section.missing.join(", ")
        );
    }
}

fn print_plan(report: &PlanReport) {
    let plan = &report.plan;
    println!(
        "Plan {}: {}% ({}), {}/{} lots completed",
        plan.plan_id, plan.progress, plan.status, plan.completed_count, plan.total_count
    );
    for lot in &report.lots {
        println!(
            "  Lot {:<8} {:>3}%  {:<14} {}",
            lot.lot_id.get(),
            lot.overall_percent,
            lot.status.as_str(),
            lot.status_message
        );
    }
    println!("  Phases:");
    for (phase, count) in report.distribution.iter() {
        println!("    {:<14} {count}", phase.as_str());
    }
}

fn print_project(report: &ProjectReport) {
    let project = &report.project;
    println!(
        "Project {}: {}% ({}), {}/{} plans completed",
        project.project_id,
        project.progress,
        project.status,
        project.completed_count,
        project.total_count
    );
    for plan in &report.plans {
        println!(
            "  Plan {:<8} {:>3}%  {:<12} {}/{} lots",
            plan.plan_id.get(),
            plan.progress,
            plan.status.as_str(),
            plan.completed_count,
            plan.total_count
        );
    }
}
