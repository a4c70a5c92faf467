//! u-timetable CLI - generate, filter, and page course timetables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_timetable::codec::{self, DEFAULT_INDENT};
use u_timetable::config::PlannerConfig;
use u_timetable::filtering::{FilterDescriptor, FilterKind, FilterSession};
use u_timetable::generator::Planner;
use u_timetable::models::{Catalog, PriorityMap, Schedule};
use u_timetable::pager::Pager;

#[derive(Parser)]
#[command(name = "u-timetable")]
#[command(about = "Course timetable generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate ranked schedules from a catalog and priorities
    Generate {
        /// Text catalog file
        #[arg(long, required_unless_present = "schedules", conflicts_with = "schedules")]
        catalog: Option<PathBuf>,
        /// Previously written schedules JSON to rescore instead of generating
        #[arg(long)]
        schedules: Option<PathBuf>,
        /// Priority map JSON file (course -> level, 0 = mandatory)
        #[arg(long)]
        priorities: PathBuf,
        /// Filter descriptor JSON file
        #[arg(long)]
        filters: Option<PathBuf>,
        /// Keep at most this many schedules (0 = no limit)
        #[arg(long)]
        max_results: Option<usize>,
        /// Page to print (0-based)
        #[arg(long, default_value = "0")]
        page: usize,
        /// Schedules per page
        #[arg(long)]
        page_size: Option<usize>,
        /// Write the filtered schedules as JSON
        #[arg(long)]
        output: Option<PathBuf>,
        /// Indent the JSON output
        #[arg(long)]
        expanded: bool,
        /// Print the course/section listing of matching schedule N
        #[arg(long)]
        show: Option<usize>,
    },
    /// List the available filter kinds
    FilterKinds,
    /// Rewrite a JSON file without whitespace
    Minify {
        input: PathBuf,
        output: PathBuf,
    },
    /// Rewrite a JSON file with indentation
    Expand {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_INDENT)]
        indent: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            catalog,
            schedules,
            priorities,
            filters,
            max_results,
            page,
            page_size,
            output,
            expanded,
            show,
        } => {
            let mut config = PlannerConfig::default();
            match max_results {
                Some(0) => config = config.unlimited(),
                Some(max) => config = config.with_max_results(max),
                None => {}
            }
            if let Some(size) = page_size {
                config = config.with_page_size(size);
            }

            let priorities: PriorityMap = codec::read_json(&priorities)
                .with_context(|| format!("reading priorities {}", priorities.display()))?;
            let planner = Planner::new(config.clone());

            let schedules = match (catalog, schedules) {
                (_, Some(path)) => {
                    let saved: Vec<Schedule> = codec::read_json(&path)
                        .with_context(|| format!("reading schedules {}", path.display()))?;
                    planner.replan(&saved, &priorities)
                }
                (Some(path), None) => {
                    let catalog = Catalog::load(&path)
                        .with_context(|| format!("reading catalog {}", path.display()))?;
                    planner.plan(&catalog, &priorities).map_err(|errors| {
                        let lines: Vec<String> =
                            errors.iter().map(ToString::to_string).collect();
                        anyhow::anyhow!("invalid catalog:\n  {}", lines.join("\n  "))
                    })?
                }
                (None, None) => anyhow::bail!("either --catalog or --schedules is required"),
            };

            let session = match filters {
                Some(path) => {
                    let descriptors: Vec<FilterDescriptor> = codec::read_json(&path)
                        .with_context(|| format!("reading filters {}", path.display()))?;
                    FilterSession::from_descriptors(descriptors)?
                }
                None => FilterSession::new(),
            };
            let filtered = session.apply(&schedules);
            info!(
                schedules = schedules.len(),
                filtered = filtered.len(),
                filters = session.len(),
                "schedules ready"
            );

            if let Some(best) = schedules.first() {
                let optimal = schedules
                    .iter()
                    .filter(|s| s.score() == best.score())
                    .count();
                println!(
                    "There are {} schedules; {} of them are optimal.",
                    schedules.len(),
                    optimal
                );
            } else {
                println!("There are no schedules.");
            }
            if session.is_empty() {
                println!("No active filters");
            } else {
                println!("Active filters\n{session}");
            }

            let pager = Pager::new(config.page_size);
            let current = pager.page(&filtered, page);
            println!("\n{}\n", current.heading());
            print!("{}", current.render());

            if let Some(n) = show {
                let schedule = filtered.get(n).with_context(|| {
                    format!("no matching schedule #{n} ({} available)", filtered.len())
                })?;
                println!("Sections of schedule #{n}:\n{}", schedule.registration_listing());
            }

            if let Some(path) = output {
                let owned: Vec<Schedule> = filtered.into_iter().cloned().collect();
                codec::write_json(&path, &owned, expanded)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "wrote schedules");
            }
        }
        Commands::FilterKinds => {
            for kind in FilterKind::ALL {
                println!("{:<18} {}", kind.as_str(), kind.description());
            }
        }
        Commands::Minify { input, output } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            std::fs::write(&output, codec::minify(&text)?)
                .with_context(|| format!("writing {}", output.display()))?;
        }
        Commands::Expand {
            input,
            output,
            indent,
        } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            std::fs::write(&output, codec::expand(&text, indent)?)
                .with_context(|| format!("writing {}", output.display()))?;
        }
    }

    Ok(())
}
