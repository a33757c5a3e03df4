use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use waypoint_core::app_state::Page;
use waypoint_core::config::TourConfig;
use waypoint_core::geometry::Viewport;
use waypoint_core::step::{Step, StepList};
use waypoint_overlay::{CellMetrics, OverlayStyle};

use crate::error::Result;
use crate::journal::Journal;
use crate::logging;
use crate::registry::{ONBOARDING, page_steps};
use crate::replay::{ReplayOptions, TourKind, replay};
use crate::script::parse_script;

#[derive(Debug, Parser)]
#[command(
    name = "waypoint-showcase",
    about = "Replay guided tours of the chemometrics workspace in the terminal",
    version
)]
pub struct Cli {
    /// Log at debug level (WAYPOINT_LOG overrides).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a tour script against the simulated workspace.
    Replay(ReplayArgs),

    /// Print the steps of a tour.
    Steps(StepsArgs),

    /// Validate a tour config file.
    #[command(name = "check-config")]
    CheckConfig {
        /// TOML or JSON file.
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    #[arg(long, value_enum, default_value_t = TourKind::Onboarding)]
    pub tour: TourKind,

    /// Page the app starts on.
    #[arg(long, default_value = "upload", value_parser = parse_page)]
    pub page: Page,

    /// Tour config file (TOML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Script file; the tour's built-in script when omitted.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Inline script, e.g. "open next snapshot".
    #[arg(long, conflicts_with = "script")]
    pub actions: Option<String>,

    /// Write one JSON line per action here.
    #[arg(long)]
    pub journal: Option<PathBuf>,

    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    #[arg(long, default_value_t = 800.0)]
    pub height: f64,

    /// Pixels per terminal column.
    #[arg(long, default_value_t = 8.0)]
    pub cell_width: f64,

    /// Pixels per terminal row.
    #[arg(long, default_value_t = 16.0)]
    pub cell_height: f64,

    /// Hide progress dots on the card.
    #[arg(long)]
    pub no_dots: bool,

    /// Do not print snapshots, only the summary.
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Args)]
pub struct StepsArgs {
    #[arg(long, value_enum, default_value_t = TourKind::Onboarding)]
    pub tour: TourKind,

    /// Tutorial page; every page when omitted.
    #[arg(long, value_parser = parse_page)]
    pub page: Option<Page>,
}

fn parse_page(s: &str) -> std::result::Result<Page, String> {
    s.parse().map_err(|e| format!("{e}"))
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Replay(args) => run_replay(&args, &mut out),
        Commands::Steps(args) => print_steps(&args, &mut out),
        Commands::CheckConfig { path } => {
            let config = TourConfig::load(&path)?;
            writeln!(out, "{}: ok", path.display())?;
            writeln!(out, "{config:#?}")?;
            Ok(())
        }
    }
}

pub fn run_replay(args: &ReplayArgs, out: &mut impl Write) -> Result<()> {
    let config = match &args.config {
        Some(path) => TourConfig::load(path)?,
        None => TourConfig::default(),
    };
    let script = match (&args.script, &args.actions) {
        (Some(path), _) => fs::read_to_string(path)?,
        (None, Some(inline)) => inline.clone(),
        (None, None) => args.tour.default_script().to_owned(),
    };
    let actions = parse_script(&script)?;

    let options = ReplayOptions {
        tour: args.tour,
        page: args.page,
        viewport: Viewport::new(args.width, args.height),
        metrics: CellMetrics::new(args.cell_width, args.cell_height),
        config,
        style: OverlayStyle::default().show_progress_dots(!args.no_dots),
        render: !args.quiet,
    };

    let summary = match &args.journal {
        Some(path) => {
            let mut journal = Journal::new(BufWriter::new(fs::File::create(path)?));
            let summary = replay(&options, &actions, out, Some(&mut journal))?;
            journal.finish()?;
            summary
        }
        None => replay::<_, io::Sink>(&options, &actions, out, None)?,
    };
    writeln!(out, "{summary}")?;
    Ok(())
}

pub fn print_steps(args: &StepsArgs, out: &mut impl Write) -> Result<()> {
    match (args.tour, args.page) {
        (TourKind::Onboarding, _) => write_list(out, "onboarding", ONBOARDING)?,
        (TourKind::Tutorial, Some(page)) => write_list(out, page.title(), page_steps(page))?,
        (TourKind::Tutorial, None) => {
            for page in Page::ALL {
                write_list(out, page.title(), page_steps(page))?;
            }
        }
    }
    Ok(())
}

fn write_list(out: &mut impl Write, heading: &str, steps: &'static [Step]) -> Result<()> {
    let list = StepList::new(steps)?;
    writeln!(out, "{heading} ({} steps)", list.len())?;
    for (index, step) in list.iter().enumerate() {
        let target = step.target.map_or("-", |t| t.as_str());
        write!(out, "  {:>2}. {:<18} {:<22} {}", index + 1, step.id, target, step.title)?;
        if let Some(flag) = step.required_state {
            write!(out, "  [needs {flag}]")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
