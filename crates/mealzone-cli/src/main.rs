//! mealzone CLI: meal-timing timeline chart in the terminal and as SVG

use chrono::{Local, NaiveTime, Timelike};
use clap::{Parser, Subcommand};
use mealzone_engine::{
    default_zones, hour_label, write_svg, Chart, ChartConfig, ConfigError, DescriptionLookup,
    DrawingSurface, LinearScale, ZoneSet, CONFIG_FILE,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::prelude::*;

/// Meal-timing timeline chart
#[derive(Parser)]
#[command(name = "mealzone")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Chart configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Export the chart as SVG
    Render {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Host page width in pixels
        #[arg(long)]
        host_width: Option<f64>,
    },

    /// List zones with their pixel geometry
    Zones {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Host page width in pixels
        #[arg(long)]
        host_width: Option<f64>,
    },

    /// Print the description of a zone
    Describe {
        /// Zone label, e.g. "Danger Zone"
        label: String,
    },

    /// Map an hour of the day to its x position
    Scale {
        /// Hour in [0, 24]
        hour: f64,

        /// Host page width in pixels
        #[arg(long)]
        host_width: Option<f64>,
    },

    /// Show which zone the current local time falls in
    Now {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration file
    Init,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None | Some(Commands::Tui) => cmd_tui(&cli.config),
        Some(command) => {
            init_logging(cli.verbose);
            run_command(command, &cli.config)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr so command output on stdout stays clean.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run_command(command: Commands, config_path: &Path) -> CliResult {
    match command {
        Commands::Tui => cmd_tui(config_path),
        Commands::Render { output, host_width } => {
            cmd_render(&load_config(config_path, host_width)?, output.as_deref())
        }
        Commands::Zones { json, host_width } => {
            print!("{}", zones_report(&load_config(config_path, host_width)?, json)?);
            Ok(())
        }
        Commands::Describe { label } => {
            println!("{}", describe(&label));
            Ok(())
        }
        Commands::Scale { hour, host_width } => {
            let config = load_config(config_path, host_width)?;
            println!("{}", scale_position(&config, hour));
            Ok(())
        }
        Commands::Now { json } => {
            let now = Local::now().time();
            print!("{}", now_report(now, json)?);
            Ok(())
        }
        Commands::Init => cmd_init(config_path),
    }
}

fn load_config(path: &Path, host_width: Option<f64>) -> Result<ChartConfig, ConfigError> {
    let config = ChartConfig::load_or_default(path)?;
    Ok(match host_width {
        Some(width) => config.with_host_width(width),
        None => config,
    })
}

fn cmd_tui(config_path: &Path) -> CliResult {
    let config = ChartConfig::load_or_default(config_path)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(mealzone_tui::run_tui(&config))
}

fn cmd_render(config: &ChartConfig, output: Option<&Path>) -> CliResult {
    let chart = Chart::from_config(config);
    match output {
        Some(path) => {
            write_svg(path, chart.surface.scene(), &chart.rendered.geometry)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", chart.svg()),
    }
    Ok(())
}

/// One row of the `zones` listing.
#[derive(Debug, Serialize)]
struct ZoneRow {
    label: String,
    start: f64,
    end: f64,
    color: String,
    x: f64,
    width: f64,
}

fn zone_rows(config: &ChartConfig) -> Vec<ZoneRow> {
    let scale = LinearScale::hours(config.geometry().width);
    default_zones()
        .into_iter()
        .map(|zone| {
            let x = scale.map(zone.start);
            let width = scale.map(zone.end) - x - config.gutter;
            ZoneRow {
                label: zone.label,
                start: zone.start,
                end: zone.end,
                color: zone.color,
                x,
                width,
            }
        })
        .collect()
}

fn zones_report(config: &ChartConfig, json: bool) -> Result<String, serde_json::Error> {
    let rows = zone_rows(config);
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&rows)?));
    }

    let mut out = format!("Zones (chart width {}px)\n\n", config.geometry().width);
    for row in &rows {
        out.push_str(&format!(
            "  {:<24} {:>5}-{:<5} x={:<9.2} width={:.2}\n",
            row.label,
            hour_label(row.start),
            hour_label(row.end),
            row.x,
            row.width,
        ));
    }
    Ok(out)
}

fn describe(label: &str) -> String {
    DescriptionLookup::from_zones(&default_zones())
        .get(label)
        .to_string()
}

fn scale_position(config: &ChartConfig, hour: f64) -> f64 {
    LinearScale::hours(config.geometry().width).map(hour)
}

#[derive(Debug, Serialize)]
struct NowReport {
    time: String,
    hour: f64,
    zone: Option<String>,
}

fn now_report(time: NaiveTime, json: bool) -> Result<String, serde_json::Error> {
    let hour = f64::from(time.hour())
        + f64::from(time.minute()) / 60.0
        + f64::from(time.second()) / 3600.0;
    let zones = ZoneSet::default();
    let report = NowReport {
        time: time.format("%H:%M").to_string(),
        hour,
        zone: zones.zone_at(hour).map(|z| z.label.clone()),
    };

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&report)?));
    }
    Ok(match report.zone {
        Some(zone) => format!("{} is in {zone}\n", report.time),
        None => format!("{} is outside every zone\n", report.time),
    })
}

fn cmd_init(config_path: &Path) -> CliResult {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }
    ChartConfig::default().save(config_path)?;
    println!("Created {}", config_path.display());
    Ok(())
}
