//! CLI entry point for gantt-grid.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gantt_grid::chart::{header, render_chart, RenderOptions};
use gantt_grid::io::{csv_export, file};
use gantt_grid::model::{TimelineAxis, TimelineScale};
use gantt_grid::ChartSettings;

/// Timeline grid geometry for project schedules.
#[derive(Parser, Debug)]
#[command(name = "gantt-grid", version, about)]
struct Cli {
    /// Settings file (defaults to settings.json in the OS config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute chart geometry for a snapshot and print it as JSON.
    Render {
        #[arg(long)]
        snapshot: PathBuf,
        /// weeks, intervals or months.
        #[arg(long)]
        scale: Option<TimelineScale>,
        /// Date of the current-day marker (defaults to the local date).
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Draw the current-day marker regardless of the settings file.
        #[arg(long, overrides_with = "hide_today")]
        show_today: bool,
        /// Omit the current-day marker regardless of the settings file.
        #[arg(long, overrides_with = "show_today")]
        hide_today: bool,
        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Export the numbered milestone table as CSV.
    Milestones {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the header buckets for a bare date range.
    Buckets {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long)]
        scale: Option<TimelineScale>,
    },

    /// Write the default settings to the settings file.
    InitConfig {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let Cli { config, cmd } = Cli::parse();
    install_tracing();

    let settings_path = config.clone().unwrap_or_else(ChartSettings::default_path);
    let settings = match (&cmd, config) {
        (Command::InitConfig { .. }, _) => ChartSettings::default(),
        (_, Some(path)) => ChartSettings::load(&path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        (_, None) => ChartSettings::load_or_default(),
    };

    execute_command(cmd, &settings, &settings_path)
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (pass --force to overwrite)", path.display());
    }
    ChartSettings::default()
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote default chart settings");
    Ok(())
}

/// Explicit flags win over the configured default.
fn resolve_current_day(show: bool, hide: bool, configured: bool) -> bool {
    if show {
        true
    } else if hide {
        false
    } else {
        configured
    }
}

fn execute_command(command: Command, settings: &ChartSettings, settings_path: &Path) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    match command {
        Command::Render {
            snapshot,
            scale,
            today: today_override,
            show_today,
            hide_today,
            out,
        } => {
            let snapshot = file::load_snapshot(&snapshot)
                .with_context(|| format!("failed to load snapshot {}", snapshot.display()))?;
            let options = RenderOptions::from_settings(settings, today_override.unwrap_or(today))
                .with_scale(scale.unwrap_or(settings.default_scale))
                .with_current_day(resolve_current_day(
                    show_today,
                    hide_today,
                    settings.show_current_day,
                ));
            let geometry = render_chart(&snapshot, &options);

            match out {
                Some(path) => file::save_geometry(&geometry, &path)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => file::write_geometry(&geometry, std::io::stdout().lock())?,
            }
        }

        Command::Milestones { snapshot, out } => {
            let snapshot = file::load_snapshot(&snapshot)
                .with_context(|| format!("failed to load snapshot {}", snapshot.display()))?;
            let geometry = render_chart(&snapshot, &RenderOptions::from_settings(settings, today));

            match out {
                Some(path) => {
                    csv_export::export_milestones(&geometry.milestone_table, &path)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                }
                None => {
                    csv_export::write_milestones(&geometry.milestone_table, std::io::stdout().lock())?;
                }
            }
        }

        Command::Buckets { start, end, scale } => {
            let axis = TimelineAxis::new(start, end);
            let scale = scale.unwrap_or(settings.default_scale);
            let mut stdout = std::io::stdout().lock();
            for bucket in header::header_buckets(&axis, scale, &[]) {
                writeln!(
                    stdout,
                    "{:<12} {:>8.3}% {:>8.3}%  {} → {}",
                    bucket.label, bucket.left, bucket.width, bucket.start, bucket.end
                )?;
            }
        }

        Command::InitConfig { force } => init_config(settings_path, force)?,
    }

    Ok(())
}

fn install_tracing() {
    // Logs go to stderr so JSON on stdout stays clean. RUST_LOG overrides.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
