//! sheetchart - import a spreadsheet, pick two columns, chart them.

mod config;
mod error;
mod logging;
#[cfg(feature = "tui")]
mod tui;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use config::{Settings, load_settings};
use sheetchart_core::storage::{
    dataset_to_csv, dataset_to_json, preview_to_markdown, write_dataset_csv,
};
use sheetchart_core::{ChartType, ImportSession, TextChartService};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Text chart
    #[default]
    Chart,
    /// Dimension/measure pairs as CSV
    Csv,
    /// Dimension/measure arrays as JSON
    Json,
}

/// Import a spreadsheet, pick a dimension and a measure, chart it in the terminal.
#[derive(Parser, Debug)]
#[command(name = "sheetchart", version, about)]
struct Args {
    /// Spreadsheet to open (xlsx, xlsm, xlsb, xls, ods)
    file: Option<PathBuf>,

    /// Print the column keys of the first sheet, one per line
    #[arg(long)]
    columns: bool,

    /// Print the first rows of the first sheet as a markdown table
    #[arg(long)]
    preview: bool,

    /// Number of rows shown by --preview
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// Column whose values label the chart
    #[arg(short, long, value_name = "KEY", requires = "measure")]
    dimension: Option<String>,

    /// Column whose values are charted
    #[arg(short, long, value_name = "KEY", requires = "dimension")]
    measure: Option<String>,

    /// What to emit for --dimension/--measure
    #[arg(long, value_enum, default_value_t = OutputFormat::Chart)]
    format: OutputFormat,

    /// Chart layout: structure, table, time, multiple or grid
    #[arg(long, value_name = "TYPE")]
    chart_type: Option<ChartType>,

    /// Chart width in characters
    #[arg(long)]
    width: Option<u16>,

    /// Chart height in lines
    #[arg(long)]
    height: Option<u16>,

    /// Write the output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Reject column keys the sheet does not have
    #[arg(long)]
    strict: bool,

    /// Config file to use instead of the user config
    #[arg(long, value_name = "FILE", env = "SHEETCHART_CONFIG")]
    config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long)]
    no_config: bool,

    /// Never start the terminal UI
    #[arg(long)]
    no_tui: bool,
}

impl Args {
    fn one_shot(&self) -> bool {
        self.columns || self.preview || self.dimension.is_some()
    }

    fn interactive(&self) -> bool {
        cfg!(feature = "tui") && !self.no_tui && !self.one_shot()
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let interactive = args.interactive();

    if interactive {
        logging::init_file();
    } else {
        logging::init_stderr();
    }

    let settings = settings_for(&args);
    debug!(?settings, "effective settings");

    let session = ImportSession::new(TextChartService::new(), settings.chart.clone())
        .with_chart_type(settings.chart_type)
        .with_strict(args.strict);

    if interactive {
        return run_interactive(session, settings, args.file);
    }

    let Some(file) = args.file.as_deref() else {
        bail!("a FILE is required when the terminal UI is not used");
    };
    run_one_shot(&args, session, &settings, file)
}

fn settings_for(args: &Args) -> Settings {
    let mut settings = if args.no_config {
        Settings::default()
    } else {
        let (settings, warnings) = load_settings(args.config.as_deref());
        for warning in warnings {
            eprintln!("Warning: {}", warning);
        }
        settings
    };

    if let Some(kind) = args.chart_type {
        settings.chart_type = kind;
    }
    if let Some(w) = args.width {
        settings.chart_width = w;
    }
    if let Some(h) = args.height {
        settings.chart_height = h;
    }
    if let Some(rows) = args.rows {
        settings.preview_rows = rows;
    }
    settings
}

#[cfg(feature = "tui")]
fn run_interactive(
    session: ImportSession<TextChartService>,
    settings: Settings,
    file: Option<PathBuf>,
) -> Result<()> {
    let mut app = tui::App::new(session, settings);
    if let Some(path) = file {
        app.open_file(&path);
    }
    tui::run(&mut app).context("terminal UI failed")
}

#[cfg(not(feature = "tui"))]
fn run_interactive(
    _session: ImportSession<TextChartService>,
    _settings: Settings,
    _file: Option<PathBuf>,
) -> Result<()> {
    bail!("built without the terminal UI; use --columns, --preview or --dimension/--measure")
}

fn run_one_shot(
    args: &Args,
    mut session: ImportSession<TextChartService>,
    settings: &Settings,
    file: &Path,
) -> Result<()> {
    let preview = session
        .load_file(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    let mut out = String::new();
    if args.columns {
        for key in &preview.column_keys {
            out.push_str(key);
            out.push('\n');
        }
    }
    if args.preview || !args.one_shot() {
        out.push_str(&preview_to_markdown(preview, settings.preview_rows));
    }

    if let (Some(dimension), Some(measure)) = (&args.dimension, &args.measure) {
        session.select_dimension(dimension)?;
        session.select_measure(measure)?;

        match args.format {
            OutputFormat::Chart => {
                session.confirm()?;
                out.push_str(&session.render_chart(settings.chart_width, settings.chart_height)?);
                out.push('\n');
            }
            OutputFormat::Csv => {
                let dataset = session.dataset()?;
                match &args.output {
                    Some(path) if out.is_empty() => {
                        write_dataset_csv(path, &dataset)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        info!(path = %path.display(), points = dataset.len(), "wrote csv");
                        return Ok(());
                    }
                    _ => out.push_str(&dataset_to_csv(&dataset)),
                }
            }
            OutputFormat::Json => {
                out.push_str(&dataset_to_json(&session.dataset()?)?);
                out.push('\n');
            }
        }
    }

    emit(args.output.as_deref(), &out)
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => print!("{}", text),
    }
    Ok(())
}
