mod render;

use analytics::AnalyticsEngine;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{Config, PRESETS, ParameterArgs, encode_state, init_tracing, load_config, validate};
use core_types::{SimulationParameters, SweepField};
use optimizer::SweepRunner;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// The main entry point for the rolling-perp projection tool.
fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; overrides may come from the real environment.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Simulate(args) => handle_simulate(args, &config),
        Commands::Sweep(args) => handle_sweep(args, &config),
        Commands::Export(args) => handle_export(args, &config),
        Commands::Presets => {
            println!("{}", render::presets_table(&PRESETS));
            Ok(())
        }
        Commands::Share(args) => handle_share(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Projects a rolling, fully re-leveraged long perpetual position over a
/// geometric price path.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one projection and print its KPIs, warnings and step table.
    Simulate(SimulateArgs),
    /// Re-run the projection across candidate values of one parameter.
    Sweep(SweepArgs),
    /// Write the projection as CSV or JSON.
    Export(ExportArgs),
    /// List the built-in parameter presets.
    Presets,
    /// Print the shareable state string for a parameter set.
    Share(ShareArgs),
}

#[derive(Parser)]
struct SimulateArgs {
    #[command(flatten)]
    params: ParameterArgs,

    /// Print only the summary, without the per-step table.
    #[arg(long)]
    summary_only: bool,

    /// Print the risk report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct SweepArgs {
    #[command(flatten)]
    params: ParameterArgs,

    /// The parameter to vary (leverage or step_growth).
    #[arg(long, default_value = "leverage")]
    field: SweepField,

    /// Explicit candidates, comma separated; step_growth as a fraction (0.05).
    /// Defaults to the candidates from the [sensitivity] configuration.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Evaluate candidates on all cores.
    #[arg(long)]
    parallel: bool,

    /// Also write the sweep as CSV to this path.
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn default_file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "rolling_perp.csv",
            ExportFormat::Json => "rolling_perp.json",
        }
    }
}

#[derive(Parser)]
struct ExportArgs {
    #[command(flatten)]
    params: ParameterArgs,

    #[arg(long, short, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,

    /// Destination file; `-` writes to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct ShareArgs {
    #[command(flatten)]
    params: ParameterArgs,

    /// Prefix the state with this base URL, e.g. "https://example.org/calc".
    #[arg(long)]
    base_url: Option<String>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Resolves the parameter layers and rejects the set if any field is invalid.
fn resolve_params(args: &ParameterArgs, config: &Config) -> anyhow::Result<SimulationParameters> {
    let params = args.resolve(&config.simulation)?;
    if let Err(errors) = validate(&params) {
        tracing::warn!(violations = errors.len(), "Rejected invalid parameters");
        eprintln!("Invalid parameters:");
        for message in errors.messages() {
            eprintln!("  - {message}");
        }
        anyhow::bail!("{} invalid parameter(s), nothing was computed", errors.len());
    }
    Ok(params)
}

fn handle_simulate(args: SimulateArgs, config: &Config) -> anyhow::Result<()> {
    let params = resolve_params(&args.params, config)?;
    let result = simulator::simulate(&params);
    let report = AnalyticsEngine::new(config.risk.clone()).calculate(&params, &result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", render::parameters_table(&params));
    println!("{}", render::kpi_table(&report));
    for warning in &report.warnings {
        println!("! {}", warning.message);
    }
    if !args.summary_only {
        println!("{}", render::step_table(&result, &report));
    }
    Ok(())
}

fn handle_sweep(args: SweepArgs, config: &Config) -> anyhow::Result<()> {
    let base = resolve_params(&args.params, config)?;

    let runner = if args.values.is_empty() {
        SweepRunner::from_config(base, args.field, &config.sensitivity)?
    } else {
        SweepRunner::new(base, args.field, args.values)
    };
    let result = runner.parallel(args.parallel).with_progress(true).run()?;

    println!("{}", render::sweep_table(&result));
    match result.best_by_roi() {
        Some(best) => println!(
            "Best ROI: {}% at {} = {}",
            render::fmt_num(best.roi_pct, 2),
            result.field.label(),
            render::fmt_num(best.value, 2)
        ),
        None => println!("No candidate produced a finite ROI."),
    }

    if let Some(path) = args.csv {
        let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        exporter::write_sweep_csv(&result, BufWriter::new(file))?;
        println!("Sweep written to {}", path.display());
    }
    Ok(())
}

fn handle_export(args: ExportArgs, config: &Config) -> anyhow::Result<()> {
    let params = resolve_params(&args.params, config)?;
    let result = simulator::simulate(&params);

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(args.format.default_file_name()));
    let to_stdout = path.as_os_str() == "-";

    let mut writer: Box<dyn Write> = if to_stdout {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        Box::new(BufWriter::new(file))
    };

    match args.format {
        ExportFormat::Csv => exporter::write_csv(&result, &mut writer)?,
        ExportFormat::Json => exporter::write_json(&params, &result, &mut writer)?,
    }
    writer.flush()?;

    if !to_stdout {
        tracing::info!(path = %path.display(), format = ?args.format, "Projection exported");
        println!("Exported {} steps to {}", result.rows.len(), path.display());
    }
    Ok(())
}

fn handle_share(args: ShareArgs, config: &Config) -> anyhow::Result<()> {
    let params = args.params.resolve(&config.simulation)?;
    let state = encode_state(&params);
    match args.base_url {
        Some(url) => println!("{}?{}", url.trim_end_matches('?'), state),
        None => println!("{state}"),
    }
    Ok(())
}
