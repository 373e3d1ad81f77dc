use anyhow::{Context, Result};
use clap::Parser;
use emstat::cli::{Breakdown, Cli, OutputFormat};
use emstat::config::EmstatConfig;
use emstat::csv_output::{CsvHeatOutput, CsvOutput};
use emstat::heatmap::heat_points;
use emstat::histogram::{aggregate, TemporalSummary};
use emstat::json_output::{JsonHeatOutput, JsonOutput};
use emstat::loader::{LoadedIncidents, RecordLoader};
use emstat::text_output::TextReport;
use emstat::EmstatError;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read the config file if given, then apply column flags
fn load_config(args: &Cli) -> Result<EmstatConfig> {
    let mut config = match &args.config {
        Some(path) => EmstatConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EmstatConfig::default(),
    };
    args.apply_overrides(&mut config);
    Ok(config)
}

/// Render the requested histograms
fn render_histograms(
    loaded: &LoadedIncidents,
    summary: &TemporalSummary,
    format: OutputFormat,
    by: Breakdown,
) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut report = TextReport::new();
            if by.includes_weekday() {
                report.add_weekday(&summary.weekday)?;
            }
            if by.includes_hour() {
                report.add_hour(&summary.hour);
            }
            Ok(report.render().to_string())
        }
        OutputFormat::Json => {
            let mut output = JsonOutput::new();
            output.set_summary(loaded, summary);
            if by.includes_weekday() {
                output.set_weekday(&summary.weekday)?;
            }
            if by.includes_hour() {
                output.set_hour(&summary.hour);
            }
            let mut json = output.to_json()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv => {
            let mut output = CsvOutput::new();
            if by.includes_weekday() {
                output.add_weekday(&summary.weekday)?;
            }
            if by.includes_hour() {
                output.add_hour(&summary.hour);
            }
            Ok(output.to_csv())
        }
    }
}

/// Render the patient-weighted heat points
fn render_heatmap(loaded: &LoadedIncidents, format: OutputFormat) -> Result<String> {
    let layer = heat_points(&loaded.records);
    tracing::debug!(
        points = layer.points.len(),
        excluded = layer.excluded,
        "heat layer built"
    );

    match format {
        OutputFormat::Text => {
            let mut report = TextReport::new();
            report.add_heat_layer(&layer);
            Ok(report.render().to_string())
        }
        OutputFormat::Json => {
            let mut json = JsonHeatOutput::new(&layer).to_json()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv => Ok(CsvHeatOutput::new(&layer).to_csv()),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;
    let loaded = RecordLoader::new(&config)
        .load_path(&args.input)
        .with_context(|| format!("Failed to load incidents from {}", args.input.display()))?;

    if !loaded.row_errors.is_empty() {
        eprintln!(
            "warning: {} row(s) could not be decoded and were skipped",
            loaded.row_errors.len()
        );
    }

    let summary = aggregate(&loaded.records);

    if summary.skipped > 0 && !args.heatmap {
        if args.strict {
            return Err(EmstatError::MalformedTimestamps {
                count: summary.skipped as usize,
            }
            .into());
        }
        eprintln!(
            "note: {} record(s) without a parseable '{}' were not counted",
            summary.skipped, config.columns.timestamp
        );
    }

    let output = if args.heatmap {
        render_heatmap(&loaded, args.format)?
    } else {
        render_histograms(&loaded, &summary, args.format, args.by)?
    };
    print!("{}", output);

    Ok(())
}
