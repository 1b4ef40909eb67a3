use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use chrono_tz::Tz;
use equiscope::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "equiscope")]
#[command(about = "An equity log analyzer and chart renderer for trading terminals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //analyze one equity log snapshot and render the combined figure
    Analyze {
        //path to the semicolon-delimited equity log csv
        #[arg(long)]
        data: Option<PathBuf>,

        //output path for the rendered png figure
        #[arg(long)]
        output: Option<PathBuf>,

        //iana timezone to convert logged (utc) timestamps into, eg US/Eastern
        #[arg(long)]
        timezone: Option<String>,

        //figure width in pixels
        #[arg(long)]
        width: Option<u32>,

        //figure height in pixels
        #[arg(long)]
        height: Option<u32>,

        //path to a json config file; command-line flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        //write the effective configuration to a json file and continue
        #[arg(long)]
        write_config: Option<PathBuf>,

        //skip rendering and only print the session summary
        #[arg(long)]
        no_chart: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            data,
            output,
            timezone,
            width,
            height,
            config,
            write_config,
            no_chart,
        } => {
            run_analysis(
                data,
                output,
                timezone,
                width,
                height,
                config,
                write_config,
                no_chart,
            )?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_analysis(
    data: Option<PathBuf>,
    output: Option<PathBuf>,
    timezone: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    config_path: Option<PathBuf>,
    write_config: Option<PathBuf>,
    no_chart: bool,
) -> Result<()> {
    println!("Equiscope Equity Log Analyzer");
    println!("=============================\n");

    //start from the config file if given, then apply flag overrides
    let mut config = match config_path {
        Some(path) => AnalyzerConfig::from_json_file(&path)
            .context(format!("Failed to load config from {:?}", path))?,
        None => AnalyzerConfig::default(),
    };

    if let Some(data) = data {
        config.input_path = data;
    }
    if let Some(output) = output {
        config.output_path = output;
    }
    if timezone.is_some() {
        config.timezone = timezone;
    }
    if let Some(width) = width {
        config.figure.width = width;
    }
    if let Some(height) = height {
        config.figure.height = height;
    }

    if let Some(path) = write_config {
        config
            .to_json_file(&path)
            .context(format!("Failed to write config to {:?}", path))?;
        println!("Config written to {:?}\n", path);
    }

    //load data
    println!("Loading data from {:?}...", config.input_path);
    let mut samples = load_csv(&config.input_path)?;

    //optional utc -> local wall clock conversion
    if let Some(tz_name) = &config.timezone {
        let tz: Tz = tz_name
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown timezone: {}", tz_name))?;
        localize(&mut samples, tz);
        println!("Timestamps converted to {}", tz_name);
    }

    println!("Loaded {} samples", samples.len());
    println!(
        "Time range: {} to {}\n",
        format_timestamp(samples.first().unwrap().timestamp),
        format_timestamp(samples.last().unwrap().timestamp)
    );

    //analysis
    let extrema = EquityExtrema::from_samples(&samples)?;
    let summary = SessionSummary::from_samples(&samples)?;

    println!("Session Summary");
    println!("===============\n");
    summary.pretty_print_table();

    println!(
        "\nHighest equity: ${:.2} at {}",
        extrema.max_equity,
        format_timestamp(extrema.max_equity_time)
    );
    println!(
        "Lowest equity:  ${:.2} at {}",
        extrema.min_equity,
        format_timestamp(extrema.min_equity_time)
    );

    //rendering
    if no_chart {
        println!("\nSkipping chart generation (--no-chart)");
        return Ok(());
    }

    println!("\nRendering figure...");
    render_combined(&samples, &extrema, &config.figure, &config.output_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to render figure to {:?}: {}. Configure a writable output path with --output",
            config.output_path,
            e
        )
    })?;
    println!("Figure saved to {:?}", config.output_path);

    Ok(())
}
