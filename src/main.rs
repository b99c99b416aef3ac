//! dsrf-records - convert and inspect DSRF row records

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use termcolor::ColorChoice;

use dsrf_records::codec::DecoderFactory;
use dsrf_records::config::{Config, InputFormat, OutputFormat};
use dsrf_records::output::{render_to_path, render_to_stdout};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliColor {
    Auto,
    Always,
    Never,
}

impl From<CliColor> for ColorChoice {
    fn from(c: CliColor) -> Self {
        match c {
            CliColor::Auto => ColorChoice::Auto,
            CliColor::Always => ColorChoice::Always,
            CliColor::Never => ColorChoice::Never,
        }
    }
}

/// Convert and inspect DSRF row records (binary, framed streams, JSON)
#[derive(Parser, Debug)]
#[command(name = "dsrf-records")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file; `-` or absent reads stdin
    input: Option<PathBuf>,

    /// Input format: auto, binary, length-prefixed, pipe-delimited or json
    #[arg(long, default_value = "auto")]
    from: InputFormat,

    /// Output format: terminal, json, binary, length-prefixed or pipe-delimited
    #[arg(long, default_value = "terminal")]
    to: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compact JSON output
    #[arg(long)]
    compact: bool,

    /// Only print row counts per type and kind
    #[arg(long)]
    summary: bool,

    /// Terminal colors
    #[arg(long, value_enum, default_value = "auto")]
    color: CliColor,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let input = cli.input.filter(|p| p.as_os_str() != "-");

    let config = Config::default()
        .with_input(input)
        .with_output(cli.output)
        .with_input_format(cli.from)
        .with_output_format(cli.to)
        .with_pretty(!cli.compact)
        .with_summary_only(cli.summary)
        .with_color(cli.color.into());

    let bytes = match &config.input {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let factory = DecoderFactory::new();
    let rows = factory
        .decode(config.input_format, &bytes, config.input.as_deref())
        .context("Failed to decode input records")?;
    log::info!("decoded {} rows", rows.len());

    match &config.output {
        Some(path) => render_to_path(&rows, &config, path)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?,
        None => render_to_stdout(&rows, &config).context("Failed to write output")?,
    }

    Ok(())
}
