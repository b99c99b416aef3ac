//! Output formatting for decoded rows

mod binary;
mod json;
mod summary;
mod terminal;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};

use crate::codec::Framing;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::model::Row;

pub use binary::{BinaryOutput, StreamOutput};
pub use json::JsonOutput;
pub use summary::{RowSummary, SummaryOutput};
pub use terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render rows to a writer
    fn render(&self, rows: &[Row], writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter for the configured format
    pub fn create(config: &Config) -> Box<dyn OutputFormatter> {
        if config.summary_only {
            return Box::new(SummaryOutput::new(
                config.output_format == OutputFormat::Json,
                config.pretty,
            ));
        }

        match config.output_format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new(config.pretty)),
            OutputFormat::Binary => Box::new(BinaryOutput),
            OutputFormat::LengthPrefixed => Box::new(StreamOutput::new(Framing::LengthPrefixed)),
            OutputFormat::PipeDelimited => Box::new(StreamOutput::new(Framing::PipeDelimited)),
        }
    }
}

/// Render rows to stdout; only terminal output is colored
pub fn render_to_stdout(rows: &[Row], config: &Config) -> Result<()> {
    let color = if config.output_format == OutputFormat::Terminal {
        config.color
    } else {
        ColorChoice::Never
    };
    let formatter = OutputFactory::create(config);
    let mut stdout = StandardStream::stdout(color);
    formatter.render(rows, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Render rows to a file, without colors
pub fn render_to_path(rows: &[Row], config: &Config, path: &Path) -> Result<()> {
    let formatter = OutputFactory::create(config);
    let mut writer = NoColor::new(BufWriter::new(File::create(path)?));
    formatter.render(rows, &mut writer)?;
    writer.flush()?;
    log::debug!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
