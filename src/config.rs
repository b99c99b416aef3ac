//! Configuration handling for record conversion

use std::path::PathBuf;

use termcolor::ColorChoice;

/// Serialized form of the input records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// Sniff the content, then fall back to the file extension
    #[default]
    Auto,
    Binary,
    LengthPrefixed,
    PipeDelimited,
    Json,
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "binary" => Ok(InputFormat::Binary),
            "length-prefixed" => Ok(InputFormat::LengthPrefixed),
            "pipe-delimited" => Ok(InputFormat::PipeDelimited),
            "json" => Ok(InputFormat::Json),
            _ => Err(format!(
                "Unknown input format: {} (expected auto, binary, length-prefixed, pipe-delimited or json)",
                s
            )),
        }
    }
}

/// Output format for converted records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Binary,
    LengthPrefixed,
    PipeDelimited,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            "binary" => Ok(OutputFormat::Binary),
            "length-prefixed" => Ok(OutputFormat::LengthPrefixed),
            "pipe-delimited" => Ok(OutputFormat::PipeDelimited),
            _ => Err(format!(
                "Unknown output format: {} (expected terminal, json, binary, length-prefixed or pipe-delimited)",
                s
            )),
        }
    }
}

/// Configuration for conversion runs
#[derive(Debug, Clone)]
pub struct Config {
    /// Input file; `None` reads stdin
    pub input: Option<PathBuf>,
    /// Output file; `None` writes stdout
    pub output: Option<PathBuf>,
    /// Input format
    pub input_format: InputFormat,
    /// Output format
    pub output_format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Only print per-type row counts
    pub summary_only: bool,
    /// Color handling for terminal output
    pub color: ColorChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            input_format: InputFormat::default(),
            output_format: OutputFormat::default(),
            pretty: true,
            summary_only: false,
            color: ColorChoice::Auto,
        }
    }
}

impl Config {
    /// Set the input file; `None` reads stdin
    pub fn with_input(mut self, input: Option<PathBuf>) -> Self {
        self.input = input;
        self
    }

    /// Set the output file; `None` writes stdout
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Set input format
    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.input_format = format;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enable or disable pretty JSON
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable summary-only mode
    pub fn with_summary_only(mut self, summary_only: bool) -> Self {
        self.summary_only = summary_only;
        self
    }

    /// Set terminal color handling
    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}
