//! Configuration handling for csvmatch

use std::path::{Path, PathBuf};

/// Output format for the run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// How rows are matched across the two tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyMode {
    /// Match rows with equal values in the named identifier column
    Keyed(String),
    /// Match rows by 1-based position
    #[default]
    Positional,
}

impl KeyMode {
    /// Name of the identifier column, if one is configured
    pub fn key_column(&self) -> Option<&str> {
        match self {
            KeyMode::Keyed(name) => Some(name.as_str()),
            KeyMode::Positional => None,
        }
    }

    /// Column header the report uses for the key
    pub fn report_key_header(&self) -> &str {
        match self {
            KeyMode::Keyed(name) => name.as_str(),
            KeyMode::Positional => "Row",
        }
    }
}

/// Configuration for a comparison run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the first table (side A)
    pub table_a: PathBuf,
    /// Path to the second table (side B)
    pub table_b: PathBuf,
    /// Row matching mode
    pub key_mode: KeyMode,
    /// Annotator initials recorded on side A report rows
    pub initials_a: String,
    /// Annotator initials recorded on side B report rows
    pub initials_b: String,
    /// Source label for side A; defaults to the file name
    pub source_a: Option<String>,
    /// Source label for side B; defaults to the file name
    pub source_b: Option<String>,
    /// Field delimiter override for both inputs
    pub delimiter: Option<u8>,
    /// Output format
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_a: PathBuf::new(),
            table_b: PathBuf::new(),
            key_mode: KeyMode::default(),
            initials_a: String::new(),
            initials_b: String::new(),
            source_a: None,
            source_b: None,
            delimiter: None,
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Create a new Config with input paths
    pub fn new(table_a: PathBuf, table_b: PathBuf) -> Self {
        Self {
            table_a,
            table_b,
            ..Default::default()
        }
    }

    /// Set the identifier column for keyed matching
    pub fn with_key_column(mut self, name: String) -> Self {
        self.key_mode = KeyMode::Keyed(name);
        self
    }

    /// Set annotator initials for both sides
    pub fn with_initials(mut self, a: String, b: String) -> Self {
        self.initials_a = a;
        self.initials_b = b;
        self
    }

    /// Override both source labels
    pub fn with_sources(mut self, a: String, b: String) -> Self {
        self.source_a = Some(a);
        self.source_b = Some(b);
        self
    }

    /// Set the field delimiter for both inputs
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Source label for side A
    pub fn source_label_a(&self) -> String {
        self.source_a
            .clone()
            .unwrap_or_else(|| file_label(&self.table_a))
    }

    /// Source label for side B
    pub fn source_label_b(&self) -> String {
        self.source_b
            .clone()
            .unwrap_or_else(|| file_label(&self.table_b))
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
