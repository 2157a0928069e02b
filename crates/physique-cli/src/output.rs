//! Output formatting for physique-cli (table, json)

use clap::ValueEnum;
use colored::Colorize;
use physique_client::AnalysisResult;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

/// One attribute of an analysis, for table output
#[derive(Debug, Tabled, Serialize)]
pub struct AttributeRow {
    #[tabled(rename = "Attribute")]
    pub attribute: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print an info message (unless in quiet mode)
    ///
    /// JSON output keeps stdout to the document alone.
    pub fn info(&self, msg: &str) {
        if self.shows_info() {
            println!("{}", msg);
        }
    }

    fn shows_info(&self) -> bool {
        !self.quiet && self.format != OutputFormat::Json
    }

    /// Print a warning message
    pub fn warn(&self, msg: &str) {
        eprintln!("{}", msg.yellow());
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print an analysis result in the configured format
    pub fn print_analysis(&self, result: &AnalysisResult) {
        match self.format {
            OutputFormat::Table => {
                let table = Table::new(attribute_rows(result))
                    .with(Style::rounded())
                    .to_string();
                println!("{}", table);
                if !self.quiet {
                    println!("{}", result.message.dimmed());
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
    }
}

/// Table rows for an analysis (the message is printed separately)
pub fn attribute_rows(result: &AnalysisResult) -> Vec<AttributeRow> {
    let row = |attribute: &str, value: String| AttributeRow {
        attribute: attribute.to_string(),
        value,
    };

    vec![
        row("Skin color", result.skin_color.clone()),
        row("Skin tone", result.skin_tone.clone()),
        row("Face structure", result.face_structure.clone()),
        row("Body structure", result.body_structure.clone()),
        row("Age", result.age.to_string()),
        row("Gender", result.gender.clone()),
        row("Confidence", format!("{:.0}%", result.confidence * 100.0)),
    ]
}
