use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_output_formats, validate_path, Validate,
    SUPPORTED_INPUT_FORMATS,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "course-report")]
#[command(about = "Summarize, sort and check course modules")]
pub struct CliConfig {
    /// Course file (json, toml or csv). The built-in sample course is used when omitted
    #[arg(short, long)]
    pub input: Option<String>,

    /// TOML settings file; --input and --sort-by still override it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "auto", help = "Input format: auto, json, toml or csv")]
    pub format: String,

    /// Sort by order, difficulty or duration [default: order]
    #[arg(long)]
    pub sort_by: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_values = ["json", "csv", "txt"])]
    pub output_formats: Vec<String>,

    #[arg(long, help = "Bundle the report files into a single ZIP")]
    pub archive: bool,

    #[arg(long, help = "Exit with an error when structure warnings are found")]
    pub deny_warnings: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn input_format(&self) -> &str {
        &self.format
    }

    fn sort_by(&self) -> &str {
        self.sort_by.as_deref().unwrap_or("order")
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn archive(&self) -> bool {
        self.archive
    }

    fn deny_warnings(&self) -> bool {
        self.deny_warnings
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(input) = &self.input {
            validate_path("input", input)?;
        }
        validate_one_of("format", &self.format, &SUPPORTED_INPUT_FORMATS)?;
        if let Some(sort_by) = &self.sort_by {
            validate_non_empty_string("sort_by", sort_by)?;
        }
        validate_path("output_path", &self.output_path)?;
        validate_output_formats("output_formats", &self.output_formats)?;
        Ok(())
    }
}
