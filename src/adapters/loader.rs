use crate::core::report::split_exercises;
use crate::domain::model::{CourseDocument, ModuleRecord};
use crate::utils::error::{CourseError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
    Csv,
}

impl InputFormat {
    /// Resolves `auto` from the file extension; other names are taken as given.
    pub fn resolve(format: &str, path: &str) -> Result<Self> {
        match format {
            "json" => Ok(InputFormat::Json),
            "toml" => Ok(InputFormat::Toml),
            "csv" => Ok(InputFormat::Csv),
            "auto" => Self::from_extension(path),
            other => Err(CourseError::UnsupportedFormatError {
                format: other.to_string(),
            }),
        }
    }

    fn from_extension(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let format = match extension.as_deref() {
            Some("json") => Some(InputFormat::Json),
            Some("toml") => Some(InputFormat::Toml),
            Some("csv") => Some(InputFormat::Csv),
            _ => None,
        };

        format.ok_or_else(|| CourseError::UnsupportedFormatError {
            format: extension.unwrap_or_else(|| path.to_string()),
        })
    }
}

// JSON 可以是模組陣列，也可以是完整的課程文件
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCourse {
    Modules(Vec<ModuleRecord>),
    Document(CourseDocument),
}

#[derive(Debug, Default, Deserialize)]
struct CsvModuleRow {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    order: Option<i64>,
    #[serde(default)]
    duration: Option<i64>,
    #[serde(default)]
    difficulty: Option<f64>,
    #[serde(default)]
    exercises: Option<String>,
}

impl From<CsvModuleRow> for ModuleRecord {
    fn from(row: CsvModuleRow) -> Self {
        ModuleRecord {
            title: row.title.filter(|t| !t.is_empty()),
            order: row.order,
            duration: row.duration,
            difficulty: row.difficulty,
            exercises: row
                .exercises
                .filter(|e| !e.trim().is_empty())
                .map(|e| split_exercises(&e)),
        }
    }
}

pub fn parse_course(data: &[u8], format: InputFormat) -> Result<CourseDocument> {
    let document = match format {
        InputFormat::Json => match serde_json::from_slice::<JsonCourse>(data)? {
            JsonCourse::Modules(modules) => CourseDocument::from_modules(modules),
            JsonCourse::Document(document) => document,
        },
        InputFormat::Toml => {
            let content = std::str::from_utf8(data)?;
            toml::from_str::<CourseDocument>(content)?
        }
        InputFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(data);
            let modules = reader
                .deserialize::<CsvModuleRow>()
                .map(|row| row.map(ModuleRecord::from))
                .collect::<std::result::Result<Vec<_>, csv::Error>>()?;
            CourseDocument::from_modules(modules)
        }
    };

    tracing::debug!(
        "Parsed {} modules from {:?} input",
        document.modules.len(),
        format
    );
    Ok(document)
}
