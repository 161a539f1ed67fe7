use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourseError {
    #[error("Module {position} is missing required field '{field}'")]
    KeyMissing { field: &'static str, position: usize },

    #[error("Total duration overflows at module {position}")]
    DurationOverflow { position: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input is not valid UTF-8: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unsupported input format: {format}")]
    UnsupportedFormatError { format: String },

    #[error("Course structure produced {count} warning(s)")]
    StructureWarningsError { count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Io,
    Format,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CourseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CourseError::KeyMissing { .. }
            | CourseError::DurationOverflow { .. }
            | CourseError::StructureWarningsError { .. } => ErrorCategory::Data,
            CourseError::IoError(_) | CourseError::ZipError(_) => ErrorCategory::Io,
            CourseError::SerializationError(_)
            | CourseError::Utf8Error(_)
            | CourseError::CsvError(_)
            | CourseError::TomlError(_)
            | CourseError::UnsupportedFormatError { .. } => ErrorCategory::Format,
            CourseError::ConfigError { .. }
            | CourseError::InvalidConfigValueError { .. }
            | CourseError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CourseError::StructureWarningsError { .. } => ErrorSeverity::Medium,
            CourseError::IoError(_) | CourseError::ZipError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CourseError::KeyMissing { .. } => {
                "Add the missing field to every module, or sort by a field all modules define"
            }
            CourseError::DurationOverflow { .. } => "Check the module durations for out-of-range values",
            CourseError::Utf8Error(_) => "Save the input file as UTF-8",
            CourseError::IoError(_) => "Check that the input file exists and the output directory is writable",
            CourseError::SerializationError(_) => "Check that the JSON input is an array of modules or a course document",
            CourseError::CsvError(_) => {
                "Use the header row title,order,duration,difficulty,exercises and separate exercises with ';'"
            }
            CourseError::TomlError(_) => "Check the TOML syntax of the course or configuration file",
            CourseError::ZipError(_) => "Retry without --archive to write plain report files",
            CourseError::ConfigError { .. }
            | CourseError::InvalidConfigValueError { .. }
            | CourseError::MissingConfigError { .. } => "Run with --help to review the accepted options",
            CourseError::UnsupportedFormatError { .. } => "Use --format json, toml or csv",
            CourseError::StructureWarningsError { .. } => {
                "Fix the reported warnings or run without --deny-warnings"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CourseError::KeyMissing { field, position } => {
                format!("Module {} has no '{}' value", position, field)
            }
            CourseError::IoError(e) => format!("Could not access a file: {}", e),
            CourseError::StructureWarningsError { count } => {
                format!("Course structure check failed with {} warning(s)", count)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CourseError>;
