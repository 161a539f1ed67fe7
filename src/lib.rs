pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::core::{
    engine::{ReportEngine, ReportOutcome},
    metrics::calculate_course_metrics,
    organizer::organize_modules,
    pipeline::CoursePipeline,
    validator::{inspect_course_structure, validate_course_structure, StructureWarning},
};
pub use crate::domain::model::{CourseDocument, CourseReport, MetricsResult, ModuleRecord, SortKey};
pub use crate::utils::error::{CourseError, Result};
