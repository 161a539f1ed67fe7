pub mod engine;
pub mod metrics;
pub mod organizer;
pub mod pipeline;
pub mod report;
pub mod validator;

pub use crate::domain::model::{CourseDocument, CourseReport, MetricsResult, ModuleRecord, SortKey};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
