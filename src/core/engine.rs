use crate::domain::model::CourseReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::{CourseError, Result};

#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub output_path: String,
    pub report: CourseReport,
}

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    deny_warnings: bool,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            deny_warnings: false,
        }
    }

    /// Fail the run (after outputs are written) when any structure warning is found.
    pub fn with_deny_warnings(mut self, deny_warnings: bool) -> Self {
        self.deny_warnings = deny_warnings;
        self
    }

    pub async fn run(&self) -> Result<ReportOutcome> {
        tracing::info!("Starting course report");

        tracing::info!("Loading course modules...");
        let document = self.pipeline.extract().await?;
        tracing::info!("Loaded {} modules", document.modules.len());

        tracing::info!("Analyzing course...");
        let report = self.pipeline.transform(document).await?;
        for warning in &report.warnings {
            tracing::warn!("{}", warning);
        }

        tracing::info!("Writing report...");
        let output_path = self.pipeline.load(&report).await?;
        tracing::info!("Report saved to: {}", output_path);

        if self.deny_warnings && !report.warnings.is_empty() {
            return Err(CourseError::StructureWarningsError {
                count: report.warnings.len(),
            });
        }

        Ok(ReportOutcome {
            output_path,
            report,
        })
    }
}
