use crate::adapters::loader::{parse_course, InputFormat};
use crate::adapters::sample::sample_course;
use crate::core::report::{build_report, render_modules_csv, render_summary};
use crate::domain::model::{CourseDocument, CourseReport, SortKey};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const ARCHIVE_FILENAME: &str = "course_report.zip";

pub struct CoursePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CoursePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn sort_key(&self) -> SortKey {
        let criterion = self.config.sort_by();
        if !SortKey::is_known_criterion(criterion) {
            tracing::warn!(
                "Unknown sort criterion '{}', falling back to 'order'",
                criterion
            );
        }
        SortKey::from_criterion(criterion)
    }

    /// (file name, contents) for every configured output format.
    fn render_outputs(&self, report: &CourseReport) -> Result<Vec<(String, String)>> {
        let mut outputs = Vec::new();

        for format in self.config.output_formats() {
            match format.as_str() {
                "json" => outputs.push((
                    "report.json".to_string(),
                    serde_json::to_string_pretty(report)?,
                )),
                "csv" => outputs.push((
                    "modules.csv".to_string(),
                    render_modules_csv(&report.modules)?,
                )),
                "txt" => outputs.push(("summary.txt".to_string(), render_summary(report))),
                other => tracing::warn!("Skipping unsupported output format '{}'", other),
            }
        }

        Ok(outputs)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CoursePipeline<S, C> {
    async fn extract(&self) -> Result<CourseDocument> {
        let Some(path) = self.config.input_path() else {
            tracing::info!("No input file configured, using the built-in sample course");
            return Ok(sample_course());
        };

        let format = InputFormat::resolve(self.config.input_format(), path)?;
        tracing::debug!("Loading course from {} as {:?}", path, format);

        let data = self.storage.read_file(path).await?;
        parse_course(&data, format)
    }

    async fn transform(&self, document: CourseDocument) -> Result<CourseReport> {
        let sort_key = self.sort_key();
        tracing::debug!(
            "Building report for {} modules sorted by {}",
            document.modules.len(),
            sort_key
        );
        build_report(document, sort_key)
    }

    async fn load(&self, report: &CourseReport) -> Result<String> {
        let outputs = self.render_outputs(report)?;

        if !self.config.archive() {
            for (name, content) in &outputs {
                self.storage.write_file(name, content.as_bytes()).await?;
            }
            tracing::debug!("Wrote {} report files", outputs.len());
            return Ok(self.config.output_path().to_string());
        }

        tracing::debug!("Creating ZIP file with {} files", outputs.len());

        // 打包成單一 ZIP
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            for (name, content) in &outputs {
                zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
                zip.write_all(content.as_bytes())?;
            }

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(ARCHIVE_FILENAME, &zip_data).await?;

        Ok(format!("{}/{}", self.config.output_path(), ARCHIVE_FILENAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CourseError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn put(&self, path: &str, data: &[u8]) {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
        }

        async fn get(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                CourseError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .await
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        input_path: Option<String>,
        sort_by: String,
        output_formats: Vec<String>,
        archive: bool,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                input_path: None,
                sort_by: "order".to_string(),
                output_formats: vec!["json".to_string(), "csv".to_string(), "txt".to_string()],
                archive: false,
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn input_path(&self) -> Option<&str> {
            self.input_path.as_deref()
        }
        fn input_format(&self) -> &str {
            "auto"
        }
        fn sort_by(&self) -> &str {
            &self.sort_by
        }
        fn output_path(&self) -> &str {
            "out"
        }
        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }
        fn archive(&self) -> bool {
            self.archive
        }
        fn deny_warnings(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn test_extract_falls_back_to_sample() {
        let pipeline = CoursePipeline::new(MockStorage::default(), TestConfig::default());

        let document = pipeline.extract().await.unwrap();
        assert_eq!(document.modules.len(), 3);
    }

    #[tokio::test]
    async fn test_extract_reads_configured_file() {
        let storage = MockStorage::default();
        storage
            .put(
                "course.json",
                br#"[{"title": "Only", "order": 1, "difficulty": 2}]"#,
            )
            .await;

        let config = TestConfig {
            input_path: Some("course.json".to_string()),
            ..Default::default()
        };
        let pipeline = CoursePipeline::new(storage, config);

        let document = pipeline.extract().await.unwrap();
        assert_eq!(document.modules[0].title.as_deref(), Some("Only"));
    }

    #[tokio::test]
    async fn test_transform_uses_configured_criterion() {
        let config = TestConfig {
            sort_by: "difficulty".to_string(),
            ..Default::default()
        };
        let pipeline = CoursePipeline::new(MockStorage::default(), config);

        let document = pipeline.extract().await.unwrap();
        let report = pipeline.transform(document).await.unwrap();

        assert_eq!(report.sort_key, SortKey::ByDifficulty);
        assert_eq!(report.metrics.total_duration, 270);
        assert_eq!(report.metrics.average_difficulty, 3.67);
        assert_eq!(report.metrics.total_exercises, 7);
    }

    #[tokio::test]
    async fn test_load_writes_each_format() {
        let storage = MockStorage::default();
        let pipeline = CoursePipeline::new(storage.clone(), TestConfig::default());

        let document = pipeline.extract().await.unwrap();
        let report = pipeline.transform(document).await.unwrap();
        let path = pipeline.load(&report).await.unwrap();

        assert_eq!(path, "out");
        let json = storage.get("report.json").await.unwrap();
        let parsed: CourseReport = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed, report);
        assert!(storage.get("modules.csv").await.is_some());
        assert!(storage.get("summary.txt").await.is_some());
    }

    #[tokio::test]
    async fn test_load_archive_bundles_outputs() {
        let storage = MockStorage::default();
        let config = TestConfig {
            archive: true,
            ..Default::default()
        };
        let pipeline = CoursePipeline::new(storage.clone(), config);

        let document = pipeline.extract().await.unwrap();
        let report = pipeline.transform(document).await.unwrap();
        let path = pipeline.load(&report).await.unwrap();

        assert_eq!(path, "out/course_report.zip");
        assert!(storage.get("report.json").await.is_none());

        let zip_data = storage.get(ARCHIVE_FILENAME).await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort();
        assert_eq!(names, vec!["modules.csv", "report.json", "summary.txt"]);
    }
}
