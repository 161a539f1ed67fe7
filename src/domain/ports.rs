use crate::domain::model::{CourseDocument, CourseReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> Option<&str>;
    fn input_format(&self) -> &str;
    fn sort_by(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn archive(&self) -> bool;
    fn deny_warnings(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<CourseDocument>;
    async fn transform(&self, document: CourseDocument) -> Result<CourseReport>;
    async fn load(&self, report: &CourseReport) -> Result<String>;
}
