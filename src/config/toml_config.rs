use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CourseError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_output_formats, validate_path, Validate,
    SUPPORTED_INPUT_FORMATS,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    #[serde(default = "default_input_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
    #[serde(default)]
    pub archive: bool,
    #[serde(default)]
    pub deny_warnings: bool,
}

fn default_input_format() -> String {
    "auto".to_string()
}

fn default_sort_by() -> String {
    "order".to_string()
}

fn default_output_path() -> String {
    "./output".to_string()
}

fn default_output_formats() -> Vec<String> {
    vec!["json".to_string(), "csv".to_string(), "txt".to_string()]
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: default_input_format(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sort_by: default_sort_by(),
            output_path: default_output_path(),
            output_formats: default_output_formats(),
            archive: false,
            deny_warnings: false,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CourseError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CourseError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COURSE_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CourseError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Command line values win over the file.
    pub fn apply_overrides(&mut self, input: Option<String>, sort_by: Option<String>) {
        if let Some(input) = input {
            tracing::info!("Input overridden to: {}", input);
            self.input.path = Some(input);
        }
        if let Some(sort_by) = sort_by {
            tracing::info!("Sort criterion overridden to: {}", sort_by);
            self.report.sort_by = sort_by;
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.path.as_deref()
    }

    fn input_format(&self) -> &str {
        &self.input.format
    }

    fn sort_by(&self) -> &str {
        &self.report.sort_by
    }

    fn output_path(&self) -> &str {
        &self.report.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.report.output_formats
    }

    fn archive(&self) -> bool {
        self.report.archive
    }

    fn deny_warnings(&self) -> bool {
        self.report.deny_warnings
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.input.path {
            validate_path("input.path", path)?;
        }
        validate_one_of("input.format", &self.input.format, &SUPPORTED_INPUT_FORMATS)?;
        validate_non_empty_string("report.sort_by", &self.report.sort_by)?;
        validate_path("report.output_path", &self.report.output_path)?;
        validate_output_formats("report.output_formats", &self.report.output_formats)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[input]
path = "courses/python.json"
format = "json"

[report]
sort_by = "difficulty"
output_path = "./reports"
output_formats = ["json", "txt"]
archive = true
deny_warnings = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.input_path(), Some("courses/python.json"));
        assert_eq!(config.input_format(), "json");
        assert_eq!(config.sort_by(), "difficulty");
        assert_eq!(config.output_path(), "./reports");
        assert_eq!(config.output_formats(), ["json", "txt"]);
        assert!(config.archive());
        assert!(config.deny_warnings());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.input_path(), None);
        assert_eq!(config.input_format(), "auto");
        assert_eq!(config.sort_by(), "order");
        assert_eq!(config.output_formats(), ["json", "csv", "txt"]);
        assert!(!config.archive());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COURSE_METRICS_TEST_DIR", "/data/courses");

        let toml_content = r#"
[input]
path = "${COURSE_METRICS_TEST_DIR}/rust.toml"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input_path(), Some("/data/courses/rust.toml"));

        std::env::remove_var("COURSE_METRICS_TEST_DIR");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let toml_content = r#"
[report]
output_path = "${COURSE_METRICS_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), "${COURSE_METRICS_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[report]
output_formats = ["xml"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = TomlConfig::default();
        config.apply_overrides(Some("course.csv".to_string()), Some("duration".to_string()));

        assert_eq!(config.input_path(), Some("course.csv"));
        assert_eq!(config.sort_by(), "duration");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[report]\nsort_by = \"duration\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.sort_by(), "duration");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[report\nsort_by = ").unwrap_err();
        assert!(matches!(err, CourseError::ConfigError { .. }));
    }
}
