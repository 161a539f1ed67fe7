use clap::Parser;
use course_metrics::config::toml_config::TomlConfig;
use course_metrics::core::report::render_summary;
use course_metrics::domain::ports::ConfigProvider;
use course_metrics::utils::error::{CourseError, ErrorSeverity};
use course_metrics::utils::{logger, validation::Validate};
use course_metrics::{CliConfig, CoursePipeline, LocalStorage, ReportEngine};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting course-report");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = dispatch(cli).await;

    if let Err(e) = result {
        exit_with(e);
    }

    Ok(())
}

async fn dispatch(mut cli: CliConfig) -> Result<(), CourseError> {
    let Some(config_path) = cli.config.clone() else {
        cli.input = absolute_input(cli.input.take())?;
        return run(cli).await;
    };

    tracing::info!("Loading configuration from: {}", config_path);
    let mut config = TomlConfig::from_file(&config_path)?;
    config.apply_overrides(cli.input.take(), cli.sort_by.take());
    config.input.path = absolute_input(config.input.path.take())?;
    run(config).await
}

async fn run<C: ConfigProvider + Validate + 'static>(config: C) -> Result<(), CourseError> {
    // 驗證配置
    config.validate()?;

    let storage = LocalStorage::new(config.output_path().to_string());
    let deny_warnings = config.deny_warnings();
    let pipeline = CoursePipeline::new(storage, config);
    let engine = ReportEngine::new(pipeline).with_deny_warnings(deny_warnings);

    let outcome = engine.run().await?;
    print!("{}", render_summary(&outcome.report));
    println!("\nReport saved to: {}", outcome.output_path);
    Ok(())
}

/// Storage is rooted at the output directory, so relative inputs are anchored
/// to the current directory first.
fn absolute_input(input: Option<String>) -> Result<Option<String>, CourseError> {
    match input {
        Some(path) if Path::new(&path).is_relative() => Ok(Some(
            std::env::current_dir()?
                .join(path)
                .to_string_lossy()
                .into_owned(),
        )),
        other => Ok(other),
    }
}

fn exit_with(e: CourseError) -> ! {
    tracing::error!(
        "Course report failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
