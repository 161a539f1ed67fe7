use crate::core::metrics::calculate_course_metrics;
use crate::core::organizer::sorted_indices;
use crate::core::validator::validate_course_structure;
use crate::domain::model::{CourseDocument, CourseReport, ModuleRecord, SortKey};
use crate::utils::error::{CourseError, Result};
use std::fmt::Write;

pub const CSV_HEADER: [&str; 5] = ["title", "order", "duration", "difficulty", "exercises"];
pub const EXERCISE_SEPARATOR: &str = ";";

/// Runs metrics, ordering and structure checks over one course.
pub fn build_report(document: CourseDocument, sort_key: SortKey) -> Result<CourseReport> {
    let metrics = calculate_course_metrics(&document.modules)?;
    let order = sorted_indices(&document.modules, sort_key)?;
    let warnings = validate_course_structure(&document.modules);

    let positions = order.iter().map(|index| index + 1).collect();
    let modules = order
        .iter()
        .map(|&index| document.modules[index].clone())
        .collect();

    Ok(CourseReport {
        course: document.course,
        sort_key,
        metrics,
        modules,
        positions,
        warnings,
    })
}

/// Console summary of a report.
pub fn render_summary(report: &CourseReport) -> String {
    let mut out = String::new();

    if let Some(title) = report.course.as_ref().and_then(|c| c.title.as_deref()) {
        let _ = writeln!(out, "{}", title);
    }

    let _ = writeln!(out, "\nCourse Metrics:");
    let _ = writeln!(out, "Total Duration: {} minutes", report.metrics.total_duration);
    let _ = writeln!(
        out,
        "Average Difficulty: {}/5",
        report.metrics.average_difficulty
    );
    let _ = writeln!(out, "Total Exercises: {}", report.metrics.total_exercises);

    let _ = writeln!(out, "\nModules by {}:", report.sort_key.label());
    for (index, module) in report.modules.iter().enumerate() {
        let position = report.positions.get(index).copied().unwrap_or(index + 1);
        let value = report
            .sort_key
            .value_of(module)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "- {} ({}: {})",
            module.display_name(position),
            report.sort_key.label(),
            value
        );
    }

    if report.warnings.is_empty() {
        let _ = writeln!(out, "\nNo structure warnings found.");
    } else {
        let _ = writeln!(out, "\nStructure Warnings:");
        for warning in &report.warnings {
            let _ = writeln!(out, "- {}", warning);
        }
    }

    out
}

/// Organized modules as CSV, exercises joined with `;`.
pub fn render_modules_csv(modules: &[ModuleRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for module in modules {
        let exercises = module
            .exercises
            .as_ref()
            .map(|list| join_exercises(list))
            .unwrap_or_default();

        writer.write_record([
            module.title.clone().unwrap_or_default(),
            optional_cell(module.order),
            optional_cell(module.duration),
            optional_cell(module.difficulty),
            exercises,
        ])?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| CourseError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Joins exercise names with `;`, escaping `\` and `;` inside names.
pub fn join_exercises(exercises: &[String]) -> String {
    exercises
        .iter()
        .map(|name| name.replace('\\', "\\\\").replace(';', "\\;"))
        .collect::<Vec<_>>()
        .join(EXERCISE_SEPARATOR)
}

/// Inverse of [`join_exercises`]. Names are trimmed and empty names dropped.
pub fn split_exercises(cell: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = String::new();
    let mut chars = cell.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            ';' => names.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    names.push(current);

    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
