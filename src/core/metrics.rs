use crate::domain::model::{MetricsResult, ModuleRecord};
use crate::utils::error::{CourseError, Result};

/// Aggregates duration, difficulty and exercise counts over a course.
///
/// Every module must carry a `difficulty`; the first one that does not fails
/// the whole calculation. `duration` counts as 0 when absent and modules
/// without `exercises` are left out of the exercise total.
pub fn calculate_course_metrics(modules: &[ModuleRecord]) -> Result<MetricsResult> {
    let mut total_duration: i64 = 0;
    let mut difficulty_sum = 0.0;
    let mut total_exercises = 0;

    for (index, module) in modules.iter().enumerate() {
        total_duration = total_duration
            .checked_add(module.duration_or_default())
            .ok_or(CourseError::DurationOverflow {
                position: index + 1,
            })?;

        difficulty_sum += module.difficulty.ok_or(CourseError::KeyMissing {
            field: "difficulty",
            position: index + 1,
        })?;

        if let Some(count) = module.exercise_count() {
            total_exercises += count;
        }
    }

    // 空課程的平均難度定義為 0
    let average_difficulty = if modules.is_empty() {
        0.0
    } else {
        round_to_hundredths(difficulty_sum / modules.len() as f64)
    };

    Ok(MetricsResult {
        total_duration,
        average_difficulty,
        total_exercises,
    })
}

// 與 Python round() 相同：剛好在一半時取偶數
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(duration: Option<i64>, difficulty: f64, exercises: Option<usize>) -> ModuleRecord {
        ModuleRecord {
            title: Some("Module".to_string()),
            order: None,
            duration,
            difficulty: Some(difficulty),
            exercises: exercises.map(|n| (0..n).map(|i| format!("Exercise {}", i)).collect()),
        }
    }

    #[test]
    fn test_empty_course_has_zero_metrics() {
        let metrics = calculate_course_metrics(&[]).unwrap();

        assert_eq!(metrics.total_duration, 0);
        assert_eq!(metrics.average_difficulty, 0.0);
        assert_eq!(metrics.total_exercises, 0);
    }

    #[test]
    fn test_average_difficulty_rounds_to_two_decimals() {
        let modules = vec![
            module(Some(60), 3.0, Some(2)),
            module(Some(90), 4.0, Some(3)),
            module(Some(120), 4.0, Some(2)),
        ];

        let metrics = calculate_course_metrics(&modules).unwrap();

        assert_eq!(metrics.total_duration, 270);
        assert_eq!(metrics.average_difficulty, 3.67);
        assert_eq!(metrics.total_exercises, 7);
    }

    #[test]
    fn test_missing_duration_counts_as_zero() {
        let modules = vec![module(None, 2.0, None), module(Some(45), 2.0, None)];

        let metrics = calculate_course_metrics(&modules).unwrap();
        assert_eq!(metrics.total_duration, 45);
    }

    #[test]
    fn test_untracked_exercises_are_not_counted() {
        let modules = vec![
            module(Some(30), 1.0, None),
            module(Some(30), 1.0, Some(4)),
            module(Some(30), 1.0, Some(0)),
        ];

        let metrics = calculate_course_metrics(&modules).unwrap();
        assert_eq!(metrics.total_exercises, 4);
    }

    #[test]
    fn test_missing_difficulty_is_an_error() {
        let mut modules = vec![module(Some(30), 2.0, None), module(Some(30), 3.0, None)];
        modules[1].difficulty = None;

        let err = calculate_course_metrics(&modules).unwrap_err();
        assert!(matches!(
            err,
            CourseError::KeyMissing {
                field: "difficulty",
                position: 2
            }
        ));
    }

    #[test]
    fn test_exact_half_rounds_to_even() {
        let mut modules: Vec<_> = (0..7).map(|_| module(None, 1.0, None)).collect();
        modules.push(module(None, 2.0, None));

        let metrics = calculate_course_metrics(&modules).unwrap();
        assert_eq!(metrics.average_difficulty, 1.12);
    }

    #[test]
    fn test_duration_overflow_is_an_error() {
        let modules = vec![
            module(Some(i64::MAX), 1.0, None),
            module(Some(1), 1.0, None),
        ];

        let err = calculate_course_metrics(&modules).unwrap_err();
        assert!(matches!(err, CourseError::DurationOverflow { position: 2 }));
    }

    #[test]
    fn test_fractional_difficulties() {
        let modules = vec![module(None, 1.5, None), module(None, 2.25, None)];

        let metrics = calculate_course_metrics(&modules).unwrap();
        assert_eq!(metrics.average_difficulty, 1.88);
    }
}
