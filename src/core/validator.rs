use crate::domain::model::ModuleRecord;
use std::fmt;

pub const MAX_MODULE_DURATION_MINUTES: i64 = 120;
pub const MIN_EXERCISES_PER_MODULE: usize = 2;

/// A non-fatal structural issue found in one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureWarning {
    MissingTitle { position: usize },
    DurationExceeded { name: String },
    InsufficientExercises { name: String },
}

impl fmt::Display for StructureWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureWarning::MissingTitle { position } => {
                write!(f, "Module {} missing title", position)
            }
            StructureWarning::DurationExceeded { name } => {
                write!(f, "Module '{}' duration exceeds 2 hours", name)
            }
            StructureWarning::InsufficientExercises { name } => {
                write!(f, "Module '{}' has insufficient exercises", name)
            }
        }
    }
}

/// Checks every module in input order. Never fails, whatever fields are missing.
pub fn inspect_course_structure(modules: &[ModuleRecord]) -> Vec<StructureWarning> {
    let mut warnings = Vec::new();

    for (index, module) in modules.iter().enumerate() {
        let position = index + 1;

        if module.title.is_none() {
            warnings.push(StructureWarning::MissingTitle { position });
        }

        if module.duration_or_default() > MAX_MODULE_DURATION_MINUTES {
            warnings.push(StructureWarning::DurationExceeded {
                name: module.display_name(position).into_owned(),
            });
        }

        if matches!(module.exercise_count(), Some(count) if count < MIN_EXERCISES_PER_MODULE) {
            warnings.push(StructureWarning::InsufficientExercises {
                name: module.display_name(position).into_owned(),
            });
        }
    }

    warnings
}

/// Same checks as [`inspect_course_structure`], rendered as messages.
pub fn validate_course_structure(modules: &[ModuleRecord]) -> Vec<String> {
    inspect_course_structure(modules)
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> ModuleRecord {
        ModuleRecord {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_title_uses_position() {
        let modules = vec![titled("First"), ModuleRecord::default()];
        assert_eq!(
            validate_course_structure(&modules),
            vec!["Module 2 missing title"]
        );
    }

    #[test]
    fn test_duration_over_two_hours() {
        let module = ModuleRecord {
            duration: Some(150),
            ..titled("X")
        };
        assert_eq!(
            validate_course_structure(&[module]),
            vec!["Module 'X' duration exceeds 2 hours"]
        );
    }

    #[test]
    fn test_exactly_two_hours_is_fine() {
        let module = ModuleRecord {
            duration: Some(120),
            ..titled("Boundary")
        };
        assert!(validate_course_structure(&[module]).is_empty());
    }

    #[test]
    fn test_insufficient_exercises() {
        let module = ModuleRecord {
            exercises: Some(vec!["a".to_string()]),
            ..titled("Y")
        };
        assert_eq!(
            validate_course_structure(&[module]),
            vec!["Module 'Y' has insufficient exercises"]
        );
    }

    #[test]
    fn test_empty_exercise_list_is_insufficient_but_absent_is_not() {
        let empty = ModuleRecord {
            exercises: Some(vec![]),
            ..titled("Empty")
        };
        let untracked = titled("Untracked");

        assert_eq!(
            validate_course_structure(&[empty, untracked]),
            vec!["Module 'Empty' has insufficient exercises"]
        );
    }

    #[test]
    fn test_multiple_warnings_for_one_module_use_fallback_name() {
        let module = ModuleRecord {
            duration: Some(200),
            exercises: Some(vec!["only".to_string()]),
            ..Default::default()
        };

        let warnings = inspect_course_structure(&[titled("A"), titled("B"), module]);
        assert_eq!(
            warnings,
            vec![
                StructureWarning::MissingTitle { position: 3 },
                StructureWarning::DurationExceeded {
                    name: "Module 3".to_string()
                },
                StructureWarning::InsufficientExercises {
                    name: "Module 3".to_string()
                },
            ]
        );
        assert_eq!(
            warnings[1].to_string(),
            "Module 'Module 3' duration exceeds 2 hours"
        );
    }

    #[test]
    fn test_sparse_records_never_fail() {
        let modules = vec![ModuleRecord::default(); 3];
        assert_eq!(
            validate_course_structure(&modules),
            vec![
                "Module 1 missing title",
                "Module 2 missing title",
                "Module 3 missing title"
            ]
        );
    }
}
