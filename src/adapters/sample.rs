use crate::domain::model::{CourseDocument, CourseInfo, ModuleRecord};

fn module(title: &str, order: i64, duration: i64, difficulty: f64, exercises: &[&str]) -> ModuleRecord {
    ModuleRecord {
        title: Some(title.to_string()),
        order: Some(order),
        duration: Some(duration),
        difficulty: Some(difficulty),
        exercises: Some(exercises.iter().map(|e| e.to_string()).collect()),
    }
}

/// Built-in three module course, used when no input file is configured.
pub fn sample_course() -> CourseDocument {
    CourseDocument {
        course: Some(CourseInfo {
            title: Some("Python Fundamentals".to_string()),
            description: Some("Example course shipped with course-report".to_string()),
        }),
        modules: vec![
            module(
                "Introduction to Python",
                1,
                60,
                3.0,
                &["Hello World", "Basic Calculations"],
            ),
            module(
                "Control Flow",
                2,
                90,
                4.0,
                &["If Statements", "Loops", "Function Practice"],
            ),
            module("Data Structures", 3, 120, 4.0, &["Lists", "Dictionaries"]),
        ],
    }
}
