use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// One unit of course content. Every field is optional at the type level;
/// each operation decides which fields it requires and which it defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,
    /// `None` means the exercise count is not tracked for this module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<String>>,
}

impl ModuleRecord {
    pub fn duration_or_default(&self) -> i64 {
        self.duration.unwrap_or(0)
    }

    pub fn exercise_count(&self) -> Option<usize> {
        self.exercises.as_ref().map(Vec::len)
    }

    /// Title, or `Module {position}` when the record has none.
    pub fn display_name(&self, position: usize) -> Cow<'_, str> {
        match &self.title {
            Some(title) => Cow::Borrowed(title.as_str()),
            None => Cow::Owned(format!("Module {}", position)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A loaded course: optional header plus the module sequence in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseInfo>,
    #[serde(default)]
    pub modules: Vec<ModuleRecord>,
}

impl CourseDocument {
    pub fn from_modules(modules: Vec<ModuleRecord>) -> Self {
        Self {
            course: None,
            modules,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub total_duration: i64,
    pub average_difficulty: f64,
    pub total_exercises: usize,
}

/// Everything a run produces: metrics, the reordered modules and the
/// structure warnings, in that order of computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseInfo>,
    pub sort_key: SortKey,
    pub metrics: MetricsResult,
    pub modules: Vec<ModuleRecord>,
    /// 1-based input position of each entry in `modules`.
    #[serde(default)]
    pub positions: Vec<usize>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    ByOrder,
    ByDifficulty,
    ByDuration,
}

impl SortKey {
    /// Maps an external criterion name. Anything other than `difficulty` or
    /// `duration` sorts by `order`.
    pub fn from_criterion(criterion: &str) -> Self {
        match criterion {
            "difficulty" => SortKey::ByDifficulty,
            "duration" => SortKey::ByDuration,
            _ => SortKey::ByOrder,
        }
    }

    pub fn is_known_criterion(criterion: &str) -> bool {
        matches!(criterion, "order" | "difficulty" | "duration")
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            SortKey::ByOrder => "order",
            SortKey::ByDifficulty => "difficulty",
            SortKey::ByDuration => "duration",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::ByOrder => "Order",
            SortKey::ByDifficulty => "Difficulty",
            SortKey::ByDuration => "Duration",
        }
    }

    pub fn value_of(&self, module: &ModuleRecord) -> Option<SortValue> {
        match self {
            SortKey::ByOrder => module.order.map(SortValue::Integer),
            SortKey::ByDifficulty => module.difficulty.map(SortValue::Score),
            SortKey::ByDuration => module.duration.map(SortValue::Integer),
        }
    }
}

impl From<&str> for SortKey {
    fn from(criterion: &str) -> Self {
        SortKey::from_criterion(criterion)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// The value a module is ranked by under a given `SortKey`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue {
    Integer(i64),
    Score(f64),
}

impl SortValue {
    pub fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Integer(a), SortValue::Integer(b)) => a.cmp(b),
            (SortValue::Score(a), SortValue::Score(b)) => a.total_cmp(b),
            (SortValue::Integer(a), SortValue::Score(b)) => (*a as f64).total_cmp(b),
            (SortValue::Score(a), SortValue::Integer(b)) => a.total_cmp(&(*b as f64)),
        }
    }
}

impl fmt::Display for SortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortValue::Integer(v) => write!(f, "{}", v),
            SortValue::Score(v) => write!(f, "{}", v),
        }
    }
}
