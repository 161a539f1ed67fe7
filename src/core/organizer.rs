use crate::domain::model::{ModuleRecord, SortKey};
use crate::utils::error::{CourseError, Result};

/// Returns a copy of `modules` in ascending order of the `sort_by` field.
///
/// The sort is stable. Every module must define the chosen field.
pub fn organize_modules(modules: &[ModuleRecord], sort_by: SortKey) -> Result<Vec<ModuleRecord>> {
    Ok(sorted_indices(modules, sort_by)?
        .into_iter()
        .map(|index| modules[index].clone())
        .collect())
}

/// Zero-based input indices of `modules` in sorted order.
pub fn sorted_indices(modules: &[ModuleRecord], sort_by: SortKey) -> Result<Vec<usize>> {
    let mut keyed = modules
        .iter()
        .enumerate()
        .map(|(index, module)| {
            sort_by
                .value_of(module)
                .map(|value| (value, index))
                .ok_or(CourseError::KeyMissing {
                    field: sort_by.field_name(),
                    position: index + 1,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|(a, _), (b, _)| a.compare(b));

    Ok(keyed.into_iter().map(|(_, index)| index).collect())
}
