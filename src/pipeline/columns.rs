//! Resolves the target column's semantic kind and the tooltip/popup field
//! lists.

use crate::core::feature::{ColumnType, FeatureSet};
use crate::view::ViewSpec;
use crate::{Result, ViewError};

/// Default cap on tooltip fields when no explicit list is given
const DEFAULT_FIELD_CAP: usize = 10;

/// How the target column drives styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Numeric values binned by a classification scheme
    Continuous,
    /// Distinct values slotted into colors
    Categorical,
    /// No target column: one constant style
    Uniform,
}

/// The resolved visualization columns for one call
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumns {
    pub kind: ColumnKind,
    pub target: Option<String>,
    pub tooltip: Vec<String>,
    pub popup: Vec<String>,
}

/// Validates the target column against the schema and resolves the
/// tooltip/popup field lists.
pub fn resolve_columns(set: &FeatureSet, spec: &ViewSpec) -> Result<ResolvedColumns> {
    let kind = match spec.column() {
        None => ColumnKind::Uniform,
        Some(name) => {
            let column = set
                .column(name)
                .ok_or_else(|| ViewError::UnknownColumn(name.to_string()))?;
            match column.ty {
                ColumnType::Number if !spec.forced_categorical() => ColumnKind::Continuous,
                _ => ColumnKind::Categorical,
            }
        }
    };

    Ok(ResolvedColumns {
        kind,
        target: spec.column().map(String::from),
        tooltip: resolve_fields(set, spec.tooltip_columns(), Some(DEFAULT_FIELD_CAP))?,
        popup: resolve_fields(set, spec.popup_columns(), None)?,
    })
}

/// Explicit field lists are validated per entry; the default is every
/// schema column in order, optionally capped.
fn resolve_fields(
    set: &FeatureSet,
    explicit: Option<&[String]>,
    cap: Option<usize>,
) -> Result<Vec<String>> {
    match explicit {
        Some(fields) => {
            for field in fields {
                if set.column(field).is_none() {
                    return Err(ViewError::UnknownColumn(field.clone()));
                }
            }
            Ok(fields.to_vec())
        }
        None => {
            let mut names: Vec<String> = set.columns().iter().map(|c| c.name.clone()).collect();
            if let Some(cap) = cap {
                names.truncate(cap);
            }
            Ok(names)
        }
    }
}
