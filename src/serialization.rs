//! JSON serialization boundary.
//!
//! Every type and reflection derives a stable camelCase JSON form; this
//! module adds the whole-project helpers and the fallible reconstruction
//! path. Reconstructing a serialized entity yields an equal value under
//! each type's defined equality (order-insensitive for union and
//! intersection members, order-sensitive for tuples and parameter lists).

use crate::reflection::ProjectReflection;
use crate::types::Type;
use anyhow::{Context as _, Result};

/// Serialize a project to a JSON value.
pub fn project_to_json(project: &ProjectReflection) -> Result<serde_json::Value> {
    serde_json::to_value(project).context("failed to serialize project reflection")
}

/// Serialize a project to a pretty-printed JSON string.
pub fn project_to_json_string(project: &ProjectReflection) -> Result<String> {
    serde_json::to_string_pretty(project).context("failed to serialize project reflection")
}

/// Reconstruct a project from its JSON form. The symbol registry is
/// conversion-time state and comes back empty.
pub fn project_from_json(json: &str) -> Result<ProjectReflection> {
    serde_json::from_str(json).context("failed to deserialize project reflection")
}

/// Serialize one type value.
pub fn type_to_json(ty: &Type) -> Result<serde_json::Value> {
    serde_json::to_value(ty).context("failed to serialize type")
}

/// Reconstruct one type value.
pub fn type_from_json(json: &serde_json::Value) -> Result<Type> {
    serde_json::from_value(json.clone()).context("failed to deserialize type")
}
