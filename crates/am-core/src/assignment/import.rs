//! Import of assignment JSON documents
//!
//! Two entry points share the same input shape (a backup written by the
//! export bundle, or any hand-written document of the same structure):
//! - [`parse_import`] keeps ids so the document can replace or sit next to a
//!   stored assignment
//! - [`parse_template`] regenerates every id and produces a fresh draft

use super::model::Assignment;
use crate::error::{AmError, Result};
use crate::types::{AssignmentId, Timestamp};
use serde_json::{Map, Value};

/// Title suffix for a copy created on id collision or duplication
pub const COPY_SUFFIX: &str = " (Copy)";

/// Title suffix for a draft loaded from a template
pub const TEMPLATE_SUFFIX: &str = " (Template)";

/// What to do when an imported id already exists in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Replace the stored assignment
    Overwrite,
    /// Keep both: the import gets a new id and a "(Copy)" title
    Copy,
}

/// Parse an import document.
///
/// Requires `id` (string or number), `title` and a `problems` array. The id
/// is coerced to a trimmed string; missing or non-numeric `createdAt` /
/// `updatedAt` default to `now`. Nothing is written anywhere.
pub fn parse_import(json: &str, now: Timestamp) -> Result<Assignment> {
    let mut value = parse_object(json)?;
    let obj = as_object_mut(&mut value)?;

    let id = match obj.get("id") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    if id.is_empty() {
        return Err(AmError::InvalidImport("missing required field 'id'".to_string()));
    }
    require_title_and_problems(obj)?;

    obj.insert("id".to_string(), Value::String(id));
    normalize_timestamp(obj, "createdAt", now);
    normalize_timestamp(obj, "updatedAt", now);

    serde_json::from_value(value).map_err(|e| AmError::InvalidImport(e.to_string()))
}

/// Parse a document as a template for a new assignment.
///
/// Only `title` and `problems` are required. Every id in the tree is
/// regenerated, the title gets [`TEMPLATE_SUFFIX`] and both timestamps are
/// set to `now`.
pub fn parse_template(json: &str, now: Timestamp) -> Result<Assignment> {
    let mut value = parse_object(json)?;
    let obj = as_object_mut(&mut value)?;
    require_title_and_problems(obj)?;

    obj.insert("id".to_string(), Value::String(String::new()));
    obj.remove("createdAt");
    obj.remove("updatedAt");

    let mut assignment: Assignment =
        serde_json::from_value(value).map_err(|e| AmError::InvalidImport(e.to_string()))?;
    assignment.regenerate_ids();
    assignment.title.push_str(TEMPLATE_SUFFIX);
    assignment.created_at = now;
    assignment.updated_at = now;
    Ok(assignment)
}

/// Turn an imported assignment into a side-by-side copy: new id, "(Copy)" title
pub fn into_copy(mut assignment: Assignment) -> Assignment {
    assignment.id = AssignmentId::generate();
    assignment.title.push_str(COPY_SUFFIX);
    assignment
}

fn parse_object(json: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| AmError::InvalidImport(format!("not valid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(AmError::InvalidImport(
            "expected a JSON object at the top level".to_string(),
        ));
    }
    Ok(value)
}

fn as_object_mut(value: &mut Value) -> Result<&mut Map<String, Value>> {
    value
        .as_object_mut()
        .ok_or_else(|| AmError::InvalidImport("expected a JSON object".to_string()))
}

fn require_title_and_problems(obj: &Map<String, Value>) -> Result<()> {
    let has_title = obj
        .get("title")
        .and_then(Value::as_str)
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false);
    if !has_title {
        return Err(AmError::InvalidImport(
            "missing required field 'title'".to_string(),
        ));
    }
    if !obj.get("problems").map(Value::is_array).unwrap_or(false) {
        return Err(AmError::InvalidImport(
            "missing required array 'problems'".to_string(),
        ));
    }
    Ok(())
}

fn normalize_timestamp(obj: &mut Map<String, Value>, key: &str, now: Timestamp) {
    let millis = obj.get(key).and_then(Value::as_f64).map(|f| f as i64);
    obj.insert(key.to_string(), Value::from(millis.unwrap_or(now)));
}
