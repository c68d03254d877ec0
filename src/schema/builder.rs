//! Row → model conversion
//!
//! Classes are built first (uri + label). Properties are then resolved against that
//! class set: domain, range (class XOR datatype) and cardinality.

use super::{Class, ModelError, ModelResult, Property};
use crate::rdf::{Row, RowValue};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Build the class set from rows carrying `uri` and `label`.
///
/// The first row wins when a URI appears more than once.
pub fn build_classes(rows: &[Row]) -> ModelResult<Vec<Class>> {
    let mut seen = HashSet::new();
    let mut classes = Vec::with_capacity(rows.len());

    for row in rows {
        let uri = required_text(row, "uri")?;
        if !seen.insert(uri.clone()) {
            debug!("Class {} listed more than once, keeping the first row", uri);
            continue;
        }
        classes.push(Class::new(uri, text(row, "label")));
    }

    Ok(classes)
}

/// Build properties from SHACL property rows against an already built class set.
///
/// Row fields: `uri`, `label`, `domain_uri`, `range_class_uri`, `range_datatype`,
/// `min_count`, `max_count`, and optionally `card_of_class_uri` and `order`.
pub fn build_properties(rows: &[Row], classes: &[Class]) -> ModelResult<Vec<Property>> {
    rows.iter().map(|row| build_property(row, classes)).collect()
}

fn build_property(row: &Row, classes: &[Class]) -> ModelResult<Property> {
    let uri = required_text(row, "uri")?;
    let label = Some(text(row, "label"))
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| uri.clone());

    let domain_uri = text(row, "domain_uri");
    let domain = find_class(classes, &domain_uri).cloned();
    if domain.is_none() && !domain_uri.is_empty() {
        debug!("Domain {} of {} is not a known class", domain_uri, uri);
    }

    let range_class_uri = text(row, "range_class_uri");
    let range_datatype = text(row, "range_datatype");
    if !range_class_uri.is_empty() && !range_datatype.is_empty() {
        warn!(
            "Property {} has both a class range ({}) and a datatype range ({}), using the class",
            uri, range_class_uri, range_datatype
        );
    }
    let (range_target, is_range_class) = resolve_range(&range_class_uri, &range_datatype, classes);

    Ok(Property {
        label,
        domain,
        range_target,
        is_range_class,
        min_count: count(row, "min_count")?,
        max_count: count(row, "max_count")?,
        card_of: find_class(classes, &text(row, "card_of_class_uri")).cloned(),
        order: order(row)?,
        uri,
    })
}

/// Resolve a property range.
///
/// The class column takes precedence over the datatype column. A target naming a
/// known class is a class range; any other non-empty target is a datatype. Both
/// columns empty leaves the range unspecified.
pub fn resolve_range(
    range_class_uri: &str,
    range_datatype: &str,
    classes: &[Class],
) -> (Option<String>, bool) {
    let target = if range_class_uri.is_empty() {
        range_datatype
    } else {
        range_class_uri
    };
    if target.is_empty() {
        return (None, false);
    }
    match find_class(classes, target) {
        Some(class) => (Some(class.uri.clone()), true),
        None => (Some(target.to_string()), false),
    }
}

fn find_class<'c>(classes: &'c [Class], uri: &str) -> Option<&'c Class> {
    if uri.is_empty() {
        return None;
    }
    classes.iter().find(|c| c.uri == uri)
}

/// Text of a field, empty when absent
fn text(row: &Row, field: &str) -> String {
    row.get(field).map(RowValue::to_text).unwrap_or_default()
}

fn required_text(row: &Row, field: &str) -> ModelResult<String> {
    let value = text(row, field);
    if value.is_empty() {
        return Err(ModelError::MalformedRow {
            field: field.to_string(),
            reason: "is missing".to_string(),
        });
    }
    Ok(value)
}

/// Optional non-negative count; absent or empty means unconstrained
fn count(row: &Row, field: &str) -> ModelResult<Option<u64>> {
    let invalid = |value: &RowValue| ModelError::MalformedRow {
        field: field.to_string(),
        reason: format!("is not a non-negative integer: {}", value),
    };

    let Some(value) = row.get(field) else {
        return Ok(None);
    };
    match value {
        RowValue::Integer(n) => u64::try_from(*n).map(Some).map_err(|_| invalid(value)),
        RowValue::Float(x) if x.fract() == 0.0 && *x >= 0.0 => Ok(Some(*x as u64)),
        RowValue::Text(s) if s.trim().is_empty() => Ok(None),
        RowValue::Text(s) => s.trim().parse::<u64>().map(Some).map_err(|_| invalid(value)),
        _ => Err(invalid(value)),
    }
}

fn order(row: &Row) -> ModelResult<Option<f64>> {
    match row.get("order") {
        None => Ok(None),
        Some(RowValue::Integer(n)) => Ok(Some(*n as f64)),
        Some(RowValue::Float(x)) => Ok(Some(*x)),
        Some(RowValue::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => value
            .to_text()
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ModelError::MalformedRow {
                field: "order".to_string(),
                reason: format!("is not a number: {}", value),
            }),
    }
}
