//! Maps a task's classification custom field to a configured destination.

use serde_json::Value;

use super::models::{CustomField, FieldOption, Task};
use crate::core::registry::{Destination, DestinationRegistry};

/// Field values and option indexes arrive as numbers or numeric strings.
fn same_index(value: &Value, index: &Value) -> bool {
    fn as_int(v: &Value) -> Option<i64> {
        match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    match (as_int(value), as_int(index)) {
        (Some(a), Some(b)) => a == b,
        _ => !index.is_null() && value == index,
    }
}

fn selected_option<'a>(field: &'a CustomField) -> Option<&'a FieldOption> {
    let value = field.value.as_ref().filter(|v| !v.is_null())?;
    let options = field.options();
    if options.is_empty() {
        return None;
    }

    options
        .iter()
        .find(|opt| same_index(value, &opt.index))
        .or_else(|| {
            let id = value.as_str()?;
            options.iter().find(|opt| !opt.id.is_empty() && opt.id == id)
        })
}

/// Match a lower-cased option label against registry keys, in registry order.
///
/// Containment is checked both ways so "facility team" finds `facility`
/// and "facility" finds `facilityteam`.
#[must_use]
pub fn match_label<'r>(
    label: &str,
    registry: &'r DestinationRegistry,
) -> Option<(&'r str, &'r Destination)> {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }

    registry.iter().find_map(|dest| {
        let key = dest.key.to_lowercase();
        (!key.is_empty() && (label.contains(&key) || key.contains(&label)))
            .then_some((dest.key.as_str(), dest))
    })
}

/// Resolve the destination a task belongs to, if any.
///
/// `marker` is matched case-insensitively as a substring of the field name.
/// Every such field is tried in order; a field without a usable selection
/// (free text, unset, unmatched label) falls through to the next one.
#[must_use]
pub fn classify_task<'r>(
    task: Option<&Task>,
    registry: &'r DestinationRegistry,
    marker: &str,
) -> Option<(&'r str, &'r Destination)> {
    let task = task?;
    let marker = marker.to_lowercase();

    task.custom_fields
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&marker))
        .filter_map(selected_option)
        .find_map(|option| match_label(&option.label, registry))
}
