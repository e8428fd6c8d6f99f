//! In-place deep merge of JSON object mappings.

use serde_json::{Map, Value};

use crate::error::MergeError;

/// Maximum depth to which mappings are merged.
pub const MAX_MERGE_DEPTH: usize = 8;

/// Deep-update `target` in place with the values from `source`.
///
/// Per key in `source`:
/// - arrays extend an existing array in `target` (concatenation,
///   accumulator first) and otherwise overwrite;
/// - objects recurse into an existing object and otherwise overwrite;
/// - null and other scalars always overwrite — an explicit null wins.
///
/// An *empty* `source` clears `target` entirely. That is a deliberate
/// "reset this layer" signal, asymmetric with every other rule: a
/// non-empty source merges key-by-key and never removes unrelated keys.
/// It applies at nested levels too, so `{"a": {}}` empties `target["a"]`.
///
/// Merging the same source twice is not idempotent for array keys; the
/// entries are concatenated again.
pub fn deep_update(
    target: &mut Map<String, Value>,
    source: &Map<String, Value>,
) -> Result<(), MergeError> {
    update_at_depth(target, source, 0)
}

fn update_at_depth(
    target: &mut Map<String, Value>,
    source: &Map<String, Value>,
    depth: usize,
) -> Result<(), MergeError> {
    if depth > MAX_MERGE_DEPTH {
        return Err(MergeError::TooDeep { limit: MAX_MERGE_DEPTH });
    }
    if source.is_empty() {
        target.clear();
        return Ok(());
    }
    for (key, value) in source {
        match value {
            Value::Array(items) => match target.get_mut(key) {
                Some(Value::Array(existing)) => existing.extend(items.iter().cloned()),
                _ => {
                    target.insert(key.clone(), value.clone());
                }
            },
            Value::Object(incoming) => match target.get_mut(key) {
                Some(Value::Object(existing)) => {
                    update_at_depth(existing, incoming, depth + 1)?;
                }
                _ => {
                    target.insert(key.clone(), value.clone());
                }
            },
            other => {
                target.insert(key.clone(), other.clone());
            }
        }
    }
    Ok(())
}
