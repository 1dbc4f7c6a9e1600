//! Deep merge of YAML documents.
//!
//! Merge semantics:
//! - Mappings: merged key by key, recursively
//! - Sequences: replaced wholesale (last wins)
//! - Scalars and null: replaced (last wins)

use serde_yaml::{Mapping, Value};

/// Deep merge `overlay` onto `base`.
///
/// Keys already present in `base` keep their position; keys introduced by
/// `overlay` are appended in overlay order. Only mapping/mapping pairs are
/// merged, every other pairing yields `overlay`.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
  match (base, overlay) {
    (Value::Mapping(mut base_map), Value::Mapping(overlay_map)) => {
      for (key, overlay_value) in overlay_map {
        match base_map.get_mut(&key) {
          Some(existing) => {
            let base_value = std::mem::replace(existing, Value::Null);
            *existing = deep_merge(base_value, overlay_value);
          }
          None => {
            base_map.insert(key, overlay_value);
          }
        }
      }
      Value::Mapping(base_map)
    }

    (_, overlay) => overlay,
  }
}

/// Merge documents in order, starting from an empty mapping.
pub fn merge_all<I>(docs: I) -> Value
where
  I: IntoIterator<Item = Value>,
{
  docs.into_iter().fold(empty_document(), deep_merge)
}

/// The document an output starts from before any source is merged in.
pub fn empty_document() -> Value {
  Value::Mapping(Mapping::new())
}
