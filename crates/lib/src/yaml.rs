//! YAML document I/O.
//!
//! Documents are `serde_yaml::Value`s. Mapping key order is insertion order
//! on both read and write, so output is never re-sorted. On read, a key
//! repeated within one mapping keeps its first position and its last value,
//! and `<<` merge keys are resolved.

use std::fs;
use std::path::Path;

use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::build::BuildError;
use crate::merge::empty_document;

/// Load a YAML document from `path`.
///
/// Empty, whitespace-only and comment-only files load as an empty mapping.
pub fn load(path: &Path) -> Result<Value, BuildError> {
  let content = fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
  let doc = parse(&content).map_err(|source| BuildError::Parse {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(path = %path.display(), "loaded source");
  Ok(doc)
}

/// Parse YAML text, treating a document without content as an empty mapping.
pub fn parse(content: &str) -> Result<Value, serde_yaml::Error> {
  if content.trim().is_empty() {
    return Ok(empty_document());
  }

  match from_str(content)? {
    Value::Null => Ok(empty_document()),
    doc => Ok(doc),
  }
}

/// Parse one YAML document, letting repeated keys overwrite and resolving
/// merge keys.
pub fn from_str(content: &str) -> Result<Value, serde_yaml::Error> {
  let Document(mut doc) = serde_yaml::from_str(content)?;
  doc.apply_merge()?;
  Ok(doc)
}

/// A `Value` whose mappings accept repeated keys, last value wins.
struct Document(Value);

impl<'de> Deserialize<'de> for Document {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_any(DocumentVisitor).map(Document)
  }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
  type Value = Value;

  fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("any YAML value")
  }

  fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
    Ok(Value::Bool(v))
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
    Ok(Value::Number(v.into()))
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
    Ok(Value::Number(v.into()))
  }

  fn visit_i128<E: de::Error>(self, v: i128) -> Result<Value, E> {
    match (u64::try_from(v), i64::try_from(v)) {
      (Ok(n), _) => Ok(Value::Number(n.into())),
      (_, Ok(n)) => Ok(Value::Number(n.into())),
      _ => Ok(Value::String(v.to_string())),
    }
  }

  fn visit_u128<E: de::Error>(self, v: u128) -> Result<Value, E> {
    match u64::try_from(v) {
      Ok(n) => Ok(Value::Number(n.into())),
      Err(_) => Ok(Value::String(v.to_string())),
    }
  }

  fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
    Ok(Value::Number(v.into()))
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
    Ok(Value::String(v.to_string()))
  }

  fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
    Ok(Value::String(v))
  }

  fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
    Ok(Value::Null)
  }

  fn visit_none<E: de::Error>(self) -> Result<Value, E> {
    Ok(Value::Null)
  }

  fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
    Document::deserialize(deserializer).map(|Document(v)| v)
  }

  fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
    let mut items = Vec::new();
    while let Some(Document(item)) = seq.next_element()? {
      items.push(item);
    }
    Ok(Value::Sequence(items))
  }

  fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
    let mut mapping = Mapping::new();
    while let Some((Document(key), Document(value))) = map.next_entry()? {
      // insert keeps an existing key's position
      mapping.insert(key, value);
    }
    Ok(Value::Mapping(mapping))
  }

  fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Value, A::Error> {
    let (tag, contents) = data.variant::<String>()?;
    let Document(value) = contents.newtype_variant()?;
    Ok(Value::Tagged(Box::new(TaggedValue {
      tag: Tag::new(tag),
      value,
    })))
  }
}

/// Serialize a document to YAML text.
pub fn to_string(doc: &Value) -> Result<String, serde_yaml::Error> {
  serde_yaml::to_string(doc)
}

/// Write a document to `path`, creating parent directories as needed.
///
/// Existing content is overwritten.
pub fn dump(doc: &Value, path: &Path) -> Result<(), BuildError> {
  let content = to_string(doc).map_err(|source| BuildError::Serialize {
    path: path.to_path_buf(),
    source,
  })?;

  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
  }

  fs::write(path, content).map_err(|e| BuildError::io(path, e))?;
  debug!(path = %path.display(), "wrote output");
  Ok(())
}
