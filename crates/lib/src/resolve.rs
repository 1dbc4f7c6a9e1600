//! Path resolution for output and input identifiers.
//!
//! An identifier is one of:
//! - home-relative: `~` or `~/...`, anchored at the user's home directory
//! - absolute: used as-is
//! - relative: anchored at the base directory (the build-mapping file's directory)
//!
//! Identifiers containing glob metacharacters (`*`, `?`, `[`) are expanded
//! against the filesystem after anchoring, whatever their anchor. All
//! other identifiers resolve to exactly one path, existing or not.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::trace;

use crate::build::BuildError;

const GLOB_METACHARS: &[char] = &['*', '?', '['];

/// Resolve an identifier into absolute paths.
///
/// Literal identifiers yield a single path. Patterns yield every matching
/// regular file, sorted by full path; no match is an empty result.
pub fn resolve(identifier: &str, base_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
  let (anchor, rest) = split_anchor(identifier, base_dir)?;

  if !is_pattern(rest) {
    let literal = match anchor {
      Some(dir) => dir.join(rest),
      None => PathBuf::from(rest),
    };
    return Ok(vec![normalize(&literal)]);
  }

  let pattern = match anchor {
    Some(dir) => {
      let escaped = Pattern::escape(&dir.to_string_lossy());
      format!("{}/{}", escaped.trim_end_matches(['/', '\\']), rest)
    }
    None => rest.to_string(),
  };

  expand(identifier, &pattern)
}

/// Check whether an identifier contains glob metacharacters.
pub fn is_pattern(identifier: &str) -> bool {
  identifier.contains(GLOB_METACHARS)
}

/// Lexically normalize a path: drop `.` components and let `..` pop one.
///
/// Does not touch the filesystem, so symlinks are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::ParentDir => {
        normalized.pop();
      }
      Component::CurDir => {}
      _ => normalized.push(component),
    }
  }
  normalized
}

/// Split an identifier into the directory it is anchored at and the rest.
///
/// Absolute identifiers have no anchor.
fn split_anchor<'a>(identifier: &'a str, base_dir: &Path) -> Result<(Option<PathBuf>, &'a str), BuildError> {
  if let Some(rest) = home_relative(identifier) {
    let home = dirs::home_dir().ok_or_else(|| BuildError::HomeDirUnavailable {
      identifier: identifier.to_string(),
    })?;
    return Ok((Some(home), rest));
  }

  if Path::new(identifier).is_absolute() {
    return Ok((None, identifier));
  }

  let base = if base_dir.is_absolute() {
    base_dir.to_path_buf()
  } else {
    std::path::absolute(base_dir).map_err(|e| BuildError::io(base_dir, e))?
  };
  Ok((Some(base), identifier))
}

/// `~` and `~/rest` are home-relative; `~name` is an ordinary relative name.
fn home_relative(identifier: &str) -> Option<&str> {
  let rest = identifier.strip_prefix('~')?;
  if rest.is_empty() {
    return Some(rest);
  }
  rest.strip_prefix(['/', '\\'])
}

fn expand(identifier: &str, pattern: &str) -> Result<Vec<PathBuf>, BuildError> {
  let options = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
  };

  let entries = glob::glob_with(pattern, options).map_err(|source| BuildError::InvalidPattern {
    pattern: identifier.to_string(),
    source,
  })?;

  let mut matches = Vec::new();
  for entry in entries {
    let path = entry.map_err(|e| {
      let path = e.path().to_path_buf();
      BuildError::Io { path, source: e.into() }
    })?;

    if path.is_file() {
      trace!(pattern = identifier, path = %path.display(), "glob match");
      matches.push(normalize(&path));
    }
  }

  matches.sort();
  Ok(matches)
}
