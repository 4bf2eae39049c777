//! Read-only typed lookups over merged configuration

use crate::{Error, Result};
use serde_yaml::Value;

/// Hierarchical key lookup over one or more merged config sources.
///
/// Implementors only provide [`lookup_all`](ConfigView::lookup_all); the typed
/// getters are shared so every source follows the same coercion rules.
pub trait ConfigView {
    /// Every value stored at `path`, highest priority first.
    ///
    /// An empty result means the key is not set anywhere.
    fn lookup_all<'a>(&'a self, path: &[&str]) -> Result<Vec<&'a Value>>;

    /// The highest-priority value stored at `path`.
    fn try_get<'a>(&'a self, path: &[&str]) -> Result<Option<&'a Value>> {
        Ok(self.lookup_all(path)?.into_iter().next())
    }

    fn try_get_string(&self, path: &[&str]) -> Result<Option<String>> {
        match self.try_get(path)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(unexpected(path, "string", other)),
        }
    }

    fn get_string(&self, path: &[&str]) -> Result<String> {
        self.try_get_string(path)?.ok_or_else(|| Error::MissingKey {
            key: dotted(path),
        })
    }

    fn try_get_bool(&self, path: &[&str]) -> Result<Option<bool>> {
        match self.try_get(path)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(unexpected(path, "bool", other)),
        }
    }

    /// A list of names, concatenated across every source that sets it.
    ///
    /// Lower-priority sources come first. A null value contributes nothing.
    fn try_get_list(&self, path: &[&str]) -> Result<Option<Vec<String>>> {
        let matches = self.lookup_all(path)?;
        if matches.is_empty() {
            return Ok(None);
        }

        let mut result = Vec::new();
        for value in matches.into_iter().rev() {
            match value {
                Value::Null => {}
                Value::Sequence(items) => {
                    for item in items {
                        result.push(list_item(path, item)?);
                    }
                }
                other => return Err(unexpected(path, "list", other)),
            }
        }
        Ok(Some(result))
    }

    fn get_list(&self, path: &[&str]) -> Result<Vec<String>> {
        self.try_get_list(path)?.ok_or_else(|| Error::MissingKey {
            key: dotted(path),
        })
    }

    /// An ordered map written as a list of single-entry maps.
    ///
    /// Entries from every source are concatenated lowest priority first; a
    /// repeated key keeps its first position and takes the later value.
    fn try_get_ordered_pairs(&self, path: &[&str]) -> Result<Option<Vec<(String, String)>>> {
        let matches = self.lookup_all(path)?;
        if matches.is_empty() {
            return Ok(None);
        }

        let mut result: Vec<(String, String)> = Vec::new();
        for value in matches.into_iter().rev() {
            let items = match value {
                Value::Null => continue,
                Value::Sequence(items) => items,
                other => return Err(unexpected(path, "list of single-entry maps", other)),
            };

            for item in items {
                let entry = item
                    .as_mapping()
                    .filter(|m| m.len() == 1)
                    .and_then(|m| m.iter().next())
                    .ok_or_else(|| Error::InvalidEntry {
                        key: dotted(path),
                        message: "each entry must be a map with exactly one key".into(),
                    })?;
                let key = list_item(path, entry.0)?;
                let pattern = list_item(path, entry.1)?;

                match result.iter_mut().find(|(k, _)| *k == key) {
                    Some(existing) => existing.1 = pattern,
                    None => result.push((key, pattern)),
                }
            }
        }
        Ok(Some(result))
    }
}

/// Join a key path with dots for error messages.
pub(crate) fn dotted(path: &[&str]) -> String {
    path.join(".")
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

pub(crate) fn unexpected(path: &[&str], expected: &'static str, found: &Value) -> Error {
    Error::UnexpectedType {
        key: dotted(path),
        expected,
        found: kind(found),
    }
}

// Names are strings, but YAML happily reads `- 2048` as a number.
fn list_item(path: &[&str], item: &Value) -> Result<String> {
    match item {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(unexpected(path, "string", other)),
    }
}
