//! Config view over an ordered stack of documents
//!
//! Later layers override earlier ones. Within the stack a key may carry a
//! suffix: `Key!` wins over every plain `Key`, and `Key?` is consulted only
//! when no layer sets `Key` at all.

use crate::keys::{FALLBACK_SUFFIX, OVERRIDE_SUFFIX, base_key};
use crate::view::{ConfigView, kind};
use crate::{Error, Result};
use prj_fs::{ConfigStore, NormalizedPath};
use serde_yaml::Value;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
struct ConfigLayer {
    source: String,
    root: Value,
}

/// A stack of config documents queried through [`ConfigView`].
#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    layers: Vec<ConfigLayer>,
}

impl LayeredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`push_layer`](Self::push_layer).
    pub fn with_layer(mut self, source: impl Into<String>, root: Value) -> Self {
        self.push_layer(source, root);
        self
    }

    /// Add a layer with higher priority than all existing layers.
    ///
    /// Empty documents (null roots) are skipped.
    pub fn push_layer(&mut self, source: impl Into<String>, root: Value) {
        let source = source.into();
        if root.is_null() {
            tracing::debug!(%source, "Skipping empty config layer");
            return;
        }
        self.layers.push(ConfigLayer { source, root });
    }

    /// Load every path that exists as a file, in order, as successive layers.
    pub fn load_existing<'p>(paths: impl IntoIterator<Item = &'p NormalizedPath>) -> Result<Self> {
        let store = ConfigStore::new();
        let mut config = Self::new();

        for path in paths {
            if !path.is_file() {
                tracing::trace!(%path, "Config layer not present");
                continue;
            }
            tracing::debug!(%path, "Loading config layer");
            let root: Value = store.load(path)?;
            config.push_layer(path.to_string(), root);
        }

        Ok(config)
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Source descriptions, lowest priority first.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.source.as_str())
    }

    /// Top-level keys of every layer, with override/fallback suffixes removed.
    pub fn top_level_keys(&self) -> BTreeSet<String> {
        self.layers
            .iter()
            .filter_map(|l| l.root.as_mapping())
            .flat_map(|m| m.keys())
            .filter_map(|k| k.as_str())
            .map(|k| base_key(k).to_string())
            .collect()
    }

    fn collect(&self, path: &[&str], suffix: &str) -> Result<Vec<&Value>> {
        let Some((last, parents)) = path.split_last() else {
            return Ok(Vec::new());
        };
        let leaf = format!("{last}{suffix}");
        let mut found = Vec::new();

        'layers: for layer in self.layers.iter().rev() {
            let mut current = &layer.root;

            for depth in 0..=parents.len() {
                let mapping = match current {
                    Value::Mapping(mapping) => mapping,
                    // An empty section behaves like a missing one
                    Value::Null if depth > 0 => continue 'layers,
                    other => {
                        let key = if depth == 0 {
                            format!("<root of {}>", layer.source)
                        } else {
                            path[..depth].join(".")
                        };
                        return Err(Error::UnexpectedType {
                            key,
                            expected: "mapping",
                            found: kind(other),
                        });
                    }
                };

                if depth == parents.len() {
                    if let Some(value) = mapping.get(leaf.as_str()) {
                        found.push(value);
                    }
                    continue 'layers;
                }

                match mapping.get(parents[depth]) {
                    Some(next) => current = next,
                    None => continue 'layers,
                }
            }
        }

        Ok(found)
    }
}

impl ConfigView for LayeredConfig {
    fn lookup_all<'a>(&'a self, path: &[&str]) -> Result<Vec<&'a Value>> {
        let overrides = self.collect(path, OVERRIDE_SUFFIX)?;
        if !overrides.is_empty() {
            return Ok(overrides);
        }

        let plain = self.collect(path, "")?;
        if !plain.is_empty() {
            return Ok(plain);
        }

        self.collect(path, FALLBACK_SUFFIX)
    }
}
