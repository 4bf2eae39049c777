//! Transitive dependency closure with cycle detection

use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Compute the transitive closure of every node in `edges`.
///
/// Dependencies that are not themselves keys of `edges` are skipped: they
/// belong to packages that were filtered out for the current platform.
/// Nodes are visited in key order, so the reported cycle is deterministic.
///
/// # Errors
///
/// Returns [`Error::CircularDependency`] with the path from the first
/// occurrence of the repeated node through its repeat.
pub fn transitive_closures(
    edges: &BTreeMap<String, Vec<String>>,
) -> Result<BTreeMap<String, BTreeSet<String>>> {
    let mut context = ClosureContext::new(edges);
    for name in edges.keys() {
        context.resolve(name)?;
    }
    Ok(context.resolved)
}

struct ClosureContext<'a> {
    edges: &'a BTreeMap<String, Vec<String>>,
    in_progress: Vec<&'a str>,
    resolved: BTreeMap<String, BTreeSet<String>>,
}

impl<'a> ClosureContext<'a> {
    fn new(edges: &'a BTreeMap<String, Vec<String>>) -> Self {
        Self {
            edges,
            in_progress: Vec::new(),
            resolved: BTreeMap::new(),
        }
    }

    fn resolve(&mut self, name: &'a str) -> Result<()> {
        if self.resolved.contains_key(name) {
            return Ok(());
        }

        if let Some(start) = self.in_progress.iter().position(|node| *node == name) {
            let mut cycle: Vec<String> = self.in_progress[start..]
                .iter()
                .map(|node| node.to_string())
                .collect();
            cycle.push(name.to_string());
            return Err(Error::CircularDependency { cycle });
        }

        let edges = self.edges;
        let Some(dependencies) = edges.get(name) else {
            return Ok(());
        };

        self.in_progress.push(name);

        let mut closure = BTreeSet::new();
        for dependency in dependencies {
            if !edges.contains_key(dependency) {
                continue;
            }
            self.resolve(dependency)?;
            closure.insert(dependency.clone());
            if let Some(nested) = self.resolved.get(dependency) {
                closure.extend(nested.iter().cloned());
            }
        }

        self.in_progress.pop();
        self.resolved.insert(name.to_string(), closure);
        Ok(())
    }
}
