//! Text rendering of the explicit dependency tree, for debug logs

use crate::model::{PackageRecord, Placement};
use std::collections::{BTreeMap, HashSet};

const INDENT: &str = "    ";

/// Render each package with its explicit dependencies nested below it.
///
/// Roots are ordered Assets first, then by descending number of explicit
/// dependencies, then by name. A package already printed is shown again
/// only as `|~name`.
pub fn render_dependency_tree(packages: &BTreeMap<String, PackageRecord>) -> String {
    let mut roots: Vec<&PackageRecord> = packages.values().collect();
    roots.sort_by(|a, b| {
        (a.placement == Placement::Plugins)
            .cmp(&(b.placement == Placement::Plugins))
            .then_with(|| b.explicit_dependencies.len().cmp(&a.explicit_dependencies.len()))
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut out = String::new();
    let mut done = HashSet::new();
    for root in roots {
        if !done.contains(root.name.as_str()) {
            render_node(root, 1, packages, &mut done, &mut out);
        }
    }
    out
}

fn render_node<'a>(
    record: &'a PackageRecord,
    depth: usize,
    packages: &'a BTreeMap<String, PackageRecord>,
    done: &mut HashSet<&'a str>,
    out: &mut String,
) {
    done.insert(record.name.as_str());

    let indent = format!("{}{INDENT}", format!("{INDENT}.").repeat(depth - 1));
    out.push_str(&format!("{indent}|-{}\n", record.name));

    for dependency in &record.explicit_dependencies {
        let Some(child) = packages.get(dependency) else {
            continue;
        };
        if done.contains(dependency.as_str()) {
            out.push_str(&format!("{indent}.{INDENT}|~{dependency}\n"));
        } else {
            render_node(child, depth + 1, packages, done, out);
        }
    }
}
