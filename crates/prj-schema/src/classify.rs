//! Fixed-point placement and dedicated-project classification
//!
//! Two monotonic rules run over the whole package map until a pass changes
//! nothing:
//!
//! - a Plugins package with any Assets dependency moves to Assets
//! - a package with any dedicated-project dependency becomes dedicated
//!
//! Placements only move Plugins to Assets and the dedicated flag only moves
//! from false to true, so the loop ends after at most one pass per package.

use crate::model::{PackageRecord, Placement};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Which rule changed a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PromotionKind {
    /// Moved from Plugins to Assets because a dependency lives in Assets
    MovedToAssets,
    /// Became a dedicated project because a dependency is one
    DedicatedProject,
    /// Became a dedicated project because a prebuilt project references it
    PrebuiltDependency,
}

impl fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PromotionKind::MovedToAssets => "moved to Assets",
            PromotionKind::DedicatedProject => "dedicated project",
            PromotionKind::PrebuiltDependency => "prebuilt dependency",
        };
        f.write_str(text)
    }
}

/// One change made during classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Promotion {
    pub package: String,
    pub kind: PromotionKind,

    /// The dependency (or dependent, for prebuilt exposure) that caused it
    pub cause: String,

    /// Pass number; 0 for changes made before the fixed-point loop
    pub pass: usize,
}

/// Make every package a prebuilt project can see a dedicated project.
///
/// Prebuilt projects reference their dependencies by project, so those
/// dependencies cannot be folded into an aggregate unit. Runs before the
/// fixed point and follows explicit dependencies recursively.
pub fn expose_prebuilt_dependencies(
    packages: &mut BTreeMap<String, PackageRecord>,
) -> Vec<Promotion> {
    let mut promotions = Vec::new();
    let mut pending: Vec<String> = packages
        .values()
        .filter(|record| record.is_prebuilt() && record.wants_dedicated_project)
        .map(|record| record.name.clone())
        .collect();

    while let Some(name) = pending.pop() {
        let dependencies = match packages.get(&name) {
            Some(record) => record.explicit_dependencies.clone(),
            None => continue,
        };
        for dependency in dependencies {
            let Some(record) = packages.get_mut(&dependency) else {
                continue;
            };
            if record.wants_dedicated_project {
                continue;
            }
            record.wants_dedicated_project = true;
            tracing::debug!(
                package = %dependency,
                dependent = %name,
                "Exposed prebuilt dependency as dedicated project"
            );
            promotions.push(Promotion {
                package: dependency.clone(),
                kind: PromotionKind::PrebuiltDependency,
                cause: name.clone(),
                pass: 0,
            });
            pending.push(dependency);
        }
    }

    promotions
}

/// Apply both promotion rules until a full pass changes nothing.
///
/// Requires `all_dependencies` to be populated. Returns every promotion in
/// the order it was made.
pub fn classify(packages: &mut BTreeMap<String, PackageRecord>) -> Vec<Promotion> {
    let names: Vec<String> = packages.keys().cloned().collect();
    let mut promotions = Vec::new();
    let mut pass = 0;

    loop {
        pass += 1;
        let mut changed = false;

        for name in &names {
            let Some(record) = packages.get(name) else {
                continue;
            };

            let assets_cause = if record.placement == Placement::Plugins {
                record
                    .dependencies()
                    .find(|dep| {
                        packages
                            .get(*dep)
                            .is_some_and(|other| other.placement == Placement::Assets)
                    })
                    .map(str::to_string)
            } else {
                None
            };

            let dedicated_cause = if record.wants_dedicated_project {
                None
            } else {
                record
                    .dependencies()
                    .find(|dep| {
                        packages
                            .get(*dep)
                            .is_some_and(|other| other.wants_dedicated_project)
                    })
                    .map(str::to_string)
            };

            let Some(record) = packages.get_mut(name) else {
                continue;
            };

            if let Some(cause) = assets_cause {
                record.placement = Placement::Assets;
                tracing::debug!(
                    package = %name,
                    dependency = %cause,
                    pass,
                    "Moved package to Assets"
                );
                promotions.push(Promotion {
                    package: name.clone(),
                    kind: PromotionKind::MovedToAssets,
                    cause,
                    pass,
                });
                changed = true;
            }

            if let Some(cause) = dedicated_cause {
                record.wants_dedicated_project = true;
                tracing::debug!(
                    package = %name,
                    dependency = %cause,
                    pass,
                    "Promoted package to dedicated project"
                );
                promotions.push(Promotion {
                    package: name.clone(),
                    kind: PromotionKind::DedicatedProject,
                    cause,
                    pass,
                });
                changed = true;
            }
        }

        if !changed {
            tracing::debug!(
                passes = pass,
                promotions = promotions.len(),
                "Classification reached fixed point"
            );
            return promotions;
        }
    }
}

/// Fail if a package pinned to Plugins ended up in Assets.
pub fn check_forced_placement(
    packages: &BTreeMap<String, PackageRecord>,
    promotions: &[Promotion],
) -> Result<()> {
    let Some(record) = packages
        .values()
        .find(|record| record.force_plugins_placement && record.placement == Placement::Assets)
    else {
        return Ok(());
    };

    let reason = match promotions
        .iter()
        .find(|p| p.package == record.name && p.kind == PromotionKind::MovedToAssets)
    {
        Some(promotion) => format!(
            "it depends on '{}' which is in the Assets directory",
            promotion.cause
        ),
        None => "it is listed under AssetsFolder or sets ForceAssetsDirectory".to_string(),
    };

    Err(Error::ForcedPlacementViolation {
        package: record.name.clone(),
        reason,
    })
}
