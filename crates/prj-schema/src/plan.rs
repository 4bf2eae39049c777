//! Views of a schema shaped for the two downstream consumers: directory
//! linking and build project generation.

use crate::model::{ExternalLink, OutputRoute, Placement};
use crate::schema::ProjectSchema;
use prj_fs::NormalizedPath;
use serde::Serialize;

/// One directory link to create inside the generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry<'a> {
    pub name: &'a str,
    pub source_dir: &'a NormalizedPath,
    pub route: OutputRoute,
    pub placement: Placement,
}

impl LinkEntry<'_> {
    /// Where the link goes, given the generated project's root directory.
    pub fn link_path(&self, project_root: &NormalizedPath) -> NormalizedPath {
        project_root.join(self.route.relative_dir()).join(self.name)
    }
}

/// A package compiled as its own build project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedicatedUnit<'a> {
    pub name: &'a str,
    pub source_dir: &'a NormalizedPath,
    pub placement: Placement,

    /// Transitive dependencies that are dedicated projects too
    pub references: Vec<&'a str>,

    pub prebuilt: Option<&'a ExternalLink>,
}

/// The build project compiling every non-dedicated package of one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateUnit<'a> {
    pub placement: Placement,
    pub members: Vec<&'a str>,
}

impl AggregateUnit<'_> {
    pub fn name(&self) -> &'static str {
        match self.placement {
            Placement::Plugins => "PluginsFolder",
            Placement::Assets => "AssetsFolder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan<'a> {
    pub dedicated: Vec<DedicatedUnit<'a>>,
    pub plugins: AggregateUnit<'a>,
    pub assets: AggregateUnit<'a>,
}

impl ProjectSchema {
    /// Every package with the route and bucket it is linked into.
    pub fn link_plan(&self) -> Vec<LinkEntry<'_>> {
        self.packages()
            .values()
            .map(|record| LinkEntry {
                name: &record.name,
                source_dir: &record.source_dir,
                route: record.output_route(),
                placement: record.placement,
            })
            .collect()
    }

    pub fn build_plan(&self) -> BuildPlan<'_> {
        let dedicated = self
            .dedicated_projects()
            .map(|record| DedicatedUnit {
                name: &record.name,
                source_dir: &record.source_dir,
                placement: record.placement,
                references: record
                    .dependencies()
                    .filter(|dep| {
                        self.package(dep)
                            .is_some_and(|other| other.wants_dedicated_project)
                    })
                    .collect(),
                prebuilt: record.external_link.as_ref(),
            })
            .collect();

        BuildPlan {
            dedicated,
            plugins: self.aggregate(Placement::Plugins),
            assets: self.aggregate(Placement::Assets),
        }
    }

    fn aggregate(&self, placement: Placement) -> AggregateUnit<'_> {
        AggregateUnit {
            placement,
            members: self
                .packages_in(placement)
                .filter(|record| !record.wants_dedicated_project)
                .map(|record| record.name.as_str())
                .collect(),
        }
    }
}
