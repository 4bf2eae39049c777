//! The resolved, read-only project schema

use crate::classify::Promotion;
use crate::model::{PackageRecord, Placement};
use crate::Result;
use prj_config::Platform;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of resolving one project for one platform.
///
/// Built fresh by every resolution and never modified afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSchema {
    name: String,
    platform: Platform,
    packages: BTreeMap<String, PackageRecord>,
    custom_folder_groups: Vec<(String, String)>,
    settings_path: String,
    promotions: Vec<Promotion>,
}

impl ProjectSchema {
    pub(crate) fn new(
        name: String,
        platform: Platform,
        packages: BTreeMap<String, PackageRecord>,
        custom_folder_groups: Vec<(String, String)>,
        settings_path: String,
        promotions: Vec<Promotion>,
    ) -> Self {
        Self {
            name,
            platform,
            packages,
            custom_folder_groups,
            settings_path,
            promotions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn packages(&self) -> &BTreeMap<String, PackageRecord> {
        &self.packages
    }

    pub fn package(&self, name: &str) -> Option<&PackageRecord> {
        self.packages.get(name)
    }

    /// Solution folder name to package pattern, in configured order.
    pub fn custom_folder_groups(&self) -> &[(String, String)] {
        &self.custom_folder_groups
    }

    pub fn settings_path(&self) -> &str {
        &self.settings_path
    }

    /// Changes made by classification, in the order they happened.
    pub fn promotions(&self) -> &[Promotion] {
        &self.promotions
    }

    pub fn packages_in(&self, placement: Placement) -> impl Iterator<Item = &PackageRecord> {
        self.packages
            .values()
            .filter(move |record| record.placement == placement)
    }

    pub fn dedicated_projects(&self) -> impl Iterator<Item = &PackageRecord> {
        self.packages
            .values()
            .filter(|record| record.wants_dedicated_project)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
