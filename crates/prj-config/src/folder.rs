//! Package folder types

use crate::{Error, Platform, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Per-package tag selecting a non-default output route.
///
/// Several folder types only make sense on one platform; for those the
/// implied platform replaces any explicit `Platforms` list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderType {
    #[default]
    Normal,
    WebGl,
    AndroidProject,
    AndroidLibraries,
    Ios,
    StreamingAssets,
}

impl FolderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::WebGl => "webgl",
            Self::AndroidProject => "androidproject",
            Self::AndroidLibraries => "androidlibraries",
            Self::Ios => "ios",
            Self::StreamingAssets => "streamingassets",
        }
    }

    /// The single platform this folder type is restricted to, if any.
    pub fn implied_platform(&self) -> Option<Platform> {
        match self {
            Self::AndroidProject | Self::AndroidLibraries => Some(Platform::Android),
            Self::Ios => Some(Platform::Ios),
            Self::WebGl => Some(Platform::WebGl),
            Self::Normal | Self::StreamingAssets => None,
        }
    }
}

impl FromStr for FolderType {
    type Err = Error;

    /// Parses case-insensitively; an empty value means [`FolderType::Normal`].
    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().to_lowercase();
        match value.as_str() {
            "" | "normal" => Ok(Self::Normal),
            "webgl" => Ok(Self::WebGl),
            "androidproject" => Ok(Self::AndroidProject),
            "androidlibraries" => Ok(Self::AndroidLibraries),
            "ios" => Ok(Self::Ios),
            "streamingassets" => Ok(Self::StreamingAssets),
            _ => Err(Error::UnknownFolderType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FolderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
