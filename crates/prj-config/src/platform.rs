//! Build target platforms

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A build target platform of the authoring environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Platform {
    Windows,
    WebPlayer,
    Android,
    #[serde(rename = "WebGL")]
    WebGl,
    #[serde(rename = "OSX")]
    OsX,
    Linux,
    #[serde(rename = "iOS")]
    Ios,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Windows,
        Platform::WebPlayer,
        Platform::Android,
        Platform::WebGl,
        Platform::OsX,
        Platform::Linux,
        Platform::Ios,
    ];

    /// Canonical spelling, as used in config files and folder names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::WebPlayer => "WebPlayer",
            Self::Android => "Android",
            Self::WebGl => "WebGL",
            Self::OsX => "OSX",
            Self::Linux => "Linux",
            Self::Ios => "iOS",
        }
    }

    /// Parse a list of platform names, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(values: &[S]) -> Result<Vec<Platform>> {
        values.iter().map(|v| v.as_ref().parse()).collect()
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownPlatform {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
