//! Bridge to externally authored build projects
//!
//! A package may link a prebuilt MSBuild project instead of shipping
//! sources. The resolver only needs two facts from that project: the name
//! it builds and the projects it references.

use crate::{Error, Result};
use prj_fs::NormalizedPath;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Macro MSBuild expands to the project file's stem.
pub const MSBUILD_PROJECT_NAME_MACRO: &str = "$(MSBuildProjectName)";

const ASSEMBLY_NAME_PATH: [&str; 3] = ["Project", "PropertyGroup", "AssemblyName"];
const REFERENCE_NAME_PATH: [&str; 4] = ["Project", "ItemGroup", "ProjectReference", "Name"];

/// What an external project declares about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProject {
    pub unit_name: String,
    pub references: Vec<String>,
}

/// Reads external build projects.
pub trait ExternalProjectBridge {
    fn analyze(&self, path: &NormalizedPath) -> Result<ExternalProject>;
}

/// [`ExternalProjectBridge`] for `.csproj` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsProjBridge;

impl CsProjBridge {
    pub fn new() -> Self {
        Self
    }

    /// Parse csproj XML that was read from `path`.
    pub fn parse(path: &NormalizedPath, xml: &str) -> Result<ExternalProject> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut stack: Vec<String> = Vec::new();
        let mut assembly_name: Option<String> = None;
        let mut references = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(element)) => {
                    stack.push(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
                }
                Ok(Event::End(_)) => {
                    stack.pop();
                }
                Ok(Event::Text(text)) => {
                    let value = text
                        .unescape()
                        .map_err(|e| parse_error(path, e.to_string()))?
                        .trim()
                        .to_string();
                    if value.is_empty() {
                        continue;
                    }
                    if stack == ASSEMBLY_NAME_PATH {
                        assembly_name.get_or_insert(value);
                    } else if stack == REFERENCE_NAME_PATH {
                        references.push(value);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(parse_error(
                        path,
                        format!("at byte {}: {e}", reader.buffer_position()),
                    ));
                }
            }
        }

        let assembly_name =
            assembly_name.ok_or_else(|| parse_error(path, "no AssemblyName declared".into()))?;

        let unit_name = if assembly_name == MSBUILD_PROJECT_NAME_MACRO {
            path.file_stem()
                .ok_or_else(|| parse_error(path, "project file has no name".into()))?
                .to_string()
        } else {
            assembly_name
        };

        Ok(ExternalProject {
            unit_name,
            references,
        })
    }
}

impl ExternalProjectBridge for CsProjBridge {
    fn analyze(&self, path: &NormalizedPath) -> Result<ExternalProject> {
        let xml = prj_fs::io::read_text(path)?;
        let project = Self::parse(path, &xml)?;
        tracing::debug!(
            path = %path,
            unit = %project.unit_name,
            references = project.references.len(),
            "Analyzed external project"
        );
        Ok(project)
    }
}

fn parse_error(path: &NormalizedPath, message: String) -> Error {
    Error::ExternalProjectParse {
        path: path.clone(),
        message,
    }
}
