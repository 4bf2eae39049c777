//! Minimal MSBuild project file bodies.

/// Namespace used by classic MSBuild project files.
pub const MSBUILD_NS: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

/// Render a project file declaring `assembly_name` and referencing
/// `references` by name.
pub fn csproj_xml(assembly_name: &str, references: &[&str]) -> String {
    let mut body = String::new();
    body.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    body.push_str(&format!(
        "<Project ToolsVersion=\"4.0\" DefaultTargets=\"Build\" xmlns=\"{MSBUILD_NS}\">\n"
    ));
    body.push_str("  <PropertyGroup>\n");
    body.push_str("    <ProjectGuid>{6B2A5F1C-2D7E-4A5B-9C1D-0E3F4A5B6C7D}</ProjectGuid>\n");
    body.push_str(&format!("    <AssemblyName>{assembly_name}</AssemblyName>\n"));
    body.push_str("  </PropertyGroup>\n");
    body.push_str("  <ItemGroup>\n");
    body.push_str("    <Compile Include=\"Properties\\AssemblyInfo.cs\" />\n");
    body.push_str("  </ItemGroup>\n");

    if !references.is_empty() {
        body.push_str("  <ItemGroup>\n");
        for reference in references {
            body.push_str(&format!(
                "    <ProjectReference Include=\"..\\{reference}\\{reference}.csproj\">\n"
            ));
            body.push_str("      <Project>{00000000-0000-0000-0000-000000000000}</Project>\n");
            body.push_str(&format!("      <Name>{reference}</Name>\n"));
            body.push_str("    </ProjectReference>\n");
        }
        body.push_str("  </ItemGroup>\n");
    }

    body.push_str("</Project>\n");
    body
}
