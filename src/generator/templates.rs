use askama::Template;
use std::fs;
use std::path::Path;

/// One field of an emitted model class.
#[derive(Debug, Clone)]
pub struct FieldView {
    /// In-source type declaration, e.g. `Map<String, Pet>`
    pub declaration: String,
    /// Java field name
    pub name: String,
}

/// One constant of an emitted enum.
#[derive(Debug, Clone)]
pub struct EnumValueView {
    pub constant: String,
    pub wire: String,
}

/// One API version constant of the service-version enum.
#[derive(Debug, Clone)]
pub struct VersionView {
    pub constant: String,
    pub literal: String,
}

/// Template data for a model class file.
///
/// Methods arrive pre-rendered (one string per method, indented one level)
/// so the template only lays out the class shell.
#[derive(Template)]
#[template(path = "model_class.java.txt", escape = "none")]
pub struct ModelClassTemplateData {
    pub package: String,
    pub imports: Vec<String>,
    /// Complete comment lines including the `/**` and `*/` delimiters
    pub javadoc: Vec<String>,
    pub name: String,
    /// `" extends Base"` or empty, precomputed
    pub extends: String,
    /// Hierarchy bases stay extensible; everything else is final
    pub is_final: bool,
    pub fields: Vec<FieldView>,
    pub methods: Vec<String>,
}

/// Template data for a fixed (closed) enum file.
#[derive(Template)]
#[template(path = "fixed_enum.java.txt", escape = "none")]
pub struct FixedEnumTemplateData {
    pub package: String,
    pub javadoc: Vec<String>,
    pub name: String,
    pub values: Vec<EnumValueView>,
}

/// Template data for an expandable (open) string-enum file.
#[derive(Template)]
#[template(path = "expandable_enum.java.txt", escape = "none")]
pub struct ExpandableEnumTemplateData {
    pub package: String,
    pub import: String,
    pub javadoc: Vec<String>,
    pub name: String,
    pub values: Vec<EnumValueView>,
}

/// Template data for the service client class file.
#[derive(Template)]
#[template(path = "service_client.java.txt", escape = "none")]
pub struct ServiceClientTemplateData {
    pub package: String,
    pub imports: Vec<String>,
    pub javadoc: Vec<String>,
    pub name: String,
    pub version_type: String,
    pub methods: Vec<String>,
}

/// Template data for the public client interface file.
#[derive(Template)]
#[template(path = "client_interface.java.txt", escape = "none")]
pub struct ClientInterfaceTemplateData {
    pub package: String,
    pub imports: Vec<String>,
    pub javadoc: Vec<String>,
    pub name: String,
    pub methods: Vec<String>,
}

/// Template data for the service-version enum file.
#[derive(Template)]
#[template(path = "service_version.java.txt", escape = "none")]
pub struct ServiceVersionTemplateData {
    pub package: String,
    pub import: String,
    pub title: String,
    pub name: String,
    pub versions: Vec<VersionView>,
    pub latest: String,
}

/// Write a model class file
///
/// # Errors
///
/// Returns an error if template rendering or file writing fails
pub fn write_model_class(
    path: &Path,
    data: &ModelClassTemplateData,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        println!("⚠️  Skipping existing model file: {path:?}");
        return Ok(());
    }
    fs::write(path, data.render()?)?;
    println!("✅ Generated model: {path:?}");
    Ok(())
}

/// Write a fixed or expandable enum file
///
/// # Errors
///
/// Returns an error if template rendering or file writing fails
pub fn write_enum(path: &Path, rendered: String, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        println!("⚠️  Skipping existing enum file: {path:?}");
        return Ok(());
    }
    fs::write(path, rendered)?;
    println!("✅ Generated enum: {path:?}");
    Ok(())
}

/// Write the service client class file
///
/// # Errors
///
/// Returns an error if template rendering or file writing fails
pub fn write_service_client(
    path: &Path,
    data: &ServiceClientTemplateData,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        println!("⚠️  Skipping existing client file: {path:?}");
        return Ok(());
    }
    fs::write(path, data.render()?)?;
    println!("✅ Generated client: {path:?}");
    Ok(())
}

/// Write the public client interface file
///
/// # Errors
///
/// Returns an error if template rendering or file writing fails
pub fn write_client_interface(
    path: &Path,
    data: &ClientInterfaceTemplateData,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        println!("⚠️  Skipping existing interface file: {path:?}");
        return Ok(());
    }
    fs::write(path, data.render()?)?;
    println!("✅ Generated interface: {path:?}");
    Ok(())
}

/// Write the service-version enum file
///
/// # Errors
///
/// Returns an error if template rendering or file writing fails
pub fn write_service_version(
    path: &Path,
    data: &ServiceVersionTemplateData,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        println!("⚠️  Skipping existing version file: {path:?}");
        return Ok(());
    }
    fs::write(path, data.render()?)?;
    println!("✅ Generated service version: {path:?}");
    Ok(())
}
