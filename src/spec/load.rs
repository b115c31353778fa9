use super::build::build_operations;
use super::types::{OperationMeta, ServiceDescription};

/// Load a service description from a YAML or JSON file.
///
/// Returns the parsed description together with the project slug derived
/// from the info title (lowercased, non-alphanumerics collapsed to `_`).
pub fn load_description(file_path: &str) -> anyhow::Result<(ServiceDescription, String)> {
    let content = std::fs::read_to_string(file_path)?;
    let desc: ServiceDescription =
        if file_path.ends_with(".yaml") || file_path.ends_with(".yml") {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

    let slug = slug_from_title(&desc.info.title);
    Ok((desc, slug))
}

/// Load a description and resolve it to generation-ready operations.
pub fn load_operations(
    file_path: &str,
) -> anyhow::Result<(ServiceDescription, Vec<OperationMeta>, String)> {
    let (desc, slug) = load_description(file_path)?;
    let operations = build_operations(&desc)?;
    Ok((desc, operations, slug))
}

fn slug_from_title(title: &str) -> String {
    title
        .to_lowercase()
        .replace(|c: char| !c.is_ascii_alphanumeric(), "_")
        .trim_matches('_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_title() {
        assert_eq!(slug_from_title("Pet Store"), "pet_store");
        assert_eq!(slug_from_title("  Widgets v2! "), "widgets_v2");
    }
}
