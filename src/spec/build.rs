use super::types::{OperationMeta, ParameterLocation, ServiceDescription, TypeExpr};
use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

#[allow(clippy::expect_used)]
static PATH_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("path parameter pattern is valid")
});

/// One problem found while validating a description document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub location: String,
    pub kind: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

pub fn print_issues(issues: &[ValidationIssue]) {
    eprintln!(
        "\n❌ Service description validation failed. {} issue(s) found:\n",
        issues.len()
    );
    for issue in issues {
        eprintln!("[{}] {}: {}", issue.kind, issue.location, issue.message);
    }
}

pub fn fail_if_issues(issues: Vec<ValidationIssue>) {
    if !issues.is_empty() {
        print_issues(&issues);
        std::process::exit(1);
    }
}

/// Validate a description without building anything.
///
/// Checks reference resolution, hierarchy wiring, enum shape, and HTTP
/// methods. The returned list is empty for a well-formed document.
pub fn validate_description(desc: &ServiceDescription) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (name, model) in &desc.models {
        let location = format!("models.{name}");
        for prop in &model.properties {
            check_refs(
                desc,
                &prop.schema,
                &format!("{location}.properties.{}", prop.name),
                &mut issues,
            );
        }
        if let Some(parent) = &model.parent {
            match desc.models.get(parent) {
                None => issues.push(ValidationIssue::new(
                    &location,
                    "unresolved_parent",
                    format!("parent model '{parent}' is not declared"),
                )),
                Some(base) if base.discriminator.is_none() => {
                    issues.push(ValidationIssue::new(
                        &location,
                        "missing_discriminator",
                        format!("parent model '{parent}' declares no discriminator property"),
                    ))
                }
                Some(_) => {
                    if model.discriminator_value.is_none() {
                        issues.push(ValidationIssue::new(
                            &location,
                            "missing_discriminator_value",
                            "child model declares no discriminatorValue",
                        ));
                    }
                }
            }
        }
    }

    for (name, schema) in &desc.enums {
        if schema.values.is_empty() {
            issues.push(ValidationIssue::new(
                format!("enums.{name}"),
                "empty_enum",
                "enum declares no values",
            ));
        }
    }

    for op in &desc.operations {
        let location = format!("operations.{}", op.name);
        if Method::from_bytes(op.method.to_ascii_uppercase().as_bytes()).is_err() {
            issues.push(ValidationIssue::new(
                &location,
                "invalid_method",
                format!("'{}' is not an HTTP method", op.method),
            ));
        }
        for param in &op.parameters {
            check_refs(
                desc,
                &param.schema,
                &format!("{location}.parameters.{}", param.name),
                &mut issues,
            );
        }
        if let Some(body) = &op.request_body {
            check_refs(desc, body, &format!("{location}.requestBody"), &mut issues);
        }
        if let Some(response) = &op.response {
            check_refs(desc, response, &format!("{location}.response"), &mut issues);
        }
        for capture in PATH_PARAM.captures_iter(&op.path) {
            let name = &capture[1];
            let declared = op
                .parameters
                .iter()
                .any(|p| p.location == ParameterLocation::Path && p.name == name);
            if !declared {
                issues.push(ValidationIssue::new(
                    &location,
                    "undeclared_path_parameter",
                    format!("path template references '{{{name}}}' but no path parameter '{name}' is declared"),
                ));
            }
        }
        if op.pageable.is_some() && op.response.is_none() {
            issues.push(ValidationIssue::new(
                &location,
                "pageable_without_response",
                "pageable operation declares no response schema",
            ));
        }
    }

    issues
}

fn check_refs(
    desc: &ServiceDescription,
    expr: &TypeExpr,
    location: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    if let Some(target) = &expr.target {
        if !desc.models.contains_key(target) && !desc.enums.contains_key(target) {
            issues.push(ValidationIssue::new(
                location,
                "unresolved_ref",
                format!("'{target}' is not a declared model or enum"),
            ));
        }
    }
    if let Some(items) = &expr.items {
        check_refs(desc, items, location, issues);
    }
    if let Some(values) = &expr.values {
        check_refs(desc, values, location, issues);
    }
}

pub(crate) fn unique_method_name(seen: &mut HashSet<String>, name: &str) -> String {
    if !seen.contains(name) {
        seen.insert(name.to_string());
        return name.to_string();
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{name}{counter}");
        if !seen.contains(&candidate) {
            println!("⚠️  Duplicate operation name '{name}' → using '{candidate}'");
            seen.insert(candidate.clone());
            return candidate;
        }
        counter += 1;
    }
}

/// Resolve a description to generation-ready operations.
///
/// Validates the document first; building proceeds only on a clean
/// description so downstream code sees no dangling references. Operation
/// names are camel-cased and made collision free.
///
/// # Errors
///
/// Returns an error listing the validation issues when the description is
/// malformed.
pub fn build_operations(desc: &ServiceDescription) -> anyhow::Result<Vec<OperationMeta>> {
    let issues = validate_description(desc);
    if !issues.is_empty() {
        print_issues(&issues);
        anyhow::bail!("description validation failed with {} issue(s)", issues.len());
    }

    let mut seen = HashSet::new();
    let mut operations = Vec::with_capacity(desc.operations.len());
    for op in &desc.operations {
        let method = Method::from_bytes(op.method.to_ascii_uppercase().as_bytes())?;
        let java_name =
            unique_method_name(&mut seen, &crate::generator::to_camel_case(&op.name));
        operations.push(OperationMeta {
            method,
            path: op.path.clone(),
            java_name,
            description: op.description.clone(),
            parameters: op.parameters.clone(),
            request_body: op.request_body.clone(),
            response: op.response.clone(),
            status_codes: if op.status_codes.is_empty() {
                vec![200]
            } else {
                op.status_codes.clone()
            },
            pageable: op.pageable.clone(),
            long_running: op.long_running,
            example: op.example.clone(),
        });
    }
    Ok(operations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_method_name() {
        let mut seen = HashSet::new();
        assert_eq!(unique_method_name(&mut seen, "listPets"), "listPets");
        assert_eq!(unique_method_name(&mut seen, "listPets"), "listPets2");
        assert_eq!(unique_method_name(&mut seen, "listPets"), "listPets3");
    }

    #[test]
    fn test_validate_flags_undeclared_path_parameters() {
        let desc: ServiceDescription = serde_yaml::from_str(
            r#"
info:
  title: Fixture
java:
  package: com.example.fixture
operations:
  - name: get_pet
    method: GET
    path: /pets/{petId}
"#,
        )
        .unwrap();
        let issues = validate_description(&desc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, "undeclared_path_parameter");
    }

    #[test]
    fn test_validate_flags_unresolved_refs() {
        let desc: ServiceDescription = serde_yaml::from_str(
            r#"
info:
  title: Fixture
java:
  package: com.example.fixture
models:
  pet:
    properties:
      - name: owner
        $ref: person
"#,
        )
        .unwrap();
        let issues = validate_description(&desc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, "unresolved_ref");
        assert!(build_operations(&desc).is_err());
    }
}
