use super::types::JavaType;

/// Convert a declared name to PascalCase
///
/// Splits on `_` and `-`, uppercases the first letter of every word and
/// leaves interior capitals alone, so `user_id` → `UserId` and `isEnabled`
/// → `IsEnabled`.
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-'])
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert a declared name to camelCase
///
/// PascalCase with the leading letter lowercased; a name that is already
/// camel-cased comes back unchanged.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert a declared name to CONSTANT_CASE for enum constants
///
/// `notStarted` → `NOT_STARTED`, `available` → `AVAILABLE`. Runs of
/// non-alphanumeric characters collapse to a single underscore.
pub fn to_constant_case(s: &str) -> String {
    let mut value = String::new();
    let mut prev_sep = true;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && !prev_sep && !value.is_empty() {
                value.push('_');
            }
            value.push(c.to_ascii_uppercase());
            prev_sep = false;
        } else if !prev_sep {
            value.push('_');
            prev_sep = true;
        }
    }
    value.trim_matches('_').to_string()
}

/// Derive the constant name for an API version, e.g. `2024-05-01` → `V2024_05_01`.
pub fn version_constant(version: &str) -> String {
    let body: String = version
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("V{body}")
}

/// Derive the accessor name for a property.
///
/// The prefix is `get`, except when the property type is exactly boolean
/// (primitive or boxed): those prefer `is`. A camel-cased name that already
/// starts with `is` is returned as-is, so `isActive` never becomes
/// `getIsActive` or `isIsActive`.
pub fn getter_name(ty: &JavaType, property_name: &str) -> String {
    let camel = to_camel_case(property_name);
    if ty.is_boolean() {
        if camel.starts_with("is") {
            return camel;
        }
        return format!("is{}", to_pascal_case(property_name));
    }
    format!("get{}", to_pascal_case(property_name))
}

/// Derive the mutator name for a property: always `set` + PascalCase(name).
pub fn setter_name(property_name: &str) -> String {
    format!("set{}", to_pascal_case(property_name))
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while",
];

/// Sanitize a declared name into a legal Java identifier.
///
/// Invalid characters become underscores, a leading digit gets an
/// underscore prefix, and reserved words get an underscore suffix.
pub fn sanitize_java_identifier(name: &str) -> String {
    let mut s: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if s.is_empty() {
        s = "_".to_string();
    }
    if s.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
        s.insert(0, '_');
    }
    if JAVA_KEYWORDS.contains(&s.as_str()) {
        s.push('_');
    }
    s
}
