use http::Method;
use serde::Deserialize;
use serde_json::Value;

/// Where an operation parameter is bound on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "Path"),
            ParameterLocation::Query => write!(f, "Query"),
            ParameterLocation::Header => write!(f, "Header"),
        }
    }
}

/// A type expression as written in the description document.
///
/// Either a named reference to a declared model/enum (`$ref`) or a structural
/// kind (`string`, `integer`, `array`, ...). Array and map kinds carry their
/// element/value expressions inline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TypeExpr {
    /// Structural kind: string, integer, long, number, boolean, date-time,
    /// binary, array, map, object, unknown
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Named reference to a model or enum declared in the same document
    #[serde(default, rename = "$ref")]
    pub target: Option<String>,
    /// Element expression for `array` kinds
    #[serde(default)]
    pub items: Option<Box<TypeExpr>>,
    /// Value expression for `map` kinds (keys are always strings)
    #[serde(default)]
    pub values: Option<Box<TypeExpr>>,
}

/// One property of a model schema.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertySchema {
    pub name: String,
    #[serde(flatten)]
    pub schema: TypeExpr,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub description: Option<String>,
    /// Serialized name when it differs from the declared property name
    #[serde(default, rename = "wireName")]
    pub wire_name: Option<String>,
}

/// A named object schema from the `models` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelSchema {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertySchema>,
    /// Base model this one extends (discriminated hierarchies)
    #[serde(default)]
    pub parent: Option<String>,
    /// Property name carrying the subtype tag; set on the base model only
    #[serde(default)]
    pub discriminator: Option<String>,
    /// Tag value identifying this subtype; set on children only
    #[serde(default, rename = "discriminatorValue")]
    pub discriminator_value: Option<String>,
    /// Example payload rendered into the class javadoc
    #[serde(default)]
    pub example: Option<Value>,
}

/// A named enum schema from the `enums` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EnumSchema {
    #[serde(default)]
    pub description: Option<String>,
    pub values: Vec<String>,
    /// Extensible enums admit unknown wire values and are emitted as open
    /// string-enum classes instead of Java enums
    #[serde(default)]
    pub extensible: bool,
}

/// One operation parameter as declared in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterSchema {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(flatten)]
    pub schema: TypeExpr,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Pagination metadata for list operations.
#[derive(Debug, Clone, Deserialize)]
pub struct PageableMeta {
    /// Response field holding the page items
    #[serde(default = "default_item_name", rename = "itemName")]
    pub item_name: String,
    /// Response field holding the continuation link, absent for single-page
    #[serde(default, rename = "nextLinkName")]
    pub next_link_name: Option<String>,
}

fn default_item_name() -> String {
    "value".to_string()
}

/// One operation as declared in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationSchema {
    pub name: String,
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSchema>,
    #[serde(default, rename = "requestBody")]
    pub request_body: Option<TypeExpr>,
    #[serde(default)]
    pub response: Option<TypeExpr>,
    /// Expected success status codes, e.g. [200] or [200, 201]
    #[serde(default, rename = "statusCodes")]
    pub status_codes: Vec<u16>,
    #[serde(default)]
    pub pageable: Option<PageableMeta>,
    #[serde(default, rename = "longRunning")]
    pub long_running: bool,
    /// Example response payload rendered into the method javadoc
    #[serde(default)]
    pub example: Option<Value>,
}

/// The `info` block of a description document.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInfo {
    pub title: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Java-specific settings for the generated library.
#[derive(Debug, Clone, Deserialize)]
pub struct JavaSettings {
    /// Base package the client lands in; models go to `<package>.models`
    pub package: String,
}

/// A fully parsed service description document.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDescription {
    pub info: ServiceInfo,
    pub java: JavaSettings,
    #[serde(default, rename = "apiVersions")]
    pub api_versions: Vec<String>,
    #[serde(default)]
    pub models: std::collections::BTreeMap<String, ModelSchema>,
    #[serde(default)]
    pub enums: std::collections::BTreeMap<String, EnumSchema>,
    #[serde(default)]
    pub operations: Vec<OperationSchema>,
}

/// An operation after reference resolution and name assignment.
///
/// The generator consumes these, never the raw [`OperationSchema`].
#[derive(Debug, Clone)]
pub struct OperationMeta {
    pub method: Method,
    pub path: String,
    /// Collision-free camelCase Java method name
    pub java_name: String,
    pub description: Option<String>,
    pub parameters: Vec<ParameterSchema>,
    pub request_body: Option<TypeExpr>,
    pub response: Option<TypeExpr>,
    pub status_codes: Vec<u16>,
    pub pageable: Option<PageableMeta>,
    pub long_running: bool,
    pub example: Option<Value>,
}
