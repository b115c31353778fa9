use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

/// Package of the target runtime's HTTP surface (Response, HttpPipeline, ...)
pub const CORE_HTTP: &str = "com.clientcore.http";
/// Package of the target runtime's shared value types (BinaryData, ...)
pub const CORE_MODELS: &str = "com.clientcore.models";
/// Package of the target runtime's paging helpers
pub const CORE_PAGING: &str = "com.clientcore.paging";
/// Package of the target runtime's long-running-operation helpers
pub const CORE_POLLING: &str = "com.clientcore.polling";
/// Package of the target runtime's token-stream JSON abstraction
pub const CORE_JSON: &str = "com.clientcore.serialization.json";

/// Java primitive kinds the generator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Int,
    Long,
    Double,
}

impl Primitive {
    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Double => "double",
        }
    }

    /// The boxed counterpart, e.g. `int` → `Integer`.
    pub fn boxed(&self) -> ClassType {
        let name = match self {
            Primitive::Boolean => "Boolean",
            Primitive::Int => "Integer",
            Primitive::Long => "Long",
            Primitive::Double => "Double",
        };
        ClassType {
            package: "java.lang".to_string(),
            name: name.to_string(),
        }
    }
}

/// A non-generic class reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub package: String,
    pub name: String,
}

/// A parameterized class reference with fully resolved type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericType {
    pub package: String,
    pub name: String,
    pub args: Vec<JavaType>,
}

impl GenericType {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

/// A value type the target schema can produce.
///
/// Constructed once while the description is mapped, immutable thereafter,
/// and cloned freely; value equality determines compatibility. A `List` or
/// `Map`'s contained type is always fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Primitive(Primitive),
    Class(ClassType),
    Generic(GenericType),
    /// `List<T>` with string-keyed `Map<String, V>` kept separate below
    List(Box<JavaType>),
    Map(Box<JavaType>),
}

impl JavaType {
    pub fn primitive(p: Primitive) -> Self {
        JavaType::Primitive(p)
    }

    pub fn class(package: &str, name: &str) -> Self {
        JavaType::Class(ClassType {
            package: package.to_string(),
            name: name.to_string(),
        })
    }

    pub fn generic(package: &str, name: &str, args: Vec<JavaType>) -> Self {
        JavaType::Generic(GenericType {
            package: package.to_string(),
            name: name.to_string(),
            args,
        })
    }

    pub fn list(element: JavaType) -> Self {
        JavaType::List(Box::new(element))
    }

    pub fn map(value: JavaType) -> Self {
        JavaType::Map(Box::new(value))
    }

    pub fn string() -> Self {
        JavaType::class("java.lang", "String")
    }

    pub fn object() -> Self {
        JavaType::class("java.lang", "Object")
    }

    pub fn boxed(p: Primitive) -> Self {
        JavaType::Class(p.boxed())
    }

    pub fn binary_data() -> Self {
        JavaType::class(CORE_MODELS, "BinaryData")
    }

    pub fn offset_date_time() -> Self {
        JavaType::class("java.time", "OffsetDateTime")
    }

    /// The in-source declaration, e.g. `Map<String, Pet>` or `boolean`.
    pub fn declaration(&self) -> String {
        match self {
            JavaType::Primitive(p) => p.keyword().to_string(),
            JavaType::Class(c) => c.name.clone(),
            JavaType::Generic(g) => {
                let args = g
                    .args
                    .iter()
                    .map(JavaType::declaration)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}<{}>", g.name, args)
            }
            JavaType::List(element) => format!("List<{}>", element.declaration()),
            JavaType::Map(value) => format!("Map<String, {}>", value.declaration()),
        }
    }

    /// Exactly boolean: the primitive or its box. Nothing else counts.
    pub fn is_boolean(&self) -> bool {
        match self {
            JavaType::Primitive(Primitive::Boolean) => true,
            JavaType::Class(c) => c.package == "java.lang" && c.name == "Boolean",
            _ => false,
        }
    }

    /// Opaque binary payloads are always forwarded as strings.
    pub fn is_binary(&self) -> bool {
        matches!(self, JavaType::Class(c) if c.package == CORE_MODELS && c.name == "BinaryData")
    }

    /// Accumulate the imports needed to compile a use of this type.
    ///
    /// `java.lang` is implicit and never imported.
    pub fn collect_imports(&self, imports: &mut BTreeSet<String>) {
        match self {
            JavaType::Primitive(_) => {}
            JavaType::Class(c) => {
                if c.package != "java.lang" {
                    imports.insert(format!("{}.{}", c.package, c.name));
                }
            }
            JavaType::Generic(g) => {
                if g.package != "java.lang" {
                    imports.insert(g.qualified_name());
                }
                for arg in &g.args {
                    arg.collect_imports(imports);
                }
            }
            JavaType::List(element) => {
                imports.insert("java.util.List".to_string());
                element.collect_imports(imports);
            }
            JavaType::Map(value) => {
                imports.insert("java.util.Map".to_string());
                value.collect_imports(imports);
            }
        }
    }
}

/// Capability tags for the closed set of framework base classes the
/// generator classifies generic return types against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericBase {
    Response,
    PagedResponse,
    PagedIterable,
    Poller,
}

/// Resolves generic class names to their framework base capabilities.
///
/// An explicit table populated at startup stands in for runtime class
/// loading: qualified name → every base tag the class is assignable to.
/// Lookups are memoized in a concurrent map; a name that fails to resolve
/// is logged once and cached as unresolved for the process lifetime.
pub struct TypeRegistry {
    table: HashMap<String, Vec<GenericBase>>,
    cache: DashMap<String, Option<Vec<GenericBase>>>,
}

impl TypeRegistry {
    /// Registry over the target runtime's known generic classes.
    pub fn with_defaults() -> Self {
        let mut table = HashMap::new();
        table.insert(
            format!("{CORE_HTTP}.Response"),
            vec![GenericBase::Response],
        );
        table.insert(
            format!("{CORE_HTTP}.PagedResponse"),
            vec![GenericBase::PagedResponse, GenericBase::Response],
        );
        table.insert(
            format!("{CORE_PAGING}.PagedIterable"),
            vec![GenericBase::PagedIterable],
        );
        table.insert(
            format!("{CORE_POLLING}.Poller"),
            vec![GenericBase::Poller],
        );
        TypeRegistry {
            table,
            cache: DashMap::new(),
        }
    }

    /// Registry over an explicit table, for tests and embedders.
    pub fn with_table(table: HashMap<String, Vec<GenericBase>>) -> Self {
        TypeRegistry {
            table,
            cache: DashMap::new(),
        }
    }

    /// Is `ty` a generic type assignable to any of `candidates`?
    ///
    /// Returns `false` immediately for non-generic types and empty
    /// candidate lists, and degrades to `false` (never an error) when the
    /// qualified name cannot be resolved.
    pub fn is_generic_subclass_of(&self, ty: &JavaType, candidates: &[GenericBase]) -> bool {
        let generic = match ty {
            JavaType::Generic(g) => g,
            _ => return false,
        };
        if candidates.is_empty() {
            return false;
        }
        match self.resolve(&generic.qualified_name()) {
            Some(bases) => candidates.iter().any(|c| bases.contains(c)),
            None => false,
        }
    }

    fn resolve(&self, qualified: &str) -> Option<Vec<GenericBase>> {
        if let Some(cached) = self.cache.get(qualified) {
            return cached.clone();
        }
        let resolved = self.table.get(qualified).cloned();
        if resolved.is_none() {
            warn!(
                type_name = qualified,
                "unresolved generic type; classification degrades to false"
            );
        }
        self.cache.insert(qualified.to_string(), resolved.clone());
        resolved
    }
}

static DEFAULT_REGISTRY: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::with_defaults);

/// Classify against the process-wide default registry.
pub fn is_generic_subclass_of(ty: &JavaType, candidates: &[GenericBase]) -> bool {
    DEFAULT_REGISTRY.is_generic_subclass_of(ty, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_of(inner: JavaType) -> JavaType {
        JavaType::generic(CORE_HTTP, "Response", vec![inner])
    }

    #[test]
    fn test_non_generic_is_never_a_subclass() {
        let registry = TypeRegistry::with_defaults();
        assert!(!registry.is_generic_subclass_of(&JavaType::string(), &[GenericBase::Response]));
        assert!(!registry.is_generic_subclass_of(
            &JavaType::primitive(Primitive::Int),
            &[GenericBase::Response]
        ));
        assert!(!registry.is_generic_subclass_of(
            &JavaType::list(JavaType::string()),
            &[GenericBase::Response]
        ));
    }

    #[test]
    fn test_empty_candidates_is_false() {
        let registry = TypeRegistry::with_defaults();
        assert!(!registry.is_generic_subclass_of(&response_of(JavaType::string()), &[]));
    }

    #[test]
    fn test_known_generic_matches_its_bases() {
        let registry = TypeRegistry::with_defaults();
        let paged = JavaType::generic(CORE_HTTP, "PagedResponse", vec![JavaType::string()]);
        assert!(registry.is_generic_subclass_of(&paged, &[GenericBase::Response]));
        assert!(registry.is_generic_subclass_of(&paged, &[GenericBase::PagedResponse]));
        assert!(!registry.is_generic_subclass_of(&paged, &[GenericBase::Poller]));
    }

    #[test]
    fn test_unresolved_generic_degrades_to_false_and_sticks() {
        let registry = TypeRegistry::with_defaults();
        let unknown = JavaType::generic("com.example", "Mystery", vec![JavaType::string()]);
        assert!(!registry.is_generic_subclass_of(&unknown, &[GenericBase::Response]));
        // the failure is cached, not retried
        assert!(registry.cache.contains_key("com.example.Mystery"));
        assert!(!registry.is_generic_subclass_of(&unknown, &[GenericBase::Response]));
    }

    #[test]
    fn test_declaration_and_imports() {
        let ty = JavaType::map(JavaType::list(JavaType::class("com.example.models", "Pet")));
        assert_eq!(ty.declaration(), "Map<String, List<Pet>>");
        let mut imports = BTreeSet::new();
        ty.collect_imports(&mut imports);
        assert!(imports.contains("java.util.Map"));
        assert!(imports.contains("java.util.List"));
        assert!(imports.contains("com.example.models.Pet"));
        assert!(!imports.iter().any(|i| i.starts_with("java.lang")));
    }

    #[test]
    fn test_boolean_detection() {
        assert!(JavaType::primitive(Primitive::Boolean).is_boolean());
        assert!(JavaType::boxed(Primitive::Boolean).is_boolean());
        assert!(!JavaType::string().is_boolean());
        assert!(!JavaType::class("com.example", "Boolean").is_boolean());
    }
}
