use super::method::{MethodTemplate, Modifier, Visibility};
use super::naming::{
    getter_name, sanitize_java_identifier, setter_name, to_camel_case, to_constant_case,
    to_pascal_case,
};
use super::types::{JavaType, Primitive, CORE_JSON, CORE_MODELS};
use crate::spec::{ServiceDescription, TypeExpr};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Name lookups shared by every mapping step.
///
/// Built once per run from the description; knows which class names are
/// models and which are enums so serialization bodies can dispatch.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub base_package: String,
    pub models_package: String,
    model_names: std::collections::BTreeSet<String>,
    enum_names: std::collections::BTreeSet<String>,
}

impl GenerationContext {
    pub fn from_description(desc: &ServiceDescription) -> Self {
        GenerationContext {
            base_package: desc.java.package.clone(),
            models_package: format!("{}.models", desc.java.package),
            model_names: desc.models.keys().map(|n| to_pascal_case(n)).collect(),
            enum_names: desc.enums.keys().map(|n| to_pascal_case(n)).collect(),
        }
    }

    pub fn is_model(&self, class_name: &str) -> bool {
        self.model_names.contains(class_name)
    }

    pub fn is_enum(&self, class_name: &str) -> bool {
        self.enum_names.contains(class_name)
    }
}

/// A model property mapped to its Java shape.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    /// Sanitized camelCase field name
    pub name: String,
    /// Name on the wire (for serialization)
    pub wire_name: String,
    pub ty: JavaType,
    pub required: bool,
    pub description: Option<String>,
}

/// Discriminator wiring for the base of a polymorphic hierarchy.
#[derive(Debug, Clone)]
pub struct DiscriminatorDef {
    /// Java field holding the tag
    pub property: String,
    /// Tag field name on the wire
    pub wire_name: String,
    /// Tag value → subtype class name, in declaration order
    pub mapping: Vec<(String, String)>,
}

/// A Java model class ready for emission.
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    pub name: String,
    pub description: Option<String>,
    /// Own properties only; inherited ones live on the parent definition
    pub properties: Vec<PropertyDef>,
    pub parent: Option<String>,
    /// Set on hierarchy bases
    pub discriminator: Option<DiscriminatorDef>,
    /// Set on hierarchy children
    pub discriminator_value: Option<String>,
    pub example: Option<Value>,
}

/// One constant of an emitted enum.
#[derive(Debug, Clone)]
pub struct EnumValueDef {
    pub constant: String,
    pub wire: String,
}

/// A Java enum (fixed) or expandable string enum (extensible) for emission.
#[derive(Debug, Clone)]
pub struct EnumDefinition {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValueDef>,
    pub extensible: bool,
}

/// Map a description type expression to the Java type it generates.
///
/// `required` types keep their primitive form; optional ones box so that
/// absence is representable. Collection elements always box.
pub fn type_from_expr(ctx: &GenerationContext, expr: &TypeExpr, required: bool) -> JavaType {
    if let Some(target) = &expr.target {
        return JavaType::class(&ctx.models_package, &to_pascal_case(target));
    }
    let primitive = |p: Primitive| {
        if required {
            JavaType::primitive(p)
        } else {
            JavaType::boxed(p)
        }
    };
    match expr.kind.as_deref() {
        Some("string") => JavaType::string(),
        Some("integer") => primitive(Primitive::Int),
        Some("long") => primitive(Primitive::Long),
        Some("number") => primitive(Primitive::Double),
        Some("boolean") => primitive(Primitive::Boolean),
        Some("date-time") => JavaType::offset_date_time(),
        Some("binary") => JavaType::binary_data(),
        Some("array") => {
            let element = expr
                .items
                .as_deref()
                .map(|e| type_from_expr(ctx, e, false))
                .unwrap_or_else(JavaType::object);
            JavaType::list(element)
        }
        Some("map") => {
            let value = expr
                .values
                .as_deref()
                .map(|e| type_from_expr(ctx, e, false))
                .unwrap_or_else(JavaType::object);
            JavaType::map(value)
        }
        Some("object") | Some("unknown") | None => JavaType::object(),
        Some(other) => {
            warn!(kind = other, "unrecognized type kind; mapping to Object");
            JavaType::object()
        }
    }
}

/// Map every declared model to its emission-ready definition.
pub fn collect_model_definitions(
    ctx: &GenerationContext,
    desc: &ServiceDescription,
) -> BTreeMap<String, ModelDefinition> {
    let mut models = BTreeMap::new();
    for (raw_name, schema) in &desc.models {
        let name = to_pascal_case(raw_name);
        let properties = schema
            .properties
            .iter()
            .map(|p| PropertyDef {
                name: sanitize_java_identifier(&to_camel_case(&p.name)),
                wire_name: p.wire_name.clone().unwrap_or_else(|| p.name.clone()),
                ty: type_from_expr(ctx, &p.schema, p.required && !p.nullable),
                required: p.required,
                description: p.description.clone(),
            })
            .collect();
        let discriminator = schema.discriminator.as_ref().map(|tag| {
            let mapping = desc
                .models
                .iter()
                .filter(|(_, child)| child.parent.as_deref() == Some(raw_name.as_str()))
                .filter_map(|(child_name, child)| {
                    child
                        .discriminator_value
                        .clone()
                        .map(|value| (value, to_pascal_case(child_name)))
                })
                .collect();
            DiscriminatorDef {
                property: sanitize_java_identifier(&to_camel_case(tag)),
                wire_name: tag.clone(),
                mapping,
            }
        });
        models.insert(
            name.clone(),
            ModelDefinition {
                name,
                description: schema.description.clone(),
                properties,
                parent: schema.parent.as_deref().map(to_pascal_case),
                discriminator,
                discriminator_value: schema.discriminator_value.clone(),
                example: schema.example.clone(),
            },
        );
    }
    models
}

/// Map every declared enum to its emission-ready definition.
pub fn collect_enum_definitions(desc: &ServiceDescription) -> BTreeMap<String, EnumDefinition> {
    let mut enums = BTreeMap::new();
    for (raw_name, schema) in &desc.enums {
        let name = to_pascal_case(raw_name);
        let values = schema
            .values
            .iter()
            .map(|v| EnumValueDef {
                constant: to_constant_case(v),
                wire: v.clone(),
            })
            .collect();
        enums.insert(
            name.clone(),
            EnumDefinition {
                name,
                description: schema.description.clone(),
                values,
                extensible: schema.extensible,
            },
        );
    }
    enums
}

/// How a Java type travels through the JSON token stream.
#[derive(Debug, Clone, PartialEq)]
enum JsonShape {
    String,
    PrimitiveInt,
    PrimitiveLong,
    PrimitiveDouble,
    PrimitiveBoolean,
    Boxed(Primitive),
    DateTime,
    Binary,
    Enum(String),
    Model(String),
    List(Box<JsonShape>),
    Map(Box<JsonShape>),
    Untyped,
}

fn json_shape(ctx: &GenerationContext, ty: &JavaType) -> JsonShape {
    match ty {
        JavaType::Primitive(Primitive::Int) => JsonShape::PrimitiveInt,
        JavaType::Primitive(Primitive::Long) => JsonShape::PrimitiveLong,
        JavaType::Primitive(Primitive::Double) => JsonShape::PrimitiveDouble,
        JavaType::Primitive(Primitive::Boolean) => JsonShape::PrimitiveBoolean,
        JavaType::Class(c) if c.package == "java.lang" && c.name == "String" => JsonShape::String,
        JavaType::Class(c) if c.package == "java.lang" && c.name == "Boolean" => {
            JsonShape::Boxed(Primitive::Boolean)
        }
        JavaType::Class(c) if c.package == "java.lang" && c.name == "Integer" => {
            JsonShape::Boxed(Primitive::Int)
        }
        JavaType::Class(c) if c.package == "java.lang" && c.name == "Long" => {
            JsonShape::Boxed(Primitive::Long)
        }
        JavaType::Class(c) if c.package == "java.lang" && c.name == "Double" => {
            JsonShape::Boxed(Primitive::Double)
        }
        JavaType::Class(c) if c.package == "java.time" && c.name == "OffsetDateTime" => {
            JsonShape::DateTime
        }
        JavaType::Class(c) if c.package == CORE_MODELS && c.name == "BinaryData" => {
            JsonShape::Binary
        }
        JavaType::Class(c) if ctx.is_enum(&c.name) => JsonShape::Enum(c.name.clone()),
        JavaType::Class(c) if ctx.is_model(&c.name) => JsonShape::Model(c.name.clone()),
        JavaType::List(element) => JsonShape::List(Box::new(json_shape(ctx, element))),
        JavaType::Map(value) => JsonShape::Map(Box::new(json_shape(ctx, value))),
        _ => JsonShape::Untyped,
    }
}

/// Statement writing one field to the token stream.
fn json_write_statement(shape: &JsonShape, wire_name: &str, value: &str) -> String {
    match shape {
        JsonShape::String => format!("jsonWriter.writeStringField(\"{wire_name}\", {value});"),
        JsonShape::PrimitiveInt => {
            format!("jsonWriter.writeIntField(\"{wire_name}\", {value});")
        }
        JsonShape::PrimitiveLong => {
            format!("jsonWriter.writeLongField(\"{wire_name}\", {value});")
        }
        JsonShape::PrimitiveDouble => {
            format!("jsonWriter.writeDoubleField(\"{wire_name}\", {value});")
        }
        JsonShape::PrimitiveBoolean | JsonShape::Boxed(Primitive::Boolean) => {
            format!("jsonWriter.writeBooleanField(\"{wire_name}\", {value});")
        }
        JsonShape::Boxed(_) => {
            format!("jsonWriter.writeNumberField(\"{wire_name}\", {value});")
        }
        JsonShape::DateTime | JsonShape::Binary | JsonShape::Enum(_) => format!(
            "jsonWriter.writeStringField(\"{wire_name}\", {value} == null ? null : {value}.toString());"
        ),
        JsonShape::Model(_) => format!("jsonWriter.writeJsonField(\"{wire_name}\", {value});"),
        JsonShape::List(element) => format!(
            "jsonWriter.writeArrayField(\"{wire_name}\", {value}, (writer, element) -> {});",
            json_write_element(element, "element")
        ),
        JsonShape::Map(value_shape) => format!(
            "jsonWriter.writeMapField(\"{wire_name}\", {value}, (writer, value) -> {});",
            json_write_element(value_shape, "value")
        ),
        JsonShape::Untyped => {
            format!("jsonWriter.writeUntypedField(\"{wire_name}\", {value});")
        }
    }
}

/// Expression writing one collection element to the token stream.
fn json_write_element(shape: &JsonShape, var: &str) -> String {
    match shape {
        JsonShape::String => format!("writer.writeString({var})"),
        JsonShape::PrimitiveInt
        | JsonShape::PrimitiveLong
        | JsonShape::PrimitiveDouble
        | JsonShape::Boxed(Primitive::Int)
        | JsonShape::Boxed(Primitive::Long)
        | JsonShape::Boxed(Primitive::Double) => format!("writer.writeNumber({var})"),
        JsonShape::PrimitiveBoolean | JsonShape::Boxed(Primitive::Boolean) => {
            format!("writer.writeBoolean({var})")
        }
        JsonShape::DateTime | JsonShape::Binary | JsonShape::Enum(_) => {
            format!("writer.writeString({var} == null ? null : {var}.toString())")
        }
        JsonShape::Model(_) => format!("writer.writeJson({var})"),
        _ => format!("writer.writeUntyped({var})"),
    }
}

/// Expression reading one value from the token stream via `reader_var`.
fn json_read_expression(shape: &JsonShape, reader_var: &str) -> String {
    match shape {
        JsonShape::String => format!("{reader_var}.getString()"),
        JsonShape::PrimitiveInt => format!("{reader_var}.getInt()"),
        JsonShape::PrimitiveLong => format!("{reader_var}.getLong()"),
        JsonShape::PrimitiveDouble => format!("{reader_var}.getDouble()"),
        JsonShape::PrimitiveBoolean => format!("{reader_var}.getBoolean()"),
        JsonShape::Boxed(p) => {
            // method-reference form so explicit nulls survive deserialization
            let accessor = match p {
                Primitive::Boolean => "getBoolean",
                Primitive::Int => "getInt",
                Primitive::Long => "getLong",
                Primitive::Double => "getDouble",
            };
            format!("{reader_var}.getNullable(JsonReader::{accessor})")
        }
        JsonShape::DateTime => format!(
            "{reader_var}.getNullable(nonNullReader -> OffsetDateTime.parse(nonNullReader.getString()))"
        ),
        JsonShape::Binary => format!(
            "{reader_var}.getNullable(nonNullReader -> BinaryData.fromString(nonNullReader.getString()))"
        ),
        JsonShape::Enum(name) => format!("{name}.fromString({reader_var}.getString())"),
        JsonShape::Model(name) => format!("{name}.fromJson({reader_var})"),
        JsonShape::List(element) => format!(
            "{reader_var}.readArray(arrayReader -> {})",
            json_read_expression(element, "arrayReader")
        ),
        JsonShape::Map(value_shape) => format!(
            "{reader_var}.readMap(mapReader -> {})",
            json_read_expression(value_shape, "mapReader")
        ),
        JsonShape::Untyped => format!("{reader_var}.readUntyped()"),
    }
}

/// Expression decoding a response payload of `ty` from `reader_var`.
///
/// Used by the client driver to hand the pipeline a response decoder.
pub(crate) fn json_decode_expression(
    ctx: &GenerationContext,
    ty: &JavaType,
    reader_var: &str,
) -> String {
    json_read_expression(&json_shape(ctx, ty), reader_var)
}

fn serialization_imports(properties: &[PropertyDef]) -> Vec<String> {
    let mut imports = std::collections::BTreeSet::new();
    imports.insert(format!("{CORE_JSON}.JsonReader"));
    imports.insert(format!("{CORE_JSON}.JsonToken"));
    imports.insert(format!("{CORE_JSON}.JsonWriter"));
    imports.insert("java.io.IOException".to_string());
    for prop in properties {
        prop.ty.collect_imports(&mut imports);
    }
    imports.into_iter().collect()
}

/// Build getter and fluent-setter templates for a model's own properties.
pub fn accessor_templates(model: &ModelDefinition) -> Vec<MethodTemplate> {
    let mut templates = Vec::new();
    for prop in &model.properties {
        let mut imports = std::collections::BTreeSet::new();
        prop.ty.collect_imports(&mut imports);

        let getter = getter_name(&prop.ty, &prop.name);
        let field = prop.name.clone();
        let doc = prop
            .description
            .clone()
            .unwrap_or_else(|| format!("the {} value", prop.name));
        let getter_doc = doc.clone();
        let prop_name = prop.name.clone();
        templates.push(
            MethodTemplate::builder()
                .imports(imports.iter().cloned())
                .signature(format!("{} {}()", prop.ty.declaration(), getter))
                .comment(move |javadoc| {
                    javadoc.description(&format!("Get the {prop_name} property: {getter_doc}"));
                    javadoc.returns(&format!("the {prop_name} value"));
                })
                .body({
                    let field = field.clone();
                    move |w| w.line(&format!("return this.{field};"))
                })
                .build(),
        );

        let setter = setter_name(&prop.name);
        let model_name = model.name.clone();
        let prop_name = prop.name.clone();
        templates.push(
            MethodTemplate::builder()
                .imports(imports.iter().cloned())
                .signature(format!(
                    "{} {}({} {})",
                    model.name,
                    setter,
                    prop.ty.declaration(),
                    prop.name
                ))
                .comment({
                    let prop_name = prop_name.clone();
                    let model_name = model_name.clone();
                    move |javadoc| {
                        javadoc.description(&format!("Set the {prop_name} property: {doc}"));
                        javadoc.param(&prop_name, &format!("the {prop_name} value to set"));
                        javadoc.returns(&format!("the {model_name} object itself"));
                    }
                })
                .body(move |w| {
                    w.line(&format!("this.{field} = {field};"));
                    w.line("return this;");
                })
                .build(),
        );
    }
    templates
}

/// Build `toJson`/`fromJson` templates for a model.
///
/// Hierarchy bases with subtypes get a tag-dispatching `fromJson` plus a
/// `fromJsonKnownDiscriminator` fallback; children serialize their tag value
/// first and reach inherited state through accessors.
pub fn serialization_templates(
    ctx: &GenerationContext,
    model: &ModelDefinition,
    models: &BTreeMap<String, ModelDefinition>,
) -> Vec<MethodTemplate> {
    let parent = model
        .parent
        .as_ref()
        .and_then(|p| models.get(p));
    let parent_tag = parent.and_then(|p| p.discriminator.as_ref());

    let mut templates = vec![to_json_template(ctx, model, parent, parent_tag)];

    let dispatch = model
        .discriminator
        .as_ref()
        .filter(|d| !d.mapping.is_empty());
    match dispatch {
        Some(discriminator) => {
            templates.push(dispatching_from_json_template(model, discriminator));
            templates.push(reading_from_json_template(
                ctx,
                model,
                parent,
                parent_tag,
                "fromJsonKnownDiscriminator",
                Visibility::Private,
            ));
        }
        None => templates.push(reading_from_json_template(
            ctx,
            model,
            parent,
            parent_tag,
            "fromJson",
            Visibility::Public,
        )),
    }
    templates
}

fn to_json_template(
    ctx: &GenerationContext,
    model: &ModelDefinition,
    parent: Option<&ModelDefinition>,
    parent_tag: Option<&DiscriminatorDef>,
) -> MethodTemplate {
    // (statement) pairs precomputed so the closure stays data-only
    let mut statements = Vec::new();
    if let (Some(tag), Some(value)) = (parent_tag, &model.discriminator_value) {
        statements.push(format!(
            "jsonWriter.writeStringField(\"{}\", \"{}\");",
            tag.wire_name, value
        ));
    }
    if let Some(parent) = parent {
        for prop in &parent.properties {
            if parent_tag.map(|t| t.property == prop.name).unwrap_or(false) {
                continue;
            }
            let shape = json_shape(ctx, &prop.ty);
            let accessor = format!("this.{}()", getter_name(&prop.ty, &prop.name));
            statements.push(json_write_statement(&shape, &prop.wire_name, &accessor));
        }
    }
    for prop in &model.properties {
        let shape = json_shape(ctx, &prop.ty);
        let field = format!("this.{}", prop.name);
        statements.push(json_write_statement(&shape, &prop.wire_name, &field));
    }

    let mut properties = model.properties.clone();
    if let Some(parent) = parent {
        properties.extend(parent.properties.iter().cloned());
    }
    MethodTemplate::builder()
        .imports(serialization_imports(&properties))
        .signature("JsonWriter toJson(JsonWriter jsonWriter) throws IOException")
        .body(move |w| {
            w.line("jsonWriter.writeStartObject();");
            for statement in &statements {
                w.line(statement);
            }
            w.line("return jsonWriter.writeEndObject();");
        })
        .build()
}

fn reading_from_json_template(
    ctx: &GenerationContext,
    model: &ModelDefinition,
    parent: Option<&ModelDefinition>,
    parent_tag: Option<&DiscriminatorDef>,
    method_name: &str,
    visibility: Visibility,
) -> MethodTemplate {
    let name = model.name.clone();
    // field name → assignment; inherited state goes through setters
    let mut arms: Vec<(String, String)> = Vec::new();
    if let Some(parent) = parent {
        for prop in &parent.properties {
            if parent_tag.map(|t| t.property == prop.name).unwrap_or(false) {
                continue;
            }
            let shape = json_shape(ctx, &prop.ty);
            arms.push((
                prop.wire_name.clone(),
                format!(
                    "deserialized.{}({});",
                    setter_name(&prop.name),
                    json_read_expression(&shape, "reader")
                ),
            ));
        }
    }
    for prop in &model.properties {
        let shape = json_shape(ctx, &prop.ty);
        arms.push((
            prop.wire_name.clone(),
            format!(
                "deserialized.{} = {};",
                prop.name,
                json_read_expression(&shape, "reader")
            ),
        ));
    }

    let mut properties = model.properties.clone();
    if let Some(parent) = parent {
        properties.extend(parent.properties.iter().cloned());
    }
    let body_name = name.clone();
    MethodTemplate::builder()
        .visibility(visibility)
        .modifiers([Modifier::Static])
        .imports(serialization_imports(&properties))
        .signature(format!(
            "{name} {method_name}(JsonReader jsonReader) throws IOException"
        ))
        .body(move |w| {
            w.block("return jsonReader.readObject(reader ->", |w| {
                w.line(&format!("{body_name} deserialized = new {body_name}();"));
                w.block("while (reader.nextToken() != JsonToken.END_OBJECT)", |w| {
                    w.line("String fieldName = reader.getFieldName();");
                    w.line("reader.nextToken();");
                    for (index, (wire_name, assignment)) in arms.iter().enumerate() {
                        let keyword = if index == 0 { "if" } else { "} else if" };
                        w.line(&format!("{keyword} (\"{wire_name}\".equals(fieldName)) {{"));
                        w.line(&format!("    {assignment}"));
                    }
                    if arms.is_empty() {
                        w.line("reader.skipChildren();");
                    } else {
                        w.line("} else {");
                        w.line("    reader.skipChildren();");
                        w.line("}");
                    }
                });
                w.line("return deserialized;");
            });
            // closes the readObject argument list after the lambda block
            w.line(");");
        })
        .build()
}

fn dispatching_from_json_template(
    model: &ModelDefinition,
    discriminator: &DiscriminatorDef,
) -> MethodTemplate {
    let name = model.name.clone();
    let tag_wire = discriminator.wire_name.clone();
    let mapping = discriminator.mapping.clone();
    MethodTemplate::builder()
        .modifiers([Modifier::Static])
        .imports([
            format!("{CORE_JSON}.JsonReader"),
            format!("{CORE_JSON}.JsonToken"),
            "java.io.IOException".to_string(),
        ])
        .signature(format!(
            "{name} fromJson(JsonReader jsonReader) throws IOException"
        ))
        .body(move |w| {
            w.block("return jsonReader.readObject(reader ->", |w| {
                w.line("String discriminatorValue = null;");
                w.block("try (JsonReader readerToUse = reader.bufferObject())", |w| {
                    w.line("readerToUse.nextToken();");
                    w.block(
                        "while (readerToUse.nextToken() != JsonToken.END_OBJECT)",
                        |w| {
                            w.line("String fieldName = readerToUse.getFieldName();");
                            w.line("readerToUse.nextToken();");
                            w.line(&format!("if (\"{tag_wire}\".equals(fieldName)) {{"));
                            w.line("    discriminatorValue = readerToUse.getString();");
                            w.line("    break;");
                            w.line("} else {");
                            w.line("    readerToUse.skipChildren();");
                            w.line("}");
                        },
                    );
                    for (index, (tag, class_name)) in mapping.iter().enumerate() {
                        let keyword = if index == 0 { "if" } else { "} else if" };
                        w.line(&format!(
                            "{keyword} (\"{tag}\".equals(discriminatorValue)) {{"
                        ));
                        w.line(&format!(
                            "    return {class_name}.fromJson(readerToUse.reset());"
                        ));
                    }
                    w.line("}");
                    w.line("return fromJsonKnownDiscriminator(readerToUse.reset());");
                });
            });
            w.line(");");
        })
        .build()
}
