use super::naming::setter_name;
use super::schema::ModelDefinition;
use super::types::{JavaType, Primitive};
use anyhow::{anyhow, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;

/// A literal example value with its source-literal form precomputed.
#[derive(Debug, Clone)]
pub struct LiteralNode {
    pub ty: JavaType,
    pub raw: Value,
    /// The Java literal text; differs from the raw value's natural string
    /// form when quoting or numeric suffixes apply
    pub literal: String,
}

/// An ordered list of child examples.
#[derive(Debug, Clone)]
pub struct ListNode {
    pub ty: JavaType,
    pub raw: Value,
    pub children: Vec<ExampleNode>,
}

/// String-keyed entries in the order they appeared in the payload.
#[derive(Debug, Clone)]
pub struct MapNode {
    pub ty: JavaType,
    pub raw: Value,
    pub keys: Vec<String>,
    pub children: Vec<ExampleNode>,
}

/// Anything without a more specific shape; decomposition happens at render
/// time against the declared model's properties.
#[derive(Debug, Clone)]
pub struct ObjectNode {
    pub ty: JavaType,
    pub raw: Value,
}

/// An opaque binary example, carried as the raw value's string form.
#[derive(Debug, Clone)]
pub struct BinaryNode {
    pub ty: JavaType,
    pub text: Option<String>,
}

/// A typed example value tree mirroring the declared schema type.
///
/// Built eagerly top-down from a raw example payload; never validated at
/// construction time. Shapes that do not line up with the declared type
/// surface as errors only when the example is rendered.
#[derive(Debug, Clone)]
pub enum ExampleNode {
    Literal(LiteralNode),
    List(ListNode),
    Map(MapNode),
    Object(ObjectNode),
    Binary(BinaryNode),
}

/// Build the example tree for `raw` against the declared type `ty`.
pub fn build_example_tree(ty: &JavaType, raw: &Value) -> ExampleNode {
    if ty.is_binary() {
        let text = match raw {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };
        return ExampleNode::Binary(BinaryNode {
            ty: ty.clone(),
            text,
        });
    }
    if let JavaType::List(element) = ty {
        if let Value::Array(items) = raw {
            let children = items
                .iter()
                .map(|item| build_example_tree(element, item))
                .collect();
            return ExampleNode::List(ListNode {
                ty: ty.clone(),
                raw: raw.clone(),
                children,
            });
        }
    }
    if let JavaType::Map(value_ty) = ty {
        if let Value::Object(entries) = raw {
            let mut keys = Vec::with_capacity(entries.len());
            let mut children = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                keys.push(key.clone());
                children.push(build_example_tree(value_ty, value));
            }
            return ExampleNode::Map(MapNode {
                ty: ty.clone(),
                raw: raw.clone(),
                keys,
                children,
            });
        }
    }
    if raw.is_string() || raw.is_number() || raw.is_boolean() {
        return ExampleNode::Literal(LiteralNode {
            ty: ty.clone(),
            raw: raw.clone(),
            literal: java_literal(ty, raw),
        });
    }
    ExampleNode::Object(ObjectNode {
        ty: ty.clone(),
        raw: raw.clone(),
    })
}

/// Compute the Java literal text for a primitive-convertible raw value.
fn java_literal(ty: &JavaType, raw: &Value) -> String {
    match raw {
        Value::String(s) => quote_string(s),
        Value::Number(n) => match ty {
            JavaType::Primitive(Primitive::Long) => format!("{n}L"),
            JavaType::Class(c) if c.package == "java.lang" && c.name == "Long" => {
                format!("{n}L")
            }
            JavaType::Primitive(Primitive::Double) if n.is_i64() || n.is_u64() => {
                format!("{n}.0")
            }
            JavaType::Class(c)
                if c.package == "java.lang"
                    && c.name == "Double"
                    && (n.is_i64() || n.is_u64()) =>
            {
                format!("{n}.0")
            }
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn quote_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Render an example tree into a Java construction expression.
///
/// Object nodes decompose against the declared model's properties, chaining
/// fluent setters; a node whose raw shape has no rendering surfaces here as
/// an error that skips this example only.
pub fn render_example(
    node: &ExampleNode,
    models: &BTreeMap<String, ModelDefinition>,
) -> Result<String> {
    match node {
        ExampleNode::Literal(literal) => Ok(literal.literal.clone()),
        ExampleNode::Binary(binary) => Ok(match &binary.text {
            Some(text) => format!("BinaryData.fromString({})", quote_string(text)),
            None => "null".to_string(),
        }),
        ExampleNode::List(list) => {
            let rendered = list
                .children
                .iter()
                .map(|child| render_example(child, models))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("Arrays.asList({})", rendered.join(", ")))
        }
        ExampleNode::Map(map) => {
            let mut entries = Vec::with_capacity(map.keys.len());
            for (key, child) in map.keys.iter().zip(map.children.iter()) {
                entries.push(format!(
                    "Map.entry({}, {})",
                    quote_string(key),
                    render_example(child, models)?
                ));
            }
            Ok(format!("Map.ofEntries({})", entries.join(", ")))
        }
        ExampleNode::Object(object) => render_object(object, models),
    }
}

fn render_object(object: &ObjectNode, models: &BTreeMap<String, ModelDefinition>) -> Result<String> {
    if object.raw.is_null() {
        return Ok("null".to_string());
    }
    let class_name = match &object.ty {
        JavaType::Class(c) => Some(c.name.as_str()),
        _ => None,
    };
    let model = class_name
        .and_then(|name| models.get(name))
        .ok_or_else(|| {
            anyhow!(
                "no structural decomposition for example value of type {}",
                object.ty.declaration()
            )
        })?;
    let entries = object.raw.as_object().ok_or_else(|| {
        anyhow!(
            "example for model {} is not an object: {}",
            model.name,
            object.raw
        )
    })?;
    let mut expr = format!("new {}()", model.name);
    for prop in &model.properties {
        if let Some(value) = entries.get(&prop.wire_name) {
            let child = build_example_tree(&prop.ty, value);
            write!(
                expr,
                ".{}({})",
                setter_name(&prop.name),
                render_example(&child, models)?
            )?;
        }
    }
    Ok(expr)
}
