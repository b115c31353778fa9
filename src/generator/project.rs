use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use askama::Template;
use tracing::warn;

use super::example::{build_example_tree, render_example};
use super::method::MethodTemplate;
use super::naming::{sanitize_java_identifier, to_camel_case, to_pascal_case, version_constant};
use super::schema::{
    accessor_templates, collect_enum_definitions, collect_model_definitions,
    json_decode_expression, serialization_templates, type_from_expr, GenerationContext,
    ModelDefinition,
};
use super::templates::{
    write_client_interface, write_enum, write_model_class, write_service_client,
    write_service_version, ClientInterfaceTemplateData, EnumValueView, ExpandableEnumTemplateData,
    FieldView, FixedEnumTemplateData, ModelClassTemplateData, ServiceClientTemplateData,
    ServiceVersionTemplateData, VersionView,
};
use super::types::{
    is_generic_subclass_of, GenericBase, JavaType, CORE_HTTP, CORE_MODELS, CORE_PAGING,
    CORE_POLLING,
};
use super::writer::JavadocWriter;
use crate::spec::{
    build_operations, load_description, OperationMeta, ParameterLocation, ServiceDescription,
};

/// Generate a complete Java client library from a service description.
///
/// Emits model classes, enums, the service client, the public client
/// interface, and the service-version enum under
/// `<output>/src/main/java/<package>/`. Existing files are left alone
/// unless `force` is set.
///
/// # Errors
///
/// Returns an error if the description cannot be loaded or validated, or if
/// any template rendering or file write fails.
pub fn generate_client_from_description(
    description_path: &Path,
    output: Option<&Path>,
    force: bool,
) -> anyhow::Result<PathBuf> {
    let path_str = description_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in description path"))?;
    let (desc, slug) = load_description(path_str)?;
    let operations = build_operations(&desc)?;
    let ctx = GenerationContext::from_description(&desc);

    let base_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Path::new("generated").join(&slug));
    let package_dir = base_dir
        .join("src/main/java")
        .join(desc.java.package.replace('.', "/"));
    let models_dir = package_dir.join("models");
    fs::create_dir_all(&models_dir)
        .with_context(|| format!("Failed to create output tree under {base_dir:?}"))?;

    let models = collect_model_definitions(&ctx, &desc);
    let enums = collect_enum_definitions(&desc);

    for model in models.values() {
        let data = model_class_data(&ctx, model, &models);
        write_model_class(
            &models_dir.join(format!("{}.java", model.name)),
            &data,
            force,
        )?;
    }

    for definition in enums.values() {
        let javadoc = javadoc_block({
            let mut doc = JavadocWriter::new();
            doc.description(
                definition
                    .description
                    .as_deref()
                    .unwrap_or(&format!("Defines values for {}.", definition.name)),
            );
            doc
        });
        let values = definition
            .values
            .iter()
            .map(|v| EnumValueView {
                constant: v.constant.clone(),
                wire: v.wire.clone(),
            })
            .collect();
        let rendered = if definition.extensible {
            ExpandableEnumTemplateData {
                package: ctx.models_package.clone(),
                import: format!("{CORE_MODELS}.ExpandableStringEnum"),
                javadoc,
                name: definition.name.clone(),
                values,
            }
            .render()?
        } else {
            FixedEnumTemplateData {
                package: ctx.models_package.clone(),
                javadoc,
                name: definition.name.clone(),
                values,
            }
            .render()?
        };
        write_enum(
            &models_dir.join(format!("{}.java", definition.name)),
            rendered,
            force,
        )?;
    }

    let service_name = to_pascal_case(&slug);
    let version_type = format!("{service_name}ServiceVersion");
    write_service_version(
        &package_dir.join(format!("{version_type}.java")),
        &service_version_data(&desc, &version_type),
        force,
    )?;

    let mut methods = Vec::with_capacity(operations.len());
    for op in &operations {
        methods.push(operation_template(&ctx, &desc, op, &models));
    }

    let client_name = format!("{service_name}Client");
    let mut imports = BTreeSet::new();
    imports.insert(format!("{CORE_HTTP}.HttpPipeline"));
    for method in &methods {
        method.add_imports_to(&mut imports);
    }
    let client_javadoc = javadoc_block({
        let mut doc = JavadocWriter::new();
        doc.description(&format!(
            "Initializes a new instance of the synchronous {} client.",
            desc.info.title
        ));
        doc
    });
    write_service_client(
        &package_dir.join(format!("{client_name}.java")),
        &ServiceClientTemplateData {
            package: ctx.base_package.clone(),
            imports: filter_same_package(imports.clone(), &ctx.base_package),
            javadoc: client_javadoc,
            name: client_name.clone(),
            version_type: version_type.clone(),
            methods: methods.iter().map(|m| m.render(1)).collect(),
        },
        force,
    )?;

    let interface_name = format!("{service_name}Service");
    let interface_methods: Vec<String> = methods
        .iter()
        .map(|m| m.render_interface(1))
        .filter(|m| !m.is_empty())
        .collect();
    let interface_javadoc = javadoc_block({
        let mut doc = JavadocWriter::new();
        doc.description(&format!(
            "The operations contract of {}, implemented by {}.",
            desc.info.title, client_name
        ));
        doc
    });
    write_client_interface(
        &package_dir.join(format!("{interface_name}.java")),
        &ClientInterfaceTemplateData {
            package: ctx.base_package.clone(),
            imports: filter_same_package(imports, &ctx.base_package),
            javadoc: interface_javadoc,
            name: interface_name,
            methods: interface_methods,
        },
        force,
    )?;

    println!(
        "🎉 Generated {} model(s), {} enum(s), {} operation(s) into {:?}",
        models.len(),
        enums.len(),
        operations.len(),
        base_dir
    );
    Ok(base_dir)
}

/// Render a [`JavadocWriter`]'s content as complete comment lines.
fn javadoc_block(doc: JavadocWriter) -> Vec<String> {
    let lines = doc.finish();
    if lines.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push("/**".to_string());
    for line in lines {
        if line.is_empty() {
            out.push(" *".to_string());
        } else {
            out.push(format!(" * {line}"));
        }
    }
    out.push(" */".to_string());
    out
}

/// Drop imports that live directly in the emitting package.
fn filter_same_package(imports: BTreeSet<String>, package: &str) -> Vec<String> {
    let prefix = format!("{package}.");
    imports
        .into_iter()
        .filter(|import| match import.strip_prefix(&prefix) {
            Some(rest) => rest.contains('.'),
            None => true,
        })
        .collect()
}

fn model_class_data(
    ctx: &GenerationContext,
    model: &ModelDefinition,
    models: &BTreeMap<String, ModelDefinition>,
) -> ModelClassTemplateData {
    let mut templates = accessor_templates(model);
    templates.extend(serialization_templates(ctx, model, models));

    let mut imports = BTreeSet::new();
    for prop in &model.properties {
        prop.ty.collect_imports(&mut imports);
    }
    for template in &templates {
        template.add_imports_to(&mut imports);
    }

    let mut doc = JavadocWriter::new();
    doc.description(
        model
            .description
            .as_deref()
            .unwrap_or(&format!("The {} model.", model.name)),
    );
    if let Some(example) = &model.example {
        let ty = JavaType::class(&ctx.models_package, &model.name);
        let node = build_example_tree(&ty, example);
        match render_example(&node, models) {
            Ok(sample) => doc.code_sample(&format!("{} example = {};", model.name, sample)),
            Err(error) => warn!(
                model = %model.name,
                %error,
                "skipping unrenderable example payload"
            ),
        }
    }

    let has_children = models
        .values()
        .any(|m| m.parent.as_deref() == Some(model.name.as_str()));
    ModelClassTemplateData {
        package: ctx.models_package.clone(),
        imports: filter_same_package(imports, &ctx.models_package),
        javadoc: javadoc_block(doc),
        name: model.name.clone(),
        extends: model
            .parent
            .as_ref()
            .map(|p| format!(" extends {p}"))
            .unwrap_or_default(),
        is_final: !has_children,
        fields: model
            .properties
            .iter()
            .map(|p| FieldView {
                declaration: p.ty.declaration(),
                name: p.name.clone(),
            })
            .collect(),
        methods: templates.iter().map(|t| t.render(1)).collect(),
    }
}

fn service_version_data(desc: &ServiceDescription, version_type: &str) -> ServiceVersionTemplateData {
    let mut versions: Vec<VersionView> = desc
        .api_versions
        .iter()
        .map(|v| VersionView {
            constant: version_constant(v),
            literal: v.clone(),
        })
        .collect();
    if versions.is_empty() {
        // fall back to the document version so the client stays constructible
        let literal = desc.info.version.clone().unwrap_or_else(|| "1.0".to_string());
        versions.push(VersionView {
            constant: version_constant(&literal),
            literal,
        });
    }
    let latest = versions
        .last()
        .map(|v| v.constant.clone())
        .unwrap_or_default();
    ServiceVersionTemplateData {
        package: desc.java.package.clone(),
        import: format!("{CORE_HTTP}.ServiceVersion"),
        title: desc.info.title.clone(),
        name: version_type.to_string(),
        versions,
        latest,
    }
}

/// A parameter mapped to its Java surface.
struct ParamView {
    java_name: String,
    wire_name: String,
    location: ParameterLocation,
    ty: JavaType,
    required: bool,
    description: String,
}

/// How the emitted method wraps the pipeline call.
enum InvocationStyle {
    Direct,
    Paged,
    LongRunning,
}

/// Build the one client method for an operation.
///
/// Pageable operations emit a `PagedIterable` method, long-running ones a
/// `begin*` poller method, everything else a direct `Response` method. The
/// body shape is chosen by classifying the return type against the known
/// framework bases, not by re-reading the operation flags.
fn operation_template(
    ctx: &GenerationContext,
    desc: &ServiceDescription,
    op: &OperationMeta,
    models: &BTreeMap<String, ModelDefinition>,
) -> MethodTemplate {
    let params: Vec<ParamView> = op
        .parameters
        .iter()
        .map(|p| ParamView {
            java_name: sanitize_java_identifier(&to_camel_case(&p.name)),
            wire_name: p.name.clone(),
            location: p.location,
            ty: type_from_expr(ctx, &p.schema, p.required),
            required: p.required,
            description: p
                .description
                .clone()
                .unwrap_or_else(|| format!("the {} parameter", p.name)),
        })
        .collect();
    let body_ty = op.request_body.as_ref().map(|b| type_from_expr(ctx, b, true));
    let payload_ty = op
        .response
        .as_ref()
        .map(|r| type_from_expr(ctx, r, false))
        .unwrap_or_else(|| JavaType::class("java.lang", "Void"));

    let (method_name, return_ty, item_ty) = if op.pageable.is_some() {
        let item_ty = page_item_type(ctx, op, models).unwrap_or_else(|| {
            warn!(
                operation = %op.java_name,
                "pageable operation without a derivable item type; paging over Object"
            );
            JavaType::object()
        });
        (
            op.java_name.clone(),
            JavaType::generic(CORE_PAGING, "PagedIterable", vec![item_ty.clone()]),
            Some(item_ty),
        )
    } else if op.long_running {
        (
            format!("begin{}", to_pascal_case(&op.java_name)),
            JavaType::generic(CORE_POLLING, "Poller", vec![payload_ty.clone()]),
            None,
        )
    } else {
        (
            op.java_name.clone(),
            JavaType::generic(CORE_HTTP, "Response", vec![payload_ty.clone()]),
            None,
        )
    };

    // classification picks the body emitter; unresolved types degrade to a
    // direct send
    let style = if is_generic_subclass_of(&return_ty, &[GenericBase::PagedIterable]) {
        InvocationStyle::Paged
    } else if is_generic_subclass_of(&return_ty, &[GenericBase::Poller]) {
        InvocationStyle::LongRunning
    } else {
        InvocationStyle::Direct
    };

    let request_lines = request_lines(desc, op, &params, body_ty.is_some());
    let send_line = match style {
        InvocationStyle::Paged => {
            let item = item_ty.as_ref().unwrap_or(&payload_ty);
            let decode = json_decode_expression(ctx, item, "reader");
            let pageable = op.pageable.as_ref();
            let item_name = pageable.map(|p| p.item_name.as_str()).unwrap_or("value");
            let next_link = pageable
                .and_then(|p| p.next_link_name.as_deref())
                .map(|n| format!("\"{n}\""))
                .unwrap_or_else(|| "null".to_string());
            format!(
                "return this.pipeline.sendPaged(request, pagingOptions, reader -> {decode}, \"{item_name}\", {next_link});"
            )
        }
        _ => {
            if payload_ty == JavaType::class("java.lang", "Void") {
                "return this.pipeline.send(request);".to_string()
            } else {
                let decode = json_decode_expression(ctx, &payload_ty, "reader");
                format!("return this.pipeline.send(request, reader -> {decode});")
            }
        }
    };

    let mut signature_params: Vec<String> = params
        .iter()
        .map(|p| format!("{} {}", p.ty.declaration(), p.java_name))
        .collect();
    if let Some(body) = &body_ty {
        signature_params.push(format!("{} body", body.declaration()));
    }
    let signature = format!(
        "{} {}({})",
        return_ty.declaration(),
        method_name,
        signature_params.join(", ")
    );

    let mut imports = BTreeSet::new();
    return_ty.collect_imports(&mut imports);
    for param in &params {
        param.ty.collect_imports(&mut imports);
    }
    if let Some(body) = &body_ty {
        body.collect_imports(&mut imports);
        imports.insert(format!("{CORE_MODELS}.BinaryData"));
    }
    imports.insert(format!("{CORE_HTTP}.HttpMethod"));
    imports.insert(format!("{CORE_HTTP}.HttpRequest"));

    // javadoc content, including a best-effort response sample
    let description = op
        .description
        .clone()
        .unwrap_or_else(|| format!("Invokes the {} operation.", op.java_name));
    let binding = format!(
        "Binds to HTTP {} {} responding {}.",
        op.method,
        op.path,
        op.status_codes
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    let param_docs: Vec<(String, String)> = params
        .iter()
        .map(|p| (p.java_name.clone(), p.description.clone()))
        .chain(body_ty.as_ref().map(|_| {
            ("body".to_string(), "the request payload".to_string())
        }))
        .collect();
    let returns = match style {
        InvocationStyle::Paged => "the paginated results, iterable across pages".to_string(),
        InvocationStyle::LongRunning => {
            "a poller tracking the long-running operation".to_string()
        }
        InvocationStyle::Direct => {
            format!("the service response carrying {}", payload_ty.declaration())
        }
    };
    let sample = op.example.as_ref().and_then(|example| {
        let node = build_example_tree(&payload_ty, example);
        match render_example(&node, models) {
            Ok(rendered) => Some(format!(
                "{} example = {};",
                payload_ty.declaration(),
                rendered
            )),
            Err(error) => {
                warn!(
                    operation = %op.java_name,
                    %error,
                    "skipping unrenderable example payload"
                );
                None
            }
        }
    });

    MethodTemplate::builder()
        .imports(imports)
        .signature(signature)
        .comment(move |doc| {
            doc.description(&description);
            doc.description(&binding);
            if let Some(sample) = &sample {
                doc.code_sample(sample);
            }
            for (name, text) in &param_docs {
                doc.param(name, text);
            }
            doc.returns(&returns);
        })
        .body(move |w| match style {
            InvocationStyle::Direct => {
                for line in &request_lines {
                    w.line(line);
                }
                w.line(&send_line);
            }
            InvocationStyle::Paged => {
                w.block("return new PagedIterable<>(pagingOptions ->", |w| {
                    for line in &request_lines {
                        w.line(line);
                    }
                    w.line(&send_line);
                });
                w.line(");");
            }
            InvocationStyle::LongRunning => {
                w.block("return Poller.createPoller(() ->", |w| {
                    for line in &request_lines {
                        w.line(line);
                    }
                    w.line(&send_line);
                });
                w.line(");");
            }
        })
        .build()
}

/// Statements building the `HttpRequest` for an operation.
fn request_lines(
    desc: &ServiceDescription,
    op: &OperationMeta,
    params: &[ParamView],
    has_body: bool,
) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "HttpRequest request = new HttpRequest(HttpMethod.{}, \"{}\");",
        op.method.as_str(),
        op.path
    ));
    for param in params {
        let setter = match param.location {
            ParameterLocation::Path => "setPathParam",
            ParameterLocation::Query => "setQueryParam",
            ParameterLocation::Header => "setHeader",
        };
        let assignment = format!(
            "request.{setter}(\"{}\", String.valueOf({}));",
            param.wire_name, param.java_name
        );
        if param.required || matches!(param.ty, JavaType::Primitive(_)) {
            lines.push(assignment);
        } else {
            lines.push(format!("if ({} != null) {{", param.java_name));
            lines.push(format!("    {assignment}"));
            lines.push("}".to_string());
        }
    }
    if !desc.api_versions.is_empty() {
        lines.push(
            "request.setQueryParam(\"api-version\", this.serviceVersion.getVersion());"
                .to_string(),
        );
    }
    if !op.status_codes.is_empty() {
        lines.push(format!(
            "request.setExpectedStatusCodes({});",
            op.status_codes
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if has_body {
        lines.push("request.setBody(BinaryData.fromObject(body));".to_string());
    }
    lines
}

/// Derive the page item type for a pageable operation.
///
/// Either the response is itself an array, or it names a model whose
/// configured item property is a list.
fn page_item_type(
    ctx: &GenerationContext,
    op: &OperationMeta,
    models: &BTreeMap<String, ModelDefinition>,
) -> Option<JavaType> {
    let pageable = op.pageable.as_ref()?;
    let response_ty = type_from_expr(ctx, op.response.as_ref()?, false);
    match response_ty {
        JavaType::List(element) => Some(*element),
        JavaType::Class(c) => {
            let model = models.get(&c.name)?;
            let item_prop = model
                .properties
                .iter()
                .find(|p| p.wire_name == pageable.item_name || p.name == pageable.item_name)?;
            match &item_prop.ty {
                JavaType::List(element) => Some((**element).clone()),
                _ => None,
            }
        }
        _ => None,
    }
}
