use super::writer::{JavadocWriter, SourceWriter};
use std::collections::BTreeSet;

/// Java member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    PackagePrivate,
    Private,
}

impl Visibility {
    /// The keyword plus trailing space, empty for package-private.
    fn prefix(&self) -> &'static str {
        match self {
            Visibility::Public => "public ",
            Visibility::Protected => "protected ",
            Visibility::PackagePrivate => "",
            Visibility::Private => "private ",
        }
    }
}

/// Non-visibility method modifiers, emitted in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Static,
    Final,
    Abstract,
}

impl Modifier {
    fn keyword(&self) -> &'static str {
        match self {
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
        }
    }
}

type CommentEmitter = Box<dyn Fn(&mut JavadocWriter)>;
type BodyEmitter = Box<dyn Fn(&mut SourceWriter)>;

/// A renderable method definition.
///
/// Assembled once through [`MethodTemplateBuilder`], immutable afterward,
/// and reusable against multiple targets: [`write_method`] emits the full
/// definition into a class body, [`write_method_interface`] emits a
/// signature-only declaration when the method is public.
///
/// [`write_method`]: MethodTemplate::write_method
/// [`write_method_interface`]: MethodTemplate::write_method_interface
pub struct MethodTemplate {
    visibility: Visibility,
    modifiers: Vec<Modifier>,
    signature: String,
    imports: BTreeSet<String>,
    comment: Option<CommentEmitter>,
    body: BodyEmitter,
}

impl MethodTemplate {
    pub fn builder() -> MethodTemplateBuilder {
        MethodTemplateBuilder::default()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Merge this template's required imports into an accumulating set.
    pub fn add_imports_to(&self, imports: &mut BTreeSet<String>) {
        imports.extend(self.imports.iter().cloned());
    }

    /// Emit the javadoc (if any) followed by the full method definition.
    pub fn write_method(&self, w: &mut SourceWriter) {
        self.write_comment(w);
        let mut header = String::from(self.visibility.prefix());
        for modifier in &self.modifiers {
            header.push_str(modifier.keyword());
            header.push(' ');
        }
        header.push_str(&self.signature);
        w.block(&header, |w| (self.body)(w));
    }

    /// Emit a signature-only declaration, but only for public methods.
    ///
    /// Non-public methods have no place in the interface and produce no
    /// output at all.
    pub fn write_method_interface(&self, w: &mut SourceWriter) {
        if self.visibility != Visibility::Public {
            return;
        }
        self.write_comment(w);
        w.line(&format!("{};", self.signature));
    }

    fn write_comment(&self, w: &mut SourceWriter) {
        if let Some(comment) = &self.comment {
            let mut doc = JavadocWriter::new();
            comment(&mut doc);
            w.javadoc(&doc.finish());
        }
    }

    /// Render the full definition standalone at the given indent depth.
    pub fn render(&self, indent: usize) -> String {
        let mut w = SourceWriter::with_indent(indent);
        self.write_method(&mut w);
        self.trimmed(w)
    }

    /// Render the interface declaration standalone at the given indent
    /// depth; empty for non-public methods.
    pub fn render_interface(&self, indent: usize) -> String {
        let mut w = SourceWriter::with_indent(indent);
        self.write_method_interface(&mut w);
        self.trimmed(w)
    }

    fn trimmed(&self, w: SourceWriter) -> String {
        let mut out = w.finish();
        while out.ends_with('\n') {
            out.pop();
        }
        out
    }
}

/// Staged builder for [`MethodTemplate`].
///
/// Every stage except `signature` is optional; [`build`] panics when the
/// signature was never supplied, which is a bug in the calling generator,
/// not a recoverable condition.
///
/// [`build`]: MethodTemplateBuilder::build
#[derive(Default)]
pub struct MethodTemplateBuilder {
    visibility: Visibility,
    modifiers: Vec<Modifier>,
    signature: Option<String>,
    imports: BTreeSet<String>,
    comment: Option<CommentEmitter>,
    body: Option<BodyEmitter>,
}

impl MethodTemplateBuilder {
    /// Add import identifiers required to compile the emitted method.
    pub fn imports(mut self, imports: impl IntoIterator<Item = String>) -> Self {
        self.imports.extend(imports);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    /// The declaration without visibility or modifiers, e.g.
    /// `Pet getPet(String petId)`. Required.
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn comment(mut self, comment: impl Fn(&mut JavadocWriter) + 'static) -> Self {
        self.comment = Some(Box::new(comment));
        self
    }

    pub fn body(mut self, body: impl Fn(&mut SourceWriter) + 'static) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    /// Finalize the template.
    ///
    /// # Panics
    ///
    /// Panics when no signature was set; templates without a signature are a
    /// contract violation in the generator, equivalent to an assertion
    /// failure.
    pub fn build(self) -> MethodTemplate {
        let signature = match self.signature {
            Some(signature) => signature,
            None => panic!("method template built without a signature"),
        };
        MethodTemplate {
            visibility: self.visibility,
            modifiers: self.modifiers,
            signature,
            imports: self.imports,
            comment: self.comment,
            body: self.body.unwrap_or_else(|| Box::new(|_| {})),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_method_rendering() {
        let template = MethodTemplate::builder()
            .signature("String getName()")
            .comment(|doc| {
                doc.description("Gets the name.");
                doc.returns("the name");
            })
            .body(|w| w.line("return this.name;"))
            .build();
        let rendered = template.render(0);
        assert!(rendered.contains("/**"));
        assert!(rendered.contains(" * Gets the name."));
        assert!(rendered.contains("public String getName() {"));
        assert!(rendered.contains("    return this.name;"));
        assert!(rendered.ends_with("}"));
    }

    #[test]
    fn test_defaults_are_public_no_op() {
        let template = MethodTemplate::builder().signature("void close()").build();
        assert_eq!(template.visibility(), Visibility::Public);
        // default body is a no-op, so the method is an empty block
        assert_eq!(template.render(0), "public void close() {\n}");
    }

    #[test]
    #[should_panic(expected = "without a signature")]
    fn test_build_without_signature_panics() {
        let _ = MethodTemplate::builder()
            .visibility(Visibility::Private)
            .body(|w| w.line("return;"))
            .build();
    }

    #[test]
    fn test_interface_emission_is_public_only() {
        let private = MethodTemplate::builder()
            .visibility(Visibility::Private)
            .signature("void helper()")
            .build();
        assert_eq!(private.render_interface(0), "");

        let public = MethodTemplate::builder()
            .signature("Pet getPet(String petId)")
            .comment(|doc| doc.description("Gets a pet."))
            .build();
        let rendered = public.render_interface(0);
        assert!(rendered.contains("Pet getPet(String petId);"));
        assert!(rendered.contains("Gets a pet."));
        assert!(!rendered.contains('{'));
    }

    #[test]
    fn test_modifiers_in_declaration_order() {
        let template = MethodTemplate::builder()
            .modifiers([Modifier::Static, Modifier::Final])
            .signature("Pet fromJson(JsonReader jsonReader)")
            .build();
        assert!(template
            .render(0)
            .starts_with("public static final Pet fromJson(JsonReader jsonReader) {"));
    }

    #[test]
    fn test_add_imports_to_merges() {
        let template = MethodTemplate::builder()
            .imports(["java.io.IOException".to_string(), "java.util.List".to_string()])
            .signature("void run()")
            .build();
        let mut imports = BTreeSet::new();
        imports.insert("java.util.List".to_string());
        template.add_imports_to(&mut imports);
        assert_eq!(imports.len(), 2);
        assert!(imports.contains("java.io.IOException"));
    }
}
