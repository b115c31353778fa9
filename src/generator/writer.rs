const MAX_DOC_LINE_LENGTH: usize = 80;

/// Indentation-aware buffer for emitted Java source.
///
/// Four-space indentation; `block` writes a braced body around a callback so
/// nesting stays balanced by construction.
pub struct SourceWriter {
    buf: String,
    indent: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        SourceWriter {
            buf: String::new(),
            indent: 0,
        }
    }

    /// Start at a non-zero depth, e.g. for methods rendered inside a class.
    pub fn with_indent(indent: usize) -> Self {
        SourceWriter {
            buf: String::new(),
            indent,
        }
    }

    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.buf.push('\n');
            return;
        }
        for _ in 0..self.indent {
            self.buf.push_str("    ");
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Emit `header {`, run `body` one level deeper, then `}`.
    pub fn block(&mut self, header: &str, body: impl FnOnce(&mut SourceWriter)) {
        self.line(&format!("{header} {{"));
        self.indent += 1;
        body(self);
        self.indent -= 1;
        self.line("}");
    }

    /// Emit a javadoc comment from pre-wrapped content lines.
    pub fn javadoc(&mut self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        self.line("/**");
        for line in lines {
            if line.is_empty() {
                self.line(" *");
            } else {
                self.line(&format!(" * {line}"));
            }
        }
        self.line(" */");
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for SourceWriter {
    fn default() -> Self {
        SourceWriter::new()
    }
}

/// Wrap free-form description text into doc-comment content lines.
///
/// Breaks only between words, so URLs and other long tokens stay whole and
/// render intact in generated javadoc; an oversized token gets a line of
/// its own.
pub fn wrap_doc_text(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let paragraph = paragraph.trim_end();
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if current.len() + 1 + word.len() > MAX_DOC_LINE_LENGTH {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                current.push(' ');
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Collects javadoc content for one method or class.
///
/// The emission closures on a method template receive one of these; the
/// collected lines are handed to [`SourceWriter::javadoc`] at render time.
#[derive(Default)]
pub struct JavadocWriter {
    lines: Vec<String>,
    has_tags: bool,
}

impl JavadocWriter {
    pub fn new() -> Self {
        JavadocWriter::default()
    }

    /// Leading description text, wrapped to the doc width.
    pub fn description(&mut self, text: &str) {
        self.lines.extend(wrap_doc_text(text));
    }

    pub fn param(&mut self, name: &str, text: &str) {
        self.separate_tags();
        self.lines.push(format!("@param {name} {text}"));
    }

    pub fn returns(&mut self, text: &str) {
        self.separate_tags();
        self.lines.push(format!("@return {text}"));
    }

    pub fn throws(&mut self, class_name: &str, text: &str) {
        self.separate_tags();
        self.lines.push(format!("@throws {class_name} {text}"));
    }

    /// Embed a code sample as a `<pre>{@code ...}</pre>` block.
    pub fn code_sample(&mut self, code: &str) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push("<pre>{@code".to_string());
        for line in code.lines() {
            self.lines.push(line.to_string());
        }
        self.lines.push("}</pre>".to_string());
    }

    fn separate_tags(&mut self) {
        if !self.has_tags && !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.has_tags = true;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn finish(self) -> Vec<String> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_nesting() {
        let mut w = SourceWriter::new();
        w.block("public final class Pet", |w| {
            w.line("private String name;");
            w.block("public String getName()", |w| {
                w.line("return this.name;");
            });
        });
        let out = w.finish();
        assert_eq!(
            out,
            "public final class Pet {\n    private String name;\n    public String getName() {\n        return this.name;\n    }\n}\n"
        );
    }

    #[test]
    fn test_wrap_doc_text_keeps_urls_whole() {
        let text = "See https://example.com/a/really/really/really/really/really/long/path/segment/list for details on every field this operation accepts.";
        let lines = wrap_doc_text(text);
        assert!(lines
            .iter()
            .any(|l| l.contains("https://example.com/a/really")));
        for line in &lines {
            if line.contains("https://") {
                assert!(!line.ends_with('-'));
                assert_eq!(line.matches("https://").count(), 1);
            }
        }
    }

    #[test]
    fn test_javadoc_rendering() {
        let mut doc = JavadocWriter::new();
        doc.description("Gets the pet.");
        doc.param("petId", "identifier of the pet");
        doc.returns("the pet");
        let mut w = SourceWriter::new();
        w.javadoc(&doc.finish());
        let out = w.finish();
        assert!(out.starts_with("/**\n"));
        assert!(out.contains(" * Gets the pet.\n"));
        assert!(out.contains(" *\n * @param petId identifier of the pet\n"));
        assert!(out.ends_with(" */\n"));
    }
}
