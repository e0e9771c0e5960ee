//! Structured assembly of WGSL source text.
//!
//! Generators build shaders out of named fragments (bindings header,
//! helpers, readers, writer, entry point) instead of splicing one giant
//! format string, so each fragment can be emitted and tested on its own.

/// Incremental builder for a WGSL module.
#[derive(Debug, Default)]
pub struct SourceBuilder {
    lines: Vec<String>,
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single line.
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    /// Append an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Append a multi-line fragment verbatim, keeping its internal
    /// indentation. Leading and trailing blank lines of the fragment are
    /// dropped so fragments compose without double spacing.
    pub fn fragment(&mut self, text: &str) -> &mut Self {
        for line in text.trim_matches('\n').lines() {
            self.lines.push(line.trim_end().to_string());
        }
        self
    }

    pub fn build(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_blanks() {
        let mut b = SourceBuilder::new();
        b.line("const X : i32 = 4;").blank().line("fn f() {}");
        assert_eq!(b.build(), "const X : i32 = 4;\n\nfn f() {}\n");
    }

    #[test]
    fn test_fragment_trims_outer_blanks() {
        let mut b = SourceBuilder::new();
        b.fragment("\nfn f() -> f32 {\n    return 1.0;\n}\n");
        assert_eq!(b.build(), "fn f() -> f32 {\n    return 1.0;\n}\n");
    }
}
