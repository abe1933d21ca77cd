//! Built-in Python checkers.
//!
//! - [`SyntaxChecker`] reports the error and missing nodes of a tree-sitter parse.
//! - [`UnusedImportChecker`] reports imported names that are never referenced.
//! - [`StyleChecker`] runs a handful of PEP 8 layout checks over the raw lines.
//!
//! All three are plain [`Checker`] implementations; [`python_checkers`] lists their factories for
//! [`analyzer_core::AnalyzerService::new`].

use crate::parser::{PythonParser, import_binding, text_of};
use analyzer_core::{
    CheckContext, Checker, CheckerError, CheckerFactory, CheckerKind, Diagnostic,
    DEFAULT_MAX_LINE_LENGTH, physical_lines,
};
use regex::Regex;
use std::collections::HashSet;
use tree_sitter::{Node, Point};

const STYLE_PREFIX: &str = "PEP-8: ";

/// Factories for every built-in Python checker.
pub fn python_checkers() -> &'static [CheckerFactory] {
    &[syntax_checker, unused_import_checker, style_checker]
}

/// Factory for [`SyntaxChecker`].
pub fn syntax_checker() -> Result<Box<dyn Checker>, CheckerError> {
    Ok(Box::new(SyntaxChecker::new()?))
}

/// Factory for [`UnusedImportChecker`].
pub fn unused_import_checker() -> Result<Box<dyn Checker>, CheckerError> {
    Ok(Box::new(UnusedImportChecker::new()?))
}

/// Factory for [`StyleChecker`].
pub fn style_checker() -> Result<Box<dyn Checker>, CheckerError> {
    Ok(Box::new(StyleChecker::new()?))
}

/// Reports syntax errors found by the tree-sitter grammar.
#[derive(Debug)]
pub struct SyntaxChecker {
    parser: PythonParser,
    text: String,
}

impl SyntaxChecker {
    /// Create a checker with its own parser.
    pub fn new() -> Result<Self, CheckerError> {
        let parser = PythonParser::new().map_err(|e| CheckerError::Unavailable(format!("syntax: {e}")))?;
        Ok(Self {
            parser,
            text: String::new(),
        })
    }
}

impl Checker for SyntaxChecker {
    fn name(&self) -> &str {
        "syntax"
    }

    fn configure(&mut self, text: &str, _context: &CheckContext<'_>) {
        self.text = text.to_string();
    }

    fn diagnostics(&mut self) -> Result<Vec<Diagnostic>, CheckerError> {
        let tree = self.parser.parse(&self.text).ok_or_else(|| CheckerError::Failed {
            name: "syntax".to_string(),
            message: "parser returned no tree".to_string(),
        })?;

        let lines: Vec<&str> = physical_lines(&self.text).map(|line| line.content).collect();
        let mut out = Vec::new();
        collect_syntax_errors(tree.root_node(), &lines, &mut out);
        Ok(out)
    }
}

fn collect_syntax_errors(node: Node<'_>, lines: &[&str], out: &mut Vec<Diagnostic>) {
    if !node.has_error() {
        return;
    }
    if node.is_error() {
        out.push(node_diagnostic(node, lines, "invalid syntax".to_string()));
        return;
    }
    if node.is_missing() {
        out.push(node_diagnostic(node, lines, format!("missing {}", node.kind())));
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_syntax_errors(child, lines, out);
    }
}

/// A diagnostic covering `node`, clipped to its start line and at least one character wide
/// where the line allows it.
fn node_diagnostic(node: Node<'_>, lines: &[&str], message: String) -> Diagnostic {
    let start = node.start_position();
    let line = lines.get(start.row).copied().unwrap_or_default();
    let line_len = line.chars().count();

    let from = char_column(line, start);
    let end = node.end_position();
    let to = if end.row == start.row {
        char_column(line, end)
    } else {
        line_len
    };

    let length = match to.saturating_sub(from) {
        0 if from < line_len => 1,
        n => n,
    };
    Diagnostic::new("", start.row, from, length, message)
}

/// Convert a tree-sitter byte column into a character column.
fn char_column(line: &str, point: Point) -> usize {
    let byte = point.column.min(line.len());
    line.get(..byte)
        .map(|prefix| prefix.chars().count())
        .unwrap_or_else(|| line.chars().count())
}

/// Reports imports whose bound name is never read, in the manner of pyflakes.
///
/// Usage is matched by name over the whole module: a name imported in one function and read in
/// another counts as used. Names listed in a module-level `__all__` count as used, and
/// `from __future__` imports are never reported. Sources with syntax errors are left to
/// [`SyntaxChecker`].
#[derive(Debug)]
pub struct UnusedImportChecker {
    parser: PythonParser,
    text: String,
}

impl UnusedImportChecker {
    /// Create a checker with its own parser.
    pub fn new() -> Result<Self, CheckerError> {
        let parser =
            PythonParser::new().map_err(|e| CheckerError::Unavailable(format!("pyflakes: {e}")))?;
        Ok(Self {
            parser,
            text: String::new(),
        })
    }
}

impl Checker for UnusedImportChecker {
    fn name(&self) -> &str {
        "pyflakes"
    }

    fn configure(&mut self, text: &str, _context: &CheckContext<'_>) {
        self.text = text.to_string();
    }

    fn diagnostics(&mut self) -> Result<Vec<Diagnostic>, CheckerError> {
        let tree = self.parser.parse(&self.text).ok_or_else(|| CheckerError::Failed {
            name: "pyflakes".to_string(),
            message: "parser returned no tree".to_string(),
        })?;
        let root = tree.root_node();
        if root.has_error() {
            return Ok(Vec::new());
        }

        let source = self.text.as_bytes();
        let mut imports = Vec::new();
        let mut used = HashSet::new();
        collect_imports_and_uses(root, source, &mut imports, &mut used);

        let lines: Vec<&str> = physical_lines(&self.text).map(|line| line.content).collect();
        Ok(imports
            .into_iter()
            .filter(|(_, bound)| !used.contains(bound))
            .map(|(node, _)| {
                let message = format!("'{}' imported but unused", text_of(node, source));
                node_diagnostic(node, &lines, message)
            })
            .collect())
    }
}

/// Pre-order walk recording `(imported node, bound name)` pairs and every name read.
fn collect_imports_and_uses<'t, 's>(
    node: Node<'t>,
    source: &'s [u8],
    imports: &mut Vec<(Node<'t>, &'s str)>,
    used: &mut HashSet<&'s str>,
) {
    match node.kind() {
        "import_statement" | "import_from_statement" => {
            let from_future = node
                .child_by_field_name("module_name")
                .is_some_and(|module| text_of(module, source) == "__future__");
            if from_future {
                return;
            }
            let top_level_only = node.kind() == "import_statement";
            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                if let Some(bound) = import_binding(name, source, top_level_only) {
                    imports.push((name, bound));
                }
            }
            return;
        }
        "identifier" if is_read(node) => {
            used.insert(text_of(node, source));
        }
        "assignment" => {
            let exports = node
                .child_by_field_name("left")
                .is_some_and(|left| text_of(left, source) == "__all__");
            if exports && let Some(right) = node.child_by_field_name("right") {
                collect_exported(right, source, used);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_imports_and_uses(child, source, imports, used);
    }
}

/// Attribute names after a dot and keyword-argument names are not reads of a binding.
fn is_read(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return true;
    };
    match parent.kind() {
        "attribute" => parent.child_by_field_name("attribute") != Some(node),
        "keyword_argument" => parent.child_by_field_name("name") != Some(node),
        _ => true,
    }
}

fn collect_exported<'s>(node: Node<'_>, source: &'s [u8], used: &mut HashSet<&'s str>) {
    if node.kind() == "string" {
        used.insert(text_of(node, source).trim_matches(|c| c == '\'' || c == '"'));
        return;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_exported(child, source, used);
    }
}

/// PEP 8 layout checks: long lines, trailing whitespace, tab indentation and a missing final
/// newline.
#[derive(Debug, Clone)]
pub struct StyleChecker {
    trailing_whitespace: Regex,
    tab_indent: Regex,
    text: String,
    max_line_length: usize,
}

impl StyleChecker {
    /// Create a checker.
    pub fn new() -> Result<Self, CheckerError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| CheckerError::Unavailable(format!("pep8: {e}")))
        };
        Ok(Self {
            trailing_whitespace: compile(r"[ \t\x0c]+$")?,
            tab_indent: compile(r"^[ \t]*\t[ \t]*")?,
            text: String::new(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        })
    }

    fn check_line(&self, row: usize, line: &str, out: &mut Vec<Diagnostic>) {
        let len = line.chars().count();
        if len > self.max_line_length {
            out.push(style(
                row,
                self.max_line_length,
                len - self.max_line_length,
                format!("E501 line too long ({len} > {} characters)", self.max_line_length),
            ));
        }

        if let Some(m) = self.tab_indent.find(line) {
            out.push(style(row, 0, m.as_str().chars().count(), "W191 indentation contains tabs"));
        }

        if let Some(m) = self.trailing_whitespace.find(line) {
            let start = line[..m.start()].chars().count();
            let message = if start == 0 {
                "W293 whitespace on blank line"
            } else {
                "W291 trailing whitespace"
            };
            out.push(style(row, start, m.as_str().chars().count(), message));
        }
    }
}

fn style(line: usize, start: usize, length: usize, message: impl AsRef<str>) -> Diagnostic {
    Diagnostic::new("", line, start, length, format!("{STYLE_PREFIX}{}", message.as_ref()))
}

impl Checker for StyleChecker {
    fn name(&self) -> &str {
        "pep8"
    }

    fn kind(&self) -> CheckerKind {
        CheckerKind::Style
    }

    fn configure(&mut self, text: &str, context: &CheckContext<'_>) {
        self.text = text.to_string();
        self.max_line_length = context.config.max_line_length;
    }

    fn diagnostics(&mut self) -> Result<Vec<Diagnostic>, CheckerError> {
        let mut out = Vec::new();
        let mut last = None;
        for (row, line) in physical_lines(&self.text).enumerate() {
            self.check_line(row, line.content, &mut out);
            last = Some((row, line));
        }

        if let Some((row, line)) = last
            && !line.terminated
        {
            let len = line.content.chars().count();
            out.push(style(
                row,
                len.saturating_sub(1),
                len.min(1),
                "W292 no newline at end of file",
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_column_counts_characters() {
        let line = "s = 'héllo' x";
        // 'x' is at byte 13, char 12.
        assert_eq!(char_column(line, Point { row: 0, column: 13 }), 12);
        assert_eq!(char_column(line, Point { row: 0, column: 99 }), 13);
        // Inside a multi-byte character: fall back to the line length.
        assert_eq!(char_column(line, Point { row: 0, column: 7 }), 13);
    }
}
