//! Tree-sitter parsing and scope tables.
//!
//! [`PythonParser`] wraps a `tree_sitter::Parser` loaded with the Python grammar.
//! [`PythonScopeTable`] mirrors the lexical scopes of a parse tree: one table for the module,
//! one per `def` and `class`, wherever they are nested.

use analyzer_core::{BackendError, ScopeKind, ScopeSymbol, ScopeTable, SymbolKind};
use tree_sitter::{Node, Parser, Tree};

/// Name of the module-level scope table.
pub const MODULE_SCOPE_NAME: &str = "<module>";

/// A Python parser.
pub struct PythonParser {
    parser: Parser,
}

impl std::fmt::Debug for PythonParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PythonParser").finish_non_exhaustive()
    }
}

impl PythonParser {
    /// Create a parser with the Python grammar loaded.
    pub fn new() -> Result<Self, BackendError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| BackendError::Grammar(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse `text` from scratch.
    ///
    /// The tree is returned even when it contains error nodes; see [`Node::has_error`].
    pub fn parse(&mut self, text: &str) -> Option<Tree> {
        self.parser.parse(text, None)
    }
}

/// Names bound in one Python scope, plus its nested scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonScopeTable {
    name: String,
    kind: ScopeKind,
    symbols: Vec<ScopeSymbol>,
    children: Vec<PythonScopeTable>,
}

impl PythonScopeTable {
    fn new(name: impl Into<String>, kind: ScopeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            symbols: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Build the module table for a parse of `source`.
    pub fn from_tree(tree: &Tree, source: &str) -> Self {
        let mut module = Self::new(MODULE_SCOPE_NAME, ScopeKind::Module);
        module.collect_block(tree.root_node(), source.as_bytes());
        module
    }

    /// Look up a symbol by name.
    pub fn symbol(&self, name: &str) -> Option<&ScopeSymbol> {
        self.symbols.iter().find(|symbol| symbol.name == name)
    }

    fn bind(&mut self, name: &str, kind: SymbolKind) {
        // First binding wins, like a symbol table keyed by name.
        if self.symbol(name).is_none() {
            self.symbols.push(ScopeSymbol::new(name, kind));
        }
    }

    fn collect_block(&mut self, node: Node<'_>, source: &[u8]) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child, source);
        }
    }

    fn visit(&mut self, node: Node<'_>, source: &[u8]) {
        match node.kind() {
            "function_definition" => self.nested_scope(node, ScopeKind::Function, source),
            "class_definition" => self.nested_scope(node, ScopeKind::Class, source),
            "import_statement" => {
                let mut cursor = node.walk();
                for name in node.children_by_field_name("name", &mut cursor) {
                    if let Some(bound) = import_binding(name, source, true) {
                        self.bind(bound, SymbolKind::Module);
                    }
                }
            }
            "import_from_statement" => {
                let mut cursor = node.walk();
                for name in node.children_by_field_name("name", &mut cursor) {
                    if let Some(bound) = import_binding(name, source, false) {
                        self.bind(bound, SymbolKind::Imported);
                    }
                }
            }
            "global_statement" | "nonlocal_statement" => {
                let mut cursor = node.walk();
                for name in node.named_children(&mut cursor) {
                    if name.kind() == "identifier" {
                        self.bind(text_of(name, source), SymbolKind::Global);
                    }
                }
            }
            "assignment" | "augmented_assignment" | "for_statement" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.bind_targets(left, source);
                }
                self.collect_block(node, source);
            }
            // Lambdas and comprehensions do not open scopes of their own.
            _ => self.collect_block(node, source),
        }
    }

    fn nested_scope(&mut self, node: Node<'_>, kind: ScopeKind, source: &[u8]) {
        let Some(name) = node.child_by_field_name("name").map(|n| text_of(n, source)) else {
            return;
        };
        self.bind(name, SymbolKind::Local);

        let mut scope = Self::new(name, kind);
        if let Some(parameters) = node.child_by_field_name("parameters") {
            let mut cursor = parameters.walk();
            for parameter in parameters.named_children(&mut cursor) {
                scope.bind_parameter(parameter, source);
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            scope.collect_block(body, source);
        }
        self.children.push(scope);
    }

    fn bind_parameter(&mut self, node: Node<'_>, source: &[u8]) {
        match node.kind() {
            "identifier" => self.bind(text_of(node, source), SymbolKind::Parameter),
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.bind_parameter(name, source);
                }
            }
            "typed_parameter" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                let mut cursor = node.walk();
                if let Some(inner) = node.named_children(&mut cursor).next() {
                    self.bind_parameter(inner, source);
                }
            }
            _ => {}
        }
    }

    fn bind_targets(&mut self, node: Node<'_>, source: &[u8]) {
        match node.kind() {
            "identifier" => self.bind(text_of(node, source), SymbolKind::Local),
            "pattern_list" | "tuple_pattern" | "list_pattern" | "list_splat_pattern"
            | "expression_list" | "tuple" | "list" | "parenthesized_expression" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.bind_targets(child, source);
                }
            }
            // Attribute and subscript targets bind nothing.
            _ => {}
        }
    }
}

impl ScopeTable for PythonScopeTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ScopeKind {
        self.kind
    }

    fn symbols(&self) -> &[ScopeSymbol] {
        &self.symbols
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// Source text of a node; empty if the slice is not valid UTF-8.
pub(crate) fn text_of<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_default()
}

/// The name an import binds: the alias if present, else the imported name.
///
/// `import a.b` binds `a`, while `from m import a` binds `a` as written.
pub(crate) fn import_binding<'a>(node: Node<'_>, source: &'a [u8], top_level_only: bool) -> Option<&'a str> {
    match node.kind() {
        "aliased_import" => node.child_by_field_name("alias").map(|alias| text_of(alias, source)),
        "dotted_name" => {
            let dotted = text_of(node, source);
            let bound = if top_level_only {
                dotted.split('.').next().unwrap_or(dotted)
            } else {
                dotted
            };
            (!bound.is_empty()).then_some(bound)
        }
        _ => None,
    }
}
