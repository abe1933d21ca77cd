//! Scope introspection tree.
//!
//! A [`ScopeTreeBuilder`] owns a root [`ScopeContext`] seeded with host-provided builtin names.
//! Every [`ScopeTreeBuilder::rebuild`] resets the tree to that baseline and mirrors a fresh
//! [`ScopeTable`] produced by a language parser: one context per function/class scope, with the
//! names each scope declares.

use serde::{Deserialize, Serialize};

/// Kind of a scope in an external scope table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// The top-level module scope.
    Module,
    /// A function (or method) body.
    Function,
    /// A class body.
    Class,
}

/// How a symbol was bound in its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Bound by a module import (`import os`).
    Module,
    /// Bound by importing a member of a module (`from os import path`).
    Imported,
    /// A function parameter.
    Parameter,
    /// Bound by assignment.
    Local,
    /// Declared as referring to an outer binding (`global`, `nonlocal`).
    Global,
}

/// A named symbol of an external scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeSymbol {
    /// Symbol name.
    pub name: String,
    /// Binding kind.
    pub kind: SymbolKind,
}

impl ScopeSymbol {
    /// Create a symbol.
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A hierarchical symbol table, as produced by a parser/scope analyzer.
pub trait ScopeTable: Sized {
    /// Declared name of the scope (function or class name; module scopes may use any name).
    fn name(&self) -> &str;

    /// Kind of this scope.
    fn kind(&self) -> ScopeKind;

    /// Symbols bound directly in this scope.
    fn symbols(&self) -> &[ScopeSymbol];

    /// Nested function/class scopes, in source order.
    fn children(&self) -> &[Self];
}

/// Host-provided names present in every scope tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostNames {
    /// Builtin callables.
    pub functions: Vec<String>,
    /// Builtin types.
    pub classes: Vec<String>,
}

/// Number of leading, host-provided entries in each of a context's name lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScopeBaseline {
    /// Pre-existing module names.
    pub modules: usize,
    /// Pre-existing function names.
    pub functions: usize,
    /// Pre-existing class names.
    pub classes: usize,
}

/// Names declared in one lexical scope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScopeContext {
    modules: Vec<String>,
    functions: Vec<String>,
    classes: Vec<String>,
    baseline: ScopeBaseline,
    children: Vec<ScopeContext>,
}

impl ScopeContext {
    /// An empty context with a zero baseline.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context seeded with host names; the seeded names become its baseline.
    pub fn with_host_names(host: &HostNames) -> Self {
        Self {
            modules: Vec::new(),
            functions: host.functions.clone(),
            classes: host.classes.clone(),
            baseline: ScopeBaseline {
                modules: 0,
                functions: host.functions.len(),
                classes: host.classes.len(),
            },
            children: Vec::new(),
        }
    }

    /// Declared module names.
    pub fn module_names(&self) -> &[String] {
        &self.modules
    }

    /// Declared function names (baseline first).
    pub fn function_names(&self) -> &[String] {
        &self.functions
    }

    /// Declared class names (baseline first).
    pub fn class_names(&self) -> &[String] {
        &self.classes
    }

    /// Nested scopes.
    pub fn children(&self) -> &[ScopeContext] {
        &self.children
    }

    /// The recorded baseline counts.
    pub fn baseline(&self) -> ScopeBaseline {
        self.baseline
    }

    /// Truncate every list back to the baseline and drop all children.
    pub fn clear(&mut self) {
        self.modules.truncate(self.baseline.modules);
        self.functions.truncate(self.baseline.functions);
        self.classes.truncate(self.baseline.classes);
        self.children.clear();
    }

    fn fill_from<T: ScopeTable>(&mut self, table: &T) {
        self.modules.extend(
            table
                .symbols()
                .iter()
                .filter(|symbol| symbol.kind == SymbolKind::Module)
                .map(|symbol| symbol.name.clone()),
        );

        for child_table in table.children() {
            match child_table.kind() {
                ScopeKind::Function => self.functions.push(child_table.name().to_string()),
                ScopeKind::Class => self.classes.push(child_table.name().to_string()),
                ScopeKind::Module => {}
            }
            let mut child = ScopeContext::new();
            child.fill_from(child_table);
            self.children.push(child);
        }
    }
}

/// Copies of the root context's name lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalNames {
    /// Module names.
    pub modules: Vec<String>,
    /// Function names (host builtins first).
    pub functions: Vec<String>,
    /// Class names (host builtins first).
    pub classes: Vec<String>,
}

/// Owns the scope tree and rebuilds it from scope tables.
#[derive(Debug, Clone)]
pub struct ScopeTreeBuilder {
    root: ScopeContext,
}

impl ScopeTreeBuilder {
    /// Create a builder whose root is seeded with `host` names.
    pub fn new(host: &HostNames) -> Self {
        Self {
            root: ScopeContext::with_host_names(host),
        }
    }

    /// Reset to the host baseline and mirror `table`.
    pub fn rebuild<T: ScopeTable>(&mut self, table: &T) {
        self.root.clear();
        self.root.fill_from(table);
        tracing::debug!(
            modules = self.root.modules.len(),
            functions = self.root.functions.len().saturating_sub(self.root.baseline.functions),
            classes = self.root.classes.len().saturating_sub(self.root.baseline.classes),
            scopes = self.root.children.len(),
            "rebuilt scope tree"
        );
    }

    /// The root (module-level) context.
    pub fn root(&self) -> &ScopeContext {
        &self.root
    }

    /// Owned copies of the root context's name lists.
    pub fn global_names(&self) -> GlobalNames {
        GlobalNames {
            modules: self.root.modules.clone(),
            functions: self.root.functions.clone(),
            classes: self.root.classes.clone(),
        }
    }
}
