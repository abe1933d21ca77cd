//! Collected analysis results and their text rendering.

use analyzer_core::{
    AnalyzerError, AnalyzerService, CharClass, Diagnostic, GlobalNames, Hint, HintKind,
    LanguageBackend, LexicalCategory, LineRank, SessionId,
};
use serde::Serialize;
use std::io::{self, Write};

/// Everything the CLI prints for one file.
#[derive(Debug, Serialize)]
pub struct Report {
    pub path: String,
    pub diagnostics: Vec<Diagnostic>,
    pub hints: Vec<Hint>,
    /// Names declared by the file itself; host builtins are left out.
    pub globals: GlobalNames,
    pub ranks: Vec<LineRank>,
    pub categories: Vec<Vec<CharClass>>,
    #[serde(skip)]
    pub lines: Vec<String>,
}

impl Report {
    /// Collect the current state of session `id`.
    pub fn collect<B: LanguageBackend>(
        service: &AnalyzerService<B>,
        id: SessionId,
        path: impl Into<String>,
    ) -> Result<Self, AnalyzerError> {
        let session = service.session(id)?;
        let root = session.global_scope();
        let baseline = root.baseline();

        Ok(Self {
            path: path.into(),
            diagnostics: service.diagnostics(id)?,
            hints: service.hints(id)?,
            globals: GlobalNames {
                modules: declared(root.module_names(), baseline.modules),
                functions: declared(root.function_names(), baseline.functions),
                classes: declared(root.class_names(), baseline.classes),
            },
            ranks: service.line_ranks(id)?,
            categories: service.line_categories(id)?,
            lines: session
                .classifier()
                .lines()
                .iter()
                .map(|line| line.text().to_string())
                .collect(),
        })
    }

    /// Human-readable rendering. Line and column numbers are 1-based.
    pub fn render_text(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "== diagnostics ({}) ==", self.diagnostics.len())?;
        for d in &self.diagnostics {
            writeln!(
                out,
                "{}:{}:{}: [{}] {}",
                self.path,
                d.line + 1,
                d.start + 1,
                d.origin,
                d.message
            )?;
        }

        writeln!(out, "== hints ==")?;
        for hint in &self.hints {
            writeln!(out, "{}: {} {}", hint.line + 1, hint_label(hint.kind), hint.name)?;
        }

        writeln!(out, "== globals ==")?;
        writeln!(out, "modules: {}", self.globals.modules.join(", "))?;
        writeln!(out, "functions: {}", self.globals.functions.join(", "))?;
        writeln!(out, "classes: {}", self.globals.classes.join(", "))?;

        writeln!(out, "== categories ==")?;
        for (row, classes) in self.categories.iter().enumerate() {
            let rank = self.ranks.get(row).copied().unwrap_or_default();
            let text = self.lines.get(row).map(String::as_str).unwrap_or_default();
            let codes: String = classes.iter().map(|c| category_code(*c)).collect();
            writeln!(out, "{:>4} {}>{} | {}", row + 1, rank.enter, rank.leave, text)?;
            writeln!(out, "{:>4}       | {}", "", codes.trim_end())?;
        }
        Ok(())
    }
}

fn declared(names: &[String], baseline: usize) -> Vec<String> {
    names.get(baseline..).unwrap_or_default().to_vec()
}

fn hint_label(kind: HintKind) -> &'static str {
    match kind {
        HintKind::None => "-",
        HintKind::Module => "module",
        HintKind::Function => "def",
        HintKind::Class => "class",
    }
}

/// One character per category; errors are shown as `!`.
pub fn category_code(class: CharClass) -> char {
    if class.has_error() {
        return '!';
    }
    match class.category() {
        LexicalCategory::Empty => ' ',
        LexicalCategory::PrimaryKeyword => 'K',
        LexicalCategory::SecondaryKeyword => 'k',
        LexicalCategory::Identifier => 'i',
        LexicalCategory::BoolTrue => 'T',
        LexicalCategory::BoolFalse => 'F',
        LexicalCategory::Literal => 's',
        LexicalCategory::Number => 'n',
        LexicalCategory::Comment => 'c',
        LexicalCategory::Operator => 'o',
    }
}
