use analyzer_core::{AnalyzerConfig, CheckContext, Checker, CheckerKind, Diagnostic};
use analyzer_core_python::{StyleChecker, SyntaxChecker, UnusedImportChecker, python_checkers};
use pretty_assertions::assert_eq;

fn run(checker: &mut dyn Checker, text: &str, config: &AnalyzerConfig) -> Vec<Diagnostic> {
    let context = CheckContext {
        source_dir: None,
        config,
    };
    checker.configure(text, &context);
    checker.diagnostics().unwrap()
}

#[test]
fn test_builtin_checkers_are_available() {
    let checkers: Vec<_> = python_checkers().iter().map(|factory| factory().unwrap()).collect();
    let names: Vec<_> = checkers.iter().map(|c| (c.name(), c.kind())).collect();
    assert_eq!(
        names,
        vec![
            ("syntax", CheckerKind::Lint),
            ("pyflakes", CheckerKind::Lint),
            ("pep8", CheckerKind::Style),
        ]
    );
}

#[test]
fn test_syntax_checker_accepts_valid_code() {
    let mut checker = SyntaxChecker::new().unwrap();
    let config = AnalyzerConfig::new();
    assert!(run(&mut checker, "def f(a):\n    return a\n", &config).is_empty());
}

#[test]
fn test_syntax_checker_reports_errors() {
    let mut checker = SyntaxChecker::new().unwrap();
    let config = AnalyzerConfig::new();
    let diagnostics = run(&mut checker, "x = 1\ndef broken(:\n    pass\n", &config);

    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().all(|d| d.line >= 1));
    assert!(
        diagnostics
            .iter()
            .all(|d| d.message == "invalid syntax" || d.message.starts_with("missing "))
    );
}

#[test]
fn test_syntax_checker_is_reusable() {
    let mut checker = SyntaxChecker::new().unwrap();
    let config = AnalyzerConfig::new();
    assert!(!run(&mut checker, "(", &config).is_empty());
    assert!(run(&mut checker, "()\n", &config).is_empty());
}

#[test]
fn test_unused_imports_are_reported() {
    let mut checker = UnusedImportChecker::new().unwrap();
    let config = AnalyzerConfig::new();
    let text = "import os, sys\nimport xml.etree as et\nfrom collections import OrderedDict, deque\n\nprint(sys.argv, deque)\n";
    let diagnostics = run(&mut checker, text, &config);

    let found: Vec<_> = diagnostics
        .iter()
        .map(|d| (d.line, d.start, d.length, d.message.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            (0, 7, 2, "'os' imported but unused"),
            (1, 7, 15, "'xml.etree as et' imported but unused"),
            (2, 24, 11, "'OrderedDict' imported but unused"),
        ]
    );
}

#[test]
fn test_dotted_import_is_used_through_its_root() {
    let mut checker = UnusedImportChecker::new().unwrap();
    let config = AnalyzerConfig::new();
    assert!(run(&mut checker, "import os.path\nos.path.join('a')\n", &config).is_empty());
}

#[test]
fn test_attribute_and_keyword_names_are_not_reads() {
    let mut checker = UnusedImportChecker::new().unwrap();
    let config = AnalyzerConfig::new();
    let diagnostics = run(&mut checker, "import json\nimport re\nx.json\nf(re=1)\n", &config);
    let names: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        names,
        vec!["'json' imported but unused", "'re' imported but unused"]
    );
}

#[test]
fn test_nested_use_all_and_future_count() {
    let mut checker = UnusedImportChecker::new().unwrap();
    let config = AnalyzerConfig::new();
    let text = "from __future__ import annotations\nimport os\nfrom m import api\n__all__ = ['api']\n\ndef f():\n    return os.sep\n";
    assert!(run(&mut checker, text, &config).is_empty());
}

#[test]
fn test_unused_imports_skip_sources_with_syntax_errors() {
    let mut checker = UnusedImportChecker::new().unwrap();
    let config = AnalyzerConfig::new();
    assert!(run(&mut checker, "import os\ndef broken(:\n", &config).is_empty());
}

#[test]
fn test_style_checker_layout_rules() {
    let mut checker = StyleChecker::new().unwrap();
    let config = AnalyzerConfig::new().with_max_line_length(10);
    let diagnostics = run(
        &mut checker,
        "short\nthis line is too long\n\tx = 1 \n   \nend",
        &config,
    );

    let found: Vec<_> = diagnostics
        .iter()
        .map(|d| (d.line, d.start, d.length, d.message.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            (1, 10, 11, "PEP-8: E501 line too long (21 > 10 characters)"),
            (2, 0, 1, "PEP-8: W191 indentation contains tabs"),
            (2, 6, 1, "PEP-8: W291 trailing whitespace"),
            (3, 0, 3, "PEP-8: W293 whitespace on blank line"),
            (4, 2, 1, "PEP-8: W292 no newline at end of file"),
        ]
    );
}

#[test]
fn test_style_checker_default_width() {
    let mut checker = StyleChecker::new().unwrap();
    let config = AnalyzerConfig::new();
    let ok = format!("x = '{}'\n", "a".repeat(73));
    let long = format!("x = '{}'\n", "a".repeat(74));

    assert!(run(&mut checker, &ok, &config).is_empty());
    let diagnostics = run(&mut checker, &long, &config);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!((diagnostics[0].start, diagnostics[0].length), (79, 1));
}

#[test]
fn test_style_checker_counts_characters() {
    let mut checker = StyleChecker::new().unwrap();
    let config = AnalyzerConfig::new().with_max_line_length(5);
    assert!(run(&mut checker, "ééééé\n", &config).is_empty());
    let diagnostics = run(&mut checker, "s='é' \n", &config);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[1].start, 5);
}
