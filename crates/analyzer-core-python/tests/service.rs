use analyzer_core::{
    AnalyzerConfig, AnalyzerError, AnalyzerSession, Diagnostic, Hint, LexicalCategory,
};
use analyzer_core_python::builtins::BUILTIN_FUNCTIONS;
use analyzer_core_python::{PythonBackend, python_service};
use pretty_assertions::assert_eq;

#[test]
fn test_function_scenario_end_to_end() {
    let mut service = python_service(AnalyzerConfig::new());
    let id = service.create_session().unwrap();
    service
        .set_source_text(id, "def f():\n    return True\n")
        .unwrap();

    let categories = service.line_categories(id).unwrap();
    assert_eq!(categories[0][0].category(), LexicalCategory::PrimaryKeyword);
    assert_eq!(categories[0][4].category(), LexicalCategory::Identifier);
    assert_eq!(categories[1][4].category(), LexicalCategory::SecondaryKeyword);
    assert_eq!(categories[1][11].category(), LexicalCategory::BoolTrue);
    assert!(categories.iter().flatten().all(|c| !c.has_error()));

    assert_eq!(service.hints(id).unwrap(), vec![Hint::function(0, "f")]);
    assert!(service.diagnostics(id).unwrap().is_empty());

    let names = service.global_names(id).unwrap();
    assert_eq!(names.functions.last().map(String::as_str), Some("f"));
    assert_eq!(names.functions.len(), BUILTIN_FUNCTIONS.len() + 1);
}

#[test]
fn test_syntax_error_keeps_scopes_and_reports() {
    let mut service = python_service(AnalyzerConfig::new());
    let id = service.create_session().unwrap();

    service
        .set_source_text(id, "import os\ndef good():\n    pass\n")
        .unwrap();
    service
        .set_source_text(id, "import os\ndef good():\n    pass\ndef broken(:\n")
        .unwrap();

    let names = service.global_names(id).unwrap();
    assert_eq!(names.modules, vec!["os"]);
    assert_eq!(names.functions.last().map(String::as_str), Some("good"));
    assert!(service.hints(id).unwrap().is_empty());

    let diagnostics = service.diagnostics(id).unwrap();
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().all(|d| d.origin == "syntax"));
}

#[test]
fn test_tokenizer_diagnostics_come_first() {
    let mut service = python_service(AnalyzerConfig::new());
    let id = service.create_session().unwrap();
    service.set_source_text(id, "s = 'abc\n").unwrap();

    let diagnostics = service.diagnostics(id).unwrap();
    assert_eq!(
        diagnostics[0],
        Diagnostic::new("tokenizer", 0, 4, 4, "unterminated string literal")
    );

    let categories = service.line_categories(id).unwrap();
    assert!(categories[0][4..].iter().all(|c| c.has_error()));
    assert_eq!(categories[0][4].category(), LexicalCategory::Literal);
}

#[test]
fn test_decomposed_identifier_is_clean() {
    let mut service = python_service(AnalyzerConfig::new());
    let id = service.create_session().unwrap();
    service.set_source_text(id, "cafe\u{301} = 1\n").unwrap();

    assert!(service.diagnostics(id).unwrap().is_empty());
    let categories = service.line_categories(id).unwrap();
    assert!(categories[0][..5].iter().all(|c| c.category() == LexicalCategory::Identifier));
    assert!(categories[0].iter().all(|c| !c.has_error()));
}

#[test]
fn test_style_diagnostics_follow_configuration() {
    let mut service = python_service(AnalyzerConfig::new());
    let id = service.create_session().unwrap();

    service.set_source_text(id, "x = 1 \n").unwrap();
    assert!(service.diagnostics(id).unwrap().is_empty());

    service.set_style_check_enabled(true);
    service.set_source_text(id, "x = 1 \n").unwrap();
    let diagnostics = service.diagnostics(id).unwrap();
    assert_eq!(
        diagnostics,
        vec![Diagnostic::new("pep8", 0, 5, 1, "PEP-8: W291 trailing whitespace")]
    );

    let categories = service.line_categories(id).unwrap();
    assert!(categories[0][5].has_error());
    assert_eq!(categories[0][5].category(), LexicalCategory::Empty);
}

#[test]
fn test_empty_text_runs_no_checkers() {
    let mut service = python_service(AnalyzerConfig::new().with_style_check(true));
    let id = service.create_session().unwrap();
    service.set_source_text(id, "").unwrap();

    assert!(service.diagnostics(id).unwrap().is_empty());
    assert!(service.line_categories(id).unwrap().is_empty());
    assert!(service.hints(id).unwrap().is_empty());
}

#[test]
fn test_replace_line_reclassifies_without_reparsing() {
    let mut service = python_service(AnalyzerConfig::new());
    let id = service.create_session().unwrap();
    service.set_source_text(id, "def f():\n    pass\n").unwrap();

    let edited = service.replace_line(id, 0, "class f:").unwrap();
    assert_eq!(edited[0].category(), LexicalCategory::PrimaryKeyword);
    assert_eq!(edited.len(), "class f:".len());

    // Hints still describe the last full analysis.
    assert_eq!(service.hints(id).unwrap(), vec![Hint::function(0, "f")]);
    assert_eq!(
        service.session(id).unwrap().source_text(),
        "class f:\n    pass"
    );
}

#[test]
fn test_destroyed_session_is_not_found() {
    let mut service = python_service(AnalyzerConfig::new());
    let id = service.create_session().unwrap();
    service.destroy_session(id).unwrap();
    assert!(matches!(
        service.hints(id),
        Err(AnalyzerError::SessionNotFound(_))
    ));
}

#[test]
fn test_sessions_can_move_between_threads() {
    fn assert_send<T: Send>() {}
    assert_send::<AnalyzerSession<PythonBackend>>();
}
