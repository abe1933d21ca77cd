//! Python keyword vocabulary.

use analyzer_core::KeywordSet;

/// Keyword classification used for Python name tokens.
///
/// Declarations, loops and a few value keywords (`None`) are primary; control flow and
/// operators spelled as words are secondary.
pub static PYTHON_KEYWORDS: KeywordSet = KeywordSet {
    primary: &[
        "def", "for", "class", "import", "from", "with", "global", "None", "while", "yield",
        "nonlocal", "lambda", "assert", "del", "async", "await",
    ],
    secondary: &[
        "in", "as", "is", "and", "or", "not", "pass", "break", "continue", "return", "else",
        "elif", "if", "except", "finally", "try", "raise",
    ],
    true_literal: "True",
    false_literal: "False",
};
