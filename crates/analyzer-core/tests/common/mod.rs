#![allow(dead_code)]

use analyzer_core::{
    BackendError, CheckContext, Checker, CheckerError, Diagnostic, Hint, HostNames, KeywordSet,
    LanguageBackend, ParsedSource, ScopeKind, ScopeSymbol, ScopeTable, SymbolKind, TextPosition,
    Token, TokenKind, TokenStream, TokenizeError, Tokenizer, physical_lines,
};

pub static WORD_KEYWORDS: KeywordSet = KeywordSet {
    primary: &["def", "class", "import"],
    secondary: &["return", "if"],
    true_literal: "yes",
    false_literal: "no",
};

/// Names, `"""` strings spanning lines, `#` comments and `$` as an error token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        let lines: Vec<Vec<char>> = physical_lines(text)
            .map(|l| l.content.chars().collect())
            .collect();
        let mut tokens = Vec::new();
        let (mut row, mut col) = (0, 0);

        while row < lines.len() {
            let line = &lines[row];
            if col >= line.len() {
                tokens.push(Token::new(
                    TokenKind::Newline,
                    "\n",
                    TextPosition::new(row, line.len()),
                    TextPosition::new(row, line.len() + 1),
                ));
                row += 1;
                col = 0;
                continue;
            }

            let c = line[col];
            if c.is_alphabetic() || c == '_' {
                let start = col;
                while col < line.len() && (line[col].is_alphanumeric() || line[col] == '_') {
                    col += 1;
                }
                tokens.push(Token::new(
                    TokenKind::Name,
                    line[start..col].iter().collect::<String>(),
                    TextPosition::new(row, start),
                    TextPosition::new(row, col),
                ));
            } else if line[col..].starts_with(&['"', '"', '"']) {
                let start = TextPosition::new(row, col);
                col += 3;
                loop {
                    let rest = &lines[row][col..];
                    if let Some(pos) = rest.windows(3).position(|w| w == ['"', '"', '"']) {
                        col += pos + 3;
                        tokens.push(Token::new(
                            TokenKind::String,
                            "\"\"\"...\"\"\"",
                            start,
                            TextPosition::new(row, col),
                        ));
                        break;
                    }
                    row += 1;
                    col = 0;
                    if row >= lines.len() {
                        return TokenStream {
                            tokens,
                            failure: Some(TokenizeError::UnterminatedString { start }),
                        };
                    }
                }
            } else if c == '#' {
                tokens.push(Token::new(
                    TokenKind::Comment,
                    line[col..].iter().collect::<String>(),
                    TextPosition::new(row, col),
                    TextPosition::new(row, line.len()),
                ));
                col = line.len();
            } else if c == '$' {
                tokens.push(Token::new(
                    TokenKind::Error,
                    "$",
                    TextPosition::new(row, col),
                    TextPosition::new(row, col + 1),
                ));
                col += 1;
            } else {
                col += 1;
            }
        }

        tokens.push(Token::new(
            TokenKind::EndMarker,
            "",
            TextPosition::new(lines.len(), 0),
            TextPosition::new(lines.len(), 0),
        ));
        TokenStream {
            tokens,
            failure: None,
        }
    }

    fn keywords(&self) -> &KeywordSet {
        &WORD_KEYWORDS
    }
}

/// An in-memory scope table.
#[derive(Debug, Clone)]
pub struct TestScope {
    pub name: String,
    pub kind: ScopeKind,
    pub symbols: Vec<ScopeSymbol>,
    pub children: Vec<TestScope>,
}

impl TestScope {
    pub fn module() -> Self {
        Self::new("<module>", ScopeKind::Module)
    }

    pub fn new(name: &str, kind: ScopeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            symbols: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn symbol(mut self, name: &str, kind: SymbolKind) -> Self {
        self.symbols.push(ScopeSymbol::new(name, kind));
        self
    }

    pub fn child(mut self, child: TestScope) -> Self {
        self.children.push(child);
        self
    }
}

impl ScopeTable for TestScope {
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

pub fn test_host_names() -> HostNames {
    HostNames {
        functions: vec!["print".to_string(), "len".to_string()],
        classes: vec!["int".to_string(), "str".to_string()],
    }
}

/// Line-oriented toy language: `def NAME`, `class NAME`, `import NAME`; `!!` is a syntax error.
#[derive(Debug, Default)]
pub struct TestBackend;

impl LanguageBackend for TestBackend {
    type Tokenizer = WordTokenizer;
    type ScopeTable = TestScope;

    fn tokenizer(&self) -> WordTokenizer {
        WordTokenizer
    }

    fn host_names(&self) -> HostNames {
        test_host_names()
    }

    fn parse(&mut self, text: &str) -> Option<ParsedSource<TestScope>> {
        if text.contains("!!") {
            return None;
        }
        let mut scopes = TestScope::module();
        let mut hints = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let mut words = line.split_whitespace();
            match (words.next(), words.next()) {
                (Some("def"), Some(name)) => {
                    scopes = scopes.child(TestScope::new(name, ScopeKind::Function));
                    hints.push(Hint::function(line_no, name));
                }
                (Some("class"), Some(name)) => {
                    scopes = scopes.child(TestScope::new(name, ScopeKind::Class));
                }
                (Some("import"), Some(name)) => {
                    scopes = scopes.symbol(name, SymbolKind::Module);
                }
                _ => {}
            }
        }
        Some(ParsedSource { scopes, hints })
    }
}

pub fn test_backend() -> Result<TestBackend, BackendError> {
    Ok(TestBackend)
}

/// Reports every line containing `TODO`.
pub struct TodoChecker {
    text: String,
}

impl Checker for TodoChecker {
    fn name(&self) -> &str {
        "todo"
    }

    fn configure(&mut self, text: &str, _context: &CheckContext<'_>) {
        self.text = text.to_string();
    }

    fn diagnostics(&mut self) -> Result<Vec<Diagnostic>, CheckerError> {
        Ok(self
            .text
            .lines()
            .enumerate()
            .filter_map(|(line, content)| {
                content
                    .find("TODO")
                    .map(|start| Diagnostic::new("", line, start, 4, "unfinished work"))
            })
            .collect())
    }
}

pub fn todo_checker() -> Result<Box<dyn Checker>, CheckerError> {
    Ok(Box::new(TodoChecker {
        text: String::new(),
    }))
}

/// Reports long lines, but only as a style checker.
pub struct WidthChecker {
    text: String,
    max: usize,
}

impl Checker for WidthChecker {
    fn name(&self) -> &str {
        "width"
    }

    fn kind(&self) -> analyzer_core::CheckerKind {
        analyzer_core::CheckerKind::Style
    }

    fn configure(&mut self, text: &str, context: &CheckContext<'_>) {
        self.text = text.to_string();
        self.max = context.config.max_line_length;
    }

    fn diagnostics(&mut self) -> Result<Vec<Diagnostic>, CheckerError> {
        Ok(self
            .text
            .lines()
            .enumerate()
            .filter(|(_, content)| content.chars().count() > self.max)
            .map(|(line, content)| {
                let len = content.chars().count();
                Diagnostic::new("", line, self.max, len - self.max, "line too long")
            })
            .collect())
    }
}

pub fn width_checker() -> Result<Box<dyn Checker>, CheckerError> {
    Ok(Box::new(WidthChecker {
        text: String::new(),
        max: 0,
    }))
}

pub fn missing_checker() -> Result<Box<dyn Checker>, CheckerError> {
    Err(CheckerError::Unavailable("missing".to_string()))
}

/// Always fails at run time.
pub struct BrokenChecker;

impl Checker for BrokenChecker {
    fn name(&self) -> &str {
        "broken"
    }

    fn configure(&mut self, _text: &str, _context: &CheckContext<'_>) {}

    fn diagnostics(&mut self) -> Result<Vec<Diagnostic>, CheckerError> {
        Err(CheckerError::Failed {
            name: "broken".to_string(),
            message: "crashed".to_string(),
        })
    }
}

pub fn broken_checker() -> Result<Box<dyn Checker>, CheckerError> {
    Ok(Box::new(BrokenChecker))
}
