//! Python tokenizer.
//!
//! [`PythonTokenizer`] produces the same token sequence as CPython's `tokenize` module for
//! well-formed input: INDENT/DEDENT from an indentation stack, NEWLINE for the end of a logical
//! line and NL for every other line break, strings spanning lines, and a synthesized NEWLINE
//! when the buffer does not end with one.
//!
//! It differs in two places, both to keep the token stream useful for highlighting:
//! - an unterminated single-quoted string becomes one [`TokenKind::Error`] token running to the
//!   end of its line, instead of a lone quote followed by ordinary tokens
//! - every stray character becomes its own one-character error token
//!
//! Single-line token shapes (names, numbers, operators, string openers) are matched with
//! anchored [`regex`] patterns; names use the `XID_Start`/`XID_Continue` classes Python
//! identifiers are defined by. Indentation and strings that cross lines are tracked by the
//! scanner itself.
//!
//! Positions are zero-based rows and character columns, matching
//! [`analyzer_core::physical_lines`].

use crate::keywords::PYTHON_KEYWORDS;
use analyzer_core::{
    KeywordSet, TextPosition, Token, TokenKind, TokenStream, TokenizeError, Tokenizer,
    physical_lines,
};
use regex::Regex;

const TAB_SIZE: usize = 8;

/// Operators, longest first so that alternation picks the longest match.
const OPERATORS: &[&str] = &[
    "**=", "...", ">>=", "<<=", "//=", "**", "//", ">>", "<<", "<=", ">=", "==", "!=", "->",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "@=", ":=", "+", "-", "*", "/", "%", "&",
    "|", "^", "~", "<", ">", "=", "(", ")", "[", "]", "{", "}", ",", ":", ";", ".", "@",
];

/// Anchored patterns for the single-line token shapes.
#[derive(Debug, Clone)]
struct TokenRules {
    /// Optional prefix and opening quote(s); group 1 is the quote.
    string_start: Regex,
    number: Regex,
    name: Regex,
    operator: Regex,
}

impl TokenRules {
    fn new() -> Result<Self, regex::Error> {
        let operators: Vec<String> = OPERATORS.iter().map(|op| regex::escape(op)).collect();
        Ok(Self {
            string_start: Regex::new(r#"^(?i:br|rb|fr|rf|[rbuf])?('''|"""|'|")"#)?,
            number: Regex::new(
                r"^(?:0[xXoObB][0-9a-fA-F_]*|(?:[0-9][0-9_]*(?:\.[0-9_]*)?|\.[0-9][0-9_]*)(?:[eE][+-]?[0-9][0-9_]*)?[jJ]?)",
            )?,
            name: Regex::new(r"^[\p{XID_Start}_]\p{XID_Continue}*")?,
            operator: Regex::new(&format!("^(?:{})", operators.join("|")))?,
        })
    }
}

/// Length in chars of `rule`'s match at the start of `text`.
fn match_len(rule: &Regex, text: &str) -> Option<usize> {
    rule.find(text).map(|m| m.as_str().chars().count())
}

/// Tokenizer for Python 3 source.
#[derive(Debug, Clone)]
pub struct PythonTokenizer {
    rules: TokenRules,
}

impl PythonTokenizer {
    /// Create a tokenizer, compiling its token patterns.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            rules: TokenRules::new()?,
        })
    }
}

impl Tokenizer for PythonTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        Scanner::new(&self.rules).run(text)
    }

    fn keywords(&self) -> &KeywordSet {
        &PYTHON_KEYWORDS
    }
}

struct SourceLine {
    text: String,
    chars: Vec<char>,
    /// Byte offset of each char, plus the text length.
    offsets: Vec<usize>,
    terminated: bool,
}

impl SourceLine {
    fn new(content: &str, terminated: bool) -> Self {
        let offsets = content
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(content.len()))
            .collect();
        Self {
            text: content.to_string(),
            chars: content.chars().collect(),
            offsets,
            terminated,
        }
    }

    /// The text from char column `pos` on.
    fn rest(&self, pos: usize) -> &str {
        &self.text[self.offsets[pos]..]
    }
}

/// A string literal still open at the end of a line.
struct PendingString {
    start: TextPosition,
    quote: char,
    triple: bool,
    text: String,
}

enum StringEnd {
    /// Column one past the closing quote(s).
    Closed(usize),
    /// No closing quote on this line; `escaped_newline` when the line ends in a backslash.
    Open { escaped_newline: bool },
}

/// Columns of the enclosing indented blocks. The bottom entry is always 0.
struct IndentStack {
    levels: Vec<usize>,
}

enum IndentChange {
    Same,
    Indent,
    /// Number of blocks closed.
    Dedent(usize),
}

impl IndentStack {
    fn new() -> Self {
        Self { levels: vec![0] }
    }

    /// Number of open blocks.
    fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Move to `column`. `None` when it matches no enclosing level.
    fn move_to(&mut self, column: usize) -> Option<IndentChange> {
        let current = self.levels.last().copied().unwrap_or(0);
        if column > current {
            self.levels.push(column);
            return Some(IndentChange::Indent);
        }
        if column == current {
            return Some(IndentChange::Same);
        }
        let keep = self.levels.iter().position(|&level| level == column)?;
        let closed = self.levels.len() - keep - 1;
        self.levels.truncate(keep + 1);
        Some(IndentChange::Dedent(closed))
    }
}

/// Leading whitespace of a line as `(chars, column)`.
fn leading_indent(chars: &[char]) -> (usize, usize) {
    let mut column = 0;
    let mut pos = 0;
    while pos < chars.len() {
        match chars[pos] {
            ' ' => column += 1,
            '\t' => column = (column / TAB_SIZE + 1) * TAB_SIZE,
            '\x0c' => column = 0,
            _ => break,
        }
        pos += 1;
    }
    (pos, column)
}

struct Scanner<'a> {
    rules: &'a TokenRules,
    tokens: Vec<Token>,
    indents: IndentStack,
    paren_depth: usize,
    continued: bool,
    pending: Option<PendingString>,
}

impl<'a> Scanner<'a> {
    fn new(rules: &'a TokenRules) -> Self {
        Self {
            rules,
            tokens: Vec::new(),
            indents: IndentStack::new(),
            paren_depth: 0,
            continued: false,
            pending: None,
        }
    }

    fn run(mut self, text: &str) -> TokenStream {
        let lines: Vec<SourceLine> = physical_lines(text)
            .map(|line| SourceLine::new(line.content, line.terminated))
            .collect();

        for (row, line) in lines.iter().enumerate() {
            if let Err(failure) = self.scan_line(row, line) {
                return self.fail(failure);
            }
        }

        let eof = lines.len();
        if let Some(pending) = &self.pending {
            let start = pending.start;
            return self.fail(TokenizeError::UnterminatedString { start });
        }
        if self.paren_depth > 0 || self.continued {
            return self.fail(TokenizeError::UnterminatedStatement {
                line: eof.saturating_sub(1),
            });
        }

        let at = TextPosition::new(eof, 0);
        for _ in 0..self.indents.depth() {
            self.push(TokenKind::Dedent, String::new(), at, at);
        }
        self.push(TokenKind::EndMarker, String::new(), at, at);

        TokenStream {
            tokens: self.tokens,
            failure: None,
        }
    }

    fn fail(self, failure: TokenizeError) -> TokenStream {
        TokenStream {
            tokens: self.tokens,
            failure: Some(failure),
        }
    }

    fn push(&mut self, kind: TokenKind, text: String, start: TextPosition, end: TextPosition) {
        self.tokens.push(Token::new(kind, text, start, end));
    }

    fn scan_line(&mut self, row: usize, line: &SourceLine) -> Result<(), TokenizeError> {
        let chars = line.chars.as_slice();
        let len = chars.len();
        let mut pos = 0;

        if let Some(mut pending) = self.pending.take() {
            match find_string_end(chars, 0, pending.quote, pending.triple) {
                StringEnd::Closed(end) => {
                    pending.text.extend(&chars[..end]);
                    self.push(TokenKind::String, pending.text, pending.start, TextPosition::new(row, end));
                    pos = end;
                }
                StringEnd::Open { escaped_newline }
                    if pending.triple || (escaped_newline && line.terminated) =>
                {
                    pending.text.extend(chars);
                    pending.text.push('\n');
                    self.pending = Some(pending);
                    return Ok(());
                }
                StringEnd::Open { .. } => {
                    pending.text.extend(chars);
                    self.push(TokenKind::Error, pending.text, pending.start, TextPosition::new(row, len));
                    return Ok(());
                }
            }
        } else if self.paren_depth == 0 && !self.continued {
            let (indent, column) = leading_indent(chars);
            pos = indent;

            // Blank and comment-only lines never affect indentation.
            if pos == len || chars[pos] == '#' {
                if pos < len {
                    self.push(
                        TokenKind::Comment,
                        chars[pos..].iter().collect(),
                        TextPosition::new(row, pos),
                        TextPosition::new(row, len),
                    );
                }
                if pos < len || line.terminated {
                    self.push_line_end(TokenKind::NonLogicalNewline, row, len, line.terminated);
                }
                return Ok(());
            }

            self.indent_to(row, pos, column, chars)?;
        } else {
            self.continued = false;
        }

        let rules = self.rules;
        while pos < len {
            let c = chars[pos];
            if matches!(c, ' ' | '\t' | '\x0c') {
                pos += 1;
                continue;
            }

            let start = TextPosition::new(row, pos);
            let rest = line.rest(pos);
            if c == '#' {
                self.push(TokenKind::Comment, rest.to_string(), start, TextPosition::new(row, len));
                pos = len;
            } else if c == '\\' && pos + 1 == len {
                self.continued = true;
                return Ok(());
            } else if let Some(caps) = rules.string_start.captures(rest) {
                let opener = caps[0].chars().count();
                let quote_len = caps[1].len();
                match self.scan_string(row, chars, line.terminated, pos, pos + opener - quote_len) {
                    Some(next) => pos = next,
                    None => return Ok(()),
                }
            } else if let Some(n) = match_len(&rules.number, rest) {
                self.push_span(TokenKind::Number, chars, row, pos, pos + n);
                pos += n;
            } else if let Some(n) = match_len(&rules.name, rest) {
                self.push_span(TokenKind::Name, chars, row, pos, pos + n);
                pos += n;
            } else if let Some(n) = match_len(&rules.operator, rest) {
                match c {
                    '(' | '[' | '{' => self.paren_depth += 1,
                    ')' | ']' | '}' => self.paren_depth = self.paren_depth.saturating_sub(1),
                    _ => {}
                }
                self.push_span(TokenKind::Operator, chars, row, pos, pos + n);
                pos += n;
            } else {
                self.push(TokenKind::Error, c.to_string(), start, TextPosition::new(row, pos + 1));
                pos += 1;
            }
        }

        if line.terminated {
            let kind = if self.paren_depth > 0 {
                TokenKind::NonLogicalNewline
            } else {
                TokenKind::Newline
            };
            self.push_line_end(kind, row, len, true);
        } else if self.paren_depth == 0 {
            self.push_line_end(TokenKind::Newline, row, len, false);
        }
        Ok(())
    }

    fn push_span(&mut self, kind: TokenKind, chars: &[char], row: usize, start: usize, end: usize) {
        self.push(
            kind,
            chars[start..end].iter().collect(),
            TextPosition::new(row, start),
            TextPosition::new(row, end),
        );
    }

    fn push_line_end(&mut self, kind: TokenKind, row: usize, len: usize, terminated: bool) {
        let text = if terminated { "\n" } else { "" };
        self.push(kind, text.to_string(), TextPosition::new(row, len), TextPosition::new(row, len + 1));
    }

    fn indent_to(&mut self, row: usize, pos: usize, column: usize, chars: &[char]) -> Result<(), TokenizeError> {
        let at = TextPosition::new(row, pos);
        match self.indents.move_to(column) {
            Some(IndentChange::Same) => {}
            Some(IndentChange::Indent) => {
                self.push(TokenKind::Indent, chars[..pos].iter().collect(), TextPosition::new(row, 0), at);
            }
            Some(IndentChange::Dedent(closed)) => {
                for _ in 0..closed {
                    self.push(TokenKind::Dedent, String::new(), at, at);
                }
            }
            None => return Err(TokenizeError::InconsistentDedent { at }),
        }
        Ok(())
    }

    /// Scan a string whose prefix starts at `start` and whose opening quote is at `quote_pos`.
    ///
    /// Returns the column after the string, or `None` when it continues on the next line.
    fn scan_string(
        &mut self,
        row: usize,
        chars: &[char],
        terminated: bool,
        start: usize,
        quote_pos: usize,
    ) -> Option<usize> {
        let quote = chars[quote_pos];
        let triple = chars[quote_pos..].starts_with(&[quote; 3]);
        let body = quote_pos + if triple { 3 } else { 1 };
        let start_pos = TextPosition::new(row, start);

        match find_string_end(chars, body, quote, triple) {
            StringEnd::Closed(end) => {
                self.push_span(TokenKind::String, chars, row, start, end);
                Some(end)
            }
            StringEnd::Open { escaped_newline } if triple || (escaped_newline && terminated) => {
                let mut text: String = chars[start..].iter().collect();
                text.push('\n');
                self.pending = Some(PendingString {
                    start: start_pos,
                    quote,
                    triple,
                    text,
                });
                None
            }
            StringEnd::Open { .. } => {
                let len = chars.len();
                self.push_span(TokenKind::Error, chars, row, start, len);
                Some(len)
            }
        }
    }
}

fn find_string_end(chars: &[char], mut pos: usize, quote: char, triple: bool) -> StringEnd {
    while pos < chars.len() {
        match chars[pos] {
            '\\' if pos + 1 == chars.len() => return StringEnd::Open { escaped_newline: true },
            '\\' => pos += 2,
            c if c == quote && !triple => return StringEnd::Closed(pos + 1),
            c if c == quote && chars[pos..].starts_with(&[quote; 3]) => return StringEnd::Closed(pos + 3),
            _ => pos += 1,
        }
    }
    StringEnd::Open {
        escaped_newline: false,
    }
}
