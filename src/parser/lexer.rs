//! Scanner (tokenizer) for bip source text
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Words and operator runs are classified through a per-scanner
//! [`ReservedWords`] table which also remembers every lexeme it has seen, so a
//! later occurrence of the same spelling is short-circuited to the stored token.

use rustc_hash::FxHashMap;
use std::fmt;

/// Token classification.
///
/// Single-character punctuation (`{ } ( ) . ,` and friends) is not named: it is
/// carried as [`TokenKind::Punct`] with the character itself and matched by
/// comparing against the character literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input
    Eof,
    Punct(char),
    Identifier,
    /// Identifier starting with an uppercase letter
    TypeName,
    /// String literal, lexeme holds the text between the quotes
    Literal,
    Number,
    Boolean,
    /// Maximal run of operator characters
    Operator,

    // Reserved words
    Print,
    Require,
    Skip,
    SkipIf,
    Not,
    Struct,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Punct(c) => write!(f, "{}", c),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::TypeName => write!(f, "type name"),
            TokenKind::Literal => write!(f, "string literal"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Boolean => write!(f, "boolean"),
            TokenKind::Operator => write!(f, "operator"),
            TokenKind::Print => write!(f, "print"),
            TokenKind::Require => write!(f, "require"),
            TokenKind::Skip => write!(f, "skip"),
            TokenKind::SkipIf => write!(f, "skip_if"),
            TokenKind::Not => write!(f, "not"),
            TokenKind::Struct => write!(f, "struct"),
        }
    }
}

/// A classified slice of source text. Immutable once the scanner hands it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Decimal value for numbers, 0/1 for booleans
    pub value: Option<u64>,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            value: None,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}

/// Lexer error type. Every lexer error is fatal for the run.
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub line: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexer error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for LexError {}

/// Lexeme → token table, seeded with the reserved words.
///
/// The table is owned by a single [`Scanner`] and self-updating: every word or
/// operator run is stored in its final classification the first time it is
/// scanned.
#[derive(Debug, Clone)]
pub struct ReservedWords {
    table: FxHashMap<String, Token>,
}

impl ReservedWords {
    pub fn new() -> Self {
        let mut words = Self {
            table: FxHashMap::default(),
        };

        words.reserve(Token::new(TokenKind::Boolean, "true", 0).with_value(1));
        words.reserve(Token::new(TokenKind::Boolean, "false", 0).with_value(0));
        words.reserve(Token::new(TokenKind::Print, "print", 0));
        words.reserve(Token::new(TokenKind::Require, "require", 0));
        words.reserve(Token::new(TokenKind::Struct, "struct", 0));
        words.reserve(Token::new(TokenKind::Skip, "skip", 0));
        words.reserve(Token::new(TokenKind::SkipIf, "skip_if", 0));
        words.reserve(Token::new(TokenKind::Not, "not", 0));
        for type_name in ["Int", "Float", "Bool", "String"] {
            words.reserve(Token::new(TokenKind::TypeName, type_name, 0));
        }

        // Operator spellings with a dedicated meaning
        words.reserve(Token::new(TokenKind::Not, "!", 0));
        words.reserve(Token::new(TokenKind::Punct('='), "=", 0));

        words
    }

    fn reserve(&mut self, token: Token) {
        self.table.insert(token.lexeme.clone(), token);
    }

    pub fn get(&self, lexeme: &str) -> Option<&Token> {
        self.table.get(lexeme)
    }

    pub fn contains(&self, lexeme: &str) -> bool {
        self.table.contains_key(lexeme)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Resolve a freshly built token against the table.
    ///
    /// An existing entry overrides kind, lexeme and value (the line stays the
    /// one just scanned); the resolved token is then stored.
    pub fn classify(&mut self, mut token: Token) -> Token {
        if let Some(existing) = self.table.get(&token.lexeme) {
            token.kind = existing.kind;
            token.lexeme = existing.lexeme.clone();
            token.value = existing.value;
        }
        self.reserve(token.clone());
        token
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self::new()
    }
}

/// Characters grouped into operator runs.
pub fn is_operator_char(ch: char) -> bool {
    matches!(ch, '<' | '>' | '*' | '/' | '+' | '-' | '!' | '=' | '%' | '&' | '|')
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

/// Scanner over one source text
pub struct Scanner {
    input: Vec<char>,
    position: usize,
    line: usize,
    words: ReservedWords,
}

impl Scanner {
    /// Create a new scanner with a freshly seeded reserved-word table.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            words: ReservedWords::new(),
        }
    }

    pub fn reserved_words(&self) -> &ReservedWords {
        &self.words
    }

    /// Tokenize the remaining input. The last token is always [`TokenKind::Eof`].
    ///
    /// Consumes the scanner: a token sequence cannot be rewound, only
    /// produced again by a new scanner.
    pub fn scan_all(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan()?;
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }

        log::debug!(
            "scanned {} tokens over {} lines, {} table entries",
            tokens.len(),
            self.line,
            self.words.len()
        );

        Ok(tokens)
    }

    /// Get next token. Returns an [`TokenKind::Eof`] token once input is exhausted.
    pub fn scan(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let line = self.line;
        let Some(ch) = self.advance() else {
            return Ok(Token::eof(line));
        };

        match ch {
            '"' => self.string_literal(line),
            '0'..='9' => Ok(self.number_literal(ch, line)),
            c if is_word_char(c) => Ok(self.word(c, line)),
            c if is_operator_char(c) => Ok(self.operator(c, line)),
            c => Ok(Token::new(TokenKind::Punct(c), c.to_string(), line)),
        }
    }

    /// Copy characters verbatim up to the closing quote. No escapes.
    fn string_literal(&mut self, line: usize) -> Result<Token, LexError> {
        let mut text = String::new();

        while let Some(ch) = self.advance() {
            if ch == '"' {
                return Ok(Token::new(TokenKind::Literal, text, line));
            }
            text.push(ch);
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            line,
        })
    }

    /// Unsigned decimal integer; overflow wraps silently.
    fn number_literal(&mut self, first_digit: char, line: usize) -> Token {
        let mut lexeme = String::new();
        lexeme.push(first_digit);
        let mut value = u64::from(first_digit as u8 - b'0');

        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            lexeme.push(ch);
            value = value
                .wrapping_mul(10)
                .wrapping_add(u64::from(ch as u8 - b'0'));
            self.advance();
        }

        Token::new(TokenKind::Number, lexeme, line).with_value(value)
    }

    fn word(&mut self, first_char: char, line: usize) -> Token {
        let mut lexeme = String::new();
        lexeme.push(first_char);

        while let Some(ch) = self.peek() {
            if !is_word_char(ch) {
                break;
            }
            lexeme.push(ch);
            self.advance();
        }

        let kind = if first_char.is_uppercase() {
            TokenKind::TypeName
        } else {
            TokenKind::Identifier
        };

        self.words.classify(Token::new(kind, lexeme, line))
    }

    /// Greedy: every adjacent operator character joins the same token.
    fn operator(&mut self, first_char: char, line: usize) -> Token {
        let mut lexeme = String::new();
        lexeme.push(first_char);

        while let Some(ch) = self.peek() {
            if !is_operator_char(ch) {
                break;
            }
            lexeme.push(ch);
            self.advance();
        }

        self.words
            .classify(Token::new(TokenKind::Operator, lexeme, line))
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
        }

        Some(ch)
    }
}
