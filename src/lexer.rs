use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::CharIndices;

use tracing::trace;

use crate::token::{Span, Token, TokenKind};

mod error;

pub use error::{LexError, LexResult};

/// Number of leading spaces that make up one indentation level.
pub const SPACES_PER_LEVEL: usize = 2;

/// Pull-based tokenizer for Mython source.
///
/// The lexer always holds a current token: construction reads the first one,
/// and every `advance` replaces it. Indentation is reported through
/// `Indent`/`Dedent` tokens, one level per call, so a parser can drive the
/// lexer one token at a time without any lookahead of its own.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    current: Token<'a>,
    emitted_level: usize,
    pending_level: usize,
    needs_indent_check: bool,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> LexResult<Self> {
        let mut lexer = Self {
            input,
            chars: input.char_indices().peekable(),
            current: Token::new(TokenKind::Newline, Span::default()),
            emitted_level: 0,
            pending_level: 0,
            needs_indent_check: true,
            line: 1,
            column: 0,
        };
        while let Some(&(_, c)) = lexer.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            lexer.advance_char();
        }
        lexer.advance()?;
        Ok(lexer)
    }

    pub fn current_token(&self) -> &Token<'a> {
        &self.current
    }

    /// Consumes the current token and returns its successor, which becomes
    /// the new current token.
    pub fn advance(&mut self) -> LexResult<Token<'a>> {
        let token = self.read_token()?;
        self.current = token.clone();
        Ok(token)
    }

    pub fn expect(&self, kind: TokenKind<'_>) -> LexResult<()> {
        if self.current.kind == kind {
            Ok(())
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    pub fn expect_char(&self, expected: char) -> LexResult<()> {
        self.expect(TokenKind::Char(expected))
    }

    pub fn expect_number(&self) -> LexResult<i64> {
        match self.current.kind {
            TokenKind::Number(value) => Ok(value),
            _ => Err(self.unexpected("Number")),
        }
    }

    pub fn expect_identifier(&self) -> LexResult<&'a str> {
        match self.current.kind {
            TokenKind::Identifier(name) => Ok(name),
            _ => Err(self.unexpected("Id")),
        }
    }

    pub fn expect_string(&self) -> LexResult<&'a str> {
        match self.current.kind {
            TokenKind::String(value) => Ok(value),
            _ => Err(self.unexpected("String")),
        }
    }

    pub fn expect_next(&mut self, kind: TokenKind<'_>) -> LexResult<()> {
        self.advance()?;
        self.expect(kind)
    }

    pub fn expect_next_char(&mut self, expected: char) -> LexResult<()> {
        self.advance()?;
        self.expect_char(expected)
    }

    pub fn expect_next_number(&mut self) -> LexResult<i64> {
        self.advance()?;
        self.expect_number()
    }

    pub fn expect_next_identifier(&mut self) -> LexResult<&'a str> {
        self.advance()?;
        self.expect_identifier()
    }

    pub fn expect_next_string(&mut self) -> LexResult<&'a str> {
        self.advance()?;
        self.expect_string()
    }

    fn unexpected(&self, expected: impl Into<String>) -> LexError {
        LexError::UnexpectedToken {
            expected: expected.into(),
            found: self.current.kind.to_string(),
            line: self.current.span.line,
        }
    }

    fn read_token(&mut self) -> LexResult<Token<'a>> {
        if self.needs_indent_check {
            self.count_indentation();
        }
        if let Some(token) = self.indent_or_dedent() {
            return Ok(token);
        }

        self.skip_inline_whitespace();

        let span = self.span();
        let Some(&(start, ch)) = self.chars.peek() else {
            return Ok(self.end_of_input(span));
        };

        match ch {
            '\n' => {
                self.advance_char();
                self.needs_indent_check = true;
                Ok(Token::new(TokenKind::Newline, span))
            }
            c if c.is_ascii_digit() => self.read_number(start, span),
            '"' | '\'' => self.read_string(ch, start, span),
            c if c.is_alphabetic() || c == '_' => Ok(self.read_identifier(start, span)),
            _ => Ok(self.read_char(span)),
        }
    }

    /// Measures the indentation of the next non-blank line. Blank lines are
    /// consumed without affecting the level, and the end of input counts as
    /// level zero so that open blocks are closed.
    fn count_indentation(&mut self) {
        loop {
            let mut spaces = 0;
            while let Some(&(_, ' ')) = self.chars.peek() {
                self.advance_char();
                spaces += 1;
            }
            match self.chars.peek() {
                Some(&(_, '\n')) => {
                    self.advance_char();
                }
                Some(_) => {
                    self.pending_level = spaces / SPACES_PER_LEVEL;
                    break;
                }
                None => {
                    self.pending_level = 0;
                    break;
                }
            }
        }
        self.needs_indent_check = false;
    }

    fn indent_or_dedent(&mut self) -> Option<Token<'a>> {
        let kind = match self.emitted_level.cmp(&self.pending_level) {
            Ordering::Greater => {
                self.emitted_level -= 1;
                TokenKind::Dedent
            }
            Ordering::Less => {
                self.emitted_level += 1;
                TokenKind::Indent
            }
            Ordering::Equal => return None,
        };
        trace!(token = %kind, level = self.emitted_level, line = self.line, "indentation changed");
        Some(Token::new(kind, self.span()))
    }

    fn end_of_input(&mut self, span: Span) -> Token<'a> {
        match self.current.kind {
            TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof => {
                Token::new(TokenKind::Eof, span)
            }
            _ => {
                // Terminate the last logical line, then let the indentation
                // check unwind any open blocks.
                trace!(line = self.line, "synthesizing newline at end of input");
                self.needs_indent_check = true;
                Token::new(TokenKind::Newline, span)
            }
        }
    }

    fn skip_inline_whitespace(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\n' || !c.is_whitespace() {
                break;
            }
            self.advance_char();
        }
    }

    fn read_number(&mut self, start: usize, span: Span) -> LexResult<Token<'a>> {
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.advance_char();
        }
        let literal = &self.input[start..self.current_index()];
        let value = literal
            .parse::<i64>()
            .map_err(|_| LexError::InvalidIntegerLiteral {
                literal: literal.to_string(),
                line: span.line,
                column: span.column,
            })?;
        Ok(Token::new(TokenKind::Number(value), span))
    }

    fn read_string(&mut self, quote: char, start: usize, span: Span) -> LexResult<Token<'a>> {
        self.advance_char(); // opening quote
        let content_start = start + quote.len_utf8();
        while let Some((idx, c)) = self.advance_char() {
            if c == quote {
                let content = &self.input[content_start..idx];
                return Ok(Token::new(TokenKind::String(content), span));
            }
        }
        Err(LexError::UnterminatedString {
            line: span.line,
            column: span.column,
        })
    }

    fn read_identifier(&mut self, start: usize, span: Span) -> Token<'a> {
        while let Some(&(_, c)) = self.chars.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            self.advance_char();
        }
        let ident = &self.input[start..self.current_index()];
        let kind = TokenKind::reserved(ident).unwrap_or(TokenKind::Identifier(ident));
        Token::new(kind, span)
    }

    fn read_char(&mut self, span: Span) -> Token<'a> {
        let Some((_, c)) = self.advance_char() else {
            return Token::new(TokenKind::Eof, span);
        };
        if matches!(c, '!' | '=' | '<' | '>') && matches!(self.chars.peek(), Some(&(_, '='))) {
            self.advance_char();
            let kind = match c {
                '!' => TokenKind::NotEqual,
                '=' => TokenKind::Equal,
                '<' => TokenKind::LessOrEqual,
                _ => TokenKind::GreaterOrEqual,
            };
            return Token::new(kind, span);
        }
        Token::new(TokenKind::Char(c), span)
    }

    fn advance_char(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn current_index(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }

    fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
        }
    }
}

/// Tokenizes a whole source, stopping after the first `Eof`.
pub fn tokenize(input: &str) -> LexResult<Vec<Token<'_>>> {
    let mut lexer = Lexer::new(input)?;
    let mut tokens = vec![lexer.current_token().clone()];
    while !lexer.current_token().is(&TokenKind::Eof) {
        tokens.push(lexer.advance()?);
    }
    Ok(tokens)
}
