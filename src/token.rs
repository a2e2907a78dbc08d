use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Number(i64),
    Identifier(&'a str),
    Char(char),
    String(&'a str),

    // Keywords
    Class,
    Return,
    If,
    Else,
    Def,
    Print,
    And,
    Or,
    Not,
    None,
    True,
    False,

    // Two-character operators
    Equal,          // ==
    NotEqual,       // !=
    LessOrEqual,    // <=
    GreaterOrEqual, // >=

    // Structural
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl<'a> TokenKind<'a> {
    /// Maps reserved words and two-character operators to their fixed kind.
    pub fn reserved(text: &str) -> Option<TokenKind<'static>> {
        let kind = match text {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "None" => TokenKind::None,
            "def" => TokenKind::Def,
            "class" => TokenKind::Class,
            "print" => TokenKind::Print,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "True" => TokenKind::True,
            "False" => TokenKind::False,
            ">=" => TokenKind::GreaterOrEqual,
            "<=" => TokenKind::LessOrEqual,
            "==" => TokenKind::Equal,
            "!=" => TokenKind::NotEqual,
            _ => return None,
        };
        Some(kind)
    }

    /// Name of the variant without its payload, used in expectation errors.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "Number",
            TokenKind::Identifier(_) => "Id",
            TokenKind::Char(_) => "Char",
            TokenKind::String(_) => "String",
            TokenKind::Class => "Class",
            TokenKind::Return => "Return",
            TokenKind::If => "If",
            TokenKind::Else => "Else",
            TokenKind::Def => "Def",
            TokenKind::Print => "Print",
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::Not => "Not",
            TokenKind::None => "None",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::Equal => "Eq",
            TokenKind::NotEqual => "NotEq",
            TokenKind::LessOrEqual => "LessOrEq",
            TokenKind::GreaterOrEqual => "GreaterOrEq",
            TokenKind::Newline => "Newline",
            TokenKind::Indent => "Indent",
            TokenKind::Dedent => "Dedent",
            TokenKind::Eof => "Eof",
        }
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "Number{{{value}}}"),
            TokenKind::Identifier(value) => write!(f, "Id{{{value}}}"),
            TokenKind::Char(value) => write!(f, "Char{{{value}}}"),
            TokenKind::String(value) => write!(f, "String{{{value}}}"),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is(&self, kind: &TokenKind<'_>) -> bool {
        self.kind == *kind
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}
