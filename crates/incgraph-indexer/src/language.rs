//! Punctuation and directive keyword tables for the preprocessor lexer

/// Punctuation classes recognized by the lexer.
///
/// Declaration order is the tie-break priority: two-byte classes come first
/// so they compare lower than every single-byte class, and the whitespace
/// classes come last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Punctuation {
    // Two bytes
    LineComment,       // //
    OpenBlockComment,  // /*
    CloseBlockComment, // */
    Arrow,             // ->
    And,               // &&
    Or,                // ||
    DoubleColon,       // ::
    EqualityTest,      // ==
    DifferenceTest,    // !=

    // One byte, `Tilde` must stay the first of them
    Tilde,
    Backquote,
    Bang,
    At,
    Hash,
    Dollar,
    Percent,
    Caret,
    Ampersand,
    Star,
    OpenParenthesis,
    CloseParenthesis,
    Dash,
    Plus,
    Equals,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Colon,
    Semicolon,
    SingleQuote,
    DoubleQuote,
    Pipe,
    Slash,
    Backslash,
    Less,
    Greater,
    Comma,
    Dot,
    QuestionMark,

    // Separators, never emitted as tokens
    Whitespace,
    NewLine,
}

impl Punctuation {
    /// Two-byte table.
    pub const fn from_pair(first: u8, second: u8) -> Option<Self> {
        Some(match (first, second) {
            (b'/', b'/') => Punctuation::LineComment,
            (b'/', b'*') => Punctuation::OpenBlockComment,
            (b'*', b'/') => Punctuation::CloseBlockComment,
            (b'-', b'>') => Punctuation::Arrow,
            (b'&', b'&') => Punctuation::And,
            (b'|', b'|') => Punctuation::Or,
            (b':', b':') => Punctuation::DoubleColon,
            (b'=', b'=') => Punctuation::EqualityTest,
            (b'!', b'=') => Punctuation::DifferenceTest,
            _ => return None,
        })
    }

    /// One-byte table. `_` is not punctuation, it belongs to identifiers.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b' ' | b'\t' | 0x0b | 0x0c | b'\r' => Punctuation::Whitespace,
            b'\n' => Punctuation::NewLine,
            b'~' => Punctuation::Tilde,
            b'`' => Punctuation::Backquote,
            b'!' => Punctuation::Bang,
            b'@' => Punctuation::At,
            b'#' => Punctuation::Hash,
            b'$' => Punctuation::Dollar,
            b'%' => Punctuation::Percent,
            b'^' => Punctuation::Caret,
            b'&' => Punctuation::Ampersand,
            b'*' => Punctuation::Star,
            b'(' => Punctuation::OpenParenthesis,
            b')' => Punctuation::CloseParenthesis,
            b'-' => Punctuation::Dash,
            b'+' => Punctuation::Plus,
            b'=' => Punctuation::Equals,
            b'{' => Punctuation::OpenBrace,
            b'}' => Punctuation::CloseBrace,
            b'[' => Punctuation::OpenBracket,
            b']' => Punctuation::CloseBracket,
            b':' => Punctuation::Colon,
            b';' => Punctuation::Semicolon,
            b'\'' => Punctuation::SingleQuote,
            b'"' => Punctuation::DoubleQuote,
            b'|' => Punctuation::Pipe,
            b'/' => Punctuation::Slash,
            b'\\' => Punctuation::Backslash,
            b'<' => Punctuation::Less,
            b'>' => Punctuation::Greater,
            b',' => Punctuation::Comma,
            b'.' => Punctuation::Dot,
            b'?' => Punctuation::QuestionMark,
            _ => return None,
        })
    }

    pub fn is_multi_byte(self) -> bool {
        self < Punctuation::Tilde
    }

    /// Whitespace and newlines separate tokens without producing any.
    pub fn is_separator(self) -> bool {
        self >= Punctuation::Whitespace
    }

    pub fn byte_len(self) -> usize {
        if self.is_multi_byte() { 2 } else { 1 }
    }
}

/// Preprocessor directive words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Include,
    Define,
    Undef,
    Pragma,
    If,
    Else,
    Elif,
    Endif,
    Ifdef,
    Ifndef,
    Defined,
    Error,
}

impl Keyword {
    pub fn lookup(text: &str) -> Option<Self> {
        Some(match text {
            "include" => Keyword::Include,
            "define" => Keyword::Define,
            "undef" => Keyword::Undef,
            "pragma" => Keyword::Pragma,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "elif" => Keyword::Elif,
            "endif" => Keyword::Endif,
            "ifdef" => Keyword::Ifdef,
            "ifndef" => Keyword::Ifndef,
            "defined" => Keyword::Defined,
            "error" => Keyword::Error,
            _ => return None,
        })
    }
}
