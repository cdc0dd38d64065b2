//! Zero-copy lexer over a source buffer
//!
//! The lexer only has to find directive boundaries and literal pieces, so it
//! splits the text on punctuation and whitespace and leaves everything else
//! as opaque text tokens borrowing the buffer.

use crate::language::{Keyword, Punctuation};

/// A span of the source buffer, classified.
///
/// Two tokens are equal when their text is equal.
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    pub punctuation: Option<Punctuation>,
    pub keyword: Option<Keyword>,
    pub text: &'a str,
    /// Byte offset of `text` in the buffer.
    pub offset: usize,
    /// Starting from 1.
    pub line: usize,
    /// Starting from 1.
    pub column: usize,
}

impl Token<'_> {
    /// Byte offset one past the end of the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn is(&self, punctuation: Punctuation) -> bool {
        self.punctuation == Some(punctuation)
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Token<'_> {}

/// Lazily yields the tokens of a buffer.
pub struct Lexer<'a> {
    source: &'a str,
    cursor: usize,
    /// Start of the text not yet turned into a token.
    start: usize,
    line: usize,
    line_start: usize,
    queued: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: 0,
            start: 0,
            line: 1,
            line_start: 0,
            queued: None,
        }
    }

    fn token(&self, from: usize, to: usize, punctuation: Option<Punctuation>) -> Token<'a> {
        let text = &self.source[from..to];
        Token {
            punctuation,
            keyword: match punctuation {
                None => Keyword::lookup(text),
                Some(_) => None,
            },
            text,
            offset: from,
            line: self.line,
            column: from - self.line_start + 1,
        }
    }
}

/// Punctuation ending `text`. The two-byte table wins over the one-byte table.
fn ending_punctuation(text: &[u8]) -> Option<Punctuation> {
    if let [.., first, second] = text {
        if let Some(p) = Punctuation::from_pair(*first, *second) {
            return Some(p);
        }
    }
    text.last().and_then(|&b| Punctuation::from_byte(b))
}

/// Whether a boundary found at the cursor holds, given what the pending text
/// would end with one byte later. A longer punctuation starting here takes
/// over unless the current one ranks before or with it, so `///` splits as
/// `//` then `/`.
fn commits(current: Punctuation, forward: Option<Punctuation>) -> bool {
    match forward {
        None => true,
        Some(f) if !f.is_multi_byte() => true,
        Some(f) => current <= f,
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.queued.take() {
            return Some(token);
        }

        let source = self.source;
        let bytes = source.as_bytes();
        while self.cursor < bytes.len() {
            let pos = self.cursor;
            self.cursor += 1;

            let Some(punctuation) = ending_punctuation(&bytes[self.start..=pos]) else {
                continue;
            };
            let forward = if pos + 1 < bytes.len() {
                ending_punctuation(&bytes[self.start..=pos + 1])
            } else {
                None
            };
            if !commits(punctuation, forward) {
                continue;
            }

            let punctuation_start = pos + 1 - punctuation.byte_len();
            let text = (punctuation_start > self.start)
                .then(|| self.token(self.start, punctuation_start, None));
            let mark = (!punctuation.is_separator())
                .then(|| self.token(punctuation_start, pos + 1, Some(punctuation)));

            self.start = pos + 1;
            if punctuation == Punctuation::NewLine {
                self.line += 1;
                self.line_start = pos + 1;
            }

            match (text, mark) {
                (Some(text), mark) => {
                    self.queued = mark;
                    return Some(text);
                }
                (None, Some(mark)) => return Some(mark),
                (None, None) => {}
            }
        }

        if self.start < bytes.len() {
            let token = self.token(self.start, bytes.len(), None);
            self.start = bytes.len();
            return Some(token);
        }
        None
    }
}

/// Tokenize a whole buffer.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).collect()
}
