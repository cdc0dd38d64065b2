//! `#include` recovery from a token stream
//!
//! A small state machine skips comments, spots directives that start a
//! line, and captures the literal of `#include` directives. Conditional
//! directives are not evaluated: every include found is reported.

use crate::language::{Keyword, Punctuation};
use crate::lexer::{Lexer, Token};
use incgraph_core::{Include, IncludeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Default,
    LineComment,
    BlockComment,
    MacroExpression,
    IncludeLiteral,
}

impl State {
    /// States that end with the source line they started on.
    pub fn is_line_scoped(self) -> bool {
        matches!(self, State::LineComment | State::MacroExpression | State::IncludeLiteral)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Quote,
    Angle,
}

impl Delimiter {
    fn opened_by(token: &Token<'_>) -> Option<Self> {
        match token.punctuation? {
            Punctuation::DoubleQuote => Some(Delimiter::Quote),
            Punctuation::Less | Punctuation::Greater => Some(Delimiter::Angle),
            _ => None,
        }
    }

    fn closed_by(self, token: &Token<'_>) -> bool {
        match self {
            Delimiter::Quote => token.is(Punctuation::DoubleQuote),
            Delimiter::Angle => token.is(Punctuation::Greater),
        }
    }

    fn kind(self) -> IncludeKind {
        match self {
            Delimiter::Quote => IncludeKind::Local,
            Delimiter::Angle => IncludeKind::External,
        }
    }
}

/// Everything the transitions need besides the state itself.
#[derive(Debug, Clone, Default)]
pub struct DirectiveContext {
    /// Set while inside `"…"` or `<…>` of an include.
    open: Option<Delimiter>,
    /// Byte range covered by the captured literal tokens.
    span: Option<(usize, usize)>,
    previous_line: usize,
    /// The token being processed is the first one of its line.
    at_line_start: bool,
}

impl DirectiveContext {
    fn reset_literal(&mut self) {
        self.open = None;
        self.span = None;
    }
}

/// Side effect of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// A literal spanning `start..end` of the buffer was closed.
    Emit { kind: IncludeKind, start: usize, end: usize },
}

/// The transition function of the directive state machine.
pub fn transition(
    state: State,
    token: &Token<'_>,
    context: &mut DirectiveContext,
) -> (State, Effect) {
    match state {
        State::Default => {
            let next = match token.punctuation {
                Some(Punctuation::Hash) if context.at_line_start => State::MacroExpression,
                Some(Punctuation::OpenBlockComment) => State::BlockComment,
                Some(Punctuation::LineComment) => State::LineComment,
                _ => State::Default,
            };
            (next, Effect::None)
        }
        State::LineComment => (State::LineComment, Effect::None),
        State::BlockComment => {
            if token.is(Punctuation::CloseBlockComment) {
                (State::Default, Effect::None)
            } else {
                (State::BlockComment, Effect::None)
            }
        }
        State::MacroExpression => {
            if token.keyword == Some(Keyword::Include) {
                context.reset_literal();
                (State::IncludeLiteral, Effect::None)
            } else {
                (State::MacroExpression, Effect::None)
            }
        }
        State::IncludeLiteral => match context.open {
            None => {
                if let Some(delimiter) = Delimiter::opened_by(token) {
                    context.open = Some(delimiter);
                    context.span = None;
                }
                (State::IncludeLiteral, Effect::None)
            }
            Some(delimiter) if delimiter.closed_by(token) => {
                let effect = match context.span {
                    Some((start, end)) => Effect::Emit {
                        kind: delimiter.kind(),
                        start,
                        end,
                    },
                    None => Effect::None,
                };
                context.reset_literal();
                (State::Default, effect)
            }
            Some(_) => {
                // Literals like `detail/_fixes.hpp` come in several tokens;
                // keep the raw buffer range from the first to the last one.
                context.span = Some(match context.span {
                    Some((start, _)) => (start, token.end()),
                    None => (token.offset, token.end()),
                });
                (State::IncludeLiteral, Effect::None)
            }
        },
    }
}

/// Feeds tokens of one buffer through the state machine and collects includes.
pub struct DirectiveParser<'a> {
    source: &'a str,
    state: State,
    context: DirectiveContext,
    includes: Vec<Include<'a>>,
}

impl<'a> DirectiveParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            state: State::Default,
            context: DirectiveContext::default(),
            includes: Vec::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Process one token of `source`, in order.
    pub fn feed(&mut self, token: &Token<'a>) {
        let new_line = token.line > self.context.previous_line;
        if new_line && self.state.is_line_scoped() {
            self.state = State::Default;
            self.context.reset_literal();
        }
        self.context.at_line_start = new_line;

        let (next, effect) = transition(self.state, token, &mut self.context);
        self.state = next;
        self.context.previous_line = token.line;

        if let Effect::Emit { kind, start, end } = effect {
            self.includes.push(Include {
                kind,
                literal: &self.source[start..end],
            });
        }
    }

    /// Includes found so far. An unterminated directive at the end of the
    /// buffer is dropped.
    pub fn finish(self) -> Vec<Include<'a>> {
        if self.state != State::Default {
            tracing::trace!("Buffer ends in {:?} state", self.state);
        }
        self.includes
    }
}

/// Lex `source` and return its includes in source order.
pub fn parse_includes(source: &str) -> Vec<Include<'_>> {
    let mut parser = DirectiveParser::new(source);
    for token in Lexer::new(source) {
        parser.feed(&token);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn include(kind: IncludeKind, literal: &str) -> Include<'_> {
        Include { kind, literal }
    }

    #[test]
    fn test_external_include() {
        assert_eq!(
            parse_includes("#include <string>"),
            vec![include(IncludeKind::External, "string")]
        );
    }

    #[test]
    fn test_local_include_with_punctuation() {
        assert_eq!(
            parse_includes("#include \"detail/_fixes.hpp\""),
            vec![include(IncludeKind::Local, "detail/_fixes.hpp")]
        );
    }

    #[test]
    fn test_includes_in_source_order() {
        let source = "#include \"a.h\"\n#include <vector>\nint main() {}\n";
        assert_eq!(
            parse_includes(source),
            vec![include(IncludeKind::Local, "a.h"), include(IncludeKind::External, "vector")]
        );
    }

    #[test]
    fn test_relative_and_keyword_literals() {
        let source = "#include \"../error.h\"\n#  include <if/define.hpp>\n";
        assert_eq!(
            parse_includes(source),
            vec![
                include(IncludeKind::Local, "../error.h"),
                include(IncludeKind::External, "if/define.hpp"),
            ]
        );
    }

    #[test]
    fn test_commented_includes_are_skipped() {
        let source = "// #include \"a.h\"\n/*\n#include \"b.h\"\n*/\n#include \"c.h\" // trailing\n";
        assert_eq!(parse_includes(source), vec![include(IncludeKind::Local, "c.h")]);
    }

    #[test]
    fn test_hash_must_start_the_line() {
        let source = "int x; #include \"a.h\"\n";
        assert!(parse_includes(source).is_empty());
    }

    #[test]
    fn test_conditional_branches_are_not_evaluated() {
        let source = "#ifdef _WIN32\n#include <windows.h>\n#else\n#include <unistd.h>\n#endif\n";
        let literals: Vec<_> = parse_includes(source).iter().map(|i| i.literal).collect();
        assert_eq!(literals, vec!["windows.h", "unistd.h"]);
    }

    #[test]
    fn test_unterminated_literal_is_dropped() {
        let source = "#include \"broken.h\n#include <ok.h>\n#include \"eof.h";
        assert_eq!(parse_includes(source), vec![include(IncludeKind::External, "ok.h")]);
    }

    #[test]
    fn test_macro_include_is_ignored() {
        let source = "#include CONFIG_HEADER\n#define X 1\n";
        assert!(parse_includes(source).is_empty());
    }

    #[test]
    fn test_comment_opened_on_directive_line_is_not_tracked() {
        let source = "#endif /* guard\n#include \"hidden.h\"\n*/\n";
        assert_eq!(parse_includes(source), vec![include(IncludeKind::Local, "hidden.h")]);
    }

    #[test]
    fn test_star_slash_slash_does_not_close_comment() {
        let source = "/* a *//\n#include \"inside.h\"\n*/\n#include \"after.h\"\n";
        assert_eq!(parse_includes(source), vec![include(IncludeKind::Local, "after.h")]);
    }

    #[test]
    fn test_state_after_open_directive() {
        let source = "#include <a.h";
        let mut parser = DirectiveParser::new(source);
        for token in Lexer::new(source) {
            parser.feed(&token);
        }
        assert_eq!(parser.state(), State::IncludeLiteral);
        assert!(parser.finish().is_empty());
    }
}
