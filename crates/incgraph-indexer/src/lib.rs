//! Include discovery: lexing, directive parsing, path resolution, graph building

pub mod builder;
pub mod directive;
pub mod error;
pub mod language;
pub mod lexer;
pub mod resolver;


pub use builder::{GraphBuilder, discover_sources};
pub use directive::{DirectiveParser, parse_includes};
pub use error::IndexError;
pub use language::{Keyword, Punctuation};
pub use lexer::{Lexer, Token, tokenize};
pub use resolver::{Resolution, Resolver};
