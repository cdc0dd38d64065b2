//! incgraph-render: DOT output and Graphviz invocation

pub mod dot;
pub mod error;
pub mod tool;


pub use dot::{dot_path, render_dot, write_dot};
pub use error::RenderError;
pub use tool::Graphviz;
