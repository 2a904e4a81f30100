//! # goast
//!
//! Structural dumps of Go syntax trees: one line per node, children
//! indented beneath their parent.
//!
//! ```text
//! File
//!   Ident test
//!   FuncDecl
//!     Ident f
//!     FuncType
//!       FieldList
//!     BlockStmt
//! ```

pub mod parser;
pub mod renderer;

#[cfg(test)]
mod tests;

use parser::{parse_file, ParseError};
use renderer::{AstDumper, RenderContext, RenderLine};

/// Parse `source` and dump its tree with the default settings
pub fn dump_source(source: &str) -> Result<String, ParseError> {
    let file = parse_file(source)?;
    Ok(renderer::dump(&file))
}

/// Parse `source` and dump its tree as structured lines
pub fn dump_source_lines(source: &str) -> Result<Vec<RenderLine>, ParseError> {
    let file = parse_file(source)?;
    Ok(renderer::dump_lines(&file))
}

/// Parse `source` and render it according to `context`
pub fn render_source(source: &str, context: RenderContext) -> anyhow::Result<String> {
    let file = parse_file(source)?;
    let output = AstDumper::new(context).render(&file)?;
    Ok(output)
}
