use crate::parser::{walk, File, Node};
use crate::renderer::components::*;
use crate::renderer::traits::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One output line: a label at a nesting depth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderLine {
    pub depth: usize,
    pub label: String,
}

impl RenderLine {
    pub fn new(depth: usize, label: impl Into<String>) -> Self {
        Self {
            depth,
            label: label.into(),
        }
    }
}

/// Structural dumper: one line per node, pre-order, children indented
/// beneath their parent.
///
/// The tree is only read, so dumping the same tree repeatedly always
/// produces the same output.
pub struct AstDumper {
    context: RenderContext,
}

impl AstDumper {
    pub fn new(context: RenderContext) -> Self {
        Self { context }
    }

    /// Lines for `root` and everything below it. `root` sits at the
    /// context's depth.
    pub fn dump_lines<'a>(&self, root: impl Into<Node<'a>>) -> Vec<RenderLine> {
        let labeler = LabelRenderer;
        let base = self.context.depth;
        let mut lines = Vec::new();

        walk(root.into(), &mut |node, depth| {
            lines.push(RenderLine::new(
                base + depth,
                labeler.render_label(node, self.context.labels),
            ));
        });

        debug!(lines = lines.len(), "dumped tree");
        lines
    }

    /// Indented text, lines joined by `\n` with no trailing newline
    pub fn dump<'a>(&self, root: impl Into<Node<'a>>) -> String {
        self.dump_lines(root).render(&self.context)
    }

    /// Output in the configured format
    pub fn render<'a>(&self, root: impl Into<Node<'a>>) -> serde_json::Result<String> {
        match self.context.format {
            OutputFormat::Text => Ok(self.dump(root)),
            OutputFormat::Json => serde_json::to_string_pretty(&self.dump_lines(root)),
        }
    }
}

impl Default for AstDumper {
    fn default() -> Self {
        Self::new(RenderContext::default())
    }
}

/// Dump a file with the default settings, as structured lines
pub fn dump_lines(file: &File) -> Vec<RenderLine> {
    AstDumper::default().dump_lines(file)
}

/// Dump a file with the default settings, as text
pub fn dump(file: &File) -> String {
    AstDumper::default().dump(file)
}
