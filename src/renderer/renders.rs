use crate::renderer::components::*;
use crate::renderer::renderer::RenderLine;
use crate::renderer::traits::*;

impl Render for RenderLine {
    fn render(&self, context: &RenderContext) -> String {
        let indent = IndentationHelper::indent_for_depth(self.depth, context.indent_width);
        format!("{}{}", indent, self.label)
    }
}

impl Render for [RenderLine] {
    fn render(&self, context: &RenderContext) -> String {
        let mut output = String::new();

        for (i, line) in self.iter().enumerate() {
            // Newline between lines, none after the last
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&line.render(context));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_indentation() {
        let line = RenderLine::new(3, "Ident x");
        assert_eq!(line.render(&RenderContext::new()), "      Ident x");
    }

    #[test]
    fn test_custom_indent_width() {
        let line = RenderLine::new(2, "Field");
        let context = RenderContext::new().with_indent_width(4);
        assert_eq!(line.render(&context), "        Field");
    }

    #[test]
    fn test_no_trailing_newline() {
        let lines = vec![RenderLine::new(0, "File"), RenderLine::new(1, "Ident test")];
        assert_eq!(lines.render(&RenderContext::new()), "File\n  Ident test");
    }

    #[test]
    fn test_empty_sequence_renders_empty() {
        let lines: Vec<RenderLine> = Vec::new();
        assert_eq!(lines.render(&RenderContext::new()), "");
    }
}
