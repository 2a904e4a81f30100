use crate::parser::Node;
use crate::renderer::traits::*;

/// Maps a single node to its one-line label, independent of tree position
pub struct LabelRenderer;

impl LabelRenderer {
    pub fn render_label(&self, node: Node<'_>, style: LabelStyle) -> String {
        match node {
            Node::Ident(ident) => format!("Ident {}", ident.name),
            Node::BasicLit(lit) => format!("BasicLit {} {}", lit.kind, lit.value),
            Node::File(_)
            | Node::FuncDecl(_)
            | Node::FuncType(_)
            | Node::FieldList(_)
            | Node::Field(_)
            | Node::BlockStmt(_)
            | Node::ExprStmt(_)
            | Node::CallExpr(_)
            | Node::SelectorExpr(_)
            | Node::GenDecl(_)
            | Node::ImportSpec(_)
            | Node::IfStmt(_)
            | Node::ReturnStmt(_) => node.kind().name().to_string(),
            // No dedicated rule in the classic table
            Node::ValueSpec(_)
            | Node::TypeSpec(_)
            | Node::AssignStmt(_)
            | Node::IncDecStmt(_)
            | Node::DeclStmt(_)
            | Node::BranchStmt(_)
            | Node::ForStmt(_)
            | Node::RangeStmt(_)
            | Node::BinaryExpr(_)
            | Node::UnaryExpr(_)
            | Node::StarExpr(_)
            | Node::ParenExpr(_)
            | Node::IndexExpr(_)
            | Node::ArrayType(_)
            | Node::MapType(_)
            | Node::Ellipsis(_) => match style {
                LabelStyle::Classic => format!("Unknown {}", self.debug_form(node)),
                LabelStyle::Full => self.debug_form(node),
            },
        }
    }

    /// Kind name, followed by the operator or keyword for kinds that carry one
    pub fn debug_form(&self, node: Node<'_>) -> String {
        let token = match node {
            Node::AssignStmt(stmt) => Some(stmt.tok.as_str()),
            Node::IncDecStmt(stmt) => Some(stmt.tok.as_str()),
            Node::BranchStmt(stmt) => Some(stmt.tok.as_str()),
            Node::BinaryExpr(expr) => Some(expr.op.as_str()),
            Node::UnaryExpr(expr) => Some(expr.op.as_str()),
            Node::TypeSpec(spec) if spec.alias => Some("="),
            Node::RangeStmt(stmt) => stmt.tok.map(|tok| tok.as_str()),
            _ => None,
        };

        match token {
            Some(token) => format!("{} {}", node.kind(), token),
            None => node.kind().to_string(),
        }
    }
}

/// Helper for consistent indentation
pub struct IndentationHelper;

impl IndentationHelper {
    pub fn indent_for_depth(depth: usize, width: usize) -> String {
        " ".repeat(depth * width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::*;

    #[test]
    fn test_literal_label_keeps_quotes() {
        let lit = BasicLit::new(LitKind::String, "\"hello\"");
        assert_eq!(
            LabelRenderer.render_label(Node::BasicLit(&lit), LabelStyle::Classic),
            "BasicLit STRING \"hello\""
        );
    }

    #[test]
    fn test_literal_kind_tags() {
        let cases = [
            (LitKind::Int, "0x1F", "BasicLit INT 0x1F"),
            (LitKind::Float, "1.5", "BasicLit FLOAT 1.5"),
            (LitKind::Imag, "2i", "BasicLit IMAG 2i"),
            (LitKind::Char, "'a'", "BasicLit CHAR 'a'"),
            (LitKind::String, "`raw`", "BasicLit STRING `raw`"),
        ];

        for (kind, value, expected) in cases {
            let lit = BasicLit::new(kind, value);
            assert_eq!(
                LabelRenderer.render_label(Node::BasicLit(&lit), LabelStyle::Classic),
                expected
            );
        }
    }

    #[test]
    fn test_unknown_label_carries_operator() {
        let expr = BinaryExpr {
            x: Box::new(Expr::Ident(Ident::new("a"))),
            op: BinaryOp::Shl,
            y: Box::new(Expr::Ident(Ident::new("b"))),
        };
        let node = Node::BinaryExpr(&expr);

        assert_eq!(
            LabelRenderer.render_label(node, LabelStyle::Classic),
            "Unknown BinaryExpr <<"
        );
        assert_eq!(LabelRenderer.render_label(node, LabelStyle::Full), "BinaryExpr <<");
    }

    #[test]
    fn test_full_style_leaves_classic_kinds_alone() {
        let block = BlockStmt::default();
        let ident = Ident::new("x");

        for style in [LabelStyle::Classic, LabelStyle::Full] {
            assert_eq!(LabelRenderer.render_label(Node::BlockStmt(&block), style), "BlockStmt");
            assert_eq!(LabelRenderer.render_label(Node::Ident(&ident), style), "Ident x");
        }
    }

    #[test]
    fn test_debug_form_without_token() {
        let star = StarExpr {
            x: Box::new(Expr::Ident(Ident::new("T"))),
        };
        assert_eq!(LabelRenderer.debug_form(Node::StarExpr(&star)), "StarExpr");
    }

    #[test]
    fn test_indent_for_depth() {
        assert_eq!(IndentationHelper::indent_for_depth(0, 2), "");
        assert_eq!(IndentationHelper::indent_for_depth(3, 2), "      ");
        assert_eq!(IndentationHelper::indent_for_depth(2, 4), "        ");
    }
}
