//! Borrowed, uniform view over the syntax tree.
//!
//! `Node` has one variant per concrete node shape. It is what traversal and
//! rendering operate on: the kind, the ordered children and, through the
//! `Ident` and `BasicLit` variants, the payloads.

use crate::parser::types::*;
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    File(&'a File),
    Ident(&'a Ident),
    BasicLit(&'a BasicLit),
    GenDecl(&'a GenDecl),
    FuncDecl(&'a FuncDecl),
    ImportSpec(&'a ImportSpec),
    ValueSpec(&'a ValueSpec),
    TypeSpec(&'a TypeSpec),
    FuncType(&'a FuncType),
    FieldList(&'a FieldList),
    Field(&'a Field),
    BlockStmt(&'a BlockStmt),
    ExprStmt(&'a ExprStmt),
    AssignStmt(&'a AssignStmt),
    IncDecStmt(&'a IncDecStmt),
    DeclStmt(&'a DeclStmt),
    ReturnStmt(&'a ReturnStmt),
    BranchStmt(&'a BranchStmt),
    IfStmt(&'a IfStmt),
    ForStmt(&'a ForStmt),
    RangeStmt(&'a RangeStmt),
    CallExpr(&'a CallExpr),
    SelectorExpr(&'a SelectorExpr),
    BinaryExpr(&'a BinaryExpr),
    UnaryExpr(&'a UnaryExpr),
    StarExpr(&'a StarExpr),
    ParenExpr(&'a ParenExpr),
    IndexExpr(&'a IndexExpr),
    ArrayType(&'a ArrayType),
    MapType(&'a MapType),
    Ellipsis(&'a Ellipsis),
}

/// Discriminant of a `Node`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Ident,
    BasicLit,
    GenDecl,
    FuncDecl,
    ImportSpec,
    ValueSpec,
    TypeSpec,
    FuncType,
    FieldList,
    Field,
    BlockStmt,
    ExprStmt,
    AssignStmt,
    IncDecStmt,
    DeclStmt,
    ReturnStmt,
    BranchStmt,
    IfStmt,
    ForStmt,
    RangeStmt,
    CallExpr,
    SelectorExpr,
    BinaryExpr,
    UnaryExpr,
    StarExpr,
    ParenExpr,
    IndexExpr,
    ArrayType,
    MapType,
    Ellipsis,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::File => "File",
            NodeKind::Ident => "Ident",
            NodeKind::BasicLit => "BasicLit",
            NodeKind::GenDecl => "GenDecl",
            NodeKind::FuncDecl => "FuncDecl",
            NodeKind::ImportSpec => "ImportSpec",
            NodeKind::ValueSpec => "ValueSpec",
            NodeKind::TypeSpec => "TypeSpec",
            NodeKind::FuncType => "FuncType",
            NodeKind::FieldList => "FieldList",
            NodeKind::Field => "Field",
            NodeKind::BlockStmt => "BlockStmt",
            NodeKind::ExprStmt => "ExprStmt",
            NodeKind::AssignStmt => "AssignStmt",
            NodeKind::IncDecStmt => "IncDecStmt",
            NodeKind::DeclStmt => "DeclStmt",
            NodeKind::ReturnStmt => "ReturnStmt",
            NodeKind::BranchStmt => "BranchStmt",
            NodeKind::IfStmt => "IfStmt",
            NodeKind::ForStmt => "ForStmt",
            NodeKind::RangeStmt => "RangeStmt",
            NodeKind::CallExpr => "CallExpr",
            NodeKind::SelectorExpr => "SelectorExpr",
            NodeKind::BinaryExpr => "BinaryExpr",
            NodeKind::UnaryExpr => "UnaryExpr",
            NodeKind::StarExpr => "StarExpr",
            NodeKind::ParenExpr => "ParenExpr",
            NodeKind::IndexExpr => "IndexExpr",
            NodeKind::ArrayType => "ArrayType",
            NodeKind::MapType => "MapType",
            NodeKind::Ellipsis => "Ellipsis",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Ident(_) => NodeKind::Ident,
            Node::BasicLit(_) => NodeKind::BasicLit,
            Node::GenDecl(_) => NodeKind::GenDecl,
            Node::FuncDecl(_) => NodeKind::FuncDecl,
            Node::ImportSpec(_) => NodeKind::ImportSpec,
            Node::ValueSpec(_) => NodeKind::ValueSpec,
            Node::TypeSpec(_) => NodeKind::TypeSpec,
            Node::FuncType(_) => NodeKind::FuncType,
            Node::FieldList(_) => NodeKind::FieldList,
            Node::Field(_) => NodeKind::Field,
            Node::BlockStmt(_) => NodeKind::BlockStmt,
            Node::ExprStmt(_) => NodeKind::ExprStmt,
            Node::AssignStmt(_) => NodeKind::AssignStmt,
            Node::IncDecStmt(_) => NodeKind::IncDecStmt,
            Node::DeclStmt(_) => NodeKind::DeclStmt,
            Node::ReturnStmt(_) => NodeKind::ReturnStmt,
            Node::BranchStmt(_) => NodeKind::BranchStmt,
            Node::IfStmt(_) => NodeKind::IfStmt,
            Node::ForStmt(_) => NodeKind::ForStmt,
            Node::RangeStmt(_) => NodeKind::RangeStmt,
            Node::CallExpr(_) => NodeKind::CallExpr,
            Node::SelectorExpr(_) => NodeKind::SelectorExpr,
            Node::BinaryExpr(_) => NodeKind::BinaryExpr,
            Node::UnaryExpr(_) => NodeKind::UnaryExpr,
            Node::StarExpr(_) => NodeKind::StarExpr,
            Node::ParenExpr(_) => NodeKind::ParenExpr,
            Node::IndexExpr(_) => NodeKind::IndexExpr,
            Node::ArrayType(_) => NodeKind::ArrayType,
            Node::MapType(_) => NodeKind::MapType,
            Node::Ellipsis(_) => NodeKind::Ellipsis,
        }
    }

    /// Direct children in source order. Absent optional slots are skipped.
    pub fn children(&self) -> Vec<Node<'a>> {
        let mut out = Vec::new();
        match *self {
            Node::File(file) => {
                out.push(Node::Ident(&file.name));
                out.extend(file.decls.iter().map(Node::from));
            }
            Node::Ident(_) | Node::BasicLit(_) => {}
            Node::GenDecl(decl) => out.extend(decl.specs.iter().map(Node::from)),
            Node::FuncDecl(decl) => {
                if let Some(recv) = &decl.recv {
                    out.push(Node::FieldList(recv));
                }
                out.push(Node::Ident(&decl.name));
                out.push(Node::FuncType(&decl.ty));
                if let Some(body) = &decl.body {
                    out.push(Node::BlockStmt(body));
                }
            }
            Node::ImportSpec(spec) => {
                if let Some(name) = &spec.name {
                    out.push(Node::Ident(name));
                }
                out.push(Node::BasicLit(&spec.path));
            }
            Node::ValueSpec(spec) => {
                out.extend(spec.names.iter().map(Node::Ident));
                out.extend(spec.ty.iter().map(Node::from));
                out.extend(spec.values.iter().map(Node::from));
            }
            Node::TypeSpec(spec) => {
                out.push(Node::Ident(&spec.name));
                out.push(Node::from(&spec.ty));
            }
            Node::FuncType(ty) => {
                out.push(Node::FieldList(&ty.params));
                if let Some(results) = &ty.results {
                    out.push(Node::FieldList(results));
                }
            }
            Node::FieldList(list) => out.extend(list.list.iter().map(Node::Field)),
            Node::Field(field) => {
                out.extend(field.names.iter().map(Node::Ident));
                out.push(Node::from(&field.ty));
                if let Some(tag) = &field.tag {
                    out.push(Node::BasicLit(tag));
                }
            }
            Node::BlockStmt(block) => out.extend(block.list.iter().map(Node::from)),
            Node::ExprStmt(stmt) => out.push(Node::from(&stmt.x)),
            Node::AssignStmt(stmt) => {
                out.extend(stmt.lhs.iter().map(Node::from));
                out.extend(stmt.rhs.iter().map(Node::from));
            }
            Node::IncDecStmt(stmt) => out.push(Node::from(&stmt.x)),
            Node::DeclStmt(stmt) => out.push(Node::GenDecl(&stmt.decl)),
            Node::ReturnStmt(stmt) => out.extend(stmt.results.iter().map(Node::from)),
            Node::BranchStmt(stmt) => out.extend(stmt.label.iter().map(Node::Ident)),
            Node::IfStmt(stmt) => {
                out.extend(stmt.init.as_deref().map(Node::from));
                out.push(Node::from(&stmt.cond));
                out.push(Node::BlockStmt(&stmt.body));
                out.extend(stmt.els.as_deref().map(Node::from));
            }
            Node::ForStmt(stmt) => {
                out.extend(stmt.init.as_deref().map(Node::from));
                out.extend(stmt.cond.iter().map(Node::from));
                out.extend(stmt.post.as_deref().map(Node::from));
                out.push(Node::BlockStmt(&stmt.body));
            }
            Node::RangeStmt(stmt) => {
                out.extend(stmt.key.iter().map(Node::from));
                out.extend(stmt.value.iter().map(Node::from));
                out.push(Node::from(&stmt.x));
                out.push(Node::BlockStmt(&stmt.body));
            }
            Node::CallExpr(call) => {
                out.push(Node::from(call.fun.as_ref()));
                out.extend(call.args.iter().map(Node::from));
            }
            Node::SelectorExpr(sel) => {
                out.push(Node::from(sel.x.as_ref()));
                out.push(Node::Ident(&sel.sel));
            }
            Node::BinaryExpr(bin) => {
                out.push(Node::from(bin.x.as_ref()));
                out.push(Node::from(bin.y.as_ref()));
            }
            Node::UnaryExpr(un) => out.push(Node::from(un.x.as_ref())),
            Node::StarExpr(star) => out.push(Node::from(star.x.as_ref())),
            Node::ParenExpr(paren) => out.push(Node::from(paren.x.as_ref())),
            Node::IndexExpr(index) => {
                out.push(Node::from(index.x.as_ref()));
                out.push(Node::from(index.index.as_ref()));
            }
            Node::ArrayType(array) => {
                out.extend(array.len.as_deref().map(Node::from));
                out.push(Node::from(array.elt.as_ref()));
            }
            Node::MapType(map) => {
                out.push(Node::from(map.key.as_ref()));
                out.push(Node::from(map.value.as_ref()));
            }
            Node::Ellipsis(ellipsis) => out.extend(ellipsis.elt.as_deref().map(Node::from)),
        }
        out
    }
}

impl<'a> From<&'a File> for Node<'a> {
    fn from(file: &'a File) -> Self {
        Node::File(file)
    }
}

impl<'a> From<&'a Decl> for Node<'a> {
    fn from(decl: &'a Decl) -> Self {
        match decl {
            Decl::Gen(d) => Node::GenDecl(d),
            Decl::Func(d) => Node::FuncDecl(d),
        }
    }
}

impl<'a> From<&'a Spec> for Node<'a> {
    fn from(spec: &'a Spec) -> Self {
        match spec {
            Spec::Import(s) => Node::ImportSpec(s),
            Spec::Value(s) => Node::ValueSpec(s),
            Spec::Type(s) => Node::TypeSpec(s),
        }
    }
}

impl<'a> From<&'a Stmt> for Node<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        match stmt {
            Stmt::Expr(s) => Node::ExprStmt(s),
            Stmt::Assign(s) => Node::AssignStmt(s),
            Stmt::IncDec(s) => Node::IncDecStmt(s),
            Stmt::Decl(s) => Node::DeclStmt(s),
            Stmt::Return(s) => Node::ReturnStmt(s),
            Stmt::Branch(s) => Node::BranchStmt(s),
            Stmt::Block(s) => Node::BlockStmt(s),
            Stmt::If(s) => Node::IfStmt(s),
            Stmt::For(s) => Node::ForStmt(s),
            Stmt::Range(s) => Node::RangeStmt(s),
        }
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Ident(e) => Node::Ident(e),
            Expr::BasicLit(e) => Node::BasicLit(e),
            Expr::Call(e) => Node::CallExpr(e),
            Expr::Selector(e) => Node::SelectorExpr(e),
            Expr::Binary(e) => Node::BinaryExpr(e),
            Expr::Unary(e) => Node::UnaryExpr(e),
            Expr::Star(e) => Node::StarExpr(e),
            Expr::Paren(e) => Node::ParenExpr(e),
            Expr::Index(e) => Node::IndexExpr(e),
            Expr::ArrayType(e) => Node::ArrayType(e),
            Expr::MapType(e) => Node::MapType(e),
            Expr::Ellipsis(e) => Node::Ellipsis(e),
        }
    }
}

/// Pre-order walk. `visit` receives each node with its depth below `root`,
/// which is visited at depth 0.
pub fn walk<'a, F>(root: Node<'a>, visit: &mut F)
where
    F: FnMut(Node<'a>, usize),
{
    // Children go on in reverse so the first child is popped next
    let mut pending = vec![(root, 0)];
    while let Some((node, depth)) = pending.pop() {
        visit(node, depth);
        pending.extend(node.children().into_iter().rev().map(|child| (child, depth + 1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expr {
        Expr::Ident(Ident::new(name))
    }

    #[test]
    fn test_field_children_names_before_type() {
        let field = Field {
            names: vec![Ident::new("a"), Ident::new("b")],
            ty: ident("int"),
            tag: Some(BasicLit::new(LitKind::String, "`json:\"a\"`")),
        };

        let kinds: Vec<NodeKind> = Node::Field(&field).children().iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Ident, NodeKind::Ident, NodeKind::Ident, NodeKind::BasicLit]
        );
    }

    #[test]
    fn test_func_type_without_results_has_one_child() {
        let ty = FuncType {
            params: FieldList::default(),
            results: None,
        };

        let children = Node::FuncType(&ty).children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].kind(), NodeKind::FieldList);
    }

    #[test]
    fn test_receiver_precedes_name() {
        let decl = FuncDecl {
            recv: Some(FieldList {
                list: vec![Field {
                    names: vec![Ident::new("s")],
                    ty: ident("S"),
                    tag: None,
                }],
            }),
            name: Ident::new("M"),
            ty: FuncType {
                params: FieldList::default(),
                results: None,
            },
            body: None,
        };

        let kinds: Vec<NodeKind> = Node::FuncDecl(&decl).children().iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::FieldList, NodeKind::Ident, NodeKind::FuncType]
        );
    }

    #[test]
    fn test_walk_reports_depths() {
        let expr = Expr::Binary(BinaryExpr {
            x: Box::new(ident("a")),
            op: BinaryOp::Add,
            y: Box::new(Expr::Paren(ParenExpr {
                x: Box::new(ident("b")),
            })),
        });

        let mut seen = Vec::new();
        walk(Node::from(&expr), &mut |node, depth| seen.push((node.kind(), depth)));

        assert_eq!(
            seen,
            vec![
                (NodeKind::BinaryExpr, 0),
                (NodeKind::Ident, 1),
                (NodeKind::ParenExpr, 1),
                (NodeKind::Ident, 2),
            ]
        );
    }
}
