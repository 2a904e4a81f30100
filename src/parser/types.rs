use std::fmt;

// Syntax tree produced by the parser. Each struct corresponds to one concrete
// node shape; enums group the shapes that may appear in the same slot.

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Literal category, rendered with the upper-case token names Go tooling uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

impl LitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LitKind::Int => "INT",
            LitKind::Float => "FLOAT",
            LitKind::Imag => "IMAG",
            LitKind::Char => "CHAR",
            LitKind::String => "STRING",
        }
    }
}

impl fmt::Display for LitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicLit {
    pub kind: LitKind,
    /// Raw source text, quotes and prefixes included
    pub value: String,
}

impl BasicLit {
    pub fn new(kind: LitKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub name: Ident,
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclToken {
    Import,
    Const,
    Type,
    Var,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub tok: DeclToken,
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    /// Local package name: an alias, `.` or `_`
    pub name: Option<Ident>,
    pub path: BasicLit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    /// `type A = B` rather than `type A B`
    pub alias: bool,
    pub ty: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub ty: FuncType,
    pub body: Option<BlockStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    pub params: FieldList,
    pub results: Option<FieldList>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    pub list: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub names: Vec<Ident>,
    pub ty: Expr,
    /// Struct field tag. Struct types are not parsed, so only hand-built
    /// trees carry one.
    pub tag: Option<BasicLit>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub list: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(ExprStmt),
    Assign(AssignStmt),
    IncDec(IncDecStmt),
    Decl(DeclStmt),
    Return(ReturnStmt),
    Branch(BranchStmt),
    Block(BlockStmt),
    If(IfStmt),
    For(ForStmt),
    Range(RangeStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub x: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Define,
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Define => ":=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Quo => "/=",
            AssignOp::Rem => "%=",
            AssignOp::And => "&=",
            AssignOp::Or => "|=",
            AssignOp::Xor => "^=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::AndNot => "&^=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub lhs: Vec<Expr>,
    pub tok: AssignOp,
    pub rhs: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncDecOp {
    Inc,
    Dec,
}

impl IncDecOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncDecOp::Inc => "++",
            IncDecOp::Dec => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncDecStmt {
    pub x: Expr,
    pub tok: IncDecOp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclStmt {
    pub decl: GenDecl,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReturnStmt {
    pub results: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchToken {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

impl BranchToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchToken::Break => "break",
            BranchToken::Continue => "continue",
            BranchToken::Goto => "goto",
            BranchToken::Fallthrough => "fallthrough",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchStmt {
    pub tok: BranchToken,
    pub label: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Expr,
    pub body: BlockStmt,
    /// Either another `IfStmt` or a `BlockStmt`
    pub els: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub post: Option<Box<Stmt>>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeStmt {
    pub key: Option<Expr>,
    pub value: Option<Expr>,
    /// `None` for the bare `for range x` form
    pub tok: Option<AssignOp>,
    pub x: Expr,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    BasicLit(BasicLit),
    Call(CallExpr),
    Selector(SelectorExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Star(StarExpr),
    Paren(ParenExpr),
    Index(IndexExpr),
    ArrayType(ArrayType),
    MapType(MapType),
    Ellipsis(Ellipsis),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub fun: Box<Expr>,
    pub args: Vec<Expr>,
    /// Final argument spread with `...`
    pub has_ellipsis: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorExpr {
    pub x: Box<Expr>,
    pub sel: Ident,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    LogOr,
    LogAnd,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Or,
    Xor,
    Mul,
    Quo,
    Rem,
    Shl,
    Shr,
    And,
    AndNot,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::LogOr => "||",
            BinaryOp::LogAnd => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Mul => "*",
            BinaryOp::Quo => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "&",
            BinaryOp::AndNot => "&^",
        }
    }

    /// Binding strength, 1 (`||`) through 5 (multiplicative)
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::LogOr => 1,
            BinaryOp::LogAnd => 2,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => 3,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Or | BinaryOp::Xor => 4,
            BinaryOp::Mul
            | BinaryOp::Quo
            | BinaryOp::Rem
            | BinaryOp::Shl
            | BinaryOp::Shr
            | BinaryOp::And
            | BinaryOp::AndNot => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub x: Box<Expr>,
    pub op: BinaryOp,
    pub y: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    Xor,
    Addr,
    Recv,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::Xor => "^",
            UnaryOp::Addr => "&",
            UnaryOp::Recv => "<-",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub x: Box<Expr>,
}

/// Pointer type or dereference
#[derive(Debug, Clone, PartialEq)]
pub struct StarExpr {
    pub x: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub x: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub x: Box<Expr>,
    pub index: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    /// `None` for slices; an `Ellipsis` for `[...]T`
    pub len: Option<Box<Expr>>,
    pub elt: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub key: Box<Expr>,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsis {
    pub elt: Option<Box<Expr>>,
}
