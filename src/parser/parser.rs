use crate::parser::error::{line_col, ParseError, ParseErrorKind};
use crate::parser::lexer::{tokenize, Token, TokenKind};
use crate::parser::types::*;
use tracing::{debug, trace};

type PResult<T> = Result<T, ParseError>;

/// Deepest nesting of blocks, types and expressions accepted before
/// parsing gives up with `NestingTooDeep`
pub const MAX_NESTING: usize = 256;

/// Parse a complete source file.
pub fn parse_file(source: &str) -> PResult<File> {
    let tokens = tokenize(source)?;
    debug!(tokens = tokens.len(), "tokenized source");
    let file = FileParser::new(source, tokens).parse_file()?;
    debug!(package = %file.name.name, decls = file.decls.len(), "parsed file");
    Ok(file)
}

// Result of a simple statement in a `for` header, which may be a range clause
enum SimpleStmt {
    Stmt(Stmt),
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        tok: Option<AssignOp>,
        x: Expr,
    },
}

// Recursive-descent parser over the token list
pub struct FileParser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    // Inside an `if`/`for` header, where `{` opens the body
    control_clause: bool,
}

impl<'a> FileParser<'a> {
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            control_clause: false,
        }
    }

    pub fn parse_file(mut self) -> PResult<File> {
        self.expect(TokenKind::Package, "'package'")?;
        let name = self.parse_ident()?;
        self.expect_semi()?;

        let mut decls = Vec::new();
        while !self.at_end() {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            let decl = match self.peek_kind() {
                Some(TokenKind::Func) => Decl::Func(self.parse_func_decl()?),
                Some(TokenKind::Import) => Decl::Gen(self.parse_gen_decl(DeclToken::Import)?),
                Some(TokenKind::Const) => Decl::Gen(self.parse_gen_decl(DeclToken::Const)?),
                Some(TokenKind::Var) => Decl::Gen(self.parse_gen_decl(DeclToken::Var)?),
                Some(TokenKind::Type) => Decl::Gen(self.parse_gen_decl(DeclToken::Type)?),
                _ => return Err(self.unexpected("declaration")),
            };
            trace!(index = decls.len(), "parsed declaration");
            decls.push(decl);
            if !self.at_end() {
                self.expect_semi()?;
            }
        }

        Ok(File { name, decls })
    }

    // ----- token helpers -----

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> PResult<Token> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                let token = token.clone();
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn expect_semi(&mut self) -> PResult<()> {
        // A closing brace or paren also ends the statement on the same line
        if self.eat(TokenKind::Semicolon) || self.at(TokenKind::RParen) || self.at(TokenKind::RBrace) {
            Ok(())
        } else {
            Err(self.unexpected("';' or newline"))
        }
    }

    fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        let offset = self
            .peek()
            .map(|t| t.span.start)
            .unwrap_or(self.source.len());
        let (line, column) = line_col(self.source, offset);
        ParseError::new(kind, line, column)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let kind = match self.peek() {
            Some(token) => ParseErrorKind::UnexpectedToken {
                found: token.describe(),
                expected: expected.to_string(),
            },
            None => ParseErrorKind::UnexpectedEof(expected.to_string()),
        };
        self.error_here(kind)
    }

    fn found(&self) -> String {
        self.peek()
            .map(|t| t.describe())
            .unwrap_or_else(|| "end of file".to_string())
    }

    fn unsupported(&self, construct: &str) -> ParseError {
        self.error_here(ParseErrorKind::Unsupported(construct.to_string()))
    }

    fn enter(&mut self) -> PResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_here(ParseErrorKind::NestingTooDeep(MAX_NESTING)));
        }
        self.depth += 1;
        Ok(())
    }

    fn nested<T>(&mut self, parse: fn(&mut Self) -> PResult<T>) -> PResult<T> {
        self.enter()?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // Parentheses and brackets lift the header restriction on composite literals
    fn bracketed<T>(&mut self, parse: fn(&mut Self) -> PResult<T>) -> PResult<T> {
        let outer = std::mem::replace(&mut self.control_clause, false);
        let result = parse(self);
        self.control_clause = outer;
        result
    }

    // ----- declarations -----

    fn parse_ident(&mut self) -> PResult<Ident> {
        let token = self.expect(TokenKind::Ident, "identifier")?;
        Ok(Ident::new(token.text))
    }

    fn parse_ident_list(&mut self) -> PResult<Vec<Ident>> {
        let mut names = vec![self.parse_ident()?];
        while self.eat(TokenKind::Comma) {
            names.push(self.parse_ident()?);
        }
        Ok(names)
    }

    fn parse_gen_decl(&mut self, tok: DeclToken) -> PResult<GenDecl> {
        // keyword
        self.advance();

        let mut specs = Vec::new();
        if self.eat(TokenKind::LParen) {
            while !self.at(TokenKind::RParen) {
                if self.at_end() {
                    return Err(self.unexpected("')'"));
                }
                if self.eat(TokenKind::Semicolon) {
                    continue;
                }
                specs.push(self.parse_spec(tok)?);
                self.expect_semi()?;
            }
            self.expect(TokenKind::RParen, "')'")?;
        } else {
            specs.push(self.parse_spec(tok)?);
        }

        Ok(GenDecl { tok, specs })
    }

    fn parse_spec(&mut self, tok: DeclToken) -> PResult<Spec> {
        match tok {
            DeclToken::Import => self.parse_import_spec().map(Spec::Import),
            DeclToken::Const | DeclToken::Var => self.parse_value_spec().map(Spec::Value),
            DeclToken::Type => self.parse_type_spec().map(Spec::Type),
        }
    }

    fn parse_import_spec(&mut self) -> PResult<ImportSpec> {
        let name = match self.peek_kind() {
            Some(TokenKind::Ident) => Some(self.parse_ident()?),
            Some(TokenKind::Period) => {
                self.advance();
                Some(Ident::new("."))
            }
            _ => None,
        };
        let path = self.expect(TokenKind::String, "import path")?;
        Ok(ImportSpec {
            name,
            path: BasicLit::new(LitKind::String, path.text),
        })
    }

    fn parse_value_spec(&mut self) -> PResult<ValueSpec> {
        let names = self.parse_ident_list()?;
        let ty = match self.peek_kind() {
            Some(TokenKind::Assign | TokenKind::Semicolon | TokenKind::RParen) | None => None,
            _ => Some(self.parse_type()?),
        };
        let values = if self.eat(TokenKind::Assign) {
            self.parse_expr_list()?
        } else {
            Vec::new()
        };
        Ok(ValueSpec { names, ty, values })
    }

    fn parse_type_spec(&mut self) -> PResult<TypeSpec> {
        let name = self.parse_ident()?;
        if self.at_type_params() {
            return Err(self.unsupported("type parameters"));
        }
        let alias = self.eat(TokenKind::Assign);
        let ty = self.parse_type()?;
        Ok(TypeSpec { name, alias, ty })
    }

    /// `type T[P any] ...` and `type T [N]int` both continue with `[`. A
    /// parameter list is an identifier followed by a constraint or another
    /// name; anything else is an array length. `[P *C]` reads as an array.
    fn at_type_params(&self) -> bool {
        let kind_at = |offset: usize| self.tokens.get(self.pos + offset).map(|t| t.kind);
        self.at(TokenKind::LBrack)
            && kind_at(1) == Some(TokenKind::Ident)
            && matches!(
                kind_at(2),
                Some(
                    TokenKind::Ident
                        | TokenKind::Comma
                        | TokenKind::Tilde
                        | TokenKind::Interface
                        | TokenKind::Map
                        | TokenKind::Chan
                        | TokenKind::Func
                        | TokenKind::Struct
                )
            )
    }

    fn parse_func_decl(&mut self) -> PResult<FuncDecl> {
        self.expect(TokenKind::Func, "'func'")?;

        let recv = if self.at(TokenKind::LParen) {
            Some(self.parse_parameters()?)
        } else {
            None
        };
        let name = self.parse_ident()?;
        if self.at(TokenKind::LBrack) {
            return Err(self.unsupported("type parameters"));
        }
        let ty = self.parse_signature()?;
        let body = if self.at(TokenKind::LBrace) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(FuncDecl {
            recv,
            name,
            ty,
            body,
        })
    }

    fn parse_signature(&mut self) -> PResult<FuncType> {
        let params = self.parse_parameters()?;
        let results = if self.at(TokenKind::LParen) {
            Some(self.parse_parameters()?)
        } else if self.at_type_start() {
            let ty = self.parse_type()?;
            Some(FieldList {
                list: vec![Field {
                    names: Vec::new(),
                    ty,
                    tag: None,
                }],
            })
        } else {
            None
        };
        Ok(FuncType { params, results })
    }

    /// `(a, b int, c string)` or `(int, string)`: names are only recognised
    /// once some entry is a name followed by a type.
    fn parse_parameters(&mut self) -> PResult<FieldList> {
        self.expect(TokenKind::LParen, "'('")?;

        let mut entries: Vec<(Expr, Option<Expr>)> = Vec::new();
        while !self.at(TokenKind::RParen) {
            let first = self.parse_param_type()?;
            let second = match self.peek_kind() {
                Some(TokenKind::Comma | TokenKind::RParen) => None,
                _ => Some(self.parse_param_type()?),
            };
            entries.push((first, second));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;

        let named = entries.iter().any(|(_, ty)| ty.is_some());
        if !named {
            let list = entries
                .into_iter()
                .map(|(ty, _)| Field {
                    names: Vec::new(),
                    ty,
                    tag: None,
                })
                .collect();
            return Ok(FieldList { list });
        }

        let mut list = Vec::new();
        let mut pending = Vec::new();
        for (first, ty) in entries {
            let Expr::Ident(name) = first else {
                return Err(self.error_here(ParseErrorKind::MixedParameters));
            };
            pending.push(name);
            if let Some(ty) = ty {
                list.push(Field {
                    names: std::mem::take(&mut pending),
                    ty,
                    tag: None,
                });
            }
        }
        if !pending.is_empty() {
            return Err(self.error_here(ParseErrorKind::MixedParameters));
        }
        Ok(FieldList { list })
    }

    fn parse_param_type(&mut self) -> PResult<Expr> {
        if self.eat(TokenKind::Ellipsis) {
            let elt = self.parse_type()?;
            return Ok(Expr::Ellipsis(Ellipsis {
                elt: Some(Box::new(elt)),
            }));
        }
        self.parse_type()
    }

    // ----- types -----

    fn at_type_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(
                TokenKind::Ident
                    | TokenKind::Mul
                    | TokenKind::LBrack
                    | TokenKind::Map
                    | TokenKind::Chan
                    | TokenKind::Func
                    | TokenKind::Struct
                    | TokenKind::Interface
                    | TokenKind::Arrow
            )
        )
    }

    fn parse_type(&mut self) -> PResult<Expr> {
        self.nested(Self::parse_type_expr)
    }

    fn parse_type_expr(&mut self) -> PResult<Expr> {
        match self.peek_kind() {
            Some(TokenKind::Ident) => {
                let name = self.parse_ident()?;
                if self.eat(TokenKind::Period) {
                    let sel = self.parse_ident()?;
                    return Ok(Expr::Selector(SelectorExpr {
                        x: Box::new(Expr::Ident(name)),
                        sel,
                    }));
                }
                Ok(Expr::Ident(name))
            }
            Some(TokenKind::Mul) => {
                self.advance();
                let x = self.parse_type()?;
                Ok(Expr::Star(StarExpr { x: Box::new(x) }))
            }
            Some(TokenKind::LBrack) => self.parse_array_type(),
            Some(TokenKind::Map) => self.parse_map_type(),
            Some(TokenKind::LParen) => {
                self.advance();
                let x = self.parse_type()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(Expr::Paren(ParenExpr { x: Box::new(x) }))
            }
            Some(TokenKind::Struct) => Err(self.unsupported("struct type")),
            Some(TokenKind::Interface) => Err(self.unsupported("interface type")),
            Some(TokenKind::Func) => Err(self.unsupported("function type")),
            Some(TokenKind::Chan | TokenKind::Arrow) => Err(self.unsupported("channel type")),
            _ => Err(self.error_here(ParseErrorKind::ExpectedType(self.found()))),
        }
    }

    fn parse_array_type(&mut self) -> PResult<Expr> {
        self.expect(TokenKind::LBrack, "'['")?;
        let len = if self.eat(TokenKind::RBrack) {
            None
        } else {
            let len = if self.eat(TokenKind::Ellipsis) {
                Expr::Ellipsis(Ellipsis { elt: None })
            } else {
                self.parse_expr()?
            };
            self.expect(TokenKind::RBrack, "']'")?;
            Some(Box::new(len))
        };
        let elt = self.parse_type()?;
        Ok(Expr::ArrayType(ArrayType {
            len,
            elt: Box::new(elt),
        }))
    }

    fn parse_map_type(&mut self) -> PResult<Expr> {
        self.expect(TokenKind::Map, "'map'")?;
        self.expect(TokenKind::LBrack, "'['")?;
        let key = self.parse_type()?;
        self.expect(TokenKind::RBrack, "']'")?;
        let value = self.parse_type()?;
        Ok(Expr::MapType(MapType {
            key: Box::new(key),
            value: Box::new(value),
        }))
    }

    // ----- statements -----

    fn parse_block(&mut self) -> PResult<BlockStmt> {
        self.nested(Self::parse_block_stmts)
    }

    fn parse_block_stmts(&mut self) -> PResult<BlockStmt> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut list = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.at_end() {
                return Err(self.unexpected("'}'"));
            }
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            list.push(self.parse_stmt()?);
            self.expect_semi()?;
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(BlockStmt { list })
    }

    fn parse_stmt(&mut self) -> PResult<Stmt> {
        match self.peek_kind() {
            Some(TokenKind::Var) => self.parse_decl_stmt(DeclToken::Var),
            Some(TokenKind::Const) => self.parse_decl_stmt(DeclToken::Const),
            Some(TokenKind::Type) => self.parse_decl_stmt(DeclToken::Type),
            Some(TokenKind::Return) => {
                self.advance();
                let results = if self.at(TokenKind::Semicolon) || self.at(TokenKind::RBrace) {
                    Vec::new()
                } else {
                    self.parse_expr_list()?
                };
                Ok(Stmt::Return(ReturnStmt { results }))
            }
            Some(TokenKind::Break) => self.parse_branch(BranchToken::Break),
            Some(TokenKind::Continue) => self.parse_branch(BranchToken::Continue),
            Some(TokenKind::Goto) => self.parse_branch(BranchToken::Goto),
            Some(TokenKind::Fallthrough) => self.parse_branch(BranchToken::Fallthrough),
            Some(TokenKind::LBrace) => self.parse_block().map(Stmt::Block),
            Some(TokenKind::If) => self.parse_if().map(Stmt::If),
            Some(TokenKind::For) => self.parse_for(),
            Some(TokenKind::Switch) => Err(self.unsupported("switch statement")),
            Some(TokenKind::Select) => Err(self.unsupported("select statement")),
            Some(TokenKind::Go) => Err(self.unsupported("go statement")),
            Some(TokenKind::Defer) => Err(self.unsupported("defer statement")),
            _ => match self.parse_simple_stmt(false)? {
                SimpleStmt::Stmt(stmt) => Ok(stmt),
                SimpleStmt::Range { .. } => Err(self.unsupported("range outside for")),
            },
        }
    }

    fn parse_decl_stmt(&mut self, tok: DeclToken) -> PResult<Stmt> {
        let decl = self.parse_gen_decl(tok)?;
        Ok(Stmt::Decl(DeclStmt { decl }))
    }

    fn parse_branch(&mut self, tok: BranchToken) -> PResult<Stmt> {
        self.advance();
        let label = if tok != BranchToken::Fallthrough && self.at(TokenKind::Ident) {
            Some(self.parse_ident()?)
        } else {
            None
        };
        Ok(Stmt::Branch(BranchStmt { tok, label }))
    }

    fn parse_simple_stmt(&mut self, range_ok: bool) -> PResult<SimpleStmt> {
        if range_ok && self.eat(TokenKind::Range) {
            let x = self.parse_expr()?;
            return Ok(SimpleStmt::Range {
                key: None,
                value: None,
                tok: None,
                x,
            });
        }

        let mut lhs = self.parse_expr_list()?;

        if let Some(tok) = self.peek_kind().and_then(assign_op) {
            self.advance();
            if range_ok && self.eat(TokenKind::Range) {
                if lhs.len() > 2 {
                    return Err(self.unexpected("at most 2 expressions"));
                }
                let x = self.parse_expr()?;
                let mut lhs = lhs.into_iter();
                return Ok(SimpleStmt::Range {
                    key: lhs.next(),
                    value: lhs.next(),
                    tok: Some(tok),
                    x,
                });
            }
            let rhs = self.parse_expr_list()?;
            return Ok(SimpleStmt::Stmt(Stmt::Assign(AssignStmt { lhs, tok, rhs })));
        }

        if lhs.len() > 1 {
            return Err(self.unexpected("':=' or '='"));
        }
        let x = lhs.remove(0);

        match self.peek_kind() {
            Some(TokenKind::Inc) => {
                self.advance();
                Ok(SimpleStmt::Stmt(Stmt::IncDec(IncDecStmt {
                    x,
                    tok: IncDecOp::Inc,
                })))
            }
            Some(TokenKind::Dec) => {
                self.advance();
                Ok(SimpleStmt::Stmt(Stmt::IncDec(IncDecStmt {
                    x,
                    tok: IncDecOp::Dec,
                })))
            }
            Some(TokenKind::Colon) if matches!(x, Expr::Ident(_)) => {
                Err(self.unsupported("labeled statement"))
            }
            Some(TokenKind::Arrow) => Err(self.unsupported("send statement")),
            _ => Ok(SimpleStmt::Stmt(Stmt::Expr(ExprStmt { x }))),
        }
    }

    fn parse_if(&mut self) -> PResult<IfStmt> {
        self.nested(Self::parse_if_stmt)
    }

    fn parse_if_stmt(&mut self) -> PResult<IfStmt> {
        self.expect(TokenKind::If, "'if'")?;
        let outer = std::mem::replace(&mut self.control_clause, true);
        if self.at(TokenKind::LBrace) {
            return Err(self.error_here(ParseErrorKind::ExpectedExpression(self.found())));
        }

        let (init, cond) = if self.eat(TokenKind::Semicolon) {
            (None, self.parse_expr()?)
        } else {
            let stmt = self.parse_simple_stmt(false)?;
            if self.eat(TokenKind::Semicolon) {
                let init = match stmt {
                    SimpleStmt::Stmt(stmt) => stmt,
                    SimpleStmt::Range { .. } => return Err(self.unsupported("range in if")),
                };
                (Some(Box::new(init)), self.parse_expr()?)
            } else {
                match stmt {
                    SimpleStmt::Stmt(Stmt::Expr(ExprStmt { x })) => (None, x),
                    _ => return Err(self.unexpected("condition")),
                }
            }
        };

        self.control_clause = outer;
        let body = self.parse_block()?;
        let els = if self.eat(TokenKind::Else) {
            match self.peek_kind() {
                Some(TokenKind::If) => Some(Box::new(Stmt::If(self.parse_if()?))),
                Some(TokenKind::LBrace) => Some(Box::new(Stmt::Block(self.parse_block()?))),
                _ => return Err(self.unexpected("'if' or '{'")),
            }
        } else {
            None
        };

        Ok(IfStmt {
            init,
            cond,
            body,
            els,
        })
    }

    fn parse_for(&mut self) -> PResult<Stmt> {
        self.expect(TokenKind::For, "'for'")?;

        if self.at(TokenKind::LBrace) {
            let body = self.parse_block()?;
            return Ok(Stmt::For(ForStmt {
                init: None,
                cond: None,
                post: None,
                body,
            }));
        }

        let outer = std::mem::replace(&mut self.control_clause, true);
        let first = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_simple_stmt(true)?)
        };

        let first = match first {
            Some(SimpleStmt::Range { key, value, tok, x }) => {
                self.control_clause = outer;
                let body = self.parse_block()?;
                return Ok(Stmt::Range(RangeStmt {
                    key,
                    value,
                    tok,
                    x,
                    body,
                }));
            }
            Some(SimpleStmt::Stmt(stmt)) => Some(stmt),
            None => None,
        };

        if self.eat(TokenKind::Semicolon) {
            let init = first.map(Box::new);
            let cond = if self.at(TokenKind::Semicolon) {
                None
            } else {
                Some(self.parse_expr()?)
            };
            self.expect(TokenKind::Semicolon, "';'")?;
            let post = if self.at(TokenKind::LBrace) {
                None
            } else {
                match self.parse_simple_stmt(false)? {
                    SimpleStmt::Stmt(stmt) => Some(Box::new(stmt)),
                    SimpleStmt::Range { .. } => return Err(self.unsupported("range in post statement")),
                }
            };
            self.control_clause = outer;
            let body = self.parse_block()?;
            return Ok(Stmt::For(ForStmt {
                init,
                cond,
                post,
                body,
            }));
        }

        let cond = match first {
            Some(Stmt::Expr(ExprStmt { x })) => x,
            _ => return Err(self.unexpected("for loop condition")),
        };
        self.control_clause = outer;
        let body = self.parse_block()?;
        Ok(Stmt::For(ForStmt {
            init: None,
            cond: Some(cond),
            post: None,
            body,
        }))
    }

    // ----- expressions -----

    fn parse_expr_list(&mut self) -> PResult<Vec<Expr>> {
        let mut list = vec![self.parse_expr()?];
        while self.eat(TokenKind::Comma) {
            list.push(self.parse_expr()?);
        }
        Ok(list)
    }

    pub fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_binary(1)
    }

    fn parse_binary(&mut self, min_prec: u8) -> PResult<Expr> {
        let outer = self.depth;
        let mut x = self.parse_unary()?;
        while let Some(op) = self.peek_kind().and_then(binary_op) {
            if op.precedence() < min_prec {
                break;
            }
            // Each operator pushes the left operand one level down
            self.enter()?;
            self.advance();
            let y = self.parse_binary(op.precedence() + 1)?;
            x = Expr::Binary(BinaryExpr {
                x: Box::new(x),
                op,
                y: Box::new(y),
            });
        }
        self.depth = outer;
        Ok(x)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        self.nested(Self::parse_unary_expr)
    }

    fn parse_unary_expr(&mut self) -> PResult<Expr> {
        let op = match self.peek_kind() {
            Some(TokenKind::Add) => UnaryOp::Plus,
            Some(TokenKind::Sub) => UnaryOp::Minus,
            Some(TokenKind::Not) => UnaryOp::Not,
            Some(TokenKind::Xor) => UnaryOp::Xor,
            Some(TokenKind::And) => UnaryOp::Addr,
            Some(TokenKind::Arrow) => UnaryOp::Recv,
            Some(TokenKind::Mul) => {
                self.advance();
                let x = self.parse_unary()?;
                return Ok(Expr::Star(StarExpr { x: Box::new(x) }));
            }
            _ => return self.parse_primary(),
        };
        self.advance();
        let x = self.parse_unary()?;
        Ok(Expr::Unary(UnaryExpr { op, x: Box::new(x) }))
    }

    fn parse_operand(&mut self) -> PResult<Expr> {
        let lit_kind = match self.peek_kind() {
            Some(TokenKind::Ident) => return self.parse_ident().map(Expr::Ident),
            Some(TokenKind::Int) => LitKind::Int,
            Some(TokenKind::Float) => LitKind::Float,
            Some(TokenKind::Imag) => LitKind::Imag,
            Some(TokenKind::Char) => LitKind::Char,
            Some(TokenKind::String) => LitKind::String,
            Some(TokenKind::LParen) => {
                self.advance();
                let x = self.bracketed(Self::parse_expr)?;
                self.expect(TokenKind::RParen, "')'")?;
                return Ok(Expr::Paren(ParenExpr { x: Box::new(x) }));
            }
            Some(TokenKind::LBrack) => return self.parse_array_type(),
            Some(TokenKind::Map) => return self.parse_map_type(),
            Some(TokenKind::Func) => return Err(self.unsupported("function literal")),
            _ => return Err(self.error_here(ParseErrorKind::ExpectedExpression(self.found()))),
        };
        let value = self.peek().map(|t| t.text.clone()).unwrap_or_default();
        self.pos += 1;
        Ok(Expr::BasicLit(BasicLit::new(lit_kind, value)))
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        let mut x = self.parse_operand()?;
        loop {
            match self.peek_kind() {
                Some(TokenKind::Period) => {
                    self.advance();
                    if self.at(TokenKind::LParen) {
                        return Err(self.unsupported("type assertion"));
                    }
                    let sel = self.parse_ident()?;
                    x = Expr::Selector(SelectorExpr {
                        x: Box::new(x),
                        sel,
                    });
                }
                Some(TokenKind::LParen) => {
                    self.advance();
                    let (args, has_ellipsis) = self.bracketed(Self::parse_call_args)?;
                    self.expect(TokenKind::RParen, "')'")?;
                    x = Expr::Call(CallExpr {
                        fun: Box::new(x),
                        args,
                        has_ellipsis,
                    });
                }
                Some(TokenKind::LBrack) => {
                    self.advance();
                    let index = self.bracketed(Self::parse_expr)?;
                    if self.at(TokenKind::Colon) {
                        return Err(self.unsupported("slice expression"));
                    }
                    self.expect(TokenKind::RBrack, "']'")?;
                    x = Expr::Index(IndexExpr {
                        x: Box::new(x),
                        index: Box::new(index),
                    });
                }
                Some(TokenKind::LBrace) if !self.control_clause && is_literal_type(&x) => {
                    return Err(self.unsupported("composite literal"));
                }
                _ => return Ok(x),
            }
        }
    }

    fn parse_call_args(&mut self) -> PResult<(Vec<Expr>, bool)> {
        let mut args = Vec::new();
        let mut has_ellipsis = false;
        while !self.at(TokenKind::RParen) {
            args.push(self.parse_expr()?);
            if self.eat(TokenKind::Ellipsis) {
                has_ellipsis = true;
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok((args, has_ellipsis))
    }
}

// Expressions that can name the type of a composite literal
fn is_literal_type(x: &Expr) -> bool {
    match x {
        Expr::Ident(_) | Expr::ArrayType(_) | Expr::MapType(_) => true,
        Expr::Selector(sel) => matches!(sel.x.as_ref(), Expr::Ident(_)),
        _ => false,
    }
}

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Assign => AssignOp::Assign,
        TokenKind::Define => AssignOp::Define,
        TokenKind::AddAssign => AssignOp::Add,
        TokenKind::SubAssign => AssignOp::Sub,
        TokenKind::MulAssign => AssignOp::Mul,
        TokenKind::QuoAssign => AssignOp::Quo,
        TokenKind::RemAssign => AssignOp::Rem,
        TokenKind::AndAssign => AssignOp::And,
        TokenKind::OrAssign => AssignOp::Or,
        TokenKind::XorAssign => AssignOp::Xor,
        TokenKind::ShlAssign => AssignOp::Shl,
        TokenKind::ShrAssign => AssignOp::Shr,
        TokenKind::AndNotAssign => AssignOp::AndNot,
        _ => return None,
    };
    Some(op)
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::LogOr => BinaryOp::LogOr,
        TokenKind::LogAnd => BinaryOp::LogAnd,
        TokenKind::Eql => BinaryOp::Eq,
        TokenKind::Neq => BinaryOp::Ne,
        TokenKind::Lss => BinaryOp::Lt,
        TokenKind::Leq => BinaryOp::Le,
        TokenKind::Gtr => BinaryOp::Gt,
        TokenKind::Geq => BinaryOp::Ge,
        TokenKind::Add => BinaryOp::Add,
        TokenKind::Sub => BinaryOp::Sub,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::Xor => BinaryOp::Xor,
        TokenKind::Mul => BinaryOp::Mul,
        TokenKind::Quo => BinaryOp::Quo,
        TokenKind::Rem => BinaryOp::Rem,
        TokenKind::Shl => BinaryOp::Shl,
        TokenKind::Shr => BinaryOp::Shr,
        TokenKind::And => BinaryOp::And,
        TokenKind::AndNot => BinaryOp::AndNot,
        _ => return None,
    };
    Some(op)
}
