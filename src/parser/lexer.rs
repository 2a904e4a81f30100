//! Tokenizer for the supported Go subset.
//!
//! Newlines are significant only through automatic semicolon insertion: a
//! newline (or a block comment spanning lines) ends the statement when the
//! preceding token can end one. The parser never sees newline tokens.

use crate::parser::error::{line_col, ParseError, ParseErrorKind};
use logos::Logos;
use std::fmt;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum TokenKind {
    // Keywords
    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("chan")]
    Chan,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("defer")]
    Defer,
    #[token("else")]
    Else,
    #[token("fallthrough")]
    Fallthrough,
    #[token("for")]
    For,
    #[token("func")]
    Func,
    #[token("go")]
    Go,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("import")]
    Import,
    #[token("interface")]
    Interface,
    #[token("map")]
    Map,
    #[token("package")]
    Package,
    #[token("range")]
    Range,
    #[token("return")]
    Return,
    #[token("select")]
    Select,
    #[token("struct")]
    Struct,
    #[token("switch")]
    Switch,
    #[token("type")]
    Type,
    #[token("var")]
    Var,

    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Ident,

    // Literals
    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    #[regex(r"0[oO][0-7_]+")]
    Int,
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+")]
    Float,
    #[regex(r"[0-9][0-9_]*i")]
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?i")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?i")]
    Imag,
    #[regex(r"'([^'\\\n]|\\[^\n])+'")]
    Char,
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    #[regex(r"`[^`]*`")]
    String,

    // Operators and punctuation
    #[token("+")]
    Add,
    #[token("-")]
    Sub,
    #[token("*")]
    Mul,
    #[token("/")]
    Quo,
    #[token("%")]
    Rem,
    #[token("&")]
    And,
    #[token("|")]
    Or,
    #[token("^")]
    Xor,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&^")]
    AndNot,
    #[token("+=")]
    AddAssign,
    #[token("-=")]
    SubAssign,
    #[token("*=")]
    MulAssign,
    #[token("/=")]
    QuoAssign,
    #[token("%=")]
    RemAssign,
    #[token("&=")]
    AndAssign,
    #[token("|=")]
    OrAssign,
    #[token("^=")]
    XorAssign,
    #[token("<<=")]
    ShlAssign,
    #[token(">>=")]
    ShrAssign,
    #[token("&^=")]
    AndNotAssign,
    #[token("&&")]
    LogAnd,
    #[token("||")]
    LogOr,
    #[token("<-")]
    Arrow,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("==")]
    Eql,
    #[token("<")]
    Lss,
    #[token(">")]
    Gtr,
    #[token("=")]
    Assign,
    #[token("!")]
    Not,
    #[token("~")]
    Tilde,
    #[token("!=")]
    Neq,
    #[token("<=")]
    Leq,
    #[token(">=")]
    Geq,
    #[token(":=")]
    Define,
    #[token("...")]
    Ellipsis,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Period,
    #[token(":")]
    Colon,

    #[token("\n")]
    Newline,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,
}

impl TokenKind {
    /// Whether a newline directly after this token terminates the statement
    fn ends_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Imag
                | TokenKind::Char
                | TokenKind::String
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Fallthrough
                | TokenKind::Return
                | TokenKind::Inc
                | TokenKind::Dec
                | TokenKind::RParen
                | TokenKind::RBrack
                | TokenKind::RBrace
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int | TokenKind::Float | TokenKind::Imag => "number",
            TokenKind::Char => "rune literal",
            TokenKind::String => "string literal",
            TokenKind::Newline => "newline",
            TokenKind::BlockComment => "comment",
            other => return write!(f, "{:?}", other),
        };
        f.write_str(name)
    }
}

/// A token with its source text and byte span
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

impl Token {
    /// Human-readable description for diagnostics
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Semicolon if self.text == "\n" => "newline".to_string(),
            TokenKind::Ident | TokenKind::Int | TokenKind::Float | TokenKind::Imag => {
                format!("{} {}", self.kind, self.text)
            }
            TokenKind::Char | TokenKind::String => format!("{} {}", self.kind, self.text),
            _ => format!("'{}'", self.text),
        }
    }
}

/// Split `source` into tokens, inserting semicolons where Go would.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(kind) => kind,
            Err(()) => {
                let (line, column) = line_col(source, span.start);
                return Err(ParseError::new(
                    ParseErrorKind::InvalidCharacter(text.to_string()),
                    line,
                    column,
                ));
            }
        };

        match kind {
            TokenKind::Newline => insert_semicolon(&mut tokens, span),
            TokenKind::BlockComment => {
                if text.contains('\n') {
                    insert_semicolon(&mut tokens, span);
                }
            }
            _ => tokens.push(Token {
                kind,
                text: text.to_string(),
                span,
            }),
        }
    }

    insert_semicolon(&mut tokens, source.len()..source.len());
    Ok(tokens)
}

fn insert_semicolon(tokens: &mut Vec<Token>, span: Range<usize>) {
    if tokens.last().is_some_and(|last| last.kind.ends_statement()) {
        tokens.push(Token {
            kind: TokenKind::Semicolon,
            text: "\n".to_string(),
            span,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_semicolon_inserted_after_identifier() {
        assert_eq!(
            kinds("package test\n"),
            vec![TokenKind::Package, TokenKind::Ident, TokenKind::Semicolon]
        );
    }

    #[test]
    fn test_no_semicolon_after_open_brace() {
        assert_eq!(
            kinds("func f() {\n}"),
            vec![
                TokenKind::Func,
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(
            kinds("1 0x1F 1.5 .5 1e9 2i 'a' `raw`"),
            vec![
                TokenKind::Int,
                TokenKind::Int,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Imag,
                TokenKind::Char,
                TokenKind::String,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_string_keeps_quotes_and_escapes() {
        let tokens = tokenize(r#"x := "a\"b""#).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].text, r#""a\"b""#);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("a // trailing\n/* block */ b"),
            vec![
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Ident,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_multiline_block_comment_acts_as_newline() {
        assert_eq!(
            kinds("a /* one\ntwo */ b"),
            vec![
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Ident,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_compound_operators() {
        assert_eq!(
            kinds("a &^= b"),
            vec![
                TokenKind::Ident,
                TokenKind::AndNotAssign,
                TokenKind::Ident,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_invalid_character_reports_position() {
        let err = tokenize("package x\n@").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidCharacter("@".to_string()));
        assert_eq!((err.line, err.column), (2, 1));
    }
}
