use thiserror::Error;

/// What went wrong while turning source text into a tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken { found: String, expected: String },

    #[error("unexpected end of file, expected {0}")]
    UnexpectedEof(String),

    #[error("invalid character {0:?}")]
    InvalidCharacter(String),

    #[error("expected expression, found {0}")]
    ExpectedExpression(String),

    #[error("expected type, found {0}")]
    ExpectedType(String),

    #[error("mixed named and unnamed parameters")]
    MixedParameters,

    #[error("{0} is not supported")]
    Unsupported(String),

    #[error("nesting exceeds {0} levels")]
    NestingTooDeep(usize),
}

/// A parse failure with the 1-based position it was detected at
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{line}:{column}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}

/// 1-based line and column (in characters) of a byte offset
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_first_line() {
        assert_eq!(line_col("package x", 0), (1, 1));
        assert_eq!(line_col("package x", 8), (1, 9));
    }

    #[test]
    fn test_line_col_after_newlines() {
        let src = "package x\nfunc f() {\n\t@\n}";
        let at = src.find('@').unwrap();
        assert_eq!(line_col(src, at), (3, 2));
    }

    #[test]
    fn test_display_includes_position() {
        let err = ParseError::new(ParseErrorKind::UnexpectedEof("'}'".to_string()), 4, 1);
        assert_eq!(err.to_string(), "4:1: unexpected end of file, expected '}'");
    }
}
