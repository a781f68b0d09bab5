use std::io;
use sqlparser::{
    tokenizer::TokenizerError,
    parser::ParserError,
};
use thiserror::Error;

/// The input could not be turned into a single SQL statement.
/// This is the only way scoring can fail.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("tokenizer error at line {} char {}: {}", .0.line, .0.col, .0.message)]
    Tokenizer(TokenizerError),
    #[error(transparent)]
    Parser(#[from] ParserError),
}

impl From<TokenizerError> for ParseError {
    fn from(error: TokenizerError) -> Self {
        ParseError::Tokenizer(error)
    }
}

/// Errors surfaced by the command-line tool.
#[derive(Debug, Error)]
pub enum SqlError {
    #[error(transparent)]
    IO(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("failed to parse SQL: {0}")]
    Parse(#[from] ParseError),
    #[error("unrecognized dialect: `{0}`")]
    Dialect(String),
    #[error("unrecognized rule preset: `{0}`")]
    Rules(String),
    #[error("unrecognized output format: `{0}`")]
    Format(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_error_is_not_reworded() {
        let inner = ParserError::ParserError("Expected an SQL statement".into());
        let err = ParseError::from(inner);

        assert!(err.to_string().contains("Expected an SQL statement"));
        assert!(matches!(err, ParseError::Parser(_)));
    }

    #[test]
    fn tokenizer_error_reports_its_position() {
        let inner = TokenizerError {
            message: "Unterminated string literal".into(),
            line: 3,
            col: 14,
        };
        let err = ParseError::from(inner);

        assert!(matches!(err, ParseError::Tokenizer(_)));
        assert_eq!(err.to_string(), "tokenizer error at line 3 char 14: Unterminated string literal");

        let err = SqlError::from(err);
        assert_eq!(
            err.to_string(),
            "failed to parse SQL: tokenizer error at line 3 char 14: Unterminated string literal"
        );
    }

    #[test]
    fn cli_error_names_the_bad_value() {
        let err = SqlError::Dialect("oracle".into());
        assert_eq!(err.to_string(), "unrecognized dialect: `oracle`");

        let err = SqlError::Rules("harsh".into());
        assert_eq!(err.to_string(), "unrecognized rule preset: `harsh`");
    }
}
