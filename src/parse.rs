//! Raw SQL text in, exactly one statement out.

use sqlparser::{
    tokenizer::{ Tokenizer, Token },
    parser::{ Parser, ParserError },
    ast::Statement,
};
use tracing::debug;
use crate::{
    ast::Node,
    dialect::SqlDialect,
    error::ParseError,
    lower::Lower,
};

/// Replace argument placeholders with literal zero.
///
/// This doesn't even affect the character count, so it won't
/// affect the structure of the statement either. It also
/// replaces question marks inside string literals, but the
/// contents of a literal never contribute to the score.
pub fn replace_placeholders(sql: &str) -> String {
    sql.replace('?', "0")
}

/// Split a SQL statement into tokens.
fn tokenize(sql: &str, dialect: SqlDialect) -> Result<Vec<Token>, ParseError> {
    Tokenizer::new(&dialect, sql).tokenize().map_err(ParseError::from)
}

/// Parse a SQL statement. Only a single statement is supported.
pub fn parse_statement(sql: &str, dialect: SqlDialect) -> Result<Statement, ParseError> {
    let sql = replace_placeholders(sql);
    let tokens = tokenize(&sql, dialect)?;

    debug!(%dialect, tokens = tokens.len(), "parsing statement");

    let mut parser = Parser::new(tokens, &dialect);
    let stmt = parser.parse_statement()?;

    // skip trailing semicolon, if any
    let _ = parser.consume_token(&Token::SemiColon);

    if parser.peek_token() == Token::EOF {
        Ok(stmt)
    } else {
        Err(ParserError::ParserError("got multiple statements".into()).into())
    }
}

/// Parse a single statement and translate it into the scoring tree.
pub fn parse_tree(sql: &str, dialect: SqlDialect) -> Result<Node, ParseError> {
    let stmt = parse_statement(sql, dialect)?;
    let node = stmt.lower();

    debug!(nodes = node.iter().count(), "lowered statement");

    Ok(node)
}
