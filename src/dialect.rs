use std::fmt;
use std::str::FromStr;
use sqlparser::dialect::{
    Dialect,
    AnsiDialect,
    GenericDialect,
    MsSqlDialect,
    MySqlDialect,
    PostgreSqlDialect,
    SQLiteDialect,
    SnowflakeDialect,
};
use crate::error::SqlError;

/// Enum for moving the choice of SQL dialect
/// from compile-time to runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SqlDialect {
    Ansi,
    Generic,
    MsSql,
    MySql,
    PostgreSql,
    SQLite,
    Snowflake,
}

impl SqlDialect {
    /// Every dialect, in the order they are listed in `--help`.
    pub const ALL: [SqlDialect; 7] = [
        SqlDialect::Ansi,
        SqlDialect::Generic,
        SqlDialect::MsSql,
        SqlDialect::MySql,
        SqlDialect::PostgreSql,
        SqlDialect::SQLite,
        SqlDialect::Snowflake,
    ];

    /// The name accepted on the command line.
    pub fn name(self) -> &'static str {
        use SqlDialect::*;

        match self {
            Ansi       => "ansi",
            Generic    => "generic",
            MsSql      => "mssql",
            MySql      => "mysql",
            PostgreSql => "postgresql",
            SQLite     => "sqlite",
            Snowflake  => "snowflake",
        }
    }

    /// Runs `f` against the parser's own dialect object.
    fn with_inner<R>(self, f: impl FnOnce(&dyn Dialect) -> R) -> R {
        use SqlDialect::*;

        match self {
            Ansi       => f(&AnsiDialect {}),
            Generic    => f(&GenericDialect),
            MsSql      => f(&MsSqlDialect {}),
            MySql      => f(&MySqlDialect {}),
            PostgreSql => f(&PostgreSqlDialect {}),
            SQLite     => f(&SQLiteDialect {}),
            Snowflake  => f(&SnowflakeDialect),
        }
    }
}

impl Default for SqlDialect {
    fn default() -> Self {
        SqlDialect::Generic
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SqlDialect {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();

        SqlDialect::ALL
            .iter()
            .copied()
            .find(|dialect| dialect.name() == wanted)
            .ok_or_else(|| SqlError::Dialect(s.to_owned()))
    }
}

impl Dialect for SqlDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        self.with_inner(|d| d.is_identifier_start(ch))
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        self.with_inner(|d| d.is_identifier_part(ch))
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        self.with_inner(|d| d.is_delimited_identifier_start(ch))
    }
}
