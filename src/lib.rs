//! Estimates how hard a SQL statement is to read by counting
//! joins, filter predicates, CTEs, grouping expressions, set
//! operations, function calls, and CASE expressions in its syntax tree.
//!
//! ```
//! let score = sql_complexity::assess("SELECT a FROM t JOIN u ON t.id = u.id WHERE t.x = 1")?;
//!
//! assert_eq!(score.joins(), 1);
//! assert_eq!(score.where_predicates(), 1);
//! assert_eq!(score.total(), 2);
//! # Ok::<(), sql_complexity::ParseError>(())
//! ```

pub mod ast;
pub mod dialect;
pub mod error;
pub mod lower;
pub mod parse;
pub mod rules;
pub mod score;
mod assess;

pub use assess::{ assess, assess_node, Assessor };
pub use dialect::SqlDialect;
pub use error::{ ParseError, SqlError };
pub use rules::ComplexityRules;
pub use score::{ Category, Score };
