//! Per-category weights for turning a [`Score`] into a single number.

use std::str::FromStr;
use crate::{
    error::SqlError,
    score::{ Category, Score },
};

/// Weight applied to each category's count.
/// The default weighs every construct equally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComplexityRules {
    pub per_join: usize,
    pub per_where_predicate: usize,
    pub per_cte: usize,
    pub per_group_by_expr: usize,
    pub per_set_operation: usize,
    pub per_function: usize,
    pub per_case: usize,
}

impl Default for ComplexityRules {
    fn default() -> Self {
        ComplexityRules {
            per_join: 1,
            per_where_predicate: 1,
            per_cte: 1,
            per_group_by_expr: 1,
            per_set_operation: 1,
            per_function: 1,
            per_case: 1,
        }
    }
}

impl ComplexityRules {
    /// Names accepted by `FromStr`.
    pub const PRESETS: [&'static str; 3] = ["default", "strict", "lenient"];

    /// Function calls and CASE expressions count double.
    pub fn strict() -> Self {
        ComplexityRules {
            per_function: 2,
            per_case: 2,
            ..Self::default()
        }
    }

    /// Joins and function calls are free.
    pub fn lenient() -> Self {
        ComplexityRules {
            per_join: 0,
            per_function: 0,
            ..Self::default()
        }
    }

    pub fn weight(&self, category: Category) -> usize {
        use Category::*;

        match category {
            Joins           => self.per_join,
            WherePredicates => self.per_where_predicate,
            Ctes            => self.per_cte,
            GroupBy         => self.per_group_by_expr,
            SetOperations   => self.per_set_operation,
            FunctionCalls   => self.per_function,
            CaseExpressions => self.per_case,
        }
    }

    /// Weighted sum of the score's counts.
    pub fn weigh(&self, score: &Score) -> usize {
        score
            .iter()
            .map(|(category, count)| count * self.weight(category))
            .sum()
    }
}

impl FromStr for ComplexityRules {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::default()),
            "strict"  => Ok(Self::strict()),
            "lenient" => Ok(Self::lenient()),
            _ => Err(SqlError::Rules(s.to_owned())),
        }
    }
}
