//! The complexity assessment proper: one walk over the tree,
//! tallying every construct that makes a statement harder to read.

use tracing::trace;
use crate::{
    ast::{ Node, NodeKind, SetOperator },
    dialect::SqlDialect,
    error::ParseError,
    parse::parse_tree,
    rules::ComplexityRules,
    score::{ Category, Counts, Score },
};

/// Scores SQL statements. Holds no state between calls,
/// so a single instance can be shared freely across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Assessor {
    dialect: SqlDialect,
    rules: ComplexityRules,
}

impl Assessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialect(self, dialect: SqlDialect) -> Self {
        Assessor { dialect, ..self }
    }

    pub fn with_rules(self, rules: ComplexityRules) -> Self {
        Assessor { rules, ..self }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    pub fn rules(&self) -> &ComplexityRules {
        &self.rules
    }

    /// Parse exactly one statement and score it.
    pub fn assess(&self, sql: &str) -> Result<Score, ParseError> {
        let node = parse_tree(sql, self.dialect)?;
        let score = assess_node(&node);

        trace!(total = score.total(), "assessed statement");

        Ok(score)
    }

    /// The score's total, weighted according to this assessor's rules.
    pub fn weigh(&self, score: &Score) -> usize {
        self.rules.weigh(score)
    }
}

/// Score a statement using the generic dialect.
pub fn assess(sql: &str) -> Result<Score, ParseError> {
    Assessor::new().assess(sql)
}

/// Score an already-lowered tree.
pub fn assess_node(node: &Node) -> Score {
    let mut walker = Walker::default();
    walker.visit(node, Position::Anywhere);
    Score::from_counts(walker.counts)
}

/// Where a node sits relative to the nearest filter clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    /// The condition of a WHERE or HAVING clause,
    /// or an operand of a connective in such a position.
    Predicate,
    Anywhere,
}

#[derive(Clone, Default, Debug)]
struct Walker {
    counts: Counts,
}

impl Walker {
    fn visit(&mut self, node: &Node, position: Position) {
        use NodeKind::*;

        // Connectives and leaf conditions alike; a leaf's
        // own sub-expressions are no longer predicates.
        if position == Position::Predicate {
            self.counts.add(Category::WherePredicates, 1);
        }

        let mut inner = Position::Anywhere;

        match node.kind {
            Join(_) => self.counts.add(Category::Joins, 1),
            Cte => self.counts.add(Category::Ctes, 1),
            GroupBy => self.counts.add(Category::GroupBy, node.children.len()),
            SetOperation(SetOperator::Union) | SetOperation(SetOperator::Intersect) => {
                self.counts.add(Category::SetOperations, 1)
            }
            SetOperation(SetOperator::Except) => {}
            Function => self.counts.add(Category::FunctionCalls, 1),
            Case => self.counts.add(Category::CaseExpressions, 1),
            Where | Having => inner = Position::Predicate,
            Connective(_) => inner = position,
            Statement | Query | Select | Comparison | Condition | Other => {}
        }

        for child in &node.children {
            self.visit(child, inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(sql: &str) -> Score {
        assess(sql).unwrap()
    }

    #[test]
    fn connectives_and_leaves_are_all_predicates() {
        let s = score("SELECT * FROM t WHERE a = 1 AND b = 2 OR c = 3");

        assert_eq!(s.where_predicates(), 5);
        assert_eq!(s.total(), 5);
    }

    #[test]
    fn negation_counts_as_a_connective() {
        let s = score("SELECT a FROM t WHERE NOT (a = 1 OR b = 2)");

        assert_eq!(s.where_predicates(), 4);
    }

    #[test]
    fn compound_conditions_are_single_leaves() {
        let s = score("SELECT * FROM t WHERE a BETWEEN 1 AND 5 AND b LIKE 'x%'");
        assert_eq!(s.where_predicates(), 3);

        let s = score("SELECT * FROM t WHERE a IN (1, 2, 3)");
        assert_eq!(s.where_predicates(), 1);
    }

    #[test]
    fn subquery_filters_are_counted_once() {
        let s = score("SELECT a FROM t WHERE a IN (SELECT b FROM u WHERE c = 1)");
        assert_eq!(s.where_predicates(), 2);

        let s = score(
            "SELECT a FROM t WHERE EXISTS (SELECT 1 FROM u WHERE u.id = t.id AND u.x > 0)"
        );
        assert_eq!(s.where_predicates(), 4);
        assert_eq!(s.total(), 4);
    }

    #[test]
    fn bare_function_condition_counts_twice() {
        let s = score("SELECT a FROM t WHERE is_active(a)");

        assert_eq!(s.where_predicates(), 1);
        assert_eq!(s.function_calls(), 1);
        assert_eq!(s.total(), 2);
    }

    #[test]
    fn having_is_a_filter_too() {
        let s = score("SELECT a, COUNT(*) FROM t GROUP BY a HAVING COUNT(*) > 1 AND MAX(b) < 10");

        assert_eq!(s.where_predicates(), 3);
        assert_eq!(s.function_calls(), 3);
        assert_eq!(s.group_by(), 1);
        assert_eq!(s.total(), 7);
    }

    #[test]
    fn case_in_where_is_a_leaf() {
        let s = score("SELECT a FROM t WHERE CASE WHEN a > 1 THEN TRUE ELSE FALSE END");

        assert_eq!(s.where_predicates(), 1);
        assert_eq!(s.case_expressions(), 1);
        assert_eq!(s.total(), 2);
    }

    #[test]
    fn nested_function_calls_are_counted_separately() {
        let s = score("SELECT UPPER(TRIM(LOWER(name))) FROM t");

        assert_eq!(s.function_calls(), 3);
    }

    #[test]
    fn window_functions_are_function_calls() {
        let s = score("SELECT ROW_NUMBER() OVER (PARTITION BY a ORDER BY b) FROM t");

        assert_eq!(s.function_calls(), 1);
        assert_eq!(s.total(), 1);
    }

    #[test]
    fn except_is_not_a_set_operation() {
        let s = score("SELECT a FROM t EXCEPT SELECT a FROM u");

        assert_eq!(s, Score::default());
    }

    #[test]
    fn every_join_flavor_counts() {
        let s = score(
            "SELECT * FROM a JOIN b ON a.id = b.id LEFT JOIN c ON b.id = c.id CROSS JOIN d"
        );

        assert_eq!(s.joins(), 3);
        // join conditions are not filters
        assert_eq!(s.where_predicates(), 0);
    }

    #[test]
    fn derived_tables_are_scored() {
        let s = score("SELECT * FROM (SELECT a FROM t WHERE a = 1) AS s JOIN u ON s.a = u.a");

        assert_eq!(s.joins(), 1);
        assert_eq!(s.where_predicates(), 1);
        assert_eq!(s.total(), 2);
    }

    #[test]
    fn every_cte_counts() {
        let s = score("WITH a AS (SELECT 1), b AS (SELECT * FROM a) SELECT * FROM b");

        assert_eq!(s.ctes(), 2);
    }

    #[test]
    fn ordering_and_limits_are_free() {
        assert_eq!(score("SELECT a FROM t ORDER BY a LIMIT 10"), Score::default());
    }

    #[test]
    fn update_is_scored() {
        let s = score("UPDATE t SET a = UPPER(b) WHERE c = 1 OR d = 2");

        assert_eq!(s.function_calls(), 1);
        assert_eq!(s.where_predicates(), 3);
    }

    #[test]
    fn wrapped_statements_are_scored() {
        let s = score("EXPLAIN SELECT * FROM a JOIN b ON a.id = b.id WHERE a.x = 1");

        assert_eq!(s.joins(), 1);
        assert_eq!(s.where_predicates(), 1);
        assert_eq!(s.total(), 2);

        let s = score("PREPARE q AS SELECT UPPER(a) FROM t WHERE a = 1");

        assert_eq!(s.function_calls(), 1);
        assert_eq!(s.where_predicates(), 1);
    }

    #[test]
    fn functions_in_listagg_clauses_are_counted() {
        let s = score("SELECT LISTAGG(a, UPPER(c)) WITHIN GROUP (ORDER BY UPPER(b)) FROM t");

        assert_eq!(s.function_calls(), 3);
    }

    #[test]
    fn functions_in_hive_clauses_are_counted() {
        assert_eq!(score("SELECT * FROM t LATERAL VIEW explode(arr) x AS y").function_calls(), 1);
        assert_eq!(score("SELECT a FROM t CLUSTER BY UPPER(a)").function_calls(), 1);
        assert_eq!(score("SELECT a FROM t DISTRIBUTE BY LOWER(a)").function_calls(), 1);

        let s = score("SELECT a FROM t SORT BY UPPER(a)");
        assert_eq!(s.function_calls(), 1);
        assert_eq!(s.group_by(), 0);
    }

    #[test]
    fn functions_in_top_are_counted() {
        let s = Assessor::new()
            .with_dialect(SqlDialect::MsSql)
            .assess("SELECT TOP (ABS(5)) a FROM t")
            .unwrap();

        assert_eq!(s.function_calls(), 1);
        assert_eq!(s.total(), 1);
    }

    #[test]
    fn parse_errors_are_propagated() {
        assert!(matches!(assess("SELEC 1"), Err(ParseError::Parser(_))));
    }

    #[test]
    fn tokenizer_errors_are_propagated() {
        let err = assess("SELECT 'abc").unwrap_err();

        assert!(matches!(err, ParseError::Tokenizer(_)));
        assert!(err.to_string().starts_with("tokenizer error at line 1 char 8:"));
    }

    #[test]
    fn builder_keeps_the_other_setting() {
        let assessor = Assessor::new()
            .with_rules(ComplexityRules::strict())
            .with_dialect(SqlDialect::MsSql);

        assert_eq!(assessor.dialect(), SqlDialect::MsSql);
        assert_eq!(*assessor.rules(), ComplexityRules::strict());
    }

    #[test]
    fn hand_built_trees_are_scored_by_kind() {
        let tree = Node::new(NodeKind::Statement, vec![
            Node::new(NodeKind::Where, vec![
                Node::new(NodeKind::Connective(crate::ast::Connective::And), vec![
                    Node::leaf(NodeKind::Comparison),
                    Node::new(NodeKind::Function, vec![Node::leaf(NodeKind::Other)]),
                ]),
            ]),
            Node::new(NodeKind::GroupBy, vec![
                Node::leaf(NodeKind::Other),
                Node::leaf(NodeKind::Other),
            ]),
        ]);

        let s = assess_node(&tree);

        assert_eq!(s.where_predicates(), 3);
        assert_eq!(s.function_calls(), 1);
        assert_eq!(s.group_by(), 2);
        assert_eq!(s.total(), 6);
    }
}
