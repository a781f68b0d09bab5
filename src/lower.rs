//! Translation of the parser's syntax tree into [`Node`]s.
//!
//! This happens exactly once per statement, at the boundary with
//! the parser; scoring never looks at `sqlparser` types directly.

use sqlparser::ast as sql;
use crate::ast::{ Node, NodeKind, JoinKind, SetOperator, Connective };

pub trait Lower {
    fn lower(&self) -> Node;
}

fn lower_each<T: Lower>(items: &[T]) -> Vec<Node> {
    items.iter().map(Lower::lower).collect()
}

/// Wrap an optional filter condition into a clause node.
fn clause(kind: NodeKind, condition: Option<&sql::Expr>) -> Option<Node> {
    condition.map(|expr| Node::new(kind, vec![expr.lower()]))
}

impl Lower for sql::Statement {
    fn lower(&self) -> Node {
        let children = match *self {
            sql::Statement::Query(ref query) => vec![query.lower()],
            sql::Statement::Insert { ref source, .. } => vec![source.lower()],
            sql::Statement::CreateTable {
                query: Some(ref query),
                ..
            } => vec![query.lower()],
            sql::Statement::CreateView { ref query, .. } => vec![query.lower()],
            sql::Statement::Update {
                ref assignments,
                ref selection,
                ..
            } => {
                assignments
                    .iter()
                    .map(|assignment| assignment.value.lower())
                    .chain(clause(NodeKind::Where, selection.as_ref()))
                    .collect()
            }
            sql::Statement::Delete { ref selection, .. } => {
                clause(NodeKind::Where, selection.as_ref()).into_iter().collect()
            }
            // The wrapped statement is scored as if it stood alone.
            sql::Statement::Explain { ref statement, .. }
            | sql::Statement::Prepare { ref statement, .. } => vec![statement.lower()],
            // DDL, transaction control, SET, SHOW, ... carry
            // nothing that the assessment counts.
            _ => Vec::new(),
        };

        Node::new(NodeKind::Statement, children)
    }
}

impl Lower for sql::Query {
    fn lower(&self) -> Node {
        let mut children = Vec::new();

        if let Some(ref with) = self.with {
            children.extend(lower_each(&with.cte_tables));
        }

        children.push(self.body.lower());
        children.extend(lower_each(&self.order_by));
        children.extend(self.limit.as_ref().map(Lower::lower));
        children.extend(self.offset.as_ref().map(|offset| offset.value.lower()));
        children.extend(
            self.fetch
                .as_ref()
                .and_then(|fetch| fetch.quantity.as_ref())
                .map(Lower::lower)
        );

        Node::new(NodeKind::Query, children)
    }
}

impl Lower for sql::Cte {
    fn lower(&self) -> Node {
        // the alias and its column list are just names
        Node::new(NodeKind::Cte, vec![self.query.lower()])
    }
}

impl Lower for sql::SetExpr {
    fn lower(&self) -> Node {
        match *self {
            sql::SetExpr::Select(ref select) => select.lower(),
            sql::SetExpr::Query(ref query) => query.lower(),
            sql::SetExpr::SetOperation {
                ref op, ref left, ref right, .. // `SetOperator` is !Copy
            } => {
                let op = match *op {
                    sql::SetOperator::Union => SetOperator::Union,
                    sql::SetOperator::Intersect => SetOperator::Intersect,
                    sql::SetOperator::Except => SetOperator::Except,
                };

                Node::new(NodeKind::SetOperation(op), vec![left.lower(), right.lower()])
            }
            sql::SetExpr::Values(ref values) => {
                let fields = values.0
                    .iter()
                    .flat_map(|row| row.iter().map(Lower::lower))
                    .collect();

                Node::new(NodeKind::Other, fields)
            }
            sql::SetExpr::Insert(ref stmt) => stmt.lower(),
        }
    }
}

impl Lower for sql::Select {
    fn lower(&self) -> Node {
        let mut children: Vec<_> = self.top
            .iter()
            .flat_map(|top| top.quantity.iter().map(|quantity| quantity.lower()))
            .collect();

        children.extend(lower_each(&self.projection));
        children.extend(lower_each(&self.from));
        children.extend(self.lateral_views.iter().map(|view| view.lateral_view.lower()));
        children.extend(clause(NodeKind::Where, self.selection.as_ref()));

        if !self.group_by.is_empty() {
            children.push(Node::new(NodeKind::GroupBy, lower_each(&self.group_by)));
        }

        // Hive's CLUSTER BY, DISTRIBUTE BY, SORT BY are not GROUP BY
        children.extend(lower_each(&self.cluster_by));
        children.extend(lower_each(&self.distribute_by));
        children.extend(lower_each(&self.sort_by));
        children.extend(clause(NodeKind::Having, self.having.as_ref()));

        Node::new(NodeKind::Select, children)
    }
}

impl Lower for sql::SelectItem {
    fn lower(&self) -> Node {
        match *self {
            sql::SelectItem::UnnamedExpr(ref expr) => expr.lower(),
            sql::SelectItem::ExprWithAlias { ref expr, .. } => expr.lower(),
            sql::SelectItem::QualifiedWildcard(_) | sql::SelectItem::Wildcard => {
                Node::leaf(NodeKind::Other)
            }
        }
    }
}

impl Lower for sql::OrderByExpr {
    fn lower(&self) -> Node {
        self.expr.lower()
    }
}

impl Lower for sql::TableWithJoins {
    fn lower(&self) -> Node {
        let mut children = vec![self.relation.lower()];
        children.extend(lower_each(&self.joins));

        Node::new(NodeKind::Other, children)
    }
}

impl Lower for sql::TableFactor {
    fn lower(&self) -> Node {
        match *self {
            // Table-valued function arguments may hide subqueries.
            sql::TableFactor::Table { ref args, .. } => {
                Node::new(NodeKind::Other, lower_each(args))
            }
            sql::TableFactor::Derived { ref subquery, .. } => subquery.lower(),
            sql::TableFactor::TableFunction { ref expr, .. } => expr.lower(),
            sql::TableFactor::NestedJoin(ref inner) => inner.lower(),
        }
    }
}

impl Lower for sql::Join {
    fn lower(&self) -> Node {
        use sql::JoinOperator::*;

        let (kind, constraint) = match self.join_operator {
            Inner(ref c) => (JoinKind::Inner, Some(c)),
            LeftOuter(ref c) => (JoinKind::Left, Some(c)),
            RightOuter(ref c) => (JoinKind::Right, Some(c)),
            FullOuter(ref c) => (JoinKind::Full, Some(c)),
            CrossJoin => (JoinKind::Cross, None),
            CrossApply => (JoinKind::CrossApply, None),
            OuterApply => (JoinKind::OuterApply, None),
        };

        let mut children = vec![self.relation.lower()];

        // `USING (...)` and `NATURAL` only name columns
        if let Some(sql::JoinConstraint::On(ref expr)) = constraint {
            children.push(expr.lower());
        }

        Node::new(NodeKind::Join(kind), children)
    }
}

impl Lower for sql::Function {
    fn lower(&self) -> Node {
        let mut children = lower_each(&self.args);

        if let Some(ref over) = self.over {
            children.extend(lower_each(&over.partition_by));
            children.extend(lower_each(&over.order_by));
        }

        Node::new(NodeKind::Function, children)
    }
}

impl Lower for sql::FunctionArg {
    fn lower(&self) -> Node {
        match *self {
            sql::FunctionArg::Unnamed(ref arg) | sql::FunctionArg::Named { ref arg, .. } => {
                arg.lower()
            }
        }
    }
}

impl Lower for sql::Expr {
    fn lower(&self) -> Node {
        use sql::Expr::*;

        match *self {
            Identifier(_)
            | CompoundIdentifier(_)
            | QualifiedWildcard(_)
            | Wildcard
            | Value(_)
            | TypedString { .. } => Node::leaf(NodeKind::Other),

            // Parentheses are not a node of their own.
            Nested(ref inner) => inner.lower(),
            Subquery(ref query) => query.lower(),

            BinaryOp { ref left, ref op, ref right } => {
                Node::new(binary_kind(op), vec![left.lower(), right.lower()])
            }
            UnaryOp { ref op, ref expr } => {
                let kind = match *op {
                    sql::UnaryOperator::Not => NodeKind::Connective(Connective::Not),
                    _ => NodeKind::Other,
                };

                Node::new(kind, vec![expr.lower()])
            }

            IsNull(ref expr) | IsNotNull(ref expr) => {
                Node::new(NodeKind::Condition, vec![expr.lower()])
            }
            InList { ref expr, ref list, .. } => {
                let mut children = vec![expr.lower()];
                children.extend(lower_each(list));

                Node::new(NodeKind::Condition, children)
            }
            InSubquery { ref expr, ref subquery, .. } => {
                Node::new(NodeKind::Condition, vec![expr.lower(), subquery.lower()])
            }
            Between { ref expr, ref low, ref high, .. } => {
                Node::new(NodeKind::Condition, vec![expr.lower(), low.lower(), high.lower()])
            }
            Exists(ref query) => Node::new(NodeKind::Condition, vec![query.lower()]),

            Case {
                ref operand,
                ref conditions,
                ref results,
                ref else_result,
            } => {
                let mut children: Vec<_> = operand.as_deref().map(Lower::lower).into_iter().collect();

                for (cond, res) in conditions.iter().zip(results) {
                    children.push(cond.lower());
                    children.push(res.lower());
                }

                children.extend(else_result.as_deref().map(Lower::lower));

                Node::new(NodeKind::Case, children)
            }

            Function(ref func) => func.lower(),
            // `SUBSTRING`, `EXTRACT`, and `LISTAGG` have their own
            // syntax, but they are function calls all the same.
            Substring {
                ref expr,
                ref substring_from,
                ref substring_for,
            } => {
                let mut children = vec![expr.lower()];
                children.extend(substring_from.as_deref().map(Lower::lower));
                children.extend(substring_for.as_deref().map(Lower::lower));

                Node::new(NodeKind::Function, children)
            }
            Extract { ref expr, .. } => Node::new(NodeKind::Function, vec![expr.lower()]),
            ListAgg(ref agg) => agg.lower(),

            Cast { ref expr, .. }
            | Collate { ref expr, .. }
            | MapAccess { column: ref expr, .. } => {
                Node::new(NodeKind::Other, vec![expr.lower()])
            }
        }
    }
}

impl Lower for sql::ListAgg {
    fn lower(&self) -> Node {
        let mut children = vec![self.expr.lower()];

        children.extend(self.separator.iter().map(|sep| sep.lower()));

        if let Some(sql::ListAggOnOverflow::Truncate { ref filler, .. }) = self.on_overflow {
            children.extend(filler.iter().map(|filler| filler.lower()));
        }

        children.extend(lower_each(&self.within_group));

        Node::new(NodeKind::Function, children)
    }
}

fn binary_kind(op: &sql::BinaryOperator) -> NodeKind {
    use sql::BinaryOperator::*;

    match *op {
        And => NodeKind::Connective(Connective::And),
        Or => NodeKind::Connective(Connective::Or),
        Eq | NotEq | Lt | LtEq | Gt | GtEq | Like | NotLike => NodeKind::Comparison,
        _ => NodeKind::Other,
    }
}
