//! A small, closed syntax tree holding only the distinctions
//! that complexity scoring cares about. Everything else the
//! parser knows about collapses into `NodeKind::Other`.

/// The flavor of a join.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
    CrossApply,
    OuterApply,
}

/// Statement-combining operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

/// Boolean connectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a lowered statement.
    Statement,
    Query,
    Select,
    /// One common table expression definition.
    Cte,
    /// Holds exactly one child: the filter condition.
    Where,
    /// Holds exactly one child: the filter condition.
    Having,
    /// Children are the grouping expressions, in order.
    GroupBy,
    Join(JoinKind),
    SetOperation(SetOperator),
    /// Any function invocation, scalar or aggregate.
    Function,
    Case,
    Connective(Connective),
    /// `=`, `<>`, `<`, `>`, `<=`, `>=`, `LIKE`, `NOT LIKE`.
    Comparison,
    /// `IS [NOT] NULL`, `[NOT] IN`, `[NOT] BETWEEN`, `EXISTS`.
    Condition,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Node { kind, children }
    }

    pub fn leaf(kind: NodeKind) -> Self {
        Node::new(kind, Vec::new())
    }

    /// Pre-order traversal over this node and all of its descendants.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }
}

/// Iterator returned by [`Node::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        // push in reverse so that the leftmost child comes out first
        self.stack.extend(node.children.iter().rev());

        Some(node)
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
