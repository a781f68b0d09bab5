use std::fmt;
use serde::ser::{ Serialize, Serializer, SerializeMap };

/// The kinds of construct that contribute to the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Joins,
    WherePredicates,
    Ctes,
    GroupBy,
    SetOperations,
    FunctionCalls,
    CaseExpressions,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Joins,
        Category::WherePredicates,
        Category::Ctes,
        Category::GroupBy,
        Category::SetOperations,
        Category::FunctionCalls,
        Category::CaseExpressions,
    ];

    /// Machine-readable key, as used in JSON output.
    pub fn key(self) -> &'static str {
        use Category::*;

        match self {
            Joins           => "joins",
            WherePredicates => "where_predicates",
            Ctes            => "ctes",
            GroupBy         => "group_by",
            SetOperations   => "set_operations",
            FunctionCalls   => "function_calls",
            CaseExpressions => "case_expressions",
        }
    }

    /// Human-readable label, as used in the text report.
    pub fn label(self) -> &'static str {
        use Category::*;

        match self {
            Joins           => "Joins",
            WherePredicates => "WHERE/HAVING Predicates",
            Ctes            => "CTEs",
            GroupBy         => "GROUP BY Expressions",
            SetOperations   => "Set Operations",
            FunctionCalls   => "Function Calls",
            CaseExpressions => "CASE Expressions",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Mutable tallies, only alive during a single walk.
#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct Counts([usize; 7]);

impl Counts {
    pub(crate) fn add(&mut self, category: Category, n: usize) {
        self.0[category.index()] += n;
    }
}

/// Breakdown of the complexity of one statement.
///
/// Two scores are equal when all of their counts are equal.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct Score {
    counts: [usize; 7],
    total: usize,
}

impl Score {
    /// Freeze the tallies of a finished walk.
    pub(crate) fn from_counts(Counts(counts): Counts) -> Self {
        Score {
            counts,
            total: counts.iter().sum(),
        }
    }

    pub fn get(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    /// Sum of all category counts.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn joins(&self) -> usize {
        self.get(Category::Joins)
    }

    pub fn where_predicates(&self) -> usize {
        self.get(Category::WherePredicates)
    }

    pub fn ctes(&self) -> usize {
        self.get(Category::Ctes)
    }

    pub fn group_by(&self) -> usize {
        self.get(Category::GroupBy)
    }

    pub fn set_operations(&self) -> usize {
        self.get(Category::SetOperations)
    }

    pub fn function_calls(&self) -> usize {
        self.get(Category::FunctionCalls)
    }

    pub fn case_expressions(&self) -> usize {
        self.get(Category::CaseExpressions)
    }

    /// Every category along with its count, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.iter().map(move |&category| (category, self.get(category)))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Complexity Score: {}", self.total)?;

        for (category, count) in self.iter() {
            write!(f, "\n  {}: {}", category.label(), count)?;
        }

        Ok(())
    }
}

/// Serializes as a flat map of category keys, followed by `total`.
impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::ALL.len() + 1))?;

        for (category, count) in self.iter() {
            map.serialize_entry(category.key(), &count)?;
        }

        map.serialize_entry("total", &self.total)?;
        map.end()
    }
}
