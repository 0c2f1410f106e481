use crate::error::ConditionError;
use crate::value::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl Comparison {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Equal => "=",
            Comparison::NotEqual => "<>",
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn keyword(&self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
        }
    }
}

/// A node in a boolean filter expression, lowered to SQL text by
/// [`Condition::to_sql`].
///
/// Composite nodes are built through [`Condition::and`] / [`Condition::or`],
/// which require at least two children - a one-child group is a
/// configuration error, caught at construction rather than at render time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Condition {
    /// Null-object root: renders to empty text, so callers can pass a
    /// condition unconditionally and omit the WHERE clause without branching.
    #[default]
    Empty,
    Compare {
        column: String,
        op: Comparison,
        value: Value,
    },
    Group {
        op: Connective,
        children: Vec<Condition>,
    },
}

impl Condition {
    pub fn compare(column: impl Into<String>, op: Comparison, value: impl Into<Value>) -> Self {
        Condition::Compare { column: column.into(), op, value: value.into() }
    }

    pub fn equal(column: impl Into<String>, value: impl Into<Value>) -> Self { Self::compare(column, Comparison::Equal, value) }

    pub fn not_equal(column: impl Into<String>, value: impl Into<Value>) -> Self { Self::compare(column, Comparison::NotEqual, value) }

    pub fn greater(column: impl Into<String>, value: impl Into<Value>) -> Self { Self::compare(column, Comparison::Greater, value) }

    pub fn greater_or_equal(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, Comparison::GreaterOrEqual, value)
    }

    pub fn less(column: impl Into<String>, value: impl Into<Value>) -> Self { Self::compare(column, Comparison::Less, value) }

    pub fn less_or_equal(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, Comparison::LessOrEqual, value)
    }

    pub fn and(children: Vec<Condition>) -> Result<Self, ConditionError> { Self::group(Connective::And, children) }

    pub fn or(children: Vec<Condition>) -> Result<Self, ConditionError> { Self::group(Connective::Or, children) }

    fn group(op: Connective, children: Vec<Condition>) -> Result<Self, ConditionError> {
        if children.len() < 2 {
            return Err(ConditionError::TooFewConditions { connective: op.keyword(), got: children.len() });
        }
        Ok(Condition::Group { op, children })
    }

    /// Lower this tree to a SQL boolean expression fragment.
    ///
    /// Every composite node is wrapped in parentheses, so operator precedence
    /// is always explicit in the output.
    pub fn to_sql(&self) -> String {
        match self {
            Condition::Empty => String::new(),
            Condition::Compare { column, op, value } => format!("{} {} {}", column, op.as_sql(), value.encode()),
            Condition::Group { op, children } => {
                let connective = format!(" {} ", op.keyword());
                let joined = children.iter().map(|child| child.to_sql()).collect::<Vec<_>>().join(&connective);
                format!("({})", joined)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn empty_renders_to_nothing() {
        assert_eq!(Condition::Empty.to_sql(), "");
        assert_eq!(Condition::default().to_sql(), "");
    }

    #[test]
    fn comparisons() {
        assert_eq!(Condition::equal("id", 1).to_sql(), "id = 1");
        assert_eq!(Condition::not_equal("name", "bob").to_sql(), "name <> 'bob'");
        assert_eq!(Condition::greater("age", 30).to_sql(), "age > 30");
        assert_eq!(Condition::greater_or_equal("age", 30).to_sql(), "age >= 30");
        assert_eq!(Condition::less("score", 2.5).to_sql(), "score < 2.5");
        assert_eq!(Condition::less_or_equal("active", true).to_sql(), "active <= true");
    }

    #[test]
    fn and_joins_and_parenthesizes() -> Result<()> {
        let condition = Condition::and(vec![Condition::equal("id", 1), Condition::greater("age", 30)])?;
        assert_eq!(condition.to_sql(), "(id = 1 AND age > 30)");
        Ok(())
    }

    #[test]
    fn nested_groups_stay_balanced() -> Result<()> {
        let inner = Condition::or(vec![Condition::equal("name", "alice"), Condition::equal("name", "charlie")])?;
        let condition = Condition::and(vec![inner, Condition::greater_or_equal("age", 30), Condition::less_or_equal("age", 40)])?;
        assert_eq!(condition.to_sql(), "((name = 'alice' OR name = 'charlie') AND age >= 30 AND age <= 40)");
        Ok(())
    }

    #[test]
    fn n_leaves_produce_n_minus_one_connectives() -> Result<()> {
        for n in 2usize..6 {
            let leaves: Vec<Condition> = (0..n).map(|i| Condition::equal("id", i as i64)).collect();
            let sql = Condition::and(leaves)?.to_sql();
            assert_eq!(sql.matches(" AND ").count(), n - 1);
            assert_eq!(sql.matches('(').count(), sql.matches(')').count());
        }
        Ok(())
    }

    #[test]
    fn group_with_fewer_than_two_children_is_rejected() {
        let err = Condition::and(vec![Condition::equal("id", 1)]).expect_err("expected a configuration error");
        assert_eq!(err, ConditionError::TooFewConditions { connective: "AND", got: 1 });
        assert!(Condition::or(vec![]).is_err());
    }
}
