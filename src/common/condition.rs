use crate::{
    common::{self, path},
    error::Result,
};

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::{collections, ops};

/// Logical operator for combining conditions.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LogicalOperator {
    /// All conditions must hold.
    #[default]
    And,
    /// At least one condition must hold.
    Or,
}

impl ops::Deref for LogicalOperator {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// Left-hand side of a condition.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// The attribute itself.
    Path(path::AttributePath),
    /// The size of the attribute: string length, binary length, or element count.
    Size(path::AttributePath),
}

impl Operand {
    fn path(&self) -> &path::AttributePath {
        match self {
            Self::Path(path) | Self::Size(path) => path,
        }
    }

    fn to_expression(&self) -> common::ExpressionInput {
        match self {
            Self::Path(path) => path.to_expression(),
            Self::Size(path) => {
                let mut operation = path.to_expression();
                operation.expression = format!("size({})", operation.expression);
                operation
            }
        }
    }
}

/// Comparison applied to an operand.
///
/// ```rust
/// use dynamodb_movies::common::condition::Comparison;
///
/// let le = Comparison::LessThanOrEqual(7.5);
/// let range = Comparison::Between("A", "L");
/// let exists: Comparison<()> = Comparison::Exists;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Comparison<T> {
    /// The string attribute starts with the prefix.
    BeginsWith(String),
    /// The value lies between both bounds, inclusive.
    Between(T, T),
    /// The value equals the operand.
    Equals(T),
    /// The value is greater than the operand.
    GreaterThan(T),
    /// The value is greater than or equal to the operand.
    GreaterThanOrEqual(T),
    /// The value is less than the operand.
    LessThan(T),
    /// The value is less than or equal to the operand.
    LessThanOrEqual(T),
    /// The value differs from the operand.
    NotEqual(T),
    /// The attribute is present.
    Exists,
    /// The attribute is absent.
    NotExists,
}

impl<T: Serialize> Comparison<T> {
    fn get_expression(
        self,
        operand: &str,
        label: &str,
        index: &mut usize,
    ) -> Result<(String, collections::HashMap<String, types::AttributeValue>)> {
        let mut expression_attribute_values = collections::HashMap::new();
        let (operator, value) = match self {
            Self::BeginsWith(prefix) => {
                let placeholder = common::next_placeholder(label, "begins_with", index);
                let expression = format!("begins_with({operand}, {placeholder})");
                expression_attribute_values.insert(placeholder, types::AttributeValue::S(prefix));
                return Ok((expression, expression_attribute_values));
            }
            Self::Between(low, high) => {
                let low = to_attribute_value(low)?;
                let high = to_attribute_value(high)?;
                let low_placeholder = common::next_placeholder(label, "between", index);
                let high_placeholder = common::next_placeholder(label, "between", index);
                let expression =
                    format!("{operand} BETWEEN {low_placeholder} AND {high_placeholder}");
                expression_attribute_values.insert(low_placeholder, low);
                expression_attribute_values.insert(high_placeholder, high);
                return Ok((expression, expression_attribute_values));
            }
            Self::Exists => {
                let expression = format!("attribute_exists({operand})");
                return Ok((expression, expression_attribute_values));
            }
            Self::NotExists => {
                let expression = format!("attribute_not_exists({operand})");
                return Ok((expression, expression_attribute_values));
            }
            Self::Equals(value) => (("=", "eq"), value),
            Self::GreaterThan(value) => ((">", "gt"), value),
            Self::GreaterThanOrEqual(value) => ((">=", "gte"), value),
            Self::LessThan(value) => (("<", "lt"), value),
            Self::LessThanOrEqual(value) => (("<=", "lte"), value),
            Self::NotEqual(value) => (("<>", "ne"), value),
        };
        let (symbol, name) = operator;
        let value = to_attribute_value(value)?;
        let placeholder = common::next_placeholder(label, name, index);
        let expression = format!("{operand} {symbol} {placeholder}");
        expression_attribute_values.insert(placeholder, value);
        Ok((expression, expression_attribute_values))
    }
}

/// A single comparison on an attribute or its size.
///
/// ```rust
/// use dynamodb_movies::common::{condition, path::AttributePath};
///
/// let condition = condition::Condition::size(
///     AttributePath::new("info").member("actors"),
///     condition::Comparison::GreaterThan(3),
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Condition<T> {
    /// What is compared.
    pub operand: Operand,
    /// How it is compared.
    pub comparison: Comparison<T>,
}

impl<T> Condition<T> {
    /// Compare the attribute at `path`.
    pub fn path(path: path::AttributePath, comparison: Comparison<T>) -> Self {
        Self {
            operand: Operand::Path(path),
            comparison,
        }
    }

    /// Compare the size of the attribute at `path`.
    pub fn size(path: path::AttributePath, comparison: Comparison<T>) -> Self {
        Self {
            operand: Operand::Size(path),
            comparison,
        }
    }
}

impl<T: Serialize> Condition<T> {
    pub(crate) fn get_expression_operation(
        self,
        index: &mut usize,
    ) -> Result<common::ExpressionInput> {
        let mut operation = self.operand.to_expression();
        let label = self.operand.path().label();
        let (expression, expression_attribute_values) =
            self.comparison
                .get_expression(&operation.expression, label, index)?;
        operation.expression = expression;
        operation.expression_attribute_values = expression_attribute_values;
        Ok(operation)
    }
}

/// Conditions combined with one logical operator.
///
/// ```rust
/// use dynamodb_movies::common::{condition, path::AttributePath};
///
/// let conditions = condition::Conditions {
///     operator: condition::LogicalOperator::And,
///     conditions: vec![condition::Condition::path(
///         AttributePath::new("info").member("rating"),
///         condition::Comparison::LessThanOrEqual(7.5),
///     )],
/// };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Conditions<T> {
    /// How the conditions are combined.
    pub operator: LogicalOperator,
    /// The combined conditions.
    pub conditions: Vec<Condition<T>>,
}

impl<T> From<Condition<T>> for Conditions<T> {
    fn from(condition: Condition<T>) -> Self {
        Self {
            operator: LogicalOperator::And,
            conditions: vec![condition],
        }
    }
}

impl<T: Serialize> Conditions<T> {
    /// Resolve the conditions, numbering value placeholders from `index`.
    pub(crate) fn get_expression_operation(
        self,
        index: &mut usize,
    ) -> Result<common::ExpressionInput> {
        let is_composite = self.conditions.len() > 1;
        let mut operations = Vec::with_capacity(self.conditions.len());
        for condition in self.conditions {
            operations.push(condition.get_expression_operation(index)?);
        }
        let mut operation = common::ExpressionInput::merge(&self.operator, operations);
        if is_composite {
            operation.expression = format!("({})", operation.expression);
        }
        Ok(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use path::AttributePath;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn number(value: &str) -> types::AttributeValue {
        types::AttributeValue::N(value.to_string())
    }

    #[rstest]
    #[case::equals(
        Condition::path(AttributePath::new("year"), Comparison::Equals(json!(1985))),
        common::ExpressionInput {
            expression: "#year = :year_eq0".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#year".to_string(), "year".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (":year_eq0".to_string(), number("1985")),
                ]
            ),
        }
    )]
    #[case::size_greater_than(
        Condition::size(
            AttributePath::new("info").member("actors"),
            Comparison::GreaterThan(json!(3))
        ),
        common::ExpressionInput {
            expression: "size(#info.#actors) > :actors_gt0".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#info".to_string(), "info".to_string()),
                    ("#actors".to_string(), "actors".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (":actors_gt0".to_string(), number("3")),
                ]
            ),
        }
    )]
    #[case::less_than_or_equal_nested(
        Condition::path(
            AttributePath::new("info").member("rating"),
            Comparison::LessThanOrEqual(json!(7.5))
        ),
        common::ExpressionInput {
            expression: "#info.#rating <= :rating_lte0".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#info".to_string(), "info".to_string()),
                    ("#rating".to_string(), "rating".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (":rating_lte0".to_string(), number("7.5")),
                ]
            ),
        }
    )]
    #[case::between(
        Condition::path(
            AttributePath::new("title"),
            Comparison::Between(json!("A"), json!("L"))
        ),
        common::ExpressionInput {
            expression: "#title BETWEEN :title_between0 AND :title_between1".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#title".to_string(), "title".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (":title_between0".to_string(), types::AttributeValue::S("A".to_string())),
                    (":title_between1".to_string(), types::AttributeValue::S("L".to_string())),
                ]
            ),
        }
    )]
    #[case::begins_with(
        Condition::path(AttributePath::new("title"), Comparison::BeginsWith("The".to_string())),
        common::ExpressionInput {
            expression: "begins_with(#title, :title_begins_with0)".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#title".to_string(), "title".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (":title_begins_with0".to_string(), types::AttributeValue::S("The".to_string())),
                ]
            ),
        }
    )]
    #[case::not_exists(
        Condition::path(AttributePath::new("info").member("plot"), Comparison::NotExists),
        common::ExpressionInput {
            expression: "attribute_not_exists(#info.#plot)".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#info".to_string(), "info".to_string()),
                    ("#plot".to_string(), "plot".to_string()),
                ]
            ),
            ..Default::default()
        }
    )]
    fn test_condition(#[case] condition: Condition<Value>, #[case] expected: common::ExpressionInput) {
        let actual = condition.get_expression_operation(&mut 0).unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::single_is_not_wrapped(
        Conditions::from(
            Condition::path(AttributePath::new("year"), Comparison::NotEqual(json!(2000)))
        ),
        "#year <> :year_ne0"
    )]
    #[case::and(
        Conditions {
            operator: LogicalOperator::And,
            conditions: vec![
                Condition::path(AttributePath::new("year"), Comparison::GreaterThanOrEqual(json!(1950))),
                Condition::path(AttributePath::new("year"), Comparison::LessThan(json!(1960))),
            ],
        },
        "(#year >= :year_gte0 AND #year < :year_lt1)"
    )]
    #[case::or(
        Conditions {
            operator: LogicalOperator::Or,
            conditions: vec![
                Condition::path(AttributePath::new("rank"), Comparison::Exists),
                Condition::path(AttributePath::new("title"), Comparison::Equals(json!("Rush"))),
            ],
        },
        "(attribute_exists(#rank) OR #title = :title_eq0)"
    )]
    fn test_conditions(#[case] conditions: Conditions<Value>, #[case] expected: &str) {
        let actual = conditions.get_expression_operation(&mut 0).unwrap();
        assert_eq!(actual.expression, expected);
    }

    #[test]
    fn test_index_continues_across_calls() {
        let mut index = 2;
        let condition = Condition::path(AttributePath::new("year"), Comparison::Equals(json!(1)));
        let actual = condition.get_expression_operation(&mut index).unwrap();
        assert_eq!(actual.expression, "#year = :year_eq2");
        assert_eq!(index, 3);
    }
}
