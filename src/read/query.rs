use crate::{
    common::{self, condition, path},
    error::Result,
    read,
};

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;

/// Key condition of a query: partition key equality and an optional sort key comparison.
///
/// ```rust
/// use dynamodb_movies::{common::condition::Comparison, read::query::KeyCondition};
/// use serde_json::json;
///
/// let key_condition = KeyCondition::partition("year", json!(1992))
///     .sort("title", Comparison::Between(json!("A"), json!("L")));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KeyCondition<T> {
    /// Partition key name and the value it must equal.
    pub partition_key: (String, T),
    /// Sort key name and the comparison it must satisfy.
    pub sort_key: Option<(String, condition::Comparison<T>)>,
}

impl<T> KeyCondition<T> {
    /// Match every item of one partition.
    pub fn partition(name: impl Into<String>, value: T) -> Self {
        Self {
            partition_key: (name.into(), value),
            sort_key: None,
        }
    }

    /// Restrict the sort key within the partition.
    pub fn sort(mut self, name: impl Into<String>, comparison: condition::Comparison<T>) -> Self {
        self.sort_key = Some((name.into(), comparison));
        self
    }
}

impl<T: Serialize> KeyCondition<T> {
    fn get_expression_operation(self, index: &mut usize) -> Result<common::ExpressionInput> {
        let (name, value) = self.partition_key;
        let partition_key = condition::Condition::path(
            path::AttributePath::new(name),
            condition::Comparison::Equals(value),
        );
        let mut operations = vec![partition_key.get_expression_operation(index)?];
        if let Some((name, comparison)) = self.sort_key {
            let sort_key = condition::Condition::path(path::AttributePath::new(name), comparison);
            operations.push(sort_key.get_expression_operation(index)?);
        }
        let operation =
            common::ExpressionInput::merge(&condition::LogicalOperator::And, operations);
        Ok(operation)
    }
}

/// query operation
#[derive(Clone, Debug, Default, PartialEq)]
struct QueryInput {
    key_condition_expression: String,
    read_operation: read::common::ReadInput,
    scan_index_forward: Option<bool>,
}

/// Query operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_movies::read;
/// use serde_json::{Value, json};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let query: read::query::Query<Value> = read::query::Query {
///     key_condition: read::query::KeyCondition::partition("year", json!(1985)),
///     filter: None,
///     read_args: read::common::ReadArgs {
///         table_name: "Movies".to_string(),
///         ..Default::default()
///     },
///     scan_index_forward: None,
/// };
/// let output = query.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Query<T> {
    /// Which partition, and which part of it, to read.
    pub key_condition: KeyCondition<T>,
    /// Filter applied to matched items before they are returned.
    pub filter: Option<condition::Conditions<T>>,
    /// Table name, consistency and projection.
    pub read_args: read::common::ReadArgs,
    /// Whether to read the sort key in ascending (default) or descending order.
    pub scan_index_forward: Option<bool>,
}

impl<T: Serialize> TryFrom<Query<T>> for QueryInput {
    type Error = crate::error::Error;

    fn try_from(query: Query<T>) -> Result<Self> {
        let mut index = 0;
        let mut read_operation: read::common::ReadInput = query.read_args.into();
        let key_condition_operation = query.key_condition.get_expression_operation(&mut index)?;
        let key_condition_expression = key_condition_operation.merge_into(
            &mut read_operation.expression_attribute_names,
            &mut read_operation.expression_attribute_values,
        );
        if let Some(filter) = query.filter {
            let filter_operation = filter.get_expression_operation(&mut index)?;
            read_operation.set_filter(filter_operation);
        }
        let operation = Self {
            key_condition_expression,
            read_operation,
            scan_index_forward: query.scan_index_forward,
        };
        Ok(operation)
    }
}

impl<T: Serialize> Query<T> {
    /// Execute the query, following pagination until every page has been read.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_movies.query", skip_all, err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::query::QueryOutput, error::SdkError<operation::query::QueryError>> {
        let query: QueryInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .query()
            .key_condition_expression(query.key_condition_expression)
            .set_scan_index_forward(query.scan_index_forward);
        let mut paginator = crate::apply_multiple_read_operation!(builder, query.read_operation)
            .into_paginator()
            .send();
        crate::get_paginated_output!(paginator, operation::query::QueryOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::collections;

    #[rstest]
    #[case::partition_only(
        Query {
            key_condition: KeyCondition::partition("year", json!(1985)),
            filter: None,
            read_args: read::common::ReadArgs {
                table_name: "Movies".to_string(),
                ..Default::default()
            },
            scan_index_forward: None,
        },
        QueryInput {
            key_condition_expression: "#year = :year_eq0".to_string(),
            read_operation: read::common::ReadInput {
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#year".to_string(), "year".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    collections::HashMap::from(
                        [
                            (
                                ":year_eq0".to_string(),
                                types::AttributeValue::N(
                                    "1985".to_string()
                                )
                            ),
                        ]
                    )
                ),
                table_name: "Movies".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    )]
    #[case::titles_between_with_projection(
        Query {
            key_condition: KeyCondition::partition("year", json!(1992))
                .sort("title", condition::Comparison::Between(json!("A"), json!("L"))),
            filter: None,
            read_args: read::common::ReadArgs {
                projection: Some(
                    common::projection::Projection::parse(
                        ["year", "title", "info.genres", "info.actors[0]"]
                    ).unwrap()
                ),
                table_name: "Movies".to_string(),
                ..Default::default()
            },
            scan_index_forward: None,
        },
        QueryInput {
            key_condition_expression:
                "#year = :year_eq0 AND #title BETWEEN :title_between1 AND :title_between2".to_string(),
            read_operation: read::common::ReadInput {
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#year".to_string(), "year".to_string()),
                            ("#title".to_string(), "title".to_string()),
                            ("#info".to_string(), "info".to_string()),
                            ("#genres".to_string(), "genres".to_string()),
                            ("#actors".to_string(), "actors".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    collections::HashMap::from(
                        [
                            (
                                ":year_eq0".to_string(),
                                types::AttributeValue::N(
                                    "1992".to_string()
                                )
                            ),
                            (
                                ":title_between1".to_string(),
                                types::AttributeValue::S(
                                    "A".to_string()
                                )
                            ),
                            (
                                ":title_between2".to_string(),
                                types::AttributeValue::S(
                                    "L".to_string()
                                )
                            ),
                        ]
                    )
                ),
                projection_expression: Some(
                    "#year, #title, #info.#genres, #info.#actors[0]".to_string()
                ),
                table_name: "Movies".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    )]
    #[case::filter_and_descending(
        Query {
            key_condition: KeyCondition::partition("year", json!(2013)),
            filter: Some(
                condition::Condition::path(
                    path::AttributePath::new("info").member("rating"),
                    condition::Comparison::GreaterThanOrEqual(json!(8)),
                ).into()
            ),
            read_args: read::common::ReadArgs {
                table_name: "Movies".to_string(),
                ..Default::default()
            },
            scan_index_forward: Some(false),
        },
        QueryInput {
            key_condition_expression: "#year = :year_eq0".to_string(),
            read_operation: read::common::ReadInput {
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#year".to_string(), "year".to_string()),
                            ("#info".to_string(), "info".to_string()),
                            ("#rating".to_string(), "rating".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    collections::HashMap::from(
                        [
                            (
                                ":year_eq0".to_string(),
                                types::AttributeValue::N(
                                    "2013".to_string()
                                )
                            ),
                            (
                                ":rating_gte1".to_string(),
                                types::AttributeValue::N(
                                    "8".to_string()
                                )
                            ),
                        ]
                    )
                ),
                filter_expression: Some(
                    "#info.#rating >= :rating_gte1".to_string()
                ),
                table_name: "Movies".to_string(),
                ..Default::default()
            },
            scan_index_forward: Some(false),
        }
    )]
    fn test_query(#[case] args: Query<Value>, #[case] expected: QueryInput) {
        let actual: QueryInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
