use crate::{error::Result, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections;

/// put item operation
#[derive(Debug, PartialEq)]
struct PutItemInput {
    item: collections::HashMap<String, types::AttributeValue>,
    write_operation: write::common::WriteInput,
}

/// Put item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_movies::write;
/// use serde_json::{Value, json};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let put_item: write::put_item::PutItem<Value, Value> = write::put_item::PutItem {
///     item: json!({"year": 2015, "title": "The Big New Movie"}),
///     write_args: write::common::WriteArgs::new("Movies"),
/// };
/// put_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct PutItem<I, T> {
    /// The item to put into the table; it must serialize to a map.
    pub item: I,
    /// Table name, condition and return values.
    pub write_args: write::common::WriteArgs<T>,
}

impl<I: Serialize, T: Serialize> TryFrom<PutItem<I, T>> for PutItemInput {
    type Error = crate::error::Error;

    fn try_from(put_item: PutItem<I, T>) -> Result<Self> {
        let item = to_item(put_item.item)?;
        let write_operation = put_item.write_args.get_write_operation(&mut 0)?;
        let operation = Self {
            item,
            write_operation,
        };
        Ok(operation)
    }
}

impl<I: Serialize, T: Serialize> PutItem<I, T> {
    /// Execute the put item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_movies.put_item", skip_all, err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::put_item::PutItemOutput,
        error::SdkError<operation::put_item::PutItemError>,
    > {
        let put_item: PutItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.put_item().set_item(Some(put_item.item));
        crate::apply_write_operation!(builder, put_item.write_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::{condition, path},
        movie,
    };

    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::movie(
        PutItem {
            item: movie::Movie {
                year: 2015,
                title: "The Big New Movie".to_string(),
                info: json!(
                    {
                        "plot": "Nothing happens at all.",
                        "rating": 0
                    }
                ),
            },
            write_args: write::common::WriteArgs::new("Movies"),
        },
        PutItemInput {
            item: collections::HashMap::from(
                [
                    (
                        "year".to_string(),
                        types::AttributeValue::N(
                            "2015".to_string()
                        )
                    ),
                    (
                        "title".to_string(),
                        types::AttributeValue::S(
                            "The Big New Movie".to_string()
                        )
                    ),
                    (
                        "info".to_string(),
                        types::AttributeValue::M(
                            collections::HashMap::from(
                                [
                                    (
                                        "plot".to_string(),
                                        types::AttributeValue::S(
                                            "Nothing happens at all.".to_string()
                                        )
                                    ),
                                    (
                                        "rating".to_string(),
                                        types::AttributeValue::N(
                                            "0".to_string()
                                        )
                                    ),
                                ]
                            )
                        )
                    ),
                ]
            ),
            write_operation: write::common::WriteInput {
                table_name: "Movies".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::only_if_absent(
        PutItem {
            item: movie::Movie {
                year: 2013,
                title: "Rush".to_string(),
                info: Value::Null,
            },
            write_args: write::common::WriteArgs::new("Movies")
                .condition(
                    condition::Condition::path(
                        path::AttributePath::new("title"),
                        condition::Comparison::NotExists,
                    )
                ),
        },
        PutItemInput {
            item: collections::HashMap::from(
                [
                    (
                        "year".to_string(),
                        types::AttributeValue::N(
                            "2013".to_string()
                        )
                    ),
                    (
                        "title".to_string(),
                        types::AttributeValue::S(
                            "Rush".to_string()
                        )
                    ),
                    (
                        "info".to_string(),
                        types::AttributeValue::Null(true)
                    ),
                ]
            ),
            write_operation: write::common::WriteInput {
                condition_expression: Some(
                    "attribute_not_exists(#title)".to_string()
                ),
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#title".to_string(), "title".to_string()),
                        ]
                    )
                ),
                table_name: "Movies".to_string(),
                ..Default::default()
            },
        }
    )]
    fn test_put_item(#[case] args: PutItem<movie::Movie, Value>, #[case] expected: PutItemInput) {
        let actual: PutItemInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_put_item_rejects_non_map_item() {
        let put_item: PutItem<Value, Value> = PutItem {
            item: json!([1, 2]),
            write_args: write::common::WriteArgs::new("Movies"),
        };
        let actual: Result<PutItemInput> = put_item.try_into();
        assert!(actual.is_err());
    }
}
