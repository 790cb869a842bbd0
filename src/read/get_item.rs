use crate::{error::Result, read};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections;

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct GetItemInput {
    key: collections::HashMap<String, types::AttributeValue>,
    read_operation: read::common::ReadInput,
}

/// Get item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_movies::{movie::MovieKey, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     key: MovieKey::new(2015, "The Big New Movie"),
///     read_args: read::common::ReadArgs {
///         table_name: "Movies".to_string(),
///         ..Default::default()
///     },
/// };
/// let output = get_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem<K> {
    /// The primary key of the item, serialized attribute by attribute.
    pub key: K,
    /// Table name, consistency and projection.
    pub read_args: read::common::ReadArgs,
}

impl<K: Serialize> TryFrom<GetItem<K>> for GetItemInput {
    type Error = crate::error::Error;

    fn try_from(get_item: GetItem<K>) -> Result<Self> {
        let key = to_item(get_item.key)?;
        let operation = Self {
            key,
            read_operation: get_item.read_args.into(),
        };
        Ok(operation)
    }
}

impl<K: Serialize> GetItem<K> {
    /// Execute the get item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_movies.get_item", skip_all, err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::get_item::GetItemOutput,
        error::SdkError<operation::get_item::GetItemError>,
    > {
        let get_item: GetItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.get_item().set_key(Some(get_item.key));
        crate::apply_single_read_operation!(builder, get_item.read_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common, movie};

    use rstest::rstest;

    #[rstest]
    #[case::key_only(
        GetItem {
            key: movie::MovieKey::new(2015, "The Big New Movie"),
            read_args: read::common::ReadArgs {
                table_name: "Movies".to_string(),
                ..Default::default()
            },
        },
        GetItemInput {
            key: collections::HashMap::from(
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
                ]
            ),
            read_operation: read::common::ReadInput {
                table_name: "Movies".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::projection(
        GetItem {
            key: movie::MovieKey::new(1992, "Aladdin"),
            read_args: read::common::ReadArgs {
                consistent_read: Some(true),
                projection: Some(
                    common::projection::Projection::parse(["info.plot"]).unwrap()
                ),
                table_name: "Movies".to_string(),
            },
        },
        GetItemInput {
            key: collections::HashMap::from(
                [
                    (
                        "year".to_string(),
                        types::AttributeValue::N(
                            "1992".to_string()
                        )
                    ),
                    (
                        "title".to_string(),
                        types::AttributeValue::S(
                            "Aladdin".to_string()
                        )
                    ),
                ]
            ),
            read_operation: read::common::ReadInput {
                consistent_read: Some(true),
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#info".to_string(), "info".to_string()),
                            ("#plot".to_string(), "plot".to_string()),
                        ]
                    )
                ),
                projection_expression: Some(
                    "#info.#plot".to_string()
                ),
                table_name: "Movies".to_string(),
                ..Default::default()
            },
        }
    )]
    fn test_get_item(#[case] args: GetItem<movie::MovieKey>, #[case] expected: GetItemInput) {
        let actual: GetItemInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
