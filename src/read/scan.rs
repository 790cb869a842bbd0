use crate::{common::condition, error::Result, read};

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;

/// scan operation
#[derive(Clone, Debug, Default, PartialEq)]
struct ScanInput {
    read_operation: read::common::ReadInput,
}

/// Scan operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_movies::read;
/// use serde_json::Value;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan: read::scan::Scan<Value> = read::scan::Scan {
///     filter: None,
///     read_args: read::common::ReadArgs {
///         table_name: "Movies".to_string(),
///         ..Default::default()
///     },
/// };
/// let output = scan.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Scan<T> {
    /// Filter applied to every scanned item.
    pub filter: Option<condition::Conditions<T>>,
    /// Table name, consistency and projection.
    pub read_args: read::common::ReadArgs,
}

impl<T: Serialize> TryFrom<Scan<T>> for ScanInput {
    type Error = crate::error::Error;

    fn try_from(scan: Scan<T>) -> Result<Self> {
        let mut read_operation: read::common::ReadInput = scan.read_args.into();
        if let Some(filter) = scan.filter {
            let filter_operation = filter.get_expression_operation(&mut 0)?;
            read_operation.set_filter(filter_operation);
        }
        Ok(Self { read_operation })
    }
}

impl<T: Serialize> Scan<T> {
    /// Execute the scan, following pagination until the whole table has been read.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_movies.scan", skip_all, err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::scan::ScanOutput, error::SdkError<operation::scan::ScanError>> {
        let scan: ScanInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.scan();
        let mut paginator = crate::apply_multiple_read_operation!(builder, scan.read_operation)
            .into_paginator()
            .send();
        crate::get_paginated_output!(paginator, operation::scan::ScanOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{path, projection};

    use aws_sdk_dynamodb::types;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::collections;

    #[rstest]
    #[case::whole_table(
        Scan {
            filter: None,
            read_args: read::common::ReadArgs {
                table_name: "Movies".to_string(),
                ..Default::default()
            },
        },
        ScanInput {
            read_operation: read::common::ReadInput {
                table_name: "Movies".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::fifties(
        Scan {
            filter: Some(
                condition::Condition::path(
                    path::AttributePath::new("year"),
                    condition::Comparison::Between(json!(1950), json!(1959)),
                ).into()
            ),
            read_args: read::common::ReadArgs {
                projection: Some(
                    projection::Projection::parse(["year", "title", "info.rating"]).unwrap()
                ),
                table_name: "Movies".to_string(),
                ..Default::default()
            },
        },
        ScanInput {
            read_operation: read::common::ReadInput {
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#year".to_string(), "year".to_string()),
                            ("#title".to_string(), "title".to_string()),
                            ("#info".to_string(), "info".to_string()),
                            ("#rating".to_string(), "rating".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    collections::HashMap::from(
                        [
                            (
                                ":year_between0".to_string(),
                                types::AttributeValue::N(
                                    "1950".to_string()
                                )
                            ),
                            (
                                ":year_between1".to_string(),
                                types::AttributeValue::N(
                                    "1959".to_string()
                                )
                            ),
                        ]
                    )
                ),
                filter_expression: Some(
                    "#year BETWEEN :year_between0 AND :year_between1".to_string()
                ),
                projection_expression: Some(
                    "#year, #title, #info.#rating".to_string()
                ),
                table_name: "Movies".to_string(),
                ..Default::default()
            },
        }
    )]
    fn test_scan(#[case] args: Scan<Value>, #[case] expected: ScanInput) {
        let actual: ScanInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
