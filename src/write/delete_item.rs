use crate::{error::Result, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections;

/// delete item operation
#[derive(Debug, PartialEq)]
struct DeleteItemInput {
    key: collections::HashMap<String, types::AttributeValue>,
    write_operation: write::common::WriteInput,
}

/// Delete item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_movies::{common::{condition, path::AttributePath}, movie::MovieKey, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     key: MovieKey::new(2015, "The Big New Movie"),
///     write_args: write::common::WriteArgs::new("Movies").condition(condition::Condition::path(
///         AttributePath::new("info").member("rating"),
///         condition::Comparison::LessThanOrEqual(7.5),
///     )),
/// };
/// delete_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct DeleteItem<K, T> {
    /// The primary key of the item to delete.
    pub key: K,
    /// Table name, condition and return values.
    pub write_args: write::common::WriteArgs<T>,
}

impl<K: Serialize, T: Serialize> TryFrom<DeleteItem<K, T>> for DeleteItemInput {
    type Error = crate::error::Error;

    fn try_from(delete_item: DeleteItem<K, T>) -> Result<Self> {
        let key = to_item(delete_item.key)?;
        let write_operation = delete_item.write_args.get_write_operation(&mut 0)?;
        let operation = Self {
            key,
            write_operation,
        };
        Ok(operation)
    }
}

impl<K: Serialize, T: Serialize> DeleteItem<K, T> {
    /// Execute the delete item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_movies.delete_item", skip_all, err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_item::DeleteItemOutput,
        error::SdkError<operation::delete_item::DeleteItemError>,
    > {
        let delete_item: DeleteItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.delete_item().set_key(Some(delete_item.key));
        crate::apply_write_operation!(builder, delete_item.write_operation)
            .send()
            .await
    }
}
