use crate::{
    common::{self, path},
    error::Result,
    write,
};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{to_attribute_value, to_item};
use std::collections;

/// Value assigned by a `SET` action.
///
/// ```rust
/// use dynamodb_movies::write::update_item;
///
/// let assign = update_item::SetInput::Assign(5.5);
/// let increment = update_item::SetInput::Increment(1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SetInput<T> {
    /// Replace the attribute with the value.
    Assign(T),
    /// Add the value to a numeric attribute (atomic counter).
    Increment(T),
    /// Subtract the value from a numeric attribute.
    Decrement(T),
    /// Append the values to the end of a list attribute.
    ListAppend(T),
    /// Assign the value only if the attribute is absent.
    IfNotExists(T),
}

impl<T> SetInput<T> {
    fn get_set_expression(self, path: &str, value_placeholder: &str) -> (T, String) {
        match self {
            Self::Assign(value) => (value, format!("{path} = {value_placeholder}")),
            Self::Increment(value) => (value, format!("{path} = {path} + {value_placeholder}")),
            Self::Decrement(value) => (value, format!("{path} = {path} - {value_placeholder}")),
            Self::ListAppend(value) => (
                value,
                format!("{path} = list_append({path}, {value_placeholder})"),
            ),
            Self::IfNotExists(value) => (
                value,
                format!("{path} = if_not_exists({path}, {value_placeholder})"),
            ),
        }
    }
}

/// One change made by an update.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateAction<T> {
    /// `SET` the attribute at the path.
    Set(path::AttributePath, SetInput<T>),
    /// `REMOVE` the attribute or list element at the path.
    Remove(path::AttributePath),
}

/// Ordered list of changes, rendered as `SET ... REMOVE ...` clauses.
///
/// ```rust
/// use dynamodb_movies::{common::path::AttributePath, write::update_item};
///
/// let update = update_item::UpdateExpression(vec![
///     update_item::UpdateAction::Set(
///         AttributePath::new("info").member("rating"),
///         update_item::SetInput::Increment(1),
///     ),
/// ]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateExpression<T>(pub Vec<UpdateAction<T>>);

impl<T: Serialize> UpdateExpression<T> {
    fn get_update_expression(self, index: &mut usize) -> Result<common::ExpressionInput> {
        let mut set_operations = Vec::new();
        let mut remove_operations = Vec::new();
        for action in self.0 {
            match action {
                UpdateAction::Set(path, set_input) => {
                    let mut operation = path.to_expression();
                    let value_placeholder = common::next_placeholder(path.label(), "set", index);
                    let (value, expression) =
                        set_input.get_set_expression(&operation.expression, &value_placeholder);
                    let value = to_attribute_value(value)?;
                    operation.expression = expression;
                    operation
                        .expression_attribute_values
                        .insert(value_placeholder, value);
                    set_operations.push(operation);
                }
                UpdateAction::Remove(path) => remove_operations.push(path.to_expression()),
            }
        }
        let mut clauses = Vec::with_capacity(2);
        for (keyword, operations) in [("SET", set_operations), ("REMOVE", remove_operations)] {
            if operations.is_empty() {
                continue;
            }
            let mut clause = common::ExpressionInput::merge(", ", operations);
            clause.expression = format!("{keyword} {}", clause.expression);
            clauses.push(clause);
        }
        Ok(common::ExpressionInput::merge(" ", clauses))
    }
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    key: collections::HashMap<String, types::AttributeValue>,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types::ReturnValue};
/// use dynamodb_movies::{common::path::AttributePath, movie::MovieKey, write};
/// use serde_json::{Value, json};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item: write::update_item::UpdateItem<MovieKey, Value> = write::update_item::UpdateItem {
///     key: MovieKey::new(2015, "The Big New Movie"),
///     update_expression: write::update_item::UpdateExpression(vec![
///         write::update_item::UpdateAction::Set(
///             AttributePath::new("info").member("rating"),
///             write::update_item::SetInput::Increment(json!(1)),
///         ),
///     ]),
///     write_args: write::common::WriteArgs::new("Movies").return_values(ReturnValue::UpdatedNew),
/// };
/// let output = update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem<K, T> {
    /// The primary key of the item to update.
    pub key: K,
    /// The changes to make.
    pub update_expression: UpdateExpression<T>,
    /// Table name, condition and return values.
    pub write_args: write::common::WriteArgs<T>,
}

impl<K: Serialize, T: Serialize> TryFrom<UpdateItem<K, T>> for UpdateItemInput {
    type Error = crate::error::Error;

    fn try_from(update_item: UpdateItem<K, T>) -> Result<Self> {
        let mut index = 0;
        let key = to_item(update_item.key)?;
        let update_operation = update_item
            .update_expression
            .get_update_expression(&mut index)?;
        let mut write_operation = update_item.write_args.get_write_operation(&mut index)?;
        let update_expression = write_operation.merge_expression(update_operation);
        let operation = Self {
            key,
            update_expression,
            write_operation,
        };
        Ok(operation)
    }
}

impl<K: Serialize, T: Serialize> UpdateItem<K, T> {
    /// Execute the update item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_movies.update_item", skip_all, err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.key))
            .update_expression(update_item.update_expression);
        crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}
