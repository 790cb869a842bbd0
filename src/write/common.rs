use crate::{
    common::{self, condition},
    error::Result,
};

use aws_sdk_dynamodb::types;
use serde::Serialize;
use std::collections;

/// Resolved write parameters, ready to be applied to a request builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct WriteInput {
    pub(crate) condition_expression: Option<String>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values:
        Option<collections::HashMap<String, types::AttributeValue>>,
    pub(crate) return_values: Option<types::ReturnValue>,
    pub(crate) table_name: String,
}

impl WriteInput {
    /// Merge an expression's placeholders into this write and return its text.
    pub(crate) fn merge_expression(&mut self, operation: common::ExpressionInput) -> String {
        operation.merge_into(
            &mut self.expression_attribute_names,
            &mut self.expression_attribute_values,
        )
    }
}

/// Arguments common to all write operations (Put, Update, Delete).
#[derive(Clone, Debug, PartialEq)]
pub struct WriteArgs<T> {
    /// Condition that must hold for the write to take effect.
    ///
    /// When it does not, the service rejects the write with a
    /// `ConditionalCheckFailedException` and the item is left untouched.
    pub condition: Option<condition::Conditions<T>>,
    /// Which item attributes to return in the response.
    pub return_values: Option<types::ReturnValue>,
    /// The name of the table to write to.
    pub table_name: String,
}

impl<T> WriteArgs<T> {
    /// Unconditional write to `table_name` returning nothing.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            condition: None,
            return_values: None,
            table_name: table_name.into(),
        }
    }

    /// Only write when `condition` holds.
    pub fn condition(mut self, condition: impl Into<condition::Conditions<T>>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Ask for item attributes in the response.
    pub fn return_values(mut self, return_values: types::ReturnValue) -> Self {
        self.return_values = Some(return_values);
        self
    }
}

impl<T: Serialize> WriteArgs<T> {
    /// Resolve the arguments, numbering value placeholders from `index`.
    pub(crate) fn get_write_operation(self, index: &mut usize) -> Result<WriteInput> {
        let mut operation = WriteInput {
            return_values: self.return_values,
            table_name: self.table_name,
            ..Default::default()
        };
        if let Some(condition) = self.condition {
            let condition_operation = condition.get_expression_operation(index)?;
            let condition_expression = operation.merge_expression(condition_operation);
            operation.condition_expression = Some(condition_expression);
        }
        Ok(operation)
    }
}

/// apply common write operation settings to a builder
#[macro_export]
macro_rules! apply_write_operation {
    ($builder:expr, $write_operation:expr) => {
        $builder
            .set_condition_expression($write_operation.condition_expression)
            .set_expression_attribute_names($write_operation.expression_attribute_names)
            .set_expression_attribute_values($write_operation.expression_attribute_values)
            .set_return_values($write_operation.return_values)
            .table_name($write_operation.table_name)
    };
}
