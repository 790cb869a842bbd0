//! Expression building shared by read and write requests.
//!
//! Attribute names are always aliased through `#name` placeholders and values
//! through `:label` placeholders, so reserved words such as `year` need no
//! special handling by callers.

/// Condition expressions for filters, key conditions and conditional writes.
pub mod condition;

/// Attribute paths with nested members and list indices.
pub mod path;

/// Projection expressions.
pub mod projection;

use aws_sdk_dynamodb::types;
use std::collections;

fn get_expression(left: String, separator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{separator}{right}")
    }
}

/// Next value placeholder, `:{label}_{operator}{index}`; advances the shared index.
pub(crate) fn next_placeholder(label: &str, operator: &str, index: &mut usize) -> String {
    let placeholder = format!(":{label}_{operator}{index}");
    *index += 1;
    placeholder
}

/// A resolved expression with the placeholders it references.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: collections::HashMap<String, String>,
    pub(crate) expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    pub(crate) fn merge(separator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, separator, item.expression);
        }
        operation
    }

    /// Move the placeholders into a request's maps and return the expression text.
    pub(crate) fn merge_into(
        self,
        names: &mut Option<collections::HashMap<String, String>>,
        values: &mut Option<collections::HashMap<String, types::AttributeValue>>,
    ) -> String {
        if !self.expression_attribute_names.is_empty() {
            names
                .get_or_insert_with(collections::HashMap::new)
                .extend(self.expression_attribute_names);
        }
        if !self.expression_attribute_values.is_empty() {
            values
                .get_or_insert_with(collections::HashMap::new)
                .extend(self.expression_attribute_values);
        }
        self.expression
    }
}
