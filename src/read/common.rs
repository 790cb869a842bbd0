use crate::common;

use aws_sdk_dynamodb::types;
use std::collections;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ReadInput {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values:
        Option<collections::HashMap<String, types::AttributeValue>>,
    pub(crate) filter_expression: Option<String>,
    pub(crate) projection_expression: Option<String>,
    pub(crate) table_name: String,
}

/// Arguments shared by every read operation.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReadArgs {
    /// Whether to use a strongly consistent read.
    ///
    /// `None` leaves the service default, an eventually consistent read.
    pub consistent_read: Option<bool>,
    /// Which attributes to retrieve.
    ///
    /// If `None`, all attributes are retrieved.
    pub projection: Option<common::projection::Projection>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl From<ReadArgs> for ReadInput {
    fn from(read_args: ReadArgs) -> Self {
        let mut operation = Self {
            consistent_read: read_args.consistent_read,
            table_name: read_args.table_name,
            ..Default::default()
        };
        if let Some(projection) = read_args.projection {
            let projection: common::ExpressionInput = projection.into();
            let projection_expression = projection.merge_into(
                &mut operation.expression_attribute_names,
                &mut operation.expression_attribute_values,
            );
            operation.projection_expression = Some(projection_expression);
        }
        operation
    }
}

impl ReadInput {
    /// Merge a filter into this read and record its expression.
    pub(crate) fn set_filter(&mut self, filter: common::ExpressionInput) {
        let filter_expression = filter.merge_into(
            &mut self.expression_attribute_names,
            &mut self.expression_attribute_values,
        );
        self.filter_expression = Some(filter_expression);
    }
}

/// drain a paginator and concatenate the items of every page
#[macro_export]
macro_rules! get_paginated_output {
    ($paginator:expr, $output_type:ty) => {{
        let mut items = Vec::new();
        let mut count = 0;
        let mut scanned_count = 0;
        while let Some(page) = $paginator.next().await {
            let page = page?;
            if let Some(page_items) = page.items {
                items.extend(page_items);
            }
            count += page.count;
            scanned_count += page.scanned_count;
        }
        let output = <$output_type>::builder()
            .set_items(Some(items))
            .set_count(Some(count))
            .set_scanned_count(Some(scanned_count))
            .build();
        Ok(output)
    }};
}

/// apply the single item read settings to a builder
#[macro_export]
macro_rules! apply_single_read_operation {
    ($builder:expr, $read_operation:expr) => {
        $builder
            .set_consistent_read($read_operation.consistent_read)
            .set_expression_attribute_names($read_operation.expression_attribute_names)
            .set_projection_expression($read_operation.projection_expression)
            .table_name($read_operation.table_name)
    };
}

/// apply the multiple item read settings to a builder
#[macro_export]
macro_rules! apply_multiple_read_operation {
    ($builder:expr, $read_operation:expr) => {
        $builder
            .set_consistent_read($read_operation.consistent_read)
            .set_expression_attribute_names($read_operation.expression_attribute_names)
            .set_expression_attribute_values($read_operation.expression_attribute_values)
            .set_filter_expression($read_operation.filter_expression)
            .set_projection_expression($read_operation.projection_expression)
            .table_name($read_operation.table_name)
    };
}
