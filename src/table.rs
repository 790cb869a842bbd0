//! Creating and deleting the movies table.

use crate::{error::Result, movie};

use aws_sdk_dynamodb::{Client, error, operation, types};

/// create table operation
#[derive(Clone, Debug, PartialEq)]
struct CreateTableInput {
    attribute_definitions: Vec<types::AttributeDefinition>,
    key_schema: Vec<types::KeySchemaElement>,
    provisioned_throughput: types::ProvisionedThroughput,
    table_name: String,
}

/// Create the movies table: `year` (number) partition key, `title` (string) sort key.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_movies::table;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let output = table::CreateTable::new("Movies").send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CreateTable {
    /// The name of the table to create.
    pub table_name: String,
    /// Provisioned read capacity units.
    pub read_capacity_units: i64,
    /// Provisioned write capacity units.
    pub write_capacity_units: i64,
}

impl CreateTable {
    /// Default provisioned capacity, for both reads and writes.
    pub const DEFAULT_CAPACITY_UNITS: i64 = 10;

    /// Table named `table_name` with the default capacity.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            read_capacity_units: Self::DEFAULT_CAPACITY_UNITS,
            write_capacity_units: Self::DEFAULT_CAPACITY_UNITS,
        }
    }
}

fn key_attribute(
    name: &str,
    key_type: types::KeyType,
    attribute_type: types::ScalarAttributeType,
) -> Result<(types::KeySchemaElement, types::AttributeDefinition)> {
    let key_schema = types::KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(key_type)
        .build()?;
    let attribute_definition = types::AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(attribute_type)
        .build()?;
    Ok((key_schema, attribute_definition))
}

impl TryFrom<CreateTable> for CreateTableInput {
    type Error = crate::error::Error;

    fn try_from(create_table: CreateTable) -> Result<Self> {
        let (key_schema, attribute_definitions): (Vec<_>, Vec<_>) = [
            key_attribute(
                movie::PARTITION_KEY,
                types::KeyType::Hash,
                types::ScalarAttributeType::N,
            )?,
            key_attribute(
                movie::SORT_KEY,
                types::KeyType::Range,
                types::ScalarAttributeType::S,
            )?,
        ]
        .into_iter()
        .unzip();
        let provisioned_throughput = types::ProvisionedThroughput::builder()
            .read_capacity_units(create_table.read_capacity_units)
            .write_capacity_units(create_table.write_capacity_units)
            .build()?;
        let operation = Self {
            attribute_definitions,
            key_schema,
            provisioned_throughput,
            table_name: create_table.table_name,
        };
        Ok(operation)
    }
}

impl CreateTable {
    /// Execute the create table operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_movies.create_table", skip_all, err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::create_table::CreateTableOutput,
        error::SdkError<operation::create_table::CreateTableError>,
    > {
        let create_table: CreateTableInput = self.try_into().map_err(error::BuildError::other)?;
        client
            .create_table()
            .set_attribute_definitions(Some(create_table.attribute_definitions))
            .set_key_schema(Some(create_table.key_schema))
            .provisioned_throughput(create_table.provisioned_throughput)
            .table_name(create_table.table_name)
            .send()
            .await
    }
}

/// Delete a table and every item in it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DeleteTable {
    /// The name of the table to delete.
    pub table_name: String,
}

impl DeleteTable {
    /// Execute the delete table operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_movies.delete_table", skip_all, err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_table::DeleteTableOutput,
        error::SdkError<operation::delete_table::DeleteTableError>,
    > {
        client
            .delete_table()
            .table_name(self.table_name)
            .send()
            .await
    }
}

/// Status of the table described by a create table response.
pub fn table_status(output: &operation::create_table::CreateTableOutput) -> Option<&str> {
    output
        .table_description()
        .and_then(|description| description.table_status())
        .map(types::TableStatus::as_str)
}
