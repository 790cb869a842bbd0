//! Command-line and environment configuration of the walkthrough.

use crate::table;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use std::path;

/// Default region when neither `--region` nor `AWS_REGION` is given.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Default endpoint, a local DynamoDB.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000";

/// Walkthrough settings.
#[derive(clap::Parser, Clone, Debug, PartialEq)]
#[command(
    name = "dynamodb-movies",
    about = "Walk through the DynamoDB API on a movies table",
    version
)]
pub struct Config {
    /// AWS region of the table
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Service endpoint; point it at DynamoDB Local or the regional endpoint
    #[arg(long, env = "DYNAMODB_ENDPOINT_URL", default_value = DEFAULT_ENDPOINT_URL)]
    pub endpoint_url: String,

    /// Name of the movies table
    #[arg(long, default_value = "Movies")]
    pub table_name: String,

    /// JSON array of movies to load
    #[arg(long, default_value = "moviedata.json")]
    pub data_file: path::PathBuf,

    /// Provisioned read capacity units
    #[arg(long, default_value_t = table::CreateTable::DEFAULT_CAPACITY_UNITS)]
    pub read_capacity: i64,

    /// Provisioned write capacity units
    #[arg(long, default_value_t = table::CreateTable::DEFAULT_CAPACITY_UNITS)]
    pub write_capacity: i64,

    /// Delete the table once the walkthrough is over
    #[arg(long)]
    pub cleanup: bool,
}

impl Config {
    /// Build a client for the configured region and endpoint.
    ///
    /// Credentials come from the default provider chain.
    pub async fn client(&self) -> Client {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .endpoint_url(&self.endpoint_url)
            .load()
            .await;
        Client::new(&sdk_config)
    }

    /// The table this configuration creates.
    pub fn create_table(&self) -> table::CreateTable {
        table::CreateTable {
            table_name: self.table_name.clone(),
            read_capacity_units: self.read_capacity,
            write_capacity_units: self.write_capacity,
        }
    }
}
