#![deny(missing_docs)]

//! # DynamoDB Movies
//!
//! A walkthrough of the Amazon DynamoDB API on a table of movies, with
//! decimal-aware JSON rendering of every response.
//!
//! ## Overview
//!
//! The crate provides:
//! - [`normalize`], which turns the arbitrary-precision numbers DynamoDB returns
//!   into JSON integers (no fractional part) or floats (anything else)
//! - Typed requests for creating the table, putting, reading, updating and
//!   deleting items, and for queries and scans
//! - Expression building with nested attribute paths, so callers never write
//!   placeholder strings by hand
//! - The walkthrough itself, behind the `cli` feature
//!
//! ## Quick Example
//!
//! ```no_run
//! use aws_sdk_dynamodb::{Client, types::ReturnValue};
//! use dynamodb_movies::{common::path::AttributePath, movie::MovieKey, normalize, write};
//! use serde_json::{Value, json};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let client = Client::from_conf(aws_sdk_dynamodb::config::Config::builder().build());
//! // Atomic counter on a nested attribute: no expression strings needed
//! let update_item: write::update_item::UpdateItem<MovieKey, Value> = write::update_item::UpdateItem {
//!     key: MovieKey::new(2015, "The Big New Movie"),
//!     update_expression: write::update_item::UpdateExpression(vec![
//!         write::update_item::UpdateAction::Set(
//!             AttributePath::new("info").member("rating"),
//!             write::update_item::SetInput::Increment(json!(1)),
//!         ),
//!     ]),
//!     write_args: write::common::WriteArgs::new("Movies").return_values(ReturnValue::UpdatedNew),
//! };
//! // Sends "SET #info.#rating = #info.#rating + :rating_set0"
//! let output = update_item.send(&client).await?;
//! if let Some(attributes) = output.attributes() {
//!     println!("{}", normalize::render(attributes)?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Attribute paths, projections and conditions
//! - [`mod@read`] - Read operations (GetItem, Query, Scan)
//! - [`mod@write`] - Write operations (PutItem, UpdateItem, DeleteItem)
//! - [`mod@table`] - CreateTable and DeleteTable
//! - [`mod@normalize`] - JSON rendering of database values

/// Attribute paths, projections and conditions.
pub mod common;

/// Crate error type.
pub mod error;

/// The movie record and its sample data.
pub mod movie;

/// JSON rendering of database values.
pub mod normalize;

/// Read operations for retrieving movies.
///
/// This module provides operations for:
/// - Getting individual items by key
/// - Querying items with key conditions
/// - Scanning entire tables
pub mod read;

/// Table lifecycle.
pub mod table;

/// Write operations for modifying movies.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Updating items (set, increment, remove)
/// - Deleting items, optionally under a condition
pub mod write;

/// Command-line configuration.
#[cfg(feature = "cli")]
pub mod config;

/// The walkthrough steps.
#[cfg(feature = "cli")]
pub mod walkthrough;

pub use error::{Error, Result};
