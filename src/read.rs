//! Read operations on the movies table.
//!
//! This module provides:
//! - Getting one item by primary key
//! - Querying items with a key condition
//! - Scanning the whole table

/// Common arguments and helpers for read operations.
pub mod common;

/// Get item operation for retrieving a single item by primary key.
pub mod get_item;

/// Query operation for retrieving items with key conditions.
pub mod query;

/// Scan operation for reading every item of a table.
pub mod scan;
