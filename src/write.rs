//! Write operations on the movies table.
//!
//! This module provides:
//! - Putting new items or replacing existing ones
//! - Updating items, including atomic counters and conditional updates
//! - Deleting items, optionally under a condition

/// Common arguments and helpers for write operations.
pub mod common;

/// Delete item operation for removing items from tables.
pub mod delete_item;

/// Put item operation for creating or replacing items.
pub mod put_item;

/// Update item operation for modifying existing items.
pub mod update_item;
