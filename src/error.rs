//! Crate error type and conditional-check classification.

use aws_sdk_dynamodb::{
    error::{BuildError, SdkError},
    operation::{delete_item::DeleteItemError, put_item::PutItemError, update_item::UpdateItemError},
    types::error::ConditionalCheckFailedException,
};
use std::io;

/// Errors raised while building requests, loading data or rendering responses.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value kind with no JSON representation reached the normalizer.
    #[error("unsupported type for JSON rendering: {0}")]
    UnsupportedType(&'static str),
    /// A number returned by the database could not be parsed as a decimal.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    /// An attribute path could not be parsed.
    #[error("invalid attribute path {path:?}: {reason}")]
    InvalidPath {
        /// The offending path text.
        path: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// Conversion between serde values and DynamoDB attribute values failed.
    #[error("attribute value conversion failed: {0}")]
    Conversion(#[from] serde_dynamo::Error),
    /// JSON decoding or encoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Reading the data file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A request could not be built.
    #[error("request build error: {0}")]
    Build(#[from] BuildError),
    /// The service rejected a request.
    #[error(transparent)]
    Dynamo(#[from] aws_sdk_dynamodb::Error),
    /// The table did not reach the expected state in time.
    #[error("waiting for table failed: {0}")]
    Waiter(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl<E, R> From<SdkError<E, R>> for Error
where
    aws_sdk_dynamodb::Error: From<SdkError<E, R>>,
{
    fn from(err: SdkError<E, R>) -> Self {
        Self::Dynamo(err.into())
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Operation errors that can carry a conditional-check failure.
pub trait ConditionalFailure {
    /// The conditional-check fault, if this error is one.
    fn conditional_check_failed(&self) -> Option<&ConditionalCheckFailedException>;
}

macro_rules! impl_conditional_failure {
    ($($error:ident),* $(,)?) => {
        $(
            impl ConditionalFailure for $error {
                fn conditional_check_failed(&self) -> Option<&ConditionalCheckFailedException> {
                    match self {
                        $error::ConditionalCheckFailedException(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_conditional_failure!(DeleteItemError, PutItemError, UpdateItemError);

/// Returns the conditional-check fault carried by a service error, if any.
///
/// Transport, timeout and other service faults return `None`.
pub fn conditional_check_failed<E: ConditionalFailure, R>(
    err: &SdkError<E, R>,
) -> Option<&ConditionalCheckFailedException> {
    err.as_service_error()?.conditional_check_failed()
}
