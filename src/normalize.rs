//! Conversion of database values into plain JSON for display.
//!
//! DynamoDB transports every number as a decimal string so that no precision is
//! lost in storage. JSON has no arbitrary-precision decimal type, so numbers are
//! rendered as integers when they have no fractional part and as floating-point
//! approximations otherwise. Integers keep every digit, however wide.
//!
//! ```rust
//! use aws_sdk_dynamodb::types::AttributeValue;
//! use dynamodb_movies::normalize::{Normalize, render_line};
//! use std::collections::HashMap;
//!
//! let item = HashMap::from([
//!     ("rating".to_string(), AttributeValue::N("5.5".to_string())),
//!     ("count".to_string(), AttributeValue::N("3".to_string())),
//!     ("views".to_string(), AttributeValue::N("123456789012345678901234567890".to_string())),
//! ]);
//! assert_eq!(
//!     render_line(&item).unwrap(),
//!     r#"{"count": 3, "rating": 5.5, "views": 123456789012345678901234567890}"#
//! );
//! ```

use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use bigdecimal::{BigDecimal, num_bigint::BigInt};
use num_traits::{One, ToPrimitive, Zero};
use serde::{Serialize, Serializer, ser::Error as _};
use serde_json::{Value, ser, value::RawValue};
use std::{collections, io, str::FromStr};

/// Indentation used when rendering responses.
const INDENT: &[u8] = b"    ";

/// A JSON value whose integers are exact.
///
/// Maps are kept sorted by key, since DynamoDB maps carry no order.
#[derive(Clone, Debug, PartialEq)]
pub enum Json {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A number with no fractional part, every digit kept.
    Integer(BigInt),
    /// A number with a fractional part; always finite.
    Float(f64),
    /// A string.
    String(String),
    /// A list, in order.
    Array(Vec<Json>),
    /// A map.
    Object(collections::BTreeMap<String, Json>),
}

impl Serialize for Json {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Integer(integer) => {
                if let Some(integer) = integer.to_i64() {
                    serializer.serialize_i64(integer)
                } else if let Some(integer) = integer.to_u64() {
                    serializer.serialize_u64(integer)
                } else {
                    RawValue::from_string(integer.to_string())
                        .map_err(S::Error::custom)?
                        .serialize(serializer)
                }
            }
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::Array(values) => serializer.collect_seq(values),
            Self::Object(map) => serializer.collect_map(map),
        }
    }
}

/// Values that can be turned into plain JSON.
pub trait Normalize {
    /// Build the JSON representation, replacing every decimal by an integer or a float.
    ///
    /// Container shape and element order are preserved. Kinds with no JSON
    /// representation fail with [`Error::UnsupportedType`].
    fn normalize(&self) -> Result<Json>;
}

impl Normalize for BigDecimal {
    fn normalize(&self) -> Result<Json> {
        // whole iff abs(d) % 1 == 0, so negative whole numbers stay integers
        let fraction = self.abs() % BigDecimal::one();
        if fraction.is_zero() {
            let (integer, _) = self.with_scale(0).into_bigint_and_exponent();
            return Ok(Json::Integer(integer));
        }
        self.to_f64()
            .filter(|value| value.is_finite())
            .map(Json::Float)
            .ok_or_else(|| Error::InvalidNumber(self.to_string()))
    }
}

impl Normalize for types::AttributeValue {
    fn normalize(&self) -> Result<Json> {
        match self {
            Self::Null(_) => Ok(Json::Null),
            Self::Bool(value) => Ok(Json::Bool(*value)),
            Self::S(value) => Ok(Json::String(value.clone())),
            Self::N(value) => parse_number(value)?.normalize(),
            Self::L(values) => values.normalize(),
            Self::M(map) => map.normalize(),
            Self::B(_) => Err(Error::UnsupportedType("binary")),
            Self::Bs(_) => Err(Error::UnsupportedType("binary set")),
            Self::Ns(_) => Err(Error::UnsupportedType("number set")),
            Self::Ss(_) => Err(Error::UnsupportedType("string set")),
            _ => Err(Error::UnsupportedType("unknown attribute value")),
        }
    }
}

impl Normalize for collections::HashMap<String, types::AttributeValue> {
    fn normalize(&self) -> Result<Json> {
        self.iter()
            .map(|(key, value)| Ok((key.clone(), value.normalize()?)))
            .collect::<Result<_>>()
            .map(Json::Object)
    }
}

impl Normalize for Value {
    fn normalize(&self) -> Result<Json> {
        match self {
            Self::Null => Ok(Json::Null),
            Self::Bool(value) => Ok(Json::Bool(*value)),
            Self::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    Ok(Json::Integer(integer.into()))
                } else if let Some(integer) = number.as_u64() {
                    Ok(Json::Integer(integer.into()))
                } else {
                    number
                        .as_f64()
                        .map(Json::Float)
                        .ok_or_else(|| Error::InvalidNumber(number.to_string()))
                }
            }
            Self::String(value) => Ok(Json::String(value.clone())),
            Self::Array(values) => values.normalize(),
            Self::Object(map) => map
                .iter()
                .map(|(key, value)| Ok((key.clone(), value.normalize()?)))
                .collect::<Result<_>>()
                .map(Json::Object),
        }
    }
}

impl Normalize for Json {
    fn normalize(&self) -> Result<Json> {
        Ok(self.clone())
    }
}

impl<T: Normalize> Normalize for [T] {
    fn normalize(&self) -> Result<Json> {
        self.iter()
            .map(Normalize::normalize)
            .collect::<Result<_>>()
            .map(Json::Array)
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(&self) -> Result<Json> {
        self.as_slice().normalize()
    }
}

fn parse_number(value: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(value).map_err(|_| Error::InvalidNumber(value.to_string()))
}

/// Single-line output with a space after every `,` and `:`.
struct LineFormatter;

impl ser::Formatter for LineFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn to_string_with<F: ser::Formatter>(value: &Json, formatter: F) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json writes UTF-8 only
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Normalize a value and render it as JSON text indented by four spaces.
pub fn render<T: Normalize + ?Sized>(value: &T) -> Result<String> {
    to_string_with(&value.normalize()?, ser::PrettyFormatter::with_indent(INDENT))
}

/// Normalize a value and render it on a single line, `{"a": 1, "b": [2, 3]}`.
pub fn render_line<T: Normalize + ?Sized>(value: &T) -> Result<String> {
    to_string_with(&value.normalize()?, LineFormatter)
}
