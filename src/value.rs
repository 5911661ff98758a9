use std::fmt::{self, Display};

use chrono::NaiveDateTime;
use enum_kinds::EnumKind;
use uuid::Uuid;

/// A dynamically-typed field value, as projected into the reader's row buffer.
///
/// Values don't store metadata about the column they came from. Instead, they
/// rely on the mapping descriptor and the entity's declared types to carry
/// that data for them. See [`Entity::field_type`].
///
/// [`Entity::field_type`]: crate::Entity::field_type
#[derive(EnumKind, Debug, Clone, PartialEq)]
#[enum_kind(ValueType)]
pub enum Value {
    /// The absent marker. Slots for auto-generated columns hold this until
    /// (and unless) something else writes them.
    Null,
    Bool(bool),
    Byte(u8),
    Char(char),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    DateTime(NaiveDateTime),
    Guid(Uuid),
    String(String),
}

/// A fixed-point decimal, stored as an unscaled integer and a base-10 scale.
///
/// `Decimal::new(12345, 2)` represents `123.45`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decimal {
    unscaled: i128,
    scale: u8,
}

/// Typed extraction from a [`Value`].
///
/// The value's internal type must match exactly, e.g. `i32` is not the same
/// as `i64`. Extraction never converts; a mismatch is reported by the reader
/// as a cast error.
pub trait FromValue
where
    Self: Sized,
{
    fn extract(value: &Value) -> Option<Self>;
}

impl Value {
    /// Returns this value's type.
    pub fn value_type(&self) -> ValueType {
        ValueType::from(self)
    }

    /// Returns whether this value is the absent marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns a reference to the underlying string, or [`None`] if the value
    /// is not stored as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Decimal {
    /// Creates a decimal from an unscaled integer and a base-10 scale.
    pub fn new(unscaled: i128, scale: u8) -> Self {
        Self { unscaled, scale }
    }

    /// Returns the unscaled integer value.
    pub fn unscaled(&self) -> i128 {
        self.unscaled
    }

    /// Returns the base-10 scale.
    pub fn scale(&self) -> u8 {
        self.scale
    }
}

macro_rules! from_value {
    ($ty:ty, $variant:ident) => {
        impl FromValue for $ty {
            fn extract(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

from_value!(bool, Bool);
from_value!(u8, Byte);
from_value!(char, Char);
from_value!(i16, Int16);
from_value!(i32, Int32);
from_value!(i64, Int64);
from_value!(f32, Float);
from_value!(f64, Double);
from_value!(Decimal, Decimal);
from_value!(NaiveDateTime, DateTime);
from_value!(Uuid, Guid);
from_value!(String, String);

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(v) => v.fmt(f),
            Self::Byte(v) => v.fmt(f),
            Self::Char(v) => v.fmt(f),
            Self::Int16(v) => v.fmt(f),
            Self::Int32(v) => v.fmt(f),
            Self::Int64(v) => v.fmt(f),
            Self::Float(v) => v.fmt(f),
            Self::Double(v) => v.fmt(f),
            Self::Decimal(v) => v.fmt(f),
            Self::DateTime(v) => v.fmt(f),
            Self::Guid(v) => v.fmt(f),
            Self::String(v) => v.fmt(f),
        }
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.unscaled);
        }
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let digits = self.unscaled.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if digits.len() <= scale {
            write!(f, "{}0.{}{}", sign, "0".repeat(scale - digits.len()), digits)
        } else {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{}{}.{}", sign, int, frac)
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Value;
    use serde::{Deserialize, Serialize};

    // Mirrors the variant set; kept separate so chrono/uuid serde support
    // stays behind the feature gate.
    impl Serialize for Value {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            Repr::from(self).serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Repr::deserialize(deserializer).map(Value::from)
        }
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename = "Value")]
    enum Repr {
        Null,
        Bool(bool),
        Byte(u8),
        Char(char),
        Int16(i16),
        Int32(i32),
        Int64(i64),
        Float(f32),
        Double(f64),
        Decimal(super::Decimal),
        DateTime(chrono::NaiveDateTime),
        Guid(uuid::Uuid),
        String(String),
    }

    impl From<&Value> for Repr {
        fn from(v: &Value) -> Self {
            match v.clone() {
                Value::Null => Self::Null,
                Value::Bool(v) => Self::Bool(v),
                Value::Byte(v) => Self::Byte(v),
                Value::Char(v) => Self::Char(v),
                Value::Int16(v) => Self::Int16(v),
                Value::Int32(v) => Self::Int32(v),
                Value::Int64(v) => Self::Int64(v),
                Value::Float(v) => Self::Float(v),
                Value::Double(v) => Self::Double(v),
                Value::Decimal(v) => Self::Decimal(v),
                Value::DateTime(v) => Self::DateTime(v),
                Value::Guid(v) => Self::Guid(v),
                Value::String(v) => Self::String(v),
            }
        }
    }

    impl From<Repr> for Value {
        fn from(r: Repr) -> Self {
            match r {
                Repr::Null => Self::Null,
                Repr::Bool(v) => Self::Bool(v),
                Repr::Byte(v) => Self::Byte(v),
                Repr::Char(v) => Self::Char(v),
                Repr::Int16(v) => Self::Int16(v),
                Repr::Int32(v) => Self::Int32(v),
                Repr::Int64(v) => Self::Int64(v),
                Repr::Float(v) => Self::Float(v),
                Repr::Double(v) => Self::Double(v),
                Repr::Decimal(v) => Self::Decimal(v),
                Repr::DateTime(v) => Self::DateTime(v),
                Repr::Guid(v) => Self::Guid(v),
                Repr::String(v) => Self::String(v),
            }
        }
    }
}
