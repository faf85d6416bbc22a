//! Runtime field value type

use std::fmt;

/// Tolerance below which two `f32` values are considered unchanged.
pub const F32_TOLERANCE: f64 = 1e-4;

/// Tolerance below which two `f64` values are considered unchanged.
pub const F64_TOLERANCE: f64 = 1e-7;

/// Runtime value of one decoded leaf field.
///
/// Variants keep the wire width and signedness of the field they came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    UInt8(u8),
    Int8(i8),
    UInt16(u16),
    Int16(i16),
    UInt32(u32),
    Int32(i32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    /// NUL-trimmed fixed-length name or code
    Text(String),
}

impl Value {
    /// Whether this is a numeric zero. Text is never zero.
    pub fn is_zero(&self) -> bool {
        match *self {
            Value::UInt8(v) => v == 0,
            Value::Int8(v) => v == 0,
            Value::UInt16(v) => v == 0,
            Value::Int16(v) => v == 0,
            Value::UInt32(v) => v == 0,
            Value::Int32(v) => v == 0,
            Value::UInt64(v) => v == 0,
            Value::Float32(v) => v == 0.0,
            Value::Float64(v) => v == 0.0,
            Value::Text(_) => false,
        }
    }

    /// Change-detection equality.
    ///
    /// Floats compare within [`F32_TOLERANCE`] / [`F64_TOLERANCE`]; everything
    /// else compares exactly. Values of different variants are never equal.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float32(a), Value::Float32(b)) => f64::from(a - b).abs() < F32_TOLERANCE,
            (Value::Float64(a), Value::Float64(b)) => (a - b).abs() < F64_TOLERANCE,
            _ => self == other,
        }
    }

    /// Name of the wire type, used in logs and errors.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::UInt8(_) => "u8",
            Value::Int8(_) => "i8",
            Value::UInt16(_) => "u16",
            Value::Int16(_) => "i16",
            Value::UInt32(_) => "u32",
            Value::Int32(_) => "i32",
            Value::UInt64(_) => "u64",
            Value::Float32(_) => "f32",
            Value::Float64(_) => "f64",
            Value::Text(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::UInt8(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    u8 => UInt8,
    i8 => Int8,
    u16 => UInt16,
    i16 => Int16,
    u32 => UInt32,
    i32 => Int32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    String => Text,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_detection_covers_numeric_variants() {
        assert!(Value::Int8(0).is_zero());
        assert!(Value::UInt16(0).is_zero());
        assert!(Value::Float32(0.0).is_zero());
        assert!(Value::Float64(-0.0).is_zero());
        assert!(!Value::Float32(0.001).is_zero());
        assert!(!Value::Text(String::new()).is_zero());
    }

    #[test]
    fn different_variants_never_match() {
        assert!(!Value::UInt8(1).same_as(&Value::Int8(1)));
        assert!(!Value::Float32(1.0).same_as(&Value::Float64(1.0)));
    }

    #[test]
    fn display_matches_plain_formatting() {
        assert_eq!(Value::Int8(-1).to_string(), "-1");
        assert_eq!(Value::Float32(0.5).to_string(), "0.5");
        assert_eq!(Value::Text("SSTA".into()).to_string(), "SSTA");
    }

    proptest! {
        #[test]
        fn f32_within_tolerance_is_unchanged(base in -1000.0f32..1000.0, delta in 0.0f32..0.00005) {
            prop_assert!(Value::Float32(base).same_as(&Value::Float32(base + delta)));
        }

        #[test]
        fn f32_beyond_tolerance_is_changed(base in -1000.0f32..1000.0, delta in 0.01f32..10.0) {
            prop_assert!(!Value::Float32(base).same_as(&Value::Float32(base + delta)));
        }

        #[test]
        fn f64_tolerance_is_tighter(base in -1000.0f64..1000.0) {
            prop_assert!(Value::Float64(base).same_as(&Value::Float64(base + 1e-9)));
            prop_assert!(!Value::Float64(base).same_as(&Value::Float64(base + 1e-5)));
        }
    }
}
