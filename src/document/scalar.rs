use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone};
use serde_json::{Number, Value};
use std::fmt;
use uuid::Uuid;

/// Leaf payload of a `Value` node.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// Borrowed form of [`Scalar`], shared by arena nodes and `serde_json` values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    Null,
    Bool(bool),
    Number(&'a Number),
    String(&'a str),
}

impl Scalar {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_scalar_ref(&self) -> ScalarRef<'_> {
        match self {
            Self::Null => ScalarRef::Null,
            Self::Bool(b) => ScalarRef::Bool(*b),
            Self::Number(n) => ScalarRef::Number(n),
            Self::String(s) => ScalarRef::String(s),
        }
    }

    /// Converts a floating point number, mapping NaN and infinities to null.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl<'a> ScalarRef<'a> {
    /// Reads the scalar payload of a `serde_json::Value`, if it is one.
    #[must_use]
    pub fn from_json(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n)),
            Value::String(s) => Some(Self::String(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    #[must_use]
    pub fn to_owned_scalar(self) -> Scalar {
        match self {
            Self::Null => Scalar::Null,
            Self::Bool(b) => Scalar::Bool(b),
            Self::Number(n) => Scalar::Number(n.clone()),
            Self::String(s) => Scalar::String(s.to_string()),
        }
    }

    #[must_use]
    pub fn to_json(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.to_string()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_scalar_ref().to_json())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! scalar_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

scalar_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Self::from_f64(f64::from(value))
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<char> for Scalar {
    fn from(value: char) -> Self {
        Self::String(value.to_string())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Scalar
where
    Tz::Offset: fmt::Display,
{
    fn from(value: DateTime<Tz>) -> Self {
        Self::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(value: NaiveDateTime) -> Self {
        Self::String(value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

impl From<NaiveDate> for Scalar {
    fn from(value: NaiveDate) -> Self {
        Self::String(value.format("%Y-%m-%d").to_string())
    }
}

impl From<Uuid> for Scalar {
    fn from(value: Uuid) -> Self {
        Self::String(value.hyphenated().to_string())
    }
}
