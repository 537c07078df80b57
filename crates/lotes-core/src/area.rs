//! Fixed-point area quantity in square metres.
//!
//! Areas are stored as whole centiares (hundredths of a square metre) so that
//! ledger arithmetic is exact: `area_after - area_before` always equals the
//! applied delta, with no floating-point drift across a batch. Inputs are
//! rounded to the nearest 0.01 m².
//!
//! On the wire an `Area` is a plain JSON number of square metres.

use std::borrow::Cow;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ValidationError;

/// Centiares per square metre.
const SCALE: i64 = 100;

/// Largest magnitude accepted, in m². Keeps centiare sums far from `i64` overflow.
pub const MAX_M2: f64 = 1.0e12;

/// An area in square metres with 0.01 m² resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Area(i64);

impl Area {
    pub const ZERO: Self = Self(0);

    /// Build from a raw centiare count.
    #[must_use]
    pub const fn from_centiares(centiares: i64) -> Self {
        Self(centiares)
    }

    /// Build from whole square metres.
    #[must_use]
    pub const fn from_whole_m2(m2: i64) -> Self {
        Self(m2 * SCALE)
    }

    /// Build from a floating-point square-metre value, rounding to 0.01 m².
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidArea` for NaN, infinities, or values
    /// beyond [`MAX_M2`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_m2(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value.abs() > MAX_M2 {
            return Err(ValidationError::InvalidArea {
                input: value.to_string(),
            });
        }
        Ok(Self((value * 100.0).round() as i64))
    }

    #[must_use]
    pub const fn centiares(self) -> i64 {
        self.0
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_m2(self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Area {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Area {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Area {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Renders the shortest decimal form: `150`, `150.5`, `150.25`.
/// Honors the `+` flag, so `{:+}` prints `+50`.
impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 {
            "-"
        } else if f.sign_plus() {
            "+"
        } else {
            ""
        };
        let abs = self.0.unsigned_abs();
        let whole = abs / 100;
        let frac = abs % 100;
        if frac == 0 {
            write!(f, "{sign}{whole}")
        } else if frac % 10 == 0 {
            write!(f, "{sign}{whole}.{}", frac / 10)
        } else {
            write!(f, "{sign}{whole}.{frac:02}")
        }
    }
}

impl FromStr for Area {
    type Err = ValidationError;

    /// Parse a user-entered number. Accepts `,` as the decimal separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(',', ".");
        let value: f64 = normalized
            .parse()
            .map_err(|_| ValidationError::InvalidArea {
                input: s.to_string(),
            })?;
        Self::from_m2(value)
    }
}

impl Serialize for Area {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_m2())
    }
}

impl<'de> Deserialize<'de> for Area {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_m2(value).map_err(D::Error::custom)
    }
}

impl JsonSchema for Area {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("Area")
    }

    fn inline_schema() -> bool {
        true
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        f64::json_schema(generator)
    }
}
