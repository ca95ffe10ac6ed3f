//! The filter's public parameter surface.
//!
//! Ranges are declarative: out-of-range writes are clamped into range, NaN
//! is rejected, and the wrong value kind is a type error.

use crate::error::{Result, RockSurfaceError};
use crate::graph::value::{ParamKind, ParamValue};
use crate::types::Color;

pub const SCALE: &str = "scale";
pub const SEED: &str = "seed";
pub const AZIMUTH: &str = "azimuth";
pub const ELEVATION: &str = "elevation";
pub const DEPTH: &str = "depth";
pub const VALUE: &str = "value";
pub const SWITCH_M6: &str = "switchm6";
pub const TONEMAP: &str = "tonemap";
pub const SLDOG: &str = "sldog";

/// Declaration of one public property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertySpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: ParamValue,
    /// Inclusive `(min, max)` for numeric properties.
    pub range: Option<(f64, f64)>,
    /// Whether writes go through a redirect to an internal node.
    /// The toggle is the one property the filter keeps for itself.
    pub redirected: bool,
}

impl PropertySpec {
    const fn double(name: &'static str, default: f64, min: f64, max: f64) -> Self {
        Self {
            name,
            kind: ParamKind::Double,
            default: ParamValue::Double(default),
            range: Some((min, max)),
            redirected: true,
        }
    }

    const fn int(name: &'static str, default: i64, min: f64, max: f64) -> Self {
        Self {
            name,
            kind: ParamKind::Int,
            default: ParamValue::Int(default),
            range: Some((min, max)),
            redirected: true,
        }
    }

    /// Bring `value` into this property's kind and range.
    pub fn clamp(&self, value: ParamValue) -> Result<ParamValue> {
        let coerced = value
            .coerce(self.kind)
            .ok_or_else(|| RockSurfaceError::ParameterType {
                param: self.name.to_string(),
                expected: self.kind.name(),
                actual: value.kind().name(),
            })?;

        let Some((min, max)) = self.range else {
            return Ok(coerced);
        };

        let clamped = match coerced {
            ParamValue::Double(v) if v.is_nan() => {
                return Err(RockSurfaceError::InvalidValue {
                    param: self.name.to_string(),
                    message: "NaN is not a valid value".to_string(),
                });
            }
            ParamValue::Double(v) => ParamValue::Double(v.clamp(min, max)),
            ParamValue::Int(v) => ParamValue::Int(v.clamp(min as i64, max as i64)),
            other => other,
        };

        if clamped != coerced {
            tracing::warn!(
                "Property '{}' value {} out of range [{}, {}], clamped to {}",
                self.name,
                coerced,
                min,
                max,
                clamped
            );
        }
        Ok(clamped)
    }
}

/// All public properties, in declaration order.
pub static PROPERTIES: &[PropertySpec] = &[
    PropertySpec::double(SCALE, 0.122, 0.05, 0.65),
    PropertySpec::int(SEED, 0, 0.0, i32::MAX as f64),
    PropertySpec::double(AZIMUTH, 35.0, 0.0, 360.0),
    PropertySpec::double(ELEVATION, 30.0, 10.0, 50.0),
    PropertySpec::int(DEPTH, 6, 1.0, 25.0),
    PropertySpec {
        name: VALUE,
        kind: ParamKind::Color,
        default: ParamValue::Color(Color::ROCK_TAN),
        range: None,
        redirected: true,
    },
    PropertySpec {
        name: SWITCH_M6,
        kind: ParamKind::Bool,
        default: ParamValue::Bool(true),
        range: None,
        redirected: false,
    },
    PropertySpec::double(TONEMAP, 0.3, 0.0, 0.7),
    PropertySpec::double(SLDOG, 0.5, 0.0, 1.0),
];

/// Look up a property by name.
pub fn spec(name: &str) -> Result<&'static PropertySpec> {
    PROPERTIES
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| RockSurfaceError::UnknownProperty(name.to_string()))
}
