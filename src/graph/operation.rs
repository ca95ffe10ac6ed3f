//! Operation primitives the rock surface graph is assembled from.
//!
//! Each variant names a primitive in the host's operation registry. The
//! numerics behind them (noise, emboss kernel, tone map) live in the host;
//! here an operation is only a name, a port layout and a parameter schema.

use crate::graph::port::{self, PortDescriptor};
use crate::graph::value::{ParamKind, ParamValue};
use crate::types::Color;
use serde::{Deserialize, Serialize};

/// A declared parameter of an operation and its default value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub default: ParamValue,
}

impl ParamSpec {
    const fn new(name: &'static str, default: ParamValue) -> Self {
        Self { name, default }
    }

    pub fn kind(&self) -> ParamKind {
        self.default.kind()
    }
}

const CELL_NOISE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("scale", ParamValue::Double(1.0)),
    ParamSpec::new("shape", ParamValue::Double(2.0)),
    ParamSpec::new("rank", ParamValue::Int(1)),
    ParamSpec::new("iterations", ParamValue::Int(1)),
    ParamSpec::new("palettize", ParamValue::Bool(false)),
    ParamSpec::new("seed", ParamValue::Int(0)),
];

const EMBOSS_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("azimuth", ParamValue::Double(30.0)),
    ParamSpec::new("elevation", ParamValue::Double(45.0)),
    ParamSpec::new("depth", ParamValue::Int(20)),
];

const MULTIPLY_PARAMS: &[ParamSpec] = &[ParamSpec::new("value", ParamValue::Double(1.0))];

const COLOR_PARAMS: &[ParamSpec] = &[ParamSpec::new("value", ParamValue::Color(Color::BLACK))];

const RGB_CLIP_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("clip-low", ParamValue::Bool(true)),
    ParamSpec::new("low-limit", ParamValue::Double(0.0)),
    ParamSpec::new("clip-high", ParamValue::Bool(true)),
    ParamSpec::new("high-limit", ParamValue::Double(1.0)),
];

const CROP_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("x", ParamValue::Double(0.0)),
    ParamSpec::new("y", ParamValue::Double(0.0)),
    ParamSpec::new("width", ParamValue::Double(0.0)),
    ParamSpec::new("height", ParamValue::Double(0.0)),
    ParamSpec::new("reset-origin", ParamValue::Bool(false)),
];

const OVER_PARAMS: &[ParamSpec] = &[ParamSpec::new("srgb", ParamValue::Bool(false))];

const OPACITY_PARAMS: &[ParamSpec] = &[ParamSpec::new("value", ParamValue::Double(1.0))];

const MANTIUK06_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("contrast", ParamValue::Double(0.1)),
    ParamSpec::new("saturation", ParamValue::Double(0.8)),
    ParamSpec::new("detail", ParamValue::Double(1.0)),
];

const LAYER_MODE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("layer-mode", ParamValue::Int(LAYER_MODE_NORMAL)),
    ParamSpec::new("opacity", ParamValue::Double(1.0)),
];

const DOG_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("radius1", ParamValue::Double(1.0)),
    ParamSpec::new("radius2", ParamValue::Double(2.0)),
];

/// `gimp:layer-mode` value for normal blending.
pub const LAYER_MODE_NORMAL: i64 = 28;
/// `gimp:layer-mode` value for soft light.
pub const LAYER_MODE_SOFTLIGHT: i64 = 45;

/// Primitives available to the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    CellNoise,
    Emboss,
    Multiply,
    Color,
    Src,
    RgbClip,
    Crop,
    Over,
    Opacity,
    Mantiuk06,
    Nop,
    LayerMode,
    DifferenceOfGaussians,
}

impl Operation {
    /// Registry name of the primitive.
    pub fn registry_name(&self) -> &'static str {
        match self {
            Operation::CellNoise => "gegl:cell-noise",
            Operation::Emboss => "gegl:emboss",
            Operation::Multiply => "gegl:multiply",
            Operation::Color => "gegl:color",
            Operation::Src => "gegl:src",
            Operation::RgbClip => "gegl:rgb-clip",
            Operation::Crop => "gegl:crop",
            Operation::Over => "gegl:over",
            Operation::Opacity => "gegl:opacity",
            Operation::Mantiuk06 => "gegl:mantiuk06",
            Operation::Nop => "gegl:nop",
            Operation::LayerMode => "gimp:layer-mode",
            Operation::DifferenceOfGaussians => "gegl:difference-of-gaussians",
        }
    }

    pub fn all() -> &'static [Operation] {
        &[
            Operation::CellNoise,
            Operation::Emboss,
            Operation::Multiply,
            Operation::Color,
            Operation::Src,
            Operation::RgbClip,
            Operation::Crop,
            Operation::Over,
            Operation::Opacity,
            Operation::Mantiuk06,
            Operation::Nop,
            Operation::LayerMode,
            Operation::DifferenceOfGaussians,
        ]
    }

    pub fn ports(&self) -> &'static [PortDescriptor] {
        match self {
            Operation::CellNoise | Operation::Color => port::SOURCE_PORTS,
            Operation::Src
            | Operation::Multiply
            | Operation::Over
            | Operation::Opacity
            | Operation::LayerMode => port::COMPOSER_PORTS,
            Operation::Emboss
            | Operation::RgbClip
            | Operation::Crop
            | Operation::Mantiuk06
            | Operation::Nop
            | Operation::DifferenceOfGaussians => port::FILTER_PORTS,
        }
    }

    pub fn params(&self) -> &'static [ParamSpec] {
        match self {
            Operation::CellNoise => CELL_NOISE_PARAMS,
            Operation::Emboss => EMBOSS_PARAMS,
            Operation::Multiply => MULTIPLY_PARAMS,
            Operation::Color => COLOR_PARAMS,
            Operation::Src | Operation::Nop => &[],
            Operation::RgbClip => RGB_CLIP_PARAMS,
            Operation::Crop => CROP_PARAMS,
            Operation::Over => OVER_PARAMS,
            Operation::Opacity => OPACITY_PARAMS,
            Operation::Mantiuk06 => MANTIUK06_PARAMS,
            Operation::LayerMode => LAYER_MODE_PARAMS,
            Operation::DifferenceOfGaussians => DOG_PARAMS,
        }
    }

    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params().iter().find(|p| p.name == name)
    }

    /// Generators have no input port and start a branch of the graph.
    pub fn is_generator(&self) -> bool {
        !port::has_input(self.ports())
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.registry_name())
    }
}
