//! Port descriptors for operation nodes.
//!
//! Each operation declares its ports via static `PortDescriptor` arrays.
//! The graph uses these to validate connections.

use serde::Serialize;

/// Default input port name.
pub const INPUT: &str = "input";
/// Auxiliary input port used by compositing-style operations.
pub const AUX: &str = "aux";
/// Default output port name.
pub const OUTPUT: &str = "output";

/// Whether a port is an input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PortDirection {
    Input,
    Output,
}

/// Static descriptor for a node's port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortDescriptor {
    pub name: &'static str,
    pub direction: PortDirection,
}

impl PortDescriptor {
    pub const fn input(name: &'static str) -> Self {
        Self {
            name,
            direction: PortDirection::Input,
        }
    }

    pub const fn output(name: &'static str) -> Self {
        Self {
            name,
            direction: PortDirection::Output,
        }
    }
}

/// `output` only: generators and the input proxy.
pub static SOURCE_PORTS: &[PortDescriptor] = &[PortDescriptor::output(OUTPUT)];

/// `input` + `output`: plain filters.
pub static FILTER_PORTS: &[PortDescriptor] = &[
    PortDescriptor::input(INPUT),
    PortDescriptor::output(OUTPUT),
];

/// `input` + `aux` + `output`: compositors and blends.
pub static COMPOSER_PORTS: &[PortDescriptor] = &[
    PortDescriptor::input(INPUT),
    PortDescriptor::input(AUX),
    PortDescriptor::output(OUTPUT),
];

/// `input` only: the output proxy.
pub static SINK_PORTS: &[PortDescriptor] = &[PortDescriptor::input(INPUT)];

/// Find a port by name and direction.
pub fn find(
    ports: &'static [PortDescriptor],
    name: &str,
    direction: PortDirection,
) -> Option<&'static PortDescriptor> {
    ports
        .iter()
        .find(|p| p.name == name && p.direction == direction)
}

/// Whether the port set has any input port.
pub fn has_input(ports: &[PortDescriptor]) -> bool {
    ports.iter().any(|p| p.direction == PortDirection::Input)
}

/// Whether the port set has any output port.
pub fn has_output(ports: &[PortDescriptor]) -> bool {
    ports.iter().any(|p| p.direction == PortDirection::Output)
}
