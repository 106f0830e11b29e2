// Domain layer: value types and the ports the core logic is written against.

pub mod model;
pub mod ports;
