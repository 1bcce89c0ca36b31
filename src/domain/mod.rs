// Domain layer: wire models and ports (interfaces). No dependencies beyond serde.

pub mod model;
pub mod ports;
