// Domain layer: service model, diagnostics and the ports the core depends on.

pub mod diagnostic;
pub mod model;
pub mod ports;
