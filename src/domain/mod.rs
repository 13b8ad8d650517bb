// Domain layer: draw models and the search port. No I/O here.

pub mod model;
pub mod ports;
