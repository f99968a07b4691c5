// Domain layer: project layout, step model and ports. No process or filesystem access here.

pub mod layout;
pub mod model;
pub mod ports;
