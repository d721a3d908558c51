// Domain layer: core models and ports (interfaces). No terminal or HTTP types leak in here.

pub mod model;
pub mod ports;
