// Domain layer: core models and ports (interfaces). No dependency on the
// adapters or the HTTP stack.

pub mod model;
pub mod ports;
