// Domain layer: models, the period vocabulary and the collaborator ports.

pub mod model;
pub mod period;
pub mod ports;
