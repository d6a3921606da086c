// Domain layer: race record and standings models plus the config port.

pub mod model;
pub mod ports;
