// Domain layer: core model and ports (interfaces). The scrape loop depends
// only on these traits, never on the browser engine directly.

pub mod model;
pub mod ports;
