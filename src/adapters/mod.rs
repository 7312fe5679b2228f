// Adapters layer: concrete implementations for external systems. The live
// browser engine and the parsed-HTML card source both satisfy the domain
// ports; output writing is plain file IO.

pub mod browser;
pub mod fragment;
pub mod output;
