//! Adapters implementing the parser's ports.

pub mod params;

pub use params::InMemoryParamSource;
