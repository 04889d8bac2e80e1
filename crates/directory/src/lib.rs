pub mod memory;
pub mod rest;

pub use memory::{MemoryAuth, MemoryContent, MemoryDirectory};
pub use rest::{RestAuth, RestContent, RestDirectory};
