pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod validation;

pub use entities::*;
pub use errors::*;
pub use ports::*;
pub use services::*;
