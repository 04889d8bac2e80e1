pub mod content;
pub mod session;
pub mod user;

pub use content::*;
pub use session::*;
pub use user::*;
