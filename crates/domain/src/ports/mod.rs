pub mod auth;
pub mod content;
pub mod directory;

pub use auth::AuthProvider;
pub use content::ContentStore;
pub use directory::{Snapshots, UserDirectory};
