use config::{Config, DirectoryBackend};
use directory::{MemoryAuth, MemoryContent, MemoryDirectory, RestAuth, RestContent, RestDirectory};
use domain::{AuthProvider, AuthService, ContentService, ContentStore, UserDirectory, UserService};
use std::sync::Arc;

/// Admin Application - composition root.
///
/// Builds the configured adapter set once and wires the domain services on
/// top of it; the api-server and the views only ever see the services.
pub struct AdminApp {
    pub users: UserService,
    pub auth: AuthService,
    pub content: ContentService,
}

impl AdminApp {
    /// Fully in-process app: memory-backed directory, auth and content.
    pub fn in_memory() -> Self {
        Self::assemble(
            Arc::new(MemoryDirectory::new()),
            Arc::new(MemoryAuth::new()),
            Arc::new(MemoryContent::new()),
        )
    }

    pub fn from_config(config: &Config) -> Self {
        match config.backend {
            DirectoryBackend::Memory => Self::in_memory(),
            DirectoryBackend::Rest => Self::assemble(
                RestDirectory::connect(&config.directory),
                Arc::new(RestAuth::new(&config.directory)),
                Arc::new(RestContent::new(&config.directory)),
            ),
        }
    }

    fn assemble(
        directory: Arc<dyn UserDirectory>,
        auth: Arc<dyn AuthProvider>,
        content: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            users: UserService::new(directory.clone(), auth.clone()),
            auth: AuthService::new(auth, directory),
            content: ContentService::new(content),
        }
    }
}
