pub mod content;
pub mod dashboard;
pub mod settings;
pub mod users;

pub use content::ContentView;
pub use dashboard::DashboardView;
pub use settings::SettingsView;
pub use users::{UserManagementView, ViewMode};
