pub mod app;
pub mod form;
pub mod nav;
pub mod views;

pub use app::AdminApp;
pub use form::{FieldError, UserForm, PASSWORD_PLACEHOLDER};
pub use nav::{NavItem, Route, Sidebar};
pub use views::{ContentView, DashboardView, SettingsView, UserManagementView, ViewMode};
