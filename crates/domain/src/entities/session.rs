use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated session returned by a successful sign-in.
///
/// `is_admin` decides the post-login route: admins land on the dashboard,
/// everyone else on the public landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    pub email: String,
    pub is_admin: bool,
    pub signed_in_at: DateTime<Utc>,
}
