use domain::Session;

/// The routed views exposed by the app. Paths are exact-match only; there
/// is no query-parameter or deep-linking contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Users,
    Content,
    Settings,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Landing,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Users,
        Route::Content,
        Route::Settings,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/admin-dashboard",
            Route::Users => "/users",
            Route::Content => "/content",
            Route::Settings => "/settings",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        // "/landing" is a historical alias for the root route.
        if path == "/landing" {
            return Some(Route::Landing);
        }
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Landing => "Home",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Dashboard => "Dashboard",
            Route::Users => "User Management",
            Route::Content => "Content Management",
            Route::Settings => "Settings",
        }
    }
}

/// Admins land on the dashboard after sign-in; everyone else goes back to
/// the public landing page.
pub fn post_login_route(session: &Session) -> Route {
    if session.is_admin {
        Route::Dashboard
    } else {
        Route::Landing
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub route: Route,
    pub label: &'static str,
    pub active: bool,
}

/// Navigation Shell: the static admin menu with active-route highlighting.
#[derive(Debug, Clone)]
pub struct Sidebar {
    active: Route,
}

impl Sidebar {
    const MENU: [Route; 4] = [Route::Dashboard, Route::Users, Route::Content, Route::Settings];

    pub fn new(active: Route) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Route {
        self.active
    }

    pub fn navigate(&mut self, route: Route) {
        self.active = route;
    }

    /// Logging out drops the admin area and returns to the login screen.
    pub fn logout(&mut self) -> Route {
        self.active = Route::Login;
        self.active
    }

    pub fn items(&self) -> Vec<NavItem> {
        Self::MENU
            .into_iter()
            .map(|route| NavItem {
                route,
                label: route.label(),
                active: route == self.active,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn paths_round_trip_exactly() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/landing"), Some(Route::Landing));
        assert_eq!(Route::from_path("/users/"), None);
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn exactly_one_menu_item_is_active() {
        let sidebar = Sidebar::new(Route::Users);
        let items = sidebar.items();
        let active: Vec<&NavItem> = items.iter().filter(|item| item.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].route, Route::Users);
    }

    #[test]
    fn login_routing_depends_on_admin_flag() {
        let mut session = Session {
            uid: "u-1".to_string(),
            email: "ada@example.com".to_string(),
            is_admin: true,
            signed_in_at: Utc::now(),
        };
        assert_eq!(post_login_route(&session), Route::Dashboard);
        session.is_admin = false;
        assert_eq!(post_login_route(&session), Route::Landing);
    }
}
