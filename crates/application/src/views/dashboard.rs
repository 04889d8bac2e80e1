use chrono::{Duration, Utc};
use domain::UserRecord;

/// One summary card at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub caption: String,
}

/// Dashboard overview: stat cards and a recent-logins table, all computed
/// from the latest snapshot. Nothing here writes anywhere.
pub struct DashboardView {
    users: Vec<UserRecord>,
    content_count: usize,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            content_count: 0,
        }
    }

    pub fn apply_snapshot(&mut self, users: Vec<UserRecord>) {
        self.users = users;
    }

    pub fn set_content_count(&mut self, count: usize) {
        self.content_count = count;
    }

    pub fn cards(&self) -> Vec<StatCard> {
        let total = self.users.len();
        let active = self.users.iter().filter(|u| u.is_active()).count();
        let week_ago = Utc::now() - Duration::days(7);
        let new_this_week = self
            .users
            .iter()
            .filter(|u| u.joined.map_or(false, |joined| joined > week_ago))
            .count();

        vec![
            StatCard {
                title: "Total Users",
                value: total.to_string(),
                caption: format!("{} active", active),
            },
            StatCard {
                title: "Content Items",
                value: self.content_count.to_string(),
                caption: "across all categories".to_string(),
            },
            StatCard {
                title: "New This Week",
                value: new_this_week.to_string(),
                caption: "last 7 days".to_string(),
            },
            StatCard {
                title: "Inactive Accounts",
                value: (total - active).to_string(),
                caption: "currently disabled".to_string(),
            },
        ]
    }

    /// Most recently signed-in users, newest first.
    pub fn recent_logins(&self) -> Vec<&UserRecord> {
        let mut seen: Vec<&UserRecord> = self
            .users
            .iter()
            .filter(|u| u.last_login.is_some())
            .collect();
        seen.sort_by(|a, b| b.last_login.cmp(&a.last_login));
        seen.truncate(5);
        seen
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Role, Status};

    fn user(name: &str, status: Status) -> UserRecord {
        let mut record = UserRecord::new(
            name.to_string(),
            format!("{}@example.com", name.to_lowercase()),
            Role::Student,
        );
        record.status = status;
        record.joined = Some(Utc::now());
        record
    }

    #[test]
    fn cards_reflect_the_snapshot() {
        let mut dashboard = DashboardView::new();
        dashboard.apply_snapshot(vec![
            user("Ada", Status::Active),
            user("Grace", Status::Inactive),
        ]);
        dashboard.set_content_count(3);

        let cards = dashboard.cards();
        assert_eq!(cards[0].value, "2");
        assert_eq!(cards[0].caption, "1 active");
        assert_eq!(cards[1].value, "3");
        assert_eq!(cards[2].value, "2");
        assert_eq!(cards[3].value, "1");
    }

    #[test]
    fn recent_logins_sorts_newest_first_and_caps_at_five() {
        let mut users = Vec::new();
        for i in 0..7 {
            let mut record = user(&format!("User{}", i), Status::Active);
            record.last_login = Some(Utc::now() - Duration::minutes(i));
            users.push(record);
        }
        let mut dashboard = DashboardView::new();
        dashboard.apply_snapshot(users);

        let recent = dashboard.recent_logins();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].full_name, "User0");
    }
}
