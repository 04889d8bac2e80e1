use domain::validation::{validate_email, validate_full_name, validate_password, REQ_PASSWORDS_MATCH};
use domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    Profile,
    Appearance,
    Security,
    Notifications,
    Accessibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

/// Administrator preferences, kept with the profile. Saved as a whole from
/// the draft; there is no partial save per tab.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSettings {
    pub display_name: String,
    pub email: String,
    pub theme: Theme,
    pub language: String,
    pub notifications: bool,
    pub two_factor: bool,
    pub font_size: FontSize,
    pub keyboard_shortcuts: bool,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            display_name: "Admin User".to_string(),
            email: "admin@dyslexiclearners.com".to_string(),
            theme: Theme::Light,
            language: "en".to_string(),
            notifications: true,
            two_factor: false,
            font_size: FontSize::Medium,
            keyboard_shortcuts: true,
        }
    }
}

/// Settings View: tabbed preference form with a draft/saved split, so
/// cancel can always roll back to the last saved state.
pub struct SettingsView {
    tab: SettingsTab,
    saved: AdminSettings,
    draft: AdminSettings,
}

impl SettingsView {
    pub fn new(settings: AdminSettings) -> Self {
        Self {
            tab: SettingsTab::Profile,
            draft: settings.clone(),
            saved: settings,
        }
    }

    pub fn tab(&self) -> SettingsTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: SettingsTab) {
        self.tab = tab;
    }

    pub fn settings(&self) -> &AdminSettings {
        &self.saved
    }

    pub fn draft_mut(&mut self) -> &mut AdminSettings {
        &mut self.draft
    }

    pub fn save(&mut self) -> Result<(), DomainError> {
        let name = validate_full_name(&self.draft.display_name);
        if !name.is_valid() {
            return Err(DomainError::validation("display_name", name.unmet_labels()));
        }
        let email = validate_email(&self.draft.email);
        if !email.is_valid() {
            return Err(DomainError::validation("email", email.unmet_labels()));
        }
        self.saved = self.draft.clone();
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.draft = self.saved.clone();
    }

    /// Password changes go through the same strength policy as everywhere
    /// else. The actual credential update is the auth provider's business;
    /// this only gates the form.
    pub fn check_password_change(
        &self,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), DomainError> {
        let verdict = validate_password(new_password);
        if !verdict.is_valid() {
            return Err(DomainError::validation("new_password", verdict.unmet_labels()));
        }
        if confirm_password != new_password {
            return Err(DomainError::validation(
                "confirm_password",
                vec![REQ_PASSWORDS_MATCH.to_string()],
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_rolls_the_draft_back() {
        let mut view = SettingsView::new(AdminSettings::default());
        view.draft_mut().theme = Theme::Dark;
        view.cancel();
        assert_eq!(view.settings().theme, Theme::Light);
    }

    #[test]
    fn save_validates_the_profile_fields() {
        let mut view = SettingsView::new(AdminSettings::default());
        view.draft_mut().email = "not-an-email".to_string();
        assert!(view.save().is_err());

        view.draft_mut().email = "admin@example.com".to_string();
        view.save().unwrap();
        assert_eq!(view.settings().email, "admin@example.com");
    }

    #[test]
    fn password_change_is_gated_by_the_strength_policy() {
        let view = SettingsView::new(AdminSettings::default());
        assert!(view.check_password_change("weak", "weak").is_err());
        assert!(view
            .check_password_change("Str0ng!Pass", "Str0ng!Wrong")
            .is_err());
        assert!(view.check_password_change("Str0ng!Pass", "Str0ng!Pass").is_ok());
    }
}
