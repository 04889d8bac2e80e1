use domain::validation::{
    validate_confirm_password, validate_email, validate_full_name, validate_password,
    validate_phone, REQ_PASSWORDS_MATCH,
};
use domain::{
    DomainError, DyslexiaLevel, Gender, NewUser, Role, Status, UserPatch, UserRecord,
};

/// Shown in the password box when editing an existing user. The real
/// password never reaches the form, and the placeholder never reaches the
/// backend: updates drop the password entirely.
pub const PASSWORD_PLACEHOLDER: &str = "********";

/// One field's failed requirements, for inline display next to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub unmet: Vec<String>,
}

/// Form State Holder: the draft user being created or edited, as raw input.
///
/// `editing == None` means create mode. Mutating the form never triggers a
/// remote call; only the user-management view's submit does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub editing: Option<String>,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<Role>,
    pub age: String,
    pub gender: Option<Gender>,
    pub status: Status,
    pub dyslexia_level: Option<DyslexiaLevel>,
    pub parent_name: String,
    pub contact_number: String,
    pub relationship: String,
    pub description: String,
}

impl UserForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pre-populate from an existing record for edit mode.
    pub fn load(&mut self, record: &UserRecord) {
        *self = Self {
            editing: record.id.clone(),
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            password: PASSWORD_PLACEHOLDER.to_string(),
            confirm_password: PASSWORD_PLACEHOLDER.to_string(),
            role: Some(record.role),
            age: record.age.map(|a| a.to_string()).unwrap_or_default(),
            gender: record.gender,
            status: record.status,
            dyslexia_level: record.dyslexia_level,
            parent_name: record.parent_name.clone().unwrap_or_default(),
            contact_number: record.contact_number.clone().unwrap_or_default(),
            relationship: record.relationship.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
        };
    }

    /// Check every field, returning inline errors in field order. Safe to
    /// call on each keystroke; submission requires an empty result.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let name = validate_full_name(&self.full_name);
        if !name.is_valid() {
            errors.push(FieldError {
                field: "full_name",
                unmet: name.unmet_labels(),
            });
        }

        let email = validate_email(&self.email);
        if !email.is_valid() {
            errors.push(FieldError {
                field: "email",
                unmet: email.unmet_labels(),
            });
        }

        if self.role.is_none() {
            errors.push(FieldError {
                field: "role",
                unmet: vec!["a role must be selected".to_string()],
            });
        }

        // Password rules only apply on create; edits ignore the password.
        if !self.is_editing() {
            let password = validate_password(&self.password);
            if !password.is_valid() {
                errors.push(FieldError {
                    field: "password",
                    unmet: password.unmet_labels(),
                });
            }
            let confirm = validate_confirm_password(&self.confirm_password, &self.password);
            if !confirm.is_valid() || self.confirm_password != self.password {
                errors.push(FieldError {
                    field: "confirm_password",
                    unmet: vec![REQ_PASSWORDS_MATCH.to_string()],
                });
            }
        }

        if !self.age.trim().is_empty() && self.age.trim().parse::<u32>().is_err() {
            errors.push(FieldError {
                field: "age",
                unmet: vec!["age must be a whole number".to_string()],
            });
        }

        let phone = validate_phone(&self.contact_number);
        if !phone.is_valid() {
            errors.push(FieldError {
                field: "contact_number",
                unmet: phone.unmet_labels(),
            });
        }

        errors
    }

    /// Build the create payload. Call only after `field_errors` is empty.
    pub fn to_new_user(&self) -> Result<NewUser, DomainError> {
        let role = self.role.ok_or_else(|| {
            DomainError::validation("role", vec!["a role must be selected".to_string()])
        })?;

        let mut record = UserRecord::new(
            self.full_name.trim().to_string(),
            self.email.trim().to_string(),
            role,
        );
        record.age = self.age.trim().parse().ok();
        record.gender = self.gender;
        record.status = self.status;
        record.dyslexia_level = self.dyslexia_level;
        record.parent_name = optional(&self.parent_name);
        record.contact_number = optional(&self.contact_number);
        record.relationship = optional(&self.relationship);
        record.description = optional(&self.description);

        Ok(NewUser {
            record,
            password: self.password.clone(),
        })
    }

    /// Build the merge patch for an edit. The password and the identity
    /// fields never appear here.
    pub fn to_patch(&self) -> UserPatch {
        UserPatch {
            full_name: Some(self.full_name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            role: self.role,
            age: self.age.trim().parse().ok(),
            gender: self.gender,
            status: Some(self.status),
            dyslexia_level: self.dyslexia_level,
            parent_name: optional(&self.parent_name),
            contact_number: optional(&self.contact_number),
            relationship: optional(&self.relationship),
            description: optional(&self.description),
            last_login: None,
        }
    }
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
