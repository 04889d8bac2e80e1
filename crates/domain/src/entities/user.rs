use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
            Role::Parent => "Parent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Default for Status {
    fn default() -> Self {
        Status::Active
    }
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DyslexiaLevel {
    None,
    Mild,
    Moderate,
    Severe,
}

/// Core user entity as stored in the remote directory collection.
///
/// The password deliberately has no field here: it travels only in
/// [`NewUser`] on the create path and is never part of any read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Option<String>, // None for new users before persistence
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub status: Status,
    pub dyslexia_level: Option<DyslexiaLevel>,
    pub parent_name: Option<String>,
    pub contact_number: Option<String>,
    pub relationship: Option<String>,
    pub description: Option<String>,
    pub joined: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn new(full_name: String, email: String, role: Role) -> Self {
        Self {
            id: None,
            full_name,
            email,
            role,
            age: None,
            gender: None,
            status: Status::Active,
            dyslexia_level: None,
            parent_name: None,
            contact_number: None,
            relationship: None,
            description: None,
            joined: None,
            last_updated: None,
            last_login: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

/// Create-path payload: the record to store plus the one-time password used
/// to provision the matching auth credential.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub record: UserRecord,
    pub password: String,
}

/// Partial update merged into an existing record. The identifier and the
/// creation timestamp are never part of a patch, and neither is a password.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dyslexia_level: Option<DyslexiaLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl UserPatch {
    pub fn last_login(at: DateTime<Utc>) -> Self {
        UserPatch {
            last_login: Some(at),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == UserPatch::default()
    }

    /// Merge the supplied fields into `record`, leaving everything else
    /// (including `id` and `joined`) untouched.
    pub fn apply(&self, record: &mut UserRecord) {
        if let Some(full_name) = &self.full_name {
            record.full_name = full_name.clone();
        }
        if let Some(email) = &self.email {
            record.email = email.clone();
        }
        if let Some(role) = self.role {
            record.role = role;
        }
        if let Some(age) = self.age {
            record.age = Some(age);
        }
        if let Some(gender) = self.gender {
            record.gender = Some(gender);
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(level) = self.dyslexia_level {
            record.dyslexia_level = Some(level);
        }
        if let Some(parent_name) = &self.parent_name {
            record.parent_name = Some(parent_name.clone());
        }
        if let Some(contact_number) = &self.contact_number {
            record.contact_number = Some(contact_number.clone());
        }
        if let Some(relationship) = &self.relationship {
            record.relationship = Some(relationship.clone());
        }
        if let Some(description) = &self.description {
            record.description = Some(description.clone());
        }
        if let Some(last_login) = self.last_login {
            record.last_login = Some(last_login);
        }
    }
}
