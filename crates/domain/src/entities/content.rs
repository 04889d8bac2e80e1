use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    Lesson,
    Activity,
    Exercise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A learning-content entry shown in the content management view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Option<String>,
    pub title: String,
    pub kind: ContentKind,
    pub category: String,
    pub difficulty: Difficulty,
    pub updated: Option<DateTime<Utc>>,
}

impl ContentItem {
    pub fn new(title: String, kind: ContentKind, category: String, difficulty: Difficulty) -> Self {
        Self {
            id: None,
            title,
            kind,
            category,
            difficulty,
            updated: None,
        }
    }
}
