use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::EducationCategory;
use super::{wire, EntityId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationalContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub title: String,
    pub summary: Option<String>,
    #[serde(default)]
    pub content: String,
    pub category: EducationCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
    pub featured_image: Option<String>,
    pub author_name: Option<String>,
    #[serde(default, skip_serializing, deserialize_with = "wire::opt_datetime")]
    pub published_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing, deserialize_with = "wire::opt_datetime")]
    pub created_at: Option<NaiveDateTime>,
}

impl EducationalContent {
    /// Parses a comma-separated tag field, dropping blanks.
    pub fn set_tags_from_input(&mut self, input: &str) {
        self.tags = input
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// Date shown on cards: publication date, else creation date.
    pub fn display_date(&self) -> Option<NaiveDateTime> {
        self.published_at.or(self.created_at)
    }
}

impl Default for EducationalContent {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            summary: None,
            content: String::new(),
            category: EducationCategory::General,
            tags: Vec::new(),
            is_published: false,
            featured_image: None,
            author_name: None,
            published_at: None,
            created_at: None,
        }
    }
}
