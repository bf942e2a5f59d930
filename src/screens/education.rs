//! Educational articles. Non-admins only ever see published content.

use super::{require, text_matches, ResourceFamily, ResourceList};
use crate::api::{ApiClient, ApiError};
use crate::messages::{self, FamilyMessages};
use crate::models::{EducationCategory, EducationalContent, Role, User};
use crate::policy::Subject;

pub struct EducationFamily;

#[derive(Debug, Clone, Default)]
pub struct EducationFilter {
    pub category: Option<EducationCategory>,
}

impl ResourceFamily for EducationFamily {
    type Item = EducationalContent;
    type Filter = EducationFilter;

    const SUBJECT: Subject = Subject::Education;
    const MESSAGES: FamilyMessages = messages::EDUCATION;

    async fn fetch(
        api: &ApiClient,
        user: Option<&User>,
    ) -> Result<Vec<EducationalContent>, ApiError> {
        let crud = api.resource::<EducationalContent>();
        match user.map(|u| u.role) {
            Some(Role::Admin) => crud.get_all().await,
            _ => crud.published().await,
        }
    }

    fn matches(item: &EducationalContent, search: &str, filter: &EducationFilter) -> bool {
        filter.category.map_or(true, |c| c == item.category)
            && (text_matches(search, &[Some(&item.title), item.summary.as_deref()])
                || item.tags.iter().any(|t| t.to_lowercase().contains(search)))
    }

    fn draft(user: Option<&User>) -> EducationalContent {
        EducationalContent {
            author_name: user.and_then(|u| u.full_name.clone()),
            ..EducationalContent::default()
        }
    }

    fn validate(draft: &EducationalContent) -> Result<(), String> {
        require(&draft.title)?;
        require(&draft.content)
    }
}

pub fn category_label(category: EducationCategory) -> &'static str {
    match category {
        EducationCategory::General => "Tổng quát",
        EducationCategory::Treatment => "Điều trị",
        EducationCategory::Prevention => "Phòng ngừa",
        EducationCategory::Nutrition => "Dinh dưỡng",
        EducationCategory::MentalHealth => "Sức khỏe tâm thần",
        EducationCategory::Lifestyle => "Lối sống",
        EducationCategory::Faq => "Câu hỏi thường gặp",
        EducationCategory::News => "Tin tức",
        EducationCategory::Unknown => messages::UNKNOWN_VALUE,
    }
}

/// Card excerpt: the summary, else the first `max` characters of the body.
pub fn excerpt(item: &EducationalContent, max: usize) -> String {
    if let Some(summary) = item.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        return summary.to_string();
    }
    let mut chars = item.content.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

impl ResourceList<EducationFamily> {
    /// Articles of one category from the backend. Only administrators see
    /// drafts.
    pub async fn in_category(&self, category: EducationCategory) -> Vec<EducationalContent> {
        let content = self.core().api().resource::<EducationalContent>();
        let mut articles = self.scoped_query(content.by_category(category)).await;
        let is_admin = self.core().current_user().is_some_and(|u| u.is_admin());
        if !is_admin {
            articles.retain(|a| a.is_published);
        }
        articles
    }
}
