use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::NotificationType;
use super::{wire, EntityId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub user_id: Option<EntityId>,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub action_url: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_datetime")]
    pub created_at: Option<NaiveDateTime>,
}
