use serde::{Deserialize, Serialize};

/// Singleton row controlling the new-receso notification mail.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NotificationSettings {
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNotificationSettingsPayload {
    pub is_active: bool,
    pub notification_email: Option<String>,
}
