use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;

use super::model::{NotificationSettings, UpdateNotificationSettingsPayload};
use crate::error::StoreError;

/// Defaults to inactive when the row was never written.
pub async fn get_settings(
    client: &DynamoClient,
    table_name: &str,
) -> Result<NotificationSettings, StoreError> {
    let result = client
        .get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S("SETTINGS".to_string()))
        .key("SK", AttributeValue::S("NOTIFICATIONS".to_string()))
        .send()
        .await
        .map_err(StoreError::store)?;

    let Some(item) = result.item() else {
        return Ok(NotificationSettings {
            is_active: false,
            notification_email: None,
            updated_at: String::new(),
        });
    };

    Ok(NotificationSettings {
        is_active: item
            .get("is_active")
            .and_then(|v| v.as_bool().ok())
            .copied()
            .unwrap_or(false),
        notification_email: item
            .get("notification_email")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string()),
        updated_at: item
            .get("updated_at")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
    })
}

pub async fn upsert_settings(
    client: &DynamoClient,
    table_name: &str,
    payload: UpdateNotificationSettingsPayload,
) -> Result<NotificationSettings, StoreError> {
    let now = chrono::Utc::now().to_rfc3339();

    let mut builder = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S("SETTINGS".to_string()))
        .item("SK", AttributeValue::S("NOTIFICATIONS".to_string()))
        .item("is_active", AttributeValue::Bool(payload.is_active))
        .item("updated_at", AttributeValue::S(now.clone()));
    if let Some(email) = &payload.notification_email {
        builder = builder.item("notification_email", AttributeValue::S(email.clone()));
    }
    builder.send().await.map_err(StoreError::store)?;

    Ok(NotificationSettings {
        is_active: payload.is_active,
        notification_email: payload.notification_email,
        updated_at: now,
    })
}
