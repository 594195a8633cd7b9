use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;

use super::model::{CreateUserPayload, Role, User};
use super::password;
use crate::error::StoreError;

fn parse_user(item: &HashMap<String, AttributeValue>) -> Option<User> {
    let user_id = item
        .get("SK")
        .and_then(|v| v.as_s().ok())
        .and_then(|sk| sk.strip_prefix("USER#"))?
        .to_string();
    let user_type = item
        .get("user_type")
        .and_then(|v| v.as_s().ok())
        .and_then(|s| Role::parse(s))?;
    Some(User {
        user_id,
        user_name: item
            .get("user_name")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        user_type,
        created_at: item
            .get("created_at")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
    })
}

/// Create a user. Admin-only at the gate; uniqueness of `user_name` is
/// enforced with a conditional put on the username index item.
pub async fn create_user(
    client: &DynamoClient,
    table_name: &str,
    payload: CreateUserPayload,
) -> Result<User, StoreError> {
    let user_id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();
    let username_pk = format!("USERNAME#{}", payload.user_name);

    let claim = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S(username_pk.clone()))
        .item("SK", AttributeValue::S(username_pk))
        .item("user_id", AttributeValue::S(user_id.clone()))
        .condition_expression("attribute_not_exists(PK)")
        .send()
        .await;

    if let Err(e) = claim {
        let service_err = e.into_service_error();
        if service_err.is_conditional_check_failed_exception() {
            return Err(StoreError::Conflict(
                "el nombre de usuario ya existe".to_string(),
            ));
        }
        return Err(StoreError::store(service_err));
    }

    let put_user = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S("USER".to_string()))
        .item("SK", AttributeValue::S(format!("USER#{}", user_id)))
        .item("user_name", AttributeValue::S(payload.user_name.clone()))
        .item(
            "user_type",
            AttributeValue::S(payload.user_type.as_str().to_string()),
        )
        .item(
            "password_hash",
            AttributeValue::S(password::hash_password(&payload.password)),
        )
        .item("created_at", AttributeValue::S(now.clone()))
        .send()
        .await;

    // Release the username claim if the user row never landed, otherwise
    // the name stays taken with no account behind it.
    if let Err(e) = put_user {
        let release = client
            .delete_item()
            .table_name(table_name)
            .key("PK", AttributeValue::S(format!("USERNAME#{}", payload.user_name)))
            .key("SK", AttributeValue::S(format!("USERNAME#{}", payload.user_name)))
            .send()
            .await;
        if let Err(release_err) = release {
            tracing::warn!("failed to release username claim: {}", release_err);
        }
        return Err(StoreError::store(e));
    }

    Ok(User {
        user_id,
        user_name: payload.user_name,
        user_type: payload.user_type,
        created_at: now,
    })
}

pub async fn get_user(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
) -> Result<User, StoreError> {
    let result = client
        .get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S("USER".to_string()))
        .key("SK", AttributeValue::S(format!("USER#{}", user_id)))
        .send()
        .await
        .map_err(StoreError::store)?;

    result
        .item()
        .and_then(parse_user)
        .ok_or(StoreError::NotFound)
}

pub async fn list_users(
    client: &DynamoClient,
    table_name: &str,
) -> Result<Vec<User>, StoreError> {
    let result = client
        .query()
        .table_name(table_name)
        .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
        .expression_attribute_values(":pk", AttributeValue::S("USER".to_string()))
        .expression_attribute_values(":sk_prefix", AttributeValue::S("USER#".to_string()))
        .send()
        .await
        .map_err(StoreError::store)?;

    let mut users: Vec<User> = result.items().iter().filter_map(parse_user).collect();
    users.sort_by(|a, b| a.user_name.cmp(&b.user_name));
    Ok(users)
}

/// Look up a user and their stored password hash by username, for login.
/// Returns `Ok(None)` on unknown username so the caller can answer with a
/// generic credentials error.
pub async fn find_credentials(
    client: &DynamoClient,
    table_name: &str,
    user_name: &str,
) -> Result<Option<(User, String)>, StoreError> {
    let username_pk = format!("USERNAME#{}", user_name);
    let result = client
        .get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S(username_pk.clone()))
        .key("SK", AttributeValue::S(username_pk))
        .send()
        .await
        .map_err(StoreError::store)?;

    let Some(user_id) = result
        .item()
        .and_then(|item| item.get("user_id"))
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
    else {
        return Ok(None);
    };

    let result = client
        .get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S("USER".to_string()))
        .key("SK", AttributeValue::S(format!("USER#{}", user_id)))
        .send()
        .await
        .map_err(StoreError::store)?;

    let Some(item) = result.item() else {
        return Ok(None);
    };
    let Some(user) = parse_user(item) else {
        return Ok(None);
    };
    let hash = item
        .get("password_hash")
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .unwrap_or_default();

    Ok(Some((user, hash)))
}
