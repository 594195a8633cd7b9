use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;

use super::model::{CreateObraSocialPayload, ObraSocial};
use crate::error::StoreError;

fn parse_obra(item: &HashMap<String, AttributeValue>) -> Option<ObraSocial> {
    let id = item
        .get("SK")
        .and_then(|v| v.as_s().ok())
        .and_then(|sk| sk.strip_prefix("OBRASOCIAL#"))
        .and_then(|s| s.parse().ok())?;
    Some(ObraSocial {
        id,
        nameprovider: item
            .get("nameprovider")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        contactprovider: item
            .get("contactprovider")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string()),
        startdateprovider: item
            .get("startdateprovider")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string()),
        created_at: item
            .get("created_at")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
    })
}

pub async fn list_obras_sociales(
    client: &DynamoClient,
    table_name: &str,
) -> Result<Vec<ObraSocial>, StoreError> {
    let result = client
        .query()
        .table_name(table_name)
        .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
        .expression_attribute_values(":pk", AttributeValue::S("OBRASOCIAL".to_string()))
        .expression_attribute_values(":sk_prefix", AttributeValue::S("OBRASOCIAL#".to_string()))
        .send()
        .await
        .map_err(StoreError::store)?;

    let mut obras: Vec<ObraSocial> = result.items().iter().filter_map(parse_obra).collect();
    obras.sort_by(|a, b| a.nameprovider.cmp(&b.nameprovider));
    Ok(obras)
}

pub async fn get_obra_social(
    client: &DynamoClient,
    table_name: &str,
    id: i64,
) -> Result<ObraSocial, StoreError> {
    let result = client
        .get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S("OBRASOCIAL".to_string()))
        .key("SK", AttributeValue::S(format!("OBRASOCIAL#{}", id)))
        .send()
        .await
        .map_err(StoreError::store)?;

    result.item().and_then(parse_obra).ok_or(StoreError::NotFound)
}

pub async fn create_obra_social(
    client: &DynamoClient,
    table_name: &str,
    payload: CreateObraSocialPayload,
) -> Result<ObraSocial, StoreError> {
    // Millisecond timestamp stands in for the upstream serial id.
    let id = chrono::Utc::now().timestamp_millis();
    let now = chrono::Utc::now().to_rfc3339();

    let mut builder = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S("OBRASOCIAL".to_string()))
        .item("SK", AttributeValue::S(format!("OBRASOCIAL#{}", id)))
        .item("nameprovider", AttributeValue::S(payload.nameprovider.clone()))
        .item("created_at", AttributeValue::S(now.clone()));
    if let Some(contact) = &payload.contactprovider {
        builder = builder.item("contactprovider", AttributeValue::S(contact.clone()));
    }
    if let Some(start) = &payload.startdateprovider {
        builder = builder.item("startdateprovider", AttributeValue::S(start.clone()));
    }
    builder.send().await.map_err(StoreError::store)?;

    Ok(ObraSocial {
        id,
        nameprovider: payload.nameprovider,
        contactprovider: payload.contactprovider,
        startdateprovider: payload.startdateprovider,
        created_at: now,
    })
}
