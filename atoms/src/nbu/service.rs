use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use chrono::NaiveDate;
use std::collections::HashMap;

use super::model::{CreateNbuPayload, Nbu};
use crate::error::StoreError;

// SK layout NBU#{effective_date}#{id}: ISO dates sort lexically, so the
// key order is the chronological order.
fn parse_nbu(item: &HashMap<String, AttributeValue>) -> Option<Nbu> {
    let sk = item.get("SK").and_then(|v| v.as_s().ok())?;
    let rest = sk.strip_prefix("NBU#")?;
    let (date_part, id) = rest.split_once('#')?;
    let effective_date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    let id_obrasocial = item
        .get("PK")
        .and_then(|v| v.as_s().ok())
        .and_then(|pk| pk.strip_prefix("NBU#"))
        .and_then(|s| s.parse().ok())?;
    Some(Nbu {
        id: id.to_string(),
        id_obrasocial,
        value: item
            .get("value")
            .and_then(|v| v.as_n().ok())
            .and_then(|n| n.parse().ok())
            .unwrap_or_default(),
        effective_date,
        created_at: item
            .get("created_at")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
    })
}

pub async fn create_nbu(
    client: &DynamoClient,
    table_name: &str,
    payload: CreateNbuPayload,
) -> Result<Nbu, StoreError> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    client
        .put_item()
        .table_name(table_name)
        .item(
            "PK",
            AttributeValue::S(format!("NBU#{}", payload.id_obrasocial)),
        )
        .item(
            "SK",
            AttributeValue::S(format!("NBU#{}#{}", payload.effective_date, id)),
        )
        .item("value", AttributeValue::N(payload.value.to_string()))
        .item("created_at", AttributeValue::S(now.clone()))
        .send()
        .await
        .map_err(StoreError::store)?;

    Ok(Nbu {
        id,
        id_obrasocial: payload.id_obrasocial,
        value: payload.value,
        effective_date: payload.effective_date,
        created_at: now,
    })
}

/// Full value history for one provider, newest first.
pub async fn list_nbu_history(
    client: &DynamoClient,
    table_name: &str,
    id_obrasocial: i64,
) -> Result<Vec<Nbu>, StoreError> {
    let result = client
        .query()
        .table_name(table_name)
        .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
        .expression_attribute_values(":pk", AttributeValue::S(format!("NBU#{}", id_obrasocial)))
        .expression_attribute_values(":sk_prefix", AttributeValue::S("NBU#".to_string()))
        .scan_index_forward(false)
        .send()
        .await
        .map_err(StoreError::store)?;

    Ok(result.items().iter().filter_map(parse_nbu).collect())
}

/// Most recent value for one provider, if any was ever published.
pub async fn latest_nbu(
    client: &DynamoClient,
    table_name: &str,
    id_obrasocial: i64,
) -> Result<Option<Nbu>, StoreError> {
    let result = client
        .query()
        .table_name(table_name)
        .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
        .expression_attribute_values(":pk", AttributeValue::S(format!("NBU#{}", id_obrasocial)))
        .expression_attribute_values(":sk_prefix", AttributeValue::S("NBU#".to_string()))
        .scan_index_forward(false)
        .limit(1)
        .send()
        .await
        .map_err(StoreError::store)?;

    Ok(result.items().first().and_then(parse_nbu))
}
