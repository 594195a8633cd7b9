use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use chrono::NaiveDate;
use std::collections::HashMap;

use super::model::{Receso, UpdateRecesoPayload};
use crate::error::StoreError;

const LIST_LIMIT: usize = 100;

fn parse_date(item: &HashMap<String, AttributeValue>, attr: &str) -> Option<NaiveDate> {
    item.get(attr)
        .and_then(|v| v.as_s().ok())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

fn parse_receso(item: &HashMap<String, AttributeValue>) -> Option<Receso> {
    let id = item
        .get("SK")
        .and_then(|v| v.as_s().ok())
        .and_then(|sk| sk.strip_prefix("RECESO#"))?
        .to_string();
    Some(Receso {
        id,
        user_id: item
            .get("user_id")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        start_date: parse_date(item, "start_date")?,
        end_date: parse_date(item, "end_date")?,
        comments: item
            .get("comments")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string()),
        created_date: item
            .get("created_date")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        user: None,
    })
}

/// List recesos, newest first, capped at 100 like the upstream query.
pub async fn list_recesos(
    client: &DynamoClient,
    table_name: &str,
) -> Result<Vec<Receso>, StoreError> {
    let result = client
        .query()
        .table_name(table_name)
        .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
        .expression_attribute_values(":pk", AttributeValue::S("RECESO".to_string()))
        .expression_attribute_values(":sk_prefix", AttributeValue::S("RECESO#".to_string()))
        .send()
        .await
        .map_err(StoreError::store)?;

    let mut recesos: Vec<Receso> = result.items().iter().filter_map(parse_receso).collect();
    recesos.sort_by(|a, b| b.created_date.cmp(&a.created_date));
    recesos.truncate(LIST_LIMIT);
    Ok(recesos)
}

pub async fn get_receso(
    client: &DynamoClient,
    table_name: &str,
    id: &str,
) -> Result<Receso, StoreError> {
    let result = client
        .get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S("RECESO".to_string()))
        .key("SK", AttributeValue::S(format!("RECESO#{}", id)))
        .send()
        .await
        .map_err(StoreError::store)?;

    result
        .item()
        .and_then(parse_receso)
        .ok_or(StoreError::NotFound)
}

pub async fn create_receso(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    comments: Option<String>,
) -> Result<Receso, StoreError> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let mut builder = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S("RECESO".to_string()))
        .item("SK", AttributeValue::S(format!("RECESO#{}", id)))
        .item("user_id", AttributeValue::S(user_id.to_string()))
        .item("start_date", AttributeValue::S(start_date.to_string()))
        .item("end_date", AttributeValue::S(end_date.to_string()))
        .item("created_date", AttributeValue::S(now.clone()));
    if let Some(comments) = &comments {
        builder = builder.item("comments", AttributeValue::S(comments.clone()));
    }
    builder.send().await.map_err(StoreError::store)?;

    Ok(Receso {
        id,
        user_id: user_id.to_string(),
        start_date,
        end_date,
        comments,
        created_date: now,
        user: None,
    })
}

/// Apply a partial update. The caller has already merged and re-validated
/// the resulting date interval.
pub async fn update_receso(
    client: &DynamoClient,
    table_name: &str,
    id: &str,
    payload: &UpdateRecesoPayload,
) -> Result<Receso, StoreError> {
    let mut update_expr = vec![];
    let mut expr_values = HashMap::new();

    if let Some(start) = payload.start_date {
        update_expr.push("start_date = :start_date");
        expr_values.insert(":start_date".to_string(), AttributeValue::S(start.to_string()));
    }
    if let Some(end) = payload.end_date {
        update_expr.push("end_date = :end_date");
        expr_values.insert(":end_date".to_string(), AttributeValue::S(end.to_string()));
    }
    if let Some(comments) = &payload.comments {
        update_expr.push("comments = :comments");
        expr_values.insert(":comments".to_string(), AttributeValue::S(comments.clone()));
    }

    if !update_expr.is_empty() {
        let mut builder = client
            .update_item()
            .table_name(table_name)
            .key("PK", AttributeValue::S("RECESO".to_string()))
            .key("SK", AttributeValue::S(format!("RECESO#{}", id)))
            .condition_expression("attribute_exists(PK)")
            .update_expression(format!("SET {}", update_expr.join(", ")));
        for (k, v) in expr_values {
            builder = builder.expression_attribute_values(k, v);
        }
        if let Err(e) = builder.send().await {
            let service_err = e.into_service_error();
            if service_err.is_conditional_check_failed_exception() {
                return Err(StoreError::NotFound);
            }
            return Err(StoreError::store(service_err));
        }
    }

    get_receso(client, table_name, id).await
}

pub async fn delete_receso(
    client: &DynamoClient,
    table_name: &str,
    id: &str,
) -> Result<(), StoreError> {
    client
        .delete_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S("RECESO".to_string()))
        .key("SK", AttributeValue::S(format!("RECESO#{}", id)))
        .send()
        .await
        .map_err(StoreError::store)?;
    Ok(())
}
