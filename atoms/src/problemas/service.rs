use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;

use super::model::{CreateProblemaPayload, Problema, ProblemaCategoria, ProblemaEstado};
use crate::error::StoreError;

fn parse_problema(item: &HashMap<String, AttributeValue>) -> Option<Problema> {
    let id = item
        .get("SK")
        .and_then(|v| v.as_s().ok())
        .and_then(|sk| sk.strip_prefix("PROBLEMA#"))?
        .to_string();
    let categoria = item
        .get("categoria")
        .and_then(|v| v.as_s().ok())
        .and_then(|s| ProblemaCategoria::parse(s))?;
    let estado = item
        .get("estado")
        .and_then(|v| v.as_s().ok())
        .and_then(|s| ProblemaEstado::parse(s))
        .unwrap_or(ProblemaEstado::Pendiente);
    Some(Problema {
        id,
        user_id: item
            .get("user_id")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        biochemist_id: item
            .get("biochemist_id")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string()),
        categoria,
        descripcion: item
            .get("descripcion")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        estado,
        archivos_urls: item
            .get("archivos_urls")
            .and_then(|v| v.as_ss().ok())
            .cloned()
            .unwrap_or_default(),
        created_at: item
            .get("created_at")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        updated_at: item
            .get("updated_at")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string()),
        biochemist: None,
    })
}

pub async fn list_problemas(
    client: &DynamoClient,
    table_name: &str,
) -> Result<Vec<Problema>, StoreError> {
    let result = client
        .query()
        .table_name(table_name)
        .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
        .expression_attribute_values(":pk", AttributeValue::S("PROBLEMA".to_string()))
        .expression_attribute_values(":sk_prefix", AttributeValue::S("PROBLEMA#".to_string()))
        .send()
        .await
        .map_err(StoreError::store)?;

    let mut problemas: Vec<Problema> = result.items().iter().filter_map(parse_problema).collect();
    problemas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(problemas)
}

pub async fn create_problema(
    client: &DynamoClient,
    table_name: &str,
    reporter_user_id: &str,
    payload: CreateProblemaPayload,
) -> Result<Problema, StoreError> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let mut builder = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S("PROBLEMA".to_string()))
        .item("SK", AttributeValue::S(format!("PROBLEMA#{}", id)))
        .item("user_id", AttributeValue::S(reporter_user_id.to_string()))
        .item(
            "categoria",
            AttributeValue::S(payload.categoria.as_str().to_string()),
        )
        .item("descripcion", AttributeValue::S(payload.descripcion.clone()))
        .item(
            "estado",
            AttributeValue::S(payload.estado.as_str().to_string()),
        )
        .item("created_at", AttributeValue::S(now.clone()));

    if let Some(biochemist_id) = &payload.biochemist_id {
        builder = builder.item("biochemist_id", AttributeValue::S(biochemist_id.clone()));
    }
    // String sets cannot be empty in DynamoDB; omit the attribute instead.
    if !payload.archivos_urls.is_empty() {
        builder = builder.item("archivos_urls", AttributeValue::Ss(payload.archivos_urls.clone()));
    }

    builder.send().await.map_err(StoreError::store)?;

    Ok(Problema {
        id,
        user_id: reporter_user_id.to_string(),
        biochemist_id: payload.biochemist_id,
        categoria: payload.categoria,
        descripcion: payload.descripcion,
        estado: payload.estado,
        archivos_urls: payload.archivos_urls,
        created_at: now,
        updated_at: None,
        biochemist: None,
    })
}

/// Delete one report. A missing record is `NotFound`, not a silent no-op.
pub async fn delete_problema(
    client: &DynamoClient,
    table_name: &str,
    id: &str,
) -> Result<(), StoreError> {
    let result = client
        .delete_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S("PROBLEMA".to_string()))
        .key("SK", AttributeValue::S(format!("PROBLEMA#{}", id)))
        .condition_expression("attribute_exists(PK)")
        .send()
        .await;

    if let Err(e) = result {
        let service_err = e.into_service_error();
        if service_err.is_conditional_check_failed_exception() {
            return Err(StoreError::NotFound);
        }
        return Err(StoreError::store(service_err));
    }
    Ok(())
}
